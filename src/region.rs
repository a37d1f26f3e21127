use indoc::formatdoc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 1-based, inclusive-at-both-ends span of positions within a sequence.
///
/// A region is only meaningful relative to a sequence; `select` performs the
/// bounds validation and produces the covered sub-sequence.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

/// Error type for parsing a region string.
#[derive(Debug)]
pub struct ParseRegionErr(String);

impl std::fmt::Display for ParseRegionErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid region format: {}", self.0)
    }
}

impl std::error::Error for ParseRegionErr {}

impl<'a> TryFrom<&'a str> for Region {
    type Error = ParseRegionErr;

    fn try_from(arg: &'a str) -> Result<Region, Self::Error> {
        let parts: Vec<&str> = arg.split(',').collect();

        if parts.len() != 2 {
            return Err(ParseRegionErr(formatdoc! {"
            Expected format '<start>,<end>', got '{arg}'. Both positions are \
            1-based and inclusive, as in:
              --region 1,30
              --region 45,90
            "}));
        }

        let position = |raw: &str| -> Result<usize, ParseRegionErr> {
            let raw = raw.trim();
            match raw.parse::<usize>() {
                Ok(0) => Err(ParseRegionErr(format!(
                    "'{raw}' is not a valid position (positions are 1-based)"
                ))),
                Ok(v) => Ok(v),
                Err(_) => Err(ParseRegionErr(format!(
                    "Invalid position: '{raw}' (should be a positive integer)"
                ))),
            }
        };

        Ok(Region {
            start: position(parts[0])?,
            end: position(parts[1])?,
        })
    }
}

impl Region {
    /// Number of positions covered. Meaningful once the region has passed
    /// validation, i.e. `start <= end`.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Extracts the sub-sequence covered by this region.
    ///
    /// Positions are counted in characters, matching how sequences are
    /// entered. A valid selection always has exactly `end - start + 1`
    /// characters.
    ///
    /// # Errors
    ///
    /// Fails without side effects when the sequence is empty, when `start`
    /// is 0 (positions are 1-based), when `start > end`, or when `end`
    /// reaches past the end of the sequence.
    pub fn select<'a>(&self, sequence: &'a str) -> Result<&'a str, RegionError> {
        if sequence.is_empty() {
            return Err(RegionError::EmptySequence);
        }
        if self.start == 0 {
            return Err(RegionError::ZeroStart);
        }
        if self.start > self.end {
            return Err(RegionError::InvertedBounds {
                start: self.start,
                end: self.end,
            });
        }

        // byte offset at which each position starts
        let offsets: Vec<usize> = sequence.char_indices().map(|(i, _)| i).collect();
        if self.end > offsets.len() {
            return Err(RegionError::PastEnd {
                start: self.start,
                end: self.end,
                len: offsets.len(),
            });
        }

        let from = offsets[self.start - 1];
        let to = offsets.get(self.end).copied().unwrap_or(sequence.len());
        Ok(&sequence[from..to])
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegionError {
    #[error("the sequence is empty")]
    EmptySequence,

    #[error("positions are 1-based: a region cannot start at position 0")]
    ZeroStart,

    #[error("invalid region {start}-{end}: start must not exceed end")]
    InvertedBounds { start: usize, end: usize },

    #[error("region {start}-{end} extends past the end of the sequence ({len} bp)")]
    PastEnd {
        start: usize,
        end: usize,
        len: usize,
    },
}
