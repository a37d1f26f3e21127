use bio::seq_analysis::gc::gc_content;
use serde::Serialize;

/// Width of a candidate oligo when nothing else is specified.
pub const DEFAULT_WINDOW: usize = 20;

/// A candidate oligo: one fixed-width window over the selected region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// 0-based offset of the window within the region
    pub offset: usize,
    pub seq: String,
}

/// Enumerates every window of `window` characters over the region, in
/// ascending offset order.
///
/// A region of `M` characters yields `M - window + 1` candidates; a region
/// shorter than the window yields none. The empty result is an expected
/// outcome, not an error.
pub fn candidate_oligos(region: &str, window: usize) -> Vec<Candidate> {
    assert!(window > 0, "window width must be positive");

    let chars: Vec<char> = region.chars().collect();
    chars
        .windows(window)
        .enumerate()
        .map(|(offset, w)| Candidate {
            offset,
            seq: w.iter().collect(),
        })
        .collect()
}

/// GC content of a sequence as a percentage, rounded to 2 decimal places.
///
/// `G` and `C` are counted case-insensitively over the total length, both
/// measured in bytes. Byte and character counts agree for the ASCII
/// alphabets sequences are written in; a multi-byte character weighs into
/// the denominator once per byte. The empty sequence has no defined
/// composition and reports 0.
pub fn gc_percent(seq: &str) -> f64 {
    if seq.is_empty() {
        return 0.0;
    }

    let percent = gc_content(seq.as_bytes()) as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}

/// The synthetic substitution submitted alongside a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mutation {
    /// 0-based index of the mutated base within the candidate
    pub position: usize,
    #[serde(rename = "ref")]
    pub reference: char,
    #[serde(rename = "alt")]
    pub alternate: char,
}

/// Picks the placeholder mutation for a candidate: the base at the midpoint
/// (`len / 2`), substituted with `A`, or with `G` when the midpoint already
/// is an `A`.
pub fn midpoint_mutation(seq: &str) -> Mutation {
    let bases: Vec<char> = seq.chars().collect();
    assert!(!bases.is_empty(), "cannot mutate an empty candidate");

    let position = bases.len() / 2;
    let reference = bases[position];
    let alternate = if reference == 'A' { 'G' } else { 'A' };

    Mutation {
        position,
        reference,
        alternate,
    }
}
