use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;

use crate::oligo::{self, Mutation};
use crate::predict::{MutationQuery, PredictError, Predictor};
use crate::region::Region;

/// Knobs for a single design run.
#[derive(Debug, Clone)]
pub struct DesignOpts {
    /// Width of the sliding window, in bases.
    pub window: usize,
    /// When set, candidates are enumerated and annotated with GC content
    /// but no prediction requests are made.
    pub skip_predictions: bool,
}

impl Default for DesignOpts {
    fn default() -> Self {
        DesignOpts {
            window: oligo::DEFAULT_WINDOW,
            skip_predictions: false,
        }
    }
}

/// What came back for one candidate's prediction request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionOutcome {
    /// The upstream response body, passed through unchanged.
    Response(Value),
    /// The request failed. The message carries the status code or the
    /// transport failure description.
    Error { error: String },
}

impl From<Result<Value, PredictError>> for PredictionOutcome {
    fn from(result: Result<Value, PredictError>) -> Self {
        match result {
            Ok(value) => PredictionOutcome::Response(value),
            Err(e) => PredictionOutcome::Error {
                error: e.to_string(),
            },
        }
    }
}

/// One fully annotated candidate oligo.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateReport {
    /// 1-based rank of the candidate, matching its `SSO #n` label.
    pub index: usize,
    pub sequence: String,
    pub gc_percent: f64,
    pub mutation: Mutation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<PredictionOutcome>,
}

/// Details about the run itself, reported alongside the candidates.
#[derive(Debug, Clone, Serialize, Default)]
pub struct RunMetadata {
    pub ssosweep_version: String,
    pub run_date: String,
    pub elapsed: f64,
    pub window: usize,
    pub candidate_count: usize,
}

/// Everything a single design run produced.
#[derive(Debug, Clone, Serialize)]
pub struct DesignReport {
    pub meta: RunMetadata,
    pub region: Region,
    pub region_sequence: String,
    pub candidates: Vec<CandidateReport>,
}

/// Runs the full pipeline: select the region, enumerate candidate oligos,
/// and annotate each one with GC content and (unless skipped) a single
/// prediction.
///
/// Region validation failures abort the run before any candidate exists.
/// Prediction failures never do: each is recorded on its candidate and the
/// remaining candidates are still annotated, one request at a time.
///
/// # Arguments
/// * `sequence` - the full input sequence, already cleaned of whitespace
/// * `region` - 1-based inclusive coordinates within `sequence`
/// * `opts` - window width and prediction switches
/// * `predictor` - prediction backend, live or canned
pub fn design(
    sequence: &str,
    region: Region,
    opts: &DesignOpts,
    predictor: &impl Predictor,
) -> Result<DesignReport> {
    let now = Instant::now();

    let selected = region.select(sequence)?;
    info!(
        "Selected region {}-{} ({} bp)",
        region.start,
        region.end,
        region.len()
    );

    let candidates = oligo::candidate_oligos(selected, opts.window);
    if candidates.is_empty() {
        warn!(
            "Region is shorter than the {} bp window, so there are no candidates to design",
            opts.window
        );
    }

    let mut reports = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let gc_percent = oligo::gc_percent(&candidate.seq);
        let mutation = oligo::midpoint_mutation(&candidate.seq);

        let prediction = if opts.skip_predictions {
            None
        } else {
            let query = MutationQuery {
                sequence: candidate.seq.clone(),
                position: mutation.position,
                reference: mutation.reference,
                alternate: mutation.alternate,
            };
            debug!(
                "Candidate #{}: querying position {} {}>{}",
                candidate.offset + 1,
                mutation.position,
                mutation.reference,
                mutation.alternate
            );
            Some(predictor.predict(&query).into())
        };

        reports.push(CandidateReport {
            index: candidate.offset + 1,
            sequence: candidate.seq,
            gc_percent,
            mutation,
            prediction,
        });
    }

    let meta = RunMetadata {
        ssosweep_version: crate::cli::VERSION.to_string(),
        run_date: format!("{:?}", chrono::offset::Local::now()),
        elapsed: now.elapsed().as_secs_f64(),
        window: opts.window,
        candidate_count: reports.len(),
    };
    info!(
        "Annotated {} candidates in {:.1}s",
        meta.candidate_count, meta.elapsed
    );

    Ok(DesignReport {
        meta,
        region,
        region_sequence: selected.to_string(),
        candidates: reports,
    })
}
