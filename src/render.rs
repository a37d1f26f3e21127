use std::io::Write;

use anyhow::Result;
use itertools::Itertools;

use crate::design::{CandidateReport, DesignReport, PredictionOutcome};

/// Wraps a sequence at 60 columns for display.
fn wrap_sequence(seq: &str) -> String {
    let chars: Vec<char> = seq.chars().collect();
    chars
        .chunks(60)
        .map(|chunk| chunk.iter().collect::<String>())
        .join("\n")
}

/// Writes the full human-readable report.
///
/// Layout follows the interactive tool this replaces: the selected region
/// first, then one block per candidate, then a closing count.
pub fn write_text_report(writer: &mut impl Write, report: &DesignReport) -> Result<()> {
    writeln!(
        writer,
        "Selected region ({}-{}):",
        report.region.start, report.region.end
    )?;
    writeln!(writer, "{}", wrap_sequence(&report.region_sequence))?;
    writeln!(writer)?;
    writeln!(writer, "Candidate SSO sequences:")?;

    for candidate in &report.candidates {
        writeln!(writer)?;
        write_candidate(writer, candidate)?;
    }

    writeln!(writer)?;
    writeln!(
        writer,
        "Generated {} candidate SSOs.",
        report.candidates.len()
    )?;

    Ok(())
}

/// Writes one candidate block: label, sequence, GC line, and whatever the
/// prediction request produced.
fn write_candidate(writer: &mut impl Write, candidate: &CandidateReport) -> Result<()> {
    writeln!(writer, "SSO #{}", candidate.index)?;
    writeln!(writer, "{}", candidate.sequence)?;
    writeln!(writer, "GC content: {:.2}%", candidate.gc_percent)?;

    match &candidate.prediction {
        Some(PredictionOutcome::Response(value)) => {
            writeln!(writer, "{}", serde_json::to_string_pretty(value)?)?;
        }
        Some(PredictionOutcome::Error { error }) => {
            writeln!(writer, "warning: {error}")?;
        }
        None => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::RunMetadata;
    use crate::oligo::Mutation;
    use crate::region::Region;
    use serde_json::json;
    use std::io::Cursor;

    fn render(report: &DesignReport) -> String {
        let mut cursor = Cursor::new(Vec::new());
        write_text_report(&mut cursor, report).unwrap();
        String::from_utf8(cursor.into_inner()).unwrap()
    }

    fn report_with(candidates: Vec<CandidateReport>) -> DesignReport {
        DesignReport {
            meta: RunMetadata::default(),
            region: Region { start: 1, end: 20 },
            region_sequence: "ACGTACGTACGTACGTACGT".to_string(),
            candidates,
        }
    }

    fn candidate(index: usize, prediction: Option<PredictionOutcome>) -> CandidateReport {
        CandidateReport {
            index,
            sequence: "ACGTACGTACGTACGTACGT".to_string(),
            gc_percent: 50.0,
            mutation: Mutation {
                position: 10,
                reference: 'G',
                alternate: 'A',
            },
            prediction,
        }
    }

    #[test]
    fn report_shows_region_candidates_and_count() {
        let rendered = render(&report_with(vec![
            candidate(1, Some(PredictionOutcome::Response(json!({"score": 0.9})))),
            candidate(
                2,
                Some(PredictionOutcome::Error {
                    error: "SpliceAI request failed: 404".to_string(),
                }),
            ),
        ]));

        assert!(rendered.starts_with("Selected region (1-20):\nACGTACGTACGTACGTACGT\n"));
        assert!(rendered.contains("Candidate SSO sequences:"));
        assert!(rendered.contains("SSO #1\nACGTACGTACGTACGTACGT\nGC content: 50.00%\n"));
        assert!(rendered.contains("\"score\": 0.9"));
        assert!(rendered.contains("SSO #2"));
        assert!(rendered.contains("warning: SpliceAI request failed: 404"));
        assert!(rendered.ends_with("Generated 2 candidate SSOs.\n"));
    }

    #[test]
    fn empty_report_still_shows_the_count() {
        let rendered = render(&report_with(vec![]));

        assert!(rendered.contains("Candidate SSO sequences:"));
        assert!(rendered.ends_with("Generated 0 candidate SSOs.\n"));
    }

    #[test]
    fn skipped_predictions_render_without_a_body() {
        let rendered = render(&report_with(vec![candidate(1, None)]));

        assert!(rendered.contains("GC content: 50.00%\n\nGenerated 1 candidate SSOs.\n"));
    }

    #[test]
    fn long_regions_wrap_at_sixty_columns() {
        let mut report = report_with(vec![]);
        report.region_sequence = "A".repeat(75);
        report.region = Region { start: 1, end: 75 };

        let rendered = render(&report);
        assert!(rendered.contains(&format!("{}\n{}\n", "A".repeat(60), "A".repeat(15))));
    }

    #[test]
    fn gc_is_always_shown_with_two_decimals() {
        let mut with_fraction = candidate(1, None);
        with_fraction.gc_percent = 66.67;
        assert!(render(&report_with(vec![with_fraction])).contains("GC content: 66.67%"));

        let mut without_gc = candidate(1, None);
        without_gc.gc_percent = 0.0;
        assert!(render(&report_with(vec![without_gc])).contains("GC content: 0.00%"));
    }
}
