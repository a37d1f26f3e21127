use clap::builder::styling::AnsiColor;
use clap::builder::Styles;
use clap::{Parser, Subcommand};

use crate::oligo::DEFAULT_WINDOW;
use crate::predict::SPLICEAI_URL;
use crate::region::Region;

const fn extra_build_info() -> &'static str {
    match option_env!("CARGO_BUILD_DESC") {
        Some(e) => e,
        None => env!("CARGO_PKG_VERSION"),
    }
}
pub const VERSION: &str = extra_build_info();
const INFO_STRING: &str = "
🧬 ssosweep version ";
const AFTER_STRING: &str = "
   ──────────────────────────────────
   sliding-window design of splice-switching oligos,
   annotated with SpliceAI predictions";

// colouring of the help
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().bold())
    .usage(AnsiColor::BrightCyan.on_default().bold())
    .literal(AnsiColor::BrightCyan.on_default())
    .placeholder(AnsiColor::White.on_default());

#[derive(Parser)]
#[command(
    version = VERSION,
    about = format!("{}{}{}", INFO_STRING, VERSION, AFTER_STRING),
    arg_required_else_help = true,
    flatten_help = true,
    styles = STYLES
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enumerate candidate SSOs across a region and annotate every one
    /// with its GC content and a SpliceAI prediction
    #[command(arg_required_else_help = true)]
    Design {
        /// the input sequence, given directly on the command line
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        sequence: Option<String>,

        /// read the sequence from a file instead: plain text, .fasta or .fastq
        /// (first record)
        #[arg(long, short)]
        file: Option<String>,

        /// the region to search, as 1-based inclusive positions `start,end`.
        /// defaults to the whole sequence. for example:
        ///     --region 5,34
        #[arg(
            long,
            short,
            value_parser = |x: &str| Region::try_from(x),
            verbatim_doc_comment
        )]
        region: Option<Region>,

        /// the width of each candidate, in bases
        #[arg(
            long,
            short,
            default_value_t = DEFAULT_WINDOW,
            value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
        )]
        window: usize,

        /// the prediction endpoint to POST each candidate to
        #[arg(long, default_value = SPLICEAI_URL)]
        url: String,

        /// the per-request timeout, in seconds
        #[arg(long, default_value_t = 10)]
        timeout: u64,

        /// enumerate and annotate candidates without querying the prediction
        /// service at all
        #[arg(long, action)]
        skip_predictions: bool,

        /// write the full report as JSON rather than text
        #[arg(long, action)]
        json: bool,

        /// the output file; defaults to stdout
        #[arg(short)]
        output: Option<String>,
    },

    /// Report the GC content of one or more sequences
    #[command(arg_required_else_help = true)]
    Gc {
        /// the sequences to measure
        #[arg(required = true)]
        sequences: Vec<String>,
    },
}
