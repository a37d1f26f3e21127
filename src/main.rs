extern crate env_logger;
#[macro_use]
extern crate log;
use std::{
    fs::File,
    io::{prelude::*, stdout, BufWriter},
    path::Path,
    time::Duration,
};

use anyhow::Result;
use clap::Parser;

mod cli;
mod design;
mod input;
mod oligo;
mod predict;
mod region;
mod render;

use cli::{Cli, Commands};
use design::DesignOpts;
use predict::SpliceAi;
use region::Region;

/// Creates a `BufWriter` for the given output option. This allows for an output file to be passed
/// or otherwise will default to using standard output.
///
/// # Arguments
///
/// * `output` - An `Option` containing the path to the output file as a `String`.
///
/// # Returns
///
/// A `Result` containing a `BufWriter` that implements `Write`.
fn get_writer(output: &Option<String>) -> Result<impl Write> {
    // get output as a BufWriter - equal to stdout if None
    let writer = BufWriter::new(match output {
        Some(ref x) => {
            let file = File::create(Path::new(x))?;
            Box::new(file) as Box<dyn Write + Send>
        }
        None => Box::new(stdout()) as Box<dyn Write + Send>,
    });
    Ok(writer)
}

fn try_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let cli = Cli::parse();

    info!("ssosweep v{}", cli::VERSION);

    match &cli.command {
        Commands::Design {
            sequence,
            file,
            region,
            window,
            url,
            timeout,
            skip_predictions,
            json,
            output,
        } => {
            let sequence = match (sequence, file) {
                (Some(raw), _) => input::clean_sequence(raw),
                (None, Some(path)) => input::read_sequence_file(path)?,
                (None, None) => unreachable!("one of sequence or file is required"),
            };

            // an omitted region means the whole sequence
            let region = region.unwrap_or(Region {
                start: 1,
                end: sequence.chars().count(),
            });

            let opts = DesignOpts {
                window: *window,
                skip_predictions: *skip_predictions,
            };
            let predictor = SpliceAi::new(url.clone(), Duration::from_secs(*timeout));

            let report = design::design(&sequence, region, &opts, &predictor)?;

            let mut writer = get_writer(output)?;
            if *json {
                serde_json::to_writer_pretty(&mut writer, &report)?;
                writeln!(writer)?;
            } else {
                render::write_text_report(&mut writer, &report)?;
            }
        }
        Commands::Gc { sequences } => {
            for seq in sequences {
                let cleaned = input::clean_sequence(seq);
                println!("{}\t{:.2}", cleaned, oligo::gc_percent(&cleaned));
            }
        }
    };
    Ok(())
}

fn main() {
    if let Err(err) = try_main() {
        error!("{}", err);

        // report any errors that are produced
        err.chain()
            .skip(1)
            .for_each(|cause| error!("  because: {}", cause));

        std::process::exit(1);
    }
}
