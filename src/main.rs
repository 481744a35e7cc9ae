//! Command-line entry point: downsamples `ecg.csv` into `ecg2.csv`.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, error, log_enabled};

use ecg_downrate::constants::{INPUT_FILE, OUTPUT_FILE};
use ecg_downrate::{DownsampleError, LineMode, downsample_file};

/// Exit code for a malformed command line (sysexits `EX_USAGE`)
const USAGE_EXIT_CODE: u8 = 64;

/// Keep every 50th line of an ECG trace
#[derive(Parser, Debug)]
#[command(name = "ecg-downrate")]
#[command(about = "Downsample a line-oriented ECG trace by a fixed factor of 50")]
#[command(version)]
struct Args {
    /// Input trace
    #[arg(short = 'i', long = "input", default_value = INPUT_FILE)]
    input: PathBuf,

    /// Output trace (created or truncated)
    #[arg(short = 'o', long = "output", default_value = OUTPUT_FILE)]
    output: PathBuf,

    /// Split lines longer than 127 bytes the way the old fixed-buffer tool did
    #[arg(long = "legacy-line-cap")]
    legacy_line_cap: bool,

    /// Show a spinner with the number of lines processed
    #[arg(long = "progress")]
    progress: bool,

    /// Print a JSON summary of the run on stdout
    #[arg(long = "report")]
    report: bool,
}

fn progress_bar(enabled: bool) -> Result<ProgressBar> {
    if !enabled {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn run(args: &Args) -> Result<()> {
    let mode = if args.legacy_line_cap {
        LineMode::legacy()
    } else {
        LineMode::Unbounded
    };

    let progress = progress_bar(args.progress)?;
    let report = downsample_file(&args.input, &args.output, mode, progress)?;

    if args.report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

/// Fatal errors must reach stderr even when `RUST_LOG` silences the logger
fn report_failure(err: &anyhow::Error) {
    if log_enabled!(Level::Error) {
        error!("{}", err);
    } else {
        eprintln!("{}", err);
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // --help and --version come through here as well
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(USAGE_EXIT_CODE)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&err);
            let code = err
                .downcast_ref::<DownsampleError>()
                .map_or(1, DownsampleError::exit_code);
            ExitCode::from(code as u8)
        }
    }
}
