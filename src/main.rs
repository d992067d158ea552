use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use recaman::{run, Mode, RecamanError};

/// 引数の数や MODE が不正な場合の終了コード（-1 相当）
const EXIT_USAGE: u8 = 255;

const MODE_HELP: &str = "\
The possible mode bits are (MODE is read as a base-2 number, most significant digit first):
  bit 0 (1):      print the values of the sequence
  bit 1 (10):     print change features (bits 2-5 refine this)
  bit 2 (100):    print a raw direction marker per step ('x' up, '_' down)
  bit 3 (1000):   print direction markers during oscillation collation
  bit 4 (10000):  collate oscillations into counts
  bit 5 (100000): print a single space instead of each oscillation count

Examples:
  recaman 1 20        values of the sequence up to 20
  recaman 110 1000    raw up/down markers
  recaman 11010 1000  markers with oscillation counts";

/// This is the recaman tool for working with the recaman sequence (https://oeis.org/A005132)
#[derive(Debug, Parser)]
#[command(name = "recaman", version, after_help = MODE_HELP)]
struct Cli {
    /// Output mode as a base-2 bit field
    #[arg(value_parser = parse_mode)]
    mode: Mode,

    /// Upper limit of tracked values (rounded up to a multiple of 8)
    bound: u64,
}

fn parse_mode(s: &str) -> Result<Mode, RecamanError> {
    s.parse()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("recaman=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_usage() {
    let mut cmd = Cli::command();
    if cmd.print_help().is_err() {
        eprintln!("Usage: recaman <MODE> <BOUND>");
    }
}

fn execute(cli: &Cli) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = run(cli.mode, cli.bound, &mut out)
        .with_context(|| format!("generating recaman sequence up to {}", cli.bound))?;
    out.flush().context("flushing standard output")?;
    tracing::debug!(?summary, "done");
    Ok(())
}

/// 出力先が閉じられた（パイプ切断）か
fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|e| e.kind() == io::ErrorKind::BrokenPipe)
}

fn main() -> ExitCode {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = e.print();
                    ExitCode::SUCCESS
                }
                ErrorKind::ValueValidation | ErrorKind::InvalidValue => {
                    let _ = e.print();
                    ExitCode::from(EXIT_USAGE)
                }
                _ => {
                    print_usage();
                    ExitCode::from(EXIT_USAGE)
                }
            };
        }
    };

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_broken_pipe(&e) => {
            tracing::debug!("standard output closed, stopping");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
