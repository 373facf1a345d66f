use anyhow::{Context, Result};
use depcompare::args::{self, Args, Selection};
use depcompare::{compare, load, style, Comparison, ResultKey};
use is_terminal::IsTerminal;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = args::parsed();
    init_logging(args.verbosity);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}\n\n{}", args::usage());
            ExitCode::FAILURE
        }
    }
}

/// Warnings about skipped manifest lines go to stderr, so they never mix with
/// the coordinates printed on stdout
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let candidate =
        load(&args.format_tag, &args.dependencies).context("Can't load the dependency list")?;
    let target = load(&args.format_tag, &args.target).context("Can't load the target list")?;
    let comparison = compare(&candidate, &target);

    let stdout = io::stdout();
    if stdout.is_terminal() {
        print(&comparison, args, stdout.lock())
    } else {
        print(&comparison, args, io::BufWriter::new(stdout.lock()))
    }
}

fn print(comparison: &Comparison, args: &Args, mut out: impl Write) -> Result<()> {
    match args.selection {
        Selection::One(key) => write_list(&mut out, comparison.get(key), "")?,
        Selection::All => {
            let sheet = style::colored(args.color);
            for key in ResultKey::ALL {
                writeln!(out, "{}", sheet.title(&format!("{key}:")))?;
                write_list(&mut out, comparison.get(key), "  ")?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn write_list(out: &mut impl Write, coordinates: &[String], indent: &str) -> io::Result<()> {
    for coordinate in coordinates {
        writeln!(out, "{indent}{coordinate}")?;
    }
    Ok(())
}
