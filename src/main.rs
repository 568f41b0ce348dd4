//! Command that prints '-n count' UUID0 strings, optionally for a fixed '-t timestamp'

use std::{io, io::Write, process::ExitCode};

use clap::{Parser, ValueEnum};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use uuid0::generator::{ticks_from_unix_ts, Generator};

/// Generate timestamped UUIDs (UUID0).
///
/// Identifiers are printed one per line. When a timestamp is given, every identifier carries it
/// and only the random part differs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// UNIX timestamp in fractional seconds [default: current time]
    #[arg(short, long, env = "UUID0_TIMESTAMP", allow_negative_numbers = true)]
    timestamp: Option<f64>,

    /// Number of UUIDs to generate
    #[arg(short, long, default_value_t = 200, env = "UUID0_COUNT")]
    number: usize,

    /// Output text form
    #[arg(short, long, value_enum, default_value_t = Format::Hex)]
    format: Format,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum Format {
    /// Canonical 8-4-4-4-12 hexadecimal
    Hex,
    /// 32 hexadecimal digits without hyphens
    Simple,
    /// Compact base62
    Base62,
}

fn setup_logging() {
    let main_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(main_layer)
        .init()
}

/// Failure of a command run.
#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Timestamp(#[from] uuid0::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Writes `args.number` identifiers to `out`, one per line.
///
/// The timestamp is validated before anything is written.
fn run(args: &Args, out: &mut impl Write) -> Result<(), RunError> {
    let ticks = args.timestamp.map(ticks_from_unix_ts).transpose()?;

    let mut g = Generator::with_rand08(rand::thread_rng());
    for _ in 0..args.number {
        let e = match ticks {
            Some(ticks) => g.generate_from_ticks(ticks),
            None => g.generate(),
        };
        match args.format {
            Format::Hex => writeln!(out, "{}", e)?,
            Format::Simple => writeln!(out, "{}", e.simple())?,
            Format::Base62 => writeln!(out, "{}", e.base62())?,
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging();
    tracing::debug!(?args, "parsed arguments");

    let mut buf = io::BufWriter::new(io::stdout().lock());
    let result = run(&args, &mut buf).and_then(|()| buf.flush().map_err(RunError::from));
    match result {
        Ok(()) => {
            tracing::debug!(count = args.number, "done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, "failed to generate identifiers");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{run, Args, Format, RunError};
    use clap::{CommandFactory, Parser};
    use uuid0::{Error, Uuid0};

    /// Has consistent argument definitions
    #[test]
    fn has_consistent_argument_definitions() {
        Args::command().debug_assert();
    }

    /// Applies defaults when no argument is given
    #[test]
    fn applies_defaults_when_no_argument_is_given() {
        let args = Args::try_parse_from(["uuid0"]).unwrap();
        assert_eq!(args.number, 200);
        assert_eq!(args.format, Format::Hex);
    }

    /// Parses timestamp, count and format
    #[test]
    fn parses_timestamp_count_and_format() {
        let args =
            Args::try_parse_from(["uuid0", "-t", "1600000000.5", "-n", "3", "-f", "base62"])
                .unwrap();
        assert_eq!(args.timestamp, Some(1_600_000_000.5));
        assert_eq!(args.number, 3);
        assert_eq!(args.format, Format::Base62);

        let args = Args::try_parse_from(["uuid0", "--timestamp=-1"]).unwrap();
        assert_eq!(args.timestamp, Some(-1.0));
    }

    /// Returns error to invalid arguments
    #[test]
    fn returns_error_to_invalid_arguments() {
        let cases: &[&[&str]] = &[
            &["uuid0", "-n"],
            &["uuid0", "-n", "many"],
            &["uuid0", "-n", "-1"],
            &["uuid0", "-t", "yesterday"],
            &["uuid0", "-f", "octal"],
            &["uuid0", "extra"],
        ];

        for e in cases {
            assert!(Args::try_parse_from(e.iter().copied()).is_err(), "{:?}", e);
        }
    }

    fn run_with(argv: &[&str]) -> Result<Vec<String>, RunError> {
        let args = Args::try_parse_from(argv.iter().copied()).unwrap();
        let mut out = Vec::new();
        run(&args, &mut out)?;
        let text = String::from_utf8(out).unwrap();
        Ok(text.lines().map(String::from).collect())
    }

    /// Writes requested number of base62 identifiers for fixed timestamp
    #[test]
    fn writes_requested_number_of_base62_identifiers_for_fixed_timestamp() {
        let lines = run_with(&["uuid0", "-t", "1600000000", "-n", "3", "-f", "base62"]).unwrap();
        assert_eq!(lines.len(), 3);

        let ids: Vec<Uuid0> = lines
            .iter()
            .map(|e| Uuid0::from_base62(e).unwrap())
            .collect();
        for e in &ids {
            assert_eq!(e.ticks(), 16_000_000_000_000);
        }
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
    }

    /// Writes hex and simple forms
    #[test]
    fn writes_hex_and_simple_forms() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$";
        let hex = regex::Regex::new(pattern).unwrap();
        let lines = run_with(&["uuid0", "-t", "1263513636", "-n", "5"]).unwrap();
        assert_eq!(lines.len(), 5);
        for e in &lines {
            assert!(hex.is_match(e), "{}", e);
            assert!(e.starts_with("0b7dd8d0-7e40-"));
        }

        let simple = regex::Regex::new(r"^[0-9a-f]{32}$").unwrap();
        let lines = run_with(&["uuid0", "-n", "5", "-f", "simple"]).unwrap();
        assert_eq!(lines.len(), 5);
        for e in &lines {
            assert!(simple.is_match(e), "{}", e);
            assert!(e.parse::<Uuid0>().is_ok());
        }
    }

    /// Writes default count of current identifiers
    #[test]
    fn writes_default_count_of_current_identifiers() {
        let before = uuid0::generate().ticks();
        let lines = run_with(&["uuid0"]).unwrap();
        let after = uuid0::generate().ticks();
        assert_eq!(lines.len(), 200);
        for e in &lines {
            let ticks = e.parse::<Uuid0>().unwrap().ticks();
            assert!(before <= ticks && ticks <= after);
        }

        assert!(run_with(&["uuid0", "-n", "0"]).unwrap().is_empty());
    }

    /// Rejects invalid timestamp without writing anything
    #[test]
    fn rejects_invalid_timestamp_without_writing_anything() {
        for ts in ["-1", "NaN", "inf"] {
            let args = Args::try_parse_from(["uuid0", "-t", ts]).unwrap();
            let mut out = Vec::new();
            let err = run(&args, &mut out).unwrap_err();
            assert!(
                matches!(err, RunError::Timestamp(Error::Range(_))),
                "{}: {:?}",
                ts,
                err
            );
            assert!(out.is_empty());
        }
    }
}
