//! Command-line surface of the `cadence` binary.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cadence")]
#[command(about = "Expand recurring-event series into dated occurrences", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to `cadence.toml` when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Expand a serie payload and print its occurrences as JSON
    Expand {
        /// Payload file, or `-` for stdin
        input: PathBuf,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,

        /// Only occurrences ending after this instant
        #[arg(long, value_parser = parse_instant)]
        from: Option<NaiveDateTime>,

        /// Only occurrences starting before this instant
        #[arg(long, value_parser = parse_instant)]
        to: Option<NaiveDateTime>,
    },
    /// List the supported pattern and stop condition kinds
    Kinds,
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM` or `YYYY-MM-DDTHH:MM:SS`.
///
/// ## Errors
/// Returns a message naming the rejected value.
pub fn parse_instant(value: &str) -> Result<NaiveDateTime, String> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .into_iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| format!("`{value}` is not a date (YYYY-MM-DD) or local date-time (YYYY-MM-DDTHH:MM)"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_instant_forms() {
        let midnight = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_instant("2024-01-05").unwrap(), midnight);
        assert_eq!(
            parse_instant("2024-01-05T09:30").unwrap(),
            midnight + chrono::TimeDelta::minutes(570)
        );
        assert_eq!(
            parse_instant("2024-01-05T09:30:15").unwrap(),
            midnight + chrono::TimeDelta::seconds(570 * 60 + 15)
        );
        assert!(parse_instant("05/01/2024").is_err());
    }

    #[test]
    fn test_expand_arguments() {
        let cli = Cli::try_parse_from([
            "cadence",
            "--config",
            "alt.toml",
            "expand",
            "-",
            "--pretty",
            "--from",
            "2024-01-01",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
        match cli.command {
            Command::Expand {
                input,
                pretty,
                from,
                to,
            } => {
                assert_eq!(input, PathBuf::from("-"));
                assert!(pretty);
                assert!(from.is_some());
                assert!(to.is_none());
            }
            Command::Kinds => panic!("expected expand"),
        }
    }
}
