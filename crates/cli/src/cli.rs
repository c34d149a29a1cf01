//! Minimal command-line parsing.

use std::fmt;

use scour_core::{UniversalCategory, UniversalQuery};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search every enabled indexer.
    Search(UniversalQuery),
    /// Run every indexer's setup check.
    Setup,
    /// List configured indexers and their categories.
    Indexers,
    /// Print the configuration with secrets redacted.
    Config,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub command: Command,
    /// Print Prometheus metrics to stderr before exiting.
    pub metrics: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError(String);

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for CliError {}

pub const USAGE: &str = "\
Usage: scour <command> [options]

Commands:
  search <terms..> [--season N] [--episode N] [--imdb ID] [--category C]...
  setup
  indexers
  config
  help

Options:
  --metrics    print metrics to stderr on exit

Environment:
  SCOUR_CONFIG   config file path (default: config.toml)
  RUST_LOG       log filter (default: info)";

fn parse_number(flag: &str, value: Option<String>) -> Result<u32, CliError> {
    let value = value.ok_or_else(|| CliError(format!("{} requires a value", flag)))?;
    value
        .parse()
        .map_err(|_| CliError(format!("{} expects a number, got {:?}", flag, value)))
}

fn required(flag: &str, value: Option<String>) -> Result<String, CliError> {
    value.ok_or_else(|| CliError(format!("{} requires a value", flag)))
}

impl CliOptions {
    pub fn from_args() -> Result<Self, CliError> {
        Self::parse(std::env::args().skip(1))
    }

    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, CliError> {
        let mut args = args.into_iter();
        let mut metrics = false;
        let mut command_name = None;
        let mut terms: Vec<String> = vec![];
        let mut season = None;
        let mut episode = None;
        let mut imdb = None;
        let mut categories = vec![];

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--metrics" => metrics = true,
                "-h" | "--help" => command_name = Some("help".to_string()),
                "--season" => season = Some(parse_number("--season", args.next())?),
                "--episode" => episode = Some(parse_number("--episode", args.next())?),
                "--imdb" => imdb = Some(required("--imdb", args.next())?),
                "--category" => {
                    let value = required("--category", args.next())?;
                    categories.push(value.parse::<UniversalCategory>().map_err(CliError)?);
                }
                _ if arg.starts_with("--") => {
                    return Err(CliError(format!("Unknown option: {}", arg)));
                }
                _ if command_name.is_none() => command_name = Some(arg),
                _ => terms.push(arg),
            }
        }

        let command = match command_name.as_deref() {
            Some("search") => {
                if episode.is_some() && season.is_none() {
                    return Err(CliError("--episode requires --season".to_string()));
                }
                let term = terms.join(" ");
                Command::Search(UniversalQuery {
                    search_term: (!term.trim().is_empty()).then_some(term),
                    season,
                    episode,
                    external_id: imdb,
                    categories,
                })
            }
            Some("setup") => Command::Setup,
            Some("indexers") => Command::Indexers,
            Some("config") => Command::Config,
            Some("help") | None => Command::Help,
            Some(other) => return Err(CliError(format!("Unknown command: {}", other))),
        };

        Ok(Self { command, metrics })
    }
}
