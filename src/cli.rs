//! Command line parsing.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use linefind_buffer::Position;
use linefind_text_search::SearchDirection;

pub const USAGE: &str = "\
linefind - find and replace in text files

USAGE:
    linefind find FILE PATTERN [OPTIONS]
    linefind replace FILE PATTERN REPLACEMENT [OPTIONS]
    linefind -h, --help        Show this help message
    linefind -v, --version     Show version information

FIND OPTIONS:
    --from ROW:COL     Start position (default 0:0)
    --forward          Search towards the end of the file
    --backward         Search towards the start of the file
    --wrap             Continue from the other end when a scan runs out
    --no-wrap          Stop at the end of the file
    --all              Keep finding until no further match

REPLACE OPTIONS:
    --write            Save the result back to FILE instead of printing it

COMMON OPTIONS:
    --match-case       Case-sensitive matching
    --whole-word       Match whole words only
    --config PATH      Read settings from PATH instead of the default config";

/// Flags shared by find and replace. `None` means "use the config value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchArgs {
    pub match_case: Option<bool>,
    pub whole_word: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindArgs {
    pub file: PathBuf,
    pub pattern: String,
    pub from: Position,
    pub direction: Option<SearchDirection>,
    pub wrap: Option<bool>,
    pub all: bool,
    pub matching: MatchArgs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceArgs {
    pub file: PathBuf,
    pub pattern: String,
    pub replacement: String,
    pub write: bool,
    pub matching: MatchArgs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Find(FindArgs),
    Replace(ReplaceArgs),
    Help,
    Version,
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub command: Command,
    pub config: Option<PathBuf>,
}

/// Parse arguments (without the program name)
pub fn parse_args<I, S>(args: I) -> Result<Cli>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut positional = Vec::new();
    let mut config = None;
    let mut from = None;
    let mut direction = None;
    let mut wrap = None;
    let mut all = false;
    let mut write = false;
    let mut matching = MatchArgs::default();

    let mut args = args.into_iter().map(Into::into);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                return Ok(Cli {
                    command: Command::Help,
                    config,
                })
            }
            "-v" | "--version" => {
                return Ok(Cli {
                    command: Command::Version,
                    config,
                })
            }
            "--config" => {
                let path = args.next().context("--config requires a path")?;
                config = Some(PathBuf::from(path));
            }
            "--from" => {
                let value = args.next().context("--from requires ROW:COL")?;
                let pos = value.parse::<Position>().map_err(anyhow::Error::msg)?;
                from = Some(pos);
            }
            "--forward" => direction = Some(SearchDirection::Forward),
            "--backward" => direction = Some(SearchDirection::Backward),
            "--wrap" => wrap = Some(true),
            "--no-wrap" => wrap = Some(false),
            "--all" => all = true,
            "--write" => write = true,
            "--match-case" => matching.match_case = Some(true),
            "--whole-word" => matching.whole_word = Some(true),
            "--" => positional.extend(args.by_ref()),
            flag if flag.starts_with("--") => bail!("Unknown flag '{}'", flag),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let command = match positional.next().as_deref() {
        Some("find") => {
            let file = positional.next().context("find requires FILE")?;
            let pattern = positional.next().context("find requires PATTERN")?;
            if write {
                bail!("--write only applies to replace");
            }
            Command::Find(FindArgs {
                file: PathBuf::from(file),
                pattern,
                from: from.unwrap_or_default(),
                direction,
                wrap,
                all,
                matching,
            })
        }
        Some("replace") => {
            let file = positional.next().context("replace requires FILE")?;
            let pattern = positional.next().context("replace requires PATTERN")?;
            let replacement = positional
                .next()
                .context("replace requires REPLACEMENT")?;
            if from.is_some() || direction.is_some() || wrap.is_some() || all {
                bail!(
                    "--from, --forward, --backward, --wrap, --no-wrap and --all only apply to find"
                );
            }
            Command::Replace(ReplaceArgs {
                file: PathBuf::from(file),
                pattern,
                replacement,
                write,
                matching,
            })
        }
        Some(other) => bail!("Unknown command '{}'", other),
        None => Command::Help,
    };

    if let Some(extra) = positional.next() {
        bail!("Unexpected argument '{}'", extra);
    }

    Ok(Cli { command, config })
}
