use std::fmt;

use sprint_core::error::Error as DomainError;
use sprint_core::model::{GameMode, ParseModeError, ParseTopicError, Topic};

#[derive(Debug)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    Domain(DomainError),
    MenuIsNotPlayable,
    InvalidSeed { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::Domain(err) => write!(f, "{err}"),
            ArgsError::MenuIsNotPlayable => write!(f, "--mode menu is not a playable mode"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<ParseModeError> for ArgsError {
    fn from(err: ParseModeError) -> Self {
        Self::Domain(err.into())
    }
}

impl From<ParseTopicError> for ArgsError {
    fn from(err: ParseTopicError) -> Self {
        Self::Domain(err.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play,
    Study,
    Stats,
    Help,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "study" => Some(Self::Study),
            "stats" => Some(Self::Stats),
            "help" => Some(Self::Help),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub command: Command,
    /// `None` keeps everything in memory.
    pub db_url: Option<String>,
    pub mode: GameMode,
    pub topic: Topic,
    pub seed: Option<u64>,
    pub verbose: bool,
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  mathsprint play  [--mode <mode>] [--topic <topic>] [--db <sqlite_url>] [--seed <n>]");
    eprintln!("  mathsprint study [--db <sqlite_url>]");
    eprintln!("  mathsprint stats [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Modes:  climb, blitz, marathon, custom, study (default: blitz)");
    eprintln!("Topics: multiplication, squares, cubes, fractions, powers (default: multiplication)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --memory        keep progress in memory only");
    eprintln!("  -v, --verbose   debug logging (RUST_LOG overrides)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MATHSPRINT_DB_URL (default sqlite://mathsprint.sqlite3)");
}

/// Only argument mistakes warrant the usage text; runtime failures do not.
pub fn is_usage_error(err: &(dyn std::error::Error + 'static)) -> bool {
    err.is::<ArgsError>()
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    /// Parse process arguments (without the program name).
    ///
    /// # Errors
    ///
    /// Returns `ArgsError` for unknown flags or malformed values.
    pub fn parse(
        argv: impl IntoIterator<Item = String>,
        env_db_url: Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut args = argv.into_iter().peekable();

        let command = match args.peek().map(String::as_str) {
            None => Command::Play,
            Some("--help" | "-h") => Command::Help,
            Some(first) if first.starts_with('-') => Command::Play,
            Some(first) => {
                let cmd = Command::from_arg(first)
                    .ok_or_else(|| ArgsError::UnknownCommand(first.to_owned()))?;
                args.next();
                cmd
            }
        };

        let mut parsed = Self {
            command,
            db_url: Some(env_db_url.map_or_else(
                || "sqlite://mathsprint.sqlite3".to_owned(),
                normalize_sqlite_url,
            )),
            mode: GameMode::Blitz,
            topic: Topic::Multiplication,
            seed: None,
            verbose: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    parsed.db_url = Some(normalize_sqlite_url(value));
                }
                "--memory" => parsed.db_url = None,
                "--mode" => {
                    parsed.mode = require_value(&mut args, "--mode")?.parse::<GameMode>()?;
                }
                "--topic" => {
                    parsed.topic = require_value(&mut args, "--topic")?.parse::<Topic>()?;
                }
                "--seed" => {
                    let value = require_value(&mut args, "--seed")?;
                    let seed = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    parsed.seed = Some(seed);
                }
                "--verbose" | "-v" => parsed.verbose = true,
                "--help" | "-h" => parsed.command = Command::Help,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if parsed.mode == GameMode::Menu {
            return Err(ArgsError::MenuIsNotPlayable);
        }

        Ok(parsed)
    }
}

pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim();
    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Create the database file (and parent directories) when missing.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}
