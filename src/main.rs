mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use diary_core::DiaryConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "diary")]
#[command(about = "A personal diary: list, add, delete and save your events")]
#[command(
    after_help = "Examples:\n  \
    diary          events in the coming week\n  \
    diary 30       events in the next 30 days\n  \
    diary -3       events in the past 3 days\n  \
    diary -d 1     delete events in the next day\n  \
    diary -a       add an event"
)]
#[command(disable_version_flag = true, allow_negative_numbers = true)]
struct Cli {
    /// List events within DAYS days from now (negative looks back)
    #[arg(value_name = "DAYS")]
    days: Option<i64>,

    /// Interactively add an event
    #[arg(short, long, conflicts_with_all = ["days", "delete", "save"])]
    add: bool,

    /// Delete events stored within DAYS days from now
    #[arg(short, long, value_name = "DAYS", conflicts_with_all = ["days", "save"])]
    delete: Option<i64>,

    /// Save all events to the report file
    #[arg(short, long, conflicts_with = "days")]
    save: bool,

    /// Delete without asking for confirmation
    #[arg(short, long, requires = "delete")]
    yes: bool,

    /// Use this config file instead of ~/.config/diary/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print version
    #[arg(short = 'v', long)]
    version: bool,
}

#[derive(Debug, PartialEq)]
enum Action {
    List(i64),
    Add,
    Delete(i64),
    Save,
}

impl Cli {
    fn action(&self, default_days: i64) -> Action {
        if self.add {
            Action::Add
        } else if let Some(days) = self.delete {
            Action::Delete(days)
        } else if self.save {
            Action::Save
        } else {
            Action::List(self.days.unwrap_or(default_days))
        }
    }
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    if cli.version {
        println!("diary {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => DiaryConfig::load_from(path)?,
        None => DiaryConfig::load()?,
    };

    match cli.action(config.default_days) {
        Action::List(days) => commands::list::run(&config, days),
        Action::Add => commands::add::run(&config),
        Action::Delete(days) => commands::delete::run(&config, days, cli.yes),
        Action::Save => commands::save::run(&config),
    }
}

/// Log to stderr, filtered by RUST_LOG (warnings only by default).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("diary").chain(args.iter().copied()))
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_lists_default_window() {
        assert_eq!(parse(&[]).unwrap().action(7), Action::List(7));
    }

    #[test]
    fn bare_number_lists_window() {
        assert_eq!(parse(&["30"]).unwrap().action(7), Action::List(30));
        assert_eq!(parse(&["-3"]).unwrap().action(7), Action::List(-3));
    }

    #[test]
    fn delete_takes_signed_days() {
        assert_eq!(parse(&["-d", "2"]).unwrap().action(7), Action::Delete(2));
        assert_eq!(parse(&["-d", "-2"]).unwrap().action(7), Action::Delete(-2));
    }

    #[test]
    fn add_and_save_flags() {
        assert_eq!(parse(&["-a"]).unwrap().action(7), Action::Add);
        assert_eq!(parse(&["-s"]).unwrap().action(7), Action::Save);
        assert_eq!(parse(&["--save"]).unwrap().action(7), Action::Save);
    }

    #[test]
    fn version_flag() {
        assert!(parse(&["-v"]).unwrap().version);
    }

    #[test]
    fn non_integer_days_is_rejected() {
        assert!(parse(&["soon"]).is_err());
        assert!(parse(&["-d", "1.5"]).is_err());
        assert!(parse(&["-d"]).is_err());
    }

    #[test]
    fn conflicting_modes_are_rejected() {
        assert!(parse(&["-a", "-s"]).is_err());
        assert!(parse(&["-a", "7"]).is_err());
        assert!(parse(&["-s", "-d", "1"]).is_err());
        assert!(parse(&["-y"]).is_err());
    }
}
