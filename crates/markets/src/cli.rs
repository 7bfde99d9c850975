use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON config file; `./markets.json` is used when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Sets the level of logging (`RUST_LOG` takes precedence)
    #[arg(long, global = true, default_value = "warn", ignore_case = true)]
    pub log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one batch and print the grid.
    Show {
        #[arg(long, default_value = "sectors")]
        view: ViewArg,
    },

    /// Interactive board: refresh, switch view, or quit.
    Watch {
        #[arg(long, default_value = "sectors")]
        view: ViewArg,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ViewArg {
    /// Sector & commodity ETFs.
    Sectors,

    /// Factor ETFs.
    Factors,
}

impl From<ViewArg> for markets::View {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Sectors => markets::View::Sectors,
            ViewArg::Factors => markets::View::Factors,
        }
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
