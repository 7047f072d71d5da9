#![deny(unsafe_code)]

use std::io::Write;

use anyhow::Error;

use clap::{ArgAction, Parser, Subcommand};

mod estimate;
use estimate::Estimate;

mod rank;
use rank::Rank;

const NAME: &str = env!("CARGO_BIN_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tools for estimating and ranking per-bin centrality across ordered conditions.
#[derive(Debug, Parser)]
#[clap(name = NAME, version = VERSION, about)]
#[clap(subcommand_required = true)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Suppress log output.
    ///
    /// By default, warnings may be logged to stderr while running. Set this flag to silence all
    /// logging output.
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Log output verbosity.
    ///
    /// Set this flag once to show information, twice to show debug information, and three times
    /// to show trace information.
    #[clap(short = 'v', long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print CLI arguments for debugging.
    #[clap(long, hide = true, global = true)]
    debug: bool,
}

impl Cli {
    fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            log::LevelFilter::Off
        } else {
            match self.verbose {
                0 => log::LevelFilter::Warn,
                1 => log::LevelFilter::Info,
                2 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            }
        }
    }

    pub fn run(self) -> Result<(), Error> {
        if self.debug {
            eprintln!("{self:#?}");
        }

        match env_logger::Builder::new()
            .filter_level(self.log_level())
            .target(env_logger::Target::Stderr)
            .format(|buf, record| {
                let level = record.level().as_str().to_lowercase();
                let args = record.args();
                writeln!(buf, "[centrality {level:>5}] {args}")
            })
            .try_init()
        {
            Ok(()) => (),
            Err(e) => eprintln!("failed to setup logger: {e}"),
        }

        self.command.run()
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Estimate(Estimate),
    Rank(Rank),
}

impl Command {
    fn run(self) -> Result<(), Error> {
        match self {
            Command::Estimate(estimate) => estimate.run(),
            Command::Rank(rank) => rank.run(),
        }
    }
}

impl TryFrom<Command> for Estimate {
    type Error = Command;

    fn try_from(command: Command) -> Result<Self, Self::Error> {
        match command {
            Command::Estimate(estimate) => Ok(estimate),
            command => Err(command),
        }
    }
}

impl TryFrom<Command> for Rank {
    type Error = Command;

    fn try_from(command: Command) -> Result<Self, Self::Error> {
        match command {
            Command::Rank(rank) => Ok(rank),
            command => Err(command),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.run() {
        Ok(()) => (),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
