use std::{path::PathBuf, sync::OnceLock};

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::CompleteEnv;

#[derive(Debug, Parser)]
#[command(name = "fold-render")]
#[command(version)]
#[command(about = "Render the frames of a foldable card animation", long_about = None)]
pub struct Cli {
    /// print pointer button codes to the log
    #[arg(short = 'd', long)]
    pub mouse_debug: bool,

    #[arg(short = 'c', long)]
    pub config_path: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    Fold,
    Unfold,
    /// tap the card once, as a user would
    Toggle,
}

#[derive(Subcommand, Debug, PartialEq, Clone)]
pub enum Command {
    /// print json schema of the configuration to the stdout
    #[command(name = "schema")]
    Schema,

    /// run one animation and write every frame as PNG
    #[command(name = "render", alias = "r")]
    Render {
        #[arg(long, value_enum, default_value_t = Direction::Unfold)]
        direction: Direction,

        /// directory the frames are written to
        #[arg(short = 'o', long, default_value = "frames")]
        out: PathBuf,

        /// pace frames against the clock instead of stepping time
        #[arg(long)]
        realtime: bool,
    },
}

static ARGS: OnceLock<Cli> = OnceLock::new();

pub fn get_args() -> &'static Cli {
    ARGS.get_or_init(Cli::parse)
}

/// nothing should be printed to stdout before this.
pub fn if_print_completion_and_exit() {
    CompleteEnv::with_factory(Cli::command).complete();
}
