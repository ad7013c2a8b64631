//! pinmap CLI — board descriptor inspection and device programming.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pinmap", version, about = "FPGA board resource and programming toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or validate board descriptor files
    Board {
        #[command(subcommand)]
        action: BoardAction,
    },
    /// Resolve pin specs against a board's connector tables
    Resolve {
        /// Board descriptor file (*.board.toml)
        board: PathBuf,
        /// Pin specs, direct ("4") or through a connector ("j:1:2")
        specs: Vec<String>,
    },
    /// Prepare a merged build request for the synthesis toolchain
    Prepare {
        /// Board descriptor file (*.board.toml)
        board: PathBuf,
        /// Design name (names the bitstream artifact)
        #[arg(long)]
        name: String,
        /// Extra toolchain option as key=value, appended to the board's own
        #[arg(short = 'O', long = "option")]
        options: Vec<String>,
        /// Emit the request as JSON
        #[arg(long)]
        json: bool,
    },
    /// Program a built bitstream onto the board
    Program {
        /// Board descriptor file (*.board.toml)
        board: PathBuf,
        /// Design name (names the bitstream artifact)
        #[arg(long)]
        name: String,
        /// Directory holding the toolchain outputs
        #[arg(long)]
        products: PathBuf,
    },
    /// Check programmer availability and board descriptor health
    Doctor {
        /// Board descriptor to check (programmer default lookup otherwise)
        #[arg(long)]
        board: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum BoardAction {
    /// Show a board descriptor in detail
    Describe {
        /// Board descriptor file (*.board.toml)
        board: PathBuf,
        /// Output format (default: human-readable, "toml" or "json")
        #[arg(long)]
        format: Option<String>,
    },
    /// Validate a board descriptor
    Validate {
        /// Board descriptor file (*.board.toml)
        board: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Board { action } => match action {
            BoardAction::Describe { board, format } => {
                commands::board::describe(&board, format.as_deref())
            }
            BoardAction::Validate { board } => commands::board::validate(&board),
        },
        Commands::Resolve { board, specs } => commands::resolve::run(&board, &specs),
        Commands::Prepare {
            board,
            name,
            options,
            json,
        } => commands::prepare::run(&board, &name, &options, json),
        Commands::Program {
            board,
            name,
            products,
        } => commands::program::run(&board, &name, &products),
        Commands::Doctor { board } => commands::doctor::run(board.as_deref()),
    }
}
