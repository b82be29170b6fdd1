//! CLI frontend for the Lands of Nanti card-and-dice game.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "nanti",
    about = "Lands of Nanti: roll the dice, play the cards, cross the ten lands",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding the profile and shop content
    #[arg(long, global = true, default_value = ".nanti")]
    data_dir: PathBuf,

    /// Use a catalog JSON file instead of the built-in levels
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive game session
    Play {
        /// RNG seed for reproducible games (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Show results immediately instead of pausing
        #[arg(long)]
        no_delay: bool,
    },

    /// List levels with goals, rewards and lock state
    Levels,

    /// Browse or extend the shop
    Shop {
        #[command(subcommand)]
        action: ShopAction,
    },

    /// Show or update the player profile
    Profile {
        /// Set the display name
        #[arg(long)]
        name: Option<String>,

        /// Set the connected wallet id
        #[arg(long)]
        wallet: Option<String>,
    },

    /// Print the catalog as JSON
    Catalog,
}

#[derive(Subcommand)]
enum ShopAction {
    /// List items for sale
    List,

    /// Add item definitions from a JSON file to the content store
    Add {
        /// JSON file with one definition or an array of them
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    commands::init_logging(cli.verbose);

    let catalog = cli.catalog.as_deref();
    let dir = cli.data_dir.as_path();
    let result = match cli.command {
        Commands::Play { seed, no_delay } => commands::play::run(dir, catalog, seed, no_delay),
        Commands::Levels => commands::levels::run(dir, catalog),
        Commands::Shop { action } => match action {
            ShopAction::List => commands::shop::list(dir),
            ShopAction::Add { file } => commands::shop::add(dir, &file),
        },
        Commands::Profile { name, wallet } => {
            commands::profile::run(dir, name.as_deref(), wallet.as_deref())
        }
        Commands::Catalog => commands::catalog::run(catalog),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
