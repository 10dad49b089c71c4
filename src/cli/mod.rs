mod config_cmd;
mod info;
mod play;
mod reset;
mod today;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::models::{config, ChallengeCatalog, GameMode};
use crate::store::{FileBackend, ProgressStore};

#[derive(Parser)]
#[command(name = "codele")]
#[command(about = "Guess what a function does from as little of its code as possible", long_about = None)]
pub struct Cli {
    /// Challenge catalog (JSON) to use instead of the bundled one
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Directory where progress is stored
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play today's challenge, then practice (default)
    Play {
        #[arg(long, value_enum)]
        mode: Option<GameMode>,
    },
    /// Show which challenge is today's
    Today,
    /// Show your progress
    Info,
    /// Forget every completed challenge and the last played date
    Reset,
    /// Show or change saved settings
    Config {
        #[arg(long)]
        set_catalog: Option<PathBuf>,
        #[arg(long)]
        set_data_dir: Option<PathBuf>,
        /// Remove all saved settings
        #[arg(long)]
        clear: bool,
    },
}

/// Where this run reads its catalog from and keeps its progress.
pub struct Paths {
    pub catalog: Option<PathBuf>,
    pub data_dir: PathBuf,
}

impl Paths {
    fn resolve(cli: &Cli) -> Self {
        let user_config = config::load_config();
        Self {
            catalog: cli.catalog.clone().or_else(|| user_config.catalog_path.clone()),
            data_dir: cli.data_dir.clone().unwrap_or_else(|| user_config.data_dir()),
        }
    }
}

pub fn run(cli: Cli) {
    let paths = Paths::resolve(&cli);

    match cli.command {
        None => play::play(&paths, None),
        Some(Commands::Play { mode }) => play::play(&paths, mode),
        Some(Commands::Today) => today::show_today(&paths),
        Some(Commands::Info) => info::show_info(&paths),
        Some(Commands::Reset) => reset::reset_progress(&paths),
        Some(Commands::Config {
            set_catalog,
            set_data_dir,
            clear,
        }) => config_cmd::handle_config(set_catalog, set_data_dir, clear),
    }
}

fn load_catalog(path: Option<&Path>) -> ChallengeCatalog {
    let result = match path {
        Some(path) => ChallengeCatalog::load(path),
        None => ChallengeCatalog::bundled(),
    };

    result.unwrap_or_else(|e| {
        eprintln!("Failed to load challenges: {}", e);
        std::process::exit(1);
    })
}

fn open_store(paths: &Paths) -> ProgressStore<FileBackend> {
    ProgressStore::open(FileBackend::new(&paths.data_dir))
}
