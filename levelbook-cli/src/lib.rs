//! Command-line front end for levelbook.
//!
//! Usage:
//!   levelbook add --name Bloodbath --creator Riot --category demon --difficulty extreme
//!   levelbook list --difficulty insane-demon --sort name
//!   levelbook share
//!   levelbook import 'https://levelbook.local/#W3sia...' --yes
//!
//! Share links are printed to stdout; prompts and notices go to stderr.

mod commands;

pub use commands::{execute, AssumeYes, StdoutClipboard, TerminalConfirm};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use levelbook_catalog::{Catalog, CatalogConfig, DifficultyFilter, SortKey};
use levelbook_storage::{FileStore, KvLevelStore};
use levelbook_types::{Category, LevelFields, LevelId, Rating};
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Optional settings file inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

pub type FileCatalog = Catalog<KvLevelStore<FileStore>>;

#[derive(Parser, Debug)]
#[command(name = "levelbook", version)]
#[command(about = "Personal catalog of Geometry Dash levels")]
pub struct Args {
    /// Directory holding the level store and config.json
    #[arg(long, env = "LEVELBOOK_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a level
    Add(AddArgs),
    /// Edit a level; omitted fields keep their current value
    Edit {
        id: LevelId,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Remove a level
    Remove { id: LevelId },
    /// List levels grouped by category
    List {
        /// Case-insensitive text matched against name, creator and tags
        #[arg(short, long, default_value = "")]
        search: String,
        /// Difficulty filter code (see `options`)
        #[arg(short, long, default_value = "all")]
        difficulty: DifficultyFilter,
        #[arg(long, default_value = "recent")]
        sort: SortKey,
        /// Print render cards as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a share link for the whole list
    Share,
    /// Replace the list with a shared one
    Import {
        /// Share link or bare token
        source: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the choices a level form offers
    Options {
        #[arg(long)]
        category: Option<Category>,
        /// Show star choices for this difficulty
        #[arg(long, requires = "category")]
        difficulty: Option<String>,
    },
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub creator: String,
    #[arg(long, default_value = "unrated")]
    pub category: Category,
    #[arg(long)]
    pub difficulty: Option<String>,
    /// Star count, rated levels only
    #[arg(long)]
    pub stars: Option<String>,
    #[arg(long)]
    pub rating: Option<Rating>,
    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,
}

impl From<AddArgs> for LevelFields {
    fn from(args: AddArgs) -> Self {
        Self {
            name: args.name,
            creator: args.creator,
            category: args.category,
            difficulty: args.difficulty.unwrap_or_default(),
            star_rating: args.stars,
            rating: args.rating,
            tags: args.tags.unwrap_or_default(),
        }
    }
}

#[derive(clap::Args, Debug, Default)]
pub struct EditArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub creator: Option<String>,
    #[arg(long)]
    pub category: Option<Category>,
    #[arg(long)]
    pub difficulty: Option<String>,
    /// Star count; pass an empty value to clear it
    #[arg(long)]
    pub stars: Option<String>,
    #[arg(long)]
    pub rating: Option<Rating>,
    /// Comma-separated tags, replacing the current ones
    #[arg(long)]
    pub tags: Option<String>,
}

impl EditArgs {
    /// Overlays the given fields on a prefilled form.
    ///
    /// A new difficulty or category drops the current star count unless
    /// `--stars` is also given.
    #[must_use]
    pub fn apply(self, mut base: LevelFields) -> LevelFields {
        if self.difficulty.is_some() || self.category.is_some() {
            base.star_rating = None;
        }
        if let Some(name) = self.name {
            base.name = name;
        }
        if let Some(creator) = self.creator {
            base.creator = creator;
        }
        if let Some(category) = self.category {
            base.category = category;
        }
        if let Some(difficulty) = self.difficulty {
            base.difficulty = difficulty;
        }
        if let Some(stars) = self.stars {
            base.star_rating = Some(stars);
        }
        if let Some(rating) = self.rating {
            base.rating = Some(rating);
        }
        if let Some(tags) = self.tags {
            base.tags = tags;
        }
        base
    }
}

/// The streams a command talks to.
pub struct Console<'a> {
    pub input: &'a mut dyn BufRead,
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

/// Picks the data directory: the explicit one, else the platform data dir.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    explicit
        .or_else(|| dirs::data_dir().map(|d| d.join("levelbook")))
        .context("could not determine a data directory; pass --data-dir")
}

/// Reads `config.json` from `dir`, falling back to defaults when absent.
pub fn load_config(dir: &Path) -> Result<CatalogConfig> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(CatalogConfig::default());
    }
    let json = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    CatalogConfig::from_json(&json).with_context(|| format!("invalid config in {}", path.display()))
}

pub fn open_catalog(dir: &Path, config: &CatalogConfig) -> Result<FileCatalog> {
    let files = FileStore::open(dir)
        .with_context(|| format!("failed to open data directory {}", dir.display()))?;
    let store = KvLevelStore::with_key(files, config.storage_key.clone());
    Catalog::open(store).context("failed to load levels")
}

/// Renders a failure as the one-line notice printed before a non-zero exit.
#[must_use]
pub fn error_notice(err: &anyhow::Error) -> String {
    format!("{err:#}")
}

/// Resolves the environment and runs one command.
pub fn run(args: Args, console: &mut Console<'_>) -> Result<()> {
    let dir = resolve_data_dir(args.data_dir)?;
    let config = load_config(&dir)?;
    debug!("data directory {}", dir.display());
    let mut catalog = open_catalog(&dir, &config)?;
    execute(args.command, &mut catalog, &config, console)
}
