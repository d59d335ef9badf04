//! # Herbier CLI (`herbier`)
//!
//! The `herbier` binary manages a personal catalog of medicinal plants. It
//! imports fiche documents from a staging directory, and provides browsing,
//! editing, journaling, and export over the SQLite catalog.
//!
//! ## Usage
//!
//! ```bash
//! herbier --config ./herbier.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `herbier init` | Create the SQLite database and run schema migrations |
//! | `herbier import` | Extract and save every fiche waiting in staging |
//! | `herbier add <file>` | Import a single fiche without moving it |
//! | `herbier list` | List plants, filtered by kind or search text |
//! | `herbier show <id>` | Print one full record with its journal |
//! | `herbier set <id> <field> <value>` | Update one field |
//! | `herbier delete <id>` | Remove a record and its journal |
//! | `herbier export <id>` | Write a record back out as fiche text |
//! | `herbier journal add/list/delete` | Manage care journal entries |
//! | `herbier stats` | Catalog summary |
//!
//! ## Examples
//!
//! ```bash
//! # Initialize the database
//! herbier init
//!
//! # See what a batch would do, then run it
//! herbier import --dry-run
//! herbier import
//!
//! # Browse and inspect
//! herbier list --kind raw_herb --search ortie
//! herbier show 3
//!
//! # Log care actions
//! herbier journal add 3 "début cure" --notes "3 tasses par jour"
//! herbier journal list 3
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use herbier::{config, export, import, journal, list, migrate, show, stats, update};

/// Herbier CLI — a local-first catalog manager for medicinal plants.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file with the database path and import directories.
#[derive(Parser)]
#[command(
    name = "herbier",
    about = "Herbier — a local-first catalog manager for medicinal plants",
    version,
    long_about = "Herbier keeps a personal herbarium in SQLite: raw herbs, supplements, \
    essential oils, and garden plants, each with its own field set. Records are imported \
    from fiche documents (.docx or .txt) dropped into a staging directory, then browsed, \
    edited, and journaled from the command line."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./herbier.toml`. The database path and import
    /// directories are read from this file.
    #[arg(long, global = true, default_value = "./herbier.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and all required tables (plants, the
    /// per-kind detail tables, journal). This command is idempotent —
    /// running it multiple times is safe.
    Init,

    /// Import every fiche waiting in the staging directory.
    ///
    /// Each matching document is extracted and saved, then moved to the
    /// archive directory. A fiche that fails extraction stays in staging and
    /// is reported without stopping the batch.
    Import {
        /// Scan this directory instead of the configured staging directory.
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Show what would be imported without writing or moving anything.
        #[arg(long)]
        dry_run: bool,

        /// Leave imported fiches in place instead of archiving them.
        #[arg(long)]
        keep: bool,
    },

    /// Import a single fiche document. The file is not moved.
    Add {
        /// Path to a .docx or .txt fiche.
        file: PathBuf,
    },

    /// List plants in the catalog, alphabetically by name.
    List {
        /// Only show one kind: `raw_herb`, `supplement`, `essential_oil`,
        /// or `garden_plant` (French spellings like `tisane` work too).
        #[arg(long)]
        kind: Option<String>,

        /// Only show plants whose name, scientific name, or properties
        /// contain this text.
        #[arg(long)]
        search: Option<String>,

        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print one full record, including its journal.
    Show {
        /// Plant id.
        id: i64,

        /// Emit JSON instead of the fiche-style layout.
        #[arg(long)]
        json: bool,
    },

    /// Update one field on a record.
    ///
    /// The field may be a canonical name (`price`) or a fiche label
    /// (`prix`). Only fields that exist for the record's kind are accepted;
    /// the kind itself cannot be changed.
    Set {
        /// Plant id.
        id: i64,
        /// Field to update.
        field: String,
        /// New value.
        value: String,
    },

    /// Delete a record. Its detail row and journal entries go with it.
    Delete {
        /// Plant id.
        id: i64,
    },

    /// Write a record back out as fiche text.
    Export {
        /// Plant id.
        id: i64,

        /// Output file. Writes to stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Manage the care journal.
    Journal {
        #[command(subcommand)]
        action: JournalAction,
    },

    /// Catalog summary: counts per kind, journal volume, database size.
    Stats,
}

/// Care journal subcommands.
#[derive(Subcommand)]
enum JournalAction {
    /// Add a journal entry for a plant.
    Add {
        /// Plant id.
        plant_id: i64,
        /// What was done (e.g. "arrosage", "début cure").
        action: String,
        /// Free-form notes.
        #[arg(long)]
        notes: Option<String>,
        /// Entry date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<String>,
    },

    /// List journal entries, newest first.
    List {
        /// Only this plant's entries. Omit for the whole journal.
        plant_id: Option<i64>,
    },

    /// Delete a single journal entry.
    Delete {
        /// Journal entry id.
        entry_id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Import { dir, dry_run, keep } => {
            import::run_import(&cfg, dir, dry_run, keep).await?;
        }
        Commands::Add { file } => {
            import::run_add(&cfg, &file).await?;
        }
        Commands::List { kind, search, json } => {
            list::run_list(&cfg, kind, search, json).await?;
        }
        Commands::Show { id, json } => {
            show::run_show(&cfg, id, json).await?;
        }
        Commands::Set { id, field, value } => {
            update::run_set(&cfg, id, &field, &value).await?;
        }
        Commands::Delete { id } => {
            update::run_delete(&cfg, id).await?;
        }
        Commands::Export { id, out } => {
            export::run_export(&cfg, id, out.as_deref()).await?;
        }
        Commands::Journal { action } => match action {
            JournalAction::Add {
                plant_id,
                action,
                notes,
                date,
            } => {
                journal::run_add(&cfg, plant_id, &action, notes, date).await?;
            }
            JournalAction::List { plant_id } => {
                journal::run_list(&cfg, plant_id).await?;
            }
            JournalAction::Delete { entry_id } => {
                journal::run_delete(&cfg, entry_id).await?;
            }
        },
        Commands::Stats => {
            stats::run_stats(&cfg).await?;
        }
    }

    Ok(())
}
