//! Command-line definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "memo-shelf", version, about = "Categorized memos with pinning and manual ordering")]
pub struct Cli {
    /// Directory holding the database, config and logs
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show memos, grouped by category
    List {
        /// Only this category (id or name)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Create a memo at the end of a category
    Add {
        text: String,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Replace a memo's content, optionally moving it
    Edit {
        id: String,
        text: String,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete an unpinned memo
    Delete { id: String },
    /// Pin or unpin a memo
    Pin { id: String },
    /// Save a scroll position; omit it to clear the bookmark
    Bookmark { id: String, position: Option<f64> },
    /// Put memos of a category in the given order
    Reorder {
        category: String,
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Case-insensitive search over titles and content
    Search { query: String },
    /// Heading outline of a memo
    Outline { id: String },
    /// Go back to the previous content of a memo
    Undo { id: String },
    /// Re-apply an undone edit
    Redo { id: String },
    /// Manage categories
    #[command(subcommand)]
    Category(CategoryCommands),
    /// Manage clipboard quick-paste buttons
    #[command(subcommand)]
    Clip(ClipCommands),
    /// Export or restore a JSON backup
    #[command(subcommand)]
    Backup(BackupCommands),
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    List,
    Add { name: String },
    Rename { id: String, name: String },
    /// Delete a category and all of its memos
    Delete {
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    Up { id: String },
    Down { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ClipCommands {
    List,
    Add { title: String, content: String },
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    Export { file: PathBuf },
    /// Replace all data with a backup
    Restore {
        file: PathBuf,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}
