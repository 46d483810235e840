//! Memo-Shelf Frontend Entry Point
//!
//! Parses the command line, opens the shelf and prints the result of one
//! backend command.

mod cli;
mod output;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use dialoguer::Confirm;
use serde::Serialize;

use cli::{BackupCommands, CategoryCommands, Cli, ClipCommands, Commands};
use memo_shelf_lib::domain::Category;
use memo_shelf_lib::{commands, init_app, init_logging, AppConfig, AppState};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        if memo_shelf_lib::logging_enabled() {
            log::error!("{:#}", e);
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.data_dir.clone()).map_err(|e| anyhow!(e))?;
    if let Err(e) = init_logging(&config) {
        eprintln!("[{}] Logging disabled: {}", chrono::Local::now().format("%H:%M:%S%.3f"), e);
    }

    let state = init_app(config).await.map_err(|e| anyhow!(e)).context("Failed to open memo shelf")?;
    dispatch(&state, cli.command, cli.json).await
}

/// Print `value` as JSON, or through `render` for humans
fn emit<T: Serialize>(json: bool, value: &T, render: impl FnOnce(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", render(value));
    }
    Ok(())
}

/// Accept a category id or its (case-insensitive) name
async fn resolve_category(state: &AppState, key: &str) -> Result<String> {
    Ok(find_category(state, key).await?.id)
}

async fn find_category(state: &AppState, key: &str) -> Result<Category> {
    let categories = commands::list_categories(state).await.map_err(|e| anyhow!(e))?;
    if let Some(category) = categories.iter().find(|c| c.id == key) {
        return Ok(category.clone());
    }
    let named: Vec<_> = categories.iter().filter(|c| c.name.eq_ignore_ascii_case(key)).collect();
    match named.as_slice() {
        [one] => Ok((*one).clone()),
        [] => bail!("Unknown category: {}", key),
        _ => bail!("Category name {:?} is ambiguous; use its id", key),
    }
}

async fn resolve_optional_category(state: &AppState, key: Option<String>) -> Result<Option<String>> {
    match key {
        Some(key) => Ok(Some(resolve_category(state, &key).await?)),
        None => Ok(None),
    }
}

fn confirm(prompt: String) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

async fn dispatch(state: &AppState, command: Commands, json: bool) -> Result<()> {
    match command {
        Commands::List { category } => match resolve_optional_category(state, category).await? {
            Some(category_id) => {
                let memos = commands::list_memos(state, category_id).await.map_err(|e| anyhow!(e))?;
                emit(json, &memos, |m| output::memos(m))
            }
            None => {
                let shelf = commands::list_shelf(state).await.map_err(|e| anyhow!(e))?;
                emit(json, &shelf, |s| output::shelf(s))
            }
        },
        Commands::Add { text, category } => {
            let category_id = resolve_optional_category(state, category).await?;
            let memo = commands::add_memo(state, text, category_id).await.map_err(|e| anyhow!(e))?;
            emit(json, &memo, |m| format!("Added {} ({})", m.title, m.id))
        }
        Commands::Edit { id, text, category } => {
            let category_id = resolve_optional_category(state, category).await?;
            let memo = commands::edit_memo(state, id, text, category_id).await.map_err(|e| anyhow!(e))?;
            emit(json, &memo, |m| format!("Updated {}", m.title))
        }
        Commands::Delete { id } => {
            let memo = commands::delete_memo(state, id).await.map_err(|e| anyhow!(e))?;
            emit(json, &memo, |m| format!("Deleted {}", m.title))
        }
        Commands::Pin { id } => {
            let memo = commands::toggle_pin(state, id.clone()).await.map_err(|e| anyhow!(e))?;
            emit(json, &memo, |m| match m {
                Some(m) if m.pinned => format!("Pinned {}", m.title),
                Some(m) => format!("Unpinned {}", m.title),
                None => format!("No memo {}", id),
            })
        }
        Commands::Bookmark { id, position } => {
            let memo = commands::set_bookmark(state, id, position).await.map_err(|e| anyhow!(e))?;
            emit(json, &memo, |m| {
                if m.has_bookmark() {
                    format!("Bookmarked {} at {}", m.title, m.bookmark_position)
                } else {
                    format!("Cleared bookmark on {}", m.title)
                }
            })
        }
        Commands::Reorder { category, ids } => {
            let category_id = resolve_category(state, &category).await?;
            let placed = commands::reorder_memos(state, category_id.clone(), ids).await.map_err(|e| anyhow!(e))?;
            if json {
                return emit(json, &placed, |_| String::new());
            }
            let memos = commands::list_memos(state, category_id).await.map_err(|e| anyhow!(e))?;
            println!("Placed {} memos", placed);
            println!("{}", output::memos(&memos));
            Ok(())
        }
        Commands::Search { query } => {
            let memos = commands::search_memos(state, query).await.map_err(|e| anyhow!(e))?;
            emit(json, &memos, |m| output::memos(m))
        }
        Commands::Outline { id } => {
            let sections = commands::memo_outline(state, id).await.map_err(|e| anyhow!(e))?;
            emit(json, &sections, |s| output::outline(s))
        }
        Commands::Undo { id } => {
            let memo = commands::undo_edit(state, id).await.map_err(|e| anyhow!(e))?;
            emit(json, &memo, |m| match m {
                Some(m) => format!("Restored previous content of {}", m.title),
                None => "Nothing to undo".to_string(),
            })
        }
        Commands::Redo { id } => {
            let memo = commands::redo_edit(state, id).await.map_err(|e| anyhow!(e))?;
            emit(json, &memo, |m| match m {
                Some(m) => format!("Re-applied edit of {}", m.title),
                None => "Nothing to redo".to_string(),
            })
        }
        Commands::Category(cmd) => category(state, cmd, json).await,
        Commands::Clip(cmd) => clip(state, cmd, json).await,
        Commands::Backup(cmd) => backup(state, cmd, json).await,
    }
}

async fn category(state: &AppState, command: CategoryCommands, json: bool) -> Result<()> {
    match command {
        CategoryCommands::List => {
            let categories = commands::list_categories(state).await.map_err(|e| anyhow!(e))?;
            emit(json, &categories, |c| output::categories(c))
        }
        CategoryCommands::Add { name } => {
            let category = commands::add_category(state, name).await.map_err(|e| anyhow!(e))?;
            emit(json, &category, |c| format!("Added category {} ({})", c.name, c.id))
        }
        CategoryCommands::Rename { id, name } => {
            let id = resolve_category(state, &id).await?;
            let category = commands::rename_category(state, id, name).await.map_err(|e| anyhow!(e))?;
            emit(json, &category, |c| format!("Renamed to {}", c.name))
        }
        CategoryCommands::Delete { id, yes } => {
            let category = find_category(state, &id).await?;
            if !yes && !confirm(output::delete_category_prompt(&category))? {
                println!("Operation cancelled");
                return Ok(());
            }
            let deleted = commands::delete_category(state, category.id).await.map_err(|e| anyhow!(e))?;
            emit(json, &deleted, |d| {
                format!("Deleted category {} with {} memos", d.category.name, d.memos_removed)
            })
        }
        CategoryCommands::Up { id } => {
            let id = resolve_category(state, &id).await?;
            let moved = commands::move_category_up(state, id).await.map_err(|e| anyhow!(e))?;
            emit(json, &moved, |m| if *m { "Moved up".into() } else { "Already at the top".into() })
        }
        CategoryCommands::Down { id } => {
            let id = resolve_category(state, &id).await?;
            let moved = commands::move_category_down(state, id).await.map_err(|e| anyhow!(e))?;
            emit(json, &moved, |m| if *m { "Moved down".into() } else { "Already at the bottom".into() })
        }
    }
}

async fn clip(state: &AppState, command: ClipCommands, json: bool) -> Result<()> {
    match command {
        ClipCommands::List => {
            let buttons = commands::list_clipboard_buttons(state).await.map_err(|e| anyhow!(e))?;
            emit(json, &buttons, |b| output::clipboard_buttons(b))
        }
        ClipCommands::Add { title, content } => {
            let button = commands::add_clipboard_button(state, title, content).await.map_err(|e| anyhow!(e))?;
            emit(json, &button, |b| format!("Added button {} ({})", b.title, b.id))
        }
        ClipCommands::Update { id, title, content, color } => {
            let button = commands::update_clipboard_button(state, id, title, content, color)
                .await
                .map_err(|e| anyhow!(e))?;
            emit(json, &button, |b| format!("Updated button {}", b.title))
        }
        ClipCommands::Delete { id } => {
            let button = commands::delete_clipboard_button(state, id).await.map_err(|e| anyhow!(e))?;
            emit(json, &button, |b| format!("Deleted button {}", b.title))
        }
    }
}

async fn backup(state: &AppState, command: BackupCommands, json: bool) -> Result<()> {
    match command {
        BackupCommands::Export { file } => {
            let summary = commands::export_backup(state, file.clone()).await.map_err(|e| anyhow!(e))?;
            emit(json, &summary, |s| format!("Exported {} to {}", s, file.display()))
        }
        BackupCommands::Restore { file, yes } => {
            let summary = commands::preview_backup(file.clone()).await.map_err(|e| anyhow!(e))?;
            if !yes && !confirm(format!("Replace ALL current data with {}?", summary))? {
                println!("Operation cancelled");
                return Ok(());
            }
            let report = commands::restore_backup(state, file).await.map_err(|e| anyhow!(e))?;
            if json {
                return emit(json, &summary, |_| String::new());
            }
            println!("Restored {}", summary);
            if !report.is_empty() {
                println!("Normalized: {}", report);
            }
            Ok(())
        }
    }
}
