//! The care journal: dated actions attached to plants.
//!
//! Entries record what was done and when — a watering, a repotting, the
//! start of a cure. They live and die with their plant.

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::config::Config;
use crate::db;
use crate::models::JournalEntry;
use crate::store;

pub async fn run_add(
    config: &Config,
    plant_id: i64,
    action: &str,
    notes: Option<String>,
    date: Option<String>,
) -> Result<()> {
    // Normalize through chrono so stored dates sort lexicographically.
    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", raw))?
            .to_string(),
        None => chrono::Utc::now().date_naive().to_string(),
    };

    let mut entry = JournalEntry {
        id: None,
        plant_id,
        date,
        action: action.to_string(),
        notes: notes.unwrap_or_default(),
    };

    let pool = db::connect(config).await?;
    let id = store::add_journal_entry(&pool, &mut entry).await?;
    pool.close().await;

    println!(
        "journal entry {} added for plant {} on {}",
        id, plant_id, entry.date
    );
    Ok(())
}

pub async fn run_list(config: &Config, plant_id: Option<i64>) -> Result<()> {
    let pool = db::connect(config).await?;

    match plant_id {
        Some(plant_id) => {
            let plant = match store::get_plant(&pool, plant_id).await? {
                Some(plant) => plant,
                None => {
                    pool.close().await;
                    eprintln!("Error: plant not found: {}", plant_id);
                    std::process::exit(1);
                }
            };
            let entries = store::journal_for_plant(&pool, plant_id).await?;
            pool.close().await;

            if entries.is_empty() {
                println!("No journal entries for {}.", plant.name);
                return Ok(());
            }
            println!("Journal for {} [id {}]", plant.name, plant_id);
            for entry in &entries {
                println!(
                    "  {:>4}  {:<12} {}",
                    entry.id.unwrap_or(0),
                    entry.date,
                    entry.action
                );
                if !entry.notes.is_empty() {
                    println!("        {}", entry.notes);
                }
            }
        }
        None => {
            let views = store::journal_overview(&pool).await?;
            pool.close().await;

            if views.is_empty() {
                println!("No journal entries.");
                return Ok(());
            }
            println!("{:>4}  {:<12} {:<24} {}", "ID", "DATE", "PLANT", "ACTION");
            for view in &views {
                println!(
                    "{:>4}  {:<12} {:<24} {}",
                    view.entry.id.unwrap_or(0),
                    view.entry.date,
                    view.plant_name,
                    view.entry.action
                );
            }
        }
    }

    Ok(())
}

pub async fn run_delete(config: &Config, entry_id: i64) -> Result<()> {
    let pool = db::connect(config).await?;
    let deleted = store::delete_journal_entry(&pool, entry_id).await?;
    pool.close().await;

    if !deleted {
        eprintln!("Error: journal entry not found: {}", entry_id);
        std::process::exit(1);
    }
    println!("deleted journal entry {}", entry_id);
    Ok(())
}
