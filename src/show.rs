//! Full record display for a single plant.
//!
//! Prints the record the way a fiche reads: shared fields first, then the
//! kind-specific block, then the care journal. Used by `herbier show`.

use anyhow::Result;
use serde::Serialize;

use crate::config::Config;
use crate::db;
use crate::labels;
use crate::models::{JournalEntry, Plant};
use crate::store;

/// Combined record + journal, the shape `show --json` emits.
#[derive(Debug, Serialize)]
pub struct PlantResponse {
    #[serde(flatten)]
    pub plant: Plant,
    pub journal: Vec<JournalEntry>,
}

pub async fn run_show(config: &Config, id: i64, json: bool) -> Result<()> {
    let pool = db::connect(config).await?;
    let plant = match store::get_plant(&pool, id).await? {
        Some(plant) => plant,
        None => {
            pool.close().await;
            eprintln!("Error: plant not found: {}", id);
            std::process::exit(1);
        }
    };
    let journal = store::journal_for_plant(&pool, id).await?;
    pool.close().await;

    if json {
        let response = PlantResponse { plant, journal };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("--- {} ---", plant.name);
    println!("{:<26} {}", "id:", id);
    println!("{:<26} {}", "kind:", plant.kind().label());

    for attr in labels::COMMON_ATTRIBUTES
        .iter()
        .chain(labels::kind_attributes(plant.kind()))
    {
        if *attr == "name" {
            continue;
        }
        let value = match plant.field(attr) {
            Some(value) => value,
            None => continue,
        };
        if value.is_empty() {
            continue;
        }
        let label = match labels::canonical_label(attr) {
            Some(label) => label,
            None => continue,
        };
        let mut lines = value.lines();
        if let Some(first) = lines.next() {
            println!("{:<26} {}", format!("{}:", label), first);
            for line in lines {
                println!("{:<26} {}", "", line);
            }
        }
    }

    println!();
    println!("--- Journal ({}) ---", journal.len());
    for entry in &journal {
        println!(
            "[{}] {} (entry {})",
            entry.date,
            entry.action,
            entry.id.unwrap_or(0)
        );
        if !entry.notes.is_empty() {
            println!("    {}", entry.notes);
        }
    }

    Ok(())
}
