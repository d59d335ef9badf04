//! Catalog listing with kind and text filters.

use anyhow::{bail, Result};

use crate::config::Config;
use crate::db;
use crate::labels;
use crate::models::PlantKind;
use crate::store;

/// Accepts either a kind tag (`raw_herb`) or one of the French spellings the
/// fiche dictionaries know (`tisane`, `HE`, ...).
pub fn parse_kind(value: &str) -> Result<PlantKind> {
    match PlantKind::from_tag(value).or_else(|| labels::resolve_kind(value)) {
        Some(kind) => Ok(kind),
        None => bail!(
            "Unknown kind: '{}'. Use raw_herb, supplement, essential_oil, or garden_plant.",
            value
        ),
    }
}

pub async fn run_list(
    config: &Config,
    kind: Option<String>,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    let kind = match kind {
        Some(value) => Some(parse_kind(&value)?),
        None => None,
    };

    let pool = db::connect(config).await?;
    let plants = store::list_plants(&pool, kind, search.as_deref()).await?;
    pool.close().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&plants)?);
        return Ok(());
    }

    if plants.is_empty() {
        println!("No plants found.");
        return Ok(());
    }

    println!(
        "{:>4}  {:<14} {:<24} {}",
        "ID", "KIND", "NAME", "SCIENTIFIC NAME"
    );
    for plant in &plants {
        println!(
            "{:>4}  {:<14} {:<24} {}",
            plant.id.unwrap_or(0),
            plant.kind().as_tag(),
            plant.name,
            plant.scientific_name
        );
    }
    println!();
    println!(
        "{} plant{}",
        plants.len(),
        if plants.len() == 1 { "" } else { "s" }
    );

    Ok(())
}
