//! Catalog statistics overview.
//!
//! A quick summary of what the herbarium holds: plant counts per kind,
//! journal volume, and database size. Used by `herbier stats`.

use anyhow::Result;

use crate::config::Config;
use crate::db;
use crate::models::PlantKind;
use crate::store;

pub async fn run_stats(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    let counts = store::kind_counts(&pool).await?;
    let journal_total = store::journal_count(&pool).await?;
    pool.close().await;

    let db_size = std::fs::metadata(&config.db.path)
        .map(|m| m.len())
        .unwrap_or(0);
    let total: i64 = counts.iter().map(|(_, n)| n).sum();

    println!("Herbier — Catalog Stats");
    println!("=======================");
    println!();
    println!("  Database:  {}", config.db.path.display());
    println!("  Size:      {}", format_bytes(db_size));
    println!();
    println!("  Plants:    {}", total);
    for kind in PlantKind::ALL {
        let n = counts
            .iter()
            .find(|(tag, _)| tag.as_str() == kind.as_tag())
            .map(|(_, n)| *n)
            .unwrap_or(0);
        println!("    {:<18} {}", kind.label(), n);
    }
    println!();
    println!("  Journal entries: {}", journal_total);
    println!();

    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
