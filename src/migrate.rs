use anyhow::Result;

use crate::config::Config;
use crate::db;

pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    // Shared fields live on plants; each kind gets a detail table keyed by
    // plant_id so a record is one plants row plus exactly one detail row.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS plants (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            kind TEXT NOT NULL,
            name TEXT NOT NULL,
            scientific_name TEXT NOT NULL DEFAULT '',
            family TEXT NOT NULL DEFAULT '',
            organic INTEGER NOT NULL DEFAULT 0,
            properties TEXT NOT NULL DEFAULT '',
            contraindications TEXT NOT NULL DEFAULT '',
            interactions TEXT NOT NULL DEFAULT '',
            precautions TEXT NOT NULL DEFAULT '',
            supplier TEXT NOT NULL DEFAULT '',
            price TEXT NOT NULL DEFAULT '',
            stock TEXT NOT NULL DEFAULT '',
            storage TEXT NOT NULL DEFAULT '',
            links TEXT NOT NULL DEFAULT '',
            notes TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS raw_herbs (
            plant_id INTEGER PRIMARY KEY,
            part_used TEXT NOT NULL DEFAULT '',
            origin TEXT NOT NULL DEFAULT '',
            preparation TEXT NOT NULL DEFAULT '',
            temperature TEXT NOT NULL DEFAULT '',
            infusion_time TEXT NOT NULL DEFAULT '',
            dosage TEXT NOT NULL DEFAULT '',
            packaging TEXT NOT NULL DEFAULT '',
            FOREIGN KEY (plant_id) REFERENCES plants(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS supplements (
            plant_id INTEGER PRIMARY KEY,
            part_used TEXT NOT NULL DEFAULT '',
            origin TEXT NOT NULL DEFAULT '',
            product_ref TEXT NOT NULL DEFAULT '',
            form TEXT NOT NULL DEFAULT '',
            strength TEXT NOT NULL DEFAULT '',
            dosage TEXT NOT NULL DEFAULT '',
            intake_time TEXT NOT NULL DEFAULT '',
            course_length TEXT NOT NULL DEFAULT '',
            packaging TEXT NOT NULL DEFAULT '',
            FOREIGN KEY (plant_id) REFERENCES plants(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS essential_oils (
            plant_id INTEGER PRIMARY KEY,
            distilled_organ TEXT NOT NULL DEFAULT '',
            origin TEXT NOT NULL DEFAULT '',
            extraction TEXT NOT NULL DEFAULT '',
            chemotype TEXT NOT NULL DEFAULT '',
            composition TEXT NOT NULL DEFAULT '',
            routes TEXT NOT NULL DEFAULT '',
            route_precautions TEXT NOT NULL DEFAULT '',
            expiry TEXT NOT NULL DEFAULT '',
            FOREIGN KEY (plant_id) REFERENCES plants(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS garden_plants (
            plant_id INTEGER PRIMARY KEY,
            part_used TEXT NOT NULL DEFAULT '',
            location TEXT NOT NULL DEFAULT '',
            exposure TEXT NOT NULL DEFAULT '',
            soil_type TEXT NOT NULL DEFAULT '',
            sowing_period TEXT NOT NULL DEFAULT '',
            harvest_period TEXT NOT NULL DEFAULT '',
            perennial INTEGER NOT NULL DEFAULT 0,
            wintering TEXT NOT NULL DEFAULT '',
            care TEXT NOT NULL DEFAULT '',
            FOREIGN KEY (plant_id) REFERENCES plants(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS journal (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            plant_id INTEGER NOT NULL,
            date TEXT NOT NULL,
            action TEXT NOT NULL,
            notes TEXT NOT NULL DEFAULT '',
            FOREIGN KEY (plant_id) REFERENCES plants(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(&pool)
    .await?;

    // Create indexes
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_plants_kind ON plants(kind)")
        .execute(&pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_plants_name ON plants(name COLLATE NOCASE)")
        .execute(&pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_journal_plant_date ON journal(plant_id, date DESC)")
        .execute(&pool)
        .await?;

    pool.close().await;
    Ok(())
}
