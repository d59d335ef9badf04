//! Persistence for plants and journal entries.
//!
//! A record is one row in `plants` plus one row in the detail table for its
//! kind, written together in a transaction. Journal entries reference plants
//! and disappear with them.

use anyhow::{bail, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::models::{
    EssentialOilDetails, GardenPlantDetails, JournalEntry, Plant, PlantDetails, PlantKind,
    RawHerbDetails, SupplementDetails,
};

/// Inserts a new plant or updates an existing one, depending on whether it
/// already has an id. The kind is written on insert and never updated.
/// Returns the record id and fills it into `plant` on first save.
pub async fn save_plant(pool: &SqlitePool, plant: &mut Plant) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let id = match plant.id {
        Some(id) => {
            let result = sqlx::query(
                r#"
                UPDATE plants SET
                    name = ?,
                    scientific_name = ?,
                    family = ?,
                    organic = ?,
                    properties = ?,
                    contraindications = ?,
                    interactions = ?,
                    precautions = ?,
                    supplier = ?,
                    price = ?,
                    stock = ?,
                    storage = ?,
                    links = ?,
                    notes = ?
                WHERE id = ?
                "#,
            )
            .bind(&plant.name)
            .bind(&plant.scientific_name)
            .bind(&plant.family)
            .bind(i64::from(plant.organic))
            .bind(&plant.properties)
            .bind(&plant.contraindications)
            .bind(&plant.interactions)
            .bind(&plant.precautions)
            .bind(&plant.supplier)
            .bind(&plant.price)
            .bind(&plant.stock)
            .bind(&plant.storage)
            .bind(&plant.links)
            .bind(&plant.notes)
            .bind(id)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                bail!("plant not found: {}", id);
            }
            id
        }
        None => {
            let result = sqlx::query(
                r#"
                INSERT INTO plants (
                    kind, name, scientific_name, family, organic,
                    properties, contraindications, interactions, precautions,
                    supplier, price, stock, storage, links, notes
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(plant.kind().as_tag())
            .bind(&plant.name)
            .bind(&plant.scientific_name)
            .bind(&plant.family)
            .bind(i64::from(plant.organic))
            .bind(&plant.properties)
            .bind(&plant.contraindications)
            .bind(&plant.interactions)
            .bind(&plant.precautions)
            .bind(&plant.supplier)
            .bind(&plant.price)
            .bind(&plant.stock)
            .bind(&plant.storage)
            .bind(&plant.links)
            .bind(&plant.notes)
            .execute(&mut *tx)
            .await?;
            result.last_insert_rowid()
        }
    };

    match &plant.details {
        PlantDetails::RawHerb(d) => {
            sqlx::query(
                r#"
                INSERT INTO raw_herbs (
                    plant_id, part_used, origin, preparation, temperature,
                    infusion_time, dosage, packaging
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(plant_id) DO UPDATE SET
                    part_used = excluded.part_used,
                    origin = excluded.origin,
                    preparation = excluded.preparation,
                    temperature = excluded.temperature,
                    infusion_time = excluded.infusion_time,
                    dosage = excluded.dosage,
                    packaging = excluded.packaging
                "#,
            )
            .bind(id)
            .bind(&d.part_used)
            .bind(&d.origin)
            .bind(&d.preparation)
            .bind(&d.temperature)
            .bind(&d.infusion_time)
            .bind(&d.dosage)
            .bind(&d.packaging)
            .execute(&mut *tx)
            .await?;
        }
        PlantDetails::Supplement(d) => {
            sqlx::query(
                r#"
                INSERT INTO supplements (
                    plant_id, part_used, origin, product_ref, form, strength,
                    dosage, intake_time, course_length, packaging
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(plant_id) DO UPDATE SET
                    part_used = excluded.part_used,
                    origin = excluded.origin,
                    product_ref = excluded.product_ref,
                    form = excluded.form,
                    strength = excluded.strength,
                    dosage = excluded.dosage,
                    intake_time = excluded.intake_time,
                    course_length = excluded.course_length,
                    packaging = excluded.packaging
                "#,
            )
            .bind(id)
            .bind(&d.part_used)
            .bind(&d.origin)
            .bind(&d.product_ref)
            .bind(&d.form)
            .bind(&d.strength)
            .bind(&d.dosage)
            .bind(&d.intake_time)
            .bind(&d.course_length)
            .bind(&d.packaging)
            .execute(&mut *tx)
            .await?;
        }
        PlantDetails::EssentialOil(d) => {
            sqlx::query(
                r#"
                INSERT INTO essential_oils (
                    plant_id, distilled_organ, origin, extraction, chemotype,
                    composition, routes, route_precautions, expiry
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(plant_id) DO UPDATE SET
                    distilled_organ = excluded.distilled_organ,
                    origin = excluded.origin,
                    extraction = excluded.extraction,
                    chemotype = excluded.chemotype,
                    composition = excluded.composition,
                    routes = excluded.routes,
                    route_precautions = excluded.route_precautions,
                    expiry = excluded.expiry
                "#,
            )
            .bind(id)
            .bind(&d.distilled_organ)
            .bind(&d.origin)
            .bind(&d.extraction)
            .bind(&d.chemotype)
            .bind(&d.composition)
            .bind(&d.routes)
            .bind(&d.route_precautions)
            .bind(&d.expiry)
            .execute(&mut *tx)
            .await?;
        }
        PlantDetails::GardenPlant(d) => {
            sqlx::query(
                r#"
                INSERT INTO garden_plants (
                    plant_id, part_used, location, exposure, soil_type,
                    sowing_period, harvest_period, perennial, wintering, care
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(plant_id) DO UPDATE SET
                    part_used = excluded.part_used,
                    location = excluded.location,
                    exposure = excluded.exposure,
                    soil_type = excluded.soil_type,
                    sowing_period = excluded.sowing_period,
                    harvest_period = excluded.harvest_period,
                    perennial = excluded.perennial,
                    wintering = excluded.wintering,
                    care = excluded.care
                "#,
            )
            .bind(id)
            .bind(&d.part_used)
            .bind(&d.location)
            .bind(&d.exposure)
            .bind(&d.soil_type)
            .bind(&d.sowing_period)
            .bind(&d.harvest_period)
            .bind(i64::from(d.perennial))
            .bind(&d.wintering)
            .bind(&d.care)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    plant.id = Some(id);
    Ok(id)
}

pub async fn get_plant(pool: &SqlitePool, id: i64) -> Result<Option<Plant>> {
    let row = sqlx::query("SELECT * FROM plants WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    let row = match row {
        Some(row) => row,
        None => return Ok(None),
    };
    Ok(Some(plant_from_row(pool, &row).await?))
}

/// Lists plants ordered by name (case-insensitive), optionally filtered by
/// kind and by a substring match over name, scientific name, and properties.
pub async fn list_plants(
    pool: &SqlitePool,
    kind: Option<PlantKind>,
    search: Option<&str>,
) -> Result<Vec<Plant>> {
    let mut sql = String::from("SELECT * FROM plants");
    let mut clauses: Vec<&str> = Vec::new();
    if kind.is_some() {
        clauses.push("kind = ?");
    }
    if search.is_some() {
        clauses.push("(name LIKE ? OR scientific_name LIKE ? OR properties LIKE ?)");
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY name COLLATE NOCASE ASC, id ASC");

    let mut query = sqlx::query(&sql);
    if let Some(kind) = kind {
        query = query.bind(kind.as_tag());
    }
    if let Some(term) = search {
        let pattern = format!("%{}%", term);
        query = query
            .bind(pattern.clone())
            .bind(pattern.clone())
            .bind(pattern);
    }

    let rows = query.fetch_all(pool).await?;
    let mut plants = Vec::with_capacity(rows.len());
    for row in &rows {
        plants.push(plant_from_row(pool, row).await?);
    }
    Ok(plants)
}

/// Deletes a plant. Detail and journal rows cascade. Returns false when no
/// such plant exists.
pub async fn delete_plant(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM plants WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

async fn plant_from_row(pool: &SqlitePool, row: &SqliteRow) -> Result<Plant> {
    let id: i64 = row.get("id");
    let tag: String = row.get("kind");
    let kind = match PlantKind::from_tag(&tag) {
        Some(kind) => kind,
        None => bail!("plant {} has unknown kind tag '{}'", id, tag),
    };
    let details = load_details(pool, kind, id).await?;
    Ok(Plant {
        id: Some(id),
        name: row.get("name"),
        scientific_name: row.get("scientific_name"),
        family: row.get("family"),
        organic: row.get::<i64, _>("organic") != 0,
        properties: row.get("properties"),
        contraindications: row.get("contraindications"),
        interactions: row.get("interactions"),
        precautions: row.get("precautions"),
        supplier: row.get("supplier"),
        price: row.get("price"),
        stock: row.get("stock"),
        storage: row.get("storage"),
        links: row.get("links"),
        notes: row.get("notes"),
        details,
    })
}

// A missing detail row maps to empty details rather than an error, so one
// damaged record cannot take down a whole listing.
async fn load_details(pool: &SqlitePool, kind: PlantKind, plant_id: i64) -> Result<PlantDetails> {
    let details = match kind {
        PlantKind::RawHerb => {
            let row = sqlx::query("SELECT * FROM raw_herbs WHERE plant_id = ?")
                .bind(plant_id)
                .fetch_optional(pool)
                .await?;
            PlantDetails::RawHerb(match row {
                Some(row) => RawHerbDetails {
                    part_used: row.get("part_used"),
                    origin: row.get("origin"),
                    preparation: row.get("preparation"),
                    temperature: row.get("temperature"),
                    infusion_time: row.get("infusion_time"),
                    dosage: row.get("dosage"),
                    packaging: row.get("packaging"),
                },
                None => RawHerbDetails::default(),
            })
        }
        PlantKind::Supplement => {
            let row = sqlx::query("SELECT * FROM supplements WHERE plant_id = ?")
                .bind(plant_id)
                .fetch_optional(pool)
                .await?;
            PlantDetails::Supplement(match row {
                Some(row) => SupplementDetails {
                    part_used: row.get("part_used"),
                    origin: row.get("origin"),
                    product_ref: row.get("product_ref"),
                    form: row.get("form"),
                    strength: row.get("strength"),
                    dosage: row.get("dosage"),
                    intake_time: row.get("intake_time"),
                    course_length: row.get("course_length"),
                    packaging: row.get("packaging"),
                },
                None => SupplementDetails::default(),
            })
        }
        PlantKind::EssentialOil => {
            let row = sqlx::query("SELECT * FROM essential_oils WHERE plant_id = ?")
                .bind(plant_id)
                .fetch_optional(pool)
                .await?;
            PlantDetails::EssentialOil(match row {
                Some(row) => EssentialOilDetails {
                    distilled_organ: row.get("distilled_organ"),
                    origin: row.get("origin"),
                    extraction: row.get("extraction"),
                    chemotype: row.get("chemotype"),
                    composition: row.get("composition"),
                    routes: row.get("routes"),
                    route_precautions: row.get("route_precautions"),
                    expiry: row.get("expiry"),
                },
                None => EssentialOilDetails::default(),
            })
        }
        PlantKind::GardenPlant => {
            let row = sqlx::query("SELECT * FROM garden_plants WHERE plant_id = ?")
                .bind(plant_id)
                .fetch_optional(pool)
                .await?;
            PlantDetails::GardenPlant(match row {
                Some(row) => GardenPlantDetails {
                    part_used: row.get("part_used"),
                    location: row.get("location"),
                    exposure: row.get("exposure"),
                    soil_type: row.get("soil_type"),
                    sowing_period: row.get("sowing_period"),
                    harvest_period: row.get("harvest_period"),
                    perennial: row.get::<i64, _>("perennial") != 0,
                    wintering: row.get("wintering"),
                    care: row.get("care"),
                },
                None => GardenPlantDetails::default(),
            })
        }
    };
    Ok(details)
}

/// Appends a journal entry for an existing plant, filling in its id.
pub async fn add_journal_entry(pool: &SqlitePool, entry: &mut JournalEntry) -> Result<i64> {
    let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM plants WHERE id = ?")
        .bind(entry.plant_id)
        .fetch_optional(pool)
        .await?;
    if exists.is_none() {
        bail!("plant not found: {}", entry.plant_id);
    }

    let result = sqlx::query("INSERT INTO journal (plant_id, date, action, notes) VALUES (?, ?, ?, ?)")
        .bind(entry.plant_id)
        .bind(&entry.date)
        .bind(&entry.action)
        .bind(&entry.notes)
        .execute(pool)
        .await?;
    let id = result.last_insert_rowid();
    entry.id = Some(id);
    Ok(id)
}

pub async fn journal_for_plant(pool: &SqlitePool, plant_id: i64) -> Result<Vec<JournalEntry>> {
    let rows = sqlx::query(
        "SELECT id, plant_id, date, action, notes FROM journal WHERE plant_id = ? ORDER BY date DESC, id DESC",
    )
    .bind(plant_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(journal_entry_from_row).collect())
}

/// A journal entry joined with the plant it belongs to, for the global view.
#[derive(Debug, Clone)]
pub struct JournalView {
    pub entry: JournalEntry,
    pub plant_name: String,
}

pub async fn journal_overview(pool: &SqlitePool) -> Result<Vec<JournalView>> {
    let rows = sqlx::query(
        r#"
        SELECT j.id, j.plant_id, j.date, j.action, j.notes, p.name
        FROM journal j
        JOIN plants p ON p.id = j.plant_id
        ORDER BY j.date DESC, j.id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows
        .iter()
        .map(|row| JournalView {
            entry: journal_entry_from_row(row),
            plant_name: row.get("name"),
        })
        .collect())
}

pub async fn delete_journal_entry(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM journal WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

fn journal_entry_from_row(row: &SqliteRow) -> JournalEntry {
    JournalEntry {
        id: Some(row.get("id")),
        plant_id: row.get("plant_id"),
        date: row.get("date"),
        action: row.get("action"),
        notes: row.get("notes"),
    }
}

/// Plant counts per kind tag, for `stats`.
pub async fn kind_counts(pool: &SqlitePool) -> Result<Vec<(String, i64)>> {
    let rows = sqlx::query("SELECT kind, COUNT(*) AS n FROM plants GROUP BY kind")
        .fetch_all(pool)
        .await?;
    Ok(rows
        .iter()
        .map(|row| (row.get("kind"), row.get("n")))
        .collect())
}

pub async fn journal_count(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM journal")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
