//! Field updates and record deletion.

use anyhow::{bail, Result};

use crate::config::Config;
use crate::db;
use crate::labels;
use crate::models::PlantKind;
use crate::store;

/// Sets one field on an existing plant. `field` may be a canonical attribute
/// name (`price`) or a fiche label (`prix`); both go through the same
/// assignment table extraction uses, so the kind's field set is enforced.
pub async fn run_set(config: &Config, id: i64, field: &str, value: &str) -> Result<()> {
    let pool = db::connect(config).await?;
    let mut plant = match store::get_plant(&pool, id).await? {
        Some(plant) => plant,
        None => {
            pool.close().await;
            eprintln!("Error: plant not found: {}", id);
            std::process::exit(1);
        }
    };

    let applied = plant.set_field(field, value)
        || match labels::resolve_attribute(plant.kind(), field) {
            Some(attr) => plant.set_field(attr, value),
            None => false,
        };
    if !applied {
        pool.close().await;
        bail!(
            "no field '{}' on kind '{}'. Fields: {}",
            field,
            plant.kind().as_tag(),
            field_list(plant.kind())
        );
    }
    if plant.name.trim().is_empty() {
        pool.close().await;
        bail!("name must not be empty");
    }

    store::save_plant(&pool, &mut plant).await?;
    pool.close().await;

    println!("updated {} [id {}]: {}", plant.name, id, field);
    Ok(())
}

pub async fn run_delete(config: &Config, id: i64) -> Result<()> {
    let pool = db::connect(config).await?;
    let deleted = store::delete_plant(&pool, id).await?;
    pool.close().await;

    if !deleted {
        eprintln!("Error: plant not found: {}", id);
        std::process::exit(1);
    }
    println!("deleted plant {}", id);
    Ok(())
}

fn field_list(kind: PlantKind) -> String {
    labels::COMMON_ATTRIBUTES
        .iter()
        .chain(labels::kind_attributes(kind))
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}
