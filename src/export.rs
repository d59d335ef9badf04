//! Fiche export: render a catalog record back into fiche text.
//!
//! The output uses the canonical label for every attribute, so a fiche
//! written here re-extracts to an identical record. Handy for regenerating a
//! clean fiche after editing a plant in the database.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::db;
use crate::labels;
use crate::models::Plant;
use crate::store;

/// Renders a plant as fiche text. The `Type:` declaration comes first, then
/// every non-empty field under its canonical label, one per line; multi-line
/// values continue on the following lines. Boolean fields always appear.
pub fn fiche_text(plant: &Plant) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("Type: {}", plant.kind().label()));
    for attr in labels::COMMON_ATTRIBUTES
        .iter()
        .chain(labels::kind_attributes(plant.kind()))
    {
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
        lines.push(format!("{}: {}", label, value));
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Writes a plant's fiche to a file, or to stdout when no path is given.
pub async fn run_export(config: &Config, id: i64, output: Option<&Path>) -> Result<()> {
    let pool = db::connect(config).await?;
    let plant = match store::get_plant(&pool, id).await? {
        Some(plant) => plant,
        None => {
            pool.close().await;
            eprintln!("Error: plant not found: {}", id);
            std::process::exit(1);
        }
    };
    pool.close().await;

    let text = fiche_text(&plant);
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, &text)?;
            eprintln!("Exported {} to {}", plant.name, path.display());
        }
        None => {
            print!("{}", text);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract;

    fn plant_from(lines: &[&str]) -> Plant {
        let paragraphs: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        extract::from_paragraphs(&paragraphs).unwrap().plant
    }

    #[test]
    fn type_declaration_comes_first() {
        let plant = plant_from(&["Type: Huile essentielle", "Nom commun: Lavande vraie"]);
        let text = fiche_text(&plant);
        let first = text.lines().next().unwrap();
        assert_eq!(first, "Type: Huile essentielle");
    }

    #[test]
    fn empty_fields_are_omitted_but_booleans_stay() {
        let plant = plant_from(&["Type: tisane", "Nom commun: Ortie"]);
        let text = fiche_text(&plant);
        assert!(text.contains("Nom commun: Ortie"));
        assert!(text.contains("Biologique: Non"));
        assert!(!text.contains("Prix:"));
        assert!(!text.contains("Notes:"));
    }

    #[test]
    fn multi_line_values_span_their_own_lines() {
        let plant = plant_from(&[
            "Type: tisane",
            "Nom commun: Ortie",
            "Propriétés: Diurétique",
            "et reminéralisant",
        ]);
        let text = fiche_text(&plant);
        assert!(text.contains("Propriétés: Diurétique\net reminéralisant\n"));
    }

    #[test]
    fn exported_fiches_re_extract_to_the_same_record() {
        let fiches: [&[&str]; 4] = [
            &[
                "Type: Plante brute",
                "Nom commun: Ortie",
                "Nom scientifique: Urtica dioica",
                "Famille botanique: Urticacées",
                "Biologique: Oui",
                "Propriétés: Diurétique",
                "et reminéralisant",
                "Partie utilisée: Feuilles",
                "Température: 90°C",
                "Temps d'infusion: 10 min",
                "Posologie: 3 tasses par jour",
                // A type-like continuation line must survive the trip.
                "Notes: en synergie avec",
                "Type: HE",
            ],
            &[
                "Type: Complément",
                "Nom commun: Ginkgo",
                "Forme: Gélules",
                "Dosage: 500 mg",
                "Posologie: 2 gélules par jour",
                "Durée de cure: 3 mois",
            ],
            &[
                "Type: Huile essentielle",
                "Nom commun: Lavande vraie",
                "Organe distillé: Sommités fleuries",
                "Chémotype: Linalol",
                "Voies d'utilisation: Cutanée, olfactive",
                "Précautions par voie: Diluer avant application",
            ],
            &[
                "Type: Jardin",
                "Nom commun: Basilic",
                "Exposition: Plein soleil",
                "Vivace: Non",
                "Période de semis: Mars à mai",
                "Notes: semis abrité",
                "",
                "repiquer après les gelées",
            ],
        ];
        for fiche in fiches {
            let original = plant_from(fiche);
            let text = fiche_text(&original);
            let paragraphs: Vec<String> = text.lines().map(str::to_string).collect();
            let round = extract::from_paragraphs(&paragraphs).unwrap();
            assert_eq!(round.plant, original);
            assert!(round.warnings.is_empty());
        }
    }
}
