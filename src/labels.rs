//! Label dictionaries mapping the French labels found in fiche documents to
//! canonical attribute names.
//!
//! Fiches are typed by hand over the years, so every label is matched in a
//! normalized form and listed with both its accented and unaccented spelling.
//! Lookups go through the shared dictionary first, then the kind-specific one;
//! attribute names are the `snake_case` identifiers used by [`crate::models`].

use crate::models::PlantKind;

/// Shared attributes, in the order fiche export writes them.
pub const COMMON_ATTRIBUTES: &[&str] = &[
    "name",
    "scientific_name",
    "family",
    "organic",
    "properties",
    "contraindications",
    "interactions",
    "precautions",
    "supplier",
    "price",
    "stock",
    "storage",
    "links",
    "notes",
];

const RAW_HERB_ATTRIBUTES: &[&str] = &[
    "part_used",
    "origin",
    "preparation",
    "temperature",
    "infusion_time",
    "dosage",
    "packaging",
];

const SUPPLEMENT_ATTRIBUTES: &[&str] = &[
    "part_used",
    "origin",
    "product_ref",
    "form",
    "strength",
    "dosage",
    "intake_time",
    "course_length",
    "packaging",
];

const ESSENTIAL_OIL_ATTRIBUTES: &[&str] = &[
    "distilled_organ",
    "origin",
    "extraction",
    "chemotype",
    "composition",
    "routes",
    "route_precautions",
    "expiry",
];

const GARDEN_PLANT_ATTRIBUTES: &[&str] = &[
    "part_used",
    "location",
    "exposure",
    "soil_type",
    "sowing_period",
    "harvest_period",
    "perennial",
    "wintering",
    "care",
];

/// Attributes specific to a kind, in fiche export order.
pub fn kind_attributes(kind: PlantKind) -> &'static [&'static str] {
    match kind {
        PlantKind::RawHerb => RAW_HERB_ATTRIBUTES,
        PlantKind::Supplement => SUPPLEMENT_ATTRIBUTES,
        PlantKind::EssentialOil => ESSENTIAL_OIL_ATTRIBUTES,
        PlantKind::GardenPlant => GARDEN_PLANT_ATTRIBUTES,
    }
}

/// Normalizes a raw label for dictionary lookup: trimmed, lowercased, with
/// any trailing colon (and space before it) removed.
pub fn normalize_label(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    lowered.trim_end_matches(':').trim_end().to_string()
}

/// Resolves a raw label against the dictionary active for `kind`. The shared
/// dictionary wins over the kind-specific one, so a label like "précautions"
/// means the same thing on every fiche.
pub fn resolve_attribute(kind: PlantKind, label: &str) -> Option<&'static str> {
    let normalized = normalize_label(label);
    common_attribute(&normalized).or_else(|| kind_attribute(kind, &normalized))
}

fn common_attribute(label: &str) -> Option<&'static str> {
    Some(match label {
        "nom commun" | "nom" => "name",
        "nom scientifique" | "latin" => "scientific_name",
        "famille botanique" | "famille" => "family",
        "biologique" | "bio" => "organic",
        "propriétés" | "proprietes" | "indications" | "bénéfices" | "benefices" => "properties",
        "contre-indications" | "contre indications" => "contraindications",
        "interactions médicamenteuses" | "interactions medicamenteuses" | "interactions" => {
            "interactions"
        }
        "précautions" | "precautions" => "precautions",
        "distributeur" | "fournisseur" => "supplier",
        "prix" => "price",
        "quantité en stock" | "quantite en stock" | "quantité" | "quantite" | "stock" => "stock",
        "lieu de stockage" | "stockage" => "storage",
        "liens" | "liens ressources" | "ressources" => "links",
        "notes" => "notes",
        _ => return None,
    })
}

fn kind_attribute(kind: PlantKind, label: &str) -> Option<&'static str> {
    match kind {
        PlantKind::RawHerb => raw_herb_attribute(label),
        PlantKind::Supplement => supplement_attribute(label),
        PlantKind::EssentialOil => essential_oil_attribute(label),
        PlantKind::GardenPlant => garden_plant_attribute(label),
    }
}

fn raw_herb_attribute(label: &str) -> Option<&'static str> {
    Some(match label {
        "partie utilisée" | "partie utilisee" | "partie" => "part_used",
        "origine" | "provenance" => "origin",
        "mode de préparation" | "mode de preparation" | "préparation" | "preparation" => {
            "preparation"
        }
        "température" | "temperature" => "temperature",
        "temps d'infusion" | "infusion" => "infusion_time",
        "posologie" => "dosage",
        "conditionnement" => "packaging",
        _ => return None,
    })
}

fn supplement_attribute(label: &str) -> Option<&'static str> {
    Some(match label {
        "partie utilisée" | "partie utilisee" | "partie" => "part_used",
        "origine" => "origin",
        "référence produit" | "reference produit" | "référence" | "reference" => "product_ref",
        "forme" => "form",
        // On supplement fiches "Dosage" is the strength printed on the box;
        // the intake instructions are under "Posologie".
        "dosage" => "strength",
        "posologie" => "dosage",
        "moment de prise" | "moment" => "intake_time",
        "durée de cure" | "duree de cure" | "durée" | "duree" => "course_length",
        "conditionnement" => "packaging",
        _ => return None,
    })
}

fn essential_oil_attribute(label: &str) -> Option<&'static str> {
    Some(match label {
        "organe distillé" | "organe distille" | "organe" => "distilled_organ",
        "origine" => "origin",
        "mode d'obtention" | "obtention" => "extraction",
        "chémotype" | "chemotype" => "chemotype",
        "composition" => "composition",
        "voies d'utilisation" | "voies" => "routes",
        "précautions par voie" | "precautions par voie" | "précautions voies"
        | "precautions voies" => "route_precautions",
        "date limite" | "dlc" => "expiry",
        _ => return None,
    })
}

fn garden_plant_attribute(label: &str) -> Option<&'static str> {
    Some(match label {
        "partie utilisée" | "partie utilisee" | "partie" => "part_used",
        "emplacement" => "location",
        "exposition" => "exposure",
        "type de sol" | "sol" => "soil_type",
        "période de semis" | "periode de semis" | "semis" => "sowing_period",
        "période de récolte" | "periode de recolte" | "récolte" | "recolte" => "harvest_period",
        "vivace" => "perennial",
        "hivernage" => "wintering",
        "entretien" => "care",
        _ => return None,
    })
}

/// True when a normalized label is the fiche type declaration itself.
pub fn is_type_label(label: &str) -> bool {
    normalize_label(label) == "type"
}

/// Resolves a `Type:` declaration value to a plant kind. Matching is
/// case-insensitive and accepts the shorthand spellings found in old fiches.
pub fn resolve_kind(value: &str) -> Option<PlantKind> {
    Some(match value.trim().to_lowercase().as_str() {
        "plante brute" | "brute" | "tisane" => PlantKind::RawHerb,
        "complément" | "complement" | "compléments" | "complements" => PlantKind::Supplement,
        "huile essentielle" | "he" | "huile" => PlantKind::EssentialOil,
        "jardin" | "plante jardin" | "jardin potager" => PlantKind::GardenPlant,
        _ => return None,
    })
}

/// The label written back for an attribute when exporting fiche text. Every
/// returned label resolves back to the same attribute on the kinds that carry
/// it, which is what keeps export/extract round trips stable.
pub fn canonical_label(attr: &str) -> Option<&'static str> {
    Some(match attr {
        "name" => "Nom commun",
        "scientific_name" => "Nom scientifique",
        "family" => "Famille botanique",
        "organic" => "Biologique",
        "properties" => "Propriétés",
        "contraindications" => "Contre-indications",
        "interactions" => "Interactions médicamenteuses",
        "precautions" => "Précautions",
        "supplier" => "Distributeur",
        "price" => "Prix",
        "stock" => "Quantité en stock",
        "storage" => "Lieu de stockage",
        "links" => "Liens",
        "notes" => "Notes",
        "part_used" => "Partie utilisée",
        "origin" => "Origine",
        "preparation" => "Mode de préparation",
        "temperature" => "Température",
        "infusion_time" => "Temps d'infusion",
        "dosage" => "Posologie",
        "packaging" => "Conditionnement",
        "product_ref" => "Référence produit",
        "form" => "Forme",
        "strength" => "Dosage",
        "intake_time" => "Moment de prise",
        "course_length" => "Durée de cure",
        "distilled_organ" => "Organe distillé",
        "extraction" => "Mode d'obtention",
        "chemotype" => "Chémotype",
        "composition" => "Composition",
        "routes" => "Voies d'utilisation",
        "route_precautions" => "Précautions par voie",
        "expiry" => "Date limite",
        "location" => "Emplacement",
        "exposure" => "Exposition",
        "soil_type" => "Type de sol",
        "sowing_period" => "Période de semis",
        "harvest_period" => "Période de récolte",
        "perennial" => "Vivace",
        "wintering" => "Hivernage",
        "care" => "Entretien",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_case_whitespace_and_trailing_colon() {
        assert_eq!(normalize_label("  Nom Commun :  "), "nom commun");
        assert_eq!(normalize_label("PROPRIÉTÉS:"), "propriétés");
        assert_eq!(normalize_label("bio"), "bio");
        assert_eq!(normalize_label("Notes::"), "notes");
    }

    #[test]
    fn shared_labels_resolve_on_every_kind() {
        for kind in PlantKind::ALL {
            assert_eq!(resolve_attribute(kind, "Nom commun"), Some("name"));
            assert_eq!(resolve_attribute(kind, "latin"), Some("scientific_name"));
            assert_eq!(resolve_attribute(kind, "Bénéfices"), Some("properties"));
            assert_eq!(resolve_attribute(kind, "benefices"), Some("properties"));
            assert_eq!(
                resolve_attribute(kind, "Contre indications"),
                Some("contraindications")
            );
        }
    }

    #[test]
    fn kind_labels_resolve_only_on_their_kind() {
        assert_eq!(
            resolve_attribute(PlantKind::EssentialOil, "Chémotype"),
            Some("chemotype")
        );
        assert_eq!(resolve_attribute(PlantKind::RawHerb, "Chémotype"), None);
        assert_eq!(
            resolve_attribute(PlantKind::GardenPlant, "Semis"),
            Some("sowing_period")
        );
        assert_eq!(resolve_attribute(PlantKind::Supplement, "Semis"), None);
    }

    #[test]
    fn accented_and_unaccented_spellings_are_equivalent() {
        for label in ["Température", "temperature"] {
            assert_eq!(
                resolve_attribute(PlantKind::RawHerb, label),
                Some("temperature")
            );
        }
        for label in ["Durée de cure", "duree de cure", "durée", "duree"] {
            assert_eq!(
                resolve_attribute(PlantKind::Supplement, label),
                Some("course_length")
            );
        }
    }

    #[test]
    fn dosage_label_depends_on_kind() {
        // "Posologie" is intake instructions everywhere it appears, while a
        // supplement's "Dosage" is the unit strength.
        assert_eq!(resolve_attribute(PlantKind::RawHerb, "Posologie"), Some("dosage"));
        assert_eq!(resolve_attribute(PlantKind::Supplement, "Posologie"), Some("dosage"));
        assert_eq!(resolve_attribute(PlantKind::Supplement, "Dosage"), Some("strength"));
        assert_eq!(resolve_attribute(PlantKind::RawHerb, "Dosage"), None);
    }

    #[test]
    fn unknown_labels_do_not_resolve() {
        for kind in PlantKind::ALL {
            assert_eq!(resolve_attribute(kind, "Couleur"), None);
            assert_eq!(resolve_attribute(kind, ""), None);
        }
    }

    #[test]
    fn type_declarations_resolve_with_shorthands() {
        assert_eq!(resolve_kind("Plante brute"), Some(PlantKind::RawHerb));
        assert_eq!(resolve_kind("TISANE"), Some(PlantKind::RawHerb));
        assert_eq!(resolve_kind("complément"), Some(PlantKind::Supplement));
        assert_eq!(resolve_kind("complements"), Some(PlantKind::Supplement));
        assert_eq!(resolve_kind("HE"), Some(PlantKind::EssentialOil));
        assert_eq!(resolve_kind(" jardin potager "), Some(PlantKind::GardenPlant));
        assert_eq!(resolve_kind("arbre"), None);
    }

    #[test]
    fn type_label_is_recognized() {
        assert!(is_type_label("Type:"));
        assert!(is_type_label("  TYPE "));
        assert!(!is_type_label("Type de sol"));
    }

    #[test]
    fn canonical_labels_resolve_back_to_their_attribute() {
        for kind in PlantKind::ALL {
            for attr in COMMON_ATTRIBUTES.iter().chain(kind_attributes(kind)) {
                let label = canonical_label(attr).unwrap();
                assert_eq!(
                    resolve_attribute(kind, label),
                    Some(*attr),
                    "label {label:?} should round-trip on {kind:?}"
                );
            }
        }
        assert_eq!(canonical_label("color"), None);
    }

    #[test]
    fn canonical_type_values_resolve_back_to_their_kind() {
        for kind in PlantKind::ALL {
            assert_eq!(resolve_kind(kind.label()), Some(kind));
        }
    }
}
