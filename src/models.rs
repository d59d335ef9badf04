//! Core data models for the herbarium catalog.
//!
//! Every record is a [`Plant`]: a set of fields shared by all entries plus a
//! [`PlantDetails`] payload that depends on the plant kind. The kind is fixed
//! at extraction time and never changes for the lifetime of a record.

use serde::Serialize;

/// The four kinds of catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantKind {
    RawHerb,
    Supplement,
    EssentialOil,
    GardenPlant,
}

impl PlantKind {
    pub const ALL: [PlantKind; 4] = [
        PlantKind::RawHerb,
        PlantKind::Supplement,
        PlantKind::EssentialOil,
        PlantKind::GardenPlant,
    ];

    /// Stable tag stored in the database and accepted by `--kind` filters.
    pub fn as_tag(&self) -> &'static str {
        match self {
            PlantKind::RawHerb => "raw_herb",
            PlantKind::Supplement => "supplement",
            PlantKind::EssentialOil => "essential_oil",
            PlantKind::GardenPlant => "garden_plant",
        }
    }

    pub fn from_tag(tag: &str) -> Option<PlantKind> {
        Some(match tag {
            "raw_herb" => PlantKind::RawHerb,
            "supplement" => PlantKind::Supplement,
            "essential_oil" => PlantKind::EssentialOil,
            "garden_plant" => PlantKind::GardenPlant,
            _ => return None,
        })
    }

    /// Human-facing French label, also used as the `Type:` value in fiche text.
    pub fn label(&self) -> &'static str {
        match self {
            PlantKind::RawHerb => "Plante brute",
            PlantKind::Supplement => "Complément",
            PlantKind::EssentialOil => "Huile essentielle",
            PlantKind::GardenPlant => "Jardin",
        }
    }
}

/// Fields specific to dried herbs sold loose (tisanes, infusions).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawHerbDetails {
    pub part_used: String,
    pub origin: String,
    pub preparation: String,
    pub temperature: String,
    pub infusion_time: String,
    pub dosage: String,
    pub packaging: String,
}

/// Fields specific to packaged supplements (capsules, extracts, ampoules).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SupplementDetails {
    pub part_used: String,
    pub origin: String,
    pub product_ref: String,
    pub form: String,
    /// Active-substance strength per unit (e.g. "500 mg"), distinct from the
    /// intake instructions in `dosage`.
    pub strength: String,
    pub dosage: String,
    pub intake_time: String,
    pub course_length: String,
    pub packaging: String,
}

/// Fields specific to essential oils.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EssentialOilDetails {
    pub distilled_organ: String,
    pub origin: String,
    pub extraction: String,
    pub chemotype: String,
    pub composition: String,
    pub routes: String,
    pub route_precautions: String,
    pub expiry: String,
}

/// Fields specific to plants grown in the garden.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GardenPlantDetails {
    pub part_used: String,
    pub location: String,
    pub exposure: String,
    pub soil_type: String,
    pub sowing_period: String,
    pub harvest_period: String,
    pub perennial: bool,
    pub wintering: String,
    pub care: String,
}

/// Kind-specific payload of a [`Plant`]. Serializes with a `kind` tag so JSON
/// output carries the same tag strings as the database.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlantDetails {
    RawHerb(RawHerbDetails),
    Supplement(SupplementDetails),
    EssentialOil(EssentialOilDetails),
    GardenPlant(GardenPlantDetails),
}

impl PlantDetails {
    pub fn kind(&self) -> PlantKind {
        match self {
            PlantDetails::RawHerb(_) => PlantKind::RawHerb,
            PlantDetails::Supplement(_) => PlantKind::Supplement,
            PlantDetails::EssentialOil(_) => PlantKind::EssentialOil,
            PlantDetails::GardenPlant(_) => PlantKind::GardenPlant,
        }
    }

    fn set_field(&mut self, attr: &str, value: &str) -> bool {
        match self {
            PlantDetails::RawHerb(d) => d.set_field(attr, value),
            PlantDetails::Supplement(d) => d.set_field(attr, value),
            PlantDetails::EssentialOil(d) => d.set_field(attr, value),
            PlantDetails::GardenPlant(d) => d.set_field(attr, value),
        }
    }

    fn field(&self, attr: &str) -> Option<String> {
        match self {
            PlantDetails::RawHerb(d) => d.field(attr),
            PlantDetails::Supplement(d) => d.field(attr),
            PlantDetails::EssentialOil(d) => d.field(attr),
            PlantDetails::GardenPlant(d) => d.field(attr),
        }
    }
}

impl RawHerbDetails {
    fn set_field(&mut self, attr: &str, value: &str) -> bool {
        match attr {
            "part_used" => self.part_used = value.to_string(),
            "origin" => self.origin = value.to_string(),
            "preparation" => self.preparation = value.to_string(),
            "temperature" => self.temperature = value.to_string(),
            "infusion_time" => self.infusion_time = value.to_string(),
            "dosage" => self.dosage = value.to_string(),
            "packaging" => self.packaging = value.to_string(),
            _ => return false,
        }
        true
    }

    fn field(&self, attr: &str) -> Option<String> {
        Some(match attr {
            "part_used" => self.part_used.clone(),
            "origin" => self.origin.clone(),
            "preparation" => self.preparation.clone(),
            "temperature" => self.temperature.clone(),
            "infusion_time" => self.infusion_time.clone(),
            "dosage" => self.dosage.clone(),
            "packaging" => self.packaging.clone(),
            _ => return None,
        })
    }
}

impl SupplementDetails {
    fn set_field(&mut self, attr: &str, value: &str) -> bool {
        match attr {
            "part_used" => self.part_used = value.to_string(),
            "origin" => self.origin = value.to_string(),
            "product_ref" => self.product_ref = value.to_string(),
            "form" => self.form = value.to_string(),
            "strength" => self.strength = value.to_string(),
            "dosage" => self.dosage = value.to_string(),
            "intake_time" => self.intake_time = value.to_string(),
            "course_length" => self.course_length = value.to_string(),
            "packaging" => self.packaging = value.to_string(),
            _ => return false,
        }
        true
    }

    fn field(&self, attr: &str) -> Option<String> {
        Some(match attr {
            "part_used" => self.part_used.clone(),
            "origin" => self.origin.clone(),
            "product_ref" => self.product_ref.clone(),
            "form" => self.form.clone(),
            "strength" => self.strength.clone(),
            "dosage" => self.dosage.clone(),
            "intake_time" => self.intake_time.clone(),
            "course_length" => self.course_length.clone(),
            "packaging" => self.packaging.clone(),
            _ => return None,
        })
    }
}

impl EssentialOilDetails {
    fn set_field(&mut self, attr: &str, value: &str) -> bool {
        match attr {
            "distilled_organ" => self.distilled_organ = value.to_string(),
            "origin" => self.origin = value.to_string(),
            "extraction" => self.extraction = value.to_string(),
            "chemotype" => self.chemotype = value.to_string(),
            "composition" => self.composition = value.to_string(),
            "routes" => self.routes = value.to_string(),
            "route_precautions" => self.route_precautions = value.to_string(),
            "expiry" => self.expiry = value.to_string(),
            _ => return false,
        }
        true
    }

    fn field(&self, attr: &str) -> Option<String> {
        Some(match attr {
            "distilled_organ" => self.distilled_organ.clone(),
            "origin" => self.origin.clone(),
            "extraction" => self.extraction.clone(),
            "chemotype" => self.chemotype.clone(),
            "composition" => self.composition.clone(),
            "routes" => self.routes.clone(),
            "route_precautions" => self.route_precautions.clone(),
            "expiry" => self.expiry.clone(),
            _ => return None,
        })
    }
}

impl GardenPlantDetails {
    fn set_field(&mut self, attr: &str, value: &str) -> bool {
        match attr {
            "part_used" => self.part_used = value.to_string(),
            "location" => self.location = value.to_string(),
            "exposure" => self.exposure = value.to_string(),
            "soil_type" => self.soil_type = value.to_string(),
            "sowing_period" => self.sowing_period = value.to_string(),
            "harvest_period" => self.harvest_period = value.to_string(),
            "perennial" => self.perennial = truthy(value),
            "wintering" => self.wintering = value.to_string(),
            "care" => self.care = value.to_string(),
            _ => return false,
        }
        true
    }

    fn field(&self, attr: &str) -> Option<String> {
        Some(match attr {
            "part_used" => self.part_used.clone(),
            "location" => self.location.clone(),
            "exposure" => self.exposure.clone(),
            "soil_type" => self.soil_type.clone(),
            "sowing_period" => self.sowing_period.clone(),
            "harvest_period" => self.harvest_period.clone(),
            "perennial" => bool_text(self.perennial).to_string(),
            "wintering" => self.wintering.clone(),
            "care" => self.care.clone(),
            _ => return None,
        })
    }
}

/// A catalog entry. `id` is `None` until the record has been persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plant {
    pub id: Option<i64>,
    pub name: String,
    pub scientific_name: String,
    pub family: String,
    pub organic: bool,
    pub properties: String,
    pub contraindications: String,
    pub interactions: String,
    pub precautions: String,
    pub supplier: String,
    pub price: String,
    pub stock: String,
    pub storage: String,
    pub links: String,
    pub notes: String,
    #[serde(flatten)]
    pub details: PlantDetails,
}

impl Plant {
    /// An empty record of the given kind, ready for field assignment.
    pub fn new(kind: PlantKind) -> Plant {
        let details = match kind {
            PlantKind::RawHerb => PlantDetails::RawHerb(RawHerbDetails::default()),
            PlantKind::Supplement => PlantDetails::Supplement(SupplementDetails::default()),
            PlantKind::EssentialOil => PlantDetails::EssentialOil(EssentialOilDetails::default()),
            PlantKind::GardenPlant => PlantDetails::GardenPlant(GardenPlantDetails::default()),
        };
        Plant {
            id: None,
            name: String::new(),
            scientific_name: String::new(),
            family: String::new(),
            organic: false,
            properties: String::new(),
            contraindications: String::new(),
            interactions: String::new(),
            precautions: String::new(),
            supplier: String::new(),
            price: String::new(),
            stock: String::new(),
            storage: String::new(),
            links: String::new(),
            notes: String::new(),
            details,
        }
    }

    pub fn kind(&self) -> PlantKind {
        self.details.kind()
    }

    /// Assigns a canonical attribute. Returns false when the attribute does
    /// not exist on this record's kind, leaving the record untouched.
    ///
    /// Boolean attributes (`organic`, `perennial`) coerce their value with
    /// [`truthy`]; everything else is stored verbatim.
    pub fn set_field(&mut self, attr: &str, value: &str) -> bool {
        match attr {
            "name" => self.name = value.to_string(),
            "scientific_name" => self.scientific_name = value.to_string(),
            "family" => self.family = value.to_string(),
            "organic" => self.organic = truthy(value),
            "properties" => self.properties = value.to_string(),
            "contraindications" => self.contraindications = value.to_string(),
            "interactions" => self.interactions = value.to_string(),
            "precautions" => self.precautions = value.to_string(),
            "supplier" => self.supplier = value.to_string(),
            "price" => self.price = value.to_string(),
            "stock" => self.stock = value.to_string(),
            "storage" => self.storage = value.to_string(),
            "links" => self.links = value.to_string(),
            "notes" => self.notes = value.to_string(),
            _ => return self.details.set_field(attr, value),
        }
        true
    }

    /// Reads a canonical attribute back as text. Booleans render as
    /// "Oui"/"Non" so that a written fiche re-extracts to the same record.
    pub fn field(&self, attr: &str) -> Option<String> {
        Some(match attr {
            "name" => self.name.clone(),
            "scientific_name" => self.scientific_name.clone(),
            "family" => self.family.clone(),
            "organic" => bool_text(self.organic).to_string(),
            "properties" => self.properties.clone(),
            "contraindications" => self.contraindications.clone(),
            "interactions" => self.interactions.clone(),
            "precautions" => self.precautions.clone(),
            "supplier" => self.supplier.clone(),
            "price" => self.price.clone(),
            "stock" => self.stock.clone(),
            "storage" => self.storage.clone(),
            "links" => self.links.clone(),
            "notes" => self.notes.clone(),
            _ => return self.details.field(attr),
        })
    }
}

/// One dated care event attached to a plant (watering, repotting, a cure...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    pub id: Option<i64>,
    pub plant_id: i64,
    /// ISO date, `YYYY-MM-DD`. Validated at the CLI boundary.
    pub date: String,
    pub action: String,
    pub notes: String,
}

/// Interprets free-form fiche text as a boolean. Accepts the French and
/// English spellings people actually type; anything else is false.
pub fn truthy(text: &str) -> bool {
    matches!(
        text.trim().to_lowercase().as_str(),
        "oui" | "yes" | "true" | "1" | "vrai"
    )
}

fn bool_text(value: bool) -> &'static str {
    if value {
        "Oui"
    } else {
        "Non"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_accepts_french_and_english_spellings() {
        for text in ["oui", "Oui", "OUI", " oui ", "yes", "true", "1", "vrai", "VRAI"] {
            assert!(truthy(text), "expected {text:?} to be truthy");
        }
    }

    #[test]
    fn truthy_rejects_everything_else() {
        for text in ["non", "no", "false", "0", "", "ouii", "2", "faux"] {
            assert!(!truthy(text), "expected {text:?} to be falsy");
        }
    }

    #[test]
    fn kind_tags_round_trip() {
        for kind in PlantKind::ALL {
            assert_eq!(PlantKind::from_tag(kind.as_tag()), Some(kind));
        }
        assert_eq!(PlantKind::from_tag("tisane"), None);
    }

    #[test]
    fn set_field_assigns_shared_attributes_on_any_kind() {
        for kind in PlantKind::ALL {
            let mut plant = Plant::new(kind);
            assert!(plant.set_field("name", "Ortie"));
            assert!(plant.set_field("properties", "Diurétique"));
            assert_eq!(plant.name, "Ortie");
            assert_eq!(plant.properties, "Diurétique");
        }
    }

    #[test]
    fn set_field_assigns_kind_specific_attributes() {
        let mut herb = Plant::new(PlantKind::RawHerb);
        assert!(herb.set_field("infusion_time", "10 min"));
        assert_eq!(herb.field("infusion_time").as_deref(), Some("10 min"));

        let mut oil = Plant::new(PlantKind::EssentialOil);
        assert!(oil.set_field("chemotype", "Linalol"));
        assert_eq!(oil.field("chemotype").as_deref(), Some("Linalol"));
    }

    #[test]
    fn set_field_rejects_attributes_of_another_kind() {
        let mut herb = Plant::new(PlantKind::RawHerb);
        assert!(!herb.set_field("chemotype", "Linalol"));
        assert!(!herb.set_field("sowing_period", "mars"));
        assert_eq!(herb, Plant::new(PlantKind::RawHerb));
    }

    #[test]
    fn set_field_rejects_unknown_attributes() {
        let mut plant = Plant::new(PlantKind::Supplement);
        assert!(!plant.set_field("color", "green"));
    }

    #[test]
    fn boolean_fields_coerce_and_render() {
        let mut plant = Plant::new(PlantKind::GardenPlant);
        assert!(plant.set_field("organic", "Oui"));
        assert!(plant.set_field("perennial", "peut-être"));
        assert!(plant.organic);
        assert_eq!(plant.field("organic").as_deref(), Some("Oui"));
        assert_eq!(plant.field("perennial").as_deref(), Some("Non"));
    }

    #[test]
    fn field_reads_back_what_set_field_wrote() {
        let mut plant = Plant::new(PlantKind::Supplement);
        assert!(plant.set_field("strength", "500 mg"));
        assert!(plant.set_field("dosage", "2 gélules par jour"));
        assert_eq!(plant.field("strength").as_deref(), Some("500 mg"));
        assert_eq!(plant.field("dosage").as_deref(), Some("2 gélules par jour"));
        assert_eq!(plant.field("chemotype"), None);
    }

    #[test]
    fn json_output_carries_kind_tag_and_flattened_details() {
        let mut plant = Plant::new(PlantKind::EssentialOil);
        plant.set_field("name", "Lavande vraie");
        plant.set_field("chemotype", "Linalol");
        let json = serde_json::to_value(&plant).unwrap();
        assert_eq!(json["kind"], "essential_oil");
        assert_eq!(json["name"], "Lavande vraie");
        assert_eq!(json["chemotype"], "Linalol");
    }
}
