use serde::Serialize;

/// Choice that asks the caller for a free-text species instead.
pub const OTHER_SPECIES: &str = "Diğer";

/// The fixed species vocabulary offered by the form, in display order.
pub const SPECIES_CHOICES: [&str; 8] = [
    "İnşaatlık",
    "Çam",
    "Meşe",
    "Kayın",
    "Gürgen",
    "Ladin",
    "Kavak",
    OTHER_SPECIES,
];

/// Species vocabulary as served to the form.
#[derive(Debug, Clone, Serialize)]
pub struct SpeciesVocabulary {
    pub choices: Vec<&'static str>,
    /// The entry that means "type the species yourself".
    pub free_text_choice: &'static str,
}

impl Default for SpeciesVocabulary {
    fn default() -> Self {
        Self {
            choices: SPECIES_CHOICES.to_vec(),
            free_text_choice: OTHER_SPECIES,
        }
    }
}
