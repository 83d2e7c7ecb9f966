use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct AnimalQuery {
    pub query: String,
}

#[derive(Deserialize)]
pub struct ImageQuery {
    pub query: String,
    pub min_width: Option<u32>,
    pub min_height: Option<u32>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

/// Fact sheet assembled from a model completion. Every field is best-effort
/// and stays empty when the completion never mentions its label.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalInfo {
    pub brief_summary: String,
    pub interesting_facts: Vec<String>,
    pub scientific_name: String,
    pub physical_description: String,
    pub habitat: String,
    pub diet: String,
    pub social_structure: String,
    pub conservation_status: String,
    pub behavior: String,
}
