use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hadith {
    pub number: u32,
    pub title: String,
    pub text: String,
    pub narrator: String,
    pub source: String,
    #[serde(default)]
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub description: String,
    /// Preparation time in minutes.
    #[serde(default)]
    pub time: Option<u32>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dua {
    pub title: String,
    pub category: String,
    pub text: String,
    #[serde(default)]
    pub reference: Option<String>,
}

/// One row of the Ramadan imsakia table: suhoor cutoff, fajr and iftar
/// for a day of the month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImsakiaDay {
    pub day: u32,
    pub date: String,
    pub suhoor: String,
    pub fajr: String,
    pub iftar: String,
}
