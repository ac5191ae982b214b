//! Daily content: hadiths, recipes, duas, adhkar and the imsakia table,
//! loaded from a JSON pack. Queries return plain data; presentation is
//! the shell's job.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{DhikrPhrase, Dua, Hadith, ImsakiaDay, Recipe};

/// Compiled-in default so a fresh install works without any files.
const BUNDLED: &str = include_str!("../../data/content.json");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentPack {
    #[serde(default)]
    pub hadiths: Vec<Hadith>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub duas: Vec<Dua>,
    #[serde(default)]
    pub azkar: Vec<DhikrPhrase>,
    #[serde(default)]
    pub imsakia: Vec<ImsakiaDay>,
    #[serde(default)]
    pub videos: Vec<String>,
}

impl ContentPack {
    pub fn bundled() -> Result<Self> {
        serde_json::from_str(BUNDLED).context("Parsing bundled content pack")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        serde_json::from_str(&raw).with_context(|| format!("Parsing {:?}", path))
    }

    /// Hadiths whose title or text contains `query` (case-insensitive).
    /// An empty query matches everything.
    pub fn search_hadiths(&self, query: &str) -> Vec<&Hadith> {
        let needle = query.to_lowercase();
        self.hadiths
            .iter()
            .filter(|h| {
                h.title.to_lowercase().contains(&needle)
                    || h.text.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Deterministic pick for "today's hadith": indexed by the day
    /// ordinal so the same day always shows the same one.
    pub fn hadith_of_the_day(&self, day_ordinal: u32) -> Option<&Hadith> {
        if self.hadiths.is_empty() {
            return None;
        }
        self.hadiths.get(day_ordinal as usize % self.hadiths.len())
    }

    /// Recipes in `category`, or all of them when `None`.
    pub fn recipes_in_category(&self, category: Option<&str>) -> Vec<&Recipe> {
        match category {
            None => self.recipes.iter().collect(),
            Some(c) => self
                .recipes
                .iter()
                .filter(|r| r.category.eq_ignore_ascii_case(c))
                .collect(),
        }
    }

    pub fn recipe_by_id(&self, id: u32) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Distinct recipe categories, in first-seen order.
    pub fn recipe_categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for recipe in &self.recipes {
            if !categories.contains(&recipe.category.as_str()) {
                categories.push(&recipe.category);
            }
        }
        categories
    }

    pub fn imsakia_for_day(&self, day: u32) -> Option<&ImsakiaDay> {
        self.imsakia.iter().find(|d| d.day == day)
    }

    pub fn athan_recording(&self, voice: usize) -> Option<&str> {
        self.videos.get(voice).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack() -> ContentPack {
        ContentPack::bundled().unwrap()
    }

    #[test]
    fn bundled_pack_parses_and_is_populated() {
        let pack = pack();
        assert!(!pack.hadiths.is_empty());
        assert!(!pack.recipes.is_empty());
        assert!(!pack.duas.is_empty());
        assert!(!pack.azkar.is_empty());
        assert!(!pack.imsakia.is_empty());
    }

    #[test]
    fn hadith_search_matches_title_and_text() {
        let pack = pack();
        assert_eq!(pack.search_hadiths("").len(), pack.hadiths.len());

        let by_title = pack.search_hadiths(&pack.hadiths[0].title);
        assert!(!by_title.is_empty());

        assert!(pack.search_hadiths("no such words anywhere").is_empty());
    }

    #[test]
    fn hadith_of_the_day_is_deterministic_and_wraps() {
        let pack = pack();
        let n = pack.hadiths.len() as u32;
        let first = pack.hadith_of_the_day(0).unwrap();
        let wrapped = pack.hadith_of_the_day(n).unwrap();
        assert_eq!(first.number, wrapped.number);
        assert_eq!(
            pack.hadith_of_the_day(3).unwrap().number,
            pack.hadith_of_the_day(3).unwrap().number
        );
    }

    #[test]
    fn recipe_category_filter() {
        let pack = pack();
        let all = pack.recipes_in_category(None);
        assert_eq!(all.len(), pack.recipes.len());

        let categories = pack.recipe_categories();
        assert!(!categories.is_empty());
        let some = pack.recipes_in_category(Some(categories[0]));
        assert!(!some.is_empty());
        assert!(some.iter().all(|r| r.category.eq_ignore_ascii_case(categories[0])));

        assert!(pack.recipes_in_category(Some("nonexistent")).is_empty());
    }

    #[test]
    fn imsakia_lookup_by_day() {
        let pack = pack();
        let first = &pack.imsakia[0];
        assert_eq!(pack.imsakia_for_day(first.day).unwrap().date, first.date);
        assert!(pack.imsakia_for_day(99).is_none());
    }

    #[test]
    fn athan_recording_by_voice_index() {
        let pack = pack();
        if pack.videos.is_empty() {
            assert!(pack.athan_recording(0).is_none());
        } else {
            assert!(pack.athan_recording(0).is_some());
            assert!(pack.athan_recording(pack.videos.len()).is_none());
        }
    }

    #[test]
    fn empty_pack_degrades_gracefully() {
        let empty = ContentPack::default();
        assert!(empty.hadith_of_the_day(5).is_none());
        assert!(empty.search_hadiths("x").is_empty());
        assert!(empty.recipe_categories().is_empty());
    }
}
