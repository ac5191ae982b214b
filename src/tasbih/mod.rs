//! Tasbih counter: a cyclic list of dhikr phrases, each with a target
//! count, and a running tally for the phrase in hand.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::models::dhikr::{default_phrases, DhikrPhrase};
use crate::storage::KeyValueStore;

const STORE_KEY: &str = "tasbih";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// The count advanced but the target is still ahead.
    Counted,
    /// This tap reached the target.
    Completed,
    /// The target was already met; the count does not move past it.
    AlreadyComplete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TasbihState {
    pub count: u32,
    pub dhikr_index: usize,
    pub phrases: Vec<DhikrPhrase>,
}

impl Default for TasbihState {
    fn default() -> Self {
        Self {
            count: 0,
            dhikr_index: 0,
            phrases: default_phrases(),
        }
    }
}

impl TasbihState {
    /// Build from a content pack's adhkar list, falling back to the
    /// classic set when the pack has none.
    pub fn with_phrases(phrases: Vec<DhikrPhrase>) -> Self {
        if phrases.is_empty() {
            Self::default()
        } else {
            Self {
                count: 0,
                dhikr_index: 0,
                phrases,
            }
        }
    }

    pub fn current_phrase(&self) -> &DhikrPhrase {
        &self.phrases[self.dhikr_index % self.phrases.len()]
    }

    pub fn target(&self) -> u32 {
        self.current_phrase().target
    }

    /// Advance the count by `n`, stopping at the target.
    pub fn tap(&mut self, n: u32) -> TapOutcome {
        let target = self.target();
        if self.count >= target {
            return TapOutcome::AlreadyComplete;
        }
        self.count = (self.count + n).min(target);
        if self.count >= target {
            TapOutcome::Completed
        } else {
            TapOutcome::Counted
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Move to the next phrase in the cycle; the count starts over.
    pub fn advance(&mut self) {
        self.dhikr_index = (self.dhikr_index + 1) % self.phrases.len();
        self.count = 0;
    }

    pub fn set_target(&mut self, target: u32) {
        let len = self.phrases.len();
        self.phrases[self.dhikr_index % len].target = target.max(1);
    }

    /// Repair state that came in from outside (an import, an older
    /// snapshot): empty phrase lists get the defaults, the index wraps,
    /// the count never exceeds the target.
    pub fn normalize(&mut self) {
        if self.phrases.is_empty() {
            self.phrases = default_phrases();
        }
        self.dhikr_index %= self.phrases.len();
        self.count = self.count.min(self.target());
    }

    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        Self::load_or_seed(store, Vec::new())
    }

    /// Load persisted state, or start fresh from `phrases` (a content
    /// pack's adhkar) when nothing was saved yet.
    pub fn load_or_seed(store: &dyn KeyValueStore, phrases: Vec<DhikrPhrase>) -> Result<Self> {
        let mut state = match store.get(STORE_KEY)? {
            Some(json) => serde_json::from_str::<Self>(&json)?,
            None => Self::with_phrases(phrases),
        };
        state.normalize();
        Ok(state)
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(STORE_KEY, &serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn taps_count_up_and_complete_at_target() {
        let mut state = TasbihState::default();
        assert_eq!(state.target(), 33);

        for _ in 0..32 {
            assert_eq!(state.tap(1), TapOutcome::Counted);
        }
        assert_eq!(state.tap(1), TapOutcome::Completed);
        assert_eq!(state.count, 33);
        assert_eq!(state.tap(1), TapOutcome::AlreadyComplete);
        assert_eq!(state.count, 33);
    }

    #[test]
    fn bulk_tap_stops_at_the_target() {
        let mut state = TasbihState::default();
        assert_eq!(state.tap(100), TapOutcome::Completed);
        assert_eq!(state.count, 33);
    }

    #[test]
    fn advance_cycles_and_resets_the_count() {
        let mut state = TasbihState::default();
        state.tap(10);
        state.advance();
        assert_eq!(state.count, 0);
        assert_eq!(state.dhikr_index, 1);
        assert_eq!(state.target(), 33);

        for _ in 0..4 {
            state.advance();
        }
        assert_eq!(state.dhikr_index, 0);
    }

    #[test]
    fn set_target_applies_to_the_current_phrase_only() {
        let mut state = TasbihState::default();
        state.set_target(50);
        assert_eq!(state.target(), 50);
        assert_eq!(state.phrases[1].target, 33);
        state.set_target(0);
        assert_eq!(state.target(), 1);
    }

    #[test]
    fn empty_phrase_list_falls_back_to_defaults() {
        let state = TasbihState::with_phrases(vec![]);
        assert_eq!(state.phrases.len(), 5);
    }

    #[test]
    fn normalize_repairs_imported_state() {
        let mut state = TasbihState {
            count: 500,
            dhikr_index: 12,
            phrases: default_phrases(),
        };
        state.normalize();
        assert_eq!(state.dhikr_index, 2);
        assert_eq!(state.count, state.target());
    }

    #[test]
    fn state_round_trips_through_a_store() {
        let mut store = MemoryStore::default();
        let mut state = TasbihState::default();
        state.tap(7);
        state.advance();
        state.tap(3);
        state.save(&mut store).unwrap();

        let loaded = TasbihState::load(&store).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn load_from_an_empty_store_gives_defaults() {
        let store = MemoryStore::default();
        let state = TasbihState::load(&store).unwrap();
        assert_eq!(state, TasbihState::default());
    }

    #[test]
    fn seed_phrases_apply_only_before_first_save() {
        let mut store = MemoryStore::default();
        let pack_phrases = vec![DhikrPhrase::new("اللهم صل على محمد", 10)];

        let mut state =
            TasbihState::load_or_seed(&store, pack_phrases.clone()).unwrap();
        assert_eq!(state.phrases, pack_phrases);

        state.tap(4);
        state.save(&mut store).unwrap();

        // Once saved, the stored state wins over the seed.
        let reloaded = TasbihState::load_or_seed(&store, vec![]).unwrap();
        assert_eq!(reloaded.count, 4);
        assert_eq!(reloaded.phrases, pack_phrases);
    }
}
