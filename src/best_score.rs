//! Best score, persisted as a plain integer string

use crate::persistence::KeyValueStore;

/// Best score across sessions. Only ever increases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore(u32);

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "flappyHenBest";

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Replace the best if `score` is strictly greater. Returns true if it was.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.0 {
            self.0 = score;
            true
        } else {
            false
        }
    }

    /// Load from the store; absent or unreadable values count as 0
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match parse_leading_int(&raw) {
                Some(value) => {
                    log::info!("Loaded best score {}", value);
                    Self(value)
                }
                None => {
                    log::warn!("Ignoring unreadable best score {:?}", raw);
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Could not read best score: {}", e);
                Self::default()
            }
        }
    }

    /// Write to the store; failures are logged and otherwise ignored
    pub fn save(&self, store: &mut impl KeyValueStore) {
        match store.set(Self::STORAGE_KEY, &self.0.to_string()) {
            Ok(()) => log::info!("Best score saved ({})", self.0),
            Err(e) => log::warn!("Could not save best score: {}", e),
        }
    }
}

/// Leading decimal digits after optional whitespace and `+`, like `parseInt`.
/// Negative values are unreadable; huge ones saturate.
fn parse_leading_int(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u32::MAX))
}
