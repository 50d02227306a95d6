//! High-score persistence port
//!
//! A single integer survives between runs. The engine depends on this trait
//! rather than any storage global; the web build keeps the value in
//! LocalStorage, native runs and tests keep it in memory. Storage problems
//! are not faults: a missing or unreadable value loads as 0, a failed write
//! is logged and dropped.

pub trait HighScoreStore {
    fn load(&self) -> i64;
    fn save(&mut self, score: i64);
}

/// In-memory store for native runs and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    score: i64,
}

impl MemoryStore {
    pub fn new(score: i64) -> Self {
        Self { score }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> i64 {
        self.score
    }

    fn save(&mut self, score: i64) {
        self.score = score;
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug)]
pub struct LocalStorageStore {
    key: &'static str,
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStorageStore {
    fn default() -> Self {
        Self {
            key: "tapkeeper_highscore",
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> i64 {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(raw)) = storage.get_item(self.key) {
                if let Ok(score) = raw.parse::<i64>() {
                    log::info!("loaded high score {}", score);
                    return score;
                }
            }
        }
        log::info!("no stored high score, starting fresh");
        0
    }

    fn save(&mut self, score: i64) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(self.key, &score.to_string()).is_ok() {
                log::info!("high score saved ({})", score);
                return;
            }
        }
        log::warn!("failed to persist high score");
    }
}
