//! High score persistence
//!
//! The session persists exactly one integer: the best score seen. The store
//! is injected so the sim never touches the platform; a missing or garbled
//! value always reads as 0, never a fault.

/// Persistence shim for the single best score
pub trait HighScoreStore {
    /// Load the persisted best score, 0 when absent
    fn load(&self) -> u32;
    /// Persist the best score (best-effort; failures are swallowed)
    fn save(&self, score: u32);
}

/// In-memory store, used on native and in tests
#[derive(Debug, Default, Clone)]
pub struct MemoryHighScore {
    score: std::rc::Rc<std::cell::Cell<u32>>,
}

impl MemoryHighScore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> u32 {
        self.score.get()
    }

    fn save(&self, score: u32) {
        self.score.set(score);
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageHighScore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageHighScore {
    /// LocalStorage key, kept compatible with earlier builds
    const STORAGE_KEY: &'static str = "high_score";

    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageHighScore {
    fn load(&self) -> u32 {
        let Some(storage) = Self::storage() else {
            return 0;
        };
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
                log::warn!("ignoring unparseable stored high score: {raw:?}");
                0
            }),
            _ => 0,
        }
    }

    fn save(&self, score: u32) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(Self::STORAGE_KEY, &score.to_string());
            log::info!("high score saved: {score}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryHighScore::new();
        assert_eq!(store.load(), 0);

        store.save(1234);
        assert_eq!(store.load(), 1234);

        // Clones share the same backing cell
        let alias = store.clone();
        alias.save(9999);
        assert_eq!(store.load(), 9999);
    }
}
