use std::sync::{Arc, Mutex, MutexGuard};

/// Holds the most recent refresh token, shared by every request handler.
///
/// Cloning yields another handle to the same slot. Writes are last-writer-wins.
#[derive(Debug, Clone, Default)]
pub struct RefreshTokenSlot {
    inner: Arc<Mutex<Option<String>>>,
}

impl RefreshTokenSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let slot = Self::new();
        slot.set(token);
        slot
    }

    pub fn get(&self) -> Option<String> {
        self.lock().clone()
    }

    /// Replaces the held token. An empty token clears the slot.
    pub fn set(&self, token: impl Into<String>) {
        let token = token.into();
        *self.lock() = if token.is_empty() { None } else { Some(token) };
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }

    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        // The guarded value is a plain Option, so a poisoned lock still holds a usable value.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::RefreshTokenSlot;

    #[test]
    fn starts_empty() {
        let slot = RefreshTokenSlot::new();
        assert!(slot.is_empty());
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn set_overwrites_previous_token() {
        let slot = RefreshTokenSlot::with_token("first");
        slot.set("second");
        assert_eq!(slot.get().as_deref(), Some("second"));
    }

    #[test]
    fn empty_token_clears_slot() {
        let slot = RefreshTokenSlot::with_token("first");
        slot.set("");
        assert!(slot.is_empty());
    }

    #[test]
    fn clones_share_the_slot() {
        let slot = RefreshTokenSlot::new();
        let handle = slot.clone();
        handle.set("shared");
        assert_eq!(slot.get().as_deref(), Some("shared"));
        slot.set("");
        assert!(handle.is_empty());
    }

    #[test]
    fn concurrent_writers_leave_one_whole_token() {
        let slot = RefreshTokenSlot::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let slot = slot.clone();
                std::thread::spawn(move || slot.set(format!("token-{i}")))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let token = slot.get().unwrap();
        assert!(token.starts_with("token-"));
    }
}
