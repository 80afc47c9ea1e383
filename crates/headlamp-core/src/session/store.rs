use crate::chat::ConversationTurn;

/// Single source of truth for the visible conversation and in-flight status.
///
/// The history is append-only; only [`SessionStore::reset`] shortens it.
#[derive(Debug, Default)]
pub struct SessionStore {
    history: Vec<ConversationTurn>,
    pending: bool,
    error: Option<String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a turn to the end of the history.
    pub fn append(&mut self, turn: ConversationTurn) {
        self.history.push(turn);
    }

    pub fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }

    /// Replaces the current error.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Clears history, error and pending flag.
    ///
    /// The persisted identity lives outside the store and is untouched.
    pub fn reset(&mut self) {
        self.history.clear();
        self.pending = false;
        self.error = None;
    }

    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_turn(&self) -> Option<&ConversationTurn> {
        self.history.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut store = SessionStore::new();
        store.append(ConversationTurn::user("first"));
        store.append(ConversationTurn::assistant("second", None, None));
        store.append(ConversationTurn::user("third"));

        let contents: Vec<&str> = store.history().iter().map(|t| t.content()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(store.last_turn().map(|t| t.content()), Some("third"));
    }

    #[test]
    fn test_set_error_replaces_previous() {
        let mut store = SessionStore::new();
        store.set_error(Some("one".to_string()));
        store.set_error(Some("two".to_string()));
        assert_eq!(store.error(), Some("two"));
        store.set_error(None);
        assert!(store.error().is_none());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut store = SessionStore::new();
        store.append(ConversationTurn::user("hello"));
        store.set_pending(true);
        store.set_error(Some("boom".to_string()));

        store.reset();

        assert!(store.is_empty());
        assert!(!store.is_pending());
        assert!(store.error().is_none());
    }
}
