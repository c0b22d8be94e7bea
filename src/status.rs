//! Transient Item Status
//!
//! Presentation-only metadata kept next to the list state: where an item is
//! in its categorization lifecycle, and short-lived highlight flags.
//! Nothing here is persisted.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Categorization lifecycle of a single item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorizationPhase {
    #[default]
    Uncategorized,
    Categorizing,
    Categorized,
    QueuedOffline,
}

/// Short-lived visual flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Highlight {
    /// Freshly added
    New,
    /// Removal animation in progress
    Removing,
}

impl Highlight {
    pub fn default_ttl(&self) -> Duration {
        match self {
            Highlight::New => Duration::from_millis(1500),
            Highlight::Removing => Duration::from_millis(300),
        }
    }
}

#[derive(Debug, Default)]
pub struct StatusBoard {
    phases: HashMap<String, CategorizationPhase>,
    highlights: HashMap<(String, Highlight), Instant>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self, item_id: &str) -> CategorizationPhase {
        self.phases.get(item_id).copied().unwrap_or_default()
    }

    pub fn set_phase(&mut self, item_id: &str, phase: CategorizationPhase) {
        self.phases.insert(item_id.to_string(), phase);
    }

    /// Ids currently in `phase`
    pub fn items_in(&self, phase: CategorizationPhase) -> Vec<String> {
        let mut ids: Vec<String> = self
            .phases
            .iter()
            .filter(|(_, p)| **p == phase)
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    pub fn highlight(&mut self, item_id: &str, flag: Highlight) {
        self.highlight_for(item_id, flag, flag.default_ttl());
    }

    pub fn highlight_for(&mut self, item_id: &str, flag: Highlight, ttl: Duration) {
        self.prune_expired();
        self.highlights.insert((item_id.to_string(), flag), Instant::now() + ttl);
    }

    pub fn is_highlighted(&self, item_id: &str, flag: Highlight) -> bool {
        self.is_highlighted_at(item_id, flag, Instant::now())
    }

    fn is_highlighted_at(&self, item_id: &str, flag: Highlight, now: Instant) -> bool {
        self.highlights
            .get(&(item_id.to_string(), flag))
            .is_some_and(|expires| *expires > now)
    }

    /// Drop expired highlights
    pub fn prune_expired(&mut self) {
        let now = Instant::now();
        self.highlights.retain(|_, expires| *expires > now);
    }

    /// Forget everything about an item
    pub fn forget(&mut self, item_id: &str) {
        self.phases.remove(item_id);
        self.highlights.retain(|(id, _), _| id != item_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_defaults_to_uncategorized() {
        let mut board = StatusBoard::new();
        assert_eq!(board.phase("x"), CategorizationPhase::Uncategorized);
        board.set_phase("x", CategorizationPhase::QueuedOffline);
        assert_eq!(board.items_in(CategorizationPhase::QueuedOffline), vec!["x".to_string()]);
    }

    #[test]
    fn test_highlight_expires() {
        let mut board = StatusBoard::new();
        board.highlight_for("a", Highlight::New, Duration::from_millis(50));
        assert!(board.is_highlighted("a", Highlight::New));
        assert!(!board.is_highlighted("a", Highlight::Removing));

        let later = Instant::now() + Duration::from_millis(100);
        assert!(!board.is_highlighted_at("a", Highlight::New, later));

        board.highlight_for("b", Highlight::Removing, Duration::ZERO);
        board.prune_expired();
        assert!(board.highlights.keys().all(|(id, _)| id != "b"));
    }

    #[test]
    fn test_new_highlights_evict_expired_ones() {
        let mut board = StatusBoard::new();
        for id in ["a", "b", "c"] {
            board.highlight_for(id, Highlight::Removing, Duration::ZERO);
        }
        board.highlight("d", Highlight::New);
        assert_eq!(board.highlights.len(), 1);
        assert!(board.is_highlighted("d", Highlight::New));
    }

    #[test]
    fn test_forget_clears_item() {
        let mut board = StatusBoard::new();
        board.set_phase("a", CategorizationPhase::Categorizing);
        board.highlight("a", Highlight::New);
        board.forget("a");
        assert_eq!(board.phase("a"), CategorizationPhase::Uncategorized);
        assert!(!board.is_highlighted("a", Highlight::New));
    }
}
