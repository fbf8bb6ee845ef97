//! Session history of synthesis results.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::SynthesisResult;

/// Append-only, most-recent-first sequence of results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    entries: VecDeque<SynthesisResult>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a result; it becomes index 0.
    pub fn record(&mut self, result: SynthesisResult) {
        self.entries.push_front(result);
    }

    pub fn latest(&self) -> Option<&SynthesisResult> {
        self.entries.front()
    }

    pub fn get(&self, index: usize) -> Option<&SynthesisResult> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SynthesisResult> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn result(axiom: &str) -> SynthesisResult {
        let mut result = SynthesisResult::sentinel(Utc::now());
        result.axiom = axiom.to_string();
        result
    }

    #[test]
    fn newest_entry_comes_first() {
        let mut history = History::new();
        for axiom in ["first", "second", "third"] {
            history.record(result(axiom));
        }

        assert_eq!(history.len(), 3);
        assert_eq!(history.latest().map(|r| r.axiom.as_str()), Some("third"));
        assert_eq!(history.get(2).map(|r| r.axiom.as_str()), Some("first"));
        let order: Vec<_> = history.iter().map(|r| r.axiom.as_str()).collect();
        assert_eq!(order, vec!["third", "second", "first"]);
    }

    #[test]
    fn empty_history() {
        let history = History::new();
        assert!(history.is_empty());
        assert!(history.latest().is_none());
        assert!(history.get(0).is_none());
    }
}
