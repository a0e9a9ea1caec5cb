//! Process-wide registry of live treaties.
//!
//! An explicit value owned by the surrounding session state, not a hidden
//! global: construct one, run operations, drop it. Holds at most one treaty
//! per unordered player pair.

use chancery_protocol::PlayerId;

use crate::treaty::Treaty;

#[derive(Clone, Debug, Default)]
pub struct TreatyLedger {
    treaties: Vec<Treaty>,
}

impl TreatyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unordered-pair lookup: `find(a, b)` and `find(b, a)` return the same
    /// treaty.
    pub fn find(&self, a: PlayerId, b: PlayerId) -> Option<&Treaty> {
        self.treaties.iter().find(|t| t.is_pair(a, b))
    }

    pub fn find_mut(&mut self, a: PlayerId, b: PlayerId) -> Option<&mut Treaty> {
        self.treaties.iter_mut().find(|t| t.is_pair(a, b))
    }

    /// Open a meeting for the pair, or return the existing one. New
    /// treaties go in front; the presentation layer shows most recent
    /// first.
    pub fn begin(&mut self, plr0: PlayerId, plr1: PlayerId) -> &mut Treaty {
        if let Some(idx) = self.treaties.iter().position(|t| t.is_pair(plr0, plr1)) {
            return &mut self.treaties[idx];
        }
        self.treaties.insert(0, Treaty::new(plr0, plr1));
        &mut self.treaties[0]
    }

    /// Remove the pair's treaty and hand it back; a second call for the
    /// same pair is a plain miss, so removal is idempotent-safe.
    pub fn remove(&mut self, a: PlayerId, b: PlayerId) -> Option<Treaty> {
        let idx = self.treaties.iter().position(|t| t.is_pair(a, b))?;
        Some(self.treaties.remove(idx))
    }

    /// Live treaties in registry order. The immutable borrow rules out
    /// mutation from within the walk; broadcast-style operations collect
    /// pairs first and remove after.
    pub fn iter(&self) -> impl Iterator<Item = &Treaty> {
        self.treaties.iter()
    }

    pub fn len(&self) -> usize {
        self.treaties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.treaties.is_empty()
    }

    /// Drop every treaty, clauses included.
    pub fn clear(&mut self) {
        self.treaties.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_pair_symmetric() {
        let mut ledger = TreatyLedger::new();
        ledger.begin(PlayerId(0), PlayerId(1));

        let ab = ledger.find(PlayerId(0), PlayerId(1)).unwrap() as *const Treaty;
        let ba = ledger.find(PlayerId(1), PlayerId(0)).unwrap() as *const Treaty;
        assert_eq!(ab, ba);
        assert!(ledger.find(PlayerId(0), PlayerId(2)).is_none());
    }

    #[test]
    fn begin_is_find_or_create_with_front_insertion() {
        let mut ledger = TreatyLedger::new();
        ledger.begin(PlayerId(0), PlayerId(1));
        ledger.begin(PlayerId(2), PlayerId(3));
        assert_eq!(ledger.len(), 2);

        // Most recent pair sits in front.
        let first = ledger.iter().next().unwrap();
        assert!(first.is_pair(PlayerId(2), PlayerId(3)));

        // Re-beginning an existing pair does not duplicate it.
        ledger.begin(PlayerId(1), PlayerId(0));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn remove_is_idempotent_safe() {
        let mut ledger = TreatyLedger::new();
        ledger.begin(PlayerId(0), PlayerId(1));

        assert!(ledger.remove(PlayerId(1), PlayerId(0)).is_some());
        assert!(ledger.remove(PlayerId(0), PlayerId(1)).is_none());
        assert!(ledger.is_empty());
    }
}
