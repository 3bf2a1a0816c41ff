//! Style-sheet port.
//!
//! The registry never touches a real document. It writes `@font-face` rules
//! through the [`StyleSheet`] trait, and the host decides where they end up.
//! [`MemoryStyleSheet`] keeps them in a vector and is what the CLI and the
//! tests use.

mod font_face;

pub use font_face::{binds_family, family_declaration, FontFaceRule};

/// Identifies a rule inserted into a [`StyleSheet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(u64);

impl RuleId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StyleSheetError {
    #[error("Style sheet is full ({capacity} rules)")]
    Full { capacity: usize },
    #[error("Style sheet rejected rule: {0}")]
    Rejected(String),
}

pub trait StyleSheet {
    fn insert_rule(&mut self, css: String) -> Result<RuleId, StyleSheetError>;

    /// Removes one rule by id. Returns false if it was not present.
    fn remove_rule(&mut self, id: RuleId) -> bool;

    /// Removes every rule whose text satisfies `matches`, returning how many
    /// were removed.
    fn remove_rules_where(&mut self, matches: &mut dyn FnMut(&str) -> bool) -> usize;

    /// Rule texts in insertion order.
    fn rules(&self) -> Vec<&str>;

    fn len(&self) -> usize {
        self.rules().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct Rule {
    id: RuleId,
    css: String,
}

/// In-memory rule table.
pub struct MemoryStyleSheet {
    rules: Vec<Rule>,
    next_id: u64,
    capacity: Option<usize>,
}

impl MemoryStyleSheet {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            next_id: 1,
            capacity: None,
        }
    }

    /// A sheet that rejects inserts once it holds `capacity` rules.
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::new()
        }
    }

}

impl Default for MemoryStyleSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleSheet for MemoryStyleSheet {
    fn insert_rule(&mut self, css: String) -> Result<RuleId, StyleSheetError> {
        if let Some(capacity) = self.capacity {
            if self.rules.len() >= capacity {
                return Err(StyleSheetError::Full { capacity });
            }
        }
        if css.trim().is_empty() {
            return Err(StyleSheetError::Rejected("empty rule".into()));
        }

        let id = RuleId::new(self.next_id);
        self.next_id += 1;
        log::debug!("Inserted style rule {}", id.get());
        self.rules.push(Rule { id, css });
        Ok(id)
    }

    fn remove_rule(&mut self, id: RuleId) -> bool {
        match self.rules.iter().position(|r| r.id == id) {
            Some(idx) => {
                self.rules.remove(idx);
                log::debug!("Removed style rule {}", id.get());
                true
            }
            None => false,
        }
    }

    fn remove_rules_where(&mut self, matches: &mut dyn FnMut(&str) -> bool) -> usize {
        let before = self.rules.len();
        self.rules.retain(|r| {
            let remove = matches(r.css.as_str());
            if remove {
                log::debug!("Removed style rule {}", r.id.get());
            }
            !remove
        });
        before - self.rules.len()
    }

    fn rules(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.css.as_str()).collect()
    }

    fn len(&self) -> usize {
        self.rules.len()
    }
}
