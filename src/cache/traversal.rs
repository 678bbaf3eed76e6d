//! Chunked Traversal Module
//!
//! Walks a named map one entry per external scheduling tick.
//!
//! A [`Traversal`] is advanced with [`Traversal::step`], which hands back a
//! copy of the next entry. It never calls consumer code itself, so whoever
//! schedules it can release the engine before delivering the entry.
//! Dropping a traversal cancels it. The map's cursor is left wherever it
//! was, and the next `begin_iteration` resets it.

use crate::cache::CacheRegistry;

// == Step ==
/// Result of advancing a traversal by one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The next entry, copied out of the map
    Delivered { key: String, value: String },
    /// The map is exhausted (or does not exist)
    Completed,
}

// == Traversal ==
/// Drive-to-completion walk over one named map.
#[derive(Debug, Clone)]
pub struct Traversal {
    name: String,
    started: bool,
    finished: bool,
    delivered: usize,
}

impl Traversal {
    /// Prepares a traversal of `name`. Nothing happens until the first step.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            started: false,
            finished: false,
            delivered: 0,
        }
    }

    /// Advances the traversal by one entry.
    ///
    /// The first step resets the map's cursor. Once the map is exhausted (or
    /// turns out not to exist) every later step returns [`Step::Completed`].
    pub fn step(&mut self, registry: &mut CacheRegistry) -> Step {
        if self.finished {
            return Step::Completed;
        }

        if !self.started {
            self.started = true;
            if !registry.begin_iteration(&self.name) {
                self.finished = true;
                return Step::Completed;
            }
        }

        match registry.next_entry(&self.name) {
            Some((key, value)) => {
                self.delivered += 1;
                Step::Delivered { key, value }
            }
            None => {
                self.finished = true;
                Step::Completed
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of entries handed out so far.
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    pub fn is_complete(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(entries: &[(&str, &str)]) -> CacheRegistry {
        let mut registry = CacheRegistry::new();
        for (k, v) in entries {
            registry.put("m", k.to_string(), v.to_string()).unwrap();
        }
        registry
    }

    fn delivered(key: &str, value: &str) -> Step {
        Step::Delivered {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_one_entry_per_step_then_completion() {
        let mut registry = registry_with(&[("a", "1"), ("b", "2")]);
        let mut traversal = Traversal::new("m");

        assert_eq!(traversal.step(&mut registry), delivered("a", "1"));
        assert!(!traversal.is_complete());
        assert_eq!(traversal.step(&mut registry), delivered("b", "2"));
        assert_eq!(traversal.step(&mut registry), Step::Completed);
        assert!(traversal.is_complete());
        assert_eq!(traversal.step(&mut registry), Step::Completed);

        assert_eq!(traversal.delivered(), 2);
    }

    #[test]
    fn test_missing_map_completes_immediately() {
        let mut registry = CacheRegistry::new();
        let mut traversal = Traversal::new("missing");

        assert_eq!(traversal.step(&mut registry), Step::Completed);
        assert!(traversal.is_complete());
        assert_eq!(traversal.delivered(), 0);
    }

    #[test]
    fn test_empty_map_completes_on_first_step() {
        let mut registry = CacheRegistry::new();
        registry.clear("m", 60, 0).unwrap();
        let mut traversal = Traversal::new("m");

        assert_eq!(traversal.step(&mut registry), Step::Completed);
        assert_eq!(traversal.delivered(), 0);
    }

    #[test]
    fn test_registry_writable_between_steps() {
        let mut registry = registry_with(&[("a", "1"), ("c", "3")]);
        let mut traversal = Traversal::new("m");

        assert_eq!(traversal.step(&mut registry), delivered("a", "1"));
        registry.put("m", "b".to_string(), "2".to_string()).unwrap();
        registry.delete("m", "c");

        assert_eq!(traversal.step(&mut registry), delivered("b", "2"));
        assert_eq!(traversal.step(&mut registry), Step::Completed);
    }

    #[test]
    fn test_abandoned_traversal_leaves_map_usable() {
        let mut registry = registry_with(&[("a", "1"), ("b", "2")]);

        {
            let mut traversal = Traversal::new("m");
            traversal.step(&mut registry);
        }

        registry.put("m", "c".to_string(), "3".to_string()).unwrap();
        assert!(registry.begin_iteration("m"));
        assert_eq!(registry.next_entry("m").map(|(k, _)| k), Some("a".to_string()));
    }
}
