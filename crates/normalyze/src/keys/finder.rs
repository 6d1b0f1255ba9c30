//! Bounded generate-and-test search for minimal candidate keys.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::fd::{closure, FunctionalDependency};

use super::CancelToken;

/// Configuration for the candidate key search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeySearchConfig {
    /// Maximum total key size explored before falling back.
    pub max_key_size: usize,
}

impl Default for KeySearchConfig {
    fn default() -> Self {
        Self { max_key_size: 4 }
    }
}

/// Outcome of a key search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeySearch {
    /// The keys found. Never empty: when the bounded search finds nothing,
    /// the full attribute set is returned as a single (possibly non-minimal)
    /// fallback key.
    pub keys: Vec<BTreeSet<String>>,
    /// False when the result is the fallback (bound exceeded or cancelled);
    /// callers should treat an incomplete result as lower-confidence, not as
    /// a failure.
    pub complete: bool,
}

/// Searches for minimal attribute sets whose closure spans the universe.
///
/// The search is bottom-up and bounded: it seeds every candidate with the
/// attributes that can never be derived (those appearing in no dependent
/// position), grows combinations up to `max_key_size`, and stops at the
/// first size that yields any minimal key. Equally valid keys of larger
/// sizes are deliberately not explored; this is an accepted approximation
/// that keeps cost bounded.
pub struct CandidateKeyFinder {
    attributes: Vec<String>,
    fds: Vec<FunctionalDependency>,
    config: KeySearchConfig,
}

impl CandidateKeyFinder {
    /// Create a finder with the default size bound.
    pub fn new(attributes: Vec<String>, fds: Vec<FunctionalDependency>) -> Self {
        Self::with_config(attributes, fds, KeySearchConfig::default())
    }

    /// Create a finder with a custom size bound.
    pub fn with_config(
        attributes: Vec<String>,
        fds: Vec<FunctionalDependency>,
        config: KeySearchConfig,
    ) -> Self {
        Self {
            attributes,
            fds,
            config,
        }
    }

    /// Attributes that never appear as a dependent in any FD.
    ///
    /// Under this engine's heuristic FD set they cannot be derived from
    /// anything else, so every candidate key must contain them.
    pub fn must_include_attributes(&self) -> BTreeSet<String> {
        let dependents: BTreeSet<&str> =
            self.fds.iter().map(|fd| fd.dependent.as_str()).collect();
        self.attributes
            .iter()
            .filter(|attr| !dependents.contains(attr.as_str()))
            .cloned()
            .collect()
    }

    /// True if the set's closure spans the entire attribute universe.
    pub fn is_superkey(&self, set: &BTreeSet<String>) -> bool {
        closure(set, &self.fds).len() == self.attributes.len()
    }

    /// True if removing any single attribute breaks the superkey property.
    pub fn is_minimal(&self, superkey: &BTreeSet<String>) -> bool {
        superkey.iter().all(|attr| {
            let mut reduced = superkey.clone();
            reduced.remove(attr);
            !self.is_superkey(&reduced)
        })
    }

    /// Run the search with no external cancellation.
    pub fn find(&self) -> KeySearch {
        self.find_with_cancel(&CancelToken::new())
    }

    /// Run the search, checking `token` between combination attempts.
    ///
    /// Cancellation yields the full-attribute fallback flagged incomplete; it
    /// is never an error.
    pub fn find_with_cancel(&self, token: &CancelToken) -> KeySearch {
        let must_include = self.must_include_attributes();

        if self.is_superkey(&must_include) {
            return KeySearch {
                keys: vec![must_include],
                complete: true,
            };
        }

        let others: Vec<String> = self
            .attributes
            .iter()
            .filter(|attr| !must_include.contains(*attr))
            .cloned()
            .collect();

        let max_size = self.config.max_key_size.min(self.attributes.len());

        for size in (must_include.len() + 1)..=max_size {
            let mut found = Vec::new();

            for combo in Combinations::new(&others, size - must_include.len()) {
                if token.is_cancelled() {
                    return self.fallback();
                }

                let candidate: BTreeSet<String> =
                    must_include.iter().cloned().chain(combo).collect();

                if self.is_superkey(&candidate) && self.is_minimal(&candidate) {
                    found.push(candidate);
                }
            }

            // Early termination: the first size with minimal keys wins.
            if !found.is_empty() {
                return KeySearch {
                    keys: found,
                    complete: true,
                };
            }
        }

        self.fallback()
    }

    fn fallback(&self) -> KeySearch {
        KeySearch {
            keys: vec![self.attributes.iter().cloned().collect()],
            complete: false,
        }
    }
}

/// Iterator over all k-combinations of a slice, in index order.
struct Combinations<'a> {
    items: &'a [String],
    indices: Vec<usize>,
    done: bool,
}

impl<'a> Combinations<'a> {
    fn new(items: &'a [String], k: usize) -> Self {
        let done = k > items.len();
        Self {
            items,
            indices: (0..k).collect(),
            done,
        }
    }
}

impl Iterator for Combinations<'_> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let combo: Vec<String> = self
            .indices
            .iter()
            .map(|&i| self.items[i].clone())
            .collect();

        // Advance to the next index tuple.
        let k = self.indices.len();
        if k == 0 {
            self.done = true;
            return Some(combo);
        }
        let mut i = k;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.indices[i] < self.items.len() - (k - i) {
                self.indices[i] += 1;
                for j in (i + 1)..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }
        }

        Some(combo)
    }
}
