//! # reduced-trie
//!
//! A path-compressed prefix tree indexing words together with the positions
//! at which they occur.
//!
//! Words are ASCII letters, matched case-insensitively. Chains of nodes that
//! do not branch are folded into a single edge, on insert as well as after a
//! deletion.
//!
//! ## Example
//!
//! ```rust
//! use reduced_trie::{Positions, ReducedTrie};
//!
//! let mut trie: ReducedTrie<Positions> = ReducedTrie::new();
//! trie.insert("do", Positions::new(1));
//! trie.insert("dorm", Positions::new(4));
//! trie.insert("doll", Positions::new(7));
//! trie.insert("Dorm", Positions::new(9));
//!
//! assert_eq!(trie.search("dorm").unwrap().as_slice(), &[4, 9]);
//! assert_eq!(trie.autocomplete("do"), vec!["do", "dorm", "doll"]);
//!
//! trie.delete("do");
//! assert!(trie.search("do").is_none());
//! assert!(trie.verify_integrity().is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod arena;
pub mod error;
pub mod ingest;
pub mod payload;
pub mod trie;

pub use error::{Error, Result};
pub use ingest::{load_words, read_words, IngestStats};
pub use payload::{Payload, Positions};
pub use trie::{InsertOutcome, NodeRef, ReducedTrie};

/// Configuration for a [`ReducedTrie`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Initial capacity hint for the number of nodes
    pub initial_capacity: usize,
    /// Run the integrity check after every insert and delete, panicking on
    /// the first violation. Expensive; meant for tests and debugging.
    pub check_invariants: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            check_invariants: false,
        }
    }
}

#[cfg(test)]
mod proptests;
