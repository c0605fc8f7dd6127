//! Occurrence payloads stored on terminal nodes.

use std::fmt;

use smallvec::SmallVec;

/// Occurrence metadata that can absorb the metadata of a duplicate insert.
pub trait Payload {
    /// Fold `other` into `self`, keeping insertion order.
    fn merge(&mut self, other: Self);

    /// Number of occurrences recorded.
    fn occurrences(&self) -> usize;

    /// A payload with no occurrences is a contract violation on insert.
    fn is_empty(&self) -> bool {
        self.occurrences() == 0
    }
}

/// Source positions of a word, in the order they were recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Positions(SmallVec<[usize; 4]>);

impl Positions {
    /// A single occurrence at `position`.
    pub fn new(position: usize) -> Self {
        let mut positions = SmallVec::new();
        positions.push(position);
        Self(positions)
    }

    /// Record another occurrence.
    pub fn push(&mut self, position: usize) {
        self.0.push(position);
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn first(&self) -> Option<usize> {
        self.0.first().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Payload for Positions {
    fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    fn occurrences(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<usize>> for Positions {
    fn from(positions: Vec<usize>) -> Self {
        Self(SmallVec::from_vec(positions))
    }
}

impl FromIterator<usize> for Positions {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Positions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, position) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{position}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_order() {
        let mut p = Positions::new(4);
        p.merge(Positions::new(1));
        p.merge(Positions::from(vec![9, 2]));

        assert_eq!(p.as_slice(), &[4, 1, 9, 2]);
        assert_eq!(p.occurrences(), 4);
        assert_eq!(p.first(), Some(4));
    }

    #[test]
    fn test_empty() {
        let p = Positions::default();
        assert!(Payload::is_empty(&p));
        assert!(!Payload::is_empty(&Positions::new(0)));
    }

    #[test]
    fn test_display() {
        let p: Positions = [1, 4, 7].into_iter().collect();
        assert_eq!(p.to_string(), "[1, 4, 7]");
    }
}
