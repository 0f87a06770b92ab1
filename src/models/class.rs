//! Destination class model.

use serde::{Deserialize, Serialize};

/// A destination class: a named container with a target headcount and
/// the indices of the students currently assigned to it.
///
/// Member entries index into the snapshot's student table. String ids
/// are resolved to dense indices at ingestion; the optimizer never
/// performs keyed lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    /// Class name.
    pub name: String,
    /// Intended headcount.
    pub target: usize,
    /// Indices of assigned students.
    pub members: Vec<usize>,
}

impl Class {
    /// Creates an empty class.
    pub fn new(name: impl Into<String>, target: usize) -> Self {
        Self {
            name: name.into(),
            target,
            members: Vec::new(),
        }
    }

    /// Sets the membership.
    pub fn with_members(mut self, members: Vec<usize>) -> Self {
        self.members = members;
        self
    }

    /// Current headcount.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the class has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
