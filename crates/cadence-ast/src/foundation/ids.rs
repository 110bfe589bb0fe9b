//! Stable identity for declaration nodes.
//!
//! The semantic checker never relies on node addresses. Every interface,
//! composite and entitlement declaration carries a [`DeclId`] handed out by
//! a [`NodeIds`] generator when the tree is built, and elaboration tables
//! are keyed by it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one declaration node within a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclId(pub u32);

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decl#{}", self.0)
    }
}

/// Monotonic [`DeclId`] generator.
///
/// One generator must be used per program so that ids are unique.
#[derive(Debug, Default, Clone)]
pub struct NodeIds {
    next: u32,
}

impl NodeIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next unused id.
    pub fn fresh(&mut self) -> DeclId {
        let id = DeclId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u32 {
        self.next
    }
}
