//! Source tracking and declaration identity.

pub mod ids;
pub mod span;

pub use ids::{DeclId, NodeIds};
pub use span::{SourceFile, SourceMap, Span};
