// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Declaration tree for Cadence semantic checking
//!
//! This crate contains the already-parsed declaration tree consumed by
//! `cadence-sema`: interface, composite and entitlement declarations, their
//! members, access annotations and source spans. It performs no checking.

pub mod access;
pub mod ast;
pub mod foundation;
pub mod kinds;

pub use access::{Access, EntitlementSet, PrimitiveAccess, Separator};
pub use ast::*;
pub use foundation::{DeclId, NodeIds, SourceFile, SourceMap, Span};
pub use kinds::{CompositeKind, DeclarationKind, SpecialFunctionKind, VariableKind};
