// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Semantic checking of Cadence interface declarations
//!
//! Declares interface and composite types from a `cadence-ast` declaration
//! tree, merges multiple (including diamond) conformance, and checks access
//! control with primitive access levels and entitlement sets.
//!
//! Entry point is [`check_program`]; [`Checker`] exposes the individual
//! passes for drivers that interleave them with other checking.

pub mod access;
pub mod body;
pub mod checker;
pub mod config;
pub mod elaboration;
pub mod error;
pub mod scope;
pub mod signature;
pub mod types;

pub use access::{Access, EntitlementSetAccess};
pub use body::{BodyCheckOptions, BodyChecker, BodyContext, DefaultBodyChecker};
pub use checker::{check_program, CheckOutput, Checker};
pub use config::{AccessCheckMode, CheckerConfig, ConfigError};
pub use elaboration::Elaboration;
pub use error::{CompileError, DiagnosticFormatter, ErrorKind, InternalError, PassState, Severity};
pub use signature::{MemberSignatures, StructuralSignatures};
pub use types::{EntitlementId, Location, Member, NestedType, Type, TypeArena, TypeId};
