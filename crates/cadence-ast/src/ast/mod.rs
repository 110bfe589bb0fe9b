//! Declaration tree node types.
//!
//! The tree is produced by the parser (not part of this workspace) or built
//! directly with the constructors below. Nodes carry spans for diagnostics;
//! type-declaring nodes also carry a [`DeclId`](crate::DeclId).

mod declaration;
mod members;
mod statement;
mod types;

pub use declaration::{
    CompositeDeclaration, Declaration, EntitlementDeclaration, InterfaceDeclaration, Program,
};
pub use members::{
    Condition, FieldDeclaration, FunctionBlock, FunctionDeclaration, Members, Parameter,
    SpecialFunctionDeclaration,
};
pub use statement::{Block, Expression, Statement, Transfer};
pub use types::{Identifier, NominalType, TypeAnnotation, TypeExpr};
