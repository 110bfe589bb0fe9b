//! Type-declaring nodes: interfaces, composites and entitlements.
//!
//! # Examples
//!
//! ```
//! use cadence_ast::*;
//!
//! let mut ids = NodeIds::new();
//! let vault = InterfaceDeclaration::new(
//!     &mut ids,
//!     PrimitiveAccess::Public,
//!     CompositeKind::Resource,
//!     Identifier::synthetic("Vault"),
//! )
//! .with_function(
//!     FunctionDeclaration::new(PrimitiveAccess::Public, Identifier::synthetic("balance"))
//!         .returning(TypeAnnotation::named("UFix64")),
//! );
//!
//! assert_eq!(vault.declaration_kind(), DeclarationKind::ResourceInterface);
//! assert_eq!(vault.members.functions.len(), 1);
//! ```

use super::members::{FieldDeclaration, FunctionDeclaration, Members, SpecialFunctionDeclaration};
use super::types::{Identifier, NominalType};
use crate::access::Access;
use crate::foundation::{DeclId, NodeIds, Span};
use crate::kinds::{CompositeKind, DeclarationKind};
use serde::{Deserialize, Serialize};

/// Top-level declarations of one compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub declarations: Vec<Declaration>,
}

impl Program {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self { declarations }
    }

    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceDeclaration> {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Interface(interface) => Some(interface),
            _ => None,
        })
    }

    pub fn composites(&self) -> impl Iterator<Item = &CompositeDeclaration> {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Composite(composite) => Some(composite),
            _ => None,
        })
    }

    pub fn entitlements(&self) -> impl Iterator<Item = &EntitlementDeclaration> {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Entitlement(entitlement) => Some(entitlement),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Declaration {
    Interface(InterfaceDeclaration),
    Composite(CompositeDeclaration),
    Entitlement(EntitlementDeclaration),
}

impl Declaration {
    pub fn id(&self) -> DeclId {
        match self {
            Declaration::Interface(decl) => decl.id,
            Declaration::Composite(decl) => decl.id,
            Declaration::Entitlement(decl) => decl.id,
        }
    }

    pub fn identifier(&self) -> &Identifier {
        match self {
            Declaration::Interface(decl) => &decl.identifier,
            Declaration::Composite(decl) => &decl.identifier,
            Declaration::Entitlement(decl) => &decl.identifier,
        }
    }
}

impl From<InterfaceDeclaration> for Declaration {
    fn from(decl: InterfaceDeclaration) -> Self {
        Declaration::Interface(decl)
    }
}

impl From<CompositeDeclaration> for Declaration {
    fn from(decl: CompositeDeclaration) -> Self {
        Declaration::Composite(decl)
    }
}

impl From<EntitlementDeclaration> for Declaration {
    fn from(decl: EntitlementDeclaration) -> Self {
        Declaration::Entitlement(decl)
    }
}

/// `pub resource interface I: J, K { .. }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDeclaration {
    pub id: DeclId,
    pub access: Access,
    pub composite_kind: CompositeKind,
    pub identifier: Identifier,
    pub conformances: Vec<NominalType>,
    pub members: Members,
    pub doc_string: Option<String>,
    pub span: Span,
}

impl InterfaceDeclaration {
    pub fn new(
        ids: &mut NodeIds,
        access: impl Into<Access>,
        composite_kind: CompositeKind,
        identifier: Identifier,
    ) -> Self {
        Self {
            id: ids.fresh(),
            access: access.into(),
            composite_kind,
            span: identifier.span,
            identifier,
            conformances: Vec::new(),
            members: Members::default(),
            doc_string: None,
        }
    }

    pub fn declaration_kind(&self) -> DeclarationKind {
        self.composite_kind.declaration_kind(true)
    }

    pub fn end_span(&self) -> Span {
        self.span
    }
}

/// `pub resource R: I { .. }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeDeclaration {
    pub id: DeclId,
    pub access: Access,
    pub composite_kind: CompositeKind,
    pub identifier: Identifier,
    pub conformances: Vec<NominalType>,
    pub members: Members,
    pub doc_string: Option<String>,
    pub span: Span,
}

impl CompositeDeclaration {
    pub fn new(
        ids: &mut NodeIds,
        access: impl Into<Access>,
        composite_kind: CompositeKind,
        identifier: Identifier,
    ) -> Self {
        Self {
            id: ids.fresh(),
            access: access.into(),
            composite_kind,
            span: identifier.span,
            identifier,
            conformances: Vec::new(),
            members: Members::default(),
            doc_string: None,
        }
    }

    pub fn declaration_kind(&self) -> DeclarationKind {
        self.composite_kind.declaration_kind(false)
    }
}

/// `pub entitlement Withdraw`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitlementDeclaration {
    pub id: DeclId,
    pub access: Access,
    pub identifier: Identifier,
    pub doc_string: Option<String>,
    pub span: Span,
}

impl EntitlementDeclaration {
    pub fn new(ids: &mut NodeIds, access: impl Into<Access>, identifier: Identifier) -> Self {
        Self {
            id: ids.fresh(),
            access: access.into(),
            span: identifier.span,
            identifier,
            doc_string: None,
        }
    }
}

/// Fluent member builders shared by interfaces and composites.
macro_rules! member_builders {
    ($ty:ty) => {
        impl $ty {
            pub fn conforming_to(mut self, conformance: NominalType) -> Self {
                self.conformances.push(conformance);
                self
            }

            pub fn with_field(mut self, field: FieldDeclaration) -> Self {
                self.members.fields.push(field);
                self
            }

            pub fn with_function(mut self, function: FunctionDeclaration) -> Self {
                self.members.functions.push(function);
                self
            }

            pub fn with_special_function(mut self, function: FunctionDeclaration) -> Self {
                self.members
                    .special_functions
                    .push(SpecialFunctionDeclaration::new(function));
                self
            }

            pub fn with_interface(mut self, interface: InterfaceDeclaration) -> Self {
                self.members.interfaces.push(interface);
                self
            }

            pub fn with_composite(mut self, composite: CompositeDeclaration) -> Self {
                self.members.composites.push(composite);
                self
            }

            pub fn with_entitlement(mut self, entitlement: EntitlementDeclaration) -> Self {
                self.members.entitlements.push(entitlement);
                self
            }

            pub fn with_span(mut self, span: Span) -> Self {
                self.span = span;
                self
            }
        }
    };
}

member_builders!(InterfaceDeclaration);
member_builders!(CompositeDeclaration);
