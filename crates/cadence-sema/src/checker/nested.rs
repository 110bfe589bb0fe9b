//! Nested type declarations.
//!
//! The declare pass allocates a skeleton for every interface, composite and
//! entitlement declared inside a container and records it in the
//! container's nested-type map. Later passes re-bind those names with
//! [`Checker::declare_nested_types`] so member annotations can refer to them.

use super::Checker;
use crate::error::{CheckResult, CompileError, ErrorKind};
use crate::types::{EntitlementId, EntitlementType, NestedType, TypeId};
use cadence_ast::{CompositeKind, DeclId, EntitlementDeclaration, Identifier, Members, PrimitiveAccess};
use tracing::trace;

impl Checker {
    /// Allocates an entitlement and binds it in the current type scope.
    pub fn declare_entitlement(
        &mut self,
        decl: &EntitlementDeclaration,
    ) -> CheckResult<EntitlementId> {
        self.elaboration.begin(decl.id)?;
        let id = self.arena.alloc_entitlement(EntitlementType {
            location: self.config.location.clone(),
            identifier: decl.identifier.clone(),
            container: None,
        });
        self.elaboration.record_entitlement(decl.id, id);
        self.bind_type(&decl.identifier, NestedType::Entitlement(id));
        trace!(entitlement = %decl.identifier, "declared entitlement");
        Ok(id)
    }

    /// Entitlements take a primitive access other than `pub(set)`.
    pub(crate) fn check_entitlement_access(&mut self, decl: &EntitlementDeclaration) {
        match &decl.access {
            cadence_ast::Access::Primitive(PrimitiveAccess::PublicSettable)
            | cadence_ast::Access::Entitlements(_) => self.report(CompileError::new(
                ErrorKind::InvalidAccessModifier,
                decl.identifier.span,
                format!(
                    "invalid access modifier `{}` for entitlement `{}`",
                    decl.access.keyword(),
                    decl.identifier
                ),
            )),
            cadence_ast::Access::Primitive(PrimitiveAccess::NotSpecified)
                if self.config.access_check_mode.is_strict() =>
            {
                self.report(missing_access_modifier(&decl.identifier, "entitlement"))
            }
            cadence_ast::Access::Primitive(_) => {}
        }
    }

    /// Declares skeletons for everything nested in `members`.
    ///
    /// Runs inside a type scope entered by the caller; the nested names are
    /// bound in that scope.
    pub(crate) fn declare_nested_declarations(
        &mut self,
        container_decl: DeclId,
        container: TypeId,
        members: &Members,
    ) -> CheckResult<()> {
        let container_kind = self.arena.get(container).composite_kind();

        for nested in &members.interfaces {
            self.check_nesting(container, container_kind, &nested.identifier, nested.composite_kind);
            let id = self.declare_interface_type(nested)?;
            self.register_nested(container_decl, container, nested.id, &nested.identifier, NestedType::Interface(id));
        }

        for nested in &members.composites {
            self.check_nesting(container, container_kind, &nested.identifier, nested.composite_kind);
            let id = self.declare_composite_type(nested)?;
            self.register_nested(container_decl, container, nested.id, &nested.identifier, NestedType::Composite(id));
        }

        for nested in &members.entitlements {
            if !container_kind.supports_nesting() {
                self.report(invalid_nesting(
                    &nested.identifier,
                    "entitlement",
                    &self.type_name(container),
                ));
            }
            let id = self.declare_entitlement(nested)?;
            self.register_nested(container_decl, container, nested.id, &nested.identifier, NestedType::Entitlement(id));
        }

        Ok(())
    }

    fn check_nesting(
        &mut self,
        container: TypeId,
        container_kind: CompositeKind,
        identifier: &Identifier,
        kind: CompositeKind,
    ) {
        if kind == CompositeKind::Contract {
            self.report(CompileError::new(
                ErrorKind::InvalidNestedDeclaration,
                identifier.span,
                format!("contract `{identifier}` cannot be nested"),
            ));
        } else if !container_kind.supports_nesting() {
            self.report(invalid_nesting(identifier, kind.name(), &self.type_name(container)));
        }
    }

    fn register_nested(
        &mut self,
        container_decl: DeclId,
        container: TypeId,
        nested_decl: DeclId,
        identifier: &Identifier,
        nested: NestedType,
    ) {
        match nested {
            NestedType::Interface(id) | NestedType::Composite(id) => {
                self.arena.get_mut(id).set_container(container);
            }
            NestedType::Entitlement(id) => self.arena.set_entitlement_container(id, container),
        }
        self.arena
            .get_mut(container)
            .nested_types_mut()
            .entry(identifier.name.clone())
            .or_insert(nested);
        self.elaboration
            .record_nested_declaration(container_decl, &identifier.name, nested_decl);
    }

    /// Binds every nested type of `container` in the current type scope.
    pub fn declare_nested_types(&mut self, container: TypeId) {
        let nested: Vec<(String, NestedType)> = self
            .arena
            .get(container)
            .nested_types()
            .iter()
            .map(|(name, nested)| (name.clone(), *nested))
            .collect();
        for (name, nested) in nested {
            // duplicates were reported when the skeletons were declared
            let _ = self.types.bind(&name, nested);
        }
    }
}

fn invalid_nesting(identifier: &Identifier, kind: &str, container: &str) -> CompileError {
    CompileError::new(
        ErrorKind::InvalidNestedDeclaration,
        identifier.span,
        format!("{kind} `{identifier}` cannot be nested in `{container}`"),
    )
    .with_note("only contracts and contract interfaces may declare nested types".to_string())
}

pub(super) fn missing_access_modifier(identifier: &Identifier, kind: &str) -> CompileError {
    CompileError::new(
        ErrorKind::MissingAccessModifier,
        identifier.span,
        format!("{kind} `{identifier}` must declare an access modifier"),
    )
}
