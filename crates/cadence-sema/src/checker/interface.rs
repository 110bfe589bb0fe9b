//! Interface declarations through the three passes.

use super::members::ContainerRole;
use super::Checker;
use crate::error::{CheckResult, CompileError, ErrorKind, PassState};
use crate::types::{InterfaceType, NestedType, TypeId};
use cadence_ast::InterfaceDeclaration;
use indexmap::IndexMap;
use tracing::debug;

impl Checker {
    /// Declare pass: allocates the interface type, binds its name in the
    /// current type scope and declares nested skeletons.
    pub fn declare_interface_type(&mut self, decl: &InterfaceDeclaration) -> CheckResult<TypeId> {
        debug!(interface = %decl.identifier, id = %decl.id, "declaring interface type");
        self.elaboration.begin(decl.id)?;

        let mut interface = InterfaceType::new(
            self.config.location.clone(),
            decl.identifier.clone(),
            decl.composite_kind,
        );
        interface.doc_string = decl.doc_string.clone();
        let ty = self.arena.alloc_interface(interface);
        self.elaboration.record_type(decl.id, ty);
        self.bind_type(&decl.identifier, NestedType::Interface(ty));

        if !decl.composite_kind.supports_interfaces() {
            self.report(
                CompileError::new(
                    ErrorKind::InvalidInterfaceDeclaration,
                    decl.identifier.span,
                    format!(
                        "{} interfaces are not supported",
                        decl.composite_kind.name()
                    ),
                )
                .with_note("interfaces can be structures, resources or contracts".to_string()),
            );
        }

        self.with_type_scope(|c| c.declare_nested_declarations(decl.id, ty, &decl.members))?;
        Ok(ty)
    }

    /// Member pass: resolves conformances and builds the member map of the
    /// interface and of everything nested in it.
    pub fn declare_interface_members(&mut self, decl: &InterfaceDeclaration) -> CheckResult<()> {
        let ty = self.elaboration.type_of(decl.id)?;
        self.elaboration
            .advance(decl.id, PassState::TypeDeclared, PassState::MembersDeclared)?;
        debug!(interface = %decl.identifier, "declaring interface members");

        self.resolve_conformances(ty, &decl.conformances);

        self.with_type_scope(|c| {
            c.declare_nested_types(ty);
            c.declare_members(ty, &decl.members);
            c.check_field_storability(ty);

            for nested in &decl.members.interfaces {
                c.declare_interface_members(nested)?;
            }
            for nested in &decl.members.composites {
                c.declare_composite_members(nested)?;
            }
            Ok(())
        })
    }

    /// Check pass for an interface declaration.
    pub fn visit_interface_declaration(&mut self, decl: &InterfaceDeclaration) -> CheckResult<()> {
        let ty = self.elaboration.type_of(decl.id)?;
        self.elaboration
            .advance(decl.id, PassState::MembersDeclared, PassState::Checked)?;
        debug!(interface = %decl.identifier, "checking interface");

        self.check_declaration_access_modifier(
            &decl.access,
            &decl.identifier,
            decl.declaration_kind(),
        );

        self.check_conformance_cycles(ty, &decl.identifier);

        let mut inherited_members = IndexMap::new();
        let mut inherited_nested_types = IndexMap::new();
        let conformances: Vec<TypeId> =
            self.arena.get(ty).explicit_conformances().iter().copied().collect();
        for conformance in conformances {
            self.check_interface_conformance(
                decl,
                ty,
                conformance,
                &mut inherited_members,
                &mut inherited_nested_types,
            );
        }

        self.check_fields_access_modifier(ty, &decl.members.fields);
        self.check_nested_identifiers(ty, &decl.members);
        for entitlement in &decl.members.entitlements {
            self.check_entitlement_access(entitlement);
        }

        self.with_type_scope(|c| {
            c.declare_nested_types(ty);

            c.check_initializers(ty, &decl.members, ContainerRole::Interface);
            c.check_unknown_special_functions(&decl.members);
            c.check_special_function_default_implementation(ty, &decl.members);
            c.check_interface_functions(ty, &decl.members.functions);
            c.check_resource_field_nesting(ty);
            c.check_destructors(ty, &decl.members, ContainerRole::Interface);

            // interfaces first, then type requirements
            for nested in &decl.members.interfaces {
                c.visit_interface_declaration(nested)?;
            }
            for nested in &decl.members.composites {
                c.visit_type_requirement(nested)?;
            }
            Ok(())
        })
    }
}
