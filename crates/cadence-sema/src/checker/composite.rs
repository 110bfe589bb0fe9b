//! Composite declarations through the three passes.
//!
//! Composites nested in an interface are type requirements: conformers must
//! declare a composite of the same name and kind. Their bodies follow the
//! interface rules, so functions may be left without an implementation.

use super::members::ContainerRole;
use super::Checker;
use crate::error::{CheckResult, CompileError, ErrorKind, PassState};
use crate::types::{CompositeType, NestedType, TypeId};
use cadence_ast::CompositeDeclaration;
use indexmap::IndexMap;
use tracing::debug;

impl Checker {
    /// Declare pass: allocates the composite type, binds its name in the
    /// current type scope and declares nested skeletons.
    pub fn declare_composite_type(&mut self, decl: &CompositeDeclaration) -> CheckResult<TypeId> {
        debug!(composite = %decl.identifier, id = %decl.id, "declaring composite type");
        self.elaboration.begin(decl.id)?;

        let mut composite = CompositeType::new(
            self.config.location.clone(),
            decl.identifier.clone(),
            decl.composite_kind,
        );
        composite.doc_string = decl.doc_string.clone();
        let ty = self.arena.alloc_composite(composite);
        self.elaboration.record_type(decl.id, ty);
        self.bind_type(&decl.identifier, NestedType::Composite(ty));

        self.with_type_scope(|c| c.declare_nested_declarations(decl.id, ty, &decl.members))?;
        Ok(ty)
    }

    /// Member pass for a composite and everything nested in it.
    pub fn declare_composite_members(&mut self, decl: &CompositeDeclaration) -> CheckResult<()> {
        let ty = self.elaboration.type_of(decl.id)?;
        self.elaboration
            .advance(decl.id, PassState::TypeDeclared, PassState::MembersDeclared)?;
        debug!(composite = %decl.identifier, "declaring composite members");

        if !decl.composite_kind.supports_conformances() {
            if let Some(first) = decl.conformances.first() {
                self.report(CompileError::new(
                    ErrorKind::InvalidConformance,
                    first.span(),
                    format!(
                        "{} `{}` cannot conform to interfaces",
                        decl.declaration_kind(),
                        decl.identifier
                    ),
                ));
            }
        } else {
            self.resolve_conformances(ty, &decl.conformances);
        }

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

    /// Check pass for a concrete composite declaration.
    pub fn visit_composite_declaration(&mut self, decl: &CompositeDeclaration) -> CheckResult<()> {
        self.visit_composite(decl, ContainerRole::Composite)
    }

    /// Check pass for a composite nested in an interface.
    pub(crate) fn visit_type_requirement(&mut self, decl: &CompositeDeclaration) -> CheckResult<()> {
        self.visit_composite(decl, ContainerRole::TypeRequirement)
    }

    fn visit_composite(&mut self, decl: &CompositeDeclaration, role: ContainerRole) -> CheckResult<()> {
        let ty = self.elaboration.type_of(decl.id)?;
        self.elaboration
            .advance(decl.id, PassState::MembersDeclared, PassState::Checked)?;
        debug!(composite = %decl.identifier, ?role, "checking composite");

        self.check_declaration_access_modifier(
            &decl.access,
            &decl.identifier,
            decl.declaration_kind(),
        );

        if role == ContainerRole::Composite {
            let mut default_functions = IndexMap::new();
            for conformance in self.arena.effective_conformances(ty) {
                self.check_composite_conformance(decl, ty, conformance, &mut default_functions);
            }
            if let Some(composite) = self.arena.composite_mut(ty) {
                composite.default_functions = default_functions;
            }
        }

        self.check_fields_access_modifier(ty, &decl.members.fields);
        self.check_nested_identifiers(ty, &decl.members);
        for entitlement in &decl.members.entitlements {
            self.check_entitlement_access(entitlement);
        }

        self.with_type_scope(|c| {
            c.declare_nested_types(ty);

            c.check_initializers(ty, &decl.members, role);
            c.check_unknown_special_functions(&decl.members);
            if role.is_interface_like() {
                c.check_special_function_default_implementation(ty, &decl.members);
            }
            c.check_composite_functions(ty, &decl.members.functions, role);
            c.check_resource_field_nesting(ty);
            c.check_destructors(ty, &decl.members, role);

            for nested in &decl.members.interfaces {
                c.visit_interface_declaration(nested)?;
            }
            for nested in &decl.members.composites {
                if role.is_interface_like() {
                    c.visit_type_requirement(nested)?;
                } else {
                    c.visit_composite_declaration(nested)?;
                }
            }
            Ok(())
        })
    }
}
