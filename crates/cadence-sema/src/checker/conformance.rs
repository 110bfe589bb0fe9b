//! Conformance checking.
//!
//! An interface inherits the members and nested types of every interface it
//! conforms to. Two conformances that bring a same-named member are only
//! compatible when the members have matching signatures and neither brings
//! an implementation or conditions; otherwise the inheriting interface is
//! ambiguous. Composites must implement what their conformances require.
//!
//! ```text
//!   A { fun f() {..} }     B { fun f() {..} }
//!            \                /
//!             C: A, B            -> MemberConflict on C
//! ```

use super::Checker;
use crate::error::{CompileError, ErrorKind};
use crate::types::{Member, NestedType, TypeId};
use cadence_ast::{CompositeDeclaration, Identifier, InterfaceDeclaration, NominalType};
use indexmap::IndexMap;
use tracing::trace;

impl Checker {
    /// Resolves the declared conformances of `ty` to interface types.
    pub(crate) fn resolve_conformances(&mut self, ty: TypeId, conformances: &[NominalType]) {
        let self_kind = self.arena.get(ty).declaration_kind();
        for nominal in conformances {
            let resolved = match self.lookup_nominal(nominal) {
                Some(NestedType::Interface(id)) if id == ty => {
                    self.report(CompileError::new(
                        ErrorKind::InvalidConformance,
                        nominal.span(),
                        format!("{self_kind} `{nominal}` cannot conform to itself"),
                    ));
                    continue;
                }
                Some(NestedType::Interface(id)) => id,
                Some(other) => {
                    let kind = other.declaration_kind(&self.arena);
                    self.report(CompileError::new(
                        ErrorKind::InvalidConformance,
                        nominal.span(),
                        format!("cannot conform to {kind} `{nominal}`: only interfaces can be conformed to"),
                    ));
                    continue;
                }
                None => {
                    self.report(CompileError::new(
                        ErrorKind::UndefinedName,
                        nominal.span(),
                        format!("cannot find interface `{nominal}` in this scope"),
                    ));
                    continue;
                }
            };
            self.arena
                .get_mut(ty)
                .explicit_conformances_mut()
                .insert(resolved);
        }
    }

    /// Conformances that lead back to the declaring interface.
    pub(crate) fn check_conformance_cycles(&mut self, ty: TypeId, identifier: &Identifier) {
        let cyclic: Vec<TypeId> = self
            .arena
            .get(ty)
            .explicit_conformances()
            .iter()
            .copied()
            .filter(|conformance| self.arena.is_ancestor(ty, *conformance))
            .collect();
        for conformance in cyclic {
            self.report(CompileError::new(
                ErrorKind::InvalidConformance,
                identifier.span,
                format!(
                    "`{}` conforms to `{}`, which conforms back to `{}`",
                    identifier,
                    self.type_name(conformance),
                    identifier
                ),
            ));
        }
    }

    /// Merges the explicit `conformance` into the interface being declared.
    ///
    /// `inherited_members` and `inherited_nested_types` are shared across all
    /// conformances of one interface. Conflicts further up the hierarchy are
    /// reported on the interface that inherits both sides.
    pub fn check_interface_conformance(
        &mut self,
        declaration: &InterfaceDeclaration,
        interface: TypeId,
        conformance: TypeId,
        inherited_members: &mut IndexMap<String, Member>,
        inherited_nested_types: &mut IndexMap<String, NestedType>,
    ) {
        trace!(
            interface = %declaration.identifier,
            conformance = %self.type_name(conformance),
            "merging conformance"
        );

        let interface_kind = self.arena.get(interface).composite_kind();
        let conformance_kind = self.arena.get(conformance).composite_kind();
        if interface_kind != conformance_kind {
            self.report(kind_mismatch(
                &declaration.identifier,
                self.arena.get(interface).declaration_kind().name(),
                &self.type_name(conformance),
                self.arena.get(conformance).declaration_kind().name(),
            ));
        }

        let conformance_members: Vec<Member> =
            self.arena.get(conformance).members().values().cloned().collect();
        for conformance_member in conformance_members {
            let name = conformance_member.name().to_string();

            if let Some(inherited) = inherited_members.get(&name).cloned() {
                self.check_duplicate_interface_member(
                    declaration,
                    &conformance_member,
                    &inherited,
                    &declaration.identifier,
                );
            }

            inherited_members.insert(name.clone(), conformance_member.clone());

            // re-read on every conformance, the member map is not snapshotted
            let own = self.arena.get(interface).member(&name).cloned();
            if let Some(own) = own {
                let identifier = own.identifier.clone();
                self.check_duplicate_interface_member(
                    declaration,
                    &own,
                    &conformance_member,
                    &identifier,
                );
            }
        }

        let conformance_nested: Vec<(String, NestedType)> = self
            .arena
            .get(conformance)
            .nested_types()
            .iter()
            .map(|(name, nested)| (name.clone(), *nested))
            .collect();
        for (name, nested) in conformance_nested {
            let Some(nested_id) = nested.composite_kinded() else {
                continue;
            };

            if let Some(inherited) = inherited_nested_types.get(&name).copied() {
                if let Some(inherited_id) = inherited.composite_kinded() {
                    if inherited_id != nested_id {
                        self.report(nested_type_conflict(
                            &declaration.identifier,
                            &name,
                            inherited.declaration_kind(&self.arena).name(),
                            nested.declaration_kind(&self.arena).name(),
                        ));
                    }
                }
            }
            inherited_nested_types.insert(name.clone(), nested);

            let own = self.arena.get(interface).nested_types().get(&name).copied();
            if let Some(own) = own.filter(|own| own.composite_kinded().is_some()) {
                self.report(nested_type_conflict(
                    &declaration.identifier,
                    &name,
                    own.declaration_kind(&self.arena).name(),
                    nested.declaration_kind(&self.arena).name(),
                ));
            }
        }
    }

    /// Reports at most one conflict between two same-named members.
    pub(crate) fn check_duplicate_interface_member(
        &mut self,
        declaration: &InterfaceDeclaration,
        first: &Member,
        second: &Member,
        at: &Identifier,
    ) {
        trace!(member = first.name(), "comparing inherited members");
        let matches = self
            .signatures
            .signatures_match(first, second, &self.arena);
        let reason = if !matches {
            "signatures do not match"
        } else if first.has_default() || second.has_default() {
            "at least one of them has an implementation or conditions"
        } else {
            return;
        };

        let error = CompileError::new(
            ErrorKind::MemberConflict,
            at.span,
            format!(
                "`{}` has conflicting {} `{}`: {reason}",
                declaration.identifier, first.declaration_kind, first.identifier
            ),
        )
        .with_label(
            first.identifier.span,
            format!("declared in `{}`", self.type_name(first.container)),
        )
        .with_label(
            second.identifier.span,
            format!("declared in `{}`", self.type_name(second.container)),
        );
        self.report(error);
    }

    /// Checks that a composite satisfies one of its conformances.
    ///
    /// `default_functions` collects functions inherited with a default
    /// implementation across all conformances of the composite.
    pub fn check_composite_conformance(
        &mut self,
        declaration: &CompositeDeclaration,
        composite: TypeId,
        conformance: TypeId,
        default_functions: &mut IndexMap<String, TypeId>,
    ) {
        trace!(
            composite = %declaration.identifier,
            conformance = %self.type_name(conformance),
            "checking composite conformance"
        );
        let composite_name = self.type_name(composite);
        let conformance_name = self.type_name(conformance);

        let composite_kind = self.arena.get(composite).composite_kind();
        let conformance_kind = self.arena.get(conformance).composite_kind();
        if composite_kind != conformance_kind {
            self.report(kind_mismatch(
                &declaration.identifier,
                self.arena.get(composite).declaration_kind().name(),
                &conformance_name,
                self.arena.get(conformance).declaration_kind().name(),
            ));
        }

        let required: Vec<Member> =
            self.arena.get(conformance).members().values().cloned().collect();
        for requirement in required {
            let name = requirement.name().to_string();
            let implementation = self.arena.get(composite).member(&name).cloned();
            match implementation {
                Some(implementation) => {
                    if !self
                        .signatures
                        .signatures_match(&implementation, &requirement, &self.arena)
                    {
                        self.report(
                            CompileError::new(
                                ErrorKind::ConformanceMismatch,
                                implementation.identifier.span,
                                format!(
                                    "`{composite_name}` does not conform to `{conformance_name}`: {} `{name}` does not match the requirement",
                                    implementation.declaration_kind
                                ),
                            )
                            .with_label(requirement.identifier.span, "required here".to_string()),
                        );
                    }
                }
                None if requirement.has_implementation => {
                    let previous = default_functions.get(&name).copied();
                    match previous {
                        Some(previous)
                            if previous != conformance
                                && !self.arena.is_ancestor(previous, conformance)
                                && !self.arena.is_ancestor(conformance, previous) =>
                        {
                            self.report(CompileError::new(
                                ErrorKind::DefaultFunctionConflict,
                                declaration.identifier.span,
                                format!(
                                    "`{composite_name}` inherits default implementations of `{name}` from `{}` and `{conformance_name}`",
                                    self.type_name(previous)
                                ),
                            ).with_note(format!("implement `{name}` in `{composite_name}`")));
                        }
                        // the most derived default wins
                        Some(previous) if self.arena.is_ancestor(previous, conformance) => {
                            default_functions.insert(name, conformance);
                        }
                        Some(_) => {}
                        None => {
                            default_functions.insert(name, conformance);
                        }
                    }
                }
                None => {
                    self.report(
                        CompileError::new(
                            ErrorKind::ConformanceMismatch,
                            declaration.identifier.span,
                            format!(
                                "`{composite_name}` does not conform to `{conformance_name}`: missing {} `{name}`",
                                requirement.declaration_kind
                            ),
                        )
                        .with_label(requirement.identifier.span, "required here".to_string()),
                    );
                }
            }
        }

        let requirements: Vec<(String, NestedType)> = self
            .arena
            .get(conformance)
            .nested_types()
            .iter()
            .filter(|(_, nested)| matches!(nested, NestedType::Composite(_)))
            .map(|(name, nested)| (name.clone(), *nested))
            .collect();
        for (name, requirement) in requirements {
            let provided = self.arena.get(composite).nested_types().get(&name).copied();
            let satisfied = match (provided, requirement) {
                (Some(NestedType::Composite(provided)), NestedType::Composite(required)) => {
                    self.arena.get(provided).composite_kind()
                        == self.arena.get(required).composite_kind()
                }
                _ => false,
            };
            if !satisfied {
                self.report(CompileError::new(
                    ErrorKind::ConformanceMismatch,
                    declaration.identifier.span,
                    format!(
                        "`{composite_name}` does not conform to `{conformance_name}`: missing nested {} `{name}`",
                        requirement.declaration_kind(&self.arena)
                    ),
                ));
            }
        }
    }
}

fn kind_mismatch(
    identifier: &Identifier,
    kind: &str,
    conformance: &str,
    conformance_kind: &str,
) -> CompileError {
    CompileError::new(
        ErrorKind::KindMismatch,
        identifier.span,
        format!("{kind} `{identifier}` cannot conform to {conformance_kind} `{conformance}`"),
    )
}

fn nested_type_conflict(
    identifier: &Identifier,
    name: &str,
    first_kind: &str,
    second_kind: &str,
) -> CompileError {
    CompileError::new(
        ErrorKind::NestedTypeConflict,
        identifier.span,
        format!(
            "`{identifier}` inherits conflicting nested types `{name}`: {first_kind} and {second_kind}"
        ),
    )
}
