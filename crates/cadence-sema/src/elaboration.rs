//! Side tables the checker fills in while it walks declarations.
//!
//! The elaboration links declaration ids to arena handles, remembers which
//! nested declarations belong to which container, and tracks how far each
//! declaration has progressed through the passes. Downstream consumers
//! (interpreter, tooling) read it after checking.

use crate::error::{CheckResult, InternalError, PassState};
use crate::types::{EntitlementId, TypeId};
use cadence_ast::{DeclId, Span};
use indexmap::IndexMap;

#[derive(Debug, Clone, Default)]
pub struct Elaboration {
    types: IndexMap<DeclId, TypeId>,
    declarations: IndexMap<TypeId, DeclId>,
    entitlements: IndexMap<DeclId, EntitlementId>,
    nested_declarations: IndexMap<DeclId, IndexMap<String, DeclId>>,
    pass_states: IndexMap<DeclId, PassState>,
    member_origins: IndexMap<(TypeId, String), Span>,
}

impl Elaboration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_type(&mut self, declaration: DeclId, ty: TypeId) {
        self.types.insert(declaration, ty);
        self.declarations.insert(ty, declaration);
    }

    /// Type declared by `declaration` in the declare pass.
    pub fn type_of(&self, declaration: DeclId) -> CheckResult<TypeId> {
        self.types
            .get(&declaration)
            .copied()
            .ok_or(InternalError::MissingElaboration { declaration })
    }

    pub fn declaration_of(&self, ty: TypeId) -> Option<DeclId> {
        self.declarations.get(&ty).copied()
    }

    pub fn record_entitlement(&mut self, declaration: DeclId, entitlement: EntitlementId) {
        self.entitlements.insert(declaration, entitlement);
    }

    pub fn entitlement_of(&self, declaration: DeclId) -> Option<EntitlementId> {
        self.entitlements.get(&declaration).copied()
    }

    pub fn record_nested_declaration(&mut self, container: DeclId, name: &str, nested: DeclId) {
        self.nested_declarations
            .entry(container)
            .or_default()
            .entry(name.to_string())
            .or_insert(nested);
    }

    pub fn nested_declaration(&self, container: DeclId, name: &str) -> CheckResult<DeclId> {
        self.nested_declarations
            .get(&container)
            .and_then(|nested| nested.get(name))
            .copied()
            .ok_or_else(|| InternalError::MissingNestedDeclaration {
                container,
                name: name.to_string(),
            })
    }

    /// Nested declarations of `container` in declaration order.
    pub fn nested_declarations(&self, container: DeclId) -> impl Iterator<Item = (&str, DeclId)> {
        self.nested_declarations
            .get(&container)
            .into_iter()
            .flat_map(|nested| nested.iter().map(|(name, id)| (name.as_str(), *id)))
    }

    pub fn pass_state(&self, declaration: DeclId) -> Option<PassState> {
        self.pass_states.get(&declaration).copied()
    }

    /// Marks `declaration` as type-declared. Declaring twice is a fault.
    pub fn begin(&mut self, declaration: DeclId) -> CheckResult<()> {
        if self.pass_states.contains_key(&declaration) {
            return Err(InternalError::AlreadyDeclared { declaration });
        }
        self.pass_states.insert(declaration, PassState::TypeDeclared);
        Ok(())
    }

    /// Moves `declaration` from `expected` to `next`.
    pub fn advance(
        &mut self,
        declaration: DeclId,
        expected: PassState,
        next: PassState,
    ) -> CheckResult<()> {
        self.require(declaration, expected)?;
        self.pass_states.insert(declaration, next);
        Ok(())
    }

    pub fn require(&self, declaration: DeclId, expected: PassState) -> CheckResult<()> {
        let found = self.pass_state(declaration);
        if found != Some(expected) {
            return Err(InternalError::PassOutOfOrder {
                declaration,
                expected,
                found,
            });
        }
        Ok(())
    }

    pub fn record_member_origin(&mut self, ty: TypeId, member: &str, span: Span) {
        self.member_origins.insert((ty, member.to_string()), span);
    }

    /// Declaration site of a member, when position info is recorded.
    pub fn member_origin(&self, ty: TypeId, member: &str) -> Option<Span> {
        self.member_origins.get(&(ty, member.to_string())).copied()
    }

    pub fn member_origin_count(&self) -> usize {
        self.member_origins.len()
    }
}
