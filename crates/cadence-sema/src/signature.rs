//! Member signature comparison.
//!
//! The conformance checker asks a [`MemberSignatures`] implementation
//! whether two same-named members agree. [`StructuralSignatures`] is the
//! default: kinds, types and argument labels must be equal, and the first
//! member may not be less accessible than the second.

use crate::access::Access;
use crate::config::AccessCheckMode;
use crate::types::{Member, Type, TypeArena};
use tracing::trace;

pub trait MemberSignatures {
    /// Whether `first` can stand in for `second`.
    fn signatures_match(&self, first: &Member, second: &Member, arena: &TypeArena) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralSignatures {
    access_check_mode: AccessCheckMode,
}

impl StructuralSignatures {
    pub fn new(access_check_mode: AccessCheckMode) -> Self {
        Self { access_check_mode }
    }

    /// Access of `member` after its container's default applies.
    pub fn effective_access(&self, member: &Member, arena: &TypeArena) -> Access {
        if arena.get(member.container).is_interface() {
            member.access.effective_interface_member_access()
        } else {
            member
                .access
                .effective_composite_member_access(self.access_check_mode)
        }
    }
}

impl MemberSignatures for StructuralSignatures {
    fn signatures_match(&self, first: &Member, second: &Member, arena: &TypeArena) -> bool {
        if first.declaration_kind != second.declaration_kind {
            trace!(member = first.name(), "declaration kinds differ");
            return false;
        }
        if first.variable_kind != second.variable_kind {
            trace!(member = first.name(), "variable kinds differ");
            return false;
        }
        if !types_agree(&first.ty, &second.ty) || first.argument_labels != second.argument_labels {
            trace!(member = first.name(), "types differ");
            return false;
        }
        if self.access_check_mode != AccessCheckMode::None {
            let first_access = self.effective_access(first, arena);
            let second_access = self.effective_access(second, arena);
            // equal entitlement sets are subsets of each other
            if first_access.is_less_permissive_than(&second_access)
                && !second_access.is_less_permissive_than(&first_access)
            {
                trace!(member = first.name(), "access is narrower");
                return false;
            }
        }
        true
    }
}

/// Structural equality where an unresolved type agrees with anything in
/// its position.
fn types_agree(first: &Type, second: &Type) -> bool {
    match (first, second) {
        (Type::Invalid, _) | (_, Type::Invalid) => true,
        (Type::Optional(a), Type::Optional(b))
        | (Type::VariableSized(a), Type::VariableSized(b))
        | (Type::Reference(a), Type::Reference(b)) => types_agree(a, b),
        (Type::Dictionary(key_a, value_a), Type::Dictionary(key_b, value_b)) => {
            types_agree(key_a, key_b) && types_agree(value_a, value_b)
        }
        (Type::Function(a), Type::Function(b)) => {
            a.parameters.len() == b.parameters.len()
                && a.parameters
                    .iter()
                    .zip(&b.parameters)
                    .all(|(a, b)| types_agree(a, b))
                && types_agree(&a.return_type, &b.return_type)
        }
        _ => first == second,
    }
}
