//! Resolved access model and its permissiveness order.
//!
//! Access is a closed sum of primitive levels and entitlement sets. The
//! "less permissive than" relation is a partial order:
//!
//! | `self` \ `other` | Primitive              | Entitlement   |
//! |------------------|------------------------|---------------|
//! | Primitive        | ordinal `<`            | never         |
//! | Entitlement      | other is public        | subset        |
//!
//! The conjunctive/disjunctive separator only matters when access is
//! enforced at runtime; it plays no part in the declared order.
//!
//! # Examples
//!
//! ```
//! use cadence_sema::access::{Access, EntitlementSetAccess};
//! use cadence_sema::types::EntitlementId;
//! use cadence_ast::PrimitiveAccess;
//!
//! let e1 = EntitlementId(0);
//! let e2 = EntitlementId(1);
//! let narrow = Access::Entitlement(EntitlementSetAccess::conjunctive([e1]));
//! let wide = Access::Entitlement(EntitlementSetAccess::disjunctive([e1, e2]));
//!
//! assert!(narrow.is_less_permissive_than(&wide));
//! assert!(!wide.is_less_permissive_than(&narrow));
//! assert!(wide.is_less_permissive_than(&Access::Primitive(PrimitiveAccess::Public)));
//! ```

use crate::config::AccessCheckMode;
use crate::types::{EntitlementId, TypeArena};
use cadence_ast::{PrimitiveAccess, Separator};
use indexmap::IndexSet;

/// Set of entitlements gating a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitlementSetAccess {
    entitlements: IndexSet<EntitlementId>,
    separator: Separator,
}

impl EntitlementSetAccess {
    pub fn new(entitlements: impl IntoIterator<Item = EntitlementId>, separator: Separator) -> Self {
        Self {
            entitlements: entitlements.into_iter().collect(),
            separator,
        }
    }

    pub fn conjunctive(entitlements: impl IntoIterator<Item = EntitlementId>) -> Self {
        Self::new(entitlements, Separator::Conjunction)
    }

    pub fn disjunctive(entitlements: impl IntoIterator<Item = EntitlementId>) -> Self {
        Self::new(entitlements, Separator::Disjunction)
    }

    pub fn entitlements(&self) -> impl Iterator<Item = EntitlementId> + '_ {
        self.entitlements.iter().copied()
    }

    pub fn separator(&self) -> Separator {
        self.separator
    }

    pub fn len(&self) -> usize {
        self.entitlements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entitlements.is_empty()
    }

    /// Every entitlement of `self` also appears in `other`.
    pub fn is_subset(&self, other: &EntitlementSetAccess) -> bool {
        self.entitlements
            .iter()
            .all(|entitlement| other.entitlements.contains(entitlement))
    }
}

/// Resolved access of a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Primitive(PrimitiveAccess),
    Entitlement(EntitlementSetAccess),
}

impl Access {
    pub const NOT_SPECIFIED: Access = Access::Primitive(PrimitiveAccess::NotSpecified);
    pub const PUBLIC: Access = Access::Primitive(PrimitiveAccess::Public);
    pub const PRIVATE: Access = Access::Primitive(PrimitiveAccess::Private);

    /// Whether `self` grants strictly less than `other`.
    pub fn is_less_permissive_than(&self, other: &Access) -> bool {
        match (self, other) {
            (Access::Primitive(this), Access::Primitive(other)) => this.ordinal() < other.ordinal(),
            (Access::Entitlement(_), Access::Primitive(other)) => other.is_public(),
            (Access::Entitlement(this), Access::Entitlement(other)) => this.is_subset(other),
            (Access::Primitive(_), Access::Entitlement(_)) => false,
        }
    }

    pub fn is_primitive(&self, primitive: PrimitiveAccess) -> bool {
        matches!(self, Access::Primitive(this) if *this == primitive)
    }

    pub fn is_entitlement(&self) -> bool {
        matches!(self, Access::Entitlement(_))
    }

    pub fn entitlements(&self) -> Option<&EntitlementSetAccess> {
        match self {
            Access::Entitlement(set) => Some(set),
            Access::Primitive(_) => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Access::Primitive(primitive) => primitive.description(),
            Access::Entitlement(_) => "entitled access",
        }
    }

    /// Source form with entitlement names looked up in `arena`.
    pub fn keyword(&self, arena: &TypeArena) -> String {
        match self {
            Access::Primitive(primitive) => primitive.keyword().to_string(),
            Access::Entitlement(set) => {
                let names: Vec<String> = set
                    .entitlements()
                    .map(|id| arena.entitlement_qualified_identifier(id))
                    .collect();
                format!("access({})", names.join(set.separator().as_str()))
            }
        }
    }

    /// Access of an interface member once the "not specified" default applies.
    pub fn effective_interface_member_access(&self) -> Access {
        if self.is_primitive(PrimitiveAccess::NotSpecified) {
            Access::PUBLIC
        } else {
            self.clone()
        }
    }

    /// Access of a composite member once the "not specified" default applies.
    pub fn effective_composite_member_access(&self, mode: AccessCheckMode) -> Access {
        if !self.is_primitive(PrimitiveAccess::NotSpecified) {
            return self.clone();
        }
        match mode {
            AccessCheckMode::Strict | AccessCheckMode::NotSpecifiedRestricted => Access::PRIVATE,
            AccessCheckMode::NotSpecifiedUnrestricted | AccessCheckMode::None => Access::PUBLIC,
        }
    }
}

impl From<PrimitiveAccess> for Access {
    fn from(primitive: PrimitiveAccess) -> Self {
        Access::Primitive(primitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entitled(ids: &[u32]) -> Access {
        Access::Entitlement(EntitlementSetAccess::conjunctive(
            ids.iter().map(|id| EntitlementId(*id)),
        ))
    }

    #[test]
    fn test_primitive_order() {
        let private = Access::PRIVATE;
        let public = Access::PUBLIC;
        assert!(private.is_less_permissive_than(&public));
        assert!(!public.is_less_permissive_than(&private));
        assert!(!public.is_less_permissive_than(&public));
        assert!(Access::NOT_SPECIFIED.is_less_permissive_than(&private));
    }

    #[test]
    fn test_entitlement_vs_primitive() {
        let access = entitled(&[0]);
        assert!(access.is_less_permissive_than(&Access::PUBLIC));
        assert!(access.is_less_permissive_than(&PrimitiveAccess::PublicSettable.into()));
        assert!(!access.is_less_permissive_than(&PrimitiveAccess::Account.into()));
        assert!(!access.is_less_permissive_than(&Access::NOT_SPECIFIED));
    }

    #[test]
    fn test_primitive_never_less_than_entitlement() {
        for primitive in PrimitiveAccess::ALL {
            assert!(!Access::from(primitive).is_less_permissive_than(&entitled(&[0, 1])));
        }
    }

    #[test]
    fn test_entitlement_subset() {
        let a = entitled(&[1]);
        let b = entitled(&[1, 2]);
        assert!(a.is_less_permissive_than(&b));
        assert!(!b.is_less_permissive_than(&a));
        // the order is reflexive on sets: a subset of itself
        assert!(a.is_less_permissive_than(&a));
        assert!(entitled(&[]).is_less_permissive_than(&a));
    }

    #[test]
    fn test_separator_is_ignored_by_the_order() {
        let conjunctive = Access::Entitlement(EntitlementSetAccess::conjunctive([
            EntitlementId(0),
        ]));
        let disjunctive = Access::Entitlement(EntitlementSetAccess::disjunctive([
            EntitlementId(0),
            EntitlementId(3),
        ]));
        assert!(conjunctive.is_less_permissive_than(&disjunctive));
        assert!(!disjunctive.is_less_permissive_than(&conjunctive));
    }

    #[test]
    fn test_set_equality_ignores_order() {
        let a = EntitlementSetAccess::conjunctive([EntitlementId(1), EntitlementId(2)]);
        let b = EntitlementSetAccess::conjunctive([EntitlementId(2), EntitlementId(1), EntitlementId(1)]);
        assert_eq!(a, b);
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_effective_member_access() {
        assert_eq!(
            Access::NOT_SPECIFIED.effective_interface_member_access(),
            Access::PUBLIC
        );
        assert_eq!(
            Access::NOT_SPECIFIED.effective_composite_member_access(AccessCheckMode::Strict),
            Access::PRIVATE
        );
        assert_eq!(
            Access::NOT_SPECIFIED
                .effective_composite_member_access(AccessCheckMode::NotSpecifiedUnrestricted),
            Access::PUBLIC
        );
        let account: Access = PrimitiveAccess::Account.into();
        assert_eq!(
            account.effective_composite_member_access(AccessCheckMode::Strict),
            account
        );
    }
}
