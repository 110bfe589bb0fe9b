//! Access annotations as written in source.
//!
//! An access annotation is either one of the primitive levels or a set of
//! entitlement names joined by `,` (all required) or `|` (any suffices).
//! Entitlement names are unresolved here; the checker binds each name to
//! the declaration it refers to.

use crate::ast::NominalType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive access levels.
///
/// NOTE: declaration order is the permissiveness order, from least to most
/// permissive. The derived `Ord` relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PrimitiveAccess {
    NotSpecified = 0,
    Private = 1,
    Contract = 2,
    Account = 3,
    Public = 4,
    PublicSettable = 5,
}

impl PrimitiveAccess {
    pub const ALL: [PrimitiveAccess; 6] = [
        Self::NotSpecified,
        Self::Private,
        Self::Contract,
        Self::Account,
        Self::Public,
        Self::PublicSettable,
    ];

    /// Position in the permissiveness order.
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            Self::NotSpecified => "",
            Self::Private => "priv",
            Self::Contract => "access(contract)",
            Self::Account => "access(account)",
            Self::Public => "pub",
            Self::PublicSettable => "pub(set)",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::NotSpecified => "not specified",
            Self::Private => "private",
            Self::Contract => "contract",
            Self::Account => "account",
            Self::Public => "public",
            Self::PublicSettable => "public settable",
        }
    }

    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public | Self::PublicSettable)
    }
}

/// How the entitlements of a set combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Separator {
    /// `E1, E2`: every entitlement is required
    Conjunction,
    /// `E1 | E2`: any entitlement suffices
    Disjunction,
}

impl Separator {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conjunction => ", ",
            Self::Disjunction => " | ",
        }
    }
}

/// Entitlement names inside `access(...)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitlementSet {
    pub entitlements: Vec<NominalType>,
    pub separator: Separator,
}

impl EntitlementSet {
    pub fn conjunctive(entitlements: Vec<NominalType>) -> Self {
        Self {
            entitlements,
            separator: Separator::Conjunction,
        }
    }

    pub fn disjunctive(entitlements: Vec<NominalType>) -> Self {
        Self {
            entitlements,
            separator: Separator::Disjunction,
        }
    }
}

/// Access annotation of a declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Access {
    Primitive(PrimitiveAccess),
    Entitlements(EntitlementSet),
}

impl Access {
    pub const NOT_SPECIFIED: Access = Access::Primitive(PrimitiveAccess::NotSpecified);

    pub fn is_not_specified(&self) -> bool {
        matches!(self, Access::Primitive(PrimitiveAccess::NotSpecified))
    }

    pub fn description(&self) -> &'static str {
        match self {
            Access::Primitive(primitive) => primitive.description(),
            Access::Entitlements(_) => "entitled access",
        }
    }

    /// Source form, e.g. `pub` or `access(Withdraw | Deposit)`.
    pub fn keyword(&self) -> String {
        match self {
            Access::Primitive(primitive) => primitive.keyword().to_string(),
            Access::Entitlements(set) => {
                let names: Vec<String> = set.entitlements.iter().map(|e| e.to_string()).collect();
                format!("access({})", names.join(set.separator.as_str()))
            }
        }
    }
}

impl Default for Access {
    fn default() -> Self {
        Self::NOT_SPECIFIED
    }
}

impl From<PrimitiveAccess> for Access {
    fn from(primitive: PrimitiveAccess) -> Self {
        Access::Primitive(primitive)
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.keyword())
    }
}
