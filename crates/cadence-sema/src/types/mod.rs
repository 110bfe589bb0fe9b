//! Semantic types and the arena of declared nominal types.
//!
//! # Design
//!
//! - `Type`: resolved type of a member, parameter or local
//! - `TypeArena`: owns every declared interface, composite and entitlement;
//!   everything else refers to them by `TypeId` / `EntitlementId`
//! - `Member`: resolved field, function or special function of a declared type

mod arena;

pub use arena::{
    CompositeType, EntitlementType, InterfaceType, Member, NestedType, Parameter, TypeArena,
    TypeDef,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of an interface or composite in the [`TypeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

/// Handle of an entitlement in the [`TypeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntitlementId(pub u32);

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{}", self.0)
    }
}

impl fmt::Display for EntitlementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entitlement#{}", self.0)
    }
}

/// Location of the program being checked, e.g. `A.0x01.Vaults`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Type ID of `qualified_identifier` declared at this location.
    pub fn type_id(&self, qualified_identifier: &str) -> String {
        if self.0.is_empty() {
            qualified_identifier.to_string()
        } else {
            format!("{}.{}", self.0, qualified_identifier)
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Built-in types, resolved by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Void,
    Never,
    Bool,
    String,
    Character,
    Address,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Fix64,
    UFix64,
    AnyStruct,
    AnyResource,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 20] = [
        Self::Void,
        Self::Never,
        Self::Bool,
        Self::String,
        Self::Character,
        Self::Address,
        Self::Int,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::UInt,
        Self::UInt8,
        Self::UInt16,
        Self::UInt32,
        Self::UInt64,
        Self::Fix64,
        Self::UFix64,
        Self::AnyStruct,
        Self::AnyResource,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Void => "Void",
            Self::Never => "Never",
            Self::Bool => "Bool",
            Self::String => "String",
            Self::Character => "Character",
            Self::Address => "Address",
            Self::Int => "Int",
            Self::Int8 => "Int8",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::UInt => "UInt",
            Self::UInt8 => "UInt8",
            Self::UInt16 => "UInt16",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::Fix64 => "Fix64",
            Self::UFix64 => "UFix64",
            Self::AnyStruct => "AnyStruct",
            Self::AnyResource => "AnyResource",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|primitive| primitive.name() == name)
    }
}

/// Signature of a function member or function-typed value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionType {
    pub parameters: Vec<Type>,
    pub return_type: Box<Type>,
}

impl FunctionType {
    pub fn new(parameters: Vec<Type>, return_type: Type) -> Self {
        Self {
            parameters,
            return_type: Box::new(return_type),
        }
    }
}

/// Resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Primitive(PrimitiveType),
    /// Declared interface or composite
    Nominal(TypeId),
    Optional(Box<Type>),
    VariableSized(Box<Type>),
    Dictionary(Box<Type>, Box<Type>),
    Function(FunctionType),
    Reference(Box<Type>),
    /// Failed to resolve; already reported, never reported again
    Invalid,
}

impl Type {
    pub const VOID: Type = Type::Primitive(PrimitiveType::Void);

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Primitive(PrimitiveType::Void))
    }

    /// Whether the type, or any type it is built from, failed to resolve.
    pub fn is_invalid(&self) -> bool {
        match self {
            Type::Invalid => true,
            Type::Primitive(_) | Type::Nominal(_) => false,
            Type::Optional(inner) | Type::VariableSized(inner) | Type::Reference(inner) => {
                inner.is_invalid()
            }
            Type::Dictionary(key, value) => key.is_invalid() || value.is_invalid(),
            Type::Function(function) => {
                function.return_type.is_invalid()
                    || function.parameters.iter().any(Type::is_invalid)
            }
        }
    }

    /// Values of the type must be moved and explicitly destroyed.
    pub fn is_resource(&self, arena: &TypeArena) -> bool {
        match self {
            Type::Primitive(primitive) => *primitive == PrimitiveType::AnyResource,
            Type::Nominal(id) => arena.get(*id).composite_kind().is_resource(),
            Type::Optional(inner) | Type::VariableSized(inner) => inner.is_resource(arena),
            Type::Dictionary(key, value) => key.is_resource(arena) || value.is_resource(arena),
            Type::Function(_) | Type::Reference(_) | Type::Invalid => false,
        }
    }

    /// Values of the type can be kept in account storage.
    pub fn is_storable(&self, arena: &TypeArena) -> bool {
        match self {
            Type::Primitive(primitive) => {
                !matches!(primitive, PrimitiveType::Void | PrimitiveType::Never)
            }
            Type::Nominal(id) => arena.get(*id).composite_kind() != cadence_ast::CompositeKind::Event,
            Type::Optional(inner) | Type::VariableSized(inner) => inner.is_storable(arena),
            Type::Dictionary(key, value) => key.is_storable(arena) && value.is_storable(arena),
            Type::Function(_) | Type::Reference(_) => false,
            Type::Invalid => true,
        }
    }

    /// Source-like rendering with declared names looked up in `arena`.
    pub fn display(&self, arena: &TypeArena) -> String {
        match self {
            Type::Primitive(primitive) => primitive.name().to_string(),
            Type::Nominal(id) => arena.qualified_identifier(*id),
            Type::Optional(inner) => format!("{}?", inner.display(arena)),
            Type::VariableSized(element) => format!("[{}]", element.display(arena)),
            Type::Dictionary(key, value) => {
                format!("{{{}: {}}}", key.display(arena), value.display(arena))
            }
            Type::Function(function) => {
                let params: Vec<String> = function
                    .parameters
                    .iter()
                    .map(|param| param.display(arena))
                    .collect();
                format!(
                    "fun({}): {}",
                    params.join(", "),
                    function.return_type.display(arena)
                )
            }
            Type::Reference(inner) => format!("&{}", inner.display(arena)),
            Type::Invalid => "<invalid>".to_string(),
        }
    }
}
