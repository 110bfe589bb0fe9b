//! Declaration and composite kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a composite or interface declaration.
///
/// The kind decides which declarations may conform to an interface: a
/// resource can only conform to resource interfaces, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompositeKind {
    Structure,
    Resource,
    Contract,
    Event,
    Enum,
}

impl CompositeKind {
    pub const ALL: [CompositeKind; 5] = [
        Self::Structure,
        Self::Resource,
        Self::Contract,
        Self::Event,
        Self::Enum,
    ];

    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Structure => "struct",
            Self::Resource => "resource",
            Self::Contract => "contract",
            Self::Event => "event",
            Self::Enum => "enum",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Resource => "resource",
            Self::Contract => "contract",
            Self::Event => "event",
            Self::Enum => "enum",
        }
    }

    /// Whether interfaces of this kind may be declared.
    pub const fn supports_interfaces(self) -> bool {
        matches!(self, Self::Structure | Self::Resource | Self::Contract)
    }

    /// Whether declarations of this kind may declare conformances.
    pub const fn supports_conformances(self) -> bool {
        self.supports_interfaces()
    }

    /// Whether declarations of this kind may contain nested type declarations.
    pub const fn supports_nesting(self) -> bool {
        matches!(self, Self::Contract)
    }

    /// Values of this kind are moved, never copied.
    pub const fn is_resource(self) -> bool {
        matches!(self, Self::Resource)
    }

    /// Declaration kind of an interface (`is_interface`) or composite of this kind.
    pub const fn declaration_kind(self, is_interface: bool) -> DeclarationKind {
        match (self, is_interface) {
            (Self::Structure, false) => DeclarationKind::Structure,
            (Self::Structure, true) => DeclarationKind::StructureInterface,
            (Self::Resource, false) => DeclarationKind::Resource,
            (Self::Resource, true) => DeclarationKind::ResourceInterface,
            (Self::Contract, false) => DeclarationKind::Contract,
            (Self::Contract, true) => DeclarationKind::ContractInterface,
            (Self::Event, _) => DeclarationKind::Event,
            (Self::Enum, _) => DeclarationKind::Enum,
        }
    }
}

impl fmt::Display for CompositeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a declaration declares, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclarationKind {
    Field,
    Function,
    Initializer,
    Destructor,
    Parameter,
    SelfValue,
    Structure,
    StructureInterface,
    Resource,
    ResourceInterface,
    Contract,
    ContractInterface,
    Event,
    Enum,
    Entitlement,
}

impl DeclarationKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Function => "function",
            Self::Initializer => "initializer",
            Self::Destructor => "destructor",
            Self::Parameter => "parameter",
            Self::SelfValue => "self",
            Self::Structure => "structure",
            Self::StructureInterface => "structure interface",
            Self::Resource => "resource",
            Self::ResourceInterface => "resource interface",
            Self::Contract => "contract",
            Self::ContractInterface => "contract interface",
            Self::Event => "event",
            Self::Enum => "enum",
            Self::Entitlement => "entitlement",
        }
    }

    pub const fn is_type_declaration(self) -> bool {
        matches!(
            self,
            Self::Structure
                | Self::StructureInterface
                | Self::Resource
                | Self::ResourceInterface
                | Self::Contract
                | Self::ContractInterface
                | Self::Event
                | Self::Enum
                | Self::Entitlement
        )
    }

    pub const fn is_interface_declaration(self) -> bool {
        matches!(
            self,
            Self::StructureInterface | Self::ResourceInterface | Self::ContractInterface
        )
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `let` (constant) or `var` (variable) field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableKind {
    Constant,
    Variable,
}

impl VariableKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Constant => "let",
            Self::Variable => "var",
        }
    }
}

/// Special functions are recognised by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialFunctionKind {
    Initializer,
    Destructor,
    Unknown,
}

impl SpecialFunctionKind {
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier {
            "init" => Self::Initializer,
            "destroy" => Self::Destructor,
            _ => Self::Unknown,
        }
    }

    pub const fn declaration_kind(self) -> Option<DeclarationKind> {
        match self {
            Self::Initializer => Some(DeclarationKind::Initializer),
            Self::Destructor => Some(DeclarationKind::Destructor),
            Self::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interface_support() {
        let supported: Vec<_> = CompositeKind::ALL
            .into_iter()
            .filter(|kind| kind.supports_interfaces())
            .collect();
        assert_eq!(
            supported,
            vec![
                CompositeKind::Structure,
                CompositeKind::Resource,
                CompositeKind::Contract
            ]
        );
    }

    #[test]
    fn test_declaration_kind_names() {
        assert_eq!(
            CompositeKind::Resource.declaration_kind(true).name(),
            "resource interface"
        );
        assert_eq!(
            CompositeKind::Resource.declaration_kind(false).name(),
            "resource"
        );
        assert!(DeclarationKind::ContractInterface.is_interface_declaration());
        assert!(!DeclarationKind::Function.is_type_declaration());
    }

    #[test]
    fn test_special_function_kinds() {
        assert_eq!(
            SpecialFunctionKind::from_identifier("init"),
            SpecialFunctionKind::Initializer
        );
        assert_eq!(
            SpecialFunctionKind::from_identifier("destroy"),
            SpecialFunctionKind::Destructor
        );
        assert_eq!(
            SpecialFunctionKind::from_identifier("prepare"),
            SpecialFunctionKind::Unknown
        );
    }
}
