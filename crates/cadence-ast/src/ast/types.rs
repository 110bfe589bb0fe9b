use crate::foundation::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name with its source location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// Identifier without a meaningful location.
    pub fn synthetic(name: impl Into<String>) -> Self {
        Self::new(name, Span::synthetic())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Reference to a declared type by (possibly qualified) name, e.g. `C.R`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NominalType {
    pub identifier: Identifier,
    /// Segments after the first, for nested types
    pub nested_identifiers: Vec<Identifier>,
}

impl NominalType {
    pub fn new(identifier: Identifier) -> Self {
        Self {
            identifier,
            nested_identifiers: Vec::new(),
        }
    }

    pub fn simple(name: &str) -> Self {
        Self::new(Identifier::synthetic(name))
    }

    /// `qualified(&["C", "R"])` is `C.R`.
    pub fn qualified(segments: &[&str]) -> Self {
        let mut iter = segments.iter();
        let first = iter.next().copied().unwrap_or_default();
        Self {
            identifier: Identifier::synthetic(first),
            nested_identifiers: iter.map(|name| Identifier::synthetic(*name)).collect(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.identifier.span = span;
        self
    }

    pub fn span(&self) -> Span {
        match self.nested_identifiers.last() {
            Some(last) => self.identifier.span.to(&last.span),
            None => self.identifier.span,
        }
    }
}

impl fmt::Display for NominalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier.name)?;
        for nested in &self.nested_identifiers {
            write!(f, ".{}", nested.name)?;
        }
        Ok(())
    }
}

/// Unresolved type expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeExpr {
    Nominal(NominalType),
    /// `T?`
    Optional(Box<TypeExpr>),
    /// `[T]`
    VariableSized(Box<TypeExpr>),
    /// `{K: V}`
    Dictionary {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    /// `fun(P1, P2): R`
    Function {
        parameters: Vec<TypeExpr>,
        return_type: Box<TypeExpr>,
    },
    /// `&T`
    Reference(Box<TypeExpr>),
}

impl TypeExpr {
    pub fn named(name: &str) -> Self {
        TypeExpr::Nominal(NominalType::simple(name))
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Nominal(nominal) => write!(f, "{nominal}"),
            TypeExpr::Optional(inner) => write!(f, "{inner}?"),
            TypeExpr::VariableSized(element) => write!(f, "[{element}]"),
            TypeExpr::Dictionary { key, value } => write!(f, "{{{key}: {value}}}"),
            TypeExpr::Function {
                parameters,
                return_type,
            } => {
                let params: Vec<String> = parameters.iter().map(ToString::to_string).collect();
                write!(f, "fun({}): {return_type}", params.join(", "))
            }
            TypeExpr::Reference(inner) => write!(f, "&{inner}"),
        }
    }
}

/// Type expression with its location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeAnnotation {
    pub ty: TypeExpr,
    pub span: Span,
}

impl TypeAnnotation {
    pub fn new(ty: TypeExpr, span: Span) -> Self {
        Self { ty, span }
    }

    pub fn named(name: &str) -> Self {
        Self::new(TypeExpr::named(name), Span::synthetic())
    }
}
