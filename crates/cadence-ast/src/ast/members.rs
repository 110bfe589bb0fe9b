use super::declaration::{CompositeDeclaration, EntitlementDeclaration, InterfaceDeclaration};
use super::statement::{Block, Expression};
use super::types::{Identifier, TypeAnnotation};
use crate::access::Access;
use crate::foundation::Span;
use crate::kinds::{SpecialFunctionKind, VariableKind};
use serde::{Deserialize, Serialize};

/// Field of a composite or interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub access: Access,
    pub variable_kind: VariableKind,
    pub identifier: Identifier,
    pub type_annotation: TypeAnnotation,
    pub doc_string: Option<String>,
    pub span: Span,
}

impl FieldDeclaration {
    pub fn new(
        access: impl Into<Access>,
        variable_kind: VariableKind,
        identifier: Identifier,
        type_annotation: TypeAnnotation,
    ) -> Self {
        Self {
            access: access.into(),
            variable_kind,
            span: identifier.span,
            identifier,
            type_annotation,
            doc_string: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Argument label, `None` when the identifier doubles as the label
    pub label: Option<String>,
    pub identifier: Identifier,
    pub type_annotation: TypeAnnotation,
}

impl Parameter {
    pub fn new(name: &str, type_annotation: TypeAnnotation) -> Self {
        Self {
            label: None,
            identifier: Identifier::synthetic(name),
            type_annotation,
        }
    }

    pub fn unlabeled(name: &str, type_annotation: TypeAnnotation) -> Self {
        Self {
            label: Some("_".to_string()),
            ..Self::new(name, type_annotation)
        }
    }

    /// Label callers must write, `_` for none.
    pub fn effective_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.identifier.name)
    }
}

/// Pre- or post-condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub test: Expression,
    pub message: Option<String>,
    pub span: Span,
}

impl Condition {
    pub fn new(test: Expression) -> Self {
        Self {
            span: test.span(),
            test,
            message: None,
        }
    }
}

/// `{ pre { .. } post { .. } statements }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionBlock {
    pub block: Block,
    pub pre_conditions: Vec<Condition>,
    pub post_conditions: Vec<Condition>,
    pub span: Span,
}

impl FunctionBlock {
    pub fn new(block: Block) -> Self {
        Self {
            span: block.span,
            block,
            pre_conditions: Vec::new(),
            post_conditions: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Block::empty())
    }

    pub fn with_pre_condition(mut self, condition: Condition) -> Self {
        self.pre_conditions.push(condition);
        self
    }

    pub fn with_post_condition(mut self, condition: Condition) -> Self {
        self.post_conditions.push(condition);
        self
    }

    pub fn has_statements(&self) -> bool {
        !self.block.is_empty()
    }

    pub fn has_conditions(&self) -> bool {
        !self.pre_conditions.is_empty() || !self.post_conditions.is_empty()
    }

    pub fn start_span(&self) -> Span {
        self.span
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub access: Access,
    pub identifier: Identifier,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeAnnotation>,
    pub function_block: Option<FunctionBlock>,
    pub doc_string: Option<String>,
    pub span: Span,
}

impl FunctionDeclaration {
    pub fn new(access: impl Into<Access>, identifier: Identifier) -> Self {
        Self {
            access: access.into(),
            span: identifier.span,
            identifier,
            parameters: Vec::new(),
            return_type: None,
            function_block: None,
            doc_string: None,
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn returning(mut self, return_type: TypeAnnotation) -> Self {
        self.return_type = Some(return_type);
        self
    }

    pub fn with_body(mut self, function_block: FunctionBlock) -> Self {
        self.function_block = Some(function_block);
        self
    }

    pub fn has_statements(&self) -> bool {
        self.function_block
            .as_ref()
            .is_some_and(FunctionBlock::has_statements)
    }

    pub fn has_conditions(&self) -> bool {
        self.function_block
            .as_ref()
            .is_some_and(FunctionBlock::has_conditions)
    }
}

/// `init`, `destroy`, or a function with a reserved-looking but unknown name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialFunctionDeclaration {
    pub kind: SpecialFunctionKind,
    pub function: FunctionDeclaration,
}

impl SpecialFunctionDeclaration {
    pub fn new(function: FunctionDeclaration) -> Self {
        Self {
            kind: SpecialFunctionKind::from_identifier(&function.identifier.name),
            function,
        }
    }
}

/// Body of a composite or interface declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Members {
    pub fields: Vec<FieldDeclaration>,
    pub functions: Vec<FunctionDeclaration>,
    pub special_functions: Vec<SpecialFunctionDeclaration>,
    pub interfaces: Vec<InterfaceDeclaration>,
    pub composites: Vec<CompositeDeclaration>,
    pub entitlements: Vec<EntitlementDeclaration>,
}

impl Members {
    pub fn initializers(&self) -> impl Iterator<Item = &SpecialFunctionDeclaration> {
        self.special_functions_of(SpecialFunctionKind::Initializer)
    }

    pub fn destructors(&self) -> impl Iterator<Item = &SpecialFunctionDeclaration> {
        self.special_functions_of(SpecialFunctionKind::Destructor)
    }

    fn special_functions_of(
        &self,
        kind: SpecialFunctionKind,
    ) -> impl Iterator<Item = &SpecialFunctionDeclaration> {
        self.special_functions
            .iter()
            .filter(move |special| special.kind == kind)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.iter().find(|field| field.identifier.name == name)
    }

    /// Identifiers of nested type declarations in source order:
    /// interfaces, composites, then entitlements.
    pub fn nested_identifiers(&self) -> impl Iterator<Item = &Identifier> {
        self.interfaces
            .iter()
            .map(|decl| &decl.identifier)
            .chain(self.composites.iter().map(|decl| &decl.identifier))
            .chain(self.entitlements.iter().map(|decl| &decl.identifier))
    }

    pub fn has_nested_declarations(&self) -> bool {
        !(self.interfaces.is_empty() && self.composites.is_empty() && self.entitlements.is_empty())
    }
}
