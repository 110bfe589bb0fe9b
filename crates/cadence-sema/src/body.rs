//! Function body checking.
//!
//! Declaration checking only decides *which* obligations a body has; the
//! [`BodyChecker`] enforces them. [`DefaultBodyChecker`] covers the
//! statement shapes of the declaration tree: definite exit, name
//! resolution and loss of resource locals.

use crate::error::{CompileError, ErrorKind};
use crate::scope::{TypeActivations, ValueActivations, ValueBinding};
use crate::types::{NestedType, Type, TypeArena};
use cadence_ast::{
    Block, Condition, DeclarationKind, Expression, FunctionDeclaration, Identifier, Span,
    Statement, Transfer,
};
use indexmap::IndexMap;
use tracing::trace;

/// Obligations of one function body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BodyCheckOptions {
    /// Every path must return (or panic) when the function returns a value
    pub must_exit: bool,
    /// Resource locals must be moved or destroyed
    pub check_resource_loss: bool,
}

impl BodyCheckOptions {
    pub const NONE: BodyCheckOptions = BodyCheckOptions {
        must_exit: false,
        check_resource_loss: false,
    };

    pub const IMPLEMENTATION: BodyCheckOptions = BodyCheckOptions {
        must_exit: true,
        check_resource_loss: true,
    };
}

/// What a body checker may read and where it reports.
pub struct BodyContext<'a> {
    pub arena: &'a TypeArena,
    pub types: &'a TypeActivations,
    /// Function scope with `self` and the parameters already bound
    pub values: &'a mut ValueActivations,
    pub diagnostics: &'a mut Vec<CompileError>,
}

pub trait BodyChecker {
    fn check_function_body(
        &self,
        cx: &mut BodyContext<'_>,
        function: &FunctionDeclaration,
        return_type: &Type,
        options: BodyCheckOptions,
    );
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBodyChecker;

impl BodyChecker for DefaultBodyChecker {
    fn check_function_body(
        &self,
        cx: &mut BodyContext<'_>,
        function: &FunctionDeclaration,
        return_type: &Type,
        options: BodyCheckOptions,
    ) {
        let Some(function_block) = &function.function_block else {
            return;
        };
        trace!(function = %function.identifier, ?options, "checking body");

        for condition in &function_block.pre_conditions {
            check_condition(cx, condition);
        }

        let mut walker = BodyWalker {
            resources: IndexMap::new(),
        };
        cx.values.push();
        walker.check_block(cx, &function_block.block);
        cx.values.pop();

        if !function_block.post_conditions.is_empty() {
            cx.values.push();
            if !return_type.is_void() {
                let _ = cx.values.bind(
                    "result",
                    ValueBinding {
                        ty: return_type.clone(),
                        declaration_kind: DeclarationKind::SelfValue,
                        span: function.identifier.span,
                    },
                );
            }
            for condition in &function_block.post_conditions {
                check_condition(cx, condition);
            }
            cx.values.pop();
        }

        if options.must_exit
            && !return_type.is_void()
            && !return_type.is_invalid()
            && !definitely_exits(&function_block.block)
        {
            cx.diagnostics.push(CompileError::new(
                ErrorKind::MissingReturn,
                function.identifier.span,
                format!(
                    "function `{}` must return a value of type `{}` on every path",
                    function.identifier,
                    return_type.display(cx.arena)
                ),
            ));
        }

        if options.check_resource_loss {
            for (name, (span, consumed)) in walker.resources {
                if !consumed {
                    cx.diagnostics.push(
                        CompileError::new(
                            ErrorKind::ResourceLoss,
                            span,
                            format!("resource `{name}` is neither moved nor destroyed"),
                        )
                        .with_note(format!("move it with `<-{name}` or `destroy {name}`")),
                    );
                }
            }
        }
    }
}

/// Whether control cannot fall off the end of `block`.
pub fn definitely_exits(block: &Block) -> bool {
    block.statements.iter().any(|statement| match statement {
        Statement::Return { .. } => true,
        Statement::Expression {
            expression: Expression::Call { callee, .. },
            ..
        } => callee.name == "panic",
        Statement::If {
            then_block,
            else_block: Some(else_block),
            ..
        } => definitely_exits(then_block) && definitely_exits(else_block),
        _ => false,
    })
}

fn check_condition(cx: &mut BodyContext<'_>, condition: &Condition) {
    BodyWalker {
        resources: IndexMap::new(),
    }
    .check_expression(cx, &condition.test);
}

struct BodyWalker {
    /// Resource locals: declaration span, moved or destroyed
    resources: IndexMap<String, (Span, bool)>,
}

impl BodyWalker {
    fn check_block(&mut self, cx: &mut BodyContext<'_>, block: &Block) {
        for statement in &block.statements {
            self.check_statement(cx, statement);
        }
    }

    fn check_statement(&mut self, cx: &mut BodyContext<'_>, statement: &Statement) {
        match statement {
            Statement::Return { value, .. } => {
                if let Some(value) = value {
                    self.check_expression(cx, value);
                }
            }
            Statement::Expression { expression, .. } => self.check_expression(cx, expression),
            Statement::If {
                test,
                then_block,
                else_block,
                ..
            } => {
                self.check_expression(cx, test);
                cx.values.push();
                self.check_block(cx, then_block);
                cx.values.pop();
                if let Some(else_block) = else_block {
                    cx.values.push();
                    self.check_block(cx, else_block);
                    cx.values.pop();
                }
            }
            Statement::Let {
                identifier,
                transfer,
                value,
                span,
            } => {
                self.check_expression(cx, value);
                let ty = local_type(cx, value);
                if *transfer == Transfer::Move || ty.is_resource(cx.arena) {
                    self.resources
                        .insert(identifier.name.clone(), (*span, false));
                }
                self.bind_local(cx, identifier, ty);
            }
            Statement::Destroy { expression, .. } => {
                self.consume(expression);
                self.check_expression(cx, expression);
            }
        }
    }

    fn check_expression(&mut self, cx: &mut BodyContext<'_>, expression: &Expression) {
        match expression {
            Expression::Identifier(identifier) => {
                if cx.values.find(&identifier.name).is_none() {
                    cx.diagnostics.push(CompileError::new(
                        ErrorKind::UndefinedName,
                        identifier.span,
                        format!("cannot find value `{identifier}` in this scope"),
                    ));
                }
            }
            Expression::Literal { .. } => {}
            Expression::Move { expression, .. } => {
                self.consume(expression);
                self.check_expression(cx, expression);
            }
            Expression::Call { arguments, .. } => {
                for argument in arguments {
                    self.check_expression(cx, argument);
                }
            }
            Expression::Member { target, .. } => self.check_expression(cx, target),
            Expression::Create { ty, arguments, .. } => {
                if !matches!(cx.types.find(&ty.name), Some(NestedType::Composite(_))) {
                    cx.diagnostics.push(CompileError::new(
                        ErrorKind::UndefinedName,
                        ty.span,
                        format!("cannot find composite type `{ty}` in this scope"),
                    ));
                }
                for argument in arguments {
                    self.check_expression(cx, argument);
                }
            }
        }
    }

    fn consume(&mut self, expression: &Expression) {
        if let Expression::Identifier(identifier) = expression {
            if let Some((_, consumed)) = self.resources.get_mut(&identifier.name) {
                *consumed = true;
            }
        }
    }

    fn bind_local(&mut self, cx: &mut BodyContext<'_>, identifier: &Identifier, ty: Type) {
        let binding = ValueBinding {
            ty,
            declaration_kind: DeclarationKind::Field,
            span: identifier.span,
        };
        if cx.values.bind(&identifier.name, binding).is_err() {
            cx.diagnostics.push(CompileError::new(
                ErrorKind::Redeclaration,
                identifier.span,
                format!("cannot redeclare `{identifier}` in the same scope"),
            ));
        }
    }
}

/// Shallow type of a local's initial value; unknown shapes are `Invalid`.
fn local_type(cx: &BodyContext<'_>, value: &Expression) -> Type {
    match value {
        Expression::Identifier(identifier) => cx
            .values
            .find(&identifier.name)
            .map(|binding| binding.ty.clone())
            .unwrap_or(Type::Invalid),
        Expression::Move { expression, .. } => local_type(cx, expression),
        Expression::Create { ty, .. } => match cx.types.find(&ty.name) {
            Some(NestedType::Composite(id)) => Type::Nominal(*id),
            _ => Type::Invalid,
        },
        Expression::Literal { .. } | Expression::Call { .. } | Expression::Member { .. } => {
            Type::Invalid
        }
    }
}
