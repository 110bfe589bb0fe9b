//! Function body statements.
//!
//! Only the shapes the declaration checker and the default body checker
//! look at are modelled: control flow that decides whether a body exits,
//! resource transfers and identifier uses.

use super::types::Identifier;
use crate::foundation::Span;
use serde::{Deserialize, Serialize};

/// `=` copies a value, `<-` moves a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transfer {
    Copy,
    Move,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

impl Block {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self {
            statements,
            span: Span::synthetic(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Return {
        value: Option<Expression>,
        span: Span,
    },
    Expression {
        expression: Expression,
        span: Span,
    },
    If {
        test: Expression,
        then_block: Block,
        else_block: Option<Block>,
        span: Span,
    },
    /// `let x = e` or `let r <- e`
    Let {
        identifier: Identifier,
        transfer: Transfer,
        value: Expression,
        span: Span,
    },
    /// `destroy e`
    Destroy { expression: Expression, span: Span },
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Return { span, .. }
            | Statement::Expression { span, .. }
            | Statement::If { span, .. }
            | Statement::Let { span, .. }
            | Statement::Destroy { span, .. } => *span,
        }
    }

    pub fn ret(value: Expression) -> Self {
        Statement::Return {
            span: value.span(),
            value: Some(value),
        }
    }

    pub fn expr(expression: Expression) -> Self {
        Statement::Expression {
            span: expression.span(),
            expression,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Identifier(Identifier),
    /// Literal source text, e.g. `1` or `"hello"`
    Literal { value: String, span: Span },
    /// `<-e`
    Move { expression: Box<Expression>, span: Span },
    Call {
        callee: Identifier,
        arguments: Vec<Expression>,
        span: Span,
    },
    /// `target.member`
    Member {
        target: Box<Expression>,
        member: Identifier,
        span: Span,
    },
    /// `create T(...)`
    Create {
        ty: Identifier,
        arguments: Vec<Expression>,
        span: Span,
    },
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Identifier(identifier) => identifier.span,
            Expression::Literal { span, .. }
            | Expression::Move { span, .. }
            | Expression::Call { span, .. }
            | Expression::Member { span, .. }
            | Expression::Create { span, .. } => *span,
        }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Expression::Literal {
            value: value.into(),
            span: Span::synthetic(),
        }
    }

    pub fn ident(name: &str) -> Self {
        Expression::Identifier(Identifier::synthetic(name))
    }

    pub fn call(callee: &str, arguments: Vec<Expression>) -> Self {
        Expression::Call {
            callee: Identifier::synthetic(callee),
            arguments,
            span: Span::synthetic(),
        }
    }

    pub fn moved(expression: Expression) -> Self {
        Expression::Move {
            span: expression.span(),
            expression: Box::new(expression),
        }
    }
}
