//! Lexically nested name bindings.
//!
//! Types and values live in separate stacks. Each stack always keeps its
//! base level; the checker pushes a level when it enters a declaration body
//! or function and pops it when it leaves (see `Checker::with_type_scope`).

use crate::types::{NestedType, Type};
use cadence_ast::{DeclarationKind, Span};
use indexmap::IndexMap;

/// Stack of binding levels, innermost last.
#[derive(Debug, Clone)]
pub struct Activations<T> {
    levels: Vec<IndexMap<String, T>>,
}

impl<T> Default for Activations<T> {
    fn default() -> Self {
        Self {
            levels: vec![IndexMap::new()],
        }
    }
}

impl<T> Activations<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self) {
        self.levels.push(IndexMap::new());
    }

    /// Pops the innermost level. The base level is never popped.
    pub fn pop(&mut self) {
        if self.levels.len() > 1 {
            self.levels.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Binds `name` in the innermost level.
    ///
    /// Returns the existing binding when `name` is already bound at this
    /// level; the existing binding is kept.
    pub fn bind(&mut self, name: &str, value: T) -> Result<(), &T> {
        let depth = self.levels.len() - 1;
        if self.levels[depth].contains_key(name) {
            return Err(&self.levels[depth][name]);
        }
        self.levels[depth].insert(name.to_string(), value);
        Ok(())
    }

    /// Innermost binding of `name`.
    pub fn find(&self, name: &str) -> Option<&T> {
        self.levels.iter().rev().find_map(|level| level.get(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut T> {
        self.levels
            .iter_mut()
            .rev()
            .find_map(|level| level.get_mut(name))
    }

    /// Bindings of the innermost level in binding order.
    pub fn current(&self) -> impl Iterator<Item = (&str, &T)> {
        self.levels
            .last()
            .into_iter()
            .flat_map(|level| level.iter().map(|(name, value)| (name.as_str(), value)))
    }
}

/// Value bound in a function scope: `self`, a parameter or a local.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueBinding {
    pub ty: Type,
    pub declaration_kind: DeclarationKind,
    pub span: Span,
}

pub type TypeActivations = Activations<NestedType>;
pub type ValueActivations = Activations<ValueBinding>;
