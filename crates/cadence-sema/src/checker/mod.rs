//! Declaration checker.
//!
//! Checks a program in three passes over its type declarations:
//!
//! ```text
//! declare   allocate interface/composite/entitlement skeletons, bind names
//! members   resolve conformances, build member maps from declaration bodies
//! check     conformance, access modifiers, functions, special functions
//! ```
//!
//! Every declaration must pass through the three passes in order. Running a
//! pass out of order is an [`InternalError`] and aborts the unit; everything
//! a user can get wrong is a [`CompileError`] collected in
//! [`Checker::diagnostics`].
//!
//! # Examples
//!
//! ```
//! use cadence_ast::*;
//! use cadence_sema::{check_program, CheckerConfig, ErrorKind};
//!
//! let mut ids = NodeIds::new();
//! let function = |body: bool| {
//!     let f = FunctionDeclaration::new(PrimitiveAccess::Public, Identifier::synthetic("f"));
//!     if body {
//!         f.with_body(FunctionBlock::new(Block::new(vec![Statement::expr(Expression::literal("1"))])))
//!     } else {
//!         f
//!     }
//! };
//! let a = InterfaceDeclaration::new(&mut ids, PrimitiveAccess::Public, CompositeKind::Structure, Identifier::synthetic("A"))
//!     .with_function(function(true));
//! let b = InterfaceDeclaration::new(&mut ids, PrimitiveAccess::Public, CompositeKind::Structure, Identifier::synthetic("B"))
//!     .with_function(function(true));
//! let c = InterfaceDeclaration::new(&mut ids, PrimitiveAccess::Public, CompositeKind::Structure, Identifier::synthetic("C"))
//!     .conforming_to(NominalType::simple("A"))
//!     .conforming_to(NominalType::simple("B"));
//!
//! let output = check_program(&Program::new(vec![a.into(), b.into(), c.into()]), CheckerConfig::default()).unwrap();
//! let kinds: Vec<_> = output.diagnostics.iter().map(|d| d.kind).collect();
//! assert_eq!(kinds, vec![ErrorKind::MemberConflict]);
//! ```

mod composite;
mod conformance;
mod functions;
mod interface;
mod members;
mod nested;

use crate::access::{Access, EntitlementSetAccess};
use crate::body::{BodyChecker, DefaultBodyChecker};
use crate::config::CheckerConfig;
use crate::elaboration::Elaboration;
use crate::error::{CheckResult, CompileError, ErrorKind, InternalError};
use crate::scope::{TypeActivations, ValueActivations};
use crate::signature::{MemberSignatures, StructuralSignatures};
use crate::types::{FunctionType, NestedType, PrimitiveType, Type, TypeArena, TypeId};
use cadence_ast::{Declaration, Identifier, NominalType, Program, TypeAnnotation, TypeExpr};
use tracing::{debug, info};

/// Everything a successful run produces.
#[derive(Debug)]
pub struct CheckOutput {
    /// User errors in emission order
    pub diagnostics: Vec<CompileError>,
    pub elaboration: Elaboration,
    pub arena: TypeArena,
}

#[derive(Debug, Clone, Copy)]
enum ScopeKind {
    Type,
    Value,
}

/// Pops one scope level on drop.
struct ScopeLevel<'a> {
    checker: &'a mut Checker,
    scope: ScopeKind,
}

impl Drop for ScopeLevel<'_> {
    fn drop(&mut self) {
        match self.scope {
            ScopeKind::Type => self.checker.types.pop(),
            ScopeKind::Value => self.checker.values.pop(),
        }
    }
}

impl CheckOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(CompileError::is_error)
    }
}

pub struct Checker {
    config: CheckerConfig,
    arena: TypeArena,
    elaboration: Elaboration,
    types: TypeActivations,
    values: ValueActivations,
    diagnostics: Vec<CompileError>,
    signatures: Box<dyn MemberSignatures>,
    body_checker: Box<dyn BodyChecker>,
}

impl Checker {
    pub fn new(config: CheckerConfig) -> Self {
        let signatures = StructuralSignatures::new(config.access_check_mode);
        Self {
            config,
            arena: TypeArena::new(),
            elaboration: Elaboration::new(),
            types: TypeActivations::new(),
            values: ValueActivations::new(),
            diagnostics: Vec::new(),
            signatures: Box::new(signatures),
            body_checker: Box::new(DefaultBodyChecker),
        }
    }

    pub fn with_signatures(mut self, signatures: impl MemberSignatures + 'static) -> Self {
        self.signatures = Box::new(signatures);
        self
    }

    pub fn with_body_checker(mut self, body_checker: impl BodyChecker + 'static) -> Self {
        self.body_checker = Box::new(body_checker);
        self
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn arena(&self) -> &TypeArena {
        &self.arena
    }

    pub fn elaboration(&self) -> &Elaboration {
        &self.elaboration
    }

    pub fn diagnostics(&self) -> &[CompileError] {
        &self.diagnostics
    }

    pub fn into_output(self) -> CheckOutput {
        CheckOutput {
            diagnostics: self.diagnostics,
            elaboration: self.elaboration,
            arena: self.arena,
        }
    }

    /// Runs the three passes over every top-level declaration.
    ///
    /// Entitlements are declared first so access annotations anywhere in the
    /// program can name them.
    pub fn check_program(&mut self, program: &Program) -> CheckResult<()> {
        info!(
            declarations = program.declarations.len(),
            "checking program"
        );

        for entitlement in program.entitlements() {
            self.declare_entitlement(entitlement)?;
        }

        for declaration in &program.declarations {
            match declaration {
                Declaration::Interface(decl) => {
                    self.declare_interface_type(decl)?;
                }
                Declaration::Composite(decl) => {
                    self.declare_composite_type(decl)?;
                }
                Declaration::Entitlement(_) => {}
            }
        }

        for declaration in &program.declarations {
            match declaration {
                Declaration::Interface(decl) => self.declare_interface_members(decl)?,
                Declaration::Composite(decl) => self.declare_composite_members(decl)?,
                Declaration::Entitlement(_) => {}
            }
        }

        for declaration in &program.declarations {
            match declaration {
                Declaration::Interface(decl) => self.visit_interface_declaration(decl)?,
                Declaration::Composite(decl) => self.visit_composite_declaration(decl)?,
                Declaration::Entitlement(decl) => self.check_entitlement_access(decl),
            }
        }

        debug!(
            diagnostics = self.diagnostics.len(),
            types = self.arena.len(),
            "program checked"
        );
        Ok(())
    }

    pub(crate) fn report(&mut self, error: CompileError) {
        debug!(kind = error.kind.name(), message = %error.message, "diagnostic");
        self.diagnostics.push(error);
    }

    /// Runs `f` with a fresh type scope level. The level is popped when
    /// `f` returns or unwinds.
    pub(crate) fn with_type_scope<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.types.push();
        let mut level = ScopeLevel {
            checker: self,
            scope: ScopeKind::Type,
        };
        f(&mut *level.checker)
    }

    /// Value-scope counterpart of [`Checker::with_type_scope`].
    pub(crate) fn with_value_scope<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.values.push();
        let mut level = ScopeLevel {
            checker: self,
            scope: ScopeKind::Value,
        };
        f(&mut *level.checker)
    }

    /// Binds a type name in the innermost type scope.
    pub(crate) fn bind_type(&mut self, identifier: &Identifier, ty: NestedType) {
        if self.types.bind(&identifier.name, ty).is_err() {
            self.report(CompileError::new(
                ErrorKind::Redeclaration,
                identifier.span,
                format!("cannot redeclare type `{identifier}`"),
            ));
        }
    }

    /// Looks up a possibly qualified type name without reporting.
    pub(crate) fn lookup_nominal(&self, nominal: &NominalType) -> Option<NestedType> {
        let mut found = *self.types.find(&nominal.identifier.name)?;
        for nested in &nominal.nested_identifiers {
            let container = found.composite_kinded()?;
            found = *self.arena.get(container).nested_types().get(&nested.name)?;
        }
        Some(found)
    }

    fn report_undefined_type(&mut self, nominal: &NominalType) {
        self.report(CompileError::new(
            ErrorKind::UndefinedName,
            nominal.span(),
            format!("cannot find type `{nominal}` in this scope"),
        ));
    }

    pub(crate) fn resolve_type_annotation(&mut self, annotation: &TypeAnnotation) -> Type {
        self.resolve_type_expr(&annotation.ty)
    }

    pub(crate) fn resolve_type_expr(&mut self, expr: &TypeExpr) -> Type {
        match expr {
            TypeExpr::Nominal(nominal) => self.resolve_nominal_type(nominal),
            TypeExpr::Optional(inner) => Type::Optional(Box::new(self.resolve_type_expr(inner))),
            TypeExpr::VariableSized(element) => {
                Type::VariableSized(Box::new(self.resolve_type_expr(element)))
            }
            TypeExpr::Dictionary { key, value } => Type::Dictionary(
                Box::new(self.resolve_type_expr(key)),
                Box::new(self.resolve_type_expr(value)),
            ),
            TypeExpr::Function {
                parameters,
                return_type,
            } => {
                let parameters = parameters
                    .iter()
                    .map(|parameter| self.resolve_type_expr(parameter))
                    .collect();
                let return_type = self.resolve_type_expr(return_type);
                Type::Function(FunctionType::new(parameters, return_type))
            }
            TypeExpr::Reference(inner) => Type::Reference(Box::new(self.resolve_type_expr(inner))),
        }
    }

    fn resolve_nominal_type(&mut self, nominal: &NominalType) -> Type {
        if nominal.nested_identifiers.is_empty() {
            if let Some(primitive) = PrimitiveType::from_name(&nominal.identifier.name) {
                return Type::Primitive(primitive);
            }
        }
        match self.lookup_nominal(nominal) {
            Some(NestedType::Interface(id)) | Some(NestedType::Composite(id)) => Type::Nominal(id),
            Some(NestedType::Entitlement(_)) => {
                self.report(CompileError::new(
                    ErrorKind::InvalidEntitlement,
                    nominal.span(),
                    format!("entitlement `{nominal}` cannot be used as a type"),
                ));
                Type::Invalid
            }
            None => {
                self.report_undefined_type(nominal);
                Type::Invalid
            }
        }
    }

    /// Resolves the entitlement names of an access annotation.
    ///
    /// Names that do not resolve to entitlements are reported and dropped.
    pub(crate) fn resolve_access(&mut self, access: &cadence_ast::Access) -> Access {
        match access {
            cadence_ast::Access::Primitive(primitive) => Access::Primitive(*primitive),
            cadence_ast::Access::Entitlements(set) => {
                let mut resolved = Vec::with_capacity(set.entitlements.len());
                for nominal in &set.entitlements {
                    match self.lookup_nominal(nominal) {
                        Some(NestedType::Entitlement(id)) => resolved.push(id),
                        Some(other) => {
                            let kind = other.declaration_kind(&self.arena);
                            self.report(CompileError::new(
                                ErrorKind::InvalidEntitlement,
                                nominal.span(),
                                format!("`{nominal}` is a {kind}, not an entitlement"),
                            ));
                        }
                        None => self.report(CompileError::new(
                            ErrorKind::UndefinedName,
                            nominal.span(),
                            format!("cannot find entitlement `{nominal}` in this scope"),
                        )),
                    }
                }
                Access::Entitlement(EntitlementSetAccess::new(resolved, set.separator))
            }
        }
    }

    /// Human-readable name of a declared type for diagnostics.
    pub(crate) fn type_name(&self, ty: TypeId) -> String {
        self.arena.qualified_identifier(ty)
    }
}

/// Checks `program` with a fresh [`Checker`].
pub fn check_program(program: &Program, config: CheckerConfig) -> Result<CheckOutput, InternalError> {
    let mut checker = Checker::new(config);
    checker.check_program(program)?;
    Ok(checker.into_output())
}
