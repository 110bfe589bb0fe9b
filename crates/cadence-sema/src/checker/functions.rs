//! Function declarations inside interfaces and composites.
//!
//! Interface functions are requirements: a body is optional, but a body
//! that is present must either contain statements (a default
//! implementation) or conditions. Composite functions must be implemented.

use super::members::ContainerRole;
use super::Checker;
use crate::body::{BodyCheckOptions, BodyContext};
use crate::error::{CompileError, ErrorKind};
use crate::scope::ValueBinding;
use crate::types::{Parameter, Type, TypeId};
use cadence_ast::{DeclarationKind, FunctionDeclaration};
use tracing::trace;

impl Checker {
    pub(crate) fn check_interface_functions(
        &mut self,
        container: TypeId,
        functions: &[FunctionDeclaration],
    ) {
        let container_kind = self.arena.get(container).declaration_kind();
        for function in functions {
            self.check_function_access(container, function);

            let options = match &function.function_block {
                Some(block) if block.has_statements() => BodyCheckOptions::IMPLEMENTATION,
                Some(block) if !block.has_conditions() => {
                    self.report(
                        CompileError::new(
                            ErrorKind::InvalidImplementation,
                            function.identifier.span,
                            format!(
                                "{container_kind} function `{}` has an empty body",
                                function.identifier
                            ),
                        )
                        .with_note(
                            "remove the body, or declare pre- or post-conditions".to_string(),
                        ),
                    );
                    BodyCheckOptions::NONE
                }
                _ => BodyCheckOptions::NONE,
            };

            let (parameters, return_type) = self.function_signature(container, function);
            self.check_function_in_scope(container, function, &parameters, &return_type, options);
        }
    }

    pub(crate) fn check_composite_functions(
        &mut self,
        container: TypeId,
        functions: &[FunctionDeclaration],
        role: ContainerRole,
    ) {
        if role.is_interface_like() {
            self.check_interface_functions(container, functions);
            return;
        }
        let container_kind = self.arena.get(container).declaration_kind();
        for function in functions {
            self.check_function_access(container, function);
            if function.function_block.is_none() {
                self.report(CompileError::new(
                    ErrorKind::MissingFunctionBody,
                    function.identifier.span,
                    format!(
                        "{container_kind} function `{}` must have a body",
                        function.identifier
                    ),
                ));
                continue;
            }
            let (parameters, return_type) = self.function_signature(container, function);
            self.check_function_in_scope(
                container,
                function,
                &parameters,
                &return_type,
                BodyCheckOptions::IMPLEMENTATION,
            );
        }
    }

    fn check_function_access(&mut self, container: TypeId, function: &FunctionDeclaration) {
        self.check_member_access_modifier(
            container,
            &function.access,
            &function.identifier,
            DeclarationKind::Function,
            None,
        );
    }

    /// Parameters and return type declared for `function` in the member pass.
    ///
    /// A function that lost a redeclaration conflict has no member; its
    /// parameters are then bound without types.
    fn function_signature(
        &self,
        container: TypeId,
        function: &FunctionDeclaration,
    ) -> (Vec<Parameter>, Type) {
        let member = self
            .arena
            .get(container)
            .member(&function.identifier.name)
            .filter(|member| {
                member.declaration_kind == DeclarationKind::Function
                    && member.identifier == function.identifier
            });
        match member.map(|member| &member.ty) {
            Some(Type::Function(ty)) if ty.parameters.len() == function.parameters.len() => {
                let parameters = function
                    .parameters
                    .iter()
                    .zip(&ty.parameters)
                    .map(|(parameter, ty)| Parameter {
                        label: parameter.effective_label().to_string(),
                        identifier: parameter.identifier.clone(),
                        ty: ty.clone(),
                    })
                    .collect();
                (parameters, (*ty.return_type).clone())
            }
            _ => {
                let parameters = function
                    .parameters
                    .iter()
                    .map(|parameter| Parameter {
                        label: parameter.effective_label().to_string(),
                        identifier: parameter.identifier.clone(),
                        ty: Type::Invalid,
                    })
                    .collect();
                (parameters, Type::Invalid)
            }
        }
    }

    /// Checks `function` in its own value scope with `self` and the
    /// parameters bound.
    pub(crate) fn check_function_in_scope(
        &mut self,
        container: TypeId,
        function: &FunctionDeclaration,
        parameters: &[Parameter],
        return_type: &Type,
        options: BodyCheckOptions,
    ) {
        trace!(
            container = %self.type_name(container),
            function = %function.identifier,
            ?options,
            "checking function"
        );
        self.with_value_scope(|c| {
            let _ = c.values.bind(
                "self",
                ValueBinding {
                    ty: Type::Nominal(container),
                    declaration_kind: DeclarationKind::SelfValue,
                    span: function.identifier.span,
                },
            );
            for parameter in parameters {
                let binding = ValueBinding {
                    ty: parameter.ty.clone(),
                    declaration_kind: DeclarationKind::Parameter,
                    span: parameter.identifier.span,
                };
                if c.values.bind(&parameter.identifier.name, binding).is_err() {
                    c.report(CompileError::new(
                        ErrorKind::Redeclaration,
                        parameter.identifier.span,
                        format!("cannot redeclare parameter `{}`", parameter.identifier),
                    ));
                }
            }

            let mut cx = BodyContext {
                arena: &c.arena,
                types: &c.types,
                values: &mut c.values,
                diagnostics: &mut c.diagnostics,
            };
            c.body_checker
                .check_function_body(&mut cx, function, return_type, options);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckerConfig;
    use crate::types::{InterfaceType, Location, NestedType};
    use cadence_ast::{
        Block, CompositeKind, Condition, Expression, FunctionBlock, Identifier, Members,
        PrimitiveAccess, Statement, TypeAnnotation,
    };

    fn interface_checker() -> (Checker, TypeId) {
        let mut checker = Checker::new(CheckerConfig::default());
        let id = checker.arena.alloc_interface(InterfaceType::new(
            Location::default(),
            Identifier::synthetic("I"),
            CompositeKind::Resource,
        ));
        checker.bind_type(&Identifier::synthetic("I"), NestedType::Interface(id));
        (checker, id)
    }

    fn kinds(checker: &Checker) -> Vec<ErrorKind> {
        checker.diagnostics().iter().map(|d| d.kind).collect()
    }

    fn run(function: FunctionDeclaration) -> Vec<ErrorKind> {
        let (mut checker, id) = interface_checker();
        let body = Members {
            functions: vec![function],
            ..Members::default()
        };
        checker.declare_members(id, &body);
        checker.check_interface_functions(id, &body.functions);
        kinds(&checker)
    }

    fn f() -> FunctionDeclaration {
        FunctionDeclaration::new(PrimitiveAccess::Public, Identifier::synthetic("f"))
    }

    #[test]
    fn test_requirement_without_body() {
        assert!(run(f().returning(TypeAnnotation::named("Int"))).is_empty());
    }

    #[test]
    fn test_empty_body_is_invalid() {
        assert_eq!(
            run(f().with_body(FunctionBlock::empty())),
            vec![ErrorKind::InvalidImplementation]
        );
    }

    #[test]
    fn test_conditions_only_body_is_a_requirement() {
        let block = FunctionBlock::empty()
            .with_pre_condition(Condition::new(Expression::ident("amount")));
        let function = f()
            .with_parameter(cadence_ast::Parameter::new("amount", TypeAnnotation::named("UFix64")))
            .returning(TypeAnnotation::named("UFix64"))
            .with_body(block);
        assert!(run(function).is_empty());
    }

    #[test]
    fn test_default_implementation_must_return() {
        let function = f()
            .returning(TypeAnnotation::named("Int"))
            .with_body(FunctionBlock::new(Block::new(vec![Statement::expr(
                Expression::literal("1"),
            )])));
        assert_eq!(run(function), vec![ErrorKind::MissingReturn]);
    }

    #[test]
    fn test_self_and_parameters_are_in_scope() {
        let function = f()
            .with_parameter(cadence_ast::Parameter::new("x", TypeAnnotation::named("Int")))
            .returning(TypeAnnotation::named("Int"))
            .with_body(FunctionBlock::new(Block::new(vec![
                Statement::expr(Expression::ident("self")),
                Statement::ret(Expression::ident("x")),
            ])));
        assert!(run(function).is_empty());
    }

    #[test]
    fn test_value_scope_is_released() {
        let (mut checker, id) = interface_checker();
        let depth = checker.values.depth();
        let function = f().with_body(FunctionBlock::new(Block::new(vec![Statement::ret(
            Expression::ident("missing"),
        )])));
        checker.check_interface_functions(id, std::slice::from_ref(&function));
        assert_eq!(checker.values.depth(), depth);
        assert!(checker.values.find("self").is_none());
        assert_eq!(kinds(&checker), vec![ErrorKind::UndefinedName]);
    }

    #[test]
    fn test_composite_function_needs_body() {
        let (mut checker, id) = interface_checker();
        checker.check_composite_functions(id, &[f()], ContainerRole::Composite);
        assert_eq!(kinds(&checker), vec![ErrorKind::MissingFunctionBody]);
    }
}
