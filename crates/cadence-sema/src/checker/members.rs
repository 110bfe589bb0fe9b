//! Member declaration and the member-level checks shared by interfaces and
//! composites: access modifiers, storability, resource fields and special
//! functions.

use super::nested::missing_access_modifier;
use super::Checker;
use crate::body::BodyCheckOptions;
use crate::error::{CompileError, ErrorKind};
use crate::types::{FunctionType, Member, Parameter, Type, TypeId};
use cadence_ast::{
    CompositeKind, DeclarationKind, FieldDeclaration, FunctionDeclaration, Identifier, Members,
    PrimitiveAccess, SpecialFunctionDeclaration, SpecialFunctionKind, VariableKind,
};
use indexmap::IndexMap;
use tracing::trace;

/// What kind of body a special function is checked as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContainerRole {
    Interface,
    /// Composite nested in an interface, checked like an interface
    TypeRequirement,
    Composite,
}

impl ContainerRole {
    pub(crate) fn is_interface_like(self) -> bool {
        matches!(self, ContainerRole::Interface | ContainerRole::TypeRequirement)
    }
}

impl Checker {
    /// Builds the member map of `container` from its declaration body.
    pub(crate) fn declare_members(&mut self, container: TypeId, body: &Members) {
        let mut members: IndexMap<String, Member> = IndexMap::new();
        let mut fields = Vec::with_capacity(body.fields.len());

        for field in &body.fields {
            let access = self.resolve_access(&field.access);
            let ty = self.resolve_type_annotation(&field.type_annotation);
            let mut member = Member::field(
                container,
                field.identifier.clone(),
                access,
                field.variable_kind,
                ty,
            );
            member.doc_string = field.doc_string.clone();
            if self.insert_member(container, &mut members, member) {
                fields.push(field.identifier.name.clone());
            }
        }

        for function in &body.functions {
            let access = self.resolve_access(&function.access);
            let (ty, argument_labels) = self.resolve_function_type(function);
            let mut member = Member::function(
                container,
                function.identifier.clone(),
                access,
                ty,
                argument_labels,
            )
            .with_implementation(function.has_statements())
            .with_conditions(function.has_conditions());
            member.doc_string = function.doc_string.clone();
            self.insert_member(container, &mut members, member);
        }

        let initializer_parameters = match body.initializers().next() {
            Some(initializer) => self.resolve_parameters(&initializer.function.parameters),
            None => Vec::new(),
        };

        trace!(
            container = %self.type_name(container),
            members = members.len(),
            "declared members"
        );
        self.arena
            .get_mut(container)
            .set_members(members, fields, initializer_parameters);
    }

    fn insert_member(
        &mut self,
        container: TypeId,
        members: &mut IndexMap<String, Member>,
        member: Member,
    ) -> bool {
        if let Some(existing) = members.get(member.name()) {
            let error = CompileError::new(
                ErrorKind::Redeclaration,
                member.identifier.span,
                format!(
                    "cannot redeclare {} `{}`",
                    member.declaration_kind, member.identifier
                ),
            )
            .with_label(
                existing.identifier.span,
                format!("`{}` first declared here", existing.identifier),
            );
            self.report(error);
            return false;
        }
        if self.config.position_info {
            self.elaboration
                .record_member_origin(container, member.name(), member.identifier.span);
        }
        members.insert(member.name().to_string(), member);
        true
    }

    pub(crate) fn resolve_parameters(
        &mut self,
        parameters: &[cadence_ast::Parameter],
    ) -> Vec<Parameter> {
        parameters
            .iter()
            .map(|parameter| Parameter {
                label: parameter.effective_label().to_string(),
                identifier: parameter.identifier.clone(),
                ty: self.resolve_type_annotation(&parameter.type_annotation),
            })
            .collect()
    }

    /// Function type and argument labels of a function declaration.
    pub(crate) fn resolve_function_type(
        &mut self,
        function: &FunctionDeclaration,
    ) -> (Type, Vec<String>) {
        let parameters = self.resolve_parameters(&function.parameters);
        let return_type = match &function.return_type {
            Some(annotation) => self.resolve_type_annotation(annotation),
            None => Type::VOID,
        };
        let labels = parameters.iter().map(|p| p.label.clone()).collect();
        let types = parameters.into_iter().map(|p| p.ty).collect();
        (Type::Function(FunctionType::new(types, return_type)), labels)
    }

    /// Contract fields end up in account storage and must be storable.
    pub(crate) fn check_field_storability(&mut self, container: TypeId) {
        let def = self.arena.get(container);
        if def.composite_kind() != CompositeKind::Contract {
            return;
        }
        let unstorable: Vec<(Identifier, String)> = def
            .fields()
            .iter()
            .filter_map(|name| def.member(name))
            .filter(|member| !member.ty.is_storable(&self.arena))
            .map(|member| (member.identifier.clone(), member.ty.display(&self.arena)))
            .collect();
        for (identifier, ty) in unstorable {
            self.report(CompileError::new(
                ErrorKind::FieldTypeNotStorable,
                identifier.span,
                format!("field `{identifier}` has non-storable type `{ty}`"),
            ));
        }
    }

    /// Access modifier of an interface or composite declaration.
    pub(crate) fn check_declaration_access_modifier(
        &mut self,
        access: &cadence_ast::Access,
        identifier: &Identifier,
        kind: DeclarationKind,
    ) {
        match access {
            cadence_ast::Access::Primitive(PrimitiveAccess::NotSpecified) => {
                if self.config.access_check_mode.is_strict() {
                    self.report(missing_access_modifier(identifier, kind.name()));
                }
            }
            cadence_ast::Access::Primitive(PrimitiveAccess::PublicSettable)
            | cadence_ast::Access::Entitlements(_) => {
                self.report(invalid_access_modifier(access, identifier, kind));
            }
            cadence_ast::Access::Primitive(_) => {}
        }
    }

    pub(crate) fn check_fields_access_modifier(
        &mut self,
        container: TypeId,
        fields: &[FieldDeclaration],
    ) {
        for field in fields {
            self.check_member_access_modifier(
                container,
                &field.access,
                &field.identifier,
                DeclarationKind::Field,
                Some(field.variable_kind),
            );
        }
    }

    /// `pub(set)` only on `var` fields; entitlements only in types that
    /// can be accessed through references.
    pub(crate) fn check_member_access_modifier(
        &mut self,
        container: TypeId,
        access: &cadence_ast::Access,
        identifier: &Identifier,
        kind: DeclarationKind,
        variable_kind: Option<VariableKind>,
    ) {
        match access {
            cadence_ast::Access::Primitive(PrimitiveAccess::NotSpecified) => {
                if self.config.access_check_mode.is_strict() {
                    self.report(missing_access_modifier(identifier, kind.name()));
                }
            }
            cadence_ast::Access::Primitive(PrimitiveAccess::PublicSettable) => {
                if variable_kind != Some(VariableKind::Variable) {
                    self.report(
                        invalid_access_modifier(access, identifier, kind)
                            .with_note("`pub(set)` is only valid for `var` fields".to_string()),
                    );
                }
            }
            cadence_ast::Access::Entitlements(_) => {
                let container_kind = self.arena.get(container).composite_kind();
                if matches!(container_kind, CompositeKind::Event | CompositeKind::Enum) {
                    self.report(invalid_access_modifier(access, identifier, kind).with_note(
                        format!("{} members cannot require entitlements", container_kind.name()),
                    ));
                }
            }
            cadence_ast::Access::Primitive(_) => {}
        }
    }

    /// Nested type names may not shadow members of the same container.
    pub(crate) fn check_nested_identifiers(&mut self, container: TypeId, body: &Members) {
        let clashes: Vec<(Identifier, Identifier)> = body
            .nested_identifiers()
            .filter_map(|nested| {
                self.arena
                    .get(container)
                    .member(&nested.name)
                    .map(|member| (nested.clone(), member.identifier.clone()))
            })
            .collect();
        for (nested, member) in clashes {
            self.report(
                CompileError::new(
                    ErrorKind::Redeclaration,
                    nested.span,
                    format!("nested type `{nested}` conflicts with a member of the same name"),
                )
                .with_label(member.span, format!("member `{member}` declared here")),
            );
        }
    }

    pub(crate) fn check_initializers(
        &mut self,
        container: TypeId,
        body: &Members,
        role: ContainerRole,
    ) {
        let kind = self.arena.get(container).declaration_kind();
        for (index, initializer) in body.initializers().enumerate() {
            let function = &initializer.function;
            if index > 0 {
                self.report(CompileError::new(
                    ErrorKind::InvalidInitializer,
                    function.identifier.span,
                    format!("{kind} `{}` may only declare one initializer", self.type_name(container)),
                ));
                continue;
            }
            if let Some(return_type) = &function.return_type {
                self.report(CompileError::new(
                    ErrorKind::InvalidInitializer,
                    return_type.span,
                    "initializers cannot declare a return type".to_string(),
                ));
            }
            if role.is_interface_like() {
                if function.has_statements() {
                    self.report(special_function_implementation(kind, initializer));
                }
                self.check_special_function_body(container, initializer, BodyCheckOptions::NONE);
            } else {
                self.check_special_function_body(
                    container,
                    initializer,
                    BodyCheckOptions {
                        must_exit: false,
                        check_resource_loss: true,
                    },
                );
            }
        }
    }

    pub(crate) fn check_unknown_special_functions(&mut self, body: &Members) {
        for special in &body.special_functions {
            if special.kind == SpecialFunctionKind::Unknown {
                self.report(CompileError::new(
                    ErrorKind::UnknownSpecialFunction,
                    special.function.identifier.span,
                    format!("unknown special function `{}`", special.function.identifier),
                ).with_note("special functions are `init` and `destroy`".to_string()));
            }
        }
    }

    /// Interface special functions may carry conditions but no statements.
    pub(crate) fn check_special_function_default_implementation(
        &mut self,
        container: TypeId,
        body: &Members,
    ) {
        let kind = self.arena.get(container).declaration_kind();
        for special in body.destructors() {
            if special.function.has_statements() {
                self.report(special_function_implementation(kind, special));
            }
        }
    }

    /// Fields holding resources are only allowed where resources can be owned.
    pub(crate) fn check_resource_field_nesting(&mut self, container: TypeId) {
        let def = self.arena.get(container);
        let kind = def.composite_kind();
        if matches!(kind, CompositeKind::Resource | CompositeKind::Contract) {
            return;
        }
        let offending: Vec<Identifier> = def
            .fields()
            .iter()
            .filter_map(|name| def.member(name))
            .filter(|member| member.ty.is_resource(&self.arena))
            .map(|member| member.identifier.clone())
            .collect();
        let declaration_kind = def.declaration_kind();
        for identifier in offending {
            self.report(CompileError::new(
                ErrorKind::InvalidResourceField,
                identifier.span,
                format!("{declaration_kind} cannot have resource-typed field `{identifier}`"),
            ));
        }
    }

    pub(crate) fn check_destructors(
        &mut self,
        container: TypeId,
        body: &Members,
        role: ContainerRole,
    ) {
        let def = self.arena.get(container);
        let kind = def.declaration_kind();
        let is_resource = def.composite_kind().is_resource();
        for (index, destructor) in body.destructors().enumerate() {
            let function = &destructor.function;
            if index > 0 {
                self.report(CompileError::new(
                    ErrorKind::InvalidDestructor,
                    function.identifier.span,
                    format!("{kind} `{}` may only declare one destructor", self.type_name(container)),
                ));
                continue;
            }
            if !is_resource {
                self.report(CompileError::new(
                    ErrorKind::InvalidDestructor,
                    function.identifier.span,
                    format!("{kind} `{}` cannot declare a destructor", self.type_name(container)),
                ).with_note("only resources and resource interfaces have destructors".to_string()));
            }
            if let Some(parameter) = function.parameters.first() {
                self.report(CompileError::new(
                    ErrorKind::InvalidDestructor,
                    parameter.identifier.span,
                    "destructors cannot have parameters".to_string(),
                ));
            }
            let options = if role.is_interface_like() {
                BodyCheckOptions::NONE
            } else {
                BodyCheckOptions {
                    must_exit: false,
                    check_resource_loss: true,
                }
            };
            self.check_special_function_body(container, destructor, options);
        }
    }

    fn check_special_function_body(
        &mut self,
        container: TypeId,
        special: &SpecialFunctionDeclaration,
        options: BodyCheckOptions,
    ) {
        let parameters = match special.kind {
            SpecialFunctionKind::Initializer => self
                .arena
                .get(container)
                .initializer_parameters()
                .to_vec(),
            SpecialFunctionKind::Destructor | SpecialFunctionKind::Unknown => Vec::new(),
        };
        self.check_function_in_scope(container, &special.function, &parameters, &Type::VOID, options);
    }
}

fn invalid_access_modifier(
    access: &cadence_ast::Access,
    identifier: &Identifier,
    kind: DeclarationKind,
) -> CompileError {
    CompileError::new(
        ErrorKind::InvalidAccessModifier,
        identifier.span,
        format!(
            "invalid access modifier `{}` for {kind} `{identifier}`",
            access.keyword()
        ),
    )
}

fn special_function_implementation(
    kind: DeclarationKind,
    special: &SpecialFunctionDeclaration,
) -> CompileError {
    let name = special
        .kind
        .declaration_kind()
        .map(DeclarationKind::name)
        .unwrap_or("special function");
    CompileError::new(
        ErrorKind::SpecialFunctionImplementation,
        special.function.identifier.span,
        format!("{kind} {name} cannot have an implementation"),
    )
    .with_note("interface special functions may only declare conditions".to_string())
}
