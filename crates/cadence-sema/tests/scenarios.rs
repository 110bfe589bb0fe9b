//! End-to-end checks over whole programs.

mod common;

use cadence_ast::{
    Block, CompositeKind, Condition, EntitlementDeclaration, Expression, FieldDeclaration,
    FunctionBlock, FunctionDeclaration, Identifier, NodeIds, NominalType, PrimitiveAccess,
    Program, SourceMap, Span, Statement, TypeAnnotation, TypeExpr, VariableKind,
};
use cadence_sema::{
    Access, AccessCheckMode, CheckerConfig, Checker, DiagnosticFormatter, EntitlementSetAccess,
    ErrorKind, InternalError,
};
use common::*;
use std::path::PathBuf;

fn statement_body() -> FunctionBlock {
    FunctionBlock::new(Block::new(vec![Statement::expr(Expression::literal("1"))]))
}

// ============================================================================
// Multiple and diamond conformance
// ============================================================================

#[test]
fn test_conforming_composite_has_no_diagnostics() {
    let mut ids = NodeIds::new();
    let a = interface(&mut ids, "A", CompositeKind::Structure).with_function(requirement("f", "Int"));
    let s = composite(&mut ids, "S", CompositeKind::Structure)
        .conforming_to(NominalType::simple("A"))
        .with_function(implemented("f", "Int", "1"));

    let output = check(vec![a.into(), s.into()]);
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
    assert!(!output.has_errors());
}

#[test]
fn test_diamond_defaults_conflict_once() {
    let mut ids = NodeIds::new();
    let a = interface(&mut ids, "A", CompositeKind::Structure)
        .with_function(implemented("f", "Int", "1"));
    let b = interface(&mut ids, "B", CompositeKind::Structure)
        .with_function(implemented("f", "Int", "1"));
    let c = interface(&mut ids, "C", CompositeKind::Structure)
        .conforming_to(NominalType::simple("A"))
        .conforming_to(NominalType::simple("B"));

    let output = check(vec![a.into(), b.into(), c.into()]);
    assert_eq!(kinds(&output), vec![ErrorKind::MemberConflict]);

    let conflict = &output.diagnostics[0];
    assert!(conflict.message.starts_with("`C` has conflicting function `f`"));
    assert_eq!(conflict.labels.len(), 2);
    assert!(conflict.labels[0].message.contains("`B`"));
    assert!(conflict.labels[1].message.contains("`A`"));
}

#[test]
fn test_matching_requirements_merge_in_any_order() {
    for order in [["A", "B"], ["B", "A"]] {
        let mut ids = NodeIds::new();
        let a = interface(&mut ids, "A", CompositeKind::Resource).with_function(requirement("f", "Int"));
        let b = interface(&mut ids, "B", CompositeKind::Resource).with_function(requirement("f", "Int"));
        let c = interface(&mut ids, "C", CompositeKind::Resource)
            .conforming_to(NominalType::simple(order[0]))
            .conforming_to(NominalType::simple(order[1]));

        let output = check(vec![a.into(), b.into(), c.into()]);
        assert!(output.diagnostics.is_empty(), "{order:?}: {:?}", output.diagnostics);
    }
}

#[test]
fn test_shared_ancestor_is_not_ambiguous() {
    let mut ids = NodeIds::new();
    let a = interface(&mut ids, "A", CompositeKind::Structure)
        .with_function(implemented("f", "Int", "1"));
    let b = interface(&mut ids, "B", CompositeKind::Structure).conforming_to(NominalType::simple("A"));
    let c = interface(&mut ids, "C", CompositeKind::Structure).conforming_to(NominalType::simple("A"));
    let d = interface(&mut ids, "D", CompositeKind::Structure)
        .conforming_to(NominalType::simple("B"))
        .conforming_to(NominalType::simple("C"));
    let s = composite(&mut ids, "S", CompositeKind::Structure).conforming_to(NominalType::simple("D"));
    let s_id = s.id;
    let a_id = a.id;

    let output = check(vec![a.into(), b.into(), c.into(), d.into(), s.into()]);
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);

    let s_ty = output.elaboration.type_of(s_id).unwrap();
    let a_ty = output.elaboration.type_of(a_id).unwrap();
    let composite = output.arena.composite(s_ty).unwrap();
    assert_eq!(composite.default_functions.get("f"), Some(&a_ty));
}

#[test]
fn test_ancestor_and_descendant_defaults_conflict() {
    let mut ids = NodeIds::new();
    let a = interface(&mut ids, "A", CompositeKind::Structure)
        .with_function(implemented("f", "Int", "1"));
    let b = interface(&mut ids, "B", CompositeKind::Structure)
        .conforming_to(NominalType::simple("A"))
        .with_function(implemented("f", "Int", "2"));
    let c = interface(&mut ids, "C", CompositeKind::Structure)
        .conforming_to(NominalType::simple("A"))
        .conforming_to(NominalType::simple("B"));

    let output = check(vec![a.into(), b.into(), c.into()]);
    assert_eq!(
        kinds(&output),
        vec![ErrorKind::MemberConflict, ErrorKind::MemberConflict]
    );
    assert!(output.diagnostics[0].message.starts_with("`B` has conflicting function `f`"));
    let on_c = &output.diagnostics[1];
    assert!(on_c.message.starts_with("`C` has conflicting function `f`"));
    assert!(on_c.labels[0].message.contains("`B`"));
    assert!(on_c.labels[1].message.contains("`A`"));
}

#[test]
fn test_nested_type_conflict_is_reported_where_inherited() {
    let mut ids = NodeIds::new();
    let a = interface(&mut ids, "A", CompositeKind::Contract)
        .with_composite(composite(&mut ids, "Vault", CompositeKind::Resource));
    let b = interface(&mut ids, "B", CompositeKind::Contract)
        .conforming_to(NominalType::simple("A"))
        .with_composite(composite(&mut ids, "Vault", CompositeKind::Resource));
    let c = interface(&mut ids, "C", CompositeKind::Contract).conforming_to(NominalType::simple("B"));

    let output = check(vec![a.into(), b.into(), c.into()]);
    assert_eq!(kinds(&output), vec![ErrorKind::NestedTypeConflict]);
    assert!(output.diagnostics[0]
        .message
        .starts_with("`B` inherits conflicting nested types `Vault`"));
}

#[test]
fn test_most_derived_default_is_inherited() {
    let mut ids = NodeIds::new();
    let a = interface(&mut ids, "A", CompositeKind::Structure)
        .with_function(implemented("f", "Int", "1"));
    let b = interface(&mut ids, "B", CompositeKind::Structure)
        .conforming_to(NominalType::simple("A"))
        .with_function(implemented("f", "Int", "2"));
    let s = composite(&mut ids, "S", CompositeKind::Structure)
        .conforming_to(NominalType::simple("A"))
        .conforming_to(NominalType::simple("B"));
    let (b_id, s_id) = (b.id, s.id);

    let output = check(vec![a.into(), b.into(), s.into()]);
    // the override itself is ambiguous on `B`, `S` inherits cleanly
    assert_eq!(kinds(&output), vec![ErrorKind::MemberConflict]);
    assert!(output.diagnostics[0].message.starts_with("`B` has conflicting"));

    let s_ty = output.elaboration.type_of(s_id).unwrap();
    let b_ty = output.elaboration.type_of(b_id).unwrap();
    let composite = output.arena.composite(s_ty).unwrap();
    assert_eq!(composite.default_functions.get("f"), Some(&b_ty));
}

#[test]
fn test_mismatched_requirements_conflict() {
    let mut ids = NodeIds::new();
    let a = interface(&mut ids, "A", CompositeKind::Structure).with_function(requirement("f", "Int"));
    let b = interface(&mut ids, "B", CompositeKind::Structure).with_function(requirement("f", "String"));
    let c = interface(&mut ids, "C", CompositeKind::Structure)
        .conforming_to(NominalType::simple("A"))
        .conforming_to(NominalType::simple("B"));

    let output = check(vec![a.into(), b.into(), c.into()]);
    assert_eq!(kinds(&output), vec![ErrorKind::MemberConflict]);
    assert!(output.diagnostics[0].message.contains("signatures do not match"));
}

#[test]
fn test_own_requirement_conflicts_with_inherited_default() {
    let mut ids = NodeIds::new();
    let a = interface(&mut ids, "A", CompositeKind::Structure)
        .with_function(implemented("f", "Int", "1"));
    let b = interface(&mut ids, "B", CompositeKind::Structure)
        .conforming_to(NominalType::simple("A"))
        .with_function(requirement("f", "Int"));

    let output = check(vec![a.into(), b.into()]);
    assert_eq!(kinds(&output), vec![ErrorKind::MemberConflict]);
}

#[test]
fn test_nested_type_requirements_conflict() {
    let mut ids = NodeIds::new();
    let a = interface(&mut ids, "A", CompositeKind::Contract)
        .with_composite(composite(&mut ids, "Vault", CompositeKind::Resource));
    let b = interface(&mut ids, "B", CompositeKind::Contract)
        .with_composite(composite(&mut ids, "Vault", CompositeKind::Resource));
    let c = interface(&mut ids, "C", CompositeKind::Contract)
        .conforming_to(NominalType::simple("A"))
        .conforming_to(NominalType::simple("B"));

    let output = check(vec![a.into(), b.into(), c.into()]);
    assert_eq!(kinds(&output), vec![ErrorKind::NestedTypeConflict]);
    assert!(output.diagnostics[0].message.contains("`Vault`"));
}

#[test]
fn test_forward_conformance_resolves() {
    let mut ids = NodeIds::new();
    let i = interface(&mut ids, "I", CompositeKind::Structure)
        .conforming_to(NominalType::simple("J"))
        .with_function(requirement("f", "Int"));
    let j = interface(&mut ids, "J", CompositeKind::Structure).with_function(requirement("f", "Int"));

    let output = check(vec![i.into(), j.into()]);
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
}

#[test]
fn test_conformance_cycle_is_reported_on_each_side() {
    let mut ids = NodeIds::new();
    let a = interface(&mut ids, "A", CompositeKind::Structure).conforming_to(NominalType::simple("B"));
    let b = interface(&mut ids, "B", CompositeKind::Structure).conforming_to(NominalType::simple("A"));

    let output = check(vec![a.into(), b.into()]);
    assert_eq!(
        kinds(&output),
        vec![ErrorKind::InvalidConformance, ErrorKind::InvalidConformance]
    );
}

#[test]
fn test_conformance_must_name_an_interface() {
    let mut ids = NodeIds::new();
    let s = composite(&mut ids, "S", CompositeKind::Structure);
    let i = interface(&mut ids, "I", CompositeKind::Structure)
        .conforming_to(NominalType::simple("S"))
        .conforming_to(NominalType::simple("Missing"));

    let output = check(vec![s.into(), i.into()]);
    assert_eq!(
        kinds(&output),
        vec![ErrorKind::InvalidConformance, ErrorKind::UndefinedName]
    );
}

// ============================================================================
// Kinds
// ============================================================================

#[test]
fn test_kind_mismatch() {
    let mut ids = NodeIds::new();
    let r = interface(&mut ids, "R", CompositeKind::Resource);
    let s = interface(&mut ids, "S", CompositeKind::Structure).conforming_to(NominalType::simple("R"));
    let t = composite(&mut ids, "T", CompositeKind::Structure).conforming_to(NominalType::simple("R"));

    let output = check(vec![r.into(), s.into(), t.into()]);
    assert_eq!(
        kinds(&output),
        vec![ErrorKind::KindMismatch, ErrorKind::KindMismatch]
    );
    assert!(output.diagnostics[0]
        .message
        .contains("cannot conform to resource interface `R`"));
}

#[test]
fn test_enum_and_event_interfaces_are_invalid() {
    let mut ids = NodeIds::new();
    let e = interface(&mut ids, "E", CompositeKind::Enum);
    let v = interface(&mut ids, "V", CompositeKind::Event);

    let output = check(vec![e.into(), v.into()]);
    assert_eq!(
        kinds(&output),
        vec![
            ErrorKind::InvalidInterfaceDeclaration,
            ErrorKind::InvalidInterfaceDeclaration
        ]
    );
}

#[test]
fn test_nested_declarations_only_in_contracts() {
    let mut ids = NodeIds::new();
    let s = composite(&mut ids, "S", CompositeKind::Structure)
        .with_composite(composite(&mut ids, "R", CompositeKind::Resource));
    let c = composite(&mut ids, "C", CompositeKind::Contract)
        .with_composite(composite(&mut ids, "D", CompositeKind::Contract));

    let output = check(vec![s.into(), c.into()]);
    assert_eq!(
        kinds(&output),
        vec![
            ErrorKind::InvalidNestedDeclaration,
            ErrorKind::InvalidNestedDeclaration
        ]
    );
}

// ============================================================================
// Function bodies
// ============================================================================

#[test]
fn test_empty_interface_body_needs_conditions() {
    let mut ids = NodeIds::new();
    let empty = interface(&mut ids, "I", CompositeKind::Structure).with_function(
        FunctionDeclaration::new(PrimitiveAccess::Public, Identifier::synthetic("f"))
            .with_body(FunctionBlock::empty()),
    );
    assert_eq!(kinds(&check(vec![empty.into()])), vec![ErrorKind::InvalidImplementation]);

    let mut ids = NodeIds::new();
    let conditioned = interface(&mut ids, "I", CompositeKind::Structure).with_function(
        FunctionDeclaration::new(PrimitiveAccess::Public, Identifier::synthetic("f")).with_body(
            FunctionBlock::empty().with_post_condition(Condition::new(Expression::literal("true"))),
        ),
    );
    assert!(check(vec![conditioned.into()]).diagnostics.is_empty());
}

#[test]
fn test_interface_initializer_cannot_have_statements() {
    let mut ids = NodeIds::new();
    let i = interface(&mut ids, "I", CompositeKind::Structure).with_special_function(
        FunctionDeclaration::new(PrimitiveAccess::NotSpecified, Identifier::synthetic("init"))
            .with_body(statement_body()),
    );

    let output = check(vec![i.into()]);
    assert_eq!(kinds(&output), vec![ErrorKind::SpecialFunctionImplementation]);
}

#[test]
fn test_destructors_belong_to_resources() {
    let destroy = || {
        FunctionDeclaration::new(PrimitiveAccess::NotSpecified, Identifier::synthetic("destroy"))
            .with_body(FunctionBlock::empty())
    };
    let mut ids = NodeIds::new();
    let s = composite(&mut ids, "S", CompositeKind::Structure).with_special_function(destroy());
    let r = composite(&mut ids, "R", CompositeKind::Resource).with_special_function(destroy());

    let output = check(vec![s.into(), r.into()]);
    assert_eq!(kinds(&output), vec![ErrorKind::InvalidDestructor]);
}

// ============================================================================
// Composite conformance
// ============================================================================

#[test]
fn test_missing_and_mismatched_requirements() {
    let mut ids = NodeIds::new();
    let a = interface(&mut ids, "A", CompositeKind::Structure)
        .with_function(requirement("f", "Int"))
        .with_function(requirement("g", "Int"));
    let s = composite(&mut ids, "S", CompositeKind::Structure)
        .conforming_to(NominalType::simple("A"))
        .with_function(implemented("f", "String", "\"one\""));

    let output = check(vec![a.into(), s.into()]);
    assert_eq!(
        kinds(&output),
        vec![ErrorKind::ConformanceMismatch, ErrorKind::ConformanceMismatch]
    );
    assert!(output.diagnostics[0].message.contains("function `f` does not match"));
    assert!(output.diagnostics[1].message.contains("missing function `g`"));
}

#[test]
fn test_escalated_access_is_rejected() {
    let mut ids = NodeIds::new();
    let a = interface(&mut ids, "A", CompositeKind::Structure).with_function(requirement("f", "Int"));
    let mut narrow = implemented("f", "Int", "1");
    narrow.access = PrimitiveAccess::Account.into();
    let s = composite(&mut ids, "S", CompositeKind::Structure)
        .conforming_to(NominalType::simple("A"))
        .with_function(narrow);
    let program = vec![a.into(), s.into()];

    assert_eq!(kinds(&check(program.clone())), vec![ErrorKind::ConformanceMismatch]);

    let unchecked = CheckerConfig::new().with_access_check_mode(AccessCheckMode::None);
    assert!(check_with(unchecked, program).diagnostics.is_empty());
}

#[test]
fn test_entitled_requirements() {
    let mut ids = NodeIds::new();
    let e = entitlement(&mut ids, "E");
    let mut required = requirement("f", "Int");
    required.access = entitled(&["E"]);
    let a = interface(&mut ids, "A", CompositeKind::Resource).with_function(required);

    let mut same = implemented("f", "Int", "1");
    same.access = entitled(&["E"]);
    let r = composite(&mut ids, "R", CompositeKind::Resource)
        .conforming_to(NominalType::simple("A"))
        .with_function(same);

    let output = check(vec![e.into(), a.into(), r.into()]);
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
}

#[test]
fn test_entitled_implementation_of_public_requirement() {
    let mut ids = NodeIds::new();
    let e = entitlement(&mut ids, "E");
    let a = interface(&mut ids, "A", CompositeKind::Resource).with_function(requirement("f", "Int"));
    let mut gated = implemented("f", "Int", "1");
    gated.access = entitled(&["E"]);
    let r = composite(&mut ids, "R", CompositeKind::Resource)
        .conforming_to(NominalType::simple("A"))
        .with_function(gated);

    let output = check(vec![e.into(), a.into(), r.into()]);
    assert_eq!(kinds(&output), vec![ErrorKind::ConformanceMismatch]);
}

#[test]
fn test_default_function_conflict() {
    let mut ids = NodeIds::new();
    let a = interface(&mut ids, "A", CompositeKind::Structure)
        .with_function(implemented("g", "Int", "1"));
    let b = interface(&mut ids, "B", CompositeKind::Structure)
        .with_function(implemented("g", "Int", "2"));
    let s = composite(&mut ids, "S", CompositeKind::Structure)
        .conforming_to(NominalType::simple("A"))
        .conforming_to(NominalType::simple("B"));

    let output = check(vec![a.into(), b.into(), s.into()]);
    assert_eq!(kinds(&output), vec![ErrorKind::DefaultFunctionConflict]);
}

#[test]
fn test_type_requirements_must_be_provided() {
    let token = |ids: &mut NodeIds| {
        interface(ids, "Token", CompositeKind::Contract)
            .with_composite(composite(ids, "Vault", CompositeKind::Resource))
    };

    let mut ids = NodeIds::new();
    let without = composite(&mut ids, "T", CompositeKind::Contract)
        .conforming_to(NominalType::simple("Token"));
    let output = check(vec![token(&mut ids).into(), without.into()]);
    assert_eq!(kinds(&output), vec![ErrorKind::ConformanceMismatch]);
    assert!(output.diagnostics[0].message.contains("missing nested resource `Vault`"));

    let mut ids = NodeIds::new();
    let wrong_kind = composite(&mut ids, "T", CompositeKind::Contract)
        .conforming_to(NominalType::simple("Token"))
        .with_composite(composite(&mut ids, "Vault", CompositeKind::Structure));
    let output = check(vec![token(&mut ids).into(), wrong_kind.into()]);
    assert_eq!(kinds(&output), vec![ErrorKind::ConformanceMismatch]);

    let mut ids = NodeIds::new();
    let with = composite(&mut ids, "T", CompositeKind::Contract)
        .conforming_to(NominalType::simple("Token"))
        .with_composite(composite(&mut ids, "Vault", CompositeKind::Resource));
    let output = check(vec![token(&mut ids).into(), with.into()]);
    assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
}

// ============================================================================
// Access control
// ============================================================================

#[test]
fn test_entitlement_sets_order_by_inclusion() {
    let mut ids = NodeIds::new();
    let e1 = entitlement(&mut ids, "E1");
    let e2 = entitlement(&mut ids, "E2");
    let (e1_decl, e2_decl) = (e1.id, e2.id);
    let output = check(vec![e1.into(), e2.into()]);

    let e1 = output.elaboration.entitlement_of(e1_decl).unwrap();
    let e2 = output.elaboration.entitlement_of(e2_decl).unwrap();
    let a = Access::Entitlement(EntitlementSetAccess::conjunctive([e1]));
    let b = Access::Entitlement(EntitlementSetAccess::conjunctive([e1, e2]));

    assert!(a.is_less_permissive_than(&b));
    assert!(!b.is_less_permissive_than(&a));
    assert_eq!(b.keyword(&output.arena), "access(E1, E2)");
}

#[test]
fn test_access_names_must_be_entitlements() {
    let mut ids = NodeIds::new();
    let t = composite(&mut ids, "T", CompositeKind::Structure);
    let mut missing = FunctionDeclaration::new(PrimitiveAccess::Public, Identifier::synthetic("f"))
        .with_body(statement_body());
    missing.access = entitled(&["Missing"]);
    let mut not_entitlement =
        FunctionDeclaration::new(PrimitiveAccess::Public, Identifier::synthetic("g"))
            .with_body(statement_body());
    not_entitlement.access = entitled(&["T"]);
    let s = composite(&mut ids, "S", CompositeKind::Structure)
        .with_function(missing)
        .with_function(not_entitlement);

    let output = check(vec![t.into(), s.into()]);
    assert_eq!(
        kinds(&output),
        vec![ErrorKind::UndefinedName, ErrorKind::InvalidEntitlement]
    );
}

#[test]
fn test_entitlement_declaration_access() {
    let mut ids = NodeIds::new();
    let settable = EntitlementDeclaration::new(
        &mut ids,
        PrimitiveAccess::PublicSettable,
        Identifier::synthetic("E"),
    );

    let output = check(vec![settable.into()]);
    assert_eq!(kinds(&output), vec![ErrorKind::InvalidAccessModifier]);
}

#[test]
fn test_strict_mode_requires_access_modifiers() {
    let mut ids = NodeIds::new();
    let i = cadence_ast::InterfaceDeclaration::new(
        &mut ids,
        PrimitiveAccess::NotSpecified,
        CompositeKind::Structure,
        Identifier::synthetic("I"),
    )
    .with_function(FunctionDeclaration::new(
        PrimitiveAccess::NotSpecified,
        Identifier::synthetic("f"),
    ));
    let program = vec![i.into()];

    let strict = CheckerConfig::from_json(r#"{ "access_check_mode": "Strict" }"#).unwrap();
    assert_eq!(
        kinds(&check_with(strict, program.clone())),
        vec![
            ErrorKind::MissingAccessModifier,
            ErrorKind::MissingAccessModifier
        ]
    );
    assert!(check(program).diagnostics.is_empty());
}

#[test]
fn test_settable_only_on_variables() {
    let mut ids = NodeIds::new();
    let s = composite(&mut ids, "S", CompositeKind::Structure)
        .with_field(field(PrimitiveAccess::PublicSettable, VariableKind::Constant, "a", "Int"))
        .with_field(field(PrimitiveAccess::PublicSettable, VariableKind::Variable, "b", "Int"));

    let output = check(vec![s.into()]);
    assert_eq!(kinds(&output), vec![ErrorKind::InvalidAccessModifier]);
}

// ============================================================================
// Fields
// ============================================================================

#[test]
fn test_contract_fields_must_be_storable() {
    let mut ids = NodeIds::new();
    let callback = FieldDeclaration::new(
        PrimitiveAccess::Public,
        VariableKind::Constant,
        Identifier::synthetic("callback"),
        TypeAnnotation::new(
            TypeExpr::Function {
                parameters: vec![],
                return_type: Box::new(TypeExpr::named("Int")),
            },
            Span::synthetic(),
        ),
    );
    let c = composite(&mut ids, "C", CompositeKind::Contract)
        .with_field(callback)
        .with_field(field(PrimitiveAccess::Public, VariableKind::Variable, "total", "UFix64"));

    let output = check(vec![c.into()]);
    assert_eq!(kinds(&output), vec![ErrorKind::FieldTypeNotStorable]);
    assert!(output.diagnostics[0].message.contains("`callback`"));
}

#[test]
fn test_structures_cannot_hold_resources() {
    let mut ids = NodeIds::new();
    let r = composite(&mut ids, "R", CompositeKind::Resource);
    let s = composite(&mut ids, "S", CompositeKind::Structure)
        .with_field(field(PrimitiveAccess::Public, VariableKind::Constant, "r", "R"));
    let holder = composite(&mut ids, "Holder", CompositeKind::Resource)
        .with_field(field(PrimitiveAccess::Public, VariableKind::Constant, "r", "R"));

    let output = check(vec![r.into(), s.into(), holder.into()]);
    assert_eq!(kinds(&output), vec![ErrorKind::InvalidResourceField]);
}

#[test]
fn test_unknown_field_type_does_not_cascade() {
    let mut ids = NodeIds::new();
    let a = interface(&mut ids, "A", CompositeKind::Structure)
        .with_field(field(PrimitiveAccess::Public, VariableKind::Constant, "x", "Missing"));
    let b = interface(&mut ids, "B", CompositeKind::Structure)
        .with_field(field(PrimitiveAccess::Public, VariableKind::Constant, "x", "Int"));
    let c = interface(&mut ids, "C", CompositeKind::Structure)
        .conforming_to(NominalType::simple("A"))
        .conforming_to(NominalType::simple("B"));

    let output = check(vec![a.into(), b.into(), c.into()]);
    assert_eq!(kinds(&output), vec![ErrorKind::UndefinedName]);
}

// ============================================================================
// Driver
// ============================================================================

#[test]
fn test_position_info_records_member_origins() {
    let mut ids = NodeIds::new();
    let i = interface(&mut ids, "I", CompositeKind::Structure).with_function(requirement("f", "Int"));
    let i_decl = i.id;
    let program = vec![i.into()];

    let output = check_with(CheckerConfig::new().with_position_info(true), program.clone());
    let ty = output.elaboration.type_of(i_decl).unwrap();
    assert!(output.elaboration.member_origin(ty, "f").is_some());

    assert_eq!(check(program).elaboration.member_origin_count(), 0);
}

#[test]
fn test_diagnostics_are_deterministic() {
    let build = || {
        let mut ids = NodeIds::new();
        let a = interface(&mut ids, "A", CompositeKind::Structure)
            .with_function(implemented("f", "Int", "1"))
            .with_function(requirement("g", "Int"));
        let b = interface(&mut ids, "B", CompositeKind::Structure)
            .with_function(implemented("f", "Int", "1"))
            .with_function(requirement("g", "String"));
        let c = interface(&mut ids, "C", CompositeKind::Structure)
            .conforming_to(NominalType::simple("A"))
            .conforming_to(NominalType::simple("B"));
        vec![a.into(), b.into(), c.into()]
    };

    let first: Vec<String> = check(build()).diagnostics.iter().map(|d| d.to_string()).collect();
    let second: Vec<String> = check(build()).diagnostics.iter().map(|d| d.to_string()).collect();
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[test]
fn test_checking_twice_is_an_internal_error() {
    let mut ids = NodeIds::new();
    let i = interface(&mut ids, "I", CompositeKind::Structure);
    let i_decl = i.id;
    let program = Program::new(vec![i.into()]);

    let mut checker = Checker::new(CheckerConfig::default());
    checker.check_program(&program).unwrap();
    let err = checker.check_program(&program).unwrap_err();
    assert_eq!(err, InternalError::AlreadyDeclared { declaration: i_decl });

    let diagnostic = err.into_diagnostic();
    assert_eq!(diagnostic.kind, ErrorKind::Internal);
    assert!(diagnostic.is_error());
}

#[test]
fn test_formatter_points_at_the_conflict() {
    let source = "\
pub struct interface A { pub fun f(): Int { return 1 } }
pub struct interface B { pub fun f(): Int { return 1 } }
pub struct interface C: A, B {}
";
    let mut sources = SourceMap::new();
    let file_id = sources.add_file(PathBuf::from("C.cdc"), source.to_string());
    let offset = source.find("C:").unwrap() as u32;
    let c_identifier = Identifier::new("C", Span::new(file_id, offset, offset + 1, 3));

    let mut ids = NodeIds::new();
    let a = interface(&mut ids, "A", CompositeKind::Structure)
        .with_function(implemented("f", "Int", "1"));
    let b = interface(&mut ids, "B", CompositeKind::Structure)
        .with_function(implemented("f", "Int", "1"));
    let c = cadence_ast::InterfaceDeclaration::new(
        &mut ids,
        PrimitiveAccess::Public,
        CompositeKind::Structure,
        c_identifier,
    )
    .conforming_to(NominalType::simple("A"))
    .conforming_to(NominalType::simple("B"));

    let output = check(vec![a.into(), b.into(), c.into()]);
    let formatted = DiagnosticFormatter::new(&sources).format_all(&output.diagnostics);

    assert!(formatted.starts_with("error: member conflict: `C` has conflicting function `f`"));
    assert!(formatted.contains("--> C.cdc:3:22"));
    assert!(formatted.contains("pub struct interface C: A, B {}"));
    assert!(formatted.contains("= note: declared in `B`"));
}
