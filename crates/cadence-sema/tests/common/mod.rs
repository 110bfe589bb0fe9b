//! Declaration-tree builders shared by the integration tests.

#![allow(dead_code)]

use cadence_ast::{
    Access, Block, CompositeDeclaration, CompositeKind, Declaration, EntitlementDeclaration,
    EntitlementSet, Expression, FieldDeclaration, FunctionBlock, FunctionDeclaration, Identifier,
    InterfaceDeclaration, NodeIds, NominalType, PrimitiveAccess, Program, Statement,
    TypeAnnotation, VariableKind,
};
use cadence_sema::{check_program, CheckOutput, CheckerConfig, ErrorKind};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: Once = Once::new();

/// Installs a test-friendly subscriber once per test binary. `RUST_LOG`
/// overrides the default filter.
pub fn init_logging() {
    LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,cadence_sema=info"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .try_init();
    });
}

pub fn interface(ids: &mut NodeIds, name: &str, kind: CompositeKind) -> InterfaceDeclaration {
    InterfaceDeclaration::new(ids, PrimitiveAccess::Public, kind, Identifier::synthetic(name))
}

pub fn composite(ids: &mut NodeIds, name: &str, kind: CompositeKind) -> CompositeDeclaration {
    CompositeDeclaration::new(ids, PrimitiveAccess::Public, kind, Identifier::synthetic(name))
}

pub fn entitlement(ids: &mut NodeIds, name: &str) -> EntitlementDeclaration {
    EntitlementDeclaration::new(ids, PrimitiveAccess::Public, Identifier::synthetic(name))
}

/// `pub fun name(): return_type` without a body.
pub fn requirement(name: &str, return_type: &str) -> FunctionDeclaration {
    FunctionDeclaration::new(PrimitiveAccess::Public, Identifier::synthetic(name))
        .returning(TypeAnnotation::named(return_type))
}

/// `pub fun name(): return_type { return value }`
pub fn implemented(name: &str, return_type: &str, value: &str) -> FunctionDeclaration {
    requirement(name, return_type).with_body(FunctionBlock::new(Block::new(vec![
        Statement::ret(Expression::literal(value)),
    ])))
}

pub fn field(access: PrimitiveAccess, kind: VariableKind, name: &str, ty: &str) -> FieldDeclaration {
    FieldDeclaration::new(
        access,
        kind,
        Identifier::synthetic(name),
        TypeAnnotation::named(ty),
    )
}

/// `access(E1, E2, ..)`
pub fn entitled(names: &[&str]) -> Access {
    Access::Entitlements(EntitlementSet::conjunctive(
        names.iter().map(|name| NominalType::simple(name)).collect(),
    ))
}

pub fn check(declarations: Vec<Declaration>) -> CheckOutput {
    check_with(CheckerConfig::default(), declarations)
}

pub fn check_with(config: CheckerConfig, declarations: Vec<Declaration>) -> CheckOutput {
    init_logging();
    check_program(&Program::new(declarations), config).unwrap()
}

pub fn kinds(output: &CheckOutput) -> Vec<ErrorKind> {
    output.diagnostics.iter().map(|d| d.kind).collect()
}
