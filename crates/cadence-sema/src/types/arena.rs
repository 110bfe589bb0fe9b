use super::{EntitlementId, Location, Type, TypeId};
use crate::access::Access;
use cadence_ast::{CompositeKind, DeclarationKind, Identifier, VariableKind};
use indexmap::{IndexMap, IndexSet};

/// Resolved member of an interface or composite.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    /// Type that declares the member
    pub container: TypeId,
    pub identifier: Identifier,
    pub declaration_kind: DeclarationKind,
    pub access: Access,
    /// Field type, or the function type of a function
    pub ty: Type,
    /// `let`/`var`, fields only
    pub variable_kind: Option<VariableKind>,
    pub argument_labels: Vec<String>,
    /// Body has at least one statement
    pub has_implementation: bool,
    /// Body has pre- or post-conditions
    pub has_conditions: bool,
    pub doc_string: Option<String>,
}

impl Member {
    pub fn field(
        container: TypeId,
        identifier: Identifier,
        access: Access,
        variable_kind: VariableKind,
        ty: Type,
    ) -> Self {
        Self {
            container,
            identifier,
            declaration_kind: DeclarationKind::Field,
            access,
            ty,
            variable_kind: Some(variable_kind),
            argument_labels: Vec::new(),
            has_implementation: false,
            has_conditions: false,
            doc_string: None,
        }
    }

    pub fn function(
        container: TypeId,
        identifier: Identifier,
        access: Access,
        ty: Type,
        argument_labels: Vec<String>,
    ) -> Self {
        Self {
            container,
            identifier,
            declaration_kind: DeclarationKind::Function,
            access,
            ty,
            variable_kind: None,
            argument_labels,
            has_implementation: false,
            has_conditions: false,
            doc_string: None,
        }
    }

    pub fn with_implementation(mut self, has_implementation: bool) -> Self {
        self.has_implementation = has_implementation;
        self
    }

    pub fn with_conditions(mut self, has_conditions: bool) -> Self {
        self.has_conditions = has_conditions;
        self
    }

    pub fn name(&self) -> &str {
        &self.identifier.name
    }

    /// Body carries an implementation or conditions a conformer would inherit.
    pub fn has_default(&self) -> bool {
        self.has_implementation || self.has_conditions
    }
}

/// Resolved initializer or function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub label: String,
    pub identifier: Identifier,
    pub ty: Type,
}

/// Type declared inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NestedType {
    Interface(TypeId),
    Composite(TypeId),
    Entitlement(EntitlementId),
}

impl NestedType {
    /// Handle of a nested interface or composite; entitlements are markers
    /// and do not take part in nested-type conflicts.
    pub fn composite_kinded(self) -> Option<TypeId> {
        match self {
            NestedType::Interface(id) | NestedType::Composite(id) => Some(id),
            NestedType::Entitlement(_) => None,
        }
    }

    pub fn declaration_kind(self, arena: &TypeArena) -> DeclarationKind {
        match self {
            NestedType::Interface(id) | NestedType::Composite(id) => {
                arena.get(id).declaration_kind()
            }
            NestedType::Entitlement(_) => DeclarationKind::Entitlement,
        }
    }
}

/// `struct interface`, `resource interface` or `contract interface`.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceType {
    pub location: Location,
    pub identifier: Identifier,
    pub composite_kind: CompositeKind,
    pub container: Option<TypeId>,
    /// Declared conformances in source order
    pub explicit_conformances: IndexSet<TypeId>,
    pub nested_types: IndexMap<String, NestedType>,
    pub members: IndexMap<String, Member>,
    /// Field names in declaration order
    pub fields: Vec<String>,
    pub initializer_parameters: Vec<Parameter>,
    pub doc_string: Option<String>,
}

impl InterfaceType {
    pub fn new(location: Location, identifier: Identifier, composite_kind: CompositeKind) -> Self {
        Self {
            location,
            identifier,
            composite_kind,
            container: None,
            explicit_conformances: IndexSet::new(),
            nested_types: IndexMap::new(),
            members: IndexMap::new(),
            fields: Vec::new(),
            initializer_parameters: Vec::new(),
            doc_string: None,
        }
    }
}

/// Concrete structure, resource, contract, event or enum.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeType {
    pub location: Location,
    pub identifier: Identifier,
    pub composite_kind: CompositeKind,
    pub container: Option<TypeId>,
    pub explicit_conformances: IndexSet<TypeId>,
    pub nested_types: IndexMap<String, NestedType>,
    pub members: IndexMap<String, Member>,
    pub fields: Vec<String>,
    pub initializer_parameters: Vec<Parameter>,
    /// Functions the composite does not declare but inherits a default
    /// implementation for, with the interface that supplies it
    pub default_functions: IndexMap<String, TypeId>,
    pub doc_string: Option<String>,
}

impl CompositeType {
    pub fn new(location: Location, identifier: Identifier, composite_kind: CompositeKind) -> Self {
        Self {
            location,
            identifier,
            composite_kind,
            container: None,
            explicit_conformances: IndexSet::new(),
            nested_types: IndexMap::new(),
            members: IndexMap::new(),
            fields: Vec::new(),
            initializer_parameters: Vec::new(),
            default_functions: IndexMap::new(),
            doc_string: None,
        }
    }
}

/// Declared entitlement.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitlementType {
    pub location: Location,
    pub identifier: Identifier,
    pub container: Option<TypeId>,
}

/// Arena entry for a composite-kinded type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDef {
    Interface(InterfaceType),
    Composite(CompositeType),
}

impl TypeDef {
    pub fn is_interface(&self) -> bool {
        matches!(self, TypeDef::Interface(_))
    }

    pub fn identifier(&self) -> &Identifier {
        match self {
            TypeDef::Interface(ty) => &ty.identifier,
            TypeDef::Composite(ty) => &ty.identifier,
        }
    }

    pub fn composite_kind(&self) -> CompositeKind {
        match self {
            TypeDef::Interface(ty) => ty.composite_kind,
            TypeDef::Composite(ty) => ty.composite_kind,
        }
    }

    pub fn declaration_kind(&self) -> DeclarationKind {
        self.composite_kind().declaration_kind(self.is_interface())
    }

    pub fn location(&self) -> &Location {
        match self {
            TypeDef::Interface(ty) => &ty.location,
            TypeDef::Composite(ty) => &ty.location,
        }
    }

    pub fn container(&self) -> Option<TypeId> {
        match self {
            TypeDef::Interface(ty) => ty.container,
            TypeDef::Composite(ty) => ty.container,
        }
    }

    pub fn explicit_conformances(&self) -> &IndexSet<TypeId> {
        match self {
            TypeDef::Interface(ty) => &ty.explicit_conformances,
            TypeDef::Composite(ty) => &ty.explicit_conformances,
        }
    }

    pub fn members(&self) -> &IndexMap<String, Member> {
        match self {
            TypeDef::Interface(ty) => &ty.members,
            TypeDef::Composite(ty) => &ty.members,
        }
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members().get(name)
    }

    pub fn nested_types(&self) -> &IndexMap<String, NestedType> {
        match self {
            TypeDef::Interface(ty) => &ty.nested_types,
            TypeDef::Composite(ty) => &ty.nested_types,
        }
    }

    pub fn fields(&self) -> &[String] {
        match self {
            TypeDef::Interface(ty) => &ty.fields,
            TypeDef::Composite(ty) => &ty.fields,
        }
    }

    pub fn initializer_parameters(&self) -> &[Parameter] {
        match self {
            TypeDef::Interface(ty) => &ty.initializer_parameters,
            TypeDef::Composite(ty) => &ty.initializer_parameters,
        }
    }

    pub(crate) fn set_container(&mut self, container: TypeId) {
        match self {
            TypeDef::Interface(ty) => ty.container = Some(container),
            TypeDef::Composite(ty) => ty.container = Some(container),
        }
    }

    pub(crate) fn explicit_conformances_mut(&mut self) -> &mut IndexSet<TypeId> {
        match self {
            TypeDef::Interface(ty) => &mut ty.explicit_conformances,
            TypeDef::Composite(ty) => &mut ty.explicit_conformances,
        }
    }

    pub(crate) fn nested_types_mut(&mut self) -> &mut IndexMap<String, NestedType> {
        match self {
            TypeDef::Interface(ty) => &mut ty.nested_types,
            TypeDef::Composite(ty) => &mut ty.nested_types,
        }
    }

    /// Installs the member map built by the member pass.
    pub(crate) fn set_members(
        &mut self,
        members: IndexMap<String, Member>,
        fields: Vec<String>,
        initializer_parameters: Vec<Parameter>,
    ) {
        let (slot_members, slot_fields, slot_parameters) = match self {
            TypeDef::Interface(ty) => (
                &mut ty.members,
                &mut ty.fields,
                &mut ty.initializer_parameters,
            ),
            TypeDef::Composite(ty) => (
                &mut ty.members,
                &mut ty.fields,
                &mut ty.initializer_parameters,
            ),
        };
        *slot_members = members;
        *slot_fields = fields;
        *slot_parameters = initializer_parameters;
    }
}

/// Owner of every declared interface, composite and entitlement.
///
/// Handles are indices and stay valid for the lifetime of the arena; types
/// are never removed.
#[derive(Debug, Clone, Default)]
pub struct TypeArena {
    types: Vec<TypeDef>,
    entitlements: Vec<EntitlementType>,
}

impl TypeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_interface(&mut self, interface: InterfaceType) -> TypeId {
        self.alloc(TypeDef::Interface(interface))
    }

    pub fn alloc_composite(&mut self, composite: CompositeType) -> TypeId {
        self.alloc(TypeDef::Composite(composite))
    }

    fn alloc(&mut self, def: TypeDef) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(def);
        id
    }

    pub fn alloc_entitlement(&mut self, entitlement: EntitlementType) -> EntitlementId {
        let id = EntitlementId(self.entitlements.len() as u32);
        self.entitlements.push(entitlement);
        id
    }

    pub fn get(&self, id: TypeId) -> &TypeDef {
        &self.types[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: TypeId) -> &mut TypeDef {
        &mut self.types[id.0 as usize]
    }

    pub fn interface(&self, id: TypeId) -> Option<&InterfaceType> {
        match self.get(id) {
            TypeDef::Interface(interface) => Some(interface),
            TypeDef::Composite(_) => None,
        }
    }

    pub fn composite(&self, id: TypeId) -> Option<&CompositeType> {
        match self.get(id) {
            TypeDef::Composite(composite) => Some(composite),
            TypeDef::Interface(_) => None,
        }
    }

    pub(crate) fn composite_mut(&mut self, id: TypeId) -> Option<&mut CompositeType> {
        match self.get_mut(id) {
            TypeDef::Composite(composite) => Some(composite),
            TypeDef::Interface(_) => None,
        }
    }

    pub fn entitlement(&self, id: EntitlementId) -> &EntitlementType {
        &self.entitlements[id.0 as usize]
    }

    pub(crate) fn set_entitlement_container(&mut self, id: EntitlementId, container: TypeId) {
        self.entitlements[id.0 as usize].container = Some(container);
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> {
        self.types
            .iter()
            .enumerate()
            .map(|(index, def)| (TypeId(index as u32), def))
    }

    /// Dotted path through the containers, e.g. `C.R`.
    pub fn qualified_identifier(&self, id: TypeId) -> String {
        let def = self.get(id);
        self.qualify(def.container(), &def.identifier().name)
    }

    pub fn entitlement_qualified_identifier(&self, id: EntitlementId) -> String {
        let entitlement = self.entitlement(id);
        self.qualify(entitlement.container, &entitlement.identifier.name)
    }

    fn qualify(&self, mut container: Option<TypeId>, name: &str) -> String {
        let mut segments = vec![name.to_string()];
        while let Some(id) = container {
            let def = self.get(id);
            segments.push(def.identifier().name.clone());
            container = def.container();
        }
        segments.reverse();
        segments.join(".")
    }

    /// Location-qualified type ID, e.g. `A.0x01.C.R`.
    pub fn type_id_string(&self, id: TypeId) -> String {
        self.get(id)
            .location()
            .type_id(&self.qualified_identifier(id))
    }

    /// Every interface `id` conforms to, directly or through other interfaces.
    ///
    /// Explicit conformances in declaration order, each followed depth-first
    /// by its own conformances; each interface appears once and `id` itself
    /// never appears, even through a cycle.
    pub fn effective_conformances(&self, id: TypeId) -> Vec<TypeId> {
        let mut visited = IndexSet::new();
        visited.insert(id);
        self.collect_conformances(id, &mut visited);
        visited.shift_remove(&id);
        visited.into_iter().collect()
    }

    fn collect_conformances(&self, id: TypeId, visited: &mut IndexSet<TypeId>) {
        for &conformance in self.get(id).explicit_conformances() {
            if visited.insert(conformance) {
                self.collect_conformances(conformance, visited);
            }
        }
    }

    /// `ancestor` is among the effective conformances of `descendant`.
    pub fn is_ancestor(&self, ancestor: TypeId, descendant: TypeId) -> bool {
        ancestor != descendant && self.effective_conformances(descendant).contains(&ancestor)
    }
}
