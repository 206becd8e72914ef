use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasherDefault;
use std::sync::Arc;

// fast hashing for maps keyed by type names and resource paths
use seahash::SeaHasher;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::archive::ExpandedArchive;
use crate::error::{Result, SuggestionError};
use crate::settings::LoaderSettings;

pub type OtherHasher = BuildHasherDefault<SeaHasher>;

// Well-known types the classifier and the field inspector care about.
pub const UNIVERSAL_BASE: &str = "java.lang.Object";
pub const NUMBER_TYPE: &str = "java.lang.Number";
pub const STRING_TYPE: &str = "java.lang.String";
pub const COLLECTION_TYPE: &str = "java.util.Collection";
pub const COMPARABLE_TYPE: &str = "java.lang.Comparable";

const ARRAY_SUFFIX: &str = "[]";

// ------------- TypeDescriptor -------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Primitive,
    #[default]
    Class,
    Interface,
    Array,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
}
impl FieldDecl {
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_owned(),
            type_name: type_name.to_owned(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// Describes one type the way archives ship it: a JSON document holding the
/// fully-qualified name, the kind, direct supertypes and declared fields.
///
/// ```json
/// { "name": "com.acme.Order", "supertypes": ["com.acme.Entity"],
///   "fields": [ { "name": "total", "type": "java.math.BigDecimal" } ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    name: String,
    #[serde(default)]
    kind: TypeKind,
    #[serde(default)]
    supertypes: Vec<String>,
    #[serde(default)]
    fields: Vec<FieldDecl>,
}

impl TypeDescriptor {
    pub fn new(name: &str, kind: TypeKind) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            supertypes: Vec::new(),
            fields: Vec::new(),
        }
    }
    pub fn extends(mut self, supertype: &str) -> Self {
        self.supertypes.push(supertype.to_owned());
        self
    }
    pub fn field(mut self, name: &str, type_name: &str) -> Self {
        self.fields.push(FieldDecl::new(name, type_name));
        self
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn kind(&self) -> TypeKind {
        self.kind
    }
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }
    pub fn declared_supertypes(&self) -> &[String] {
        &self.supertypes
    }
    /// Declared supertypes, plus the universal base for classes and arrays.
    pub fn supertypes(&self) -> Vec<String> {
        let mut supertypes = self.supertypes.clone();
        let inherits_base = matches!(self.kind, TypeKind::Class | TypeKind::Array)
            && self.name != UNIVERSAL_BASE;
        if inherits_base && !supertypes.iter().any(|s| s == UNIVERSAL_BASE) {
            supertypes.push(String::from(UNIVERSAL_BASE));
        }
        supertypes
    }
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

// ------------- LoadedType -------------
/// A resolved type handle. Cheap to clone; the descriptor is shared.
#[derive(Debug, Clone)]
pub struct LoadedType {
    descriptor: Arc<TypeDescriptor>,
}
impl LoadedType {
    pub fn new(descriptor: TypeDescriptor) -> Self {
        Self {
            descriptor: Arc::new(descriptor),
        }
    }
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }
    pub fn short_name(&self) -> &str {
        short_name(self.descriptor.name())
    }
    pub fn kind(&self) -> TypeKind {
        self.descriptor.kind()
    }
    pub fn is_primitive(&self) -> bool {
        self.descriptor.kind() == TypeKind::Primitive
    }
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }
}
impl PartialEq for LoadedType {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}
impl Eq for LoadedType {}
impl fmt::Display for LoadedType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The simple name of a fully-qualified name, `com.acme.Order` -> `Order`.
pub fn short_name(qualified: &str) -> &str {
    match qualified.rfind('.') {
        Some(dot) => &qualified[dot + 1..],
        None => qualified,
    }
}

// ------------- TypeProvider -------------
/// Name to type lookup, backed by whatever the host knows plus expanded archives.
pub trait TypeProvider {
    /// Looks up a fully-qualified name. Never touches archives that were not
    /// loaded yet. An `Err` means a resource exists but cannot be decoded.
    fn resolve_by_name(&self, name: &str) -> Result<Option<LoadedType>>;
    /// Registers every resource of an expanded archive and returns how many were registered.
    fn load_from_archive(&mut self, archive: ExpandedArchive) -> usize;
    /// Forgets everything learned from archives.
    fn clear(&mut self);
}

// ------------- TypeRegistry -------------
// Keeps the ambient types (bootstrap plus anything the host defines) and the
// raw resources of expanded archives. Archive resources are decoded on lookup.
#[derive(Debug)]
pub struct TypeRegistry {
    ambient: HashMap<String, LoadedType, OtherHasher>,
    resources: HashMap<String, Vec<u8>, OtherHasher>,
    resource_suffix: String,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::with_settings(&LoaderSettings::default())
    }
    pub fn with_settings(settings: &LoaderSettings) -> Self {
        let mut registry = Self {
            ambient: HashMap::default(),
            resources: HashMap::default(),
            resource_suffix: settings.type_resource_suffix.clone(),
        };
        for descriptor in bootstrap() {
            registry.define(descriptor);
        }
        registry
    }
    /// Makes a type ambient. Returns the kept type and whether the name was already known,
    /// in which case the earlier definition stays.
    pub fn define(&mut self, descriptor: TypeDescriptor) -> (LoadedType, bool) {
        let name = descriptor.name().to_owned();
        let mut previously_kept = true;
        let kept = self.ambient.entry(name).or_insert_with(|| {
            previously_kept = false;
            LoadedType::new(descriptor)
        });
        (kept.clone(), previously_kept)
    }
    /// The archive path a type descriptor is expected at, `a.b.C` -> `a/b/C.type.json`.
    pub fn resource_path(&self, name: &str) -> String {
        format!("{}{}", name.replace('.', "/"), self.resource_suffix)
    }
    pub fn resource(&self, path: &str) -> Option<&[u8]> {
        self.resources.get(path).map(Vec::as_slice)
    }
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }
    pub fn len(&self) -> usize {
        self.ambient.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ambient.is_empty()
    }
    fn decode(&self, name: &str, bytes: &[u8]) -> Result<LoadedType> {
        let descriptor: TypeDescriptor =
            serde_json::from_slice(bytes).map_err(|e| SuggestionError::Descriptor {
                name: name.to_owned(),
                message: e.to_string(),
            })?;
        if descriptor.name() != name {
            return Err(SuggestionError::Descriptor {
                name: name.to_owned(),
                message: format!("resource declares type {}", descriptor.name()),
            });
        }
        Ok(LoadedType::new(descriptor))
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeProvider for TypeRegistry {
    fn resolve_by_name(&self, name: &str) -> Result<Option<LoadedType>> {
        if let Some(element) = name.strip_suffix(ARRAY_SUFFIX) {
            // arrays exist whenever their element type does
            return Ok(self
                .resolve_by_name(element.trim_end())?
                .map(|_| LoadedType::new(TypeDescriptor::new(name, TypeKind::Array))));
        }
        if let Some(kept) = self.ambient.get(name) {
            return Ok(Some(kept.clone()));
        }
        match self.resources.get(&self.resource_path(name)) {
            Some(bytes) => self.decode(name, bytes).map(Some),
            None => Ok(None),
        }
    }
    fn load_from_archive(&mut self, archive: ExpandedArchive) -> usize {
        let label = archive.label().to_owned();
        let mut registered = 0;
        for entry in archive.into_entries() {
            let (path, bytes) = entry.into_parts();
            debug!(archive = %label, %path, size = bytes.len(), "registering resource");
            self.resources.insert(path, bytes);
            registered += 1;
        }
        registered
    }
    fn clear(&mut self) {
        self.resources.clear();
    }
}

// The ambient namespace every registry starts out with.
fn bootstrap() -> Vec<TypeDescriptor> {
    use TypeKind::{Class, Interface, Primitive};
    let mut types = vec![
        // the universal base contributes the members authors never want to see
        TypeDescriptor::new(UNIVERSAL_BASE, Class)
            .field("class", "java.lang.Class")
            .field("hashCode", "int")
            .field("toString", STRING_TYPE),
        TypeDescriptor::new("java.lang.Class", Class),
        TypeDescriptor::new(COMPARABLE_TYPE, Interface),
        TypeDescriptor::new("java.lang.CharSequence", Interface),
        TypeDescriptor::new(NUMBER_TYPE, Class),
        TypeDescriptor::new(STRING_TYPE, Class)
            .extends("java.lang.CharSequence")
            .extends(COMPARABLE_TYPE),
        TypeDescriptor::new("java.lang.Boolean", Class).extends(COMPARABLE_TYPE),
        TypeDescriptor::new("java.lang.Character", Class).extends(COMPARABLE_TYPE),
        TypeDescriptor::new("java.lang.Enum", Class).extends(COMPARABLE_TYPE),
        TypeDescriptor::new("java.util.Date", Class).extends(COMPARABLE_TYPE),
        TypeDescriptor::new(COLLECTION_TYPE, Interface),
        TypeDescriptor::new("java.util.List", Interface).extends(COLLECTION_TYPE),
        TypeDescriptor::new("java.util.Set", Interface).extends(COLLECTION_TYPE),
        TypeDescriptor::new("java.util.Queue", Interface).extends(COLLECTION_TYPE),
        TypeDescriptor::new("java.util.ArrayList", Class).extends("java.util.List"),
        TypeDescriptor::new("java.util.LinkedList", Class)
            .extends("java.util.List")
            .extends("java.util.Queue"),
        TypeDescriptor::new("java.util.HashSet", Class).extends("java.util.Set"),
        TypeDescriptor::new("java.util.TreeSet", Class).extends("java.util.Set"),
        TypeDescriptor::new("java.util.Map", Interface),
        TypeDescriptor::new("java.util.HashMap", Class).extends("java.util.Map"),
    ];
    for primitive in ["boolean", "byte", "char", "short", "int", "long", "float", "double"] {
        types.push(TypeDescriptor::new(primitive, Primitive));
    }
    for wrapper in [
        "java.lang.Byte",
        "java.lang.Short",
        "java.lang.Integer",
        "java.lang.Long",
        "java.lang.Float",
        "java.lang.Double",
        "java.math.BigDecimal",
        "java.math.BigInteger",
    ] {
        types.push(
            TypeDescriptor::new(wrapper, Class)
                .extends(NUMBER_TYPE)
                .extends(COMPARABLE_TYPE),
        );
    }
    types
}
