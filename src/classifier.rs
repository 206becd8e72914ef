use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::registry::{
    COLLECTION_TYPE, COMPARABLE_TYPE, LoadedType, NUMBER_TYPE, OtherHasher, STRING_TYPE,
    TypeProvider,
};

/// The category an authoring UI uses to pick operators for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SemanticFieldType {
    Numeric,
    String,
    Collection,
    Comparable,
    /// No classification, the UI falls back to generic operators.
    Unknown,
}

impl SemanticFieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "NUMERIC",
            Self::String => "STRING",
            Self::Collection => "COLLECTION",
            Self::Comparable => "COMPARABLE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for SemanticFieldType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// First match wins, so a numeric wrapper that is also comparable stays `Numeric`.
pub fn classify<P: TypeProvider + ?Sized>(ty: Option<&LoadedType>, provider: &P) -> SemanticFieldType {
    let Some(ty) = ty else {
        return SemanticFieldType::Unknown;
    };
    if ty.is_primitive() && ty.name() != "boolean" {
        SemanticFieldType::Numeric
    } else if is_subtype_of(ty, NUMBER_TYPE, provider) {
        SemanticFieldType::Numeric
    } else if is_subtype_of(ty, STRING_TYPE, provider) {
        SemanticFieldType::String
    } else if is_subtype_of(ty, COLLECTION_TYPE, provider) {
        SemanticFieldType::Collection
    } else if is_subtype_of(ty, COMPARABLE_TYPE, provider) {
        SemanticFieldType::Comparable
    } else {
        SemanticFieldType::Unknown
    }
}

/// Reflexive and transitive. Supertypes the provider cannot produce are skipped.
pub fn is_subtype_of<P: TypeProvider + ?Sized>(ty: &LoadedType, concept: &str, provider: &P) -> bool {
    let mut pending = vec![ty.clone()];
    let mut seen = HashSet::<String, OtherHasher>::default();
    while let Some(current) = pending.pop() {
        if current.name() == concept {
            return true;
        }
        if !seen.insert(current.name().to_owned()) {
            continue;
        }
        for supertype in current.descriptor().supertypes() {
            if let Ok(Some(parent)) = provider.resolve_by_name(&supertype) {
                pending.push(parent);
            }
        }
    }
    false
}
