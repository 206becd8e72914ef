use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::classifier::SemanticFieldType;
use crate::registry::OtherHasher;

// ------------- SuggestionModel -------------
/// Immutable snapshot of everything an authoring UI needs for suggestions.
/// Keys are short type names; `field_types` is keyed by `Type.field`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuggestionModel {
    fact_types: Vec<String>,
    fields: BTreeMap<String, Vec<String>>,
    field_types: BTreeMap<String, SemanticFieldType>,
    globals: BTreeMap<String, String>,
    condition_sentences: Vec<String>,
    action_sentences: Vec<String>,
}

impl SuggestionModel {
    pub fn fact_types(&self) -> &[String] {
        &self.fact_types
    }
    pub fn has_fact_type(&self, name: &str) -> bool {
        self.fact_types.iter().any(|t| t == name)
    }
    pub fn fields_for(&self, fact_type: &str) -> Option<&[String]> {
        self.fields.get(fact_type).map(Vec::as_slice)
    }
    pub fn field_type(&self, fact_type: &str, field: &str) -> Option<SemanticFieldType> {
        self.field_type_by_key(&field_key(fact_type, field))
    }
    pub fn field_type_by_key(&self, key: &str) -> Option<SemanticFieldType> {
        self.field_types.get(key).copied()
    }
    pub fn field_types(&self) -> &BTreeMap<String, SemanticFieldType> {
        &self.field_types
    }
    pub fn global_type(&self, identifier: &str) -> Option<&str> {
        self.globals.get(identifier).map(String::as_str)
    }
    pub fn globals(&self) -> &BTreeMap<String, String> {
        &self.globals
    }
    pub fn condition_sentences(&self) -> &[String] {
        &self.condition_sentences
    }
    pub fn action_sentences(&self) -> &[String] {
        &self.action_sentences
    }
}

/// `Order` + `total` -> `Order.total`
pub fn field_key(fact_type: &str, field: &str) -> String {
    format!("{}.{}", fact_type, field)
}

// ------------- ModelBuilder -------------
// Purely additive; nothing here can fail. Short-name collisions overwrite.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    fact_types: Vec<String>,
    fields: HashMap<String, Vec<String>, OtherHasher>,
    field_types: HashMap<String, SemanticFieldType, OtherHasher>,
    globals: HashMap<String, String, OtherHasher>,
    condition_sentences: Vec<String>,
    action_sentences: Vec<String>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn reset(&mut self) {
        *self = Self::default();
    }
    pub fn add_fact_type(&mut self, name: &str) {
        if !self.fact_types.iter().any(|t| t == name) {
            self.fact_types.push(name.to_owned());
        }
    }
    pub fn set_fields_for_type(&mut self, name: &str, fields: Vec<String>) {
        self.fields.insert(name.to_owned(), fields);
    }
    pub fn has_fields_for_type(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
    pub fn set_field_type(&mut self, key: &str, category: SemanticFieldType) {
        self.field_types.insert(key.to_owned(), category);
    }
    pub fn add_global(&mut self, identifier: &str, type_short_name: &str) {
        self.globals
            .insert(identifier.to_owned(), type_short_name.to_owned());
    }
    pub fn add_condition_sentence(&mut self, pattern: &str) {
        self.condition_sentences.push(pattern.to_owned());
    }
    pub fn add_action_sentence(&mut self, pattern: &str) {
        self.action_sentences.push(pattern.to_owned());
    }
    pub fn build(&self) -> SuggestionModel {
        SuggestionModel {
            fact_types: self.fact_types.clone(),
            fields: self
                .fields
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            field_types: self
                .field_types
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
            globals: self
                .globals
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            condition_sentences: self.condition_sentences.clone(),
            action_sentences: self.action_sentences.clone(),
        }
    }
}
