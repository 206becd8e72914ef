use std::collections::HashMap;

use crate::error::Result;
use crate::registry::{LoadedType, OtherHasher, TypeProvider, short_name};
use crate::settings::LoaderSettings;

const WILDCARD_SUFFIX: &str = ".*";

pub fn is_wildcard_import(target: &str) -> bool {
    target.ends_with(WILDCARD_SUFFIX)
}

// ------------- ImportContext -------------
#[derive(Debug, Clone, Default)]
pub struct ImportContext {
    explicit: HashMap<String, String, OtherHasher>, // short name -> qualified name
    wildcards: Vec<String>,                         // package prefixes, in declaration order
}

impl ImportContext {
    pub fn new() -> Self {
        Self::default()
    }
    /// Later imports sharing a short name shadow earlier ones.
    pub fn add_import(&mut self, target: &str) {
        match target.strip_suffix(WILDCARD_SUFFIX) {
            Some(package) => {
                if !self.wildcards.iter().any(|w| w == package) {
                    self.wildcards.push(package.to_owned());
                }
            }
            None => {
                self.explicit
                    .insert(short_name(target).to_owned(), target.to_owned());
            }
        }
    }
    /// The explicitly imported qualified name for a short name.
    pub fn qualify(&self, name: &str) -> Option<&str> {
        self.explicit.get(name).map(String::as_str)
    }
    pub fn wildcards(&self) -> &[String] {
        &self.wildcards
    }
    pub fn len(&self) -> usize {
        self.explicit.len() + self.wildcards.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ------------- TypeResolver -------------
/// Resolves symbolic type names the way authors write them in a package header:
/// imports first, then the default namespace, then primitive keywords.
#[derive(Debug, Clone)]
pub struct TypeResolver {
    imports: ImportContext,
    settings: LoaderSettings,
}

impl TypeResolver {
    pub fn new(settings: &LoaderSettings) -> Self {
        Self {
            imports: ImportContext::new(),
            settings: settings.clone(),
        }
    }
    pub fn add_import(&mut self, target: &str) {
        self.imports.add_import(target);
    }
    pub fn imports(&self) -> &ImportContext {
        &self.imports
    }
    /// Qualifies a name through explicit imports only; anything else comes back as written.
    pub fn qualify(&self, name: &str) -> String {
        self.imports
            .qualify(name)
            .map(str::to_owned)
            .unwrap_or_else(|| name.to_owned())
    }
    /// Every fully-qualified name `name` could stand for, in the order they are tried.
    pub fn candidates(&self, name: &str) -> Vec<String> {
        let mut candidates = Vec::new();
        if name.contains('.') {
            candidates.push(name.to_owned());
        }
        if let Some(imported) = self.imports.qualify(name) {
            candidates.push(imported.to_owned());
        }
        for package in self.imports.wildcards() {
            candidates.push(format!("{}.{}", package, name));
        }
        let namespace = &self.settings.default_namespace;
        if !namespace.is_empty() {
            candidates.push(format!("{}.{}", namespace, name));
        }
        if self.settings.is_primitive(name) {
            candidates.push(name.to_owned());
        }
        candidates.dedup();
        candidates
    }
    /// `Ok(None)` when no candidate is known to the provider.
    pub fn resolve<P: TypeProvider + ?Sized>(
        &self,
        name: &str,
        provider: &P,
    ) -> Result<Option<LoadedType>> {
        let (element, dimensions) = split_array(name.trim());
        for candidate in self.candidates(element) {
            if let Some(found) = provider.resolve_by_name(&format!("{}{}", candidate, dimensions))? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }
}

// "int[][]" -> ("int", "[][]")
fn split_array(name: &str) -> (&str, &str) {
    match name.find('[') {
        Some(bracket) => (name[..bracket].trim_end(), &name[bracket..]),
        None => (name, ""),
    }
}
