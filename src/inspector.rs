use std::collections::HashSet;

use tracing::debug;

use crate::error::{Result, SuggestionError};
use crate::registry::{FieldDecl, LoadedType, OtherHasher, TypeProvider};
use crate::settings::LoaderSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMetadata {
    name: String,
    declared_type: Option<LoadedType>,
}
impl FieldMetadata {
    pub fn new(name: &str, declared_type: Option<LoadedType>) -> Self {
        Self {
            name: name.to_owned(),
            declared_type,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    /// `None` when the declared type is unknown to the provider.
    pub fn declared_type(&self) -> Option<&LoadedType> {
        self.declared_type.as_ref()
    }
}

/// Enumerates the fields of a type, inherited ones included.
///
/// Own fields come first, then each supertype depth-first in declaration
/// order; a field name keeps its most derived declaration. Callers must not
/// rely on that order. Members listed in `LoaderSettings::ignored_members`
/// never show up.
pub struct FieldInspector<'a, P: TypeProvider + ?Sized> {
    provider: &'a P,
    settings: &'a LoaderSettings,
}

impl<'a, P: TypeProvider + ?Sized> FieldInspector<'a, P> {
    pub fn new(provider: &'a P, settings: &'a LoaderSettings) -> Self {
        Self { provider, settings }
    }

    pub fn fields(&self, ty: &LoadedType) -> Result<Vec<FieldMetadata>> {
        let mut declarations = Vec::new();
        let mut path = Vec::new();
        let mut done = HashSet::<String, OtherHasher>::default();
        self.collect(ty, &mut path, &mut done, &mut declarations)?;
        Ok(declarations
            .into_iter()
            .filter(|decl| !self.settings.is_ignored_member(decl.name()))
            .map(|decl| FieldMetadata::new(decl.name(), self.declared_type(ty, &decl)))
            .collect())
    }

    fn collect(
        &self,
        ty: &LoadedType,
        path: &mut Vec<String>,
        done: &mut HashSet<String, OtherHasher>,
        declarations: &mut Vec<FieldDecl>,
    ) -> Result<()> {
        if path.iter().any(|p| p == ty.name()) {
            return Err(SuggestionError::Introspection(format!(
                "cyclic inheritance involving {}",
                ty.name()
            )));
        }
        if done.contains(ty.name()) {
            return Ok(());
        }
        path.push(ty.name().to_owned());
        for field in ty.descriptor().fields() {
            if !declarations.iter().any(|d| d.name() == field.name()) {
                declarations.push(field.clone());
            }
        }
        for supertype in ty.descriptor().supertypes() {
            let parent = self.provider.resolve_by_name(&supertype)?.ok_or_else(|| {
                SuggestionError::Introspection(format!(
                    "supertype {} of {} not found",
                    supertype,
                    ty.name()
                ))
            })?;
            self.collect(&parent, path, done, declarations)?;
        }
        path.pop();
        done.insert(ty.name().to_owned());
        Ok(())
    }

    fn declared_type(&self, owner: &LoadedType, decl: &FieldDecl) -> Option<LoadedType> {
        match self.provider.resolve_by_name(decl.type_name()) {
            Ok(found) => found,
            Err(e) => {
                debug!(owner = %owner, field = decl.name(), error = %e, "field type unusable");
                None
            }
        }
    }
}
