//! The suggestion loader: one call turns a package header, type archives and
//! DSL mapping files into a [`SuggestionModel`].
//!
//! A build runs in a fixed order: header parse, imports, fact templates,
//! globals, DSL sentences. Most problems are recorded in the returned
//! [`ErrorSink`] and the build carries on; an unparseable header or a corrupt
//! archive aborts it with an `Err` instead, and no model is produced.
//!
//! The loader keeps its type provider between builds, so archives are expanded
//! once per loader (see [`SuggestionLoader::reset_type_cache`]). `build` takes
//! `&mut self`; share a loader across threads only behind a lock, or use one
//! loader per session.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::archive::{ArchiveBlob, ArchiveExpander};
use crate::classifier::classify;
use crate::descr::PackageDescr;
use crate::dsl::{DslMappingFile, DslSection};
use crate::error::{ErrorSink, Result};
use crate::header::{DrlHeaderParser, HeaderParser};
use crate::inspector::{FieldInspector, FieldMetadata};
use crate::model::{ModelBuilder, SuggestionModel, field_key};
use crate::registry::{LoadedType, TypeProvider, TypeRegistry, short_name};
use crate::resolver::{TypeResolver, is_wildcard_import};
use crate::settings::LoaderSettings;

/// The result of one build: the model plus every recoverable problem met on the way.
#[derive(Debug, Clone, Serialize)]
pub struct BuildOutcome {
    model: SuggestionModel,
    errors: ErrorSink,
}

impl BuildOutcome {
    pub fn model(&self) -> &SuggestionModel {
        &self.model
    }
    pub fn has_errors(&self) -> bool {
        self.errors.has_errors()
    }
    pub fn errors(&self) -> &[String] {
        self.errors.errors()
    }
    pub fn into_parts(self) -> (SuggestionModel, Vec<String>) {
        (self.model, self.errors.into_vec())
    }
}

/// Builds suggestion models. Generic over the type provider and the header parser.
pub struct SuggestionLoader<P: TypeProvider = TypeRegistry, H: HeaderParser = DrlHeaderParser> {
    builder: ModelBuilder,
    parser: H,
    provider: P,
    expander: ArchiveExpander,
    settings: LoaderSettings,
}

impl SuggestionLoader {
    pub fn new() -> Self {
        Self::with_settings(LoaderSettings::default())
    }
    pub fn with_settings(settings: LoaderSettings) -> Self {
        let provider = TypeRegistry::with_settings(&settings);
        Self::with_parts(provider, DrlHeaderParser::new(), settings)
    }
}

impl Default for SuggestionLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: TypeProvider, H: HeaderParser> SuggestionLoader<P, H> {
    pub fn with_parts(provider: P, parser: H, settings: LoaderSettings) -> Self {
        Self {
            builder: ModelBuilder::new(),
            parser,
            provider,
            expander: ArchiveExpander::new(),
            settings,
        }
    }
    pub fn provider(&self) -> &P {
        &self.provider
    }
    /// How many times this loader expanded its archives.
    pub fn archive_expansions(&self) -> usize {
        self.expander.expansions()
    }
    /// Forgets every archive-derived type; the next miss expands archives again.
    pub fn reset_type_cache(&mut self) {
        self.provider.clear();
        self.expander.reset();
    }

    pub fn build(
        &mut self,
        header: &str,
        archives: &[ArchiveBlob],
        dsl_files: &[DslMappingFile],
    ) -> Result<BuildOutcome> {
        let started = Instant::now();
        self.builder.reset();
        let mut errors = ErrorSink::new();

        if !header.trim().is_empty() {
            self.process_package_header(header, archives, &mut errors)?;
        }

        // populating DSL sentences
        self.populate_dsl_sentences(dsl_files);

        let model = self.builder.build();
        info!(
            ms = started.elapsed().as_secs_f64() * 1000.0,
            fact_types = model.fact_types().len(),
            globals = model.globals().len(),
            errors = errors.len(),
            "suggestion model built"
        );
        Ok(BuildOutcome { model, errors })
    }

    fn process_package_header(
        &mut self,
        header: &str,
        archives: &[ArchiveBlob],
        errors: &mut ErrorSink,
    ) -> Result<()> {
        let (descr, syntax_errors) = self.parser.parse(header)?.into_parts();
        for syntax_error in syntax_errors {
            errors.push(syntax_error.message());
        }
        let resolver = self.populate_model_info(&descr, archives, errors)?;
        self.populate_global_info(&descr, &resolver, archives, errors)
    }

    // Fact types from imports, then from inline templates.
    fn populate_model_info(
        &mut self,
        descr: &PackageDescr,
        archives: &[ArchiveBlob],
        errors: &mut ErrorSink,
    ) -> Result<TypeResolver> {
        let mut resolver = TypeResolver::new(&self.settings);
        for import in descr.imports() {
            let class_name = import.target();
            resolver.add_import(class_name);
            if is_wildcard_import(class_name) {
                continue;
            }
            match self.load_and_inspect(class_name, archives, errors) {
                Ok(Some((loaded, fields))) => {
                    let short_type_name = loaded.short_name().to_owned();
                    self.add_type_fields(&short_type_name, &fields);
                    self.builder.add_fact_type(&short_type_name);
                }
                Ok(None) => (),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => errors.push(format!(
                    "Error while inspecting the class: {}. The error was: {}",
                    class_name, e
                )),
            }
        }
        self.populate_fact_template_types(descr, &resolver, archives, errors)?;
        Ok(resolver)
    }

    fn populate_fact_template_types(
        &mut self,
        descr: &PackageDescr,
        resolver: &TypeResolver,
        archives: &[ArchiveBlob],
        errors: &mut ErrorSink,
    ) -> Result<()> {
        for template in descr.fact_templates() {
            let fact_type = template.name();
            self.builder.add_fact_type(fact_type);
            let mut fields = Vec::with_capacity(template.fields().len());
            for field in template.fields() {
                fields.push(field.name().to_owned());
                let field_type = field.class_type();
                let mut resolved = resolver.resolve(field_type, &self.provider);
                // template fields may name archive types nothing has loaded yet
                if matches!(resolved, Ok(None)) && self.expander.expand_into(archives, &mut self.provider)? {
                    resolved = resolver.resolve(field_type, &self.provider);
                }
                let field_type_class = match resolved {
                    Ok(Some(loaded)) => Some(loaded),
                    Ok(None) => {
                        errors.push(format!("Fact template field type not found: {}", field_type));
                        None
                    }
                    Err(e) => {
                        errors.push(format!("Fact template field type not found: {} ({})", field_type, e));
                        None
                    }
                };
                let category = classify(field_type_class.as_ref(), &self.provider);
                self.builder.set_field_type(&field_key(fact_type, field.name()), category);
            }
            self.builder.set_fields_for_type(fact_type, fields);
        }
        Ok(())
    }

    fn populate_global_info(
        &mut self,
        descr: &PackageDescr,
        resolver: &TypeResolver,
        archives: &[ArchiveBlob],
        errors: &mut ErrorSink,
    ) -> Result<()> {
        for global in descr.globals() {
            let declared_type = global.type_name();
            let class_name = resolver.qualify(declared_type);
            let short_type_name = short_name(&class_name).to_owned();
            if self.builder.has_fields_for_type(&short_type_name) {
                debug!(global = global.identifier(), type_name = %short_type_name, "fields already known");
            } else {
                match self.load_and_inspect(&class_name, archives, errors) {
                    Ok(Some((_, fields))) => self.add_type_fields(&short_type_name, &fields),
                    Ok(None) => (),
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => errors.push(format!(
                        "Error while inspecting class for global: {} error message: {}",
                        declared_type, e
                    )),
                }
            }
            self.builder.add_global(global.identifier(), &short_type_name);
        }
        Ok(())
    }

    fn populate_dsl_sentences(&mut self, dsl_files: &[DslMappingFile]) {
        for file in dsl_files {
            for entry in file.mapping().entries() {
                match entry.section() {
                    DslSection::Condition => self.builder.add_condition_sentence(entry.key()),
                    DslSection::Consequence => self.builder.add_action_sentence(entry.key()),
                    _ => (),
                }
            }
        }
    }

    /// Registry first; on a miss the archives are expanded (once per loader) and
    /// the lookup retried. A type that still cannot be found is recorded and
    /// comes back as `None`.
    fn load_type(
        &mut self,
        class_name: &str,
        archives: &[ArchiveBlob],
        errors: &mut ErrorSink,
    ) -> Result<Option<LoadedType>> {
        if let Some(loaded) = self.provider.resolve_by_name(class_name)? {
            return Ok(Some(loaded));
        }
        if self.expander.expand_into(archives, &mut self.provider)? {
            if let Some(loaded) = self.provider.resolve_by_name(class_name)? {
                return Ok(Some(loaded));
            }
        }
        errors.push(format!("Class not found: {}", class_name));
        Ok(None)
    }

    // Non-fatal errors coming back from here are introspection failures; the caller words them.
    fn load_and_inspect(
        &mut self,
        class_name: &str,
        archives: &[ArchiveBlob],
        errors: &mut ErrorSink,
    ) -> Result<Option<(LoadedType, Vec<FieldMetadata>)>> {
        let Some(loaded) = self.load_type(class_name, archives, errors)? else {
            return Ok(None);
        };
        let fields = FieldInspector::new(&self.provider, &self.settings).fields(&loaded)?;
        Ok(Some((loaded, fields)))
    }

    fn add_type_fields(&mut self, short_type_name: &str, fields: &[FieldMetadata]) {
        let names = fields.iter().map(|f| f.name().to_owned()).collect();
        self.builder.set_fields_for_type(short_type_name, names);
        for field in fields {
            let category = classify(field.declared_type(), &self.provider);
            self.builder
                .set_field_type(&field_key(short_type_name, field.name()), category);
        }
    }
}
