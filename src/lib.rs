//! Suggestion loader – builds the symbol table a rule authoring UI uses for
//! autocomplete and validation hints.
//!
//! A rule package starts with a declarative *header*: imports, globals and
//! inline fact templates. Combined with caller-supplied type archives and DSL
//! mapping files, the header is turned into a [`model::SuggestionModel`]:
//! * the known fact types (by short name) and their fields,
//! * a [`classifier::SemanticFieldType`] for every `Type.field`,
//! * the type each global is bound to,
//! * the condition and action sentences of the DSL mappings.
//!
//! ## Modules
//! * [`loader`] – The [`loader::SuggestionLoader`] orchestrating one build.
//! * [`registry`] – Type descriptors, the [`registry::TypeProvider`] seam and
//!   the default [`registry::TypeRegistry`] with its ambient types.
//! * [`archive`] – Tarball expansion into registry resources, at most once per loader.
//! * [`resolver`] – Import-aware resolution of symbolic type names.
//! * [`inspector`] – Field enumeration, inherited fields included.
//! * [`classifier`] – Field type to semantic category.
//! * [`model`] – The additive [`model::ModelBuilder`] and the model snapshot.
//! * [`header`] – Package header parsing (`pest` grammar in `header.pest`).
//! * [`dsl`] – DSL mapping files.
//! * [`settings`] – Layered configuration through the `config` crate.
//!
//! ## Errors
//! Building is error tolerant. A missing class, an unresolvable template
//! field type or a class that cannot be inspected ends up as a message in
//! [`loader::BuildOutcome::errors`] and the model is still produced. Only a
//! header that cannot be parsed at all or a corrupt archive aborts the build
//! with an [`error::SuggestionError`].
//!
//! ## Type archives
//! Archives are tarballs (gzip optional). Every `a/b/C.type.json` entry holds
//! the JSON [`registry::TypeDescriptor`] of type `a.b.C`.
//!
//! ## Quick Start
//! ```
//! use suggestion_loader::classifier::SemanticFieldType;
//! use suggestion_loader::dsl::DslMappingFile;
//! use suggestion_loader::loader::SuggestionLoader;
//!
//! let mut loader = SuggestionLoader::new();
//! let header = "import java.math.BigDecimal;\n\
//!               global java.util.List results;\n\
//!               template Customer\n  String name\n  int age\nend";
//! let dsl = DslMappingFile::parse("[when]There is a customer=Customer()");
//! let outcome = loader.build(header, &[], &[dsl]).unwrap();
//! let model = outcome.model();
//! assert!(!outcome.has_errors());
//! assert_eq!(model.global_type("results"), Some("List"));
//! assert_eq!(model.field_type("Customer", "age"), Some(SemanticFieldType::Numeric));
//! assert_eq!(model.condition_sentences(), ["There is a customer"]);
//! ```

pub mod archive;
pub mod classifier;
pub mod descr;
pub mod dsl;
pub mod error;
pub mod header;
pub mod inspector;
pub mod loader;
pub mod model;
pub mod registry;
pub mod resolver;
pub mod settings;
