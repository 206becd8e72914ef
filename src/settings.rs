//! Loader configuration.
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional `suggestion-loader.{toml,json,yaml}` file, then `SUGGEST_*`
//! environment variables (e.g. `SUGGEST_DEFAULT_NAMESPACE=java.lang`).

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_CONFIG_NAME: &str = "suggestion-loader";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoaderSettings {
    /// Namespace tried for unqualified names that no import covers.
    pub default_namespace: String,
    /// Keywords resolved as primitive types when everything else fails.
    pub primitive_types: Vec<String>,
    /// Members contributed by the universal base type, never shown to authors.
    pub ignored_members: Vec<String>,
    /// Archive resources with this suffix hold type descriptors.
    pub type_resource_suffix: String,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            default_namespace: String::from("java.lang"),
            primitive_types: ["boolean", "byte", "char", "short", "int", "long", "float", "double"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            ignored_members: ["class", "hashCode", "toString"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            type_resource_suffix: String::from(".type.json"),
        }
    }
}

impl LoaderSettings {
    /// Reads settings from `name` (any format `config` understands) and the environment.
    /// A missing file is not an error.
    pub fn load(name: &str) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(name).required(false))
            .add_source(
                Environment::with_prefix("SUGGEST")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("primitive_types")
                    .with_list_parse_key("ignored_members"),
            )
            .build()?;
        Ok(settings.try_deserialize::<LoaderSettings>()?)
    }
    pub fn is_ignored_member(&self, member: &str) -> bool {
        self.ignored_members.iter().any(|m| m == member)
    }
    pub fn is_primitive(&self, name: &str) -> bool {
        self.primitive_types.iter().any(|p| p == name)
    }
}
