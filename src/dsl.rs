//! DSL mapping files.
//!
//! A mapping file pairs natural-language sentences with rule-language snippets,
//! one entry per line:
//!
//! ```text
//! # comment
//! [when]There is an Order=Order()
//! [condition][Order]- total over {amount}=total > {amount}
//! [then]log the order=System.out.println("order");
//! [keyword]ensure=assert
//! ```
//!
//! Parsing never fails outright; lines that cannot be read are collected in
//! [`DslMappingFile::errors`] and the remaining entries stay usable.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // [section][metadata]key=value, the metadata block is optional and "\=" escapes '=' in the key
    static ref ENTRY: Regex = Regex::new(
        r"^\[(?P<section>[^\]]*)\](?:\[(?P<meta>[^\]]*)\])?(?P<key>(?:\\=|[^=])*)=(?P<value>.*)$"
    ).unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DslSection {
    Condition,
    Consequence,
    Keyword,
    Any,
}

impl DslSection {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "when" | "condition" => Some(Self::Condition),
            "then" | "consequence" => Some(Self::Consequence),
            "keyword" => Some(Self::Keyword),
            "*" => Some(Self::Any),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DslMappingEntry {
    section: DslSection,
    metadata: String,
    key: String,
    value: String,
}

impl DslMappingEntry {
    pub fn new(section: DslSection, key: &str, value: &str) -> Self {
        Self {
            section,
            metadata: String::new(),
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }
    pub fn with_metadata(mut self, metadata: &str) -> Self {
        self.metadata = metadata.to_owned();
        self
    }
    pub fn section(&self) -> DslSection {
        self.section
    }
    pub fn metadata(&self) -> &str {
        &self.metadata
    }
    /// The sentence pattern shown to authors.
    pub fn key(&self) -> &str {
        &self.key
    }
    pub fn value(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DslMapping {
    entries: Vec<DslMappingEntry>,
}

impl DslMapping {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn add_entry(&mut self, entry: DslMappingEntry) {
        self.entries.push(entry);
    }
    pub fn entries(&self) -> &[DslMappingEntry] {
        &self.entries
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DslMappingFile {
    mapping: DslMapping,
    errors: Vec<String>,
}

impl DslMappingFile {
    pub fn new(mapping: DslMapping) -> Self {
        Self {
            mapping,
            errors: Vec::new(),
        }
    }
    pub fn parse(text: &str) -> Self {
        let mut file = Self::default();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
                continue;
            }
            let number = index + 1;
            let Some(captures) = ENTRY.captures(line) else {
                file.errors
                    .push(format!("line {}: unrecognized DSL mapping entry '{}'", number, line));
                continue;
            };
            let tag = &captures["section"];
            let Some(section) = DslSection::from_tag(tag) else {
                file.errors
                    .push(format!("line {}: unknown DSL section '{}'", number, tag));
                continue;
            };
            let key = captures["key"].replace("\\=", "=");
            let entry = DslMappingEntry::new(section, key.trim(), captures["value"].trim())
                .with_metadata(captures.name("meta").map_or("", |m| m.as_str()).trim());
            file.mapping.add_entry(entry);
        }
        file
    }
    pub fn mapping(&self) -> &DslMapping {
        &self.mapping
    }
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl From<DslMapping> for DslMappingFile {
    fn from(mapping: DslMapping) -> Self {
        Self::new(mapping)
    }
}
