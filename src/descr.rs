//! Structural description of a package header, as produced by a header parser.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDescr {
    target: String,
}
impl ImportDescr {
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_owned(),
        }
    }
    pub fn target(&self) -> &str {
        &self.target
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalDescr {
    identifier: String,
    type_name: String,
}
impl GlobalDescr {
    pub fn new(identifier: &str, type_name: &str) -> Self {
        Self {
            identifier: identifier.to_owned(),
            type_name: type_name.to_owned(),
        }
    }
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTemplateDescr {
    name: String,
    class_type: String,
}
impl FieldTemplateDescr {
    pub fn new(name: &str, class_type: &str) -> Self {
        Self {
            name: name.to_owned(),
            class_type: class_type.to_owned(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    /// The symbolic type as written, possibly unqualified.
    pub fn class_type(&self) -> &str {
        &self.class_type
    }
}

/// An inline fact type: a name plus explicitly typed fields, no archive needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactTemplateDescr {
    name: String,
    fields: Vec<FieldTemplateDescr>,
}
impl FactTemplateDescr {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            fields: Vec::new(),
        }
    }
    pub fn add_field(&mut self, field: FieldTemplateDescr) {
        self.fields.push(field);
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn fields(&self) -> &[FieldTemplateDescr] {
        &self.fields
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageDescr {
    name: Option<String>,
    imports: Vec<ImportDescr>,
    function_imports: Vec<ImportDescr>,
    globals: Vec<GlobalDescr>,
    fact_templates: Vec<FactTemplateDescr>,
}

impl PackageDescr {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_owned());
    }
    pub fn add_import(&mut self, import: ImportDescr) {
        self.imports.push(import);
    }
    pub fn add_function_import(&mut self, import: ImportDescr) {
        self.function_imports.push(import);
    }
    pub fn add_global(&mut self, global: GlobalDescr) {
        self.globals.push(global);
    }
    pub fn add_fact_template(&mut self, template: FactTemplateDescr) {
        self.fact_templates.push(template);
    }
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
    pub fn imports(&self) -> &[ImportDescr] {
        &self.imports
    }
    pub fn function_imports(&self) -> &[ImportDescr] {
        &self.function_imports
    }
    pub fn globals(&self) -> &[GlobalDescr] {
        &self.globals
    }
    pub fn fact_templates(&self) -> &[FactTemplateDescr] {
        &self.fact_templates
    }
}
