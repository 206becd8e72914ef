//! Package header parsing.
//!
//! The orchestrator only needs a [`HeaderParser`]; [`DrlHeaderParser`] is the
//! default, built on the `pest` grammar in `header.pest`. It reports
//! statements it does not understand as [`ParserError`]s and keeps going. Only
//! input the grammar cannot consume at all (an unterminated block comment, for
//! instance) fails the parse.

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::descr::{FactTemplateDescr, FieldTemplateDescr, GlobalDescr, ImportDescr, PackageDescr};
use crate::error::Result;

#[derive(Parser)]
#[grammar = "header.pest"]
struct HeaderGrammar;

/// A non-fatal syntax problem. The descriptor is still usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserError {
    message: String,
    line: usize,
    col: usize,
}
impl ParserError {
    pub fn new(message: String, line: usize, col: usize) -> Self {
        Self { message, line, col }
    }
    pub fn message(&self) -> &str {
        &self.message
    }
    pub fn line(&self) -> usize {
        self.line
    }
    pub fn col(&self) -> usize {
        self.col
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParsedHeader {
    descr: PackageDescr,
    errors: Vec<ParserError>,
}
impl ParsedHeader {
    pub fn new(descr: PackageDescr, errors: Vec<ParserError>) -> Self {
        Self { descr, errors }
    }
    pub fn descr(&self) -> &PackageDescr {
        &self.descr
    }
    pub fn errors(&self) -> &[ParserError] {
        &self.errors
    }
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
    pub fn into_parts(self) -> (PackageDescr, Vec<ParserError>) {
        (self.descr, self.errors)
    }
}

pub trait HeaderParser {
    /// `Err` only when no descriptor can be produced at all.
    fn parse(&self, header: &str) -> Result<ParsedHeader>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DrlHeaderParser;

impl DrlHeaderParser {
    pub fn new() -> Self {
        Self
    }
}

impl HeaderParser for DrlHeaderParser {
    fn parse(&self, header: &str) -> Result<ParsedHeader> {
        let mut descr = PackageDescr::new();
        let mut errors = Vec::new();
        for root in HeaderGrammar::parse(Rule::header, header)? {
            for statement in root.into_inner() {
                match statement.as_rule() {
                    Rule::package_decl => {
                        if let Some(name) = inner_str(&statement, Rule::qualified_name) {
                            descr.set_name(name);
                        }
                    }
                    Rule::import_decl => {
                        if let Some(target) = inner_str(&statement, Rule::qualified_name) {
                            descr.add_import(ImportDescr::new(target));
                        }
                    }
                    Rule::function_import => {
                        if let Some(target) = inner_str(&statement, Rule::qualified_name) {
                            descr.add_function_import(ImportDescr::new(target));
                        }
                    }
                    Rule::global_decl => {
                        let type_name = inner_str(&statement, Rule::type_name);
                        let identifier = inner_str(&statement, Rule::identifier);
                        if let (Some(type_name), Some(identifier)) = (type_name, identifier) {
                            descr.add_global(GlobalDescr::new(identifier, type_name));
                        }
                    }
                    Rule::template_decl => {
                        descr.add_fact_template(template(statement, &mut errors));
                    }
                    Rule::unknown_statement => {
                        let (line, col) = statement.as_span().start_pos().line_col();
                        errors.push(ParserError::new(
                            format!(
                                "line {}:{} unrecognized statement in package header: '{}'",
                                line,
                                col,
                                statement.as_str().trim_end_matches(';').trim()
                            ),
                            line,
                            col,
                        ));
                    }
                    // directives, stray semicolons and EOI carry nothing for the model
                    _ => (),
                }
            }
        }
        Ok(ParsedHeader::new(descr, errors))
    }
}

fn inner_str<'i>(pair: &Pair<'i, Rule>, rule: Rule) -> Option<&'i str> {
    pair.clone()
        .into_inner()
        .find(|p| p.as_rule() == rule)
        .map(|p| p.as_str())
}

fn template(pair: Pair<'_, Rule>, errors: &mut Vec<ParserError>) -> FactTemplateDescr {
    let (line, col) = pair.as_span().start_pos().line_col();
    let mut template = FactTemplateDescr::new("");
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::identifier => template = FactTemplateDescr::new(part.as_str()),
            Rule::string_literal => {
                let name = part.into_inner().next().map(|p| p.as_str()).unwrap_or_default();
                template = FactTemplateDescr::new(name);
            }
            Rule::template_field => {
                let type_name = inner_str(&part, Rule::type_name);
                let name = inner_str(&part, Rule::identifier);
                if let (Some(type_name), Some(name)) = (type_name, name) {
                    template.add_field(FieldTemplateDescr::new(name, type_name));
                }
            }
            Rule::template_end => {
                let missing = part.into_inner().any(|p| p.as_rule() == Rule::missing_end);
                if missing {
                    errors.push(ParserError::new(
                        format!(
                            "line {}:{} template '{}' is missing its 'end' keyword",
                            line,
                            col,
                            template.name()
                        ),
                        line,
                        col,
                    ));
                }
            }
            _ => (),
        }
    }
    template
}
