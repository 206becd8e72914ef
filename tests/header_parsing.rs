use suggestion_loader::error::SuggestionError;
use suggestion_loader::header::{DrlHeaderParser, HeaderParser};

fn parser() -> DrlHeaderParser {
    DrlHeaderParser::new()
}

#[test]
fn full_header_is_parsed() {
    let header = r#"
        package com.acme.rules;

        /* types used by the rules */
        import com.acme.Order;
        import com.acme.model.*;
        import function com.acme.util.Format.money;
        // collected results
        global java.util.List results;
        global String[] names
        dialect "mvel"

        template "Customer Visit"
            String reason;
            int length
        end
    "#;
    let parsed = parser().parse(header).expect("parse");
    assert!(!parsed.has_errors(), "{:?}", parsed.errors());
    let descr = parsed.descr();
    assert_eq!(descr.name(), Some("com.acme.rules"));

    let imports: Vec<&str> = descr.imports().iter().map(|i| i.target()).collect();
    assert_eq!(imports, ["com.acme.Order", "com.acme.model.*"]);
    assert_eq!(descr.function_imports()[0].target(), "com.acme.util.Format.money");

    let globals: Vec<(&str, &str)> = descr
        .globals()
        .iter()
        .map(|g| (g.identifier(), g.type_name()))
        .collect();
    assert_eq!(globals, [("results", "java.util.List"), ("names", "String[]")]);

    let template = &descr.fact_templates()[0];
    assert_eq!(template.name(), "Customer Visit");
    let fields: Vec<(&str, &str)> = template
        .fields()
        .iter()
        .map(|f| (f.name(), f.class_type()))
        .collect();
    assert_eq!(fields, [("reason", "String"), ("length", "int")]);
}

#[test]
fn blank_header_gives_empty_descriptor() {
    let parsed = parser().parse("   \n").expect("parse");
    assert!(!parsed.has_errors());
    assert!(parsed.descr().name().is_none());
    assert!(parsed.descr().imports().is_empty());
    assert!(parsed.descr().globals().is_empty());
}

#[test]
fn unknown_statements_are_warnings() {
    let header = "import com.acme.Order;\n  query \"orders\" end\n;\nglobal Order current;";
    let parsed = parser().parse(header).expect("parse");
    assert_eq!(parsed.errors().len(), 1, "{:?}", parsed.errors());
    let warning = &parsed.errors()[0];
    assert_eq!((warning.line(), warning.col()), (2, 3));
    assert_eq!(
        warning.message(),
        "line 2:3 unrecognized statement in package header: 'query \"orders\" end'"
    );
    // statements around the bad one still count
    assert_eq!(parsed.descr().imports().len(), 1);
    assert_eq!(parsed.descr().globals()[0].identifier(), "current");
}

#[test]
fn incomplete_global_is_a_warning() {
    let parsed = parser().parse("global Order;\nimport com.acme.Order;").expect("parse");
    assert_eq!(parsed.errors().len(), 1);
    assert!(parsed.errors()[0].message().contains("'global Order'"));
    assert!(parsed.descr().globals().is_empty());
    assert_eq!(parsed.descr().imports().len(), 1);
}

#[test]
fn template_without_end_is_kept_with_a_warning() {
    let header = "template Customer\n  String name\nimport java.util.Date;";
    let parsed = parser().parse(header).expect("parse");
    assert_eq!(parsed.errors().len(), 1);
    assert_eq!(
        parsed.errors()[0].message(),
        "line 1:1 template 'Customer' is missing its 'end' keyword"
    );
    let descr = parsed.descr();
    assert_eq!(descr.fact_templates()[0].fields()[0].name(), "name");
    assert_eq!(descr.imports()[0].target(), "java.util.Date");
}

#[test]
fn template_at_end_of_input_without_end() {
    let parsed = parser().parse("template Visit\n  int length").expect("parse");
    assert_eq!(parsed.errors().len(), 1);
    assert_eq!(parsed.descr().fact_templates()[0].name(), "Visit");
}

#[test]
fn unterminated_block_comment_is_fatal() {
    let error = parser()
        .parse("import com.acme.Order;\n/* never closed\nglobal Order o;")
        .expect_err("must not parse");
    assert!(error.is_fatal());
    match error {
        SuggestionError::Parse { line: Some(line), .. } => assert!(line >= 2, "reported at line {}", line),
        other => panic!("expected a parse error with a position, got {:?}", other),
    }
}

#[test]
fn unterminated_block_comment_after_a_statement_is_fatal() {
    let error = parser()
        .parse("import com.acme.Order;\nrule x /* never closed\nglobal Order o;")
        .expect_err("must not parse");
    assert!(matches!(error, SuggestionError::Parse { .. }), "{:?}", error);
}

#[test]
fn closed_block_comment_ends_an_unknown_statement() {
    let parsed = parser()
        .parse("rule x /* a note */\nimport com.acme.Order;")
        .expect("parse");
    assert_eq!(parsed.errors().len(), 1, "{:?}", parsed.errors());
    assert_eq!(
        parsed.errors()[0].message(),
        "line 1:1 unrecognized statement in package header: 'rule x'"
    );
    assert_eq!(parsed.descr().imports()[0].target(), "com.acme.Order");
}

#[test]
fn keywords_need_a_word_boundary() {
    let parsed = parser().parse("imports com.acme.Order;").expect("parse");
    assert!(parsed.descr().imports().is_empty());
    assert_eq!(parsed.errors().len(), 1);
}
