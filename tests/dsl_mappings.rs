use suggestion_loader::dsl::{DslMapping, DslMappingFile, DslSection};

#[test]
fn entries_are_read_with_sections_and_metadata() {
    let text = "\
# order sentences
[when]There is an Order=Order()
[condition][Order]- total over {amount}=total > {amount}

// actions
[then]log the order=System.out.println(\"order\");
[keyword]ensure=assert
[*]anything=any
";
    let file = DslMappingFile::parse(text);
    assert!(!file.has_errors(), "{:?}", file.errors());
    let entries = file.mapping().entries();
    assert_eq!(entries.len(), 5);

    assert_eq!(entries[0].section(), DslSection::Condition);
    assert_eq!(entries[0].key(), "There is an Order");
    assert_eq!(entries[0].value(), "Order()");
    assert_eq!(entries[0].metadata(), "");

    assert_eq!(entries[1].section(), DslSection::Condition);
    assert_eq!(entries[1].metadata(), "Order");
    assert_eq!(entries[1].key(), "- total over {amount}");
    assert_eq!(entries[1].value(), "total > {amount}");

    assert_eq!(entries[2].section(), DslSection::Consequence);
    assert_eq!(entries[2].value(), "System.out.println(\"order\");");
    assert_eq!(entries[3].section(), DslSection::Keyword);
    assert_eq!(entries[4].section(), DslSection::Any);
}

#[test]
fn section_tags_ignore_case() {
    assert_eq!(DslSection::from_tag("WHEN"), Some(DslSection::Condition));
    assert_eq!(DslSection::from_tag(" Then "), Some(DslSection::Consequence));
    assert_eq!(DslSection::from_tag("consequence"), Some(DslSection::Consequence));
    assert_eq!(DslSection::from_tag("sometimes"), None);
}

#[test]
fn escaped_equals_stays_in_the_key() {
    let file = DslMappingFile::parse("[when]a \\= b=a == b\n[when]x=y==z");
    let entries = file.mapping().entries();
    assert_eq!(entries[0].key(), "a = b");
    assert_eq!(entries[0].value(), "a == b");
    assert_eq!(entries[1].key(), "x");
    assert_eq!(entries[1].value(), "y==z");
}

#[test]
fn bad_lines_are_reported_and_skipped() {
    let file = DslMappingFile::parse("[when]ok=fine\nnot an entry\n[sometimes]x=y\n[then]done=yes");
    assert_eq!(
        file.errors(),
        [
            "line 2: unrecognized DSL mapping entry 'not an entry'",
            "line 3: unknown DSL section 'sometimes'",
        ]
    );
    let keys: Vec<&str> = file.mapping().entries().iter().map(|e| e.key()).collect();
    assert_eq!(keys, ["ok", "done"]);
}

#[test]
fn empty_mapping_file() {
    let file = DslMappingFile::from(DslMapping::new());
    assert!(file.mapping().entries().is_empty());
    assert!(!file.has_errors());
    assert_eq!(DslMappingFile::parse("\n# nothing here\n"), file);
}
