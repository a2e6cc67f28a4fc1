//! Integration tests for the message pattern parser.

use msgformat::parser::{ArgumentKind, Element, Message, SubMessage};
use msgformat::{parse, parse_bytes};

fn literal(text: &str) -> Element {
    Element::Literal(text.to_string())
}

fn only_element(pattern: &str) -> Element {
    let message = parse(pattern).unwrap();
    assert_eq!(message.elements.len(), 1, "pattern: {pattern}");
    message.elements.into_iter().next().unwrap()
}

// =============================================================================
// Text and Simple Arguments
// =============================================================================

#[test]
fn parse_literal_and_argument() {
    let message = parse("Hello, {name}!").unwrap();
    assert_eq!(
        message.elements,
        vec![
            literal("Hello, "),
            Element::Argument {
                id: "name".into()
            },
            literal("!"),
        ]
    );
}

#[test]
fn parse_empty_pattern() {
    assert_eq!(parse("").unwrap(), Message::default());
}

#[test]
fn argument_ids_tolerate_whitespace() {
    assert_eq!(
        only_element("{ \t name\n }"),
        Element::Argument {
            id: "name".into()
        }
    );
}

#[test]
fn pound_is_literal_at_top_level() {
    let message = parse("# of {n}").unwrap();
    assert_eq!(message.elements[0], literal("# of "));
}

#[test]
fn pound_is_literal_in_top_level_select() {
    let element = only_element("{g, select, other {#1}}");
    assert_eq!(element.option("other").unwrap().elements, vec![literal("#1")]);
}

// =============================================================================
// Quoting
// =============================================================================

#[test]
fn doubled_quote_is_one_quote() {
    assert_eq!(only_element("It''s"), literal("It's"));
}

#[test]
fn quote_before_ordinary_character_is_literal() {
    assert_eq!(only_element("'tis 'fine'"), literal("'tis 'fine'"));
}

#[test]
fn quoted_braces_are_literal() {
    assert_eq!(only_element("I see '{many}'"), literal("I see {many}"));
}

#[test]
fn quoting_round_trip() {
    assert_eq!(
        only_element("This isn''t a '{''simple''}' 'string'"),
        literal("This isn't a {'simple'} 'string'")
    );
}

#[test]
fn unclosed_quote_consumes_rest_of_input() {
    assert_eq!(only_element("Hello '{literal}!"), literal("Hello {literal}!"));
}

#[test]
fn quoted_pound_inside_plural() {
    let element = only_element("{n, plural, other {'#' is #}}");
    assert_eq!(
        element.option("other").unwrap().elements,
        vec![literal("# is "), Element::Pound]
    );
}

// =============================================================================
// Typed Arguments
// =============================================================================

#[test]
fn typed_argument_with_style() {
    assert_eq!(
        only_element("{n, number, percent}"),
        Element::Typed {
            id: "n".into(),
            kind: ArgumentKind::Number,
            style: Some("percent".into()),
        }
    );
}

#[test]
fn typed_argument_without_style() {
    assert_eq!(
        only_element("{d, date}"),
        Element::Typed {
            id: "d".into(),
            kind: ArgumentKind::Date,
            style: None,
        }
    );
    assert_eq!(
        only_element("{t,time,short}"),
        Element::Typed {
            id: "t".into(),
            kind: ArgumentKind::Time,
            style: Some("short".into()),
        }
    );
}

#[test]
fn number_sugar_keywords_replace_style() {
    for keyword in ["spellout", "ordinal", "duration"] {
        assert_eq!(
            only_element(&format!("{{n, {keyword}, ignored}}")),
            Element::Typed {
                id: "n".into(),
                kind: ArgumentKind::Number,
                style: Some(keyword.into()),
            }
        );
        assert_eq!(
            only_element(&format!("{{n, {keyword}}}")),
            Element::Typed {
                id: "n".into(),
                kind: ArgumentKind::Number,
                style: Some(keyword.into()),
            }
        );
    }
}

#[test]
fn quoted_whitespace_in_style() {
    assert_eq!(
        only_element("{d, date, dd' 'MM}"),
        Element::Typed {
            id: "d".into(),
            kind: ArgumentKind::Date,
            style: Some("dd MM".into()),
        }
    );
    let err = parse("{d, date, dd MM}").unwrap_err();
    assert_eq!(err.expected.as_deref(), Some("}"));
}

#[test]
fn quoted_brace_in_style() {
    assert_eq!(
        only_element("{d, time, h'}'mm}"),
        Element::Typed {
            id: "d".into(),
            kind: ArgumentKind::Time,
            style: Some("h}mm".into()),
        }
    );
}

#[test]
fn custom_style_keeps_pattern_text() {
    assert_eq!(
        only_element("{n, number, #,##0.00}"),
        Element::Typed {
            id: "n".into(),
            kind: ArgumentKind::Number,
            style: Some("#,##0.00".into()),
        }
    );
}

// =============================================================================
// Plural, Selectordinal and Select
// =============================================================================

#[test]
fn plural_with_offset_and_pound() {
    let element = only_element("{n, plural, offset:1 =0 {none} one {# more} other {# others}}");
    let Element::Plural {
        id,
        ordinal,
        offset,
        options,
    } = &element
    else {
        panic!("expected plural, got {element:?}");
    };
    assert_eq!(id, "n");
    assert!(!ordinal);
    assert_eq!(*offset, 1);
    let selectors: Vec<&str> = options.iter().map(|o| o.selector.as_str()).collect();
    assert_eq!(selectors, ["=0", "one", "other"]);
    assert_eq!(
        element.option("one").unwrap().elements,
        vec![Element::Pound, literal(" more")]
    );
}

#[test]
fn selectordinal_sets_ordinal_flag() {
    let element = only_element("{n, selectordinal, one {#st} other {#th}}");
    assert!(matches!(element, Element::Plural { ordinal: true, .. }));
}

#[test]
fn select_options() {
    let element = only_element("{g, select, female {She} male {He} other {They}}");
    assert_eq!(
        element,
        Element::Select {
            id: "g".into(),
            options: vec![
                SubMessage {
                    selector: "female".into(),
                    message: Message::new(vec![literal("She")]),
                },
                SubMessage {
                    selector: "male".into(),
                    message: Message::new(vec![literal("He")]),
                },
                SubMessage {
                    selector: "other".into(),
                    message: Message::new(vec![literal("They")]),
                },
            ],
        }
    );
}

#[test]
fn clause_whitespace_is_flexible() {
    let element = only_element("{ n , plural , one { one } other { many } }");
    assert_eq!(
        element.option("one").unwrap().elements,
        vec![literal(" one ")]
    );
    assert_eq!(
        element.option("other").unwrap().elements,
        vec![literal(" many ")]
    );
}

#[test]
fn duplicate_selector_last_wins() {
    let element = only_element("{g, select, a {1} a {2} other {3}}");
    let Element::Select { options, .. } = &element else {
        panic!("expected select");
    };
    assert_eq!(options.len(), 2);
    assert_eq!(element.option("a").unwrap().elements, vec![literal("2")]);
}

#[test]
fn pound_inside_select_nested_in_plural() {
    let element = only_element("{n, plural, other {{g, select, other {# left}}}}");
    let inner = &element.option("other").unwrap().elements[0];
    assert_eq!(
        inner.option("other").unwrap().elements,
        vec![Element::Pound, literal(" left")]
    );
}

#[test]
fn argument_ids_in_first_use_order() {
    let message = parse("{a} {b, plural, other {{c} #}} {a}").unwrap();
    assert_eq!(message.argument_ids(), ["a", "b", "c"]);
}

// =============================================================================
// Syntax Errors
// =============================================================================

#[test]
fn malformed_patterns_are_rejected() {
    for pattern in [
        "no finish arg {",
        "no start arg }",
        "empty arg {}",
        "{ a, select }",
        "{ a, select, }",
        "{ a, select, {hi} }",
        "{ a, select, foo {hi} }",
        "{ a, bogus, nope }",
        "{ a bogus, nope }",
        "{n, plural, one {x}}",
        "{n, plural, offset:x other {a}}",
        "{n, number, }",
        "{a{b}}",
    ] {
        assert!(parse(pattern).is_err(), "pattern should fail: {pattern}");
    }
}

#[test]
fn unterminated_argument() {
    let err = parse("no finish arg {").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"expected "argument id" but found "end of input" in "no finish arg {""#);
    assert_eq!(err.offset, 15);
    assert_eq!(err.found, "end of input");
}

#[test]
fn stray_closing_brace() {
    let err = parse("no start arg }").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"unexpected "}" found in "no start arg }""#);
    assert_eq!(err.expected, None);
    assert_eq!(err.offset, 13);
}

#[test]
fn empty_argument() {
    let err = parse("empty arg {}").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"expected "argument id" but found "}" in "empty arg {}""#);
}

#[test]
fn clause_without_options() {
    let err = parse("{ a, select }").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"expected "select message options" but found "}" in "{ a, select }""#);
    let err = parse("{ a, select, }").unwrap_err();
    assert_eq!(err.expected.as_deref(), Some("select message options"));
}

#[test]
fn clause_without_selector() {
    let err = parse("{ a, select, {hi} }").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"expected "selector" but found "{" in "{ a, select, {hi} }""#);
}

#[test]
fn clause_without_other() {
    let err = parse("{ a, select, foo {hi} }").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#""other" option must be specified in select in "{ a, select, foo {hi} }""#);
    let err = parse("{n, selectordinal, one {x}}").unwrap_err();
    assert!(err.message.starts_with("\"other\" option must be specified in selectordinal"));
}

#[test]
fn unknown_argument_type() {
    let err = parse("{ a, bogus, nope }").unwrap_err();
    assert_eq!(
        err.expected.as_deref(),
        Some("number, date, time, ordinal, duration, spellout, plural, selectordinal, select")
    );
    assert_eq!(err.found, "b");
    assert!(err.suggestions.is_empty());
}

#[test]
fn misspelled_argument_type_suggests_keyword() {
    let err = parse("{n, nubmer}").unwrap_err();
    assert_eq!(err.suggestions, ["number"]);
}

#[test]
fn missing_comma() {
    let err = parse("{ a bogus, nope }").unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"expected "," but found "b" in "{ a bogus, nope }""#);
}

#[test]
fn bad_offset() {
    let err = parse("{n, plural, offset:x other {a}}").unwrap_err();
    assert_eq!(err.expected.as_deref(), Some("offset number"));
    assert_eq!(err.found, "x");
}

#[test]
fn offset_too_large_for_u32() {
    let err = parse("{n, plural, offset:99999999999 other {a}}").unwrap_err();
    assert_eq!(err.expected.as_deref(), Some("offset number"));
    assert_eq!(err.found, "9");
    assert_eq!(err.offset, 19);
}

#[test]
fn description_omits_pattern() {
    let err = parse("say \"hi\" in \"French\" }").unwrap_err();
    assert_eq!(err.description, r#"unexpected "}" found"#);
    insta::assert_snapshot!(err.to_string(), @r#"unexpected "}" found in "say "hi" in "French" }""#);
}

#[test]
fn error_position_in_multiline_pattern() {
    let err = parse("line one\n{n, plural,\n  one {x}\n}").unwrap_err();
    assert_eq!((err.line, err.column, err.offset), (4, 1, 31));
}

#[test]
fn error_message_normalizes_line_endings() {
    let err = parse("{a\r\n b}").unwrap_err();
    assert_eq!(err.message, "expected \",\" but found \"b\" in \"{a\n b}\"");
    assert_eq!(err.line, 2);
}

#[test]
fn column_counts_characters() {
    let err = parse("héllo }").unwrap_err();
    assert_eq!((err.line, err.column, err.offset), (1, 7, 7));
}

#[test]
fn invalid_utf8_is_rejected() {
    let err = parse_bytes(b"ab\xff{x}").unwrap_err();
    assert_eq!(err.offset, 2);
    assert_eq!(err.found, "invalid UTF-8");
    assert_eq!(parse_bytes(b"{x}").unwrap(), parse("{x}").unwrap());
}
