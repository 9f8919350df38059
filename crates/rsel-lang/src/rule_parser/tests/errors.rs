use super::schema;
use crate::error::RuleError;
use crate::rule_parser::{parse_rule, parse_syntax};
use crate::schema::Schema;

fn syntax_offset(text: &str) -> usize {
    match parse_syntax(text) {
        Err(RuleError::Syntax { offset, .. }) => offset,
        other => panic!("expected syntax error for {text:?}, got {other:?}"),
    }
}

// -----------------------------------------------------------------------
// Syntax errors
// -----------------------------------------------------------------------

#[test]
fn reject_empty_rule() {
    assert_eq!(syntax_offset(""), 0);
    assert_eq!(syntax_offset("   \n"), 0);
}

#[test]
fn reject_unterminated_string() {
    assert_eq!(syntax_offset(r#"$NAME$ = "abc"#), 13);
}

#[test]
fn reject_unbalanced_open_paren() {
    assert_eq!(syntax_offset("($A$ > 1"), 8);
}

#[test]
fn reject_trailing_close_paren() {
    assert_eq!(syntax_offset("$A$ > 1 )"), 8);
}

#[test]
fn reject_missing_operator() {
    assert_eq!(syntax_offset("$A$ 5"), 4);
}

#[test]
fn reject_dangling_connective() {
    assert!(parse_syntax("$A$ > 1 AND").is_err());
    assert!(parse_syntax("$A$ > 1 OR ").is_err());
    assert!(parse_syntax("NOT").is_err());
}

#[test]
fn reject_unclosed_column_ref() {
    assert!(parse_syntax("$A > 1").is_err());
    assert!(parse_syntax("$$ > 1").is_err());
}

#[test]
fn reject_malformed_numbers() {
    assert!(parse_syntax("$A$ > 1.").is_err());
    assert!(parse_syntax("$A$ > 12abc").is_err());
}

#[test]
fn reject_unclosed_list() {
    assert!(parse_syntax(r#"$CITY$ IN ["a", "b""#).is_err());
    assert!(parse_syntax(r#"$CITY$ IN ["a",]"#).is_err());
}

#[test]
fn reject_keyword_prefix_as_connective() {
    assert!(parse_syntax("$A$ > 1 ANDROID $A$ < 2").is_err());
}

#[test]
fn syntax_error_message_names_expectation() {
    let err = parse_syntax("($A$ > 1").unwrap_err();
    assert!(err.to_string().contains("closing ')'"), "{err}");
}

#[test]
fn integer_overflow_is_a_syntax_error() {
    let err = parse_rule("$A$ > 99999999999999999999", &schema()).unwrap_err();
    assert!(matches!(err, RuleError::Syntax { offset: 6, .. }), "{err:?}");
}

// -----------------------------------------------------------------------
// Bind errors
// -----------------------------------------------------------------------

#[test]
fn unknown_column_reports_name_offset() {
    let err = parse_rule("$FOO$ > 1", &schema()).unwrap_err();
    assert_eq!(
        err,
        RuleError::UnknownColumn {
            offset: 1,
            name: "FOO".into(),
        }
    );

    let err = parse_rule("$A$ > 1 AND $FOO$ = 2", &schema()).unwrap_err();
    assert_eq!(err.offset(), Some(13));
}

#[test]
fn offsets_count_characters_not_bytes() {
    let err = parse_rule(r#"$NAME$ = "é" AND $FOO$ = 1"#, &schema()).unwrap_err();
    assert_eq!(err.offset(), Some(18));
}

#[test]
fn positional_reference_out_of_range() {
    let err = parse_rule("$9$ = 1", &schema()).unwrap_err();
    assert!(matches!(err, RuleError::UnknownColumn { .. }));
}

#[test]
fn empty_schema_is_unavailable() {
    let err = parse_rule("$A$ > 1", &Schema::default()).unwrap_err();
    assert_eq!(err, RuleError::SchemaUnavailable);
    assert_eq!(err.offset(), None);
}
