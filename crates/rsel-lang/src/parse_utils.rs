use winnow::ascii::{Caseless, multispace0};
use winnow::combinator::{cut_err, not, opt};
use winnow::error::{ContextError, ErrMode, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{literal, one_of, take_while};

// ---------------------------------------------------------------------------
// Whitespace
// ---------------------------------------------------------------------------

pub fn ws_skip(input: &mut &str) -> ModalResult<()> {
    multispace0.parse_next(input)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Keyword matching with word boundary
// ---------------------------------------------------------------------------

/// Match a keyword case-insensitively, ensuring it's not a prefix of a longer
/// word (i.e. the next character is not alphanumeric or `_`).
pub fn kw<'a>(keyword: &'static str) -> impl FnMut(&mut &'a str) -> ModalResult<()> {
    move |input: &mut &'a str| {
        let saved = *input;
        literal(Caseless(keyword)).parse_next(input)?;
        if input.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
            *input = saved;
            return Err(ErrMode::Backtrack(ContextError::new()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// Text between `$` delimiters: anything but `$` and line breaks.
pub fn column_name<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c != '$' && c != '\n' && c != '\r').parse_next(input)
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

/// Double-quoted string. `\"` and `\\` are escapes; any other backslash is
/// kept as written.
pub fn quoted_string(input: &mut &str) -> ModalResult<String> {
    literal("\"").parse_next(input)?;
    let mut out = String::new();
    loop {
        let chunk = take_while(0.., |c: char| c != '"' && c != '\\').parse_next(input)?;
        out.push_str(chunk);
        if opt(literal("\\")).parse_next(input)?.is_some() {
            match opt(one_of(['"', '\\'])).parse_next(input)? {
                Some(escaped) => out.push(escaped),
                None => out.push('\\'),
            }
            continue;
        }
        cut_err(literal("\""))
            .context(StrContext::Expected(StrContextValue::Description(
                "closing quote",
            )))
            .parse_next(input)?;
        return Ok(out);
    }
}

/// Quote and escape `value` so that [`quoted_string`] reads it back unchanged.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

// ---------------------------------------------------------------------------
// Number literal
// ---------------------------------------------------------------------------

fn digits<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)
}

/// Scan a number literal: `-? digits ('.' digits)? ([eE] [+-]? digits)?`.
///
/// Returns the literal text and whether it is fractional (has a decimal point
/// or exponent). Range checks happen when the literal is bound.
pub fn number_literal<'a>(input: &mut &'a str) -> ModalResult<(&'a str, bool)> {
    let start = *input;
    let _ = opt(literal("-")).parse_next(input)?;
    digits.parse_next(input)?;

    let has_dot = opt(literal(".")).parse_next(input)?.is_some();
    if has_dot {
        cut_err(digits)
            .context(StrContext::Expected(StrContextValue::Description(
                "digits after decimal point",
            )))
            .parse_next(input)?;
    }
    let has_exp = opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digits))
        .parse_next(input)?
        .is_some();

    // Reject `12abc`: a number must not run straight into a word.
    cut_err(not(one_of(|c: char| c.is_alphanumeric() || c == '_')))
        .context(StrContext::Expected(StrContextValue::Description(
            "end of number",
        )))
        .parse_next(input)?;

    let text = &start[..start.len() - input.len()];
    Ok((text, has_dot || has_exp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_classification() {
        let mut s = "42 rest";
        assert_eq!(number_literal(&mut s).unwrap(), ("42", false));
        assert_eq!(s, " rest");

        let mut s = "-3.25";
        assert_eq!(number_literal(&mut s).unwrap(), ("-3.25", true));

        let mut s = "1e5";
        assert_eq!(number_literal(&mut s).unwrap(), ("1e5", true));

        let mut s = "7E-2)";
        assert_eq!(number_literal(&mut s).unwrap(), ("7E-2", true));
        assert_eq!(s, ")");
    }

    #[test]
    fn number_rejects_trailing_word() {
        let mut s = "12abc";
        assert!(number_literal(&mut s).is_err());
        let mut s = "1.";
        assert!(number_literal(&mut s).is_err());
    }

    #[test]
    fn quoted_string_escapes() {
        let mut s = r#""say \"hi\" \\ \n""#;
        assert_eq!(quoted_string(&mut s).unwrap(), r#"say "hi" \ \n"#);
        assert_eq!(s, "");
    }

    #[test]
    fn quote_reads_back() {
        let raw = r#"a "b" \c"#;
        let quoted = quote(raw);
        let mut s = quoted.as_str();
        assert_eq!(quoted_string(&mut s).unwrap(), raw);
    }

    #[test]
    fn unterminated_string_is_cut() {
        let mut s = r#""abc"#;
        assert!(matches!(quoted_string(&mut s), Err(ErrMode::Cut(_))));
    }

    #[test]
    fn keyword_needs_word_boundary() {
        let mut s = "and $A$";
        assert!(kw("AND")(&mut s).is_ok());
        let mut s = "ANDROID";
        assert!(kw("AND")(&mut s).is_err());
        assert_eq!(s, "ANDROID");
    }
}
