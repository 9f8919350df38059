use winnow::combinator::{alt, cut_err, opt, separated};
use winnow::error::{StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::literal;

use crate::ast::*;
use crate::binder::bind;
use crate::error::{RuleError, char_offset};
use crate::operators::{AND, IN, LIKE, MISSING, NOT, OR, XOR};
use crate::parse_utils::{column_name, kw, number_literal, quoted_string, ws_skip};
use crate::schema::Schema;

#[cfg(test)]
mod tests;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Parse rule text and bind it against `schema`.
pub fn parse_rule(text: &str, schema: &Schema) -> Result<Node, RuleError> {
    let expr = parse_syntax(text)?;
    bind(&expr, text, schema)
}

/// Parse rule text into an unbound syntax tree.
pub fn parse_syntax(text: &str) -> Result<Expr, RuleError> {
    if text.trim().is_empty() {
        return Err(RuleError::Syntax {
            offset: 0,
            message: "empty rule".to_string(),
        });
    }
    rule_text.parse(text).map_err(|e| {
        let offset = char_offset(text, e.offset());
        let detail = e.inner().to_string();
        let message = if detail.is_empty() {
            "unexpected input".to_string()
        } else {
            detail
        };
        RuleError::Syntax { offset, message }
    })
}

// ---------------------------------------------------------------------------
// Precedence levels (lowest to highest)
// ---------------------------------------------------------------------------

fn rule_text(input: &mut &str) -> ModalResult<Expr> {
    ws_skip.parse_next(input)?;
    let expr = or_expr.parse_next(input)?;
    ws_skip.parse_next(input)?;
    Ok(expr)
}

/// `or_expr = xor_expr { OR xor_expr }`
fn or_expr(input: &mut &str) -> ModalResult<Expr> {
    let mut left = xor_expr.parse_next(input)?;
    loop {
        ws_skip.parse_next(input)?;
        if opt(kw(OR)).parse_next(input)?.is_some() {
            ws_skip.parse_next(input)?;
            let right = cut_err(xor_expr).parse_next(input)?;
            left = Expr::Or(Box::new(left), Box::new(right));
        } else {
            break;
        }
    }
    Ok(left)
}

/// `xor_expr = and_expr { XOR and_expr }`
fn xor_expr(input: &mut &str) -> ModalResult<Expr> {
    let mut left = and_expr.parse_next(input)?;
    loop {
        ws_skip.parse_next(input)?;
        if opt(kw(XOR)).parse_next(input)?.is_some() {
            ws_skip.parse_next(input)?;
            let right = cut_err(and_expr).parse_next(input)?;
            left = Expr::Xor(Box::new(left), Box::new(right));
        } else {
            break;
        }
    }
    Ok(left)
}

/// `and_expr = unary { AND unary }`
fn and_expr(input: &mut &str) -> ModalResult<Expr> {
    let mut left = unary.parse_next(input)?;
    loop {
        ws_skip.parse_next(input)?;
        if opt(kw(AND)).parse_next(input)?.is_some() {
            ws_skip.parse_next(input)?;
            let right = cut_err(unary).parse_next(input)?;
            left = Expr::And(Box::new(left), Box::new(right));
        } else {
            break;
        }
    }
    Ok(left)
}

/// `unary = NOT unary | atom`
fn unary(input: &mut &str) -> ModalResult<Expr> {
    if opt(kw(NOT)).parse_next(input)?.is_some() {
        ws_skip.parse_next(input)?;
        let inner = cut_err(unary).parse_next(input)?;
        Ok(Expr::Not(Box::new(inner)))
    } else {
        atom.parse_next(input)
    }
}

// ---------------------------------------------------------------------------
// Atoms
// ---------------------------------------------------------------------------

fn atom(input: &mut &str) -> ModalResult<Expr> {
    alt((paren_expr, missing_test, comparison))
        .context(StrContext::Expected(StrContextValue::Description(
            "condition",
        )))
        .parse_next(input)
}

fn paren_expr(input: &mut &str) -> ModalResult<Expr> {
    literal("(").parse_next(input)?;
    ws_skip.parse_next(input)?;
    let inner = cut_err(or_expr).parse_next(input)?;
    ws_skip.parse_next(input)?;
    cut_err(literal(")"))
        .context(StrContext::Expected(StrContextValue::Description(
            "closing ')'",
        )))
        .parse_next(input)?;
    Ok(inner)
}

/// `MISSING $col$`
fn missing_test(input: &mut &str) -> ModalResult<Expr> {
    kw(MISSING).parse_next(input)?;
    ws_skip.parse_next(input)?;
    let column = cut_err(column_ref)
        .context(StrContext::Expected(StrContextValue::Description(
            "column reference after MISSING",
        )))
        .parse_next(input)?;
    Ok(Expr::Missing(column))
}

/// `operand rel_op operand`
fn comparison(input: &mut &str) -> ModalResult<Expr> {
    let left = operand.parse_next(input)?;
    ws_skip.parse_next(input)?;
    let at = Mark::here(input);
    let op = cut_err(rel_op)
        .context(StrContext::Expected(StrContextValue::Description(
            "comparison operator",
        )))
        .parse_next(input)?;
    ws_skip.parse_next(input)?;
    let right = cut_err(operand)
        .context(StrContext::Expected(StrContextValue::Description(
            "operand",
        )))
        .parse_next(input)?;
    Ok(Expr::Comparison {
        op,
        left,
        right,
        at,
    })
}

fn rel_op(input: &mut &str) -> ModalResult<RelOp> {
    alt((
        literal(">=").value(RelOp::Cmp(CmpOp::Ge)),
        literal("<=").value(RelOp::Cmp(CmpOp::Le)),
        literal(">").value(RelOp::Cmp(CmpOp::Gt)),
        literal("<").value(RelOp::Cmp(CmpOp::Lt)),
        literal("=").value(RelOp::Cmp(CmpOp::Eq)),
        kw(LIKE).value(RelOp::Like),
        kw(IN).value(RelOp::In),
    ))
    .parse_next(input)
}

// ---------------------------------------------------------------------------
// Operands
// ---------------------------------------------------------------------------

fn operand(input: &mut &str) -> ModalResult<SyntaxOperand> {
    let at = Mark::here(input);
    alt((
        column_ref.map(SyntaxOperand::Column),
        number_literal.map(|(text, fractional)| SyntaxOperand::Number {
            text: text.to_string(),
            fractional,
            at,
        }),
        quoted_string.map(|value| SyntaxOperand::Str { value, at }),
        string_list.map(|values| SyntaxOperand::List { values, at }),
    ))
    .parse_next(input)
}

/// `$name$`
fn column_ref(input: &mut &str) -> ModalResult<ColumnName> {
    literal("$").parse_next(input)?;
    let at = Mark::here(input);
    let name = cut_err(column_name)
        .context(StrContext::Expected(StrContextValue::Description(
            "column name",
        )))
        .parse_next(input)?;
    cut_err(literal("$"))
        .context(StrContext::Expected(StrContextValue::Description(
            "closing '$'",
        )))
        .parse_next(input)?;
    Ok(ColumnName {
        name: name.to_string(),
        at,
    })
}

/// `[ "a", "b", ... ]`, possibly empty.
fn string_list(input: &mut &str) -> ModalResult<Vec<String>> {
    literal("[").parse_next(input)?;
    ws_skip.parse_next(input)?;
    let values: Vec<String> = separated(
        0..,
        (quoted_string, ws_skip).map(|(s, _)| s),
        (literal(","), ws_skip),
    )
    .parse_next(input)?;
    ws_skip.parse_next(input)?;
    cut_err(literal("]"))
        .context(StrContext::Expected(StrContextValue::Description(
            "string or closing ']'",
        )))
        .parse_next(input)?;
    Ok(values)
}
