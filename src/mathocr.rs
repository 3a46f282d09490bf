use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Largest operand the extractor accepts (three-digit cap, inclusive).
const MAX_OPERAND: i64 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    fn from_canonical(symbol: &str) -> Option<Operator> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mul),
            "/" => Some(Operator::Div),
            _ => None,
        }
    }

    /// Glyph used when rendering the question, independent of which input
    /// symbol triggered the match.
    pub fn display_glyph(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "×",
            Operator::Div => "÷",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MatchedExpression {
    left: i64,
    op: Operator,
    right: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MathProblem {
    pub question: String,
    pub answer: String,
}

/// OCR output commonly carries `x`/`X` in place of `×` and may or may not
/// preserve `÷`. Rewriting everything to the canonical `*` and `/` up front
/// lets the extractor use a single pattern. A literal x/X anywhere else in
/// the text is rewritten too; accepted for flashcard-style arithmetic lines.
fn normalize_operators(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'x' | 'X' | '×' => '*',
            '÷' => '/',
            _ => c,
        })
        .collect()
}

// Inner whitespace is spaces and tabs only: a number on one line must never
// pair with an operator or number on the next. The word boundaries reject
// digit runs embedded in longer numbers, so "12345" is never split.
static EXPRESSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([0-9]{1,3})[ \t]*([+*/-])[ \t]*([0-9]{1,3})\b").expect("expression pattern")
});

/// Matches in document order, non-overlapping; each consumed span is not
/// reused by a later match.
fn extract(normalized: &str) -> Vec<MatchedExpression> {
    EXPRESSION_RE
        .captures_iter(normalized)
        .filter_map(|caps| {
            let left = caps[1].parse().ok()?;
            let op = Operator::from_canonical(&caps[2])?;
            let right = caps[3].parse().ok()?;
            Some(MatchedExpression { left, op, right })
        })
        .collect()
}

/// `None` means skip: the triple is silently excluded from the output list.
/// The operand range check repeats the extractor's digit cap on purpose; the
/// extractor is not assumed to be the only caller.
fn evaluate(expr: &MatchedExpression) -> Option<f64> {
    if expr.left > MAX_OPERAND || expr.right > MAX_OPERAND {
        return None;
    }
    match expr.op {
        Operator::Add => Some((expr.left + expr.right) as f64),
        Operator::Sub => Some((expr.left - expr.right) as f64),
        Operator::Mul => Some((expr.left * expr.right) as f64),
        Operator::Div => {
            if expr.right == 0 {
                None
            } else {
                Some(expr.left as f64 / expr.right as f64)
            }
        }
    }
}

fn format_answer(value: f64) -> String {
    // Mathematical integers (negatives and zero included) render without a
    // decimal point.
    if value.fract() == 0.0 {
        return format!("{}", value as i64);
    }
    // Binary division can land a hair off an integer, so the integer check
    // runs again after rounding to two places: a trailing ".00" is stripped.
    let fixed = format!("{value:.2}");
    match fixed.strip_suffix(".00") {
        Some(whole) => whole.to_string(),
        None => fixed,
    }
}

/// Best-effort extraction over noisy OCR text: returns everything that was
/// successfully extracted and evaluated, in document order, and omits
/// everything that was not. Total function; never fails, holds no state
/// across calls.
pub fn extract_and_solve(text: &str) -> Vec<MathProblem> {
    let normalized = normalize_operators(text);
    let mut problems: Vec<MathProblem> = Vec::new();
    for expr in extract(&normalized) {
        let Some(value) = evaluate(&expr) else {
            continue;
        };
        problems.push(MathProblem {
            question: format!("{} {} {}", expr.left, expr.op.display_glyph(), expr.right),
            answer: format_answer(value),
        });
    }
    problems
}
