// SPDX-License-Identifier: MIT

//! Comparison operators and the coercion rules behind them
//!
//! Rule values come from the host's scripting environment, so comparisons
//! follow its semantics: relational operators compare strings by code unit
//! and everything else numerically, `==`/`!=` coerce across types while
//! `===`/`!==` never do. The coercions are spelled out here rather than
//! inherited from any runtime.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Supported comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum CompareOp {
    /// >=
    #[serde(rename = ">=")]
    Gte,
    /// >
    #[serde(rename = ">")]
    Gt,
    /// <=
    #[serde(rename = "<=")]
    Lte,
    /// <
    #[serde(rename = "<")]
    Lt,
    /// == (with type coercion)
    #[serde(rename = "==")]
    LooseEq,
    /// ===
    #[serde(rename = "===")]
    StrictEq,
    /// != (with type coercion)
    #[serde(rename = "!=")]
    LooseNe,
    /// !==
    #[serde(rename = "!==")]
    StrictNe,
}

impl CompareOp {
    pub const ALL: [CompareOp; 8] = [
        CompareOp::Gte,
        CompareOp::Gt,
        CompareOp::Lte,
        CompareOp::Lt,
        CompareOp::LooseEq,
        CompareOp::StrictEq,
        CompareOp::LooseNe,
        CompareOp::StrictNe,
    ];

    /// Parse an operator symbol; anything unrecognized is `None`
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == s)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Gte => ">=",
            CompareOp::Gt => ">",
            CompareOp::Lte => "<=",
            CompareOp::Lt => "<",
            CompareOp::LooseEq => "==",
            CompareOp::StrictEq => "===",
            CompareOp::LooseNe => "!=",
            CompareOp::StrictNe => "!==",
        }
    }

    pub fn apply(self, left: &Operand, right: &Operand) -> bool {
        match self {
            CompareOp::Lt => less_than(left, right) == Some(true),
            CompareOp::Gt => less_than(right, left) == Some(true),
            CompareOp::Lte => less_than(right, left) == Some(false),
            CompareOp::Gte => less_than(left, right) == Some(false),
            CompareOp::LooseEq => loose_eq(left, right),
            CompareOp::LooseNe => !loose_eq(left, right),
            CompareOp::StrictEq => strict_eq(left, right),
            CompareOp::StrictNe => !strict_eq(left, right),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One side of a comparison
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    /// Array or object, carried as its primitive string form
    Object(String),
}

impl Operand {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Operand::Null,
            Value::Bool(b) => Operand::Bool(*b),
            Value::Number(n) => Operand::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Operand::String(s.clone()),
            Value::Array(_) | Value::Object(_) => Operand::Object(display_value(value)),
        }
    }

    /// Absent values become `Undefined`
    pub fn from_option(value: Option<&Value>) -> Self {
        value.map_or(Operand::Undefined, Self::from_value)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Operand::Number(_))
    }

    /// Numeric conversion; unparsable input is NaN
    pub fn to_number(&self) -> f64 {
        match self {
            Operand::Undefined => f64::NAN,
            Operand::Null => 0.0,
            Operand::Bool(b) => f64::from(u8::from(*b)),
            Operand::Number(n) => *n,
            Operand::String(s) | Operand::Object(s) => parse_number(s),
        }
    }

    fn to_primitive(&self) -> Operand {
        match self {
            Operand::Object(s) => Operand::String(s.clone()),
            other => other.clone(),
        }
    }
}

/// Coerce the actual value for comparison against `expected`.
///
/// A numeric expectation turns the actual value into a number; any other
/// expectation compares the actual value as-is.
pub fn coerce(actual: &Value, expected: &Operand) -> Operand {
    let operand = Operand::from_value(actual);
    if expected.is_number() {
        Operand::Number(operand.to_number())
    } else {
        operand
    }
}

/// Compare by operator symbol. Unknown operators never match.
pub fn compare(left: &Operand, op: &str, right: &Operand) -> bool {
    CompareOp::parse(op).is_some_and(|op| op.apply(left, right))
}

/// Check an actual value against an expected one, applying numeric coercion
pub fn check(actual: &Value, op: &str, expected: Option<&Value>) -> bool {
    let right = Operand::from_option(expected);
    let left = coerce(actual, &right);
    compare(&left, op, &right)
}

/// `None` when either side is NaN after numeric conversion
fn less_than(x: &Operand, y: &Operand) -> Option<bool> {
    let (px, py) = (x.to_primitive(), y.to_primitive());
    if let (Operand::String(a), Operand::String(b)) = (&px, &py) {
        return Some(a.encode_utf16().lt(b.encode_utf16()));
    }
    let (a, b) = (px.to_number(), py.to_number());
    if a.is_nan() || b.is_nan() {
        return None;
    }
    Some(a < b)
}

fn loose_eq(x: &Operand, y: &Operand) -> bool {
    use Operand::*;

    match (x, y) {
        (Undefined | Null, Undefined | Null) => true,
        (Undefined | Null, _) | (_, Undefined | Null) => false,
        (Number(a), Number(b)) => a == b,
        (String(a), String(b)) => a == b,
        (Bool(a), Bool(b)) => a == b,
        (Object(_), Object(_)) => false,
        (Number(a), String(s)) | (String(s), Number(a)) => *a == parse_number(s),
        (Bool(_), other) => loose_eq(&Number(x.to_number()), other),
        (other, Bool(_)) => loose_eq(other, &Number(y.to_number())),
        (Object(p), other) | (other, Object(p)) => loose_eq(&String(p.clone()), other),
    }
}

fn strict_eq(x: &Operand, y: &Operand) -> bool {
    use Operand::*;

    match (x, y) {
        (Undefined, Undefined) | (Null, Null) => true,
        (Bool(a), Bool(b)) => a == b,
        (Number(a), Number(b)) => a == b,
        (String(a), String(b)) => a == b,
        _ => false,
    }
}

/// String-to-number conversion of the host scripting language
pub(crate) fn parse_number(s: &str) -> f64 {
    let t = s.trim();
    if t.is_empty() {
        return 0.0;
    }
    match t {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = t.strip_prefix(prefix) {
            return parse_radix(digits, radix);
        }
    }
    let decimal_chars = t
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !decimal_chars {
        return f64::NAN;
    }
    t.parse().unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix)
                .map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN)
}

/// Number-to-string conversion of the host scripting language
pub(crate) fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let s = format!("{:e}", n);
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => s,
        };
    }
    format!("{}", n)
}

/// Render a JSON value the way the host prints it in a template string
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n
            .as_f64()
            .map_or_else(|| n.to_string(), number_to_string),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|v| match v {
                Value::Null => String::new(),
                other => display_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Whether a value counts as set when used as a display label
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
