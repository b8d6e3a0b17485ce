use crate::runner::ds::error::JErrorType;
use crate::runner::ds::object::ObjectType;
use crate::runner::ds::value::{JsNumberType, JsValue};

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_OBJECT: &str = "object";
pub const TYPE_STR_FUNCTION: &str = "function";

pub fn get_type(a: &JsValue) -> &'static str {
    match a {
        JsValue::Undefined => TYPE_STR_UNDEFINED,
        JsValue::Null => TYPE_STR_NULL,
        JsValue::Boolean(_) => TYPE_STR_BOOLEAN,
        JsValue::String(_) => TYPE_STR_STRING,
        JsValue::Number(_) => TYPE_STR_NUMBER,
        JsValue::Object(o) => match *(**o).borrow() {
            ObjectType::Ordinary(_) => TYPE_STR_OBJECT,
            ObjectType::Function(_) => TYPE_STR_FUNCTION,
        },
    }
}

pub fn to_number(v: &JsValue) -> JsNumberType {
    match v {
        JsValue::Undefined => JsNumberType::NaN,
        JsValue::Null => JsNumberType::Integer(0),
        JsValue::Boolean(b) => JsNumberType::Integer(if *b { 1 } else { 0 }),
        JsValue::String(s) => string_to_number(s),
        JsValue::Number(n) => n.clone(),
        // Plain objects have no numeric valueOf.
        JsValue::Object(_) => JsNumberType::NaN,
    }
}

/// Numeric value of a string: surrounding whitespace is ignored, an empty
/// string is 0, and anything that is not a numeric literal is `NaN`.
pub fn string_to_number(s: &str) -> JsNumberType {
    let s = s.trim();
    if s.is_empty() {
        return JsNumberType::Integer(0);
    }
    match s {
        "Infinity" | "+Infinity" => return JsNumberType::PositiveInfinity,
        "-Infinity" => return JsNumberType::NegativeInfinity,
        _ => {}
    }
    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return radix_to_number(&s[2..], radix);
    }
    if !is_decimal_literal(s) {
        return JsNumberType::NaN;
    }
    if !s.contains(|c: char| c == '.' || c == 'e' || c == 'E') {
        if let Ok(i) = s.parse::<i64>() {
            return JsNumberType::Integer(i);
        }
    }
    match s.parse::<f64>() {
        Ok(f) => JsNumberType::from_f64(f),
        Err(_) => JsNumberType::NaN,
    }
}

fn radix_to_number(digits: &str, radix: u32) -> JsNumberType {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return JsNumberType::NaN;
    }
    match i64::from_str_radix(digits, radix) {
        Ok(i) => JsNumberType::Integer(i),
        Err(_) => JsNumberType::from_f64(digits.chars().fold(0.0, |acc, c| {
            acc * radix as f64 + c.to_digit(radix).unwrap_or(0) as f64
        })),
    }
}

/// `[+-] digits [. digits] [(e|E) [+-] digits]`, with at least one mantissa
/// digit on either side of the point.
fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        mantissa_digits += i - frac_start;
    }
    if mantissa_digits == 0 {
        return false;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}

pub fn add_numbers(a: &JsNumberType, b: &JsNumberType) -> JsNumberType {
    match (a, b) {
        (JsNumberType::NaN, _) | (_, JsNumberType::NaN) => JsNumberType::NaN,
        (JsNumberType::Integer(x), JsNumberType::Integer(y)) => match x.checked_add(*y) {
            Some(sum) => JsNumberType::Integer(sum),
            None => JsNumberType::Float(*x as f64 + *y as f64),
        },
        _ => JsNumberType::from_f64(a.as_f64() + b.as_f64()),
    }
}

/// `value + 1` after numeric conversion, the way `x++` behaves.
pub fn increment(v: &JsValue) -> JsValue {
    JsValue::Number(add_numbers(&to_number(v), &JsNumberType::Integer(1)))
}

/// Borrows the string out of `v` for a string method call named `method`.
/// Anything else is the usual "cannot read properties" type error.
pub fn expect_string<'a>(v: &'a JsValue, method: &str) -> Result<&'a str, JErrorType> {
    match v {
        JsValue::String(s) => Ok(s),
        JsValue::Undefined | JsValue::Null => Err(JErrorType::type_error(format!(
            "Cannot read properties of {} (reading '{}')",
            v, method
        ))),
        _ => Err(JErrorType::type_error(format!(
            "{}.{} is not a function",
            get_type(v),
            method
        ))),
    }
}
