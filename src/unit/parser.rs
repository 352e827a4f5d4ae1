use crate::error::UnitError;
use crate::unit::atomic::AtomicUnit;
use crate::unit::expression::UnitExpression;
use crate::unit::registry;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// One factor: a symbol with an optional caret exponent.
    /// Examples: "kg", "s^-2", "m^0.5", "°C"
    static ref FACTOR_PATTERN: Regex =
        Regex::new(r"^([A-Za-z°µ]+)(?:\^(-?\d+(?:\.\d+)?))?$").unwrap();

    /// A quantity string: number, whitespace, unit expression.
    /// Examples: "100 bar", "10.5 m", "5 kg/s", "1e3 Pa", "-20 °C"
    static ref QUANTITY_PATTERN: Regex =
        Regex::new(r"^(-?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?)\s+([A-Za-z°µ0-9/^·*\.\-\s]+)$").unwrap();
}

/// Check whether a string looks like `"<number> <units>"`.
pub fn looks_like_quantity_string(s: &str) -> bool {
    QUANTITY_PATTERN.is_match(s.trim())
}

/// Split a quantity string into its numeric literal and unit expression.
pub fn split_quantity_string(s: &str) -> Option<(&str, &str)> {
    QUANTITY_PATTERN.captures(s.trim()).map(|caps| {
        let number = caps.get(1).map_or("", |m| m.as_str());
        let units = caps.get(2).map_or("", |m| m.as_str());
        (number, units.trim())
    })
}

/// Parse a unit expression such as `"kg*m/s^2"` into its canonical string
/// and atomic-unit factors.
///
/// Factors are separated by `*`, `·`, or whitespace; `/` inverts the factor
/// that follows it. A bare `1` is the neutral factor, permitting pure
/// reciprocals like `"1/s"`. Empty input is unitless.
pub fn parse_units(text: &str) -> Result<(String, Vec<AtomicUnit>), UnitError> {
    let mut factors: Vec<AtomicUnit> = Vec::new();
    let mut token = String::new();
    let mut invert_next = false;

    for ch in text.chars() {
        match ch {
            '*' | '·' => {
                if flush_token(&mut token, invert_next, &mut factors)? {
                    invert_next = false;
                }
            }
            '/' => {
                flush_token(&mut token, invert_next, &mut factors)?;
                invert_next = true;
            }
            c if c.is_whitespace() => {
                if flush_token(&mut token, invert_next, &mut factors)? {
                    invert_next = false;
                }
            }
            c => token.push(c),
        }
    }
    flush_token(&mut token, invert_next, &mut factors)?;

    let canonical = UnitExpression::from_factors(factors.clone()).to_string();
    Ok((canonical, factors))
}

/// Parse and append the pending token, if any. Returns whether a factor was
/// consumed, so separators between a `/` and its factor don't reset the sign.
fn flush_token(
    token: &mut String,
    invert: bool,
    factors: &mut Vec<AtomicUnit>,
) -> Result<bool, UnitError> {
    if token.is_empty() {
        return Ok(false);
    }
    let text = std::mem::take(token);

    // "1" is the neutral factor, as in "1/s".
    if text == "1" {
        return Ok(true);
    }

    let caps = FACTOR_PATTERN.captures(&text).ok_or_else(|| {
        UnitError::ParseError(format!("invalid unit factor: '{}'", text))
    })?;
    let symbol = caps.get(1).map_or("", |m| m.as_str());
    let mut exp: f64 = match caps.get(2) {
        Some(m) => m
            .as_str()
            .parse()
            .map_err(|_| UnitError::ParseError(format!("invalid exponent in '{}'", text)))?,
        None => 1.0,
    };
    if invert {
        exp = -exp;
    }

    let unit = registry::atomic(symbol, exp)?;
    if !unit.is_cancelled() {
        factors.push(unit);
    }
    Ok(true)
}
