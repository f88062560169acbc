use serde::{Deserialize, Deserializer};

/// Parse a user-typed amount. Blank, malformed and non-finite input is 0.
pub fn parse_amount(raw: &str) -> f64 {
    let raw = raw.trim().trim_matches('"');
    if raw.is_empty() {
        return 0.0;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Parse a whole-number count (bonuses, trips, deductions). Fractions truncate.
pub fn parse_count(raw: &str) -> f64 {
    parse_amount(raw).trunc()
}

/// Clamp NaN and infinities to 0 so they never reach a total.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Largest row id accepted from typed or imported input. Every id up to it is
/// exact as an `f64`.
pub const MAX_ID: u64 = (1 << 53) - 1;

/// Row id from a typed number. Fractions truncate; anything below 1 or above
/// [`MAX_ID`] is `None`.
pub fn parse_id(value: f64) -> Option<u64> {
    let id = finite_or_zero(value).trunc();
    (id >= 1.0 && id <= MAX_ID as f64).then_some(id as u64)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// serde adapter: accepts a number, a numeric string or null.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrText::Number(n)) => finite_or_zero(n),
        Some(NumberOrText::Text(s)) => parse_amount(&s),
        None => 0.0,
    })
}
