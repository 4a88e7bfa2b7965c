//! Coercion of loosely typed host arguments.
//!
//! Agent hosts send whatever the language model produced: numbers as
//! strings, booleans as `"true"`, `null` for "not given". [`Args`] takes
//! fields out of the argument object one by one, converting and checking
//! each, and [`Args::finish`] rejects anything left over.

use std::ops::RangeInclusive;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::KrakenError;

type Result<T> = std::result::Result<T, KrakenError>;

/// Arguments of a single tool call.
#[derive(Debug, Clone, Default)]
pub struct Args {
    values: Map<String, Value>,
}

impl Args {
    /// Wrap the raw `arguments` value of a tool call.
    ///
    /// `null` is treated as an empty object; any other non-object is rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(values) => Ok(Self { values }),
            other => Err(invalid(format!(
                "arguments must be an object, got {}",
                type_name(&other)
            ))),
        }
    }

    /// Accept `alias` as another spelling of `name`.
    pub fn alias(&mut self, name: &str, alias: &str) -> Result<()> {
        if let Some(value) = self.values.remove(alias) {
            if self.values.contains_key(name) {
                return Err(invalid(format!("give either {name} or {alias}, not both")));
            }
            self.values.insert(name.to_string(), value);
        }
        Ok(())
    }

    fn take(&mut self, name: &str) -> Option<Value> {
        match self.values.remove(name) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    /// Optional string. Numbers are accepted and kept in their JSON spelling;
    /// blank strings count as absent.
    pub fn string(&mut self, name: &str) -> Result<Option<String>> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::String(s)) => {
                let s = s.trim();
                Ok((!s.is_empty()).then(|| s.to_string()))
            }
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(invalid(format!(
                "{name} must be a string, got {}",
                type_name(&other)
            ))),
        }
    }

    /// Required, non-blank string.
    pub fn required_string(&mut self, name: &str) -> Result<String> {
        self.string(name)?
            .ok_or_else(|| invalid(format!("{name} is required")))
    }

    /// Optional non-negative integer, from a JSON integer or a numeric string.
    pub fn unsigned(&mut self, name: &str) -> Result<Option<u64>> {
        let Some(value) = self.take(name) else {
            return Ok(None);
        };
        let parsed = match &value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };
        parsed
            .map(Some)
            .ok_or_else(|| invalid(format!("{name} must be a non-negative integer")))
    }

    /// Optional non-negative integer within `range`.
    pub fn unsigned_in(&mut self, name: &str, range: RangeInclusive<u64>) -> Result<Option<u32>> {
        match self.unsigned(name)? {
            None => Ok(None),
            Some(v) if range.contains(&v) => u32::try_from(v).map(Some).map_err(|_| {
                invalid(format!("{name} is out of range"))
            }),
            Some(_) => Err(invalid(format!(
                "{name} must be between {} and {}",
                range.start(),
                range.end()
            ))),
        }
    }

    /// Optional signed 32-bit integer (user reference IDs).
    pub fn int32(&mut self, name: &str) -> Result<Option<i32>> {
        let Some(value) = self.take(name) else {
            return Ok(None);
        };
        let parsed = match &value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed
            .and_then(|v| i32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| invalid(format!("{name} must be a 32-bit integer")))
    }

    /// Optional boolean, from a JSON boolean or `"true"` / `"false"`.
    pub fn boolean(&mut self, name: &str) -> Result<Option<bool>> {
        match self.take(name) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(b)),
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(invalid(format!("{name} must be true or false"))),
            },
            Some(_) => Err(invalid(format!("{name} must be true or false"))),
        }
    }

    /// Optional strictly positive decimal, from a JSON number or a string.
    pub fn positive_decimal(&mut self, name: &str) -> Result<Option<Decimal>> {
        let Some(value) = self.take(name) else {
            return Ok(None);
        };
        let text = match &value {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.trim().to_string(),
            _ => String::new(),
        };
        match Decimal::from_str(&text) {
            Ok(d) if d > Decimal::ZERO => Ok(Some(d)),
            _ => Err(invalid(format!("{name} must be a positive decimal number"))),
        }
    }

    /// Optional order price, forwarded exactly as given.
    ///
    /// Accepts an absolute price (`37500.5`) or Kraken's relative forms: a
    /// `+`, `-` or `#` prefix and an optional `%` suffix (`+50`, `-2%`,
    /// `#5`).
    pub fn price(&mut self, name: &str) -> Result<Option<String>> {
        let Some(text) = self.string(name)? else {
            return Ok(None);
        };
        if is_price(&text) {
            Ok(Some(text))
        } else {
            Err(invalid(format!(
                "{name} must be a positive price, optionally prefixed with +, - or # \
                 and suffixed with %"
            )))
        }
    }

    /// Optional value from a fixed set of wire spellings.
    pub fn choice<T>(&mut self, name: &str, allowed: &[&str]) -> Result<Option<T>>
    where
        T: FromStr,
    {
        match self.string(name)? {
            None => Ok(None),
            Some(s) => s.parse::<T>().map(Some).map_err(|_| {
                invalid(format!("{name} must be one of: {}", allowed.join(", ")))
            }),
        }
    }

    /// Reject arguments that no accessor consumed.
    pub fn finish(self) -> Result<()> {
        if self.values.is_empty() {
            return Ok(());
        }
        let mut unknown: Vec<&str> = self.values.keys().map(String::as_str).collect();
        unknown.sort_unstable();
        Err(invalid(format!("unknown argument(s): {}", unknown.join(", "))))
    }
}

fn is_price(text: &str) -> bool {
    let body = text.strip_prefix(['+', '-', '#']).unwrap_or(text);
    let body = body.strip_suffix('%').unwrap_or(body);
    !body.is_empty()
        && body.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && Decimal::from_str(body).is_ok_and(|d| d > Decimal::ZERO)
}

fn invalid(message: String) -> KrakenError {
    KrakenError::Validation(message)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::BuySell;

    fn args(value: Value) -> Args {
        Args::from_value(value).unwrap()
    }

    fn message(err: KrakenError) -> String {
        match err {
            KrakenError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_value_shapes() {
        assert!(Args::from_value(Value::Null).unwrap().finish().is_ok());
        assert!(Args::from_value(json!([1, 2])).is_err());
        assert!(Args::from_value(json!("pair")).is_err());
    }

    #[test]
    fn test_strings() {
        let mut a = args(json!({"pair": " XBTUSD ", "blank": "", "num": 42, "flag": true}));
        assert_eq!(a.required_string("pair").unwrap(), "XBTUSD");
        assert_eq!(a.string("blank").unwrap(), None);
        assert_eq!(a.string("num").unwrap().as_deref(), Some("42"));
        assert!(a.string("flag").is_err());
        assert!(message(a.required_string("missing").unwrap_err()).contains("missing is required"));
    }

    #[test]
    fn test_unsigned_coercion() {
        let mut a = args(json!({"a": 5, "b": "17", "c": -1, "d": 1.5, "e": null}));
        assert_eq!(a.unsigned("a").unwrap(), Some(5));
        assert_eq!(a.unsigned("b").unwrap(), Some(17));
        assert!(message(a.unsigned("c").unwrap_err()).contains("non-negative"));
        assert!(a.unsigned("d").is_err());
        assert_eq!(a.unsigned("e").unwrap(), None);
        a.finish().unwrap();
    }

    #[test]
    fn test_unsigned_in_range() {
        let mut a = args(json!({"count": 0, "ok": 500}));
        assert!(message(a.unsigned_in("count", 1..=500).unwrap_err()).contains("between 1 and 500"));
        assert_eq!(a.unsigned_in("ok", 1..=500).unwrap(), Some(500));
    }

    #[test]
    fn test_booleans() {
        let mut a = args(json!({"a": true, "b": "false", "c": "yes", "d": 1}));
        assert_eq!(a.boolean("a").unwrap(), Some(true));
        assert_eq!(a.boolean("b").unwrap(), Some(false));
        assert!(a.boolean("c").is_err());
        assert!(a.boolean("d").is_err());
    }

    #[test]
    fn test_positive_decimal() {
        let mut a = args(json!({"s": "0.1", "n": 0.25, "zero": "0", "neg": -1, "junk": "abc"}));
        assert_eq!(a.positive_decimal("s").unwrap().unwrap().to_string(), "0.1");
        assert_eq!(a.positive_decimal("n").unwrap().unwrap().to_string(), "0.25");
        assert!(a.positive_decimal("zero").is_err());
        assert!(a.positive_decimal("neg").is_err());
        assert!(a.positive_decimal("junk").is_err());
    }

    #[test]
    fn test_price_keeps_relative_spelling() {
        let mut a = args(json!({
            "abs": 37500.5,
            "plus": "+50",
            "minus": "-10",
            "pct": "+2%",
            "hash": "#5",
            "neg": -10,
            "trailing": "50.00"
        }));
        assert_eq!(a.price("abs").unwrap().as_deref(), Some("37500.5"));
        assert_eq!(a.price("plus").unwrap().as_deref(), Some("+50"));
        assert_eq!(a.price("minus").unwrap().as_deref(), Some("-10"));
        assert_eq!(a.price("pct").unwrap().as_deref(), Some("+2%"));
        assert_eq!(a.price("hash").unwrap().as_deref(), Some("#5"));
        assert_eq!(a.price("neg").unwrap().as_deref(), Some("-10"));
        assert_eq!(a.price("trailing").unwrap().as_deref(), Some("50.00"));
        a.finish().unwrap();
    }

    #[test]
    fn test_price_rejects_malformed() {
        for bad in ["abc", "++5", "5%%", "0", "+0%", "%", "+", "1e5", "1_000", "1.2.3", "5 %"] {
            let mut a = args(json!({ "price": bad }));
            assert!(a.price("price").is_err(), "{bad}");
        }
    }

    #[test]
    fn test_int32() {
        let mut a = args(json!({"a": -7, "b": "12", "c": 4_000_000_000u64}));
        assert_eq!(a.int32("a").unwrap(), Some(-7));
        assert_eq!(a.int32("b").unwrap(), Some(12));
        assert!(a.int32("c").is_err());
    }

    #[test]
    fn test_choice_lists_allowed_values() {
        let mut a = args(json!({"side": "buy", "bad": "hold"}));
        assert_eq!(
            a.choice::<BuySell>("side", BuySell::VALUES).unwrap(),
            Some(BuySell::Buy)
        );
        let msg = message(a.choice::<BuySell>("bad", BuySell::VALUES).unwrap_err());
        assert_eq!(msg, "bad must be one of: buy, sell");
    }

    #[test]
    fn test_alias_and_finish() {
        let mut a = args(json!({"timeout": 30, "extra": 1, "another": 2}));
        a.alias("timeout_seconds", "timeout").unwrap();
        assert_eq!(a.unsigned("timeout_seconds").unwrap(), Some(30));
        assert_eq!(
            message(a.finish().unwrap_err()),
            "unknown argument(s): another, extra"
        );

        let mut both = args(json!({"timeout": 1, "timeout_seconds": 2}));
        assert!(both.alias("timeout_seconds", "timeout").is_err());
    }
}
