//! Raw string to typed value conversion

use super::args::Value;
use super::descriptor::Kind;
use super::record::FieldKind;

/// Conversion failure; the caller attaches the parameter context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertError {
    pub expected: &'static str,
}

/// Convert one raw value to a scalar kind
///
/// `Ok(None)` means the raw value carries no value for the kind: an empty
/// string for anything but text.
pub fn convert_scalar(raw: &str, kind: Kind) -> Result<Option<Value>, ConvertError> {
    if matches!(kind, Kind::Text) {
        return Ok(Some(Value::Text(raw.to_string())));
    }

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value = match kind {
        Kind::Int | Kind::NullableInt => trimmed.parse().map(Value::Int).ok(),
        Kind::Long => trimmed.parse().map(Value::Long).ok(),
        Kind::Bool => parse_bool(trimmed).map(Value::Bool),
        Kind::Text | Kind::TextList | Kind::Record(_) => Some(Value::Text(raw.to_string())),
    };

    value.map(Some).ok_or(ConvertError {
        expected: kind.name(),
    })
}

/// Convert one raw value to a JSON value for a record field
///
/// `Ok(None)` leaves the field at its zero value.
pub fn convert_field(raw: &str, kind: FieldKind) -> Result<Option<serde_json::Value>, ConvertError> {
    let scalar = match kind {
        FieldKind::Text => Kind::Text,
        FieldKind::Int => Kind::Int,
        FieldKind::Long => Kind::Long,
        FieldKind::Bool => Kind::Bool,
    };
    Ok(convert_scalar(raw, scalar)?.and_then(|v| v.to_json()))
}

/// Lenient boolean parsing: true/false, on/off, yes/no, 1/0
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_keeps_empty_and_whitespace() {
        assert_eq!(convert_scalar("", Kind::Text), Ok(Some(Value::Text(String::new()))));
        assert_eq!(
            convert_scalar(" a ", Kind::Text),
            Ok(Some(Value::Text(" a ".to_string())))
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(convert_scalar("20", Kind::Int), Ok(Some(Value::Int(20))));
        assert_eq!(convert_scalar(" -1 ", Kind::NullableInt), Ok(Some(Value::Int(-1))));
        assert_eq!(
            convert_scalar("9000000000", Kind::Long),
            Ok(Some(Value::Long(9_000_000_000)))
        );
        assert_eq!(convert_scalar("", Kind::Int), Ok(None));
        assert_eq!(
            convert_scalar("abc", Kind::Int),
            Err(ConvertError { expected: "int" })
        );
        assert_eq!(
            convert_scalar("9000000000", Kind::Int),
            Err(ConvertError { expected: "int" })
        );
    }

    #[test]
    fn test_bools() {
        assert_eq!(convert_scalar("ON", Kind::Bool), Ok(Some(Value::Bool(true))));
        assert_eq!(convert_scalar("0", Kind::Bool), Ok(Some(Value::Bool(false))));
        assert!(convert_scalar("maybe", Kind::Bool).is_err());
    }

    #[test]
    fn test_fields() {
        assert_eq!(
            convert_field("20", FieldKind::Int),
            Ok(Some(serde_json::json!(20)))
        );
        assert_eq!(convert_field("", FieldKind::Int), Ok(None));
        assert_eq!(
            convert_field("", FieldKind::Text),
            Ok(Some(serde_json::json!("")))
        );
        assert!(convert_field("abc", FieldKind::Long).is_err());
    }
}
