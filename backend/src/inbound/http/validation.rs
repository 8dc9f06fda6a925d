//! Shared validation helpers for inbound HTTP adapters.
//!
//! Form values arrive as text; these helpers coerce them into domain types
//! and turn failures into structured `invalid_request` errors instead of
//! letting them surface as opaque faults.

use serde_json::json;

use crate::domain::{Error, VehicleId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureCode {
    InvalidInteger,
    InvalidDecimal,
    InvalidId,
}

impl FailureCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInteger => "invalid_integer",
            Self::InvalidDecimal => "invalid_decimal",
            Self::InvalidId => "invalid_id",
        }
    }
}

fn coercion_error(field: &'static str, value: &str, code: FailureCode, kind: &str) -> Error {
    Error::invalid_request(format!("{field} must be {kind}")).with_details(json!({
        "field": field,
        "value": value,
        "code": code.as_str(),
    }))
}

/// Coerce a form value into an integer attribute.
pub(crate) fn parse_i32_field(value: &str, field: &'static str) -> Result<i32, Error> {
    value
        .trim()
        .parse()
        .map_err(|_| coercion_error(field, value, FailureCode::InvalidInteger, "an integer"))
}

/// Coerce a form value into a decimal attribute.
pub(crate) fn parse_f64_field(value: &str, field: &'static str) -> Result<f64, Error> {
    value
        .trim()
        .parse()
        .map_err(|_| coercion_error(field, value, FailureCode::InvalidDecimal, "a decimal"))
}

/// Validate an identifier submitted in a path segment or form field.
pub(crate) fn parse_vehicle_id(value: &str, field: &'static str) -> Result<VehicleId, Error> {
    VehicleId::new(value)
        .map_err(|_| coercion_error(field, value, FailureCode::InvalidId, "a vehicle identifier"))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case("2023", Ok(2023))]
    #[case(" 2023 ", Ok(2023))]
    #[case("20x3", Err(()))]
    #[case("", Err(()))]
    #[case("20.5", Err(()))]
    fn integer_coercion(#[case] raw: &str, #[case] expected: Result<i32, ()>) {
        let result = parse_i32_field(raw, "year");
        match expected {
            Ok(value) => assert_eq!(result.expect("integer"), value),
            Err(()) => {
                let err = result.expect_err("must fail");
                assert_eq!(err.code(), ErrorCode::InvalidRequest);
                assert_eq!(
                    err.details().and_then(|d| d.get("code")).and_then(Value::as_str),
                    Some("invalid_integer")
                );
            }
        }
    }

    #[rstest]
    #[case("40000", 40_000.0)]
    #[case("40000.5", 40_000.5)]
    fn decimal_coercion_accepts_both_shapes(#[case] raw: &str, #[case] expected: f64) {
        assert_eq!(parse_f64_field(raw, "cost").expect("decimal"), expected);
    }

    #[test]
    fn decimal_coercion_reports_the_field() {
        let err = parse_f64_field("cheap", "cost").expect_err("must fail");
        assert_eq!(
            err.details().and_then(|d| d.get("field")).and_then(Value::as_str),
            Some("cost")
        );
    }

    #[test]
    fn identifier_validation_rejects_blank_values() {
        let err = parse_vehicle_id("", "ev1").expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
