//! Client-side request validation.
//!
//! Each rule is a pure check over already-parsed flag values, run before any
//! network call so inconsistent requests fail without a round trip. Callers
//! run the rules in sequence and stop at the first failure.

use std::sync::LazyLock;

use regex::Regex;

pub const ORDER_SIDE_BUY: &str = "BUY";
pub const ORDER_SIDE_SELL: &str = "SELL";

pub const ORDER_TYPE_MARKET: &str = "MARKET";
pub const ORDER_TYPE_LIMIT: &str = "LIMIT";
pub const ORDER_TYPE_TWAP: &str = "TWAP";
pub const ORDER_TYPE_VWAP: &str = "VWAP";

pub const TIF_FILL_OR_KILL: &str = "FILL_OR_KILL";
pub const TIF_GOOD_UNTIL_DATE_TIME: &str = "GOOD_UNTIL_DATE_TIME";
pub const TIF_GOOD_UNTIL_CANCELLED: &str = "GOOD_UNTIL_CANCELLED";
pub const TIF_IMMEDIATE_OR_CANCEL: &str = "IMMEDIATE_OR_CANCEL";

const VALID_TIME_IN_FORCE: [&str; 4] = [
    TIF_FILL_OR_KILL,
    TIF_GOOD_UNTIL_DATE_TIME,
    TIF_GOOD_UNTIL_CANCELLED,
    TIF_IMMEDIATE_OR_CANCEL,
];

// Canonical 8-4-4-4-12 grouping with version nibble 4 or 5 and an RFC 4122
// variant nibble.
static UUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[4-5][0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$",
    )
    .expect("hard-coded pattern compiles")
});

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("the UUID must not be empty")]
    EmptyUuid,
    #[error("the UUID is not valid")]
    MalformedUuid,
    #[error("{flag} must be a valid UUID: {source}")]
    InvalidUuidFlag {
        flag: &'static str,
        source: Box<ValidationError>,
    },
    #[error("side must be either 'BUY' or 'SELL'")]
    InvalidSide,
    #[error("limit-price is required for LIMIT, TWAP, and VWAP order types")]
    MissingLimitPrice,
    #[error("type must be one of MARKET, LIMIT, TWAP, or VWAP")]
    InvalidOrderType,
    #[error(
        "invalid time-in-force: {0}. Must be one of: FILL_OR_KILL, GOOD_UNTIL_DATE_TIME, GOOD_UNTIL_CANCELLED, IMMEDIATE_OR_CANCEL"
    )]
    InvalidTimeInForce(String),
    #[error("invalid network type: {0}")]
    InvalidNetworkType(String),
    #[error("either base-quantity or quote-value must be provided, not both")]
    BothQuantities,
    #[error("one of base-quantity or quote-value must be provided")]
    NoQuantity,
}

pub fn validate_uuid(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyUuid);
    }
    if !UUID_PATTERN.is_match(value) {
        return Err(ValidationError::MalformedUuid);
    }
    Ok(())
}

/// Like [`validate_uuid`], naming the offending flag in the error.
pub fn validate_uuid_flag(flag: &'static str, value: &str) -> Result<(), ValidationError> {
    validate_uuid(value).map_err(|source| ValidationError::InvalidUuidFlag {
        flag,
        source: Box::new(source),
    })
}

/// Exact-match side check; the server tokens are case-sensitive.
pub fn validate_side(side: &str) -> Result<(), ValidationError> {
    if side != ORDER_SIDE_BUY && side != ORDER_SIDE_SELL {
        return Err(ValidationError::InvalidSide);
    }
    Ok(())
}

/// MARKET orders carry no price; every other recognized type requires one.
pub fn validate_order_type_and_limit_price(
    order_type: &str,
    limit_price: &str,
) -> Result<(), ValidationError> {
    match order_type.to_uppercase().as_str() {
        ORDER_TYPE_MARKET => Ok(()),
        ORDER_TYPE_LIMIT | ORDER_TYPE_TWAP | ORDER_TYPE_VWAP => {
            if limit_price.is_empty() {
                return Err(ValidationError::MissingLimitPrice);
            }
            Ok(())
        }
        _ => Err(ValidationError::InvalidOrderType),
    }
}

/// Empty means "let the server default"; anything else must be a recognized
/// token.
pub fn validate_time_in_force(time_in_force: &str) -> Result<(), ValidationError> {
    if time_in_force.is_empty() {
        return Ok(());
    }
    if !VALID_TIME_IN_FORCE.contains(&time_in_force) {
        return Err(ValidationError::InvalidTimeInForce(time_in_force.to_owned()));
    }
    Ok(())
}

/// Exactly one of base quantity and quote value sizes an order.
pub fn validate_quantities(base_quantity: &str, quote_value: &str) -> Result<(), ValidationError> {
    if !base_quantity.is_empty() && !quote_value.is_empty() {
        return Err(ValidationError::BothQuantities);
    }
    if base_quantity.is_empty() && quote_value.is_empty() {
        return Err(ValidationError::NoQuantity);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_v4_uuid_passes() {
        validate_uuid("550e8400-e29b-41d4-a716-446655440000").unwrap();
    }

    #[test]
    fn generated_v4_uuid_passes() {
        let id = uuid::Uuid::new_v4().to_string();
        validate_uuid(&id).unwrap();
    }

    #[test]
    fn v5_version_nibble_passes() {
        validate_uuid("550e8400-e29b-51d4-a716-446655440000").unwrap();
    }

    #[test]
    fn empty_uuid_fails() {
        assert!(matches!(
            validate_uuid("").unwrap_err(),
            ValidationError::EmptyUuid
        ));
    }

    #[test]
    fn garbage_uuid_fails() {
        assert!(matches!(
            validate_uuid("not-a-uuid").unwrap_err(),
            ValidationError::MalformedUuid
        ));
    }

    #[test]
    fn wrong_grouping_fails() {
        validate_uuid("550e8400e29b-41d4-a716-446655440000").unwrap_err();
        validate_uuid("550e8400-e29b-41d4-a716-4466554400000").unwrap_err();
    }

    #[test]
    fn version_nibble_outside_4_5_fails() {
        validate_uuid("550e8400-e29b-11d4-a716-446655440000").unwrap_err();
        validate_uuid("550e8400-e29b-71d4-a716-446655440000").unwrap_err();
    }

    #[test]
    fn variant_nibble_outside_rfc4122_fails() {
        validate_uuid("550e8400-e29b-41d4-c716-446655440000").unwrap_err();
    }

    #[test]
    fn uuid_flag_error_names_the_flag() {
        let err = validate_uuid_flag("order-id", "nope").unwrap_err();
        assert!(err.to_string().starts_with("order-id must be a valid UUID"));
    }

    #[test]
    fn side_accepts_exact_tokens_only() {
        validate_side("BUY").unwrap();
        validate_side("SELL").unwrap();
        validate_side("buy").unwrap_err();
        validate_side("").unwrap_err();
    }

    #[test]
    fn market_orders_need_no_limit_price() {
        validate_order_type_and_limit_price("MARKET", "").unwrap();
    }

    #[test]
    fn price_bearing_types_require_limit_price() {
        validate_order_type_and_limit_price("LIMIT", "").unwrap_err();
        validate_order_type_and_limit_price("TWAP", "").unwrap_err();
        validate_order_type_and_limit_price("VWAP", "").unwrap_err();
        validate_order_type_and_limit_price("LIMIT", "100.00").unwrap();
    }

    #[test]
    fn order_type_check_is_case_insensitive() {
        validate_order_type_and_limit_price("market", "").unwrap();
        validate_order_type_and_limit_price("limit", "99").unwrap();
    }

    #[test]
    fn unrecognized_order_type_fails_regardless_of_price() {
        assert!(matches!(
            validate_order_type_and_limit_price("SWAP", "100.00").unwrap_err(),
            ValidationError::InvalidOrderType
        ));
    }

    #[test]
    fn empty_time_in_force_is_accepted() {
        validate_time_in_force("").unwrap();
    }

    #[test]
    fn recognized_time_in_force_tokens_pass() {
        for token in VALID_TIME_IN_FORCE {
            validate_time_in_force(token).unwrap();
        }
    }

    #[test]
    fn unknown_time_in_force_fails() {
        let err = validate_time_in_force("GOOD_TIL_LUNCH").unwrap_err();
        assert!(err.to_string().contains("GOOD_TIL_LUNCH"));
    }

    #[test]
    fn exactly_one_quantity_must_be_set() {
        validate_quantities("1", "").unwrap();
        validate_quantities("", "100").unwrap();
        assert!(matches!(
            validate_quantities("", "").unwrap_err(),
            ValidationError::NoQuantity
        ));
        assert!(matches!(
            validate_quantities("1", "100").unwrap_err(),
            ValidationError::BothQuantities
        ));
    }
}
