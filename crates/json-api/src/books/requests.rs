//! Book request parsing.

use std::str::FromStr;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::prelude::StatusError;

use crate::extensions::*;

/// Parse a non-negative money amount with at most two decimal places.
pub(crate) fn parse_money(field: &str, value: &str) -> Result<Decimal, StatusError> {
    let amount = value
        .trim()
        .parse::<Decimal>()
        .or_400(&format!("\"{field}\" must be a decimal amount"))?;

    if amount.is_sign_negative() || amount.scale() > 2 {
        return Err(StatusError::bad_request().brief(format!(
            "\"{field}\" must be non-negative with at most two decimal places"
        )));
    }

    Ok(amount)
}

pub(crate) fn parse_timestamp(field: &str, value: Option<&str>) -> Result<Option<Timestamp>, StatusError> {
    value
        .map(|value| value.parse::<Timestamp>())
        .transpose()
        .or_400(&format!("\"{field}\" must be an RFC 3339 timestamp"))
}

/// Parse an optional named value such as a genre or format; blank counts as absent.
pub(crate) fn parse_named<T: FromStr>(field: &str, value: Option<&str>) -> Result<Option<T>, StatusError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::parse::<T>)
        .transpose()
        .map_err(|_err| StatusError::bad_request().brief(format!("\"{field}\" is not recognised")))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use bookstore_app::domain::catalog::classification::BookGenre;

    use super::*;

    #[test]
    fn money_accepts_cents() -> TestResult {
        assert_eq!(parse_money("price", " 12.99 ")?, dec!(12.99));
        assert_eq!(parse_money("price", "0")?, dec!(0));

        Ok(())
    }

    #[test]
    fn money_rejects_negative_fractional_cents_and_garbage() {
        assert!(parse_money("price", "-1.00").is_err());
        assert!(parse_money("price", "1.005").is_err());
        assert!(parse_money("price", "ten").is_err());
    }

    #[test]
    fn timestamps_are_optional() -> TestResult {
        assert_eq!(parse_timestamp("saleEnd", None)?, None);
        assert!(parse_timestamp("saleEnd", Some("2026-03-01T00:00:00Z"))?.is_some());
        assert!(parse_timestamp("saleEnd", Some("tomorrow")).is_err());

        Ok(())
    }

    #[test]
    fn named_values_treat_blank_as_absent() -> TestResult {
        assert_eq!(parse_named::<BookGenre>("genre", None)?, None);
        assert_eq!(parse_named::<BookGenre>("genre", Some("  "))?, None);
        assert_eq!(
            parse_named::<BookGenre>("genre", Some("SelfHelp"))?,
            Some(BookGenre::SelfHelp)
        );
        assert!(parse_named::<BookGenre>("genre", Some("poetry")).is_err());

        Ok(())
    }
}
