use chrono::{DateTime, NaiveDate};

use super::{ApiError, NumberOrString};
use crate::constants::limits::MAX_TRAVELERS;

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate, ApiError> {
    let trimmed = value.trim();

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| {
            ApiError::validation(format!(
                "Invalid {}: '{}'. Expected YYYY-MM-DD",
                field, value
            ))
        })
}

pub fn validate_stay(check_in: &str, check_out: &str) -> Result<(NaiveDate, NaiveDate), ApiError> {
    let check_in = parse_date(check_in, "checkInDate")?;
    let check_out = parse_date(check_out, "checkOutDate")?;

    if check_out <= check_in {
        return Err(ApiError::validation(
            "checkOutDate must be after checkInDate",
        ));
    }
    Ok((check_in, check_out))
}

/// IATA city or airport code, uppercased.
pub fn validate_location_code(code: &str, field: &str) -> Result<String, ApiError> {
    let trimmed = code.trim();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ApiError::validation(format!(
            "Invalid {}: '{}'. Expected a 3-letter IATA code",
            field, code
        )));
    }
    Ok(trimmed.to_ascii_uppercase())
}

pub fn validate_travelers(value: Option<&NumberOrString>, default: u32) -> Result<u32, ApiError> {
    let Some(value) = value else {
        return Ok(default);
    };

    let text = value.as_text();
    if text.is_empty() {
        return Ok(default);
    }

    match text.parse::<u32>() {
        Ok(n) if (1..=MAX_TRAVELERS).contains(&n) => Ok(n),
        _ => Err(ApiError::validation(format!(
            "Invalid travelers: '{}'. Must be between 1 and {}",
            text, MAX_TRAVELERS
        ))),
    }
}

/// Treats blank strings as missing.
pub fn present(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

pub fn validate_hotel_id(id: &str) -> Result<&str, ApiError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Hotel ID is required"));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ApiError::validation(format!("Invalid hotel ID: '{}'", id)));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 11, 2).unwrap();
        assert_eq!(parse_date("2026-11-02", "d").unwrap(), expected);
        assert_eq!(parse_date(" 2026-11-02 ", "d").unwrap(), expected);
        assert_eq!(parse_date("2026-11-02T10:30:00Z", "d").unwrap(), expected);
        assert_eq!(parse_date("2026-11-02T23:30:00+02:00", "d").unwrap(), expected);
        assert!(parse_date("02/11/2026", "d").is_err());
        assert!(parse_date("tomorrow", "d").is_err());
    }

    #[test]
    fn test_validate_stay() {
        assert!(validate_stay("2026-11-02", "2026-11-05").is_ok());
        assert!(validate_stay("2026-11-05", "2026-11-02").is_err());
        assert!(validate_stay("2026-11-02", "2026-11-02").is_err());
    }

    #[test]
    fn test_validate_location_code() {
        assert_eq!(validate_location_code("par", "destination").unwrap(), "PAR");
        assert!(validate_location_code("PARIS", "destination").is_err());
        assert!(validate_location_code("P1R", "destination").is_err());
    }

    #[test]
    fn test_validate_travelers() {
        assert_eq!(validate_travelers(None, 2).unwrap(), 2);
        assert_eq!(validate_travelers(Some(&NumberOrString::Number(3)), 2).unwrap(), 3);
        assert_eq!(validate_travelers(Some(&NumberOrString::Text("4".into())), 2).unwrap(), 4);
        assert_eq!(validate_travelers(Some(&NumberOrString::Text(String::new())), 2).unwrap(), 2);
        assert!(validate_travelers(Some(&NumberOrString::Number(0)), 2).is_err());
        assert!(validate_travelers(Some(&NumberOrString::Number(12)), 2).is_err());
        assert!(validate_travelers(Some(&NumberOrString::Text("two".into())), 2).is_err());
    }

    #[test]
    fn test_validate_hotel_id() {
        assert_eq!(validate_hotel_id("HLPAR266").unwrap(), "HLPAR266");
        assert_eq!(validate_hotel_id("par-3").unwrap(), "par-3");
        assert!(validate_hotel_id("  ").is_err());
        assert!(validate_hotel_id("../etc").is_err());
    }

    #[test]
    fn test_present() {
        let blank = "  ".to_string();
        let code = "PAR".to_string();
        assert_eq!(present(Some(&blank)), None);
        assert_eq!(present(Some(&code)), Some("PAR"));
        assert_eq!(present(None), None);
    }
}
