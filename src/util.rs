use crate::error::app_error::AppError;
use crate::models::pagination::PageSize;
use chrono::NaiveDate;

/// Parses an optional `YYYY-MM-DD` query parameter.
#[allow(clippy::result_large_err)]
pub fn parse_date_param(name: &str, value: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").map_err(|_| AppError::BadRequest(format!("Invalid {} date '{}', expected YYYY-MM-DD", name, v))))
        .transpose()
}

#[allow(clippy::result_large_err)]
fn parse_count(name: &str, value: &str) -> Result<usize, AppError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| AppError::BadRequest(format!("Invalid {} '{}', expected a whole number", name, value)))
}

/// Only the offered page sizes are accepted; absent means the default.
#[allow(clippy::result_large_err)]
pub fn parse_page_size(value: Option<&str>) -> Result<PageSize, AppError> {
    match value {
        None => Ok(PageSize::default()),
        Some(raw) => PageSize::try_from(parse_count("page_size", raw)?).map_err(AppError::BadRequest),
    }
}

/// Absent means page 1. Page 0 is accepted and later treated as 1.
#[allow(clippy::result_large_err)]
pub fn parse_page(value: Option<&str>) -> Result<usize, AppError> {
    value.map_or(Ok(1), |raw| parse_count("page", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_parse_or_reject() {
        assert_eq!(parse_date_param("from", Some("2025-06-15")).unwrap(), NaiveDate::from_ymd_opt(2025, 6, 15));
        assert_eq!(parse_date_param("from", None).unwrap(), None);
        assert_eq!(parse_date_param("from", Some(" ")).unwrap(), None);
        assert!(matches!(parse_date_param("to", Some("15/06/2025")), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn page_size_defaults_and_validates() {
        assert_eq!(parse_page_size(None).unwrap(), PageSize::Ten);
        assert_eq!(parse_page_size(Some("50")).unwrap(), PageSize::Fifty);
        assert!(matches!(parse_page_size(Some("20")), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_page_size(Some("abc")), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn page_defaults_and_rejects_garbage() {
        assert_eq!(parse_page(None).unwrap(), 1);
        assert_eq!(parse_page(Some("3")).unwrap(), 3);
        assert!(matches!(parse_page(Some("two")), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_page(Some("-1")), Err(AppError::BadRequest(_))));
    }
}
