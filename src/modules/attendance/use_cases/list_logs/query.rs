use crate::modules::attendance::core::errors::ApplicationError;

/// Year/month constraints. `None` means no constraint on that field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

impl LogFilter {
    pub fn parse(year: Option<&str>, month: Option<&str>) -> Result<Self, ApplicationError> {
        let year = present(year)
            .map(|raw| {
                raw.parse::<i32>()
                    .map_err(|_| ApplicationError::invalid(format!("Invalid year: {raw}")))
            })
            .transpose()?;
        let month = present(month)
            .map(|raw| {
                raw.parse::<u32>()
                    .ok()
                    .filter(|m| (1..=12).contains(m))
                    .ok_or_else(|| ApplicationError::invalid(format!("Invalid month: {raw}")))
            })
            .transpose()?;
        Ok(Self { year, month })
    }

    pub fn matches(&self, year: i32, month: u32) -> bool {
        self.year.is_none_or(|y| y == year) && self.month.is_none_or(|m| m == month)
    }
}

#[cfg(test)]
mod log_filter_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_treat_missing_and_empty_values_as_absent() {
        assert_eq!(LogFilter::parse(None, Some(" ")).unwrap(), LogFilter::default());
    }

    #[rstest]
    fn it_should_parse_numeric_filters() {
        assert_eq!(
            LogFilter::parse(Some("2025"), Some("01")).unwrap(),
            LogFilter {
                year: Some(2025),
                month: Some(1)
            }
        );
    }

    #[rstest]
    #[case(Some("twenty"), None)]
    #[case(None, Some("13"))]
    #[case(None, Some("jan"))]
    fn it_should_reject_non_numeric_filters(#[case] year: Option<&str>, #[case] month: Option<&str>) {
        assert!(matches!(
            LogFilter::parse(year, month),
            Err(ApplicationError::InvalidInput(_))
        ));
    }

    #[rstest]
    fn it_should_match_only_constrained_fields() {
        let filter = LogFilter {
            year: Some(2025),
            month: None,
        };
        assert!(filter.matches(2025, 3));
        assert!(!filter.matches(2024, 3));
        assert!(LogFilter::default().matches(1999, 12));
    }
}
