use crate::modules::attendance::core::columns::FIRST_DATA_ROW;
use crate::modules::attendance::core::errors::ApplicationError;
use serde::Deserialize;

/// The admin page sends row indexes either as numbers or as numeric strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RowIndexInput {
    Number(i64),
    Text(String),
}

/// Absolute row number of a data row. The header row cannot be addressed.
pub fn parse_row_index(raw: Option<&RowIndexInput>) -> Result<u32, ApplicationError> {
    let value = match raw {
        None => return Err(ApplicationError::invalid("rowIndex is required")),
        Some(RowIndexInput::Number(n)) => *n,
        Some(RowIndexInput::Text(s)) if s.trim().is_empty() => {
            return Err(ApplicationError::invalid("rowIndex is required"));
        }
        Some(RowIndexInput::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ApplicationError::invalid(format!("Invalid rowIndex: {s}")))?,
    };
    u32::try_from(value)
        .ok()
        .filter(|row| *row >= FIRST_DATA_ROW)
        .ok_or_else(|| ApplicationError::invalid(format!("Invalid rowIndex: {value}")))
}

#[cfg(test)]
mod row_index_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RowIndexInput::Number(5), 5)]
    #[case(RowIndexInput::Text(" 12 ".into()), 12)]
    #[case(RowIndexInput::Number(2), 2)]
    fn it_should_accept_data_rows(#[case] raw: RowIndexInput, #[case] expected: u32) {
        assert_eq!(parse_row_index(Some(&raw)).unwrap(), expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(RowIndexInput::Text("".into())))]
    #[case(Some(RowIndexInput::Text("five".into())))]
    #[case(Some(RowIndexInput::Number(1)))]
    #[case(Some(RowIndexInput::Number(-4)))]
    fn it_should_reject_missing_or_invalid_indexes(#[case] raw: Option<RowIndexInput>) {
        assert!(matches!(
            parse_row_index(raw.as_ref()),
            Err(ApplicationError::InvalidInput(_))
        ));
    }

    #[rstest]
    fn it_should_deserialize_numbers_and_strings() {
        let n: RowIndexInput = serde_json::from_str("7").unwrap();
        let s: RowIndexInput = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(n, RowIndexInput::Number(7));
        assert_eq!(s, RowIndexInput::Text("7".into()));
    }
}
