// Yearly totals over the cleaned table.
//
// Responsibilities
// - Keep rows of one year, sum worked hours per month and per user.
// - Count one day per cleaned row.

use crate::modules::attendance::core::columns::{CleanColumn, SheetLayout, cell};
use crate::modules::attendance::core::errors::ApplicationError;
use crate::modules::attendance::core::time_format::parse_worked_hours;
use crate::shared::infrastructure::sheets::SheetStore;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    pub month: u32,
    pub hours: f64,
    pub days: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserTotal {
    pub user: String,
    pub hours: f64,
    pub days: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub year: i32,
    pub total_hours: f64,
    pub months: Vec<MonthTotal>,
    pub users: Vec<UserTotal>,
}

fn round2(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// A missing or blank year means `current_year`; anything else must be numeric.
pub fn parse_year(raw: Option<&str>, current_year: i32) -> Result<i32, ApplicationError> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(current_year),
        Some(value) => value
            .parse::<i32>()
            .map_err(|_| ApplicationError::invalid(format!("Invalid year: {value}"))),
    }
}

/// Rows with an unreadable month still count toward the yearly and per-user totals.
pub fn aggregate(rows: &[Vec<String>], year: i32) -> Dashboard {
    let mut months: Vec<(f64, usize)> = vec![(0.0, 0); 12];
    let mut users: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    let mut total = 0.0;

    for row in rows {
        if cell(row, CleanColumn::Year).trim().parse::<i32>().ok() != Some(year) {
            continue;
        }
        let hours = parse_worked_hours(cell(row, CleanColumn::WorkedHours)).unwrap_or(0.0);
        total += hours;

        let month = cell(row, CleanColumn::Month)
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|m| (1..=12).contains(m));
        if let Some(month) = month {
            let slot = &mut months[month - 1];
            slot.0 += hours;
            slot.1 += 1;
        }

        let user = users
            .entry(cell(row, CleanColumn::User).trim().to_string())
            .or_insert((0.0, 0));
        user.0 += hours;
        user.1 += 1;
    }

    Dashboard {
        year,
        total_hours: round2(total),
        months: months
            .into_iter()
            .enumerate()
            .map(|(i, (hours, days))| MonthTotal {
                month: i as u32 + 1,
                hours: round2(hours),
                days,
            })
            .collect(),
        users: users
            .into_iter()
            .map(|(user, (hours, days))| UserTotal {
                user,
                hours: round2(hours),
                days,
            })
            .collect(),
    }
}

pub struct DashboardHandler {
    store: Arc<dyn SheetStore>,
    layout: SheetLayout,
}

impl DashboardHandler {
    pub fn new(store: Arc<dyn SheetStore>, layout: SheetLayout) -> Self {
        Self { store, layout }
    }

    pub async fn handle(&self, year: i32) -> Result<Dashboard, ApplicationError> {
        let rows = self.store.read(&self.layout.clean_data_range()).await?;
        Ok(aggregate(&rows, year))
    }
}

#[cfg(test)]
mod dashboard_handler_tests {
    use super::*;
    use crate::tests::fixtures::{clean_store, layout};
    use rstest::{fixture, rstest};

    #[fixture]
    fn rows() -> Vec<Vec<String>> {
        vec![
            vec!["Bob", "10/01/2025", "2025", "1", "08:00", "16:30", "8.5"],
            vec!["Alice", "10/01/2025", "2025", "1", "08:00", "17:00", "9:00"],
            vec!["Alice", "11/01/2025", "2025", "1", "08:00", "15:20", "7,333"],
            vec!["Alice", "03/02/2025", "2025", "2", "08:00", "", "oops"],
            vec!["Carol", "10/01/2024", "2024", "1", "08:00", "12:00", "4"],
        ]
        .into_iter()
        .map(|row| row.into_iter().map(str::to_string).collect())
        .collect()
    }

    #[rstest]
    fn it_should_sum_hours_per_month_and_user(rows: Vec<Vec<String>>) {
        let dashboard = aggregate(&rows, 2025);

        assert_eq!(dashboard.year, 2025);
        assert_eq!(dashboard.total_hours, 24.83);
        assert_eq!(dashboard.months.len(), 12);
        assert_eq!(
            dashboard.months[0],
            MonthTotal {
                month: 1,
                hours: 24.83,
                days: 3
            }
        );
        assert_eq!(
            dashboard.months[1],
            MonthTotal {
                month: 2,
                hours: 0.0,
                days: 1
            }
        );
        assert_eq!(
            dashboard.users,
            vec![
                UserTotal {
                    user: "Alice".into(),
                    hours: 16.33,
                    days: 3
                },
                UserTotal {
                    user: "Bob".into(),
                    hours: 8.5,
                    days: 1
                },
            ]
        );
    }

    #[rstest]
    fn it_should_return_empty_months_for_a_year_without_data(rows: Vec<Vec<String>>) {
        let dashboard = aggregate(&rows, 2030);
        assert_eq!(dashboard.total_hours, 0.0);
        assert!(dashboard.months.iter().all(|m| m.days == 0));
        assert!(dashboard.users.is_empty());
    }

    #[rstest]
    #[case(None, 2025)]
    #[case(Some(" "), 2025)]
    #[case(Some("2024"), 2024)]
    fn it_should_parse_the_year(#[case] raw: Option<&str>, #[case] expected: i32) {
        assert_eq!(parse_year(raw, 2025).unwrap(), expected);
    }

    #[rstest]
    fn it_should_reject_a_non_numeric_year() {
        assert!(matches!(
            parse_year(Some("last"), 2025),
            Err(ApplicationError::InvalidInput(_))
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_read_the_clean_table() {
        let store = Arc::new(clean_store(vec![vec![
            "Alice", "10/01/2025", "2025", "1", "08:00", "17:00", "9",
        ]]));
        let dashboard = DashboardHandler::new(store, layout())
            .handle(2025)
            .await
            .expect("handle failed");
        assert_eq!(dashboard.total_hours, 9.0);
    }
}
