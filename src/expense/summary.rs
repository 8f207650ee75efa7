//! Totals and per-category breakdowns of expenses.

use serde::{Deserialize, Serialize};
use time::{
    Date, OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description,
};

use crate::{
    Error,
    expense::{Category, Expense},
};

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: f64,
    /// The share of the overall total, rounded to two decimal places.
    pub percentage: f64,
}

/// The totals of a set of expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The sum of every included expense.
    pub total: f64,
    /// How many expenses were included.
    pub items: usize,
    /// Per-category totals, in order of first appearance.
    pub categories: Vec<CategoryTotal>,
    /// The start bound that was applied, as given by the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// The end bound that was applied, as given by the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// An inclusive range of instants to compare `createdAt` against.
///
/// Either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DateRange {
    pub start: Option<OffsetDateTime>,
    pub end: Option<OffsetDateTime>,
}

impl DateRange {
    /// Whether `at` falls within the range.
    pub fn contains(&self, at: OffsetDateTime) -> bool {
        self.start.is_none_or(|start| at >= start) && self.end.is_none_or(|end| at <= end)
    }
}

/// The bounds a client may ask a summary for.
///
/// Each bound is either a calendar date, e.g. `2025-01-31`, or an RFC 3339
/// date-time. A date-only end bound includes the whole of that day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Edge {
    Start,
    End,
}

impl SummaryParams {
    /// Parse the bounds into a [DateRange].
    ///
    /// Empty strings are treated as absent.
    ///
    /// # Errors
    /// Returns an [Error::Validation] listing every bound that could not be
    /// parsed, or stating that the start is after the end.
    pub fn date_range(&self) -> Result<DateRange, Error> {
        let mut errors = Vec::new();

        let start = parse_bound("startDate", self.start_date.as_deref(), Edge::Start)
            .map_err(|error| errors.push(error))
            .ok()
            .flatten();
        let end = parse_bound("endDate", self.end_date.as_deref(), Edge::End)
            .map_err(|error| errors.push(error))
            .ok()
            .flatten();

        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                errors.push("\"startDate\" must be less than or equal to \"endDate\"".to_owned());
            }
        }

        if errors.is_empty() {
            Ok(DateRange { start, end })
        } else {
            Err(Error::Validation(errors))
        }
    }
}

fn parse_bound(
    field: &str,
    raw: Option<&str>,
    edge: Edge,
) -> Result<Option<OffsetDateTime>, String> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    if let Ok(at) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(Some(at));
    }

    let invalid = || format!("\"{field}\" must be a valid date");
    let date =
        Date::parse(raw, format_description!("[year]-[month]-[day]")).map_err(|_| invalid())?;

    let at = match edge {
        Edge::Start => date.midnight(),
        Edge::End => date
            .with_hms_nano(23, 59, 59, 999_999_999)
            .map_err(|_| invalid())?,
    };

    Ok(Some(at.assume_utc()))
}

/// Summarise the expenses created within `range`.
///
/// Expenses are grouped by category in order of first appearance. A
/// category's percentage is its share of the total rounded half away from
/// zero to two decimal places, or zero if the total is zero.
pub fn summarize(expenses: &[Expense], range: &DateRange) -> Summary {
    let mut categories: Vec<CategoryTotal> = Vec::new();
    let mut items = 0;

    for expense in expenses
        .iter()
        .filter(|expense| range.contains(expense.created_at))
    {
        items += 1;

        match categories
            .iter_mut()
            .find(|total| total.category == expense.category)
        {
            Some(total) => total.amount += expense.amount,
            None => categories.push(CategoryTotal {
                category: expense.category,
                amount: expense.amount,
                percentage: 0.0,
            }),
        }
    }

    let total = categories
        .iter()
        .fold(0.0, |total, category| total + category.amount);

    for category in categories.iter_mut() {
        category.percentage = percentage_of(category.amount, total);
    }

    Summary {
        total,
        items,
        categories,
        start_date: None,
        end_date: None,
    }
}

fn percentage_of(amount: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }

    round_to_two_places(amount / total * 100.0)
}

/// Round half away from zero to two decimal places.
fn round_to_two_places(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use time::{OffsetDateTime, macros::datetime};

    use crate::{
        Error,
        expense::{Category, Description, Expense},
    };

    use super::{CategoryTotal, DateRange, Summary, SummaryParams, round_to_two_places, summarize};

    fn expense(amount: f64, category: Category, created_at: OffsetDateTime) -> Expense {
        Expense {
            id: format!("{category}-{amount}"),
            description: Description::new_unchecked("Test expense"),
            amount,
            category,
            created_at,
            updated_at: created_at,
        }
    }

    fn params(start_date: Option<&str>, end_date: Option<&str>) -> SummaryParams {
        SummaryParams {
            start_date: start_date.map(str::to_owned),
            end_date: end_date.map(str::to_owned),
        }
    }

    #[test]
    fn summarizes_by_category() {
        let at = datetime!(2025-01-10 12:00 UTC);
        let expenses = vec![
            expense(100.0, Category::Food, at),
            expense(300.0, Category::Transport, at),
        ];

        let summary = summarize(&expenses, &DateRange::default());

        assert_eq!(
            summary,
            Summary {
                total: 400.0,
                items: 2,
                categories: vec![
                    CategoryTotal {
                        category: Category::Food,
                        amount: 100.0,
                        percentage: 25.0,
                    },
                    CategoryTotal {
                        category: Category::Transport,
                        amount: 300.0,
                        percentage: 75.0,
                    },
                ],
                start_date: None,
                end_date: None,
            }
        );
    }

    #[test]
    fn categories_keep_order_of_first_appearance() {
        let at = datetime!(2025-01-10 12:00 UTC);
        let expenses = vec![
            expense(5.0, Category::Utilities, at),
            expense(1.0, Category::Food, at),
            expense(2.0, Category::Utilities, at),
            expense(3.0, Category::Other, at),
        ];

        let summary = summarize(&expenses, &DateRange::default());

        let order: Vec<Category> = summary.categories.iter().map(|c| c.category).collect();
        assert_eq!(
            order,
            vec![Category::Utilities, Category::Food, Category::Other]
        );
        assert_eq!(summary.categories[0].amount, 7.0);
        assert_eq!(summary.items, 4);
    }

    #[test]
    fn empty_input_has_zero_total() {
        let summary = summarize(&[], &DateRange::default());

        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.items, 0);
        assert!(summary.categories.is_empty());
    }

    #[test]
    fn zero_total_gives_zero_percentages() {
        let at = datetime!(2025-01-10 12:00 UTC);
        // Amounts are always positive when validated, but the table may hold
        // anything written by other clients.
        let expenses = vec![
            expense(0.0, Category::Food, at),
            expense(0.0, Category::Other, at),
        ];

        let summary = summarize(&expenses, &DateRange::default());

        assert_eq!(summary.total, 0.0);
        for category in summary.categories {
            assert_eq!(category.percentage, 0.0);
        }
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let at = datetime!(2025-01-10 12:00 UTC);
        let expenses = vec![
            expense(10.0, Category::Food, at),
            expense(10.0, Category::Transport, at),
            expense(10.0, Category::Entertainment, at),
        ];

        let summary = summarize(&expenses, &DateRange::default());

        let sum: f64 = summary.categories.iter().map(|c| c.percentage).sum();
        assert_eq!(summary.categories[0].percentage, 33.33);
        assert!((sum - 100.0).abs() <= 0.01 * summary.categories.len() as f64);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_to_two_places(12.345_000_1), 12.35);
        assert_eq!(round_to_two_places(0.125), 0.13);
        assert_eq!(round_to_two_places(-0.125), -0.13);
        assert_eq!(round_to_two_places(66.666_666), 66.67);
    }

    #[test]
    fn filters_by_inclusive_date_range() {
        let expenses = vec![
            expense(1.0, Category::Food, datetime!(2024-12-31 23:59:59 UTC)),
            expense(2.0, Category::Food, datetime!(2025-01-01 00:00 UTC)),
            expense(4.0, Category::Food, datetime!(2025-01-31 23:00 UTC)),
            expense(8.0, Category::Food, datetime!(2025-02-01 00:00 UTC)),
        ];
        let range = params(Some("2025-01-01"), Some("2025-01-31"))
            .date_range()
            .unwrap();

        let summary = summarize(&expenses, &range);

        assert_eq!(summary.items, 2);
        assert_eq!(summary.total, 6.0);
    }

    #[test]
    fn open_ended_ranges() {
        let expenses = vec![
            expense(1.0, Category::Food, datetime!(2024-06-01 00:00 UTC)),
            expense(2.0, Category::Food, datetime!(2025-06-01 00:00 UTC)),
        ];

        let from = params(Some("2025-01-01"), None).date_range().unwrap();
        let until = params(None, Some("2025-01-01T00:00:00Z")).date_range().unwrap();

        assert_eq!(summarize(&expenses, &from).total, 2.0);
        assert_eq!(summarize(&expenses, &until).total, 1.0);
    }

    #[test]
    fn rfc3339_bounds_are_exact() {
        let range = params(Some("2025-01-01T10:00:00+02:00"), None)
            .date_range()
            .unwrap();

        assert_eq!(range.start, Some(datetime!(2025-01-01 08:00 UTC)));
        assert_eq!(range.end, None);
    }

    #[test]
    fn empty_params_are_unbounded() {
        assert_eq!(SummaryParams::default().date_range(), Ok(DateRange::default()));
        assert_eq!(
            params(Some(""), Some(" ")).date_range(),
            Ok(DateRange::default())
        );
    }

    #[test]
    fn invalid_bounds_are_all_reported() {
        let result = params(Some("yesterday"), Some("2025-13-01")).date_range();

        assert_eq!(
            result,
            Err(Error::Validation(vec![
                "\"startDate\" must be a valid date".to_owned(),
                "\"endDate\" must be a valid date".to_owned(),
            ]))
        );
    }

    #[test]
    fn start_after_end_is_rejected() {
        let result = params(Some("2025-02-01"), Some("2025-01-01")).date_range();

        assert_eq!(
            result,
            Err(Error::Validation(vec![
                "\"startDate\" must be less than or equal to \"endDate\"".to_owned()
            ]))
        );
    }

    #[test]
    fn same_day_range_is_allowed() {
        let range = params(Some("2025-01-01"), Some("2025-01-01"))
            .date_range()
            .unwrap();

        assert!(range.contains(datetime!(2025-01-01 18:30 UTC)));
        assert!(!range.contains(datetime!(2025-01-02 00:00 UTC)));
    }
}
