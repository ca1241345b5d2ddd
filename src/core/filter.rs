//! Filters and orderings applied to dashboard series.

use crate::core::dashboard::{BalancePoint, CategoryTotal, MonthlyPoint};
use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

/// Time window over the monthly series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    ThreeMonths,
    SixMonths,
    CurrentYear,
    PreviousYear,
    #[default]
    All,
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Period::ThreeMonths => "3m",
                Period::SixMonths => "6m",
                Period::CurrentYear => "year",
                Period::PreviousYear => "lastyear",
                Period::All => "all",
            }
        )
    }
}

impl FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "3m" => Ok(Period::ThreeMonths),
            "6m" => Ok(Period::SixMonths),
            "year" => Ok(Period::CurrentYear),
            "lastyear" => Ok(Period::PreviousYear),
            "all" => Ok(Period::All),
            _ => Err(anyhow::anyhow!("Invalid period: {}", s)),
        }
    }
}

/// Which monthly series to keep when charting income against expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl Display for TypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TypeFilter::All => "all",
                TypeFilter::Income => "income",
                TypeFilter::Expense => "expense",
            }
        )
    }
}

impl FromStr for TypeFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "income" => Ok(TypeFilter::Income),
            "expense" => Ok(TypeFilter::Expense),
            _ => Err(anyhow::anyhow!("Invalid type filter: {}", s)),
        }
    }
}

/// Ordering applied to the category ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    None,
    HighestFirst,
    LowestFirst,
    NameAsc,
    NameDesc,
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortOrder::None => "none",
                SortOrder::HighestFirst => "high",
                SortOrder::LowestFirst => "low",
                SortOrder::NameAsc => "az",
                SortOrder::NameDesc => "za",
            }
        )
    }
}

impl FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(SortOrder::None),
            "high" => Ok(SortOrder::HighestFirst),
            "low" => Ok(SortOrder::LowestFirst),
            "az" => Ok(SortOrder::NameAsc),
            "za" => Ok(SortOrder::NameDesc),
            _ => Err(anyhow::anyhow!("Invalid sort order: {}", s)),
        }
    }
}

/// The full set of filters a dashboard view is built from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    pub period: Period,
    pub type_filter: TypeFilter,
    pub order: SortOrder,
    /// Category names to keep; empty means no category filter.
    pub selected_categories: BTreeSet<String>,
}

/// A series point that carries a month label. Both the monthly and the
/// balance series filter by period through this.
pub trait MonthLabeled {
    fn month(&self) -> &str;
}

impl MonthLabeled for MonthlyPoint {
    fn month(&self) -> &str {
        &self.month
    }
}

impl MonthLabeled for BalancePoint {
    fn month(&self) -> &str {
        &self.month
    }
}

/// Restricts a series to the requested time window without reordering it.
///
/// The trailing windows take the last N points of the series as received.
/// The year windows rebuild a date from each label and the target year and
/// keep the points whose rebuilt date chrono can parse into that year, so
/// labels outside chrono's English month set always drop out.
pub fn filter_period<T: MonthLabeled + Clone>(series: &[T], period: Period) -> Vec<T> {
    match period {
        Period::All => series.to_vec(),
        Period::ThreeMonths => trailing(series, 3),
        Period::SixMonths => trailing(series, 6),
        Period::CurrentYear => year_window(series, Local::now().year()),
        Period::PreviousYear => year_window(series, Local::now().year() - 1),
    }
}

fn trailing<T: Clone>(series: &[T], count: usize) -> Vec<T> {
    series[series.len().saturating_sub(count)..].to_vec()
}

fn year_window<T: MonthLabeled + Clone>(series: &[T], target_year: i32) -> Vec<T> {
    series
        .iter()
        .filter(|point| {
            reconstruct_date(point.month(), target_year)
                .is_some_and(|date| date.year() == target_year)
        })
        .cloned()
        .collect()
}

fn reconstruct_date(label: &str, year: i32) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{label} 1, {year}"), "%b %d, %Y").ok()
}

/// Zeroes out the series the filter excludes. Points are kept in place so
/// the chart axis stays stable when switching between types.
pub fn filter_type(series: &[MonthlyPoint], type_filter: TypeFilter) -> Vec<MonthlyPoint> {
    series
        .iter()
        .map(|point| {
            let mut point = point.clone();
            match type_filter {
                TypeFilter::All => {}
                TypeFilter::Income => point.expense = 0.0,
                TypeFilter::Expense => point.income = 0.0,
            }
            point
        })
        .collect()
}

/// Keeps only the categories whose name is in `selected`. An empty
/// selection keeps everything.
pub fn filter_categories(
    categories: &[CategoryTotal],
    selected: &BTreeSet<String>,
) -> Vec<CategoryTotal> {
    if selected.is_empty() {
        return categories.to_vec();
    }
    categories
        .iter()
        .filter(|category| selected.contains(&category.name))
        .cloned()
        .collect()
}

/// Returns the categories in the requested order. `SortOrder::None` keeps
/// the backend order. All sorts are stable, so equal entries keep their
/// relative positions.
pub fn sort_categories(categories: &[CategoryTotal], order: SortOrder) -> Vec<CategoryTotal> {
    let mut sorted = categories.to_vec();
    match order {
        SortOrder::None => {}
        SortOrder::HighestFirst => sorted.sort_by(|a, b| compare_totals(&b.total, &a.total)),
        SortOrder::LowestFirst => sorted.sort_by(|a, b| compare_totals(&a.total, &b.total)),
        SortOrder::NameAsc => sorted.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortOrder::NameDesc => sorted.sort_by(|a, b| compare_names(&b.name, &a.name)),
    }
    sorted
}

fn compare_totals(a: &f64, b: &f64) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn monthly(month: &str, income: f64, expense: f64) -> MonthlyPoint {
        MonthlyPoint {
            month: month.to_string(),
            income,
            expense,
        }
    }

    fn category(name: &str, total: f64) -> CategoryTotal {
        CategoryTotal {
            name: name.to_string(),
            total,
        }
    }

    fn months(series: &[MonthlyPoint]) -> Vec<&str> {
        series.iter().map(|point| point.month.as_str()).collect()
    }

    fn names(categories: &[CategoryTotal]) -> Vec<&str> {
        categories
            .iter()
            .map(|category| category.name.as_str())
            .collect()
    }

    #[test]
    fn test_period_round_trips_through_strings() {
        for token in ["3m", "6m", "year", "lastyear", "all"] {
            let period: Period = token.parse().unwrap();
            assert_eq!(period.to_string(), token);
        }
        assert!("2w".parse::<Period>().is_err());
    }

    #[test]
    fn test_type_filter_and_sort_order_round_trip() {
        for token in ["all", "income", "expense"] {
            let filter: TypeFilter = token.parse().unwrap();
            assert_eq!(filter.to_string(), token);
        }
        for token in ["none", "high", "low", "az", "za"] {
            let order: SortOrder = token.parse().unwrap();
            assert_eq!(order.to_string(), token);
        }
        assert!("up".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_parsing_is_case_insensitive() {
        assert_eq!("LASTYEAR".parse::<Period>().unwrap(), Period::PreviousYear);
        assert_eq!("Income".parse::<TypeFilter>().unwrap(), TypeFilter::Income);
        assert_eq!("AZ".parse::<SortOrder>().unwrap(), SortOrder::NameAsc);
    }

    #[test]
    fn test_trailing_window_keeps_last_points_in_order() {
        let series = vec![
            monthly("JAN", 1.0, 0.0),
            monthly("FEV", 2.0, 0.0),
            monthly("MAR", 3.0, 0.0),
            monthly("ABR", 4.0, 0.0),
        ];

        let windowed = filter_period(&series, Period::ThreeMonths);

        assert_eq!(months(&windowed), vec!["FEV", "MAR", "ABR"]);
    }

    #[test]
    fn test_trailing_window_longer_than_series_keeps_everything() {
        let series = vec![monthly("JAN", 1.0, 0.0), monthly("FEV", 2.0, 0.0)];

        let windowed = filter_period(&series, Period::SixMonths);

        assert_eq!(windowed, series);
    }

    #[test]
    fn test_all_period_is_identity() {
        let series = vec![monthly("JAN", 1.0, 2.0), monthly("", 3.0, 4.0)];

        assert_eq!(filter_period(&series, Period::All), series);
    }

    #[test]
    fn test_year_window_drops_labels_chrono_cannot_read() {
        // JAN and MAR double as English abbreviations; FEV and ABR do not.
        let series = vec![
            monthly("JAN", 1.0, 0.0),
            monthly("FEV", 2.0, 0.0),
            monthly("MAR", 3.0, 0.0),
            monthly("ABR", 4.0, 0.0),
        ];

        let windowed = filter_period(&series, Period::CurrentYear);

        assert_eq!(months(&windowed), vec!["JAN", "MAR"]);
    }

    #[test]
    fn test_previous_year_window_behaves_like_current_year() {
        let series = vec![monthly("JAN", 1.0, 0.0), monthly("DEZ", 2.0, 0.0)];

        let windowed = filter_period(&series, Period::PreviousYear);

        assert_eq!(months(&windowed), vec!["JAN"]);
    }

    #[test]
    fn test_reconstructed_dates_land_in_the_target_year() {
        let year = Local::now().year();

        let date = reconstruct_date("JAN", year).unwrap();

        assert_eq!(date.year(), year);
        assert_eq!(date.month(), 1);
        assert!(reconstruct_date("FEV", year).is_none());
    }

    #[test]
    fn test_income_filter_zeroes_expense_and_keeps_shape() {
        let series = vec![monthly("JAN", 100.0, 40.0), monthly("FEV", 50.0, 20.0)];

        let filtered = filter_type(&series, TypeFilter::Income);

        assert_eq!(months(&filtered), vec!["JAN", "FEV"]);
        assert_eq!(filtered[0].income, 100.0);
        assert_eq!(filtered[0].expense, 0.0);
        assert_eq!(filtered[1].expense, 0.0);
    }

    #[test]
    fn test_expense_filter_zeroes_income() {
        let series = vec![monthly("JAN", 100.0, 40.0)];

        let filtered = filter_type(&series, TypeFilter::Expense);

        assert_eq!(filtered[0].income, 0.0);
        assert_eq!(filtered[0].expense, 40.0);
    }

    #[test]
    fn test_all_type_filter_is_identity() {
        let series = vec![monthly("JAN", 100.0, 40.0)];

        assert_eq!(filter_type(&series, TypeFilter::All), series);
    }

    #[test]
    fn test_empty_selection_keeps_all_categories() {
        let categories = vec![category("Mercado", 10.0), category("Lazer", 5.0)];

        let filtered = filter_categories(&categories, &BTreeSet::new());

        assert_eq!(filtered, categories);
    }

    #[test]
    fn test_filtering_an_empty_list_stays_empty() {
        let selected: BTreeSet<String> = ["Mercado".to_string()].into_iter().collect();

        assert!(filter_categories(&[], &selected).is_empty());
        assert!(filter_categories(&[], &BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_selection_keeps_only_named_categories_in_order() {
        let categories = vec![
            category("Mercado", 10.0),
            category("Lazer", 5.0),
            category("Transporte", 8.0),
        ];
        let selected: BTreeSet<String> = ["Transporte", "Mercado"]
            .iter()
            .map(|name| name.to_string())
            .collect();

        let filtered = filter_categories(&categories, &selected);

        assert_eq!(names(&filtered), vec!["Mercado", "Transporte"]);
    }

    #[test]
    fn test_selection_of_unknown_names_yields_empty() {
        let categories = vec![category("Mercado", 10.0)];
        let selected: BTreeSet<String> = ["Inexistente".to_string()].into_iter().collect();

        assert!(filter_categories(&categories, &selected).is_empty());
    }

    #[test]
    fn test_sort_highest_first() {
        let categories = vec![category("Food", 300.0), category("Rent", 1200.0)];

        let sorted = sort_categories(&categories, SortOrder::HighestFirst);

        assert_eq!(names(&sorted), vec!["Rent", "Food"]);
    }

    #[test]
    fn test_sort_lowest_first() {
        let categories = vec![category("Rent", 1200.0), category("Food", 300.0)];

        let sorted = sort_categories(&categories, SortOrder::LowestFirst);

        assert_eq!(names(&sorted), vec!["Food", "Rent"]);
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let categories = vec![
            category("banana", 1.0),
            category("Apple", 2.0),
            category("cherry", 3.0),
        ];

        let ascending = sort_categories(&categories, SortOrder::NameAsc);
        let descending = sort_categories(&categories, SortOrder::NameDesc);

        assert_eq!(names(&ascending), vec!["Apple", "banana", "cherry"]);
        assert_eq!(names(&descending), vec!["cherry", "banana", "Apple"]);
    }

    #[test]
    fn test_sort_none_keeps_backend_order() {
        let categories = vec![category("Rent", 1200.0), category("Food", 300.0)];

        assert_eq!(sort_categories(&categories, SortOrder::None), categories);
    }

    #[test]
    fn test_equal_totals_keep_their_relative_order() {
        let categories = vec![
            category("A", 10.0),
            category("B", 10.0),
            category("C", 5.0),
        ];

        let sorted = sort_categories(&categories, SortOrder::HighestFirst);

        assert_eq!(names(&sorted), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_sorting_never_drops_or_duplicates_entries() {
        let categories = vec![
            category("Mercado", 10.0),
            category("Lazer", 5.0),
            category("Transporte", 8.0),
        ];

        for order in [
            SortOrder::None,
            SortOrder::HighestFirst,
            SortOrder::LowestFirst,
            SortOrder::NameAsc,
            SortOrder::NameDesc,
        ] {
            let sorted = sort_categories(&categories, order);
            let mut names_sorted = names(&sorted);
            names_sorted.sort_unstable();
            assert_eq!(names_sorted, vec!["Lazer", "Mercado", "Transporte"]);
        }
    }
}
