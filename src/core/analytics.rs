//! Provides functions for deriving summary figures from dashboard data.
use crate::core::dashboard::{
    BalancePoint, CategoryTotal, DashboardCounts, DashboardData, MonthlyPoint,
};
use crate::core::filter::{self, FilterState};

/// Summary figures shown on the dashboard cards.
#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    pub total_income: f64,
    pub total_expense: f64,
    pub current_balance: f64,
    pub average_savings: f64,
}

/// A fully filtered dashboard, ready for rendering.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub counts: DashboardCounts,
    pub monthly: Vec<MonthlyPoint>,
    pub balance: Vec<BalancePoint>,
    pub categories: Vec<CategoryTotal>,
    pub totals: Totals,
}

/// Computes the summary figures from already-filtered series.
///
/// The average savings spread the net result over the balance points; with
/// one point or none the net result is reported as-is.
pub fn derive_totals(monthly: &[MonthlyPoint], balance: &[BalancePoint]) -> Totals {
    let total_income: f64 = monthly.iter().map(|point| point.income).sum();
    let total_expense: f64 = monthly.iter().map(|point| point.expense).sum();
    let current_balance = balance.last().map_or(0.0, |point| point.balance);

    let net = total_income - total_expense;
    let average_savings = if balance.len() > 1 {
        net / balance.len() as f64
    } else {
        net
    };

    Totals {
        total_income,
        total_expense,
        current_balance,
        average_savings,
    }
}

/// Builds the complete view for the given filters.
///
/// Nothing is cached: every call filters and aggregates the raw data again,
/// which is fine at dashboard sizes (months and categories, not individual
/// transactions).
pub fn build_view(data: &DashboardData, filters: &FilterState) -> DashboardView {
    let monthly = filter::filter_type(
        &filter::filter_period(&data.monthly, filters.period),
        filters.type_filter,
    );
    let balance = filter::filter_period(&data.balance, filters.period);
    let categories = filter::sort_categories(
        &filter::filter_categories(&data.categories, &filters.selected_categories),
        filters.order,
    );
    let totals = derive_totals(&monthly, &balance);

    DashboardView {
        counts: data.counts,
        monthly,
        balance,
        categories,
        totals,
    }
}
