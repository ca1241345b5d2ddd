//! Dashboard data abstractions and core types

use anyhow::Result;
use async_trait::async_trait;

/// Income and expense totals for one month of activity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthlyPoint {
    /// Three-letter month label, e.g. "JAN" or "FEV".
    pub month: String,
    pub income: f64,
    pub expense: f64,
}

/// Running account balance at the end of one month.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BalancePoint {
    pub month: String,
    pub balance: f64,
}

/// Accumulated spend for a single category.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryTotal {
    pub name: String,
    pub total: f64,
}

/// Record counts shown on the dashboard stat cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardCounts {
    pub sheets: u64,
    pub categories: u64,
    pub transactions: u64,
    pub users: u64,
}

/// The complete dashboard dataset, joined from all backend endpoints.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardData {
    pub counts: DashboardCounts,
    pub monthly: Vec<MonthlyPoint>,
    pub balance: Vec<BalancePoint>,
    pub categories: Vec<CategoryTotal>,
}

#[async_trait]
pub trait DashboardProvider: Send + Sync {
    async fn fetch_counts(&self) -> Result<DashboardCounts>;
    async fn fetch_monthly(&self) -> Result<Vec<MonthlyPoint>>;
    async fn fetch_balance(&self) -> Result<Vec<BalancePoint>>;
    async fn fetch_categories(&self) -> Result<Vec<CategoryTotal>>;
}

/// Fetches all four dashboard endpoints concurrently and joins the results.
///
/// The whole load fails on the first endpoint error; there is no partial
/// dashboard. `update_callback` is invoked once per completed endpoint so the
/// caller can report progress.
pub async fn load_dashboard(
    provider: &(dyn DashboardProvider + Send + Sync),
    update_callback: &(dyn Fn()),
) -> Result<DashboardData> {
    let (counts, monthly, balance, categories) = futures::try_join!(
        async {
            let counts = provider.fetch_counts().await;
            update_callback();
            counts
        },
        async {
            let monthly = provider.fetch_monthly().await;
            update_callback();
            monthly
        },
        async {
            let balance = provider.fetch_balance().await;
            update_callback();
            balance
        },
        async {
            let categories = provider.fetch_categories().await;
            update_callback();
            categories
        },
    )?;

    Ok(DashboardData {
        counts,
        monthly,
        balance,
        categories,
    })
}
