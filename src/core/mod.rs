//! Core business logic abstractions

pub mod analytics;
pub mod config;
pub mod dashboard;
pub mod filter;
pub mod log;
pub mod normalize;
pub mod selection;

// Re-export main types for cleaner imports
pub use dashboard::{DashboardData, DashboardProvider, load_dashboard};
pub use filter::{FilterState, Period, SortOrder, TypeFilter};
pub use selection::CategorySelection;
