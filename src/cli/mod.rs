//! Terminal front-end for the dashboard commands

pub mod categories;
pub mod setup;
pub mod summary;
pub mod ui;
