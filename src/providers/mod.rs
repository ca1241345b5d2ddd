pub mod sheets_api;
pub mod util;
