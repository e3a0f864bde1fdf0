//! Pull-refresh components

pub mod loader;
pub mod pull_refresh;

pub use loader::Loader;
pub use pull_refresh::{PullRefresh, PullRefreshProps};
