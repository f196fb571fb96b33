//! Crawler module for page fetching and checking
//!
//! This module contains the core run logic, including:
//! - HTTP fetching against the site's base URL
//! - The per-URL fetch-and-check pipeline
//! - Sequential and concurrent execution strategies
//! - Cooperative cancellation

mod executor;
mod fetcher;
mod pipeline;
mod shutdown;

pub use executor::{executor_for, Concurrent, Execution, Executor, Sequential};
pub use fetcher::{build_http_client, Fetcher, HttpFetcher};
pub use pipeline::{PageObserver, PageOutcome, PageResult, Pipeline};
pub use shutdown::Shutdown;
