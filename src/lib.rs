pub mod config;
pub mod fetcher;
pub mod server;
pub mod window;

pub use config::ServiceConfig;
pub use fetcher::{FetchError, FetchOutcome, FixedFetcher, HttpNumberFetcher, NumberFetcher, NumberSource};
pub use server::{router, run_server, ApiError, AppState};
pub use window::{MergeResult, SlidingWindow, WindowState, WindowStore};
