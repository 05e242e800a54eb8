//! Ladle - terminal browser for paginated recipe search APIs
//!
//! Fetches recipe records from a REST endpoint, renders them in a table with
//! client-driven filtering and pagination, and shows a detail drawer for a
//! selected row.
//!
//! # Example
//!
//! ```no_run
//! use ladle::{ClientConfig, RecipeClient, SearchState, FilterField};
//!
//! fn main() -> ladle::Result<()> {
//!     let client = RecipeClient::new(ClientConfig::default())?;
//!
//!     let mut state = SearchState::default();
//!     state.set_filter(FilterField::Cuisine, "Italian");
//!
//!     let page = client.search(&state)?;
//!     println!("{} recipes total", page.total);
//!     for recipe in &page.data {
//!         println!("{}", recipe.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod model;
pub mod state;
pub mod tui;
pub mod view;

// Re-export main types
pub use client::{ClientConfig, RecipeClient, DEFAULT_BASE_URL};
pub use error::{LadleError, Result};
pub use model::{Recipe, SearchPage};
pub use state::{FilterField, ListPhase, SearchState, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
pub use view::{render_stars, truncate_text, DrawerView, Pagination, RecipeRow};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Format optional minutes as "{n} mins", with "N/A" for absent or zero
/// values (the source data uses 0 and null interchangeably for unknown).
pub fn format_minutes(minutes: Option<u32>) -> String {
    match minutes {
        Some(n) if n > 0 => format!("{} mins", n),
        _ => "N/A".to_string(),
    }
}
