//! Presentation state and view models.
//!
//! # Responsibility
//! - Hold navigation/filter state explicitly in [`AppState`].
//! - Build plain snapshot structs that front-ends render without
//!   touching storage.

pub mod filter;
pub mod format;
pub mod models;
pub mod state;

pub use filter::{filter_and_sort, FilterError, Filters, SortBy};
pub use format::{date_range, format_currency, list_title, revenue_threshold_label};
pub use models::{
    booth_detail_view, booth_list_view, dashboard_view, filter_options_view, mapper_view,
    rep_cards, show_cards, BoothDetailView, BoothListView, BoothRow, DashboardView, EmptyHint,
    FilterOptionsView, MapperView, RevenueOption, ShowCard,
};
pub use state::{AppState, Screen, Tab};
