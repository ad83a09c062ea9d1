//! Per-page view state, independent of rendering

pub mod detail;
pub mod home;
pub mod listing;

pub use detail::{DetailState, DetailView};
pub use home::HomeView;
pub use listing::{FetchRequest, ListingKind, ListingState, ListingView};
