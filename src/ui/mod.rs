//! Reusable widgets

pub mod card;
pub mod pagination;
pub mod search_bar;
pub mod theme;
