//! Presentation only: every widget reads the memoized view from
//! [`crate::state::AppState`] and never filters on its own.

pub mod cards;
pub mod panels;
pub mod plot;
pub mod table;
