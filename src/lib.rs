//! Assignment roster: fetches assignments and courses, reconciles them into a
//! denormalized roster, and drives the row actions and delete confirmation.

pub mod api;
pub mod config;
pub mod confirm;
pub mod course;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod notify;
pub mod page;
pub mod placeholder;
pub mod reconcile;
pub mod render;
pub mod schema;
