//! Certmon Dashboard - view layer
//!
//! Wire types for the certificate monitor backend, the view models built
//! from them, table controllers and page rendering. Nothing here performs I/O.

pub mod api;
pub mod app;
pub mod components;
pub mod html;
pub mod table;
pub mod validity;

pub use app::{App, Tab, TablePanel};
pub use validity::Validity;
