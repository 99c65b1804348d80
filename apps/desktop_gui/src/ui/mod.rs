//! UI layer for desktop GUI.

pub mod app;

pub use app::TechStockApp;
