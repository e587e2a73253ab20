//! src/panels.rs
//!
//! Top-level panels module and re-exports.

pub mod chart;
pub mod menu;
pub mod status;
pub mod title;

pub use chart::ChartPanel;
pub use menu::MenuPanel;
pub use status::StatusPanel;
pub use title::TitlePanel;
