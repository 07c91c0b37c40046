//! TUI module: Terminal User Interface using Ratatui.
//!
//! Two screens:
//! - Observation form with bounded numeric inputs and yes/no selectors
//! - Result view with both estimates and a bar chart

mod app;
mod styles;
mod ui;

pub use app::App;
