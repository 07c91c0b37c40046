//! Ports layer: Trait definitions for external collaborators.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and the model artifacts and plotting backend.

mod chart;
mod regression;

pub use chart::{ChartError, ChartRenderer};
pub use regression::{check_schema, ModelError, RegressionModel};
