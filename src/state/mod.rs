//! Application state module

pub mod application;
mod app_state;
pub mod forms;
pub mod steps;
pub mod validation;
pub mod wizard;

pub use app_state::*;
pub use steps::StepStatus;
pub use wizard::{StepOutcome, WizardPhase};
