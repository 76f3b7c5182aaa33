//! Reusable UI components

mod button;
mod dialog;

pub use button::{render_button, render_step_button, BUTTON_HEIGHT};
pub use dialog::{notice_text, render_error_dialog};
