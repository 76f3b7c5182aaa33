//! Dialog components for TUI

mod base;
mod error_dialog;

pub use error_dialog::{notice_text, render_error_dialog};
