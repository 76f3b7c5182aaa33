//! Form views

mod field_renderer;
mod registration;
mod step_form;

pub use registration::draw_registration;
pub use step_form::draw_step_form;
