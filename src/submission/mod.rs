//! Submission of completed applications to the KYC endpoint

mod client;
mod task;
mod traits;

pub use client::from_config;
pub use task::{SingleFlight, TaskOutcome};
pub use traits::{submit_application, SubmissionClient, SubmitError};

#[cfg(test)]
pub use traits::MockSubmissionClient;
