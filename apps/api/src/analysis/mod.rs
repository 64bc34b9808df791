//! Analysis Orchestrators — one per feature. Each assembles a prompt, drives
//! the model caller, normalizes the response against the feature's schema,
//! and applies score blending where the feature defines a score field.

pub mod charts;
pub mod github;
pub mod handlers;
pub mod linkedin;
pub mod prompts;
pub mod resume;
