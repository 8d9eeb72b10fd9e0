//! Provider-agnostic prompt dispatch for the quiz assistant.
//!
//! A prompt and a provider id go in; a [`domain::DispatchOutcome`] comes out,
//! whichever text-generation API actually served the call.

pub mod app;
pub mod domain;
pub mod infra;
