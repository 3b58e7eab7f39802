//! Test support for the comment guesser client.
//!
//! Shared test logging plus a scripted backend served over real HTTP.

pub mod fake_backend;
pub mod logging;

pub use fake_backend::{FakeBackend, RecordedRequest, ScriptedResponse};
