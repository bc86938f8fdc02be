//! Adapters for the verification authority.
//!
//! `verify` defines the service seam the pipeline consumes; `verify_http`
//! is the production transport; `verify_mock` is a scripted in-process
//! stand-in for tests.

pub mod verify;
pub mod verify_http;
pub mod verify_mock;

pub use verify::{GuessEntry, GuessRecord, ResolvedAnswer, VerificationService};
pub use verify_http::HttpVerificationService;
pub use verify_mock::ScriptedVerification;
