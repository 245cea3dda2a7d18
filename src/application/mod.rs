//! Application layer: the two landing flows built over the shared redirect
//! composer.
//!
//! `ConfirmationPage` is the payment flow, settled at load time.
//! `AuthHandoff` is the auth flow, driven by `tokio` timers it owns and
//! cancels on teardown.

pub mod composer;
pub mod confirmation;
pub mod sequencer;
