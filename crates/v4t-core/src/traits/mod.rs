//! Core traits shared between the client and its front ends.

mod notifier;

pub use notifier::Notifier;
