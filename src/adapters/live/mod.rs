//! Live adapters for real external interactions.

pub mod notifier;
