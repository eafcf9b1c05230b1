//! Port traits defining external boundaries.
//!
//! The supervision core has a single external collaborator: whatever
//! delivers the alert. Implementations live in `src/adapters/`.

pub mod notifier;

pub use notifier::Notifier;
