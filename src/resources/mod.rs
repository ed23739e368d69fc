//! Resource groups and end-of-run cleanup.

pub mod cleanup;
pub mod groups;

pub use cleanup::{Cleanup, CleanupOutcome};
pub use groups::{GroupsClient, ResourceGroup};
