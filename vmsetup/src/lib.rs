//! vmsetup library.
//!
//! Provisions a development VM in a fixed order: editor plugins, build
//! toolchains, a virtualenv bootstrap and a list of Python interpreters.
//! Steps go through an [`Executor`](vmsetup_core::Executor), so a run can be
//! either executed for real or recorded for inspection.

pub mod cli;
pub mod preflight;
pub mod procedure;
pub mod provisioner;
pub mod repo;

// Re-export key types for testing and external use
pub use procedure::{Flags, Provisioning};
pub use provisioner::{FailedStep, FailurePolicy, Provisioner};
pub use repo::Repo;
