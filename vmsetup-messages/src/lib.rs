//! vmsetup-messages
//!
//! Centralized messaging for the vmsetup CLI.
//! Provides the banner and status templates plus a message builder for
//! filling them in.

pub mod builder;
pub mod macros;
pub mod messages;

pub use messages::MESSAGES;
