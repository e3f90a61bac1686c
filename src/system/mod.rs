//! # System Interaction Layer
//!
//! The boundary between the task logic and the operating system's process machinery.
//!
//! ## Modules
//!
//! - **`executor`**: spawns external programs (or single shell lines), captures their combined
//!   output and turns exit statuses into typed errors. Every task funnels through the
//!   [`executor::CommandRunner`] trait so tests can swap in a fake.
//! - **`shell`**: platform shell selection and quoting for the few commands that need a pipe.

/// Process execution behind the [`executor::CommandRunner`] seam.
pub mod executor;
/// Shell selection and quoting.
pub mod shell;
