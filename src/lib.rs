//! # git-date-rewrite
//!
//! Two small desk-automation CLI tools sharing one crate:
//!
//! - `git-date-rewrite` rewrites the dates of the last N commits via an
//!   interactive rebase, replacing each with a random timestamp drawn from a
//!   chosen range and constrained to waking hours (05:00-23:00).
//! - `no-afk` presses a harmless key at randomized, phase-aligned intervals
//!   so an idle/away timer never fires during a long call.
//!
//! ## Usage
//!
//! ```bash
//! # Rewrite dates; auto-marks every commit for editing
//! git-date-rewrite
//!
//! # Keep your own editor and choose which commits to edit
//! git-date-rewrite --manual
//!
//! # Keep a call from going idle; Ctrl-C to stop
//! no-afk
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface and main entry point for the rebase tool
//! - [`git`] - Git command wrappers
//! - [`timestamps`] - Random waking-hours timestamp generation
//! - [`commands`] - Rebase command-line generation
//! - [`driver`] - Sequential execution of the generated commands
//! - [`prompt`] - User input abstractions
//! - [`sequence_editor`] - Rebase todo file transformation
//! - [`idle`] - Idle-prevention key-press loop
//! - [`banner`] - Decorative CLI banner

pub mod banner;
pub mod cli;
pub mod commands;
pub mod driver;
pub mod git;
pub mod idle;
pub mod prompt;
pub mod sequence_editor;
pub mod timestamps;
