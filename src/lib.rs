//! Launch records dashboard core.
//!
//! Loads a table of launch records once (falling back to a built-in table
//! when the file is unusable) and answers two read-only queries over it:
//! the success distribution for a site selection, and the records inside a
//! payload range for plotting.

pub mod color;
pub mod config;
pub mod data;
pub mod state;
