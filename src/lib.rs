//! A single-user task tracker backed by one tab-separated flat file.
//!
//! [`store::FileStore`] reads and writes the file, [`list::TaskList`] gives
//! every task a dense integer id, and [`ops`] runs the generic add / query /
//! update operations against them.

pub mod commands;
pub mod config;
pub mod error;
pub mod list;
pub mod logging;
pub mod model;
pub mod ops;
pub mod output;
pub mod store;
pub mod task_id;
