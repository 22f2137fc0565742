//! CLI command implementations

pub mod utils;

pub mod check;
pub mod completions;
pub mod init;
pub mod report;
pub mod tree;
pub mod where_used;
