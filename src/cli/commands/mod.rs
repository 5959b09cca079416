//! CLI command implementations

pub mod init;
pub mod summary;
pub mod validate;
pub mod watch;
