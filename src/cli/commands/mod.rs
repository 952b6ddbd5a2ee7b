pub mod add;
pub mod completions;
pub mod drop_cmd;
pub mod get;
pub mod init;
pub mod list;
pub mod remove;

#[cfg(feature = "audit-log")]
pub mod audit_cmd;
