pub mod entities;
pub mod requests;

pub use entities::{AuditLog, AuditStatus};
pub use requests::AuditLogQuery;
