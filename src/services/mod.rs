pub mod audit;
pub mod auth;
pub mod menus;
pub mod notes;
pub mod roles;
pub mod users;

pub use audit::AuditLogService;
pub use auth::{SessionManager, SessionState};
pub use menus::MenuService;
pub use notes::NoteService;
pub use roles::RoleService;
pub use users::UserService;
