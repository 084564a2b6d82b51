pub mod entities;
pub mod requests;

pub use entities::Role;
pub use requests::RoleRequest;
