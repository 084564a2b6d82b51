pub mod entities;
pub mod requests;

pub use entities::{UserProfile, UserRecord, UserStatus};
pub use requests::{CreateUserRequest, UpdatePasswordRequest, UpdateUserRequest};
