pub mod validate;

pub use validate::{validate_email, validate_password, validate_phone, validate_username};
