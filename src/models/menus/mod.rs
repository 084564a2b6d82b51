pub mod entities;
pub mod requests;

pub use entities::MenuItem;
pub use requests::MenuRequest;
