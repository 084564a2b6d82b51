pub mod audit;
pub mod auth;
pub mod common;
pub mod menus;
pub mod notes;
pub mod roles;
pub mod users;

pub use common::pagination::PagedList;
pub use common::response::{ApiResponse, SUCCESS_CODE};
