use super::UserService;
use crate::errors::Result;
use crate::models::users::UserRecord;

pub async fn list_users(service: &UserService) -> Result<Vec<UserRecord>> {
    let users: Option<Vec<UserRecord>> = service.client().get("/users").await?;
    Ok(users.unwrap_or_default())
}
