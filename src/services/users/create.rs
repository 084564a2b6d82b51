use tracing::info;

use super::UserService;
use crate::errors::{ClientError, Result};
use crate::models::users::CreateUserRequest;
use crate::utils::validate::{validate_email, validate_password, validate_phone, validate_username};

pub async fn create_user(service: &UserService, mut user_data: CreateUserRequest) -> Result<()> {
    user_data.username = user_data.username.trim().to_string();
    user_data.email = user_data.email.trim().to_string();
    user_data.phone = user_data
        .phone
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    validate_username(&user_data.username).map_err(ClientError::validation)?;
    validate_password(&user_data.password).map_err(ClientError::validation)?;
    validate_email(&user_data.email).map_err(ClientError::validation)?;
    if let Some(phone) = &user_data.phone {
        validate_phone(phone).map_err(ClientError::validation)?;
    }

    service
        .client()
        .post::<Option<serde_json::Value>, _>("/users", &user_data)
        .await?;

    info!("User {} created", user_data.username);
    Ok(())
}
