use crate::errors::{ClientError, Result};
use crate::http::ApiRequest;
use crate::models::auth::{AuthSession, RegisterRequest};
use crate::utils::validate::{validate_email, validate_password, validate_phone, validate_username};

use super::SessionManager;

pub async fn handle_register(
    session: &SessionManager,
    mut register_request: RegisterRequest,
) -> Result<AuthSession> {
    register_request.username = register_request.username.trim().to_string();
    register_request.email = register_request.email.trim().to_string();
    // 空手机号按未填写处理
    register_request.phone = register_request
        .phone
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty());

    validate_username(&register_request.username).map_err(ClientError::validation)?;
    validate_password(&register_request.password).map_err(ClientError::validation)?;
    validate_email(&register_request.email).map_err(ClientError::validation)?;
    if let Some(phone) = &register_request.phone {
        validate_phone(phone).map_err(ClientError::validation)?;
    }

    let request = ApiRequest::post("/auth/register").json(&register_request)?;
    let auth = session.sign_in(request, "Registration failed").await?;

    tracing::info!("User {} registered", register_request.username);
    Ok(auth)
}
