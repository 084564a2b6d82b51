use crate::errors::{ClientError, Result};
use crate::http::ApiRequest;
use crate::models::auth::{AuthSession, LoginRequest};
use crate::utils::validate::validate_required;

use super::SessionManager;

pub async fn handle_login(
    session: &SessionManager,
    login_request: LoginRequest,
) -> Result<AuthSession> {
    // 1. 本地校验，不合法时不发请求
    validate_required(&login_request.username, "Please enter username")
        .map_err(ClientError::validation)?;
    validate_required(&login_request.password, "Please enter password")
        .map_err(ClientError::validation)?;

    // 2. 提交登录，成功后持久化令牌与用户信息
    let request = ApiRequest::post("/auth/login").json(&login_request)?;
    let result = session.sign_in(request, "Login failed").await;

    match &result {
        Ok(_) => tracing::info!("User {} logged in successfully", login_request.username),
        Err(e) => tracing::debug!("Login for {} failed: {}", login_request.username, e),
    }
    result
}
