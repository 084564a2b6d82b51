use crate::errors::{ClientError, Result};
use crate::http::ApiRequest;
use crate::models::auth::{AuthSession, PhoneLoginRequest, SendSmsCodeRequest};
use crate::utils::validate::{validate_phone, validate_required};

use super::SessionManager;

pub async fn handle_send_sms_code(session: &SessionManager, phone: &str) -> Result<()> {
    validate_phone(phone).map_err(ClientError::validation)?;

    let request = ApiRequest::post("/auth/send-sms-code").json(&SendSmsCodeRequest {
        phone: phone.to_string(),
    })?;
    session.call_public::<()>(request).await?;

    tracing::debug!("SMS code requested for {}", mask_phone(phone));
    Ok(())
}

pub async fn handle_login_by_phone(
    session: &SessionManager,
    phone: &str,
    code: &str,
) -> Result<AuthSession> {
    validate_phone(phone).map_err(ClientError::validation)?;
    validate_required(code, "Please enter verification code").map_err(ClientError::validation)?;

    let request = ApiRequest::post("/auth/login-by-phone").json(&PhoneLoginRequest {
        phone: phone.to_string(),
        code: code.trim().to_string(),
    })?;
    let auth = session.sign_in(request, "Login failed").await?;

    tracing::info!("User {} logged in by phone", mask_phone(phone));
    Ok(auth)
}

// 日志中只保留前三位和后四位
fn mask_phone(phone: &str) -> String {
    if phone.len() == 11 && phone.is_ascii() {
        format!("{}****{}", &phone[..3], &phone[7..])
    } else {
        "***".to_string()
    }
}
