use crate::errors::{ClientError, Result};
use crate::http::ApiRequest;
use crate::models::auth::{ResetChannel, ResetPasswordRequest, SendEmailCodeRequest};
use crate::utils::validate::{validate_email, validate_password, validate_phone, validate_required};

use super::SessionManager;

pub async fn handle_send_email_code(session: &SessionManager, email: &str) -> Result<()> {
    validate_email(email.trim()).map_err(ClientError::validation)?;

    let request = ApiRequest::post("/auth/send-email-code").json(&SendEmailCodeRequest {
        email: email.trim().to_string(),
    })?;
    session.call_public::<()>(request).await
}

/// 找回密码，不改变当前会话
pub async fn handle_reset_password(
    session: &SessionManager,
    mut reset_request: ResetPasswordRequest,
) -> Result<()> {
    reset_request.account = reset_request.account.trim().to_string();
    match reset_request.channel {
        ResetChannel::Email => validate_email(&reset_request.account),
        ResetChannel::Phone => validate_phone(&reset_request.account),
    }
    .map_err(ClientError::validation)?;
    validate_required(&reset_request.code, "Please enter verification code")
        .map_err(ClientError::validation)?;
    validate_password(&reset_request.new_password).map_err(ClientError::validation)?;

    let request = ApiRequest::post("/auth/reset-password").json(&reset_request)?;
    session.call_public::<()>(request).await?;

    tracing::info!("Password reset via {:?}", reset_request.channel);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::http::mock::{self, MockBackend};
    use crate::services::auth::test_support::session_with;

    fn reset(channel: ResetChannel, account: &str, code: &str, password: &str) -> ResetPasswordRequest {
        ResetPasswordRequest {
            channel,
            account: account.to_string(),
            code: code.to_string(),
            new_password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_send_email_code() {
        let backend = Arc::new(MockBackend::new().reply("/auth/send-email-code", mock::ok_empty()));
        let session = session_with(&backend, None).await;

        session.send_email_code(" demo@example.com ").await.unwrap();
        assert_eq!(
            backend.calls()[0].body,
            Some(json!({"email": "demo@example.com"}))
        );

        assert!(session.send_email_code("demo").await.unwrap_err().is_validation());
        assert_eq!(backend.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_password_by_phone() {
        let backend = Arc::new(MockBackend::new().reply("/auth/reset-password", mock::ok_empty()));
        let session = session_with(&backend, Some(("A1", "R1"))).await;

        session
            .reset_password(reset(ResetChannel::Phone, "13800138000", "123456", "newsecret"))
            .await
            .unwrap();

        assert_eq!(
            backend.calls()[0].body,
            Some(json!({
                "type": "phone",
                "account": "13800138000",
                "code": "123456",
                "newPassword": "newsecret"
            }))
        );
        // 找回密码不影响本地会话
        assert!(session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_reset_password_wrong_code() {
        let backend = Arc::new(MockBackend::new().reply(
            "/auth/reset-password",
            mock::business(400, "Verification code is incorrect or expired"),
        ));
        let session = session_with(&backend, None).await;

        let err = session
            .reset_password(reset(ResetChannel::Email, "demo@example.com", "000000", "newsecret"))
            .await
            .unwrap_err();
        assert!(err.is_business());
        assert_eq!(err.message(), "Verification code is incorrect or expired");
    }

    #[tokio::test]
    async fn test_reset_password_validation() {
        let backend = Arc::new(MockBackend::new());
        let session = session_with(&backend, None).await;

        let cases = [
            (reset(ResetChannel::Email, "13800138000", "1", "newsecret"), "Email format is invalid"),
            (reset(ResetChannel::Phone, "demo@example.com", "1", "newsecret"), "Phone number format is invalid"),
            (reset(ResetChannel::Phone, "13800138000", "", "newsecret"), "Please enter verification code"),
            (reset(ResetChannel::Phone, "13800138000", "1", "123"), "Password must be at least 6 characters long"),
        ];
        for (request, expected) in cases {
            let err = session.reset_password(request).await.unwrap_err();
            assert_eq!(err.message(), expected);
        }
        assert!(backend.calls().is_empty());
    }
}
