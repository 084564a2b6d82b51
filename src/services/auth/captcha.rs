use crate::errors::Result;
use crate::http::ApiRequest;
use crate::models::auth::CaptchaImage;

use super::SessionManager;

pub async fn handle_captcha_image(session: &SessionManager) -> Result<CaptchaImage> {
    session.call_public(ApiRequest::get("/captcha/image")).await
}

/// 该用户名登录失败次数过多时，服务端会要求图形验证码
pub async fn handle_captcha_required(session: &SessionManager, username: &str) -> Result<bool> {
    if username.trim().is_empty() {
        return Ok(false);
    }
    let request = ApiRequest::get("/captcha/required").query("username", username.trim());
    session.call_public(request).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::http::mock::{self, MockBackend};
    use crate::services::auth::test_support::session_with;

    #[tokio::test]
    async fn test_captcha_image() {
        let backend = Arc::new(MockBackend::new().reply(
            "/captcha/image",
            mock::ok(json!({"captchaKey": "k1", "image": "data:image/png;base64,AAAA"})),
        ));
        let session = session_with(&backend, Some(("A1", "R1"))).await;

        let captcha = session.captcha_image().await.unwrap();
        assert_eq!(captcha.captcha_key, "k1");
        assert!(captcha.image.starts_with("data:image/png"));
        // 公开接口不携带令牌
        assert_eq!(backend.calls()[0].bearer, None);
    }

    #[tokio::test]
    async fn test_captcha_required() {
        let backend = Arc::new(MockBackend::new().route("/captcha/required", |request, _| {
            let locked = request.query.iter().any(|(_, v)| v == "locked_user");
            mock::ok(json!(locked))
        }));
        let session = session_with(&backend, None).await;

        assert!(session.captcha_required("locked_user").await.unwrap());
        assert!(!session.captcha_required("demo").await.unwrap());
        assert!(!session.captcha_required("").await.unwrap());
        assert_eq!(backend.calls().len(), 2);
    }
}
