use tracing::{debug, info, warn};

use crate::errors::{ClientError, Result};
use crate::http::ApiRequest;
use crate::models::auth::AuthResponse;

use super::{SessionManager, SessionState};

/// 刷新访问令牌
///
/// 刷新在锁内串行执行。拿到锁后如果当前令牌已不是被拒绝的那个，
/// 说明其他请求刚完成刷新，直接返回成功。
/// 任何失败（网络、业务码、响应格式）都会清除会话。
pub async fn handle_refresh(session: &SessionManager, rejected: Option<&str>) -> bool {
    let _guard = session.refresh_lock.lock().await;

    let current = session.access_token().await;
    if let Some(rejected) = rejected
        && let Some(current) = current.as_deref()
        && current != rejected
    {
        debug!("Access token already rotated by a concurrent refresh");
        return true;
    }

    let Some(refresh_token) = session.refresh_token().await else {
        debug!("No refresh token available, skipping refresh");
        return false;
    };

    match request_new_tokens(session, &refresh_token).await {
        Ok(auth) => match session.save_tokens(&auth.token_pair()).await {
            Ok(()) => {
                session.set_state(SessionState::LoggedIn);
                info!("Access token refreshed");
                true
            }
            Err(e) => {
                warn!("Failed to persist refreshed tokens: {}", e);
                session.clear_session().await;
                false
            }
        },
        Err(e) => {
            warn!("Token refresh failed, clearing session: {}", e);
            session.clear_session().await;
            false
        }
    }
}

async fn request_new_tokens(session: &SessionManager, refresh_token: &str) -> Result<AuthResponse> {
    let request = ApiRequest::post("/auth/refresh").query("refreshToken", refresh_token);
    let auth: AuthResponse = session.call_public(request).await?;
    if auth.access_token.is_empty() {
        return Err(ClientError::serialization(
            "Malformed response: missing access token",
        ));
    }
    Ok(auth)
}

/// 向服务端确认本地访问令牌有效；本地没有令牌时直接返回 `false`
pub async fn handle_validate_token(session: &SessionManager) -> Result<bool> {
    let Some(token) = session.access_token().await else {
        return Ok(false);
    };

    let request = ApiRequest::get("/auth/validate").query("token", token);
    let valid: Option<bool> = session.call_public(request).await?;
    Ok(valid.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::http::mock::{self, MockBackend, Reply};
    use crate::services::auth::test_support::session_with;
    use crate::store::keys;

    #[tokio::test]
    async fn test_refresh_replaces_both_tokens() {
        let backend = Arc::new(
            MockBackend::new().reply("/auth/refresh", mock::ok(mock::tokens("A2", "R2"))),
        );
        let session = session_with(&backend, Some(("A1", "R1"))).await;

        assert!(session.refresh_access_token().await);
        assert_eq!(session.access_token().await.as_deref(), Some("A2"));
        assert_eq!(session.refresh_token().await.as_deref(), Some("R2"));
        assert_eq!(
            backend.calls()[0].query,
            vec![("refreshToken".to_string(), "R1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_refresh_without_refresh_token_skips_network() {
        let backend = Arc::new(
            MockBackend::new().reply("/auth/refresh", mock::ok(mock::tokens("A2", "R2"))),
        );
        let session = session_with(&backend, None).await;

        assert!(!session.refresh_access_token().await);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_business_failure_forces_logout() {
        let backend = Arc::new(
            MockBackend::new().reply("/auth/refresh", mock::business(401, "Refresh token expired")),
        );
        let session = session_with(&backend, Some(("A1", "R1"))).await;
        session
            .save_profile(&serde_json::from_value(json!({"id": 7, "username": "demo"})).unwrap())
            .await
            .unwrap();
        let mut state = session.subscribe();

        assert!(!session.refresh_access_token().await);
        assert!(!session.is_authenticated().await);
        assert_eq!(session.store().get_string(keys::ACCESS_TOKEN).await, None);
        assert_eq!(session.store().get_string(keys::REFRESH_TOKEN).await, None);
        assert_eq!(session.cached_profile().await, None);
        assert!(state.has_changed().unwrap());
        assert_eq!(*state.borrow_and_update(), SessionState::LoggedOut);
    }

    #[tokio::test]
    async fn test_refresh_network_failure_forces_logout() {
        let backend = Arc::new(MockBackend::new().reply("/auth/refresh", Reply::NetworkDown));
        let session = session_with(&backend, Some(("A1", "R1"))).await;

        assert!(!session.refresh_access_token().await);
        assert!(!session.is_authenticated().await);
        assert_eq!(session.refresh_token().await, None);
    }

    #[tokio::test]
    async fn test_refresh_malformed_response_forces_logout() {
        let backend = Arc::new(
            MockBackend::new().reply("/auth/refresh", mock::ok(json!({"accessToken": ""}))),
        );
        let session = session_with(&backend, Some(("A1", "R1"))).await;

        assert!(!session.refresh_access_token().await);
        assert!(!session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_rotated_token_skips_second_refresh() {
        let backend = Arc::new(
            MockBackend::new().reply("/auth/refresh", mock::ok(mock::tokens("A3", "R3"))),
        );
        let session = session_with(&backend, Some(("A2", "R2"))).await;

        // A1 已被其他请求刷新为 A2
        assert!(session.refresh_after_rejection(Some("A1")).await);
        assert!(backend.calls().is_empty());

        assert!(session.refresh_after_rejection(Some("A2")).await);
        assert_eq!(backend.calls_to("/auth/refresh"), 1);
        assert_eq!(session.access_token().await.as_deref(), Some("A3"));
    }

    #[tokio::test]
    async fn test_validate_token() {
        let backend = Arc::new(MockBackend::new().route("/auth/validate", |request, _| {
            let valid = request.query.iter().any(|(k, v)| k == "token" && v == "A1");
            mock::ok(json!(valid))
        }));

        let session = session_with(&backend, Some(("A1", "R1"))).await;
        assert!(session.validate_token().await.unwrap());

        let stale = session_with(&backend, Some(("OLD", "R1"))).await;
        assert!(!stale.validate_token().await.unwrap());
        // 校验本身不改变会话
        assert!(stale.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_validate_without_token_skips_network() {
        let backend = Arc::new(MockBackend::new());
        let session = session_with(&backend, None).await;

        assert!(!session.validate_token().await.unwrap());
        assert!(backend.calls().is_empty());
    }
}
