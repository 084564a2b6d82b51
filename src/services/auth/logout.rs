use tracing::{info, warn};

use crate::http::ApiRequest;

use super::SessionManager;

/// 处理用户登出
///
/// 有令牌时先尽力通知服务端（失败或超时只记录日志），
/// 之后无条件清除本地令牌与用户信息。
pub async fn handle_logout(session: &SessionManager) {
    if let Some(token) = session.access_token().await {
        let request = ApiRequest::post("/auth/logout");
        let notify = async {
            session
                .transport
                .send(&request, Some(token.as_str()))
                .await?
                .decode::<()>()
        };

        match tokio::time::timeout(session.logout_timeout, notify).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("Logout request failed, clearing local session anyway: {}", e),
            Err(_) => warn!(
                "Logout request timed out after {:?}, clearing local session anyway",
                session.logout_timeout
            ),
        }
    }

    session.clear_session().await;
    info!("User logged out");
}
