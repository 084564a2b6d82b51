use std::time::Duration;

use tracing::debug;

use crate::errors::{ClientError, Result};
use crate::http::ApiRequest;
use crate::models::auth::{AuthSession, WechatLoginStatus, WechatQrcode, WechatStatus};

use super::SessionManager;

pub async fn handle_wechat_qrcode(session: &SessionManager) -> Result<WechatQrcode> {
    session
        .call_public(ApiRequest::get("/auth/wechat/qrcode"))
        .await
}

/// 查询扫码状态；确认登录时持久化会话并一并返回
pub async fn handle_wechat_status(
    session: &SessionManager,
    ticket: &str,
) -> Result<(WechatStatus, Option<AuthSession>)> {
    let request = ApiRequest::get("/auth/wechat/status").query("ticket", ticket);
    let status: WechatStatus = session.call_public(request).await?;

    if status.status != WechatLoginStatus::Confirmed {
        return Ok((status, None));
    }

    let Some(auth) = status.auth_response.clone() else {
        return Err(ClientError::serialization(
            "Malformed response: confirmed status without tokens",
        ));
    };
    let established = session.establish(auth).await?;
    Ok((status, Some(established)))
}

pub async fn handle_poll_wechat_login(
    session: &SessionManager,
    ticket: &str,
    interval: Duration,
    max_attempts: u32,
) -> Result<AuthSession> {
    for attempt in 1..=max_attempts {
        let (status, established) = handle_wechat_status(session, ticket).await?;
        debug!(
            "WeChat login poll {}/{}: {:?}",
            attempt, max_attempts, status.status
        );

        match status.status {
            WechatLoginStatus::Confirmed => {
                if let Some(established) = established {
                    return Ok(established);
                }
            }
            WechatLoginStatus::Expired => {
                return Err(ClientError::business(
                    "QR code expired, please refresh and scan again",
                ));
            }
            WechatLoginStatus::Waiting | WechatLoginStatus::Scanned => {}
        }

        if attempt < max_attempts {
            tokio::time::sleep(interval).await;
        }
    }

    Err(ClientError::business(
        "WeChat login timed out, please try again",
    ))
}
