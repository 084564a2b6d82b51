use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::errors::{ClientError, Result};
use crate::services::auth::SessionManager;

use super::{ApiRequest, Transport};

/// 需要登录的业务请求统一从这里发出
///
/// 每次发送时从 [`SessionManager`] 读取最新的访问令牌；
/// 收到 401 时最多刷新一次令牌并重发一次，仍失败则清除会话。
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Arc<SessionManager>,
}

impl ApiClient {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self {
            transport: session.transport(),
            session,
        }
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    pub async fn execute<T: DeserializeOwned>(&self, mut request: ApiRequest) -> Result<T> {
        loop {
            let bearer = if request.requires_auth {
                self.session.access_token().await
            } else {
                None
            };

            let response = self.transport.send(&request, bearer.as_deref()).await?;

            if !(response.is_unauthorized() && request.requires_auth) {
                return response.decode();
            }

            if !request.is_retried() {
                request.mark_retried();
                debug!(
                    "{} {} rejected with 401, attempting token refresh",
                    request.method, request.path
                );
                if self.session.refresh_after_rejection(bearer.as_deref()).await {
                    continue;
                }
            }

            warn!(
                "{} {} still unauthorized, ending session",
                request.method, request.path
            );
            self.session.expire().await;
            return Err(ClientError::session_expired(
                "Login expired, please login again",
            ));
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(ApiRequest::get(path)).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.execute(ApiRequest::post(path).json(body)?).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.execute(ApiRequest::put(path).json(body)?).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(ApiRequest::delete(path)).await
    }
}
