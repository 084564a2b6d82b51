//! 会话管理
//!
//! [`SessionManager`] 是访问令牌与刷新令牌的唯一持有者：
//! 登录类接口成功后写入存储，登出、刷新失败或不可恢复的 401 时清除。
//! 会话通过构造参数显式注入到 [`crate::http::ApiClient`]，不存在全局单例。

pub mod captcha;
pub mod login;
pub mod logout;
pub mod password;
pub mod phone;
pub mod register;
pub mod token;
pub mod wechat;

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, watch};
use tracing::{info, warn};

use crate::errors::{ClientError, Result};
use crate::http::{ApiRequest, Transport};
use crate::models::auth::{
    AuthResponse, AuthSession, CaptchaImage, LoginRequest, RegisterRequest,
    ResetPasswordRequest, TokenPair, WechatQrcode, WechatStatus,
};
use crate::models::users::UserProfile;
use crate::store::{LocalStore, keys};

/// 登出请求的默认等待上限
pub const DEFAULT_LOGOUT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, SessionState::LoggedIn)
    }
}

pub struct SessionManager {
    store: LocalStore,
    transport: Arc<dyn Transport>,
    state_tx: watch::Sender<SessionState>,
    // 串行化刷新，避免并发 401 各自刷新
    refresh_lock: Mutex<()>,
    logout_timeout: Duration,
}

impl SessionManager {
    /// 从存储恢复会话：存在非空访问令牌即视为已登录
    pub async fn restore(store: LocalStore, transport: Arc<dyn Transport>) -> Self {
        let has_token = store
            .get_string(keys::ACCESS_TOKEN)
            .await
            .is_some_and(|token| !token.is_empty());
        let initial = if has_token {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        };
        info!(
            "Session restored from {} store: {:?}",
            store.backend_name(),
            initial
        );

        let (state_tx, _) = watch::channel(initial);
        Self {
            store,
            transport,
            state_tx,
            refresh_lock: Mutex::new(()),
            logout_timeout: DEFAULT_LOGOUT_TIMEOUT,
        }
    }

    pub fn with_logout_timeout(mut self, timeout: Duration) -> Self {
        self.logout_timeout = timeout;
        self
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        self.transport.clone()
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn state(&self) -> SessionState {
        *self.state_tx.borrow()
    }

    /// 订阅会话状态变化，导航层据此切换根页面
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    fn set_state(&self, next: SessionState) {
        let changed = self.state_tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
        if changed {
            info!("Session state changed to {:?}", next);
        }
    }

    // 用户名密码登录
    pub async fn login(&self, request: LoginRequest) -> Result<AuthSession> {
        login::handle_login(self, request).await
    }

    // 手机验证码登录
    pub async fn login_by_phone(&self, phone: &str, code: &str) -> Result<AuthSession> {
        phone::handle_login_by_phone(self, phone, code).await
    }

    // 发送短信验证码
    pub async fn send_sms_code(&self, phone: &str) -> Result<()> {
        phone::handle_send_sms_code(self, phone).await
    }

    // 注册并直接登录
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthSession> {
        register::handle_register(self, request).await
    }

    // 发送找回密码的邮箱验证码
    pub async fn send_email_code(&self, email: &str) -> Result<()> {
        password::handle_send_email_code(self, email).await
    }

    pub async fn reset_password(&self, request: ResetPasswordRequest) -> Result<()> {
        password::handle_reset_password(self, request).await
    }

    // 登出，本地状态总会被清除
    pub async fn logout(&self) {
        logout::handle_logout(self).await
    }

    /// 用刷新令牌换取新的令牌对，失败时清除会话
    pub async fn refresh_access_token(&self) -> bool {
        token::handle_refresh(self, None).await
    }

    /// 由 401 触发的刷新
    ///
    /// `rejected` 是被拒绝的访问令牌；若等待锁期间它已被其他请求轮换，
    /// 直接复用新令牌，不再发起刷新。
    pub async fn refresh_after_rejection(&self, rejected: Option<&str>) -> bool {
        token::handle_refresh(self, rejected).await
    }

    // 向服务端确认本地令牌仍然有效
    pub async fn validate_token(&self) -> Result<bool> {
        token::handle_validate_token(self).await
    }

    pub async fn captcha_image(&self) -> Result<CaptchaImage> {
        captcha::handle_captcha_image(self).await
    }

    pub async fn captcha_required(&self, username: &str) -> Result<bool> {
        captcha::handle_captcha_required(self, username).await
    }

    pub async fn wechat_qrcode(&self) -> Result<WechatQrcode> {
        wechat::handle_wechat_qrcode(self).await
    }

    pub async fn wechat_status(&self, ticket: &str) -> Result<WechatStatus> {
        wechat::handle_wechat_status(self, ticket)
            .await
            .map(|(status, _)| status)
    }

    pub async fn poll_wechat_login(
        &self,
        ticket: &str,
        interval: Duration,
        max_attempts: u32,
    ) -> Result<AuthSession> {
        wechat::handle_poll_wechat_login(self, ticket, interval, max_attempts).await
    }

    pub async fn is_authenticated(&self) -> bool {
        self.access_token().await.is_some()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.non_empty(keys::ACCESS_TOKEN).await
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.non_empty(keys::REFRESH_TOKEN).await
    }

    pub async fn cached_profile(&self) -> Option<UserProfile> {
        self.store.get_value(keys::USER_INFO).await
    }

    async fn non_empty(&self, key: &str) -> Option<String> {
        self.store
            .get_string(key)
            .await
            .filter(|value| !value.is_empty())
    }

    /// 同时写入两个令牌
    pub async fn save_tokens(&self, tokens: &TokenPair) -> Result<()> {
        self.store
            .set_string(keys::ACCESS_TOKEN, &tokens.access_token)
            .await?;
        self.store
            .set_string(keys::REFRESH_TOKEN, &tokens.refresh_token)
            .await
    }

    pub async fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.store.set_value(keys::USER_INFO, profile).await
    }

    /// 持久化登录结果并切换到已登录
    ///
    /// 令牌写入失败时清除会话并返回错误；用户信息写入失败只记录日志。
    pub(crate) async fn establish(&self, auth: AuthResponse) -> Result<AuthSession> {
        if auth.access_token.is_empty() {
            return Err(ClientError::serialization(
                "Malformed response: missing access token",
            ));
        }

        let tokens = auth.token_pair();
        if let Err(e) = self.save_tokens(&tokens).await {
            // 不能留下只写入一半的令牌对
            warn!("Failed to persist tokens: {}, clearing local session", e);
            self.clear_session().await;
            return Err(e);
        }

        let cached = match &auth.user {
            Some(profile) => self.save_profile(profile).await,
            // 不保留上一个用户的信息
            None => self.store.remove_value(keys::USER_INFO).await,
        };
        if let Err(e) = cached {
            warn!("Failed to cache user profile: {}", e);
        }

        self.set_state(SessionState::LoggedIn);
        if let Some(profile) = &auth.user {
            info!("User {} signed in", profile.username);
        }

        Ok(AuthSession {
            tokens,
            profile: auth.user,
            established_at: chrono::Utc::now(),
        })
    }

    /// 清除令牌与用户信息并切换到未登录，可重复调用
    pub(crate) async fn clear_session(&self) {
        for key in [keys::ACCESS_TOKEN, keys::REFRESH_TOKEN, keys::USER_INFO] {
            if let Err(e) = self.store.remove_value(key).await {
                warn!("Failed to remove '{}' from store: {}, overwriting instead", key, e);
                if let Err(e) = self.store.set_string(key, "").await {
                    warn!("Failed to overwrite '{}': {}", key, e);
                }
            }
        }
        self.set_state(SessionState::LoggedOut);
    }

    /// 401 无法恢复时结束会话
    pub(crate) async fn expire(&self) {
        warn!("Session expired, clearing local credentials");
        self.clear_session().await;
    }

    /// 发送不携带令牌的请求并按统一响应结构解析
    pub(crate) async fn call_public<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.transport.send(&request.public(), None).await?.decode()
    }

    /// 登录类接口的共同流程
    ///
    /// 服务端没有给出消息时使用 `fallback` 作为失败提示。
    pub(crate) async fn sign_in(&self, request: ApiRequest, fallback: &str) -> Result<AuthSession> {
        let response = self.transport.send(&request.public(), None).await?;
        let server_message = response.server_message();

        match response.decode::<AuthResponse>() {
            Ok(auth) => self.establish(auth).await,
            Err(e) if server_message.is_none() && (e.is_business() || e.is_http()) => {
                Err(ClientError::business(fallback))
            }
            Err(e) => Err(e),
        }
    }
}
