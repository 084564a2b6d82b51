use serde::{Deserialize, Serialize};

use crate::models::users::entities::UserProfile;

/// 访问令牌与刷新令牌，客户端不解析其内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

// 登录 / 注册 / 刷新 的响应数据
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

impl AuthResponse {
    pub fn token_pair(&self) -> TokenPair {
        TokenPair {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}

/// 一次成功登录后的会话快照
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub tokens: TokenPair,
    pub profile: Option<UserProfile>,
    pub established_at: chrono::DateTime<chrono::Utc>,
}

// 图形验证码
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptchaImage {
    pub captcha_key: String,
    /// `data:image/png;base64,...`
    pub image: String,
}

// 微信登录二维码
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WechatQrcode {
    pub qrcode_url: String,
    /// 用于轮询扫码状态
    pub ticket: String,
    pub expire_seconds: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WechatLoginStatus {
    Waiting,
    Scanned,
    Confirmed,
    Expired,
}

// 微信扫码状态，仅 confirmed 时携带认证信息
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WechatStatus {
    pub status: WechatLoginStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_response: Option<AuthResponse>,
}
