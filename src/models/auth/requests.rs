use serde::Serialize;

// 用户名密码登录请求
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// 用户名
    pub username: String,
    /// 密码
    pub password: String,
    /// 图形验证码 Key（失败次数过多后由服务端要求）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha_key: Option<String>,
    /// 图形验证码
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captcha_code: Option<String>,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            captcha_key: None,
            captcha_code: None,
        }
    }

    pub fn with_captcha(mut self, key: impl Into<String>, code: impl Into<String>) -> Self {
        self.captcha_key = Some(key.into());
        self.captcha_code = Some(code.into());
        self
    }
}

// 手机验证码登录请求
#[derive(Debug, Clone, Serialize)]
pub struct PhoneLoginRequest {
    pub phone: String,
    pub code: String,
}

// 发送短信验证码请求
#[derive(Debug, Clone, Serialize)]
pub struct SendSmsCodeRequest {
    pub phone: String,
}

// 注册请求
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

// 发送邮箱验证码请求
#[derive(Debug, Clone, Serialize)]
pub struct SendEmailCodeRequest {
    pub email: String,
}

/// 找回密码时接收验证码的渠道
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetChannel {
    Email,
    Phone,
}

// 找回密码请求，`account` 为邮箱或手机号
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(rename = "type")]
    pub channel: ResetChannel,
    pub account: String,
    pub code: String,
    pub new_password: String,
}
