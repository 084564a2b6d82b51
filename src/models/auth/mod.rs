pub mod requests;
pub mod responses;

pub use requests::{
    LoginRequest, PhoneLoginRequest, RegisterRequest, ResetChannel, ResetPasswordRequest,
    SendEmailCodeRequest, SendSmsCodeRequest,
};
pub use responses::{
    AuthResponse, AuthSession, CaptchaImage, TokenPair, WechatLoginStatus, WechatQrcode,
    WechatStatus,
};
