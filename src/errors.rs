//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 每个变体携带一行可直接展示给用户的消息。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数与 is_xxx() 分类判断
macro_rules! define_client_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum ClientError {
            $($variant(String),)*
        }

        impl ClientError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ClientError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ClientError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ClientError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl ClientError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ClientError::$variant(msg.into())
                    }

                    pub fn [<is_ $variant:snake>](&self) -> bool {
                        matches!(self, ClientError::$variant(_))
                    }
                )*
            }
        }
    };
}

define_client_errors! {
    Validation("C001", "Validation Error"),
    Business("C002", "Business Error"),
    Http("C003", "HTTP Error"),
    SessionExpired("C004", "Session Expired"),
    Network("C005", "Network Error"),
    Storage("C006", "Storage Error"),
    Serialization("C007", "Serialization Error"),
    Configuration("C008", "Configuration Error"),
    Unexpected("C009", "Unexpected Error"),
}

impl ClientError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 该错误是否要求回到登录页
    pub fn requires_login(&self) -> bool {
        self.is_session_expired()
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ClientError {}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Serialization(err.to_string())
    }
}

impl From<redis::RedisError> for ClientError {
    fn from(err: redis::RedisError) -> Self {
        ClientError::Storage(err.to_string())
    }
}

impl From<config::ConfigError> for ClientError {
    fn from(err: config::ConfigError) -> Self {
        ClientError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ClientError::validation("test").code(), "C001");
        assert_eq!(ClientError::business("test").code(), "C002");
        assert_eq!(ClientError::session_expired("test").code(), "C004");
        assert_eq!(ClientError::network("test").code(), "C005");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ClientError::network("offline").error_type(),
            "Network Error"
        );
        assert_eq!(
            ClientError::storage("disk full").error_type(),
            "Storage Error"
        );
    }

    #[test]
    fn test_classification_helpers() {
        let offline = ClientError::network("Network unreachable");
        assert!(offline.is_network());
        assert!(!offline.is_business());

        let rejected = ClientError::business("Username or password is incorrect");
        assert!(rejected.is_business());
        assert!(!rejected.requires_login());

        assert!(ClientError::session_expired("expired").requires_login());
    }

    #[test]
    fn test_format_simple() {
        let err = ClientError::validation("Username is required");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Username is required"));
    }

    #[test]
    fn test_io_error_maps_to_storage() {
        let err: ClientError = std::io::Error::other("read-only file system").into();
        assert!(err.is_storage());
        assert_eq!(err.message(), "read-only file system");
    }
}
