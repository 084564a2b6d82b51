use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{ClientError, Result};

/// 业务成功码，与 HTTP 状态码无关
pub const SUCCESS_CODE: i32 = 200;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

impl ApiResponse<()> {
    pub fn success_empty() -> Self {
        Self {
            code: SUCCESS_CODE,
            message: "success".to_string(),
            data: None,
        }
    }

    pub fn error_empty(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// 取出业务数据
    ///
    /// `code != 200` 视为业务错误，消息取自响应体；
    /// 成功但没有 `data` 时，仅允许 `()` / `Option<_>` 这类可由 `null` 构造的类型。
    pub fn into_data(self) -> Result<T> {
        if !self.is_success() {
            let message = if self.message.trim().is_empty() {
                "Request failed".to_string()
            } else {
                self.message
            };
            return Err(ClientError::business(message));
        }

        match self.data {
            Some(data) => Ok(data),
            None => serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ClientError::serialization("Malformed response: missing data field")
            }),
        }
    }
}
