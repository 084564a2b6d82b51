use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditStatus {
    Success,
    Failure,
    /// 服务端新增的状态值
    #[serde(other)]
    Unknown,
}

// 一条审计日志，由服务端在敏感操作后写入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    pub operation_type: String,
    #[serde(default)]
    pub operation_desc: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub status: Option<AuditStatus>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub request_method: Option<String>,
    #[serde(default)]
    pub request_path: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_is_tolerated() {
        let log: AuditLog = serde_json::from_str(
            r#"{"id":1,"operationType":"LOGIN","status":"PARTIAL"}"#,
        )
        .unwrap();
        assert_eq!(log.status, Some(AuditStatus::Unknown));

        let log: AuditLog = serde_json::from_str(
            r#"{"id":2,"operationType":"LOGOUT","status":"FAILURE","errorMessage":"boom"}"#,
        )
        .unwrap();
        assert_eq!(log.status, Some(AuditStatus::Failure));
        assert_eq!(log.error_message.as_deref(), Some("boom"));
    }
}
