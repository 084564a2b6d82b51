use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 当前用户信息的本地快照
///
/// 登录成功或 `/users/me` 成功时覆盖，登出时清除。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_ids: Option<Vec<i64>>,
}

impl UserProfile {
    /// 用于界面展示的名称
    pub fn display_name(&self) -> &str {
        &self.username
    }
}

/// 账户状态，服务端以 0 / 1 表示
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum UserStatus {
    Disabled,
    #[default]
    Enabled,
}

impl TryFrom<i32> for UserStatus {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(UserStatus::Disabled),
            1 => Ok(UserStatus::Enabled),
            other => Err(format!("unknown user status {other}")),
        }
    }
}

impl From<UserStatus> for i32 {
    fn from(status: UserStatus) -> Self {
        match status {
            UserStatus::Disabled => 0,
            UserStatus::Enabled => 1,
        }
    }
}

// 用户列表中的一项（管理端）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub role_ids: Vec<i64>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_profile_deserializes() {
        let profile: UserProfile = serde_json::from_str(r#"{"id":7,"username":"demo"}"#).unwrap();
        assert_eq!(profile.id, 7);
        assert_eq!(profile.email, None);
        assert_eq!(profile.role_ids, None);
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let profile = UserProfile {
            id: 1,
            username: "admin".to_string(),
            email: None,
            phone: Some("13800138000".to_string()),
            role_ids: Some(vec![1, 2]),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("email").is_none());
        assert_eq!(json["roleIds"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_user_record_status_is_numeric() {
        let record: UserRecord = serde_json::from_str(
            r#"{"id":3,"username":"alice","status":0,"roleIds":[2],"createdAt":"2024-05-01T09:30:00"}"#,
        )
        .unwrap();
        assert_eq!(record.status, UserStatus::Disabled);
        assert_eq!(record.role_ids, vec![2]);

        let record: UserRecord = serde_json::from_str(r#"{"id":4,"username":"bob"}"#).unwrap();
        assert_eq!(record.status, UserStatus::Enabled);
        assert!(record.role_ids.is_empty());
    }
}
