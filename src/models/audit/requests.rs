use chrono::NaiveDateTime;
use serde::Serialize;

use super::entities::AuditStatus;
use crate::models::common::pagination::{default_page, default_page_size};

/// 审计日志查询条件，未设置的条件不会发送
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AuditStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveDateTime>,
    pub page: i64,
    pub page_size: i64,
}

impl Default for AuditLogQuery {
    fn default() -> Self {
        Self {
            user_id: None,
            username: None,
            operation_type: None,
            status: None,
            start_time: None,
            end_time: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}
