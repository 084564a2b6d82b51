use super::AuditLogService;
use crate::errors::{ClientError, Result};
use crate::models::PagedList;
use crate::models::audit::{AuditLog, AuditLogQuery};

/// 单页最多条数
pub const MAX_PAGE_SIZE: i64 = 100;

pub async fn query_logs(
    service: &AuditLogService,
    mut query: AuditLogQuery,
) -> Result<PagedList<AuditLog>> {
    if query.page < 1 {
        return Err(ClientError::validation("Page must be at least 1"));
    }
    if !(1..=MAX_PAGE_SIZE).contains(&query.page_size) {
        return Err(ClientError::validation(format!(
            "Page size must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    if let (Some(start), Some(end)) = (query.start_time, query.end_time)
        && start > end
    {
        return Err(ClientError::validation("Start time must not be after end time"));
    }
    // 空白条件按未设置处理
    query.username = query
        .username
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());
    query.operation_type = query
        .operation_type
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    service.client().post("/audit-logs/query", &query).await
}

pub async fn operation_types(service: &AuditLogService) -> Result<Vec<String>> {
    let types: Option<Vec<String>> = service.client().get("/audit-logs/operation-types").await?;
    Ok(types.unwrap_or_default())
}
