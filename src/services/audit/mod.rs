pub mod query;

use std::sync::Arc;

use crate::errors::Result;
use crate::http::ApiClient;
use crate::models::PagedList;
use crate::models::audit::{AuditLog, AuditLogQuery};

/// 审计日志查询（只读）
pub struct AuditLogService {
    client: Arc<ApiClient>,
}

impl AuditLogService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub(crate) fn client(&self) -> &ApiClient {
        &self.client
    }

    // 按条件分页查询
    pub async fn query_logs(&self, query: AuditLogQuery) -> Result<PagedList<AuditLog>> {
        query::query_logs(self, query).await
    }

    // 可用于筛选的操作类型
    pub async fn operation_types(&self) -> Result<Vec<String>> {
        query::operation_types(self).await
    }
}
