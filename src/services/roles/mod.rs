pub mod edit;
pub mod list;

use std::sync::Arc;

use crate::errors::Result;
use crate::http::ApiClient;
use crate::models::roles::{Role, RoleRequest};

/// 角色管理接口
pub struct RoleService {
    client: Arc<ApiClient>,
}

impl RoleService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub(crate) fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>> {
        list::list_roles(self).await
    }

    pub async fn create_role(&self, role_data: RoleRequest) -> Result<Role> {
        edit::create_role(self, role_data).await
    }

    pub async fn update_role(&self, role_id: i64, role_data: RoleRequest) -> Result<Role> {
        edit::update_role(self, role_id, role_data).await
    }

    pub async fn delete_role(&self, role_id: i64) -> Result<()> {
        edit::delete_role(self, role_id).await
    }
}
