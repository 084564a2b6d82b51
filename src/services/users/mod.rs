pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use std::sync::Arc;

use crate::errors::Result;
use crate::http::ApiClient;
use crate::models::menus::MenuItem;
use crate::models::users::{CreateUserRequest, UpdateUserRequest, UserProfile, UserRecord};

/// 账户相关接口，全部经由 [`ApiClient`] 发出，受一次刷新重试保护
pub struct UserService {
    client: Arc<ApiClient>,
}

impl UserService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub(crate) fn client(&self) -> &ApiClient {
        &self.client
    }

    // 获取当前用户，并刷新本地缓存
    pub async fn current_user(&self) -> Result<UserProfile> {
        get::current_user(self).await
    }

    // 获取当前用户的菜单树
    pub async fn user_menu(&self) -> Result<Vec<MenuItem>> {
        get::user_menu(self).await
    }

    // 更新用户信息
    pub async fn update_user(&self, user_id: i64, update: UpdateUserRequest) -> Result<UserProfile> {
        update::update_user(self, user_id, update).await
    }

    // 修改密码
    pub async fn update_password(&self, user_id: i64, new_password: &str) -> Result<()> {
        update::update_password(self, user_id, new_password).await
    }

    // 获取用户列表（管理端）
    pub async fn list_users(&self) -> Result<Vec<UserRecord>> {
        list::list_users(self).await
    }

    pub async fn create_user(&self, user_data: CreateUserRequest) -> Result<()> {
        create::create_user(self, user_data).await
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<()> {
        delete::delete_user(self, user_id).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::http::mock::MockBackend;
    use crate::services::test_support::api_client;

    pub(crate) async fn user_service(backend: &Arc<MockBackend>) -> UserService {
        UserService::new(api_client(backend).await)
    }
}
