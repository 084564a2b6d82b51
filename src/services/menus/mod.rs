pub mod edit;
pub mod list;

use std::sync::Arc;

use crate::errors::Result;
use crate::http::ApiClient;
use crate::models::menus::{MenuItem, MenuRequest};

/// 菜单管理接口
///
/// 与 [`crate::services::UserService::user_menu`] 不同，这里操作的是全部菜单，
/// 服务端返回平铺列表。
pub struct MenuService {
    client: Arc<ApiClient>,
}

impl MenuService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub(crate) fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn list_menus(&self) -> Result<Vec<MenuItem>> {
        list::list_menus(self).await
    }

    // 全部菜单组装成的树
    pub async fn menu_tree(&self) -> Result<Vec<MenuItem>> {
        list::menu_tree(self).await
    }

    pub async fn create_menu(&self, menu_data: MenuRequest) -> Result<MenuItem> {
        edit::create_menu(self, menu_data).await
    }

    pub async fn update_menu(&self, menu_id: i64, menu_data: MenuRequest) -> Result<MenuItem> {
        edit::update_menu(self, menu_id, menu_data).await
    }

    pub async fn delete_menu(&self, menu_id: i64) -> Result<()> {
        edit::delete_menu(self, menu_id).await
    }
}
