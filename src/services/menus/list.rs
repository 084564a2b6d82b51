use super::MenuService;
use crate::errors::Result;
use crate::models::menus::MenuItem;

pub async fn list_menus(service: &MenuService) -> Result<Vec<MenuItem>> {
    let menus: Option<Vec<MenuItem>> = service.client().get("/menus").await?;
    Ok(menus.unwrap_or_default())
}

pub async fn menu_tree(service: &MenuService) -> Result<Vec<MenuItem>> {
    Ok(MenuItem::build_tree(list_menus(service).await?))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::http::mock::{self, MockBackend};
    use crate::services::menus::MenuService;
    use crate::services::test_support::api_client;

    #[tokio::test]
    async fn test_menu_tree_from_flat_list() {
        let backend = Arc::new(MockBackend::new().reply(
            "/menus",
            mock::ok(json!([
                {"id": 2, "parentId": 1, "name": "Users", "key": "users", "path": "/system/users"},
                {"id": 1, "parentId": 0, "name": "System", "key": "system", "path": "/system"}
            ])),
        ));
        let service = MenuService::new(api_client(&backend).await);

        assert_eq!(service.list_menus().await.unwrap().len(), 2);

        let tree = service.menu_tree().await.unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children[0].key.as_deref(), Some("users"));
    }
}
