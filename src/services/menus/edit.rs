use tracing::info;

use super::MenuService;
use crate::errors::{ClientError, Result};
use crate::models::menus::{MenuItem, MenuRequest};
use crate::utils::validate::validate_required;

fn normalize(mut menu_data: MenuRequest) -> Result<MenuRequest> {
    menu_data.name = menu_data.name.trim().to_string();
    menu_data.key = menu_data.key.trim().to_string();
    menu_data.path = menu_data.path.trim().to_string();
    validate_required(&menu_data.name, "Please enter menu name").map_err(ClientError::validation)?;
    validate_required(&menu_data.key, "Please enter menu key").map_err(ClientError::validation)?;
    validate_required(&menu_data.path, "Please enter menu path").map_err(ClientError::validation)?;
    if menu_data.parent_id < 0 {
        return Err(ClientError::validation("Invalid parent menu"));
    }
    Ok(menu_data)
}

pub async fn create_menu(service: &MenuService, menu_data: MenuRequest) -> Result<MenuItem> {
    let menu_data = normalize(menu_data)?;
    let menu: MenuItem = service.client().post("/menus", &menu_data).await?;
    info!("Menu {} created with id {}", menu.name, menu.id);
    Ok(menu)
}

pub async fn update_menu(service: &MenuService, menu_id: i64, menu_data: MenuRequest) -> Result<MenuItem> {
    let menu_data = normalize(menu_data)?;
    if menu_data.parent_id == menu_id {
        return Err(ClientError::validation("A menu cannot be its own parent"));
    }
    service
        .client()
        .put(&format!("/menus/{menu_id}"), &menu_data)
        .await
}

pub async fn delete_menu(service: &MenuService, menu_id: i64) -> Result<()> {
    service
        .client()
        .delete::<Option<serde_json::Value>>(&format!("/menus/{menu_id}"))
        .await?;
    info!("Menu {} deleted", menu_id);
    Ok(())
}
