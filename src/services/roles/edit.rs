use tracing::info;

use super::RoleService;
use crate::errors::{ClientError, Result};
use crate::models::roles::{Role, RoleRequest};
use crate::utils::validate::validate_required;

fn normalize(mut role_data: RoleRequest) -> Result<RoleRequest> {
    role_data.name = role_data.name.trim().to_string();
    role_data.description = role_data
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());
    validate_required(&role_data.name, "Please enter role name").map_err(ClientError::validation)?;
    Ok(role_data)
}

pub async fn create_role(service: &RoleService, role_data: RoleRequest) -> Result<Role> {
    let role_data = normalize(role_data)?;
    let role: Role = service.client().post("/roles", &role_data).await?;
    info!("Role {} created with id {}", role.name, role.id);
    Ok(role)
}

pub async fn update_role(service: &RoleService, role_id: i64, role_data: RoleRequest) -> Result<Role> {
    let role_data = normalize(role_data)?;
    service
        .client()
        .put(&format!("/roles/{role_id}"), &role_data)
        .await
}

pub async fn delete_role(service: &RoleService, role_id: i64) -> Result<()> {
    service
        .client()
        .delete::<Option<serde_json::Value>>(&format!("/roles/{role_id}"))
        .await?;
    info!("Role {} deleted", role_id);
    Ok(())
}
