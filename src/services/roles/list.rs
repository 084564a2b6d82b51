use super::RoleService;
use crate::errors::Result;
use crate::models::roles::Role;

pub async fn list_roles(service: &RoleService) -> Result<Vec<Role>> {
    let roles: Option<Vec<Role>> = service.client().get("/roles").await?;
    Ok(roles.unwrap_or_default())
}
