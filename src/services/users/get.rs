use tracing::warn;

use super::UserService;
use crate::errors::Result;
use crate::models::menus::MenuItem;
use crate::models::users::UserProfile;

pub async fn current_user(service: &UserService) -> Result<UserProfile> {
    let profile: UserProfile = service.client().get("/users/me").await?;

    // 缓存失败不影响本次结果
    if let Err(e) = service.client().session().save_profile(&profile).await {
        warn!("Failed to cache user profile: {}", e);
    }
    Ok(profile)
}

pub async fn user_menu(service: &UserService) -> Result<Vec<MenuItem>> {
    let menus: Option<Vec<MenuItem>> = service.client().get("/auth/user-menu").await?;
    Ok(menus.unwrap_or_default())
}
