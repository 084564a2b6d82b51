use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{AppConfig, StoreConfig};
use crate::errors::{ClientError, Result};
use crate::http::{ApiClient, ReqwestTransport, Transport, install_crypto_provider};
use crate::runtime::gate::NavigationGate;
use crate::services::{
    AuditLogService, MenuService, NoteService, RoleService, SessionManager, UserService,
};
use crate::store::register::{debug_store_registry, get_store_plugin};
use crate::store::{KeyValueStore, LocalStore};

const FALLBACK_STORE: &str = "memory";

/// 启动后可供前端使用的全部对象
pub struct ClientContext {
    pub store: LocalStore,
    pub session: Arc<SessionManager>,
    pub client: Arc<ApiClient>,
    pub users: UserService,
    pub roles: RoleService,
    pub menus: MenuService,
    pub notes: NoteService,
    pub audit: AuditLogService,
}

impl ClientContext {
    pub fn gate(&self) -> NavigationGate {
        NavigationGate::new(self.session.clone())
    }
}

/// 创建存储实例
///
/// 按配置的名称从插件表中查找；创建失败或名称未注册时回退到内存存储。
pub async fn create_store(config: &StoreConfig) -> Result<Arc<dyn KeyValueStore>> {
    let store_type = config.store_type.as_str();
    debug_store_registry();

    if let Some(constructor) = get_store_plugin(store_type) {
        match constructor(config.clone()).await {
            Ok(store) => {
                info!("Using {} store backend", store_type);
                return Ok(Arc::from(store));
            }
            Err(e) => warn!("Failed to create {} store: {}", store_type, e),
        }
    } else {
        warn!("Store backend '{}' not found in registry", store_type);
    }

    if store_type != FALLBACK_STORE
        && let Some(fallback_constructor) = get_store_plugin(FALLBACK_STORE)
    {
        warn!("Falling back to in-memory store, the session will not survive restarts");
        match fallback_constructor(config.clone()).await {
            Ok(store) => return Ok(Arc::from(store)),
            Err(e) => warn!("Failed to create fallback memory store: {}", e),
        }
    }

    Err(ClientError::storage(format!(
        "No store backend available (tried: {store_type})"
    )))
}

/// 以给定的传输层组装客户端
pub async fn build_context(
    config: &AppConfig,
    transport: Arc<dyn Transport>,
) -> Result<ClientContext> {
    let backend = create_store(&config.store).await?;
    let store = LocalStore::new(backend, config.store.key_prefix.clone());

    let session = Arc::new(SessionManager::restore(store.clone(), transport).await);
    let client = Arc::new(ApiClient::new(session.clone()));

    Ok(ClientContext {
        users: UserService::new(client.clone()),
        roles: RoleService::new(client.clone()),
        menus: MenuService::new(client.clone()),
        notes: NoteService::new(client.clone()),
        audit: AuditLogService::new(client.clone()),
        store,
        session,
        client,
    })
}

/// 客户端启动：安装 TLS 后端、创建传输层与存储、恢复会话
pub async fn prepare_client(config: &AppConfig) -> Result<ClientContext> {
    install_crypto_provider();

    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(&config.api)?);
    let context = build_context(config, transport).await?;

    debug!(
        "Client ready: api={}, store={}, state={:?}",
        config.api.base_url,
        context.store.backend_name(),
        context.session.state()
    );
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::{self, MockBackend};
    use crate::runtime::gate::RootScreen;
    use crate::store::keys;
    use serde_json::json;

    fn config_with_store(store_type: &str, path: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::defaults().unwrap();
        config.store.store_type = store_type.to_string();
        config.store.file.path = path.to_string_lossy().into_owned();
        config
    }

    #[tokio::test]
    async fn test_unknown_backend_falls_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_store("sqlite", &dir.path().join("session.json"));

        let store = create_store(&config.store).await.unwrap();
        assert_eq!(store.backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_unreachable_redis_falls_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_with_store("redis", &dir.path().join("session.json"));
        config.store.redis.url = "redis://127.0.0.1:9".to_string();

        let store = create_store(&config.store).await.unwrap();
        assert_eq!(store.backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_session_survives_restart_with_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_store("file", &dir.path().join("session.json"));
        let backend = Arc::new(MockBackend::new().reply(
            "/auth/login",
            mock::ok(json!({
                "accessToken": "A1",
                "refreshToken": "R1",
                "user": {"id": 7, "username": "demo"}
            })),
        ));

        {
            let context = build_context(&config, backend.clone()).await.unwrap();
            assert_eq!(context.store.backend_name(), "file");
            assert_eq!(context.gate().root().await, RootScreen::Unauthenticated);
            context
                .session
                .login(crate::models::auth::LoginRequest::new("demo", "pw123456"))
                .await
                .unwrap();
        }

        let restarted = build_context(&config, backend).await.unwrap();
        assert_eq!(restarted.gate().root().await, RootScreen::Authenticated);
        assert_eq!(
            restarted.store.get_string(keys::ACCESS_TOKEN).await.as_deref(),
            Some("A1")
        );
        assert_eq!(
            restarted.session.cached_profile().await.map(|p| p.id),
            Some(7)
        );
    }

    #[tokio::test]
    async fn test_prepare_client_with_real_transport() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_store("memory", &dir.path().join("session.json"));

        let context = prepare_client(&config).await.unwrap();
        assert!(!context.session.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_prepare_client_rejects_bad_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_with_store("memory", &dir.path().join("session.json"));
        config.api.base_url = "::not a url::".to_string();

        let err = prepare_client(&config).await.err().unwrap();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_resource_services_share_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_store("memory", &dir.path().join("session.json"));
        let backend = Arc::new(
            MockBackend::new()
                .reply("/auth/login", mock::ok(mock::tokens("A1", "R1")))
                .reply("/notes", mock::ok(json!([])))
                .reply("/roles", mock::unauthorized())
                .reply("/auth/refresh", mock::business(401, "Refresh token expired")),
        );
        let context = build_context(&config, backend.clone()).await.unwrap();
        context
            .session
            .login(crate::models::auth::LoginRequest::new("demo", "pw123456"))
            .await
            .unwrap();

        context.notes.list_notes().await.unwrap();
        let notes_call = backend.calls().into_iter().find(|c| c.path == "/notes").unwrap();
        assert_eq!(notes_call.bearer.as_deref(), Some("A1"));

        // 任一服务的会话失效都会让导航回到登录页
        let err = context.roles.list_roles().await.unwrap_err();
        assert!(err.requires_login());
        assert_eq!(context.gate().root().await, RootScreen::Unauthenticated);
    }
}
