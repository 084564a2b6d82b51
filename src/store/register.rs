use crate::config::StoreConfig;
use crate::errors::Result;
use crate::store::KeyValueStore;
use futures_util::future::BoxFuture;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

pub type BoxedStoreFuture = BoxFuture<'static, Result<Box<dyn KeyValueStore>>>;
pub type StoreConstructor = Arc<dyn Fn(StoreConfig) -> BoxedStoreFuture + Send + Sync>;

static STORE_REGISTRY: Lazy<RwLock<HashMap<String, StoreConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_store_plugin<S: Into<String>>(name: S, constructor: StoreConstructor) {
    let name = name.into();
    match STORE_REGISTRY.write() {
        Ok(mut registry) => {
            registry.insert(name, constructor);
        }
        Err(poisoned) => {
            poisoned.into_inner().insert(name, constructor);
        }
    }
}

pub fn get_store_plugin(name: &str) -> Option<StoreConstructor> {
    match STORE_REGISTRY.read() {
        Ok(registry) => registry.get(name).cloned(),
        Err(poisoned) => poisoned.into_inner().get(name).cloned(),
    }
}

pub fn registered_store_plugins() -> Vec<String> {
    let mut names: Vec<String> = match STORE_REGISTRY.read() {
        Ok(registry) => registry.keys().cloned().collect(),
        Err(poisoned) => poisoned.into_inner().keys().cloned().collect(),
    };
    names.sort();
    names
}

pub fn debug_store_registry() {
    let names = registered_store_plugins();
    if names.is_empty() {
        tracing::debug!("No store plugins registered.");
    } else {
        tracing::debug!("Registered store plugins:");
        for name in names {
            tracing::debug!(" - {}", name);
        }
    }
}

/// 在模块加载时把存储后端注册到全局表中
#[macro_export]
macro_rules! declare_store_plugin {
    ($name:expr, $store:ty) => {
        #[ctor::ctor]
        unsafe fn __register_store_plugin() {
            $crate::store::register::register_store_plugin(
                $name,
                std::sync::Arc::new(
                    |config: $crate::config::StoreConfig| -> $crate::store::register::BoxedStoreFuture {
                        Box::pin(async move {
                            let store = <$store>::from_config(&config).await?;
                            Ok(Box::new(store) as Box<dyn $crate::store::KeyValueStore>)
                        })
                    },
                ),
            );
        }
    };
}
