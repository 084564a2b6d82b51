//! 测试用的脚本化后端

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::errors::{ClientError, Result};

use super::{ApiRequest, HttpMethod, RawResponse, Transport};

#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Json(u16, Value),
    NetworkDown,
    /// 永不返回，用于模拟超时
    Hang,
}

pub(crate) fn ok(data: Value) -> Reply {
    Reply::Json(200, json!({"code": 200, "message": "success", "data": data}))
}

pub(crate) fn ok_empty() -> Reply {
    Reply::Json(200, json!({"code": 200, "message": "success"}))
}

pub(crate) fn business(code: i32, message: &str) -> Reply {
    Reply::Json(200, json!({"code": code, "message": message}))
}

pub(crate) fn unauthorized() -> Reply {
    Reply::Json(401, json!({"code": 401, "message": "Unauthorized"}))
}

pub(crate) fn tokens(access: &str, refresh: &str) -> Value {
    json!({"accessToken": access, "refreshToken": refresh})
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub method: HttpMethod,
    pub path: String,
    pub bearer: Option<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

type Handler = Box<dyn Fn(&ApiRequest, Option<&str>) -> Reply + Send + Sync>;

#[derive(Default)]
pub(crate) struct MockBackend {
    routes: Mutex<HashMap<String, Handler>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(
        self,
        path: &str,
        handler: impl Fn(&ApiRequest, Option<&str>) -> Reply + Send + Sync + 'static,
    ) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), Box::new(handler));
        self
    }

    pub fn reply(self, path: &str, reply: Reply) -> Self {
        self.route(path, move |_, _| reply.clone())
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.path == path)
            .count()
    }
}

#[async_trait]
impl Transport for MockBackend {
    async fn send(&self, request: &ApiRequest, bearer: Option<&str>) -> Result<RawResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: request.method,
            path: request.path.clone(),
            bearer: bearer.map(str::to_string),
            query: request.query.clone(),
            body: request.body.clone(),
        });

        // 让出执行权，使并发请求能够交错
        tokio::task::yield_now().await;

        let reply = {
            let routes = self.routes.lock().unwrap();
            routes.get(&request.path).map(|handler| handler(request, bearer))
        };

        match reply {
            Some(Reply::Json(status, body)) => Ok(RawResponse::new(status, body.to_string())),
            Some(Reply::NetworkDown) => Err(ClientError::network(
                "Network unreachable, please check your network connection",
            )),
            Some(Reply::Hang) => std::future::pending().await,
            None => Ok(RawResponse::new(
                404,
                json!({"code": 404, "message": "Not Found"}).to_string(),
            )),
        }
    }
}
