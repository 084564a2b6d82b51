//! logindemo-client - 登录演示系统的跨平台客户端核心
//!
//! 把各端重复的令牌管理、请求重试逻辑收敛到一个实现中，
//! 平台差异只体现在存储后端与传输层两个 trait 上。
//!
//! # 架构
//! - `config`: 配置管理
//! - `errors`: 统一错误处理
//! - `http`: 传输层与带一次刷新重试的请求客户端
//! - `models`: 接口数据模型
//! - `runtime`: 启动组装与根页面选择
//! - `services`: 会话管理与账户接口
//! - `store`: 本地键值存储（内存/文件/Redis）
//! - `utils`: 输入校验

pub mod config;
pub mod errors;
pub mod http;
pub mod models;
pub mod runtime;
pub mod services;
pub mod store;
pub mod utils;
