//! 根页面选择
//!
//! 只读取会话状态，不反向影响 [`SessionManager`]。

use std::sync::Arc;

use tokio::sync::watch;

use crate::services::auth::{SessionManager, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootScreen {
    /// 首页 / 菜单等需要登录的页面
    Authenticated,
    /// 登录、注册页面
    Unauthenticated,
}

impl From<SessionState> for RootScreen {
    fn from(state: SessionState) -> Self {
        match state {
            SessionState::LoggedIn => RootScreen::Authenticated,
            SessionState::LoggedOut => RootScreen::Unauthenticated,
        }
    }
}

pub struct NavigationGate {
    session: Arc<SessionManager>,
    updates: watch::Receiver<SessionState>,
}

impl NavigationGate {
    pub fn new(session: Arc<SessionManager>) -> Self {
        let updates = session.subscribe();
        Self { session, updates }
    }

    /// 启动时以及每次状态变化后调用，决定挂载哪一组页面
    pub async fn root(&self) -> RootScreen {
        if self.session.is_authenticated().await {
            RootScreen::Authenticated
        } else {
            RootScreen::Unauthenticated
        }
    }

    /// 等待下一次登录/登出切换；会话被释放时返回 `None`
    pub async fn next_transition(&mut self) -> Option<RootScreen> {
        self.updates.changed().await.ok()?;
        let state = *self.updates.borrow_and_update();
        Some(state.into())
    }
}
