//! 认证状态管理
//!
//! 会话的真实来源是 LocalStorage 中的 `token`/`user` 两个键；
//! 本模块在其上维护一份响应式内存状态，通过 Context 在组件间共享。
//!
//! `epoch` 是会话代际计数：每次登录/登出递增一次。集合拉取在
//! 发起时捕获当前代际，完成时代际已变则丢弃响应，防止迟到的
//! 响应为已登出的会话回填数据。

use crate::api::{ApiError, CarParkApi};
use crate::web::BrowserStorage;
use carpark_shared::protocol::{LoginRequest, RegisterRequest};
use carpark_shared::session::{Session, SessionStore};
use leptos::logging;
use leptos::prelude::*;

/// 浏览器端会话存储（进程内单实例语义）
pub fn session_store() -> SessionStore<BrowserStorage> {
    SessionStore::new(BrowserStorage)
}

/// 认证状态
#[derive(Clone, PartialEq)]
pub struct AuthState {
    /// 当前会话
    pub session: Session,
    /// 挂载后尚未完成首次 Session 加载
    pub is_loading: bool,
    /// 会话代际计数
    pub epoch: u64,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            session: Session::Unauthenticated,
            is_loading: true,
            epoch: 0,
        }
    }
}

/// 认证上下文
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// 当前会话的 API 客户端（未登录时为 None）
    pub fn api(&self) -> Option<CarParkApi> {
        self.state
            .get_untracked()
            .session
            .token()
            .map(CarParkApi::with_token)
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态：同步尝试从 LocalStorage 恢复会话
///
/// 损坏的持久化数据静默降级为未登录，只打一条警告日志。
pub fn init_auth(ctx: &AuthContext) {
    let loaded = session_store().load();
    if loaded.was_malformed {
        logging::warn!("stored session was malformed; treating as logged out");
    }
    ctx.set_state.update(|state| {
        state.session = loaded.session;
        state.is_loading = false;
    });
}

/// 登录成功后的收尾：持久化，再从存储回读确认，然后推进代际
///
/// Shell 不自行推导 token，始终以存储中的内容为准。
fn complete_sign_in(ctx: &AuthContext, token: &str, user: &carpark_shared::User) {
    let store = session_store();
    store.save(token, user);
    let loaded = store.load();
    ctx.set_state.update(|state| {
        state.session = loaded.session;
        state.epoch += 1;
    });
}

/// 登录
pub async fn login(ctx: &AuthContext, email: String, password: String) -> Result<(), ApiError> {
    let api = CarParkApi::anonymous();
    let res = api.login(&LoginRequest { email, password }).await?;
    complete_sign_in(ctx, &res.token, &res.user);
    Ok(())
}

/// 自助注册（成功即自动登录）
///
/// 表单校验在调用前完成；到这里的请求一定是合法的。
pub async fn register_self(ctx: &AuthContext, req: &RegisterRequest) -> Result<(), ApiError> {
    let api = CarParkApi::anonymous();
    let res = api.register(req).await?;
    complete_sign_in(ctx, &res.token, &res.user);
    Ok(())
}

/// 登出：清除持久化会话并推进代际
///
/// 集合信号由 Shell 负责清空，防止登出后残留特权数据。
pub fn logout(ctx: &AuthContext) {
    session_store().clear();
    ctx.set_state.update(|state| {
        state.session = Session::Unauthenticated;
        state.epoch += 1;
    });
}
