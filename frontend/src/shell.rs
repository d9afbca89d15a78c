//! Shell 视图状态 - 领域模型
//!
//! 纯逻辑层，不依赖 DOM：根据认证状态与注册开关解析出应渲染的
//! 顶层视图，并把角色映射为可见面板集。状态机：
//!
//! `Loading → Unauthenticated{showing_register} → Authenticated{role}`

use crate::auth::AuthState;
use carpark_shared::Role;

/// Shell 应渲染的顶层视图
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellView {
    /// 尚未完成首次会话加载
    Loading,
    /// 未登录：登录页
    Login,
    /// 未登录：自助注册页
    Register,
    /// 已登录：按角色门控的工作区
    Workspace(Role),
}

/// 解析当前应渲染的视图
pub fn resolve(state: &AuthState, show_register: bool) -> ShellView {
    if state.is_loading {
        return ShellView::Loading;
    }
    match state.session.user() {
        Some(user) => ShellView::Workspace(user.role),
        None if show_register => ShellView::Register,
        None => ShellView::Login,
    }
}

/// 工作区可见面板集
///
/// 纯查表：`role -> panels`，渲染层不再出现任何角色字符串比较。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSet {
    pub user_management: bool,
    pub add_spot_form: bool,
    pub spot_list: bool,
    pub booking_list: bool,
}

pub fn panels_for(role: Role) -> PanelSet {
    let caps = role.capabilities();
    PanelSet {
        user_management: caps.manage_users,
        add_spot_form: caps.manage_spots,
        spot_list: caps.view_spots,
        booking_list: caps.view_bookings,
    }
}

/// 在途响应是否仍属于发起它的那个会话
///
/// 登录/登出都会推进代际；代际不匹配的响应必须被丢弃。
pub fn response_is_live(captured_epoch: u64, current_epoch: u64) -> bool {
    captured_epoch == current_epoch
}

#[cfg(test)]
mod tests {
    use super::*;
    use carpark_shared::User;
    use carpark_shared::session::Session;
    use chrono::{TimeZone, Utc};

    fn user_with_role(role: Role) -> User {
        User {
            id: "u1".to_string(),
            name: "Test".to_string(),
            email: "admin@carparking.com".to_string(),
            role,
            is_active: true,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn authenticated(role: Role) -> AuthState {
        AuthState {
            session: Session::Authenticated {
                token: "tok".to_string(),
                user: user_with_role(role),
            },
            is_loading: false,
            epoch: 1,
        }
    }

    fn unauthenticated() -> AuthState {
        AuthState {
            session: Session::Unauthenticated,
            is_loading: false,
            epoch: 0,
        }
    }

    #[test]
    fn loading_takes_precedence() {
        let state = AuthState::default();
        assert!(state.is_loading);
        assert_eq!(resolve(&state, false), ShellView::Loading);
        assert_eq!(resolve(&state, true), ShellView::Loading);
    }

    #[test]
    fn unauthenticated_toggles_between_login_and_register() {
        let state = unauthenticated();
        assert_eq!(resolve(&state, false), ShellView::Login);
        assert_eq!(resolve(&state, true), ShellView::Register);
    }

    #[test]
    fn authenticated_ignores_register_toggle() {
        let state = authenticated(Role::Attendant);
        assert_eq!(resolve(&state, true), ShellView::Workspace(Role::Attendant));
    }

    #[test]
    fn admin_sees_every_panel() {
        // 场景：admin@carparking.com 登录后，用户管理、添加车位、
        // 车位列表、预订列表全部可见
        assert_eq!(resolve(&authenticated(Role::Admin), false), ShellView::Workspace(Role::Admin));
        let panels = panels_for(Role::Admin);
        assert!(panels.user_management);
        assert!(panels.add_spot_form);
        assert!(panels.spot_list);
        assert!(panels.booking_list);
    }

    #[test]
    fn attendant_never_sees_user_management() {
        let panels = panels_for(Role::Attendant);
        assert!(!panels.user_management);
        assert!(panels.add_spot_form);
        assert!(panels.spot_list);
        assert!(panels.booking_list);
    }

    #[test]
    fn plain_user_is_view_only() {
        let panels = panels_for(Role::User);
        assert!(!panels.user_management);
        assert!(!panels.add_spot_form);
        assert!(panels.spot_list);
        assert!(panels.booking_list);
    }

    #[test]
    fn stale_epoch_responses_are_discarded() {
        let mut state = authenticated(Role::User);
        let captured = state.epoch;
        assert!(response_is_live(captured, state.epoch));
        // 登出推进代际，迟到的响应不再属于当前会话
        state.epoch += 1;
        assert!(!response_is_live(captured, state.epoch));
    }
}
