//! 原生对话框封装模块
//!
//! 破坏性操作（取消预订、删除用户）在发请求前必须经过一次
//! 显式的交互确认，这里封装 window.confirm / prompt / alert。

/// 确认对话框；window 不可用时视为用户拒绝
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// 输入对话框；取消或 window 不可用时返回 `None`
pub fn prompt(message: &str) -> Option<String> {
    web_sys::window()?.prompt_with_message(message).ok()?
}

/// 提示对话框（写操作失败时向用户呈现错误）
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
