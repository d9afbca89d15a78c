//! 注册表单状态模块
//!
//! 将零散的 signal 整合为 `RegisterFormState` 结构体，负责：
//! - 数据的持有
//! - 数据的重置
//! - 数据到校验输入的转换
//!
//! 公开注册页与管理员代注册面板共用同一份表单状态。

use carpark_shared::Role;
use carpark_shared::protocol::RegistrationInput;
use leptos::prelude::*;

/// 注册表单状态
///
/// 使用 `RwSignal` 因为它实现了 `Copy`，适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct RegisterFormState {
    pub name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub confirm_password: RwSignal<String>,
    pub role: RwSignal<Role>,
}

impl RegisterFormState {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            confirm_password: RwSignal::new(String::new()),
            role: RwSignal::new(Role::User),
        }
    }

    /// 重置表单到初始状态
    pub fn reset(&self) {
        self.name.set(String::new());
        self.email.set(String::new());
        self.password.set(String::new());
        self.confirm_password.set(String::new());
        self.role.set(Role::User);
    }

    /// 取出当前输入用于校验
    ///
    /// 校验本身在 `carpark_shared::protocol` 中完成，
    /// 不通过则不会构造请求，也就不会发出网络调用。
    pub fn input(&self) -> RegistrationInput {
        RegistrationInput {
            name: self.name.get(),
            email: self.email.get(),
            password: self.password.get(),
            confirm_password: self.confirm_password.get(),
            role: self.role.get(),
        }
    }
}

impl Default for RegisterFormState {
    fn default() -> Self {
        Self::new()
    }
}
