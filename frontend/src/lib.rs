//! CarPark 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `shell`: 视图状态解析与角色面板门控（领域模型）
//! - `auth`: 认证状态管理与会话代际计数
//! - `api`: 出站请求封装（Bearer 认证、错误体提取）
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod booking_list;
    pub mod login;
    pub mod parking_form;
    pub mod parking_list;
    pub mod register;
    mod register_form;
    pub mod user_management;
}
mod shell;

// 原生 Web API 封装模块
pub(crate) mod web {
    mod dialog;
    mod storage;

    pub use dialog::{alert, confirm, prompt};
    pub use storage::BrowserStorage;
}

use crate::api::CarParkApi;
use crate::auth::{AuthContext, init_auth, logout};
use crate::components::booking_list::BookingListCard;
use crate::components::login::LoginPage;
use crate::components::parking_form::ParkingFormCard;
use crate::components::parking_list::ParkingListCard;
use crate::components::register::RegisterPage;
use crate::components::user_management::UserManagementCard;
use crate::shell::ShellView;

use carpark_shared::session::Session;
use carpark_shared::{Booking, ParkingSpot};
use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文并从 LocalStorage 恢复会话
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    init_auth(&auth_ctx);

    // 2. Shell 持有的状态：注册页开关与两个资源集合
    let (show_register, set_show_register) = signal(false);
    let (spots, set_spots) = signal(Vec::<ParkingSpot>::new());
    let (bookings, set_bookings) = signal(Vec::<Booking>::new());

    let auth_state = auth_ctx.state;

    // 3. 共享刷新信号：任何变更成功后重新拉取两个集合。
    //    两个请求并发在途，互不排序，各自只写自己的状态切片；
    //    不做去抖，后到的响应覆盖先到的（服务端是唯一事实来源）。
    //    完成时校验会话代际，迟到的响应不会为已登出的会话回填数据。
    let refresh = Callback::new(move |_: ()| {
        let state = auth_state.get_untracked();
        let Session::Authenticated { token, .. } = &state.session else {
            return;
        };
        let epoch = state.epoch;
        let api = CarParkApi::with_token(token.clone());

        {
            let api = api.clone();
            spawn_local(async move {
                match api.spots().await {
                    Ok(data) => {
                        if shell::response_is_live(epoch, auth_state.get_untracked().epoch) {
                            set_spots.set(data);
                        }
                    }
                    // 读操作失败只记录日志，保留上一次的集合
                    Err(e) => logging::warn!("failed to fetch parking spots: {}", e),
                }
            });
        }

        spawn_local(async move {
            match api.bookings().await {
                Ok(data) => {
                    if shell::response_is_live(epoch, auth_state.get_untracked().epoch) {
                        set_bookings.set(data);
                    }
                }
                Err(e) => logging::warn!("failed to fetch bookings: {}", e),
            }
        });
    });

    // 4. 进入已认证状态时并发拉取两个集合
    Effect::new(move |_| {
        let state = auth_state.get();
        if !state.is_loading && state.session.is_authenticated() {
            if show_register.get_untracked() {
                set_show_register.set(false);
            }
            refresh.run(());
        }
    });

    // 5. 登出：清空集合，防止登出后残留特权数据
    let on_logout = move |_| {
        logout(&auth_ctx);
        set_spots.set(Vec::new());
        set_bookings.set(Vec::new());
        set_show_register.set(false);
    };

    // 6. 渲染是纯查表：认证状态 + 角色 -> 可见面板集
    view! {
        {move || {
            let state = auth_state.get();
            match shell::resolve(&state, show_register.get()) {
                ShellView::Loading => view! {
                    <div class="flex items-center justify-center min-h-screen bg-base-200">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
                .into_any(),
                ShellView::Login => view! {
                    <LoginPage on_register_click=Callback::new(move |_| set_show_register.set(true)) />
                }
                .into_any(),
                ShellView::Register => view! {
                    <RegisterPage on_back=Callback::new(move |_| set_show_register.set(false)) />
                }
                .into_any(),
                ShellView::Workspace(role) => {
                    let panels = shell::panels_for(role);
                    let (name, role_label) = state
                        .session
                        .user()
                        .map(|u| (u.name.clone(), u.role.as_str()))
                        .unwrap_or_default();
                    view! {
                        <div class="min-h-screen bg-base-200">
                            <div class="navbar bg-primary text-primary-content shadow-lg">
                                <div class="flex-1">
                                    <span class="text-xl font-bold px-2">"Car Parking Management"</span>
                                </div>
                                <div class="flex-none gap-3 items-center px-2">
                                    <div class="text-right text-sm">
                                        <div class="font-bold">{name}</div>
                                        <span class="badge badge-outline">{role_label}</span>
                                    </div>
                                    <button class="btn btn-sm" on:click=on_logout>
                                        "Logout"
                                    </button>
                                </div>
                            </div>

                            <div class="container mx-auto p-4 space-y-4">
                                {panels
                                    .user_management
                                    .then(|| view! { <UserManagementCard on_refresh=refresh /> })}

                                {if panels.add_spot_form {
                                    // admin / attendant：表单与列表并排
                                    view! {
                                        <div class="grid grid-cols-1 lg:grid-cols-12 gap-4">
                                            <div class="lg:col-span-5">
                                                <ParkingFormCard on_refresh=refresh />
                                            </div>
                                            <div class="lg:col-span-7">
                                                <ParkingListCard spots=spots on_refresh=refresh />
                                            </div>
                                        </div>
                                    }
                                    .into_any()
                                } else if panels.spot_list {
                                    // user：仅查看/预订
                                    view! { <ParkingListCard spots=spots on_refresh=refresh /> }
                                        .into_any()
                                } else {
                                    ().into_any()
                                }}

                                {panels
                                    .booking_list
                                    .then(|| view! { <BookingListCard bookings=bookings on_refresh=refresh /> })}
                            </div>

                            <footer class="text-center py-4 text-sm text-base-content/60">
                                "Car Parking Management System © 2025 | Logged in as " {role_label}
                            </footer>
                        </div>
                    }
                    .into_any()
                }
            }
        }}
    }
}
