use crate::auth::use_auth;
use crate::components::register_form::RegisterFormState;
use crate::web;
use carpark_shared::{Role, User};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 用户管理面板（仅 admin）
///
/// 用户集合由本组件自行拉取；删除用户是破坏性操作，发请求前
/// 必须 confirm。删除可能级联清理该用户的预订，所以删除成功后
/// 除了重拉用户列表，还要触发共享刷新信号。
#[component]
pub fn UserManagementCard(
    /// 共享刷新信号
    on_refresh: Callback<()>,
) -> impl IntoView {
    let auth_ctx = use_auth();

    let (users, set_users) = signal(Vec::<User>::new());
    let (is_loading, set_is_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (show_form, set_show_form) = signal(false);
    let (success_msg, set_success_msg) = signal(Option::<String>::None);
    let (is_submitting, set_is_submitting) = signal(false);

    let form = RegisterFormState::new();

    let fetch_users = move || {
        let Some(api) = auth_ctx.api() else { return };
        spawn_local(async move {
            match api.users().await {
                Ok(data) => {
                    set_users.try_set(data);
                }
                Err(e) => {
                    set_error_msg.try_set(Some(e.to_string()));
                }
            }
            set_is_loading.try_set(false);
        });
    };

    // 初始加载
    Effect::new(move |_| {
        fetch_users();
    });

    let delete_user = move |id: String| {
        let Some(api) = auth_ctx.api() else { return };

        if !web::confirm("Delete this user?") {
            return;
        }

        spawn_local(async move {
            match api.delete_user(&id).await {
                Ok(()) => {
                    fetch_users();
                    on_refresh.run(());
                }
                Err(e) => {
                    set_error_msg.try_set(Some(e.to_string()));
                }
            }
        });
    };

    let on_register = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(api) = auth_ctx.api() else { return };

        set_error_msg.set(None);
        set_success_msg.set(None);

        // 管理员代注册允许选择角色
        let req = match form.input().validate(true) {
            Ok(req) => req,
            Err(e) => {
                set_error_msg.set(Some(e.to_string()));
                return;
            }
        };

        set_is_submitting.set(true);
        spawn_local(async move {
            match api.admin_register(&req).await {
                // 响应里的 token 属于新建用户，这里有意丢弃，
                // 保持当前管理员会话不变
                Ok(res) => {
                    set_success_msg
                        .try_set(Some(format!("User registered successfully as {}!", res.user.role)));
                    form.reset();
                    fetch_users();
                }
                Err(e) => {
                    set_error_msg.try_set(Some(e.to_string()));
                }
            }
            set_is_submitting.try_set(false);
        });
    };

    let role_badge = |role: Role| match role {
        Role::Admin => "badge badge-error",
        Role::Attendant => "badge badge-warning",
        Role::User => "badge badge-neutral",
    };

    view! {
        <div class="card bg-base-100 shadow-sm">
            <div class="card-body">
                <div class="flex justify-between items-center">
                    <h2 class="card-title">"User Management"</h2>
                    <button
                        class="btn btn-sm"
                        on:click=move |_| set_show_form.update(|v| *v = !*v)
                    >
                        {move || if show_form.get() { "Close" } else { "+ Add User" }}
                    </button>
                </div>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>
                <Show when=move || success_msg.get().is_some()>
                    <div role="alert" class="alert alert-success text-sm py-2">
                        <span>{move || success_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <Show when=move || show_form.get()>
                    <form class="bg-base-200 rounded-box p-4 mb-2" on:submit=on_register>
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-2">
                            <input
                                type="text"
                                placeholder="Full name"
                                class="input input-bordered input-sm"
                                on:input=move |ev| form.name.set(event_target_value(&ev))
                                prop:value=form.name
                                disabled=move || is_submitting.get()
                            />
                            <input
                                type="email"
                                placeholder="Email"
                                class="input input-bordered input-sm"
                                on:input=move |ev| form.email.set(event_target_value(&ev))
                                prop:value=form.email
                                disabled=move || is_submitting.get()
                            />
                            <input
                                type="password"
                                placeholder="Password (min 6 chars)"
                                class="input input-bordered input-sm"
                                on:input=move |ev| form.password.set(event_target_value(&ev))
                                prop:value=form.password
                                disabled=move || is_submitting.get()
                            />
                            <input
                                type="password"
                                placeholder="Confirm password"
                                class="input input-bordered input-sm"
                                on:input=move |ev| form.confirm_password.set(event_target_value(&ev))
                                prop:value=form.confirm_password
                                disabled=move || is_submitting.get()
                            />
                        </div>
                        <div class="flex gap-2 mt-2">
                            <select
                                class="select select-bordered select-sm"
                                on:change=move |ev| {
                                    let role = event_target_value(&ev)
                                        .parse::<Role>()
                                        .unwrap_or(Role::User);
                                    form.role.set(role);
                                }
                                prop:value=move || form.role.get().as_str()
                                disabled=move || is_submitting.get()
                            >
                                <option value="user">"User"</option>
                                <option value="attendant">"Attendant"</option>
                                <option value="admin">"Admin"</option>
                            </select>
                            <button class="btn btn-sm btn-primary grow" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() { "Registering..." } else { "Register User" }}
                            </button>
                        </div>
                    </form>
                </Show>

                <Show
                    when=move || !is_loading.get()
                    fallback=|| view! { <div class="alert alert-info">"Loading users..."</div> }
                >
                    <div class="overflow-x-auto">
                        <table class="table table-zebra">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Email"</th>
                                    <th>"Role"</th>
                                    <th>"Status"</th>
                                    <th>"Joined"</th>
                                    <th>"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || users.get()
                                    key=|user| user.id.clone()
                                    children=move |user| {
                                        let id = user.id.clone();
                                        let joined = user.created_at.format("%Y-%m-%d").to_string();
                                        view! {
                                            <tr>
                                                <td class="font-bold">{user.name.clone()}</td>
                                                <td>{user.email.clone()}</td>
                                                <td>
                                                    <span class=role_badge(user.role)>
                                                        {user.role.as_str()}
                                                    </span>
                                                </td>
                                                <td>
                                                    {if user.is_active {
                                                        view! { <span class="badge badge-success">"Active"</span> }.into_any()
                                                    } else {
                                                        view! { <span class="badge badge-error">"Inactive"</span> }.into_any()
                                                    }}
                                                </td>
                                                <td>{joined}</td>
                                                <td>
                                                    <button
                                                        class="btn btn-sm btn-error"
                                                        on:click=move |_| delete_user(id.clone())
                                                    >
                                                        "Delete"
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </Show>
            </div>
        </div>
    }
}
