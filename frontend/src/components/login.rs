use crate::auth::{login, use_auth};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 登录页
///
/// 收集邮箱/密码，成功后由 `auth::login` 持久化会话；
/// Shell 监听认证状态自动切换到工作区，这里不做任何导航。
#[component]
pub fn LoginPage(
    /// 切换到自助注册页
    on_register_click: Callback<()>,
) -> impl IntoView {
    let auth_ctx = use_auth();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            if let Err(e) = login(&auth_ctx, email.get_untracked(), password.get_untracked()).await
            {
                // 组件可能已卸载，try_set 防止写入已释放的信号
                set_error_msg.try_set(Some(e.to_string()));
            }
            set_is_submitting.try_set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Car Parking Management"</h1>
                    <p class="text-base-content/70">"Sign in to continue"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="Enter your email"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                disabled=move || is_submitting.get()
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="Enter your password"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                disabled=move || is_submitting.get()
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Logging in..." }.into_any()
                                } else {
                                    "Login".into_any()
                                }}
                            </button>
                        </div>
                        <div class="divider"></div>
                        <div class="text-center">
                            <button
                                type="button"
                                class="btn btn-sm btn-outline btn-success"
                                on:click=move |_| on_register_click.run(())
                            >
                                "Create New Account"
                            </button>
                        </div>
                        <div class="text-sm text-base-content/60 mt-2">
                            <strong>"Demo Credentials:"</strong>
                            <div>"Admin: admin@carparking.com / admin123"</div>
                            <div>"Attendant: attendant@carparking.com / attendant123"</div>
                            <div>"User: user1@example.com / user123"</div>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
