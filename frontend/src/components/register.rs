use crate::auth::{register_self, use_auth};
use crate::components::register_form::RegisterFormState;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 公开自助注册页
///
/// 角色固定为 user；校验不通过时不会发出任何网络请求。
/// 注册成功即自动登录，Shell 随认证状态切换到工作区。
#[component]
pub fn RegisterPage(
    /// 返回登录页
    on_back: Callback<()>,
) -> impl IntoView {
    let auth_ctx = use_auth();
    let form = RegisterFormState::new();

    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);

        // 自助注册不允许选择角色
        let req = match form.input().validate(false) {
            Ok(req) => req,
            Err(e) => {
                set_error_msg.set(Some(e.to_string()));
                return;
            }
        };

        set_is_submitting.set(true);
        spawn_local(async move {
            if let Err(e) = register_self(&auth_ctx, &req).await {
                set_error_msg.try_set(Some(e.to_string()));
            }
            set_is_submitting.try_set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Create Account"</h1>
                    <p class="text-base-content/70">"Sign up for a parking account"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="reg-name">
                                <span class="label-text">"Full Name"</span>
                            </label>
                            <input
                                id="reg-name"
                                type="text"
                                placeholder="Enter your full name"
                                on:input=move |ev| form.name.set(event_target_value(&ev))
                                prop:value=form.name
                                class="input input-bordered"
                                disabled=move || is_submitting.get()
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-email">
                                <span class="label-text">"Email Address"</span>
                            </label>
                            <input
                                id="reg-email"
                                type="email"
                                placeholder="Enter your email"
                                on:input=move |ev| form.email.set(event_target_value(&ev))
                                prop:value=form.email
                                class="input input-bordered"
                                disabled=move || is_submitting.get()
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="reg-password"
                                type="password"
                                placeholder="Enter password (min 6 chars)"
                                on:input=move |ev| form.password.set(event_target_value(&ev))
                                prop:value=form.password
                                class="input input-bordered"
                                disabled=move || is_submitting.get()
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="reg-confirm">
                                <span class="label-text">"Confirm Password"</span>
                            </label>
                            <input
                                id="reg-confirm"
                                type="password"
                                placeholder="Confirm password"
                                on:input=move |ev| form.confirm_password.set(event_target_value(&ev))
                                prop:value=form.confirm_password
                                class="input input-bordered"
                                disabled=move || is_submitting.get()
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-success" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Creating Account..." }.into_any()
                                } else {
                                    "Sign Up".into_any()
                                }}
                            </button>
                        </div>
                        <div class="text-center mt-2">
                            <button
                                type="button"
                                class="btn btn-sm btn-ghost"
                                on:click=move |_| on_back.run(())
                            >
                                "Already have an account? Back to login"
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
