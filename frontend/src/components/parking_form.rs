use crate::auth::use_auth;
use carpark_shared::protocol::CreateSpotRequest;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 添加车位表单（admin / attendant）
///
/// 单次"请求-刷新"循环：提交期间禁用控件，成功后清空表单并
/// 触发共享刷新信号，失败则在卡片内展示提取出的错误消息。
#[component]
pub fn ParkingFormCard(
    /// 共享刷新信号
    on_refresh: Callback<()>,
) -> impl IntoView {
    let auth_ctx = use_auth();

    let (number, set_number) = signal(String::new());
    let (location, set_location) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(api) = auth_ctx.api() else { return };

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let req = CreateSpotRequest {
            number: number.get_untracked(),
            location: location.get_untracked(),
        };
        spawn_local(async move {
            match api.add_spot(&req).await {
                Ok(_) => {
                    set_number.try_set(String::new());
                    set_location.try_set(String::new());
                    on_refresh.run(());
                }
                Err(e) => {
                    set_error_msg.try_set(Some(e.to_string()));
                }
            }
            set_is_submitting.try_set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow-sm">
            <div class="card-body">
                <h2 class="card-title">"Add Parking Spot"</h2>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-control">
                        <label class="label" for="spot-number">
                            <span class="label-text">"Spot Number *"</span>
                        </label>
                        <input
                            id="spot-number"
                            type="text"
                            placeholder="e.g., P-001"
                            on:input=move |ev| set_number.set(event_target_value(&ev))
                            prop:value=number
                            class="input input-bordered"
                            disabled=move || is_submitting.get()
                            required
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="spot-location">
                            <span class="label-text">"Location"</span>
                        </label>
                        <input
                            id="spot-location"
                            type="text"
                            placeholder="e.g., Level 1 - Row A"
                            on:input=move |ev| set_location.set(event_target_value(&ev))
                            prop:value=location
                            class="input input-bordered"
                            disabled=move || is_submitting.get()
                        />
                    </div>
                    <div class="form-control mt-4">
                        <button class="btn btn-primary w-full" disabled=move || is_submitting.get()>
                            {move || if is_submitting.get() { "Adding..." } else { "Add Spot" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
