use crate::auth::use_auth;
use crate::web;
use carpark_shared::Booking;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 预订列表（所有角色可见）
///
/// 取消是破坏性操作：发请求前必须经过 confirm 确认。
/// 取消一个已不存在的预订会收到服务端的错误消息；本地列表
/// 保持不变，直到下一次刷新。
#[component]
pub fn BookingListCard(
    /// 预订集合（Shell 持有）
    bookings: ReadSignal<Vec<Booking>>,
    /// 共享刷新信号
    on_refresh: Callback<()>,
) -> impl IntoView {
    let auth_ctx = use_auth();

    let (canceling_id, set_canceling_id) = signal(Option::<String>::None);

    let cancel_booking = move |id: String| {
        let Some(api) = auth_ctx.api() else { return };

        if !web::confirm("Cancel this booking and free the spot?") {
            return;
        }

        set_canceling_id.set(Some(id.clone()));
        spawn_local(async move {
            match api.cancel_booking(&id).await {
                Ok(()) => {
                    on_refresh.run(());
                    web::alert("Booking cancelled successfully!");
                }
                Err(e) => {
                    web::alert(&format!("Error: {}", e));
                }
            }
            set_canceling_id.try_set(None);
        });
    };

    view! {
        <div class="card bg-base-100 shadow-sm">
            <div class="card-body">
                <h2 class="card-title">
                    "Active Bookings (" {move || bookings.with(|b| b.len())} ")"
                </h2>

                <Show when=move || bookings.with(|b| b.is_empty())>
                    <div class="alert alert-info">"No active bookings yet."</div>
                </Show>

                <Show when=move || bookings.with(|b| !b.is_empty())>
                    <div class="overflow-x-auto">
                        <table class="table table-zebra">
                            <thead>
                                <tr>
                                    <th>"Vehicle"</th>
                                    <th>"Parking Spot"</th>
                                    <th>"Location"</th>
                                    <th>"Booked At"</th>
                                    <th>"Action"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || bookings.get()
                                    key=|booking| booking.id.clone()
                                    children=move |booking| {
                                        let id = booking.id.clone();
                                        let is_canceling = {
                                            let id = id.clone();
                                            move || canceling_id.get().as_deref() == Some(id.as_str())
                                        };
                                        // 车位可能已被删除，内嵌对象为 null
                                        let spot_number = booking
                                            .spot
                                            .as_ref()
                                            .map(|s| s.number.clone())
                                            .unwrap_or_else(|| "—".to_string());
                                        let spot_location = booking
                                            .spot
                                            .as_ref()
                                            .map(|s| s.location.clone())
                                            .unwrap_or_else(|| "—".to_string());
                                        let booked_at =
                                            booking.start_time.format("%Y-%m-%d %H:%M").to_string();
                                        view! {
                                            <tr>
                                                <td class="font-bold">{booking.vehicle_number.clone()}</td>
                                                <td><span class="badge badge-primary">{spot_number}</span></td>
                                                <td class="text-base-content/60">{spot_location}</td>
                                                <td>{booked_at}</td>
                                                <td>
                                                    <button
                                                        class="btn btn-sm btn-error"
                                                        disabled=is_canceling.clone()
                                                        on:click=move |_| cancel_booking(id.clone())
                                                    >
                                                        {let is_canceling = is_canceling.clone();
                                                         move || if is_canceling() { "Cancelling..." } else { "Cancel" }}
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
