use crate::auth::use_auth;
use crate::web;
use carpark_shared::ParkingSpot;
use carpark_shared::protocol::CreateBookingRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 车位列表
///
/// 集合数据由 Shell 下发，这里只持有"哪个车位正在预订中"的
/// 瞬时状态。预订是写操作：失败必须以 alert 呈现给用户。
#[component]
pub fn ParkingListCard(
    /// 车位集合（Shell 持有）
    spots: ReadSignal<Vec<ParkingSpot>>,
    /// 共享刷新信号
    on_refresh: Callback<()>,
) -> impl IntoView {
    let auth_ctx = use_auth();

    // 正在预订的车位 id；预订期间禁用所有 Book 按钮
    let (booking_spot_id, set_booking_spot_id) = signal(Option::<String>::None);

    let book_spot = move |spot_id: String| {
        let Some(api) = auth_ctx.api() else { return };

        let Some(vehicle) = web::prompt("Enter vehicle number (e.g., ABC-1234):") else {
            return;
        };
        if vehicle.trim().is_empty() {
            return;
        }

        set_booking_spot_id.set(Some(spot_id.clone()));
        let req = CreateBookingRequest {
            spot_id,
            vehicle_number: vehicle,
        };
        spawn_local(async move {
            match api.book_spot(&req).await {
                Ok(_) => {
                    on_refresh.run(());
                    web::alert("Spot booked successfully!");
                }
                Err(e) => {
                    web::alert(&format!("Error: {}", e));
                }
            }
            set_booking_spot_id.try_set(None);
        });
    };

    let available = move || spots.with(|s| s.iter().filter(|s| !s.occupied).count());
    let occupied = move || spots.with(|s| s.iter().filter(|s| s.occupied).count());

    view! {
        <div class="card bg-base-100 shadow-sm">
            <div class="card-body">
                <h2 class="card-title">"Parking Spots"</h2>

                <div class="flex gap-4 mb-2">
                    <span class="text-success font-bold text-sm">"Available: " {available}</span>
                    <span class="text-error font-bold text-sm">"Occupied: " {occupied}</span>
                </div>

                <Show when=move || spots.with(|s| s.is_empty())>
                    <div class="alert alert-info">
                        "No parking spots available. Add one to get started."
                    </div>
                </Show>

                <ul class="menu bg-base-100 w-full p-0">
                    <For
                        each=move || spots.get()
                        key=|spot| spot.id.clone()
                        children=move |spot| {
                            let spot_id = spot.id.clone();
                            let is_occupied = spot.occupied;
                            let in_flight = move || booking_spot_id.get().is_some();
                            // 仅被选中的车位按钮显示进行中文案
                            let is_booking_this = {
                                let spot_id = spot_id.clone();
                                move || booking_spot_id.get().as_deref() == Some(spot_id.as_str())
                            };
                            view! {
                                <li class="border-b border-base-200">
                                    <div class="flex justify-between items-center">
                                        <div>
                                            <span class="font-bold">{spot.number.clone()}</span>
                                            {if is_occupied {
                                                view! { <span class="badge badge-error ml-2">"Occupied"</span> }.into_any()
                                            } else {
                                                view! { <span class="badge badge-success ml-2">"Available"</span> }.into_any()
                                            }}
                                            <div class="text-sm text-base-content/60">{spot.location.clone()}</div>
                                        </div>
                                        <button
                                            class="btn btn-sm btn-primary"
                                            disabled=move || is_occupied || in_flight()
                                            on:click=move |_| book_spot(spot_id.clone())
                                        >
                                            {move || if is_booking_this() { "Booking..." } else { "Book" }}
                                        </button>
                                    </div>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
        </div>
    }
}
