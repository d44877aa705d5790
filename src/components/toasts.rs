//! Toast stack fed by the shared [`Notices`] signal.

use leptos::prelude::*;

use crate::state::notify::Notices;

/// How long a toast stays up before it dismisses itself.
#[cfg(feature = "csr")]
const TOAST_TTL_MS: u32 = 4_000;

#[component]
pub fn Toasts() -> impl IntoView {
    let notices = expect_context::<RwSignal<Notices>>();

    #[cfg(feature = "csr")]
    {
        let last_id = Memo::new(move |_| notices.with(Notices::last_id));
        Effect::new(move |seen: Option<u64>| {
            let newest = last_id.get();
            for id in notices.with_untracked(|n| n.shown_since(seen.unwrap_or(0))) {
                leptos::task::spawn_local(async move {
                    gloo_timers::future::TimeoutFuture::new(TOAST_TTL_MS).await;
                    let _ = notices.try_update(|n| n.dismiss(id));
                });
            }
            newest
        });
    }

    view! {
        <div class="toasts" role="status">
            {move || {
                notices
                    .get()
                    .items()
                    .iter()
                    .map(|notice| {
                        let id = notice.id;
                        view! {
                            <div class=notice.severity.css_class()>
                                <span class="toast__message">{notice.message.clone()}</span>
                                <button
                                    class="toast__close"
                                    title="Cerrar"
                                    on:click=move |_| notices.update(|n| n.dismiss(id))
                                >
                                    "\u{00D7}"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
