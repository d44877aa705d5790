//! Signed-in user's name and role, with the logout button.

#[cfg(test)]
#[path = "user_menu_test.rs"]
mod user_menu_test;

use leptos::prelude::*;

use crate::app::use_services;
use crate::pages::login::sign_out;
use crate::pages::use_page_services;
use crate::session::claims::DEFAULT_DISPLAY_NAME;
use crate::session::{RoleKind, Session};

/// Name and role label: the stored profile when present, else the token claims.
pub(crate) fn identity_labels(session: &Session) -> (String, String) {
    if let Some(profile) = session.profile().filter(|p| !p.nombre.is_empty()) {
        return (profile.nombre, RoleKind::parse(&profile.rol).label().to_owned());
    }
    match session.current_user() {
        Some(user) => {
            let role = user.rol.map(|r| r.kind().label()).unwrap_or_default();
            (user.nombre, role.to_owned())
        }
        None => (DEFAULT_DISPLAY_NAME.to_owned(), String::new()),
    }
}

#[component]
pub fn UserMenu() -> impl IntoView {
    let (name, role) = identity_labels(&use_services().session);
    let services = StoredValue::new_local(use_page_services());
    let open = RwSignal::new(false);

    view! {
        <div class="user-menu">
            <button class="user-menu__trigger" on:click=move |_| open.update(|o| *o = !*o)>
                <span class="user-menu__name">{name}</span>
                <span class="user-menu__role">{role}</span>
            </button>
            <Show when=move || open.get()>
                <div class="user-menu__dropdown">
                    <button
                        class="user-menu__item"
                        on:click=move |_| {
                            open.set(false);
                            services.with_value(sign_out);
                        }
                    >
                        "Cerrar sesión"
                    </button>
                </div>
            </Show>
        </div>
    }
}
