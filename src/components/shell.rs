//! Authenticated layout: sidebar, top bar and page content.

use leptos::prelude::*;

use crate::components::sidebar::Sidebar;
use crate::components::user_menu::UserMenu;

#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="shell">
            <Sidebar/>
            <div class="shell__main">
                <header class="shell__topbar">
                    <span class="shell__spacer"></span>
                    <UserMenu/>
                </header>
                <main class="shell__content">{children()}</main>
            </div>
        </div>
    }
}
