//! Navigation sidebar, grouped by section and filtered by role hint.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::app::use_services;
use crate::state::nav::{NavItem, NavSection, active_item, visible_items};

const SECTIONS: [NavSection; 4] = [
    NavSection::General,
    NavSection::Operaciones,
    NavSection::Personal,
    NavSection::Administracion,
];

#[component]
pub fn Sidebar() -> impl IntoView {
    let role = use_services().session.user_role();
    let items = visible_items(role.as_ref());
    let pathname = use_location().pathname;
    let active = Memo::new(move |_| active_item(&pathname.get()).map(|item| item.path));

    let sections = SECTIONS
        .iter()
        .filter_map(|section| {
            let entries: Vec<&'static NavItem> = items.iter().copied().filter(|i| i.section == *section).collect();
            if entries.is_empty() {
                return None;
            }
            Some(view! {
                <div class="sidebar__section">
                    <h3 class="sidebar__heading">{section.label()}</h3>
                    {entries
                        .into_iter()
                        .map(|item| {
                            let path = item.path;
                            view! {
                                <a
                                    href=path
                                    class="sidebar__link"
                                    class:sidebar__link--active=move || active.get() == Some(path)
                                >
                                    {item.label}
                                </a>
                            }
                        })
                        .collect_view()}
                </div>
            })
        })
        .collect_view();

    view! {
        <nav class="sidebar">
            <div class="sidebar__brand">"Jungle Planet"</div>
            {sections}
        </nav>
    }
}
