//! Console users, with a dedicated role-change dialog.

#[cfg(test)]
#[path = "usuarios_test.rs"]
mod usuarios_test;

use leptos::prelude::*;

use super::crud::CrudPage;
use super::resource::{ResourcePage, spawn_with, use_crud_page};
use crate::components::data_table::RowAction;
use crate::models::RecordId;
use crate::models::usuario::{ROLES, Usuario};
use crate::state::StateHandle;
use crate::state::crud::CrudState;
use crate::state::notify::Severity;

pub const ROL_ACTUALIZADO_MESSAGE: &str = "Rol actualizado";

/// Assign `rol` to user `id`, then refetch the list.
pub async fn cambiar_rol<H>(page: &CrudPage<Usuario, H>, id: &RecordId, rol: &str) -> bool
where
    H: StateHandle<CrudState<Usuario>>,
{
    if rol.trim().is_empty() {
        page.services().notify(Severity::Error, "Selecciona un rol");
        return false;
    }
    let result = page.services().api.cambiar_rol(id, rol).await;
    if !page.mount_flag().is_mounted() {
        return false;
    }
    match result {
        Ok(()) => {
            page.services().notify(Severity::Success, ROL_ACTUALIZADO_MESSAGE);
            page.refresh().await;
            true
        }
        Err(e) => {
            page.services().report(&e);
            false
        }
    }
}

#[component]
pub fn UsuariosPage() -> impl IntoView {
    let page = use_crud_page::<Usuario>();
    // (user id, selected role) while the role dialog is open.
    let editing = RwSignal::new(None::<(RecordId, String)>);

    let actions = vec![RowAction::new("Cambiar rol", move |usuario: Usuario| {
        editing.set(Some((usuario.id.clone(), usuario.rol.clone())));
    })];

    let save = move |_| {
        let Some((id, rol)) = editing.get_untracked() else {
            return;
        };
        spawn_with(page, |p| async move {
            if cambiar_rol(&p, &id, &rol).await {
                let _ = editing.try_set(None);
            }
        });
    };

    view! {
        <ResourcePage page=page actions=actions>
            <Show when=move || editing.with(Option::is_some)>
                <div class="dialog-backdrop" on:click=move |_| editing.set(None)>
                    <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                        <h2>"Cambiar rol"</h2>
                        <select
                            class="field__input"
                            prop:value=move || editing.with(|e| e.as_ref().map(|(_, rol)| rol.clone()).unwrap_or_default())
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                editing.update(|e| {
                                    if let Some((_, rol)) = e {
                                        *rol = value;
                                    }
                                });
                            }
                        >
                            <option value="">"Seleccionar..."</option>
                            {ROLES
                                .iter()
                                .map(|(raw, label)| view! { <option value=*raw>{*label}</option> })
                                .collect_view()}
                        </select>
                        <div class="dialog__actions">
                            <button class="btn" on:click=move |_| editing.set(None)>
                                "Cancelar"
                            </button>
                            <button class="btn btn--primary" on:click=save>
                                "Guardar"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </ResourcePage>
    }
}
