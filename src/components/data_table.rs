//! Resource table: one row per listed record plus edit/delete buttons.

use leptos::prelude::*;

use crate::models::{RecordId, Resource};
use crate::state::crud::CrudState;

/// Extra per-row button, e.g. "Ejecutar" on feeding schedules.
pub struct RowAction<R: 'static> {
    pub label: &'static str,
    pub on_click: Callback<R>,
}

impl<R: 'static> Clone for RowAction<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: 'static> Copy for RowAction<R> {}

impl<R: 'static> RowAction<R> {
    pub fn new(label: &'static str, on_click: impl Fn(R) + Send + Sync + 'static) -> Self {
        Self { label, on_click: Callback::new(on_click) }
    }
}

#[component]
pub fn DataTable<R: Resource>(
    state: RwSignal<CrudState<R>>,
    on_edit: Callback<RecordId>,
    on_delete: Callback<RecordId>,
    #[prop(optional)] actions: Vec<RowAction<R>>,
) -> impl IntoView {
    let listing = Memo::new(move |_| state.with(|s| (s.items.clone(), s.loading, s.loaded)));

    move || {
        let (items, loading, loaded) = listing.get();
        if loading && !loaded {
            return view! { <p class="crud__empty">"Cargando..."</p> }.into_any();
        }
        if items.is_empty() {
            return view! { <p class="crud__empty">"No hay registros"</p> }.into_any();
        }

        let columns = R::columns();
        let header = columns.iter().map(|c| view! { <th>{c.header}</th> }).collect_view();
        let rows = items
            .into_iter()
            .map(|item| {
                let cells = columns.iter().map(|c| view! { <td>{(c.cell)(&item)}</td> }).collect_view();
                let extra = actions
                    .iter()
                    .map(|action| {
                        let action = *action;
                        let record = item.clone();
                        view! {
                            <button class="btn btn--small" on:click=move |_| action.on_click.run(record.clone())>
                                {action.label}
                            </button>
                        }
                    })
                    .collect_view();
                let edit_id = item.id().clone();
                let delete_id = item.id().clone();
                view! {
                    <tr>
                        {cells}
                        <td class="crud-table__actions">
                            {extra}
                            <button class="btn btn--small" on:click=move |_| on_edit.run(edit_id.clone())>
                                "Editar"
                            </button>
                            <button
                                class="btn btn--small btn--danger"
                                on:click=move |_| on_delete.run(delete_id.clone())
                            >
                                "Eliminar"
                            </button>
                        </td>
                    </tr>
                }
            })
            .collect_view();

        view! {
            <table class="crud-table" class:crud-table--refreshing=loading>
                <thead>
                    <tr>
                        {header}
                        <th>"Acciones"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        }
        .into_any()
    }
}
