//! Generic page for any [`Resource`]: filter bar, table and dialogs.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::crud::CrudPage;
use super::use_page_services;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::data_table::{DataTable, RowAction};
use crate::components::field_input::FieldInput;
use crate::components::form_dialog::FormDialog;
use crate::models::{RecordId, Resource};
use crate::state::crud::{CrudState, Dialog};

/// Page controller kept in the reactive owner of the mounted page.
pub type CrudHandle<R> = StoredValue<CrudPage<R, RwSignal<CrudState<R>>>, LocalStorage>;

/// Create the controller for `R`, fetch on mount and stop on unmount.
pub fn use_crud_page<R: Resource>() -> CrudHandle<R> {
    let state = RwSignal::new(CrudState::<R>::default());
    let page = CrudPage::new(use_page_services(), state);

    let mount = page.mount_flag().clone();
    on_cleanup(move || mount.unmount());

    let first = page.clone();
    spawn_local(async move { first.mount().await });
    StoredValue::new_local(page)
}

/// Run one of the controller's async operations in the background.
pub fn spawn_with<R, F, Fut>(page: CrudHandle<R>, op: F)
where
    R: Resource,
    F: FnOnce(CrudPage<R, RwSignal<CrudState<R>>>) -> Fut,
    Fut: Future + 'static,
{
    let page = page.get_value();
    let fut = op(page);
    spawn_local(async move {
        fut.await;
    });
}

#[component]
pub fn ResourcePage<R: Resource>(
    page: CrudHandle<R>,
    /// Refresh in the background on the configured interval.
    #[prop(optional)]
    poll: bool,
    #[prop(optional)] actions: Vec<RowAction<R>>,
    /// Extra panels rendered between the filters and the table.
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    let state = page.with_value(|p| *p.state());

    if poll {
        #[cfg(feature = "csr")]
        {
            let interval = crate::app::use_services().config.poll_interval;
            page.with_value(|p| p.spawn_poller(interval));
        }
    }

    let refresh = move |_| spawn_with(page, |p| async move { p.refresh().await });
    let open_create = move |_| page.with_value(CrudPage::open_create);
    let on_edit = Callback::new(move |id: RecordId| page.with_value(|p| p.open_edit(&id)));
    let on_delete = Callback::new(move |id: RecordId| page.with_value(|p| p.request_delete(&id)));

    let filters = R::filters();
    let filter_bar = (!filters.is_empty()).then(|| {
        let inputs = filters
            .iter()
            .map(|spec| {
                let key = spec.key;
                let value = Signal::derive(move || state.with(|s| s.filters.get(key).to_owned()));
                let on_input = Callback::new(move |text: String| {
                    page.with_value(|p| p.set_filter(key, text));
                    spawn_with(page, |p| async move { p.refresh().await });
                });
                view! { <FieldInput spec=*spec value=value on_input=on_input blank_label="Todos"/> }
            })
            .collect_view();
        view! {
            <div class="crud-page__filters">
                {inputs}
                <button class="btn" on:click=move |_| spawn_with(page, |p| async move { p.clear_filters().await })>
                    "Limpiar filtros"
                </button>
            </div>
        }
    });

    let dialog = Memo::new(move |_| state.with(|s| s.dialog.clone()));
    let dialog_view = move || match dialog.get() {
        Dialog::Closed => None,
        Dialog::ConfirmDelete(_) => Some(
            view! {
                <ConfirmDialog
                    title=format!("Eliminar {}", R::NOUN)
                    message="Esta acción no se puede deshacer.".to_owned()
                    on_confirm=Callback::new(move |()| {
                        spawn_with(page, |p| async move {
                            p.confirm_delete().await;
                        });
                    })
                    on_cancel=Callback::new(move |()| page.with_value(CrudPage::cancel_delete))
                />
            }
            .into_any(),
        ),
        open @ (Dialog::Create | Dialog::Edit(_)) => {
            let title = if open == Dialog::Create {
                format!("Nuevo {}", R::NOUN)
            } else {
                format!("Editar {}", R::NOUN)
            };
            Some(
                view! {
                    <FormDialog
                        title=title
                        fields=R::fields()
                        form=Signal::derive(move || state.with(|s| s.form.clone()))
                        error=Signal::derive(move || state.with(|s| s.form_error.clone()))
                        saving=Signal::derive(move || state.with(|s| s.saving))
                        on_input=Callback::new(move |(key, text): (&'static str, String)| {
                            page.with_value(|p| p.set_field(key, text));
                        })
                        on_submit=Callback::new(move |()| {
                            spawn_with(page, |p| async move {
                                p.submit().await;
                            });
                        })
                        on_cancel=Callback::new(move |()| page.with_value(CrudPage::close_dialog))
                    />
                }
                .into_any(),
            )
        }
    };

    view! {
        <section class="crud-page">
            <header class="crud-page__header">
                <h1>{R::TITLE}</h1>
                <div class="crud-page__tools">
                    <button class="btn" on:click=refresh>
                        "Actualizar"
                    </button>
                    <button class="btn btn--primary" on:click=open_create>
                        {format!("+ Nuevo {}", R::NOUN)}
                    </button>
                </div>
            </header>
            {filter_bar}
            {children.map(|panels| panels())}
            <DataTable state=state on_edit=on_edit on_delete=on_delete actions=actions/>
            {dialog_view}
        </section>
    }
}
