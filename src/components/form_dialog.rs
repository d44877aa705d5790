//! Create/edit modal rendering a resource's field list.

use leptos::prelude::*;

use crate::components::field_input::FieldInput;
use crate::models::FieldSpec;
use crate::state::form::FormBuffer;

#[component]
pub fn FormDialog(
    title: String,
    fields: &'static [FieldSpec],
    #[prop(into)] form: Signal<FormBuffer>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into)] saving: Signal<bool>,
    on_input: Callback<(&'static str, String)>,
    on_submit: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let inputs = fields
        .iter()
        .map(|spec| {
            let key = spec.key;
            let value = Signal::derive(move || form.with(|f| f.get(key).to_owned()));
            view! {
                <FieldInput
                    spec=*spec
                    value=value
                    on_input=Callback::new(move |text| on_input.run((key, text)))
                />
            }
        })
        .collect_view();

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <form
                class="dialog dialog--form"
                on:click=move |ev| ev.stop_propagation()
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    on_submit.run(());
                }
            >
                <h2>{title}</h2>
                <div class="dialog__fields">{inputs}</div>
                {move || error.get().map(|message| view! { <p class="dialog__error">{message}</p> })}
                <div class="dialog__actions">
                    <button type="button" class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancelar"
                    </button>
                    <button type="submit" class="btn btn--primary" disabled=move || saving.get()>
                        {move || if saving.get() { "Guardando..." } else { "Guardar" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
