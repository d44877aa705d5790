//! One labelled form control, rendered from a [`FieldSpec`].

use leptos::prelude::*;

use crate::models::{FieldKind, FieldSpec};

/// Input for `spec`. Every kind reports its value as text; checkboxes
/// report `"true"` / `"false"`.
#[component]
pub fn FieldInput(
    spec: FieldSpec,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    /// Text of the empty option in selects.
    #[prop(default = "Seleccionar...")]
    blank_label: &'static str,
) -> impl IntoView {
    let input = move |ev: leptos::ev::Event| on_input.run(event_target_value(&ev));
    let required = spec.required;

    let control = match spec.kind {
        FieldKind::LongText => view! {
            <textarea class="field__input field__input--long" prop:value=value on:input=input></textarea>
        }
        .into_any(),
        FieldKind::Select(options) => view! {
            <select class="field__input" prop:value=value on:change=input>
                <option value="">{blank_label}</option>
                {options
                    .iter()
                    .map(|(raw, label)| view! { <option value=*raw>{*label}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
        FieldKind::Flag => view! {
            <input
                class="field__checkbox"
                type="checkbox"
                prop:checked=move || value.get() == "true"
                on:change=move |ev| on_input.run(event_target_checked(&ev).to_string())
            />
        }
        .into_any(),
        kind => {
            let (input_type, step) = match kind {
                FieldKind::Secret => ("password", None),
                FieldKind::Number => ("number", Some("any")),
                FieldKind::Date => ("date", None),
                FieldKind::Time => ("time", None),
                _ => ("text", None),
            };
            view! {
                <input
                    class="field__input"
                    type=input_type
                    step=step
                    required=required
                    prop:value=value
                    on:input=input
                />
            }
            .into_any()
        }
    };

    view! {
        <label class="field" class:field--required=required>
            <span class="field__label">{spec.label}</span>
            {control}
        </label>
    }
}
