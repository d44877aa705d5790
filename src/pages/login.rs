//! Sign-in form and the session entry/exit operations.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{PageServices, use_page_services};
use crate::error::{ApiError, INVALID_RESPONSE_MESSAGE};
use crate::state::notify::Severity;
use crate::util::route::{HOME_PATH, LOGIN_PATH};

pub const MISSING_CREDENTIALS_MESSAGE: &str = "Ingresa tu email y contraseña";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Credenciales inválidas";
pub const SIGNED_OUT_MESSAGE: &str = "Sesión cerrada";

fn login_failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { status: 401, message: None } => INVALID_CREDENTIALS_MESSAGE.to_owned(),
        other => other.user_message(),
    }
}

/// Exchange credentials for a session and go to the dashboard.
///
/// # Errors
///
/// Returns the message to show under the form. Nothing is stored on failure.
pub async fn sign_in(services: &PageServices, email: &str, password: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_CREDENTIALS_MESSAGE.to_owned());
    }

    let data = services.api.login(email, password).await.map_err(|e| {
        log::warn!("login failed: {e}");
        login_failure_message(&e)
    })?;
    let Some(token) = data.token else {
        return Err(INVALID_RESPONSE_MESSAGE.to_owned());
    };

    let session = services.api.session();
    session.set_token(&token);
    let profile = match data.user {
        Some(user) => Some(user),
        None => services
            .api
            .me()
            .await
            .map_err(|e| log::warn!("profile lookup after login failed: {e}"))
            .ok(),
    };
    if let Some(profile) = &profile {
        session.store_profile(profile);
    }

    let name = profile
        .map(|p| p.nombre)
        .filter(|n| !n.is_empty())
        .or_else(|| session.current_user().map(|u| u.nombre))
        .unwrap_or_default();
    let greeting = if name.is_empty() { "Bienvenido".to_owned() } else { format!("Bienvenido, {name}") };
    services.notify(Severity::Success, greeting);
    services.navigator.navigate(HOME_PATH);
    Ok(())
}

/// Forget the session and return to the login page.
pub fn sign_out(services: &PageServices) {
    services.api.session().clear();
    services.notify(Severity::Info, SIGNED_OUT_MESSAGE);
    services.navigator.navigate(LOGIN_PATH);
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let services = StoredValue::new_local(use_page_services());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        error.set(None);
        let services = services.get_value();
        let (email, password) = (email.get_untracked(), password.get_untracked());
        spawn_local(async move {
            let outcome = sign_in(&services, &email, &password).await;
            let _ = busy.try_set(false);
            if let Err(message) = outcome {
                let _ = error.try_set(Some(message));
            }
        });
    };

    view! {
        <div class="login-page">
            <form class="login-card" on:submit=submit>
                <h1>"Jungle Planet"</h1>
                <p>"Consola de administración"</p>
                <label class="field">
                    <span class="field__label">"Email"</span>
                    <input
                        class="field__input"
                        type="email"
                        autocomplete="username"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span class="field__label">"Contraseña"</span>
                    <input
                        class="field__input"
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                {move || error.get().map(|message| view! { <p class="login-card__error">{message}</p> })}
                <button type="submit" class="btn btn--primary login-button" disabled=move || busy.get()>
                    {move || if busy.get() { "Ingresando..." } else { "Ingresar" }}
                </button>
            </form>
        </div>
    }
}
