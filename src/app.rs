//! Root application component with routing and context providers.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::shell::Shell;
use crate::components::toasts::Toasts;
use crate::config::AppConfig;
use crate::net::api::ApiClient;
use crate::net::http::Transport;
use crate::net::live_feed::LiveFeed;
use crate::pages::{
    alimentos::AlimentosPage,
    animales::AnimalesPage,
    clinico::ClinicoPage,
    dashboard::DashboardPage,
    dietas::DietasPage,
    empleados::EmpleadosPage,
    entradas::EntradasPage,
    limpieza::LimpiezaPage,
    login::LoginPage,
    rrhh::{BonosPage, DescuentosPage, InasistenciasPage, VacacionesPage},
    usuarios::UsuariosPage,
};
use crate::session::Session;
use crate::state::notify::Notices;
use crate::util::route::{RouteAccess, login_access, protected_access};

/// Long-lived collaborators shared by every page. Clones share state.
#[derive(Clone, Debug)]
pub struct AppServices {
    pub config: AppConfig,
    pub session: Session,
    pub api: ApiClient,
    pub feed: LiveFeed,
}

impl AppServices {
    pub fn new(config: AppConfig, session: Session, transport: Rc<dyn Transport>) -> Self {
        let api = ApiClient::new(&config.api_url, session.clone(), transport);
        let feed = LiveFeed::new(config.socket_url.clone());
        Self { config, session, api, feed }
    }

    /// Services over `localStorage`, `fetch` and the build-time config.
    #[cfg(feature = "csr")]
    pub fn browser() -> Self {
        let config = AppConfig::from_build_env();
        log::info!("api at {}, push channel at {}", config.api_url, config.socket_url);
        Self::new(config, Session::browser(), Rc::new(crate::net::http::FetchTransport))
    }
}

/// Put `services` and the toast list in context for the whole tree.
pub fn provide_services(services: AppServices) {
    provide_context(StoredValue::new_local(services));
    provide_context(RwSignal::new(Notices::default()));
}

/// Services provided by [`provide_services`].
pub fn use_services() -> AppServices {
    expect_context::<StoredValue<AppServices, LocalStorage>>().get_value()
}

/// Browser entry component.
#[cfg(feature = "csr")]
#[component]
pub fn App() -> impl IntoView {
    provide_services(AppServices::browser());
    view! { <AppShell/> }
}

/// Meta tags, router and toasts. Expects [`provide_services`] to have run.
#[component]
pub fn AppShell() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/jungle-console.css"/>
        <Title text="Jungle Planet"/>

        <Router>
            <Routes fallback=|| "Página no encontrada.".into_view()>
                <Route path=StaticSegment("login") view=PublicLogin/>
                <Route path=StaticSegment("") view=|| view! { <Protected><DashboardPage/></Protected> }/>
                <Route path=StaticSegment("animales") view=|| view! { <Protected><AnimalesPage/></Protected> }/>
                <Route path=StaticSegment("alimentos") view=|| view! { <Protected><AlimentosPage/></Protected> }/>
                <Route path=StaticSegment("dietas") view=|| view! { <Protected><DietasPage/></Protected> }/>
                <Route path=StaticSegment("clinico") view=|| view! { <Protected><ClinicoPage/></Protected> }/>
                <Route path=StaticSegment("limpieza") view=|| view! { <Protected><LimpiezaPage/></Protected> }/>
                <Route path=StaticSegment("entradas") view=|| view! { <Protected><EntradasPage/></Protected> }/>
                <Route path=StaticSegment("empleados") view=|| view! { <Protected><EmpleadosPage/></Protected> }/>
                <Route
                    path=(StaticSegment("rrhh"), StaticSegment("vacaciones"))
                    view=|| view! { <Protected><VacacionesPage/></Protected> }
                />
                <Route
                    path=(StaticSegment("rrhh"), StaticSegment("inasistencias"))
                    view=|| view! { <Protected><InasistenciasPage/></Protected> }
                />
                <Route
                    path=(StaticSegment("rrhh"), StaticSegment("descuentos"))
                    view=|| view! { <Protected><DescuentosPage/></Protected> }
                />
                <Route
                    path=(StaticSegment("rrhh"), StaticSegment("bonos"))
                    view=|| view! { <Protected><BonosPage/></Protected> }
                />
                <Route path=StaticSegment("usuarios") view=|| view! { <Protected><UsuariosPage/></Protected> }/>
            </Routes>
            <Toasts/>
        </Router>
    }
}

/// Route guard: the shell and `children` with a session, else `/login`.
#[component]
fn Protected(children: ChildrenFn) -> impl IntoView {
    match protected_access(&use_services().session) {
        RouteAccess::Render => view! { <Shell>{children()}</Shell> }.into_any(),
        RouteAccess::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
    }
}

#[component]
fn PublicLogin() -> impl IntoView {
    match login_access(&use_services().session) {
        RouteAccess::Render => view! { <LoginPage/> }.into_any(),
        RouteAccess::Redirect(path) => view! { <Redirect path=path/> }.into_any(),
    }
}
