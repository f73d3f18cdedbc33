// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Signwerk: local document e-signature desktop app
//
// Entry point. Initialises logging, services, app state, and launches the
// Dioxus UI.

mod components;
mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use components::marketing::Navigation;
use components::toasts::Toasts;
use pages::home::Home;
use pages::settings::Settings;
use pages::sign::Sign;

use services::app_services::AppServices;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Signwerk starting");

    dioxus::launch(app);
}

/// Top-level route enum.
#[derive(Debug, Clone, Routable, PartialEq)]
enum Route {
    #[layout(Shell)]
    #[route("/")]
    Home {},
    #[route("/sign")]
    Sign {},
    #[route("/settings")]
    Settings {},
}

/// Root component.
fn app() -> Element {
    let svc = use_hook(AppServices::init);

    use_context_provider(|| svc.clone());
    use_context_provider(|| Signal::new(state::AppState::new(&svc)));

    rsx! {
        Router::<Route> {}
    }
}

/// Persistent layout: top navigation, the page, and the toast stack.
#[component]
fn Shell() -> Element {
    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; height: 100vh; font-family: system-ui, -apple-system, sans-serif; color: #0f172a; background: #ffffff;",

            Navigation {}

            div { class: "page-content",
                style: "flex: 1; overflow-y: auto;",
                Outlet::<Route> {}
            }

            Toasts {}
        }
    }
}
