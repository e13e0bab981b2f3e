//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{ParentRoute, Route, Router, Routes},
};

use crate::config::ClientConfig;
use crate::net::chat_client::ChatClient;
use crate::pages::chat::ChatPage;
use crate::state::{auth::AuthState, chat::ChatState, sessions::SessionsState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared chat contexts, seeds the identity from configuration,
/// and sets up client-side routing. A host sign-in flow replaces the
/// identity by writing the `RwSignal<AuthState>` context.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let auth = RwSignal::new(AuthState::from_user_id(config.user_id.as_deref()));
    let chat = RwSignal::new(ChatState::default());
    let sessions = RwSignal::new(SessionsState::default());
    let client = ChatClient::new(config, auth, chat, sessions);

    provide_context(auth);
    provide_context(chat);
    provide_context(sessions);
    provide_context(client);

    view! {
        <Stylesheet id="leptos" href="/pkg/dora-chat.css"/>
        <Title text="Chat"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <ParentRoute path=StaticSegment("") view=ChatPage>
                    <Route path=StaticSegment("") view=|| ()/>
                    <Route path=(StaticSegment("chat"), ParamSegment("id")) view=|| ()/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}
