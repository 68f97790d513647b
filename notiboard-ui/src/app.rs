//! App Root Component
//!
//! Single-page dashboard with global providers.

use leptos::*;

use crate::api;
use crate::components::loading::InlineLoading;
use crate::components::{AppChart, FilterBar, NotificationList, StatsPanel, Toast};
use crate::state::global::{provide_global_state, GlobalState};
use crate::state::sync::start_polling;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_global_state();
    start_polling(state);

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            <header class="bg-gray-800 border-b border-gray-700 py-4 px-4">
                <h1 class="container mx-auto text-2xl font-bold">"Notifications"</h1>
            </header>

            <main class="flex-1 container mx-auto px-4 py-8 pb-24 space-y-8">
                <StatsPanel />

                <section class="bg-gray-800 rounded-xl p-6">
                    <AppChart />
                </section>

                <section class="space-y-4">
                    <FilterBar />
                    <NotificationList />
                </section>
            </main>

            <Footer />

            <Toast />
        </div>
    }
}

/// Footer showing the backend and the last sync
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let backend = match api::get_api_base() {
        base if base.is_empty() => "same origin".to_string(),
        base => base,
    };

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                <div class="text-gray-400">{format!("Backend: {}", backend)}</div>

                <div class="text-gray-400">
                    {move || {
                        state.last_sync.get()
                            .and_then(chrono::DateTime::from_timestamp_millis)
                            .map(|dt| format!("Last update: {}", dt.format("%H:%M:%S")))
                            .unwrap_or_else(|| "Not synced".to_string())
                    }}
                </div>

                {move || state.is_loading().then(|| view! { <InlineLoading /> })}
            </div>
        </footer>
    }
}
