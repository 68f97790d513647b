//! Stats Panel
//!
//! Total notifications, distinct apps and distinct keywords.

use leptos::*;

use crate::state::global::GlobalState;

#[component]
pub fn StatsPanel() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let stats = create_memo(move |_| state.view.with(|view| view.stats));

    view! {
        <div class="grid grid-cols-3 gap-4">
            <StatCard label="Notifications" value=Signal::derive(move || stats.get().total) />
            <StatCard label="Apps" value=Signal::derive(move || stats.get().distinct_apps) />
            <StatCard label="Keywords" value=Signal::derive(move || stats.get().distinct_keywords) />
        </div>
    }
}

#[component]
fn StatCard(label: &'static str, value: Signal<usize>) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700">
            <span class="text-gray-400 text-sm">{label}</span>
            <div class="text-3xl font-bold mt-2">{move || value.get()}</div>
        </div>
    }
}
