//! Filter Bar
//!
//! Search box, app selector and the clear-all button.

use leptos::*;

use crate::state::global::GlobalState;
use crate::state::mutations::{clear_all, WindowConfirm};

#[component]
pub fn FilterBar() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let search_ref = create_node_ref::<html::Input>();
    let initial_term = state.filter_state().search_term;

    let run_search = move || {
        if let Some(input) = search_ref.get() {
            state.search(input.value());
        }
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" {
            run_search();
        }
    };

    let on_select = move |ev: ev::Event| state.select_app(event_target_value(&ev));

    let on_clear = move |_| spawn_local(clear_all(state, &WindowConfirm));

    let options = create_memo(move |_| state.view.with(|view| view.app_options.clone()));
    let selected = create_memo(move |_| state.view.with(|view| view.selected_app.clone()));

    view! {
        <div class="flex flex-wrap items-center gap-3">
            <input
                node_ref=search_ref
                type="text"
                placeholder="Search notifications..."
                value=initial_term
                on:keydown=on_keydown
                class="flex-1 min-w-[12rem] bg-gray-800 border border-gray-700 rounded-lg px-4 py-2"
            />
            <button
                on:click=move |_| run_search()
                class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Search"
            </button>

            // Options are keyed by app so existing entries are kept in place
            <select
                on:change=on_select
                prop:value=move || selected.get()
                class="bg-gray-800 border border-gray-700 rounded-lg px-4 py-2"
            >
                <option value="">"All apps"</option>
                <For
                    each=move || options.get()
                    key=|app| app.clone()
                    children=move |app: String| view! { <option value=app.clone()>{app}</option> }
                />
            </select>

            <button
                on:click=on_clear
                class="px-4 py-2 bg-red-600 hover:bg-red-700 rounded-lg font-medium transition-colors"
            >
                "Clear all"
            </button>
        </div>
    }
}
