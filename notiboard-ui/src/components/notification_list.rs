//! Notification List
//!
//! One card per rendered notification. Delete buttons carry the card
//! handle and resolve the id through the dashboard.

use leptos::*;
use notiboard::render::EMPTY_PLACEHOLDER;
use notiboard::{Card, RenderedList};

use crate::components::Loading;
use crate::state::global::GlobalState;
use crate::state::mutations::{delete_card, WindowConfirm};

#[component]
pub fn NotificationList() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="space-y-3">
            {move || state.view.with(|current| match &current.list {
                RenderedList::NotLoaded => view! { <Loading /> }.into_view(),
                RenderedList::Placeholder => view! {
                    <p class="text-gray-400 text-center py-8">{EMPTY_PLACEHOLDER}</p>
                }.into_view(),
                RenderedList::Cards(cards) => cards
                    .iter()
                    .cloned()
                    .map(|card| view! { <NotificationCard card=card /> })
                    .collect_view(),
            })}
        </div>
    }
}

#[component]
fn NotificationCard(card: Card) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let handle = card.handle;

    let on_delete = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        spawn_local(delete_card(state, handle, &WindowConfirm));
    };

    view! {
        <article class="bg-gray-800 rounded-lg p-4 border border-gray-700">
            <header class="flex items-center justify-between">
                <span class="font-semibold">{card.app}</span>
                <div class="flex items-center space-x-3">
                    <span class="text-gray-400 text-sm">{card.timestamp}</span>
                    <button
                        title="Remove notification"
                        on:click=on_delete
                        class="text-gray-400 hover:text-red-400 transition-colors"
                    >
                        "✕"
                    </button>
                </div>
            </header>

            {card.keyword.map(|keyword| view! {
                <span class="inline-block mt-2 px-2 py-0.5 text-xs rounded bg-yellow-600">{keyword}</span>
            })}

            <div class="mt-2 text-sm break-words" inner_html=card.content_html />
        </article>
    }
}
