//! Mutation feedback
//!
//! Delete and clear report back here: a short-lived confirmation when the
//! backend accepted the change, or an alert that stays until it times out
//! or is dismissed when the request failed.

use leptos::*;

use crate::state::global::GlobalState;

/// Outcome banners in the bottom-right corner
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="fixed bottom-20 right-4 z-50 flex flex-col items-end gap-2">
            {move || state.success.get().map(|text| view! {
                <Banner text=text tone=Tone::Done on_dismiss=state.success />
            })}
            {move || state.error.get().map(|text| view! {
                <Banner text=text tone=Tone::Failed on_dismiss=state.error />
            })}
        </div>
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tone {
    Done,
    Failed,
}

impl Tone {
    fn role(self) -> &'static str {
        match self {
            Tone::Done => "status",
            Tone::Failed => "alert",
        }
    }

    fn classes(self) -> &'static str {
        match self {
            Tone::Done => "border-emerald-500 bg-gray-800 text-emerald-200",
            Tone::Failed => "border-rose-500 bg-rose-950 text-rose-100",
        }
    }
}

#[component]
fn Banner(text: String, tone: Tone, on_dismiss: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <div
            role=tone.role()
            class=format!("max-w-sm border-l-4 px-4 py-2 rounded shadow text-sm {}", tone.classes())
        >
            <span class="whitespace-pre-line">{text}</span>
            {(tone == Tone::Failed).then(|| view! {
                <button
                    class="ml-3 text-xs underline opacity-75 hover:opacity-100"
                    on:click=move |_| on_dismiss.set(None)
                >
                    "Dismiss"
                </button>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_are_announced_as_alerts() {
        assert_eq!(Tone::Failed.role(), "alert");
        assert_eq!(Tone::Done.role(), "status");
        assert_ne!(Tone::Failed.classes(), Tone::Done.classes());
    }
}
