use leptos::prelude::*;

/// Inline message rendered next to the form field it belongs to.
#[component]
pub fn ErrorDisplay(#[prop(into)] field: String, #[prop(into)] message: String) -> impl IntoView {
    let id = format!("{field}-error");
    view! {
        <div class="error" id=id role="alert">
            {message}
        </div>
    }
}
