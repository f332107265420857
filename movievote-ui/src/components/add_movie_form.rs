use super::ErrorDisplay;
use leptos::prelude::*;

#[component]
pub fn AddMovieForm(
    /// Where the form posts to.
    #[prop(into)]
    action: String,
    error: Option<String>,
) -> impl IntoView {
    let invalid = error.as_ref().map(|_| "true");
    let error_ref = error.as_ref().map(|_| "title-error");

    view! {
        <form method="post" action=action class="add-movie">
            <label class="add-movie__label">
                <span>"Title: "</span>
                <input
                    name="title"
                    class="add-movie__input"
                    autofocus=error.is_some()
                    aria-invalid=invalid
                    aria-errormessage=error_ref
                />
            </label>
            {error.map(|message| view! { <ErrorDisplay field="title" message=message/> })}
            <div class="add-movie__actions">
                <button type="submit" class="add-movie__submit">"Save"</button>
            </div>
        </form>
    }
}
