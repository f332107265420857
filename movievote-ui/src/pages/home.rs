use crate::components::{AddMovieForm, ErrorDisplay, MovieList, SiteHeader};
use crate::Document;
use leptos::prelude::*;
use movievote_app::application::HomeBoard;
use movievote_app::domain::User;
use movievote_app::infrastructure::security::{MOVIE_ID_FIELD, TITLE_FIELD};
use movievote_errors::FieldErrors;

#[component]
pub fn HomePage(viewer: Option<User>, board: HomeBoard, errors: FieldErrors) -> impl IntoView {
    let window_label = format!(
        "{} to {}",
        board.window.from.format("%b %-d"),
        board.window.to.format("%b %-d")
    );
    let vote_error = errors.get(MOVIE_ID_FIELD).map(str::to_string);
    let title_error = errors.get(TITLE_FIELD).map(str::to_string);
    let signed_in = viewer.is_some();

    let side_panel = if signed_in {
        view! { <AddMovieForm action="/" error=title_error/> }.into_any()
    } else {
        view! { <a href="/auth/login" class="login-link">"Log In"</a> }.into_any()
    };

    view! {
        <Document title="Movie Vote">
            <SiteHeader viewer=viewer/>
            <main class="board">
                <section class="board__main">
                    <h2 class="board__heading">"Top Voted Movie"</h2>
                    <p class="board__window">{window_label}</p>
                    {vote_error.map(|message| {
                        view! { <ErrorDisplay field=MOVIE_ID_FIELD message=message/> }
                    })}
                    <MovieList movies=board.weekly votable=true/>
                </section>
                <aside class="board__side">
                    {side_panel}
                    <h2 class="board__heading">"Recently Added Movies"</h2>
                    <MovieList movies=board.recent votable=true/>
                </aside>
            </main>
        </Document>
    }
}
