use crate::components::{AddMovieForm, MovieList, SiteHeader};
use crate::Document;
use leptos::prelude::*;
use movievote_app::domain::{MovieListItem, User};
use movievote_app::infrastructure::security::TITLE_FIELD;
use movievote_errors::FieldErrors;

/// Every movie ranked by votes, with the add-movie form in the side outlet.
#[component]
pub fn MoviesPage(viewer: User, movies: Vec<MovieListItem>, errors: FieldErrors) -> impl IntoView {
    let title_error = errors.get(TITLE_FIELD).map(str::to_string);

    view! {
        <Document title="Movies">
            <SiteHeader viewer=Some(viewer)/>
            <main class="board">
                <section class="board__main">
                    <h2 class="board__heading">"Top Voted Movie"</h2>
                    <MovieList movies=movies linked=true/>
                </section>
                <aside class="board__side">
                    <AddMovieForm action="/movies" error=title_error/>
                </aside>
            </main>
        </Document>
    }
}
