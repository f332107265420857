use crate::components::SiteHeader;
use crate::Document;
use leptos::prelude::*;
use movievote_app::domain::{Movie, User};

#[component]
pub fn MovieDetailPage(viewer: User, movie: Movie) -> impl IntoView {
    let added = movie.created_at.format("%Y-%m-%d %H:%M UTC").to_string();
    let delete_action = format!("/movies/{}/delete", movie.id);

    view! {
        <Document title="Movie">
            <SiteHeader viewer=Some(viewer)/>
            <main class="detail">
                <h2 class="detail__title">{movie.title}</h2>
                <p class="detail__meta">"Added " {added}</p>
                <form method="post" action=delete_action class="detail__delete">
                    <button type="submit" class="detail__button">"Delete"</button>
                </form>
                <a href="/movies" class="detail__back">"Back to movies"</a>
            </main>
        </Document>
    }
}
