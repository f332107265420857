use leptos::prelude::*;
use movievote_app::domain::MovieListItem;

/// Numbered movie list. With `votable` each row gets a heart button that
/// posts to `/vote`; the heart is filled when the viewer has voted.
#[component]
pub fn MovieList(
    movies: Vec<MovieListItem>,
    #[prop(optional)] votable: bool,
    #[prop(optional)] linked: bool,
) -> impl IntoView {
    if movies.is_empty() {
        return view! { <p class="movie-list__empty">"No movies yet"</p> }.into_any();
    }

    view! {
        <ol class="movie-list">
            {movies
                .into_iter()
                .map(|movie| view! { <MovieRow movie=movie votable=votable linked=linked/> })
                .collect_view()}
        </ol>
    }
    .into_any()
}

#[component]
fn MovieRow(movie: MovieListItem, votable: bool, linked: bool) -> impl IntoView {
    let heart = if movie.viewer_has_voted() { "💖" } else { "🤍" };
    let label = if movie.viewer_has_voted() { "Remove vote" } else { "Vote" };
    let movie_id = movie.id.to_string();
    let votes = match movie.vote_count {
        1 => "1 vote".to_string(),
        n => format!("{n} votes"),
    };

    let title = if linked {
        let href = format!("/movies/{}", movie.id);
        view! { <a href=href class="movie-list__title">{movie.title}</a> }.into_any()
    } else {
        view! { <span class="movie-list__title">{movie.title}</span> }.into_any()
    };

    view! {
        <li class="movie-list__item">
            {title}
            <span class="movie-list__votes">{votes}</span>
            {votable.then(|| view! {
                <form method="post" action="/vote" class="movie-list__vote">
                    <input type="hidden" name="movieId" value=movie_id/>
                    <button type="submit" class="movie-list__heart" aria-label=label>
                        {heart}
                    </button>
                </form>
            })}
        </li>
    }
}
