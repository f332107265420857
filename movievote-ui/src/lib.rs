pub mod components;
pub mod pages;

use leptos::prelude::*;
use movievote_app::application::HomeBoard;
use movievote_app::domain::{Movie, MovieListItem, User};
use movievote_errors::FieldErrors;

use pages::{HomePage, MovieDetailPage, MoviesPage};

#[component]
pub fn Document(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <title>{title}</title>
                <style>{CSS}</style>
            </head>
            <body>{children()}</body>
        </html>
    }
}

/// Renders a page component to a complete HTML document.
fn render<V, F>(page: F) -> String
where
    V: IntoView,
    F: FnOnce() -> V,
{
    let owner = Owner::new();
    let html = owner.with(|| page().to_html());
    format!("<!DOCTYPE html>{html}")
}

pub fn render_home(viewer: Option<User>, board: HomeBoard, errors: FieldErrors) -> String {
    render(move || view! { <HomePage viewer=viewer board=board errors=errors/> })
}

pub fn render_movies(viewer: User, movies: Vec<MovieListItem>, errors: FieldErrors) -> String {
    render(move || view! { <MoviesPage viewer=viewer movies=movies errors=errors/> })
}

pub fn render_movie_detail(viewer: User, movie: Movie) -> String {
    render(move || view! { <MovieDetailPage viewer=viewer movie=movie/> })
}

// Rendered as escaped text, so the rules avoid `>` and `&`.
const CSS: &str = r#"
:root {
    --base: #faf4ed;
    --surface: #fffaf3;
    --overlay: #f2e9e1;
    --muted: #9893a5;
    --subtle: #797593;
    --text: #575279;
    --love: #b4637a;
    --pine: #286983;
}
* { box-sizing: border-box; margin: 0; padding: 0; }
body { font-family: 'Inter', -apple-system, sans-serif; background: var(--base); color: var(--text); min-height: 100vh; }
a { color: var(--pine); }
.header { display: flex; align-items: center; justify-content: space-between; padding: 1rem 1.5rem; background: var(--pine); color: var(--base); }
.header__title { font-size: 1.6rem; font-weight: 800; }
.header__nav { display: flex; align-items: center; gap: 1rem; }
.header__link, .header__email { color: var(--base); }
.header__button { padding: 0.5rem 1rem; border: none; border-radius: 6px; background: var(--love); color: var(--base); cursor: pointer; }
.board { display: flex; gap: 1.5rem; padding: 1.5rem; }
.board__main { flex: 2; background: var(--surface); border: 2px solid var(--overlay); border-radius: 12px; padding: 1rem; }
.board__side { flex: 1; display: flex; flex-direction: column; gap: 1rem; }
.board__heading { color: var(--love); font-size: 1.2rem; margin-bottom: 0.5rem; }
.board__window { color: var(--muted); font-size: 0.9rem; margin-bottom: 0.75rem; }
.movie-list { list-style: decimal inside; }
.movie-list__item { display: flex; align-items: center; gap: 0.75rem; padding: 0.75rem 0; border-bottom: 1px solid var(--overlay); font-size: 1.1rem; }
.movie-list__title { flex: 1; }
.movie-list__votes { color: var(--subtle); font-size: 0.9rem; }
.movie-list__heart { background: none; border: none; font-size: 1.2rem; cursor: pointer; }
.movie-list__empty { color: var(--muted); padding: 1rem 0; }
.add-movie { display: flex; flex-direction: column; gap: 0.5rem; }
.add-movie__label { display: flex; flex-direction: column; gap: 0.25rem; }
.add-movie__input { padding: 0.5rem 0.75rem; border: 2px solid var(--pine); border-radius: 6px; font-size: 1rem; }
.add-movie__actions { text-align: right; }
.add-movie__submit { padding: 0.5rem 1rem; border: none; border-radius: 6px; background: var(--pine); color: var(--base); cursor: pointer; }
.login-link { display: block; text-align: center; padding: 0.75rem 1rem; border-radius: 6px; background: var(--love); color: var(--base); text-decoration: none; font-weight: 600; }
.error { color: var(--love); padding-top: 0.25rem; }
.detail { max-width: 640px; margin: 2rem auto; padding: 1.5rem; background: var(--surface); border-radius: 12px; }
.detail__title { font-size: 1.6rem; margin-bottom: 0.5rem; }
.detail__meta { color: var(--muted); margin-bottom: 1rem; }
.detail__button { padding: 0.5rem 1rem; border: none; border-radius: 6px; background: var(--love); color: var(--base); cursor: pointer; }
.detail__back { display: inline-block; margin-top: 1rem; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use movievote_app::domain::{Vote, WeekPolicy, WeekWindow};
    use uuid::Uuid;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            google_id: "g-1".to_string(),
            email: "ana@example.com".to_string(),
            name: "Ana".to_string(),
            avatar_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn item(title: &str, vote_count: i64, voted_by: Option<Uuid>) -> MovieListItem {
        let id = Uuid::new_v4();
        MovieListItem {
            id,
            title: title.to_string(),
            user_id: Uuid::new_v4(),
            updated_at: Utc.with_ymd_and_hms(2024, 6, 11, 9, 0, 0).unwrap(),
            vote_count,
            viewer_votes: voted_by.map(|u| vec![Vote::new(u, id)]).unwrap_or_default(),
        }
    }

    fn board(weekly: Vec<MovieListItem>) -> HomeBoard {
        let now = Utc.with_ymd_and_hms(2024, 6, 12, 15, 0, 0).unwrap();
        HomeBoard {
            window: WeekWindow::for_instant(now, WeekPolicy::Rolling),
            recent: weekly.clone(),
            weekly,
        }
    }

    #[test]
    fn test_anonymous_home_shows_login_link() {
        let html = render_home(None, board(vec![]), FieldErrors::new());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("href=\"/auth/login\""));
        assert!(html.contains("No movies yet"));
        assert!(!html.contains("name=\"title\""));
    }

    #[test]
    fn test_heart_reflects_viewer_vote() {
        let viewer = user();
        let html = render_home(
            Some(viewer.clone()),
            board(vec![item("Voted", 2, Some(viewer.id)), item("Not voted", 0, None)]),
            FieldErrors::new(),
        );
        assert!(html.contains("💖"));
        assert!(html.contains("🤍"));
        assert!(html.contains("name=\"movieId\""));
        assert!(html.contains("2 votes"));
        assert!(html.contains("ana@example.com"));
    }

    #[test]
    fn test_title_error_rendered_inline() {
        let html = render_home(
            Some(user()),
            board(vec![]),
            FieldErrors::single("title", "Title is required"),
        );
        assert!(html.contains("id=\"title-error\""));
        assert!(html.contains("Title is required"));
        assert!(html.contains("aria-invalid=\"true\""));
    }

    #[test]
    fn test_titles_are_escaped() {
        let html = render_movies(
            user(),
            vec![item("<script>alert(1)</script>", 0, None)],
            FieldErrors::new(),
        );
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_movies_page_links_to_detail_and_has_outlet_form() {
        let movie = item("Heat", 1, None);
        let href = format!("/movies/{}", movie.id);
        let html = render_movies(user(), vec![movie], FieldErrors::new());
        assert!(html.contains(&href));
        assert!(html.contains("action=\"/movies\""));
    }

    #[test]
    fn test_detail_page_has_delete_form() {
        let viewer = user();
        let movie = Movie::new("Heat".to_string(), viewer.id, Utc::now());
        let action = format!("/movies/{}/delete", movie.id);
        let html = render_movie_detail(viewer, movie);
        assert!(html.contains(&action));
        assert!(html.contains("Heat"));
    }
}
