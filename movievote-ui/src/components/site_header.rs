use leptos::prelude::*;
use movievote_app::domain::User;

#[component]
pub fn SiteHeader(viewer: Option<User>) -> impl IntoView {
    match viewer {
        Some(user) => view! {
            <header class="header">
                <h1 class="header__title">"Vote or Add Your Fav Movie"</h1>
                <nav class="header__nav">
                    <a href="/" class="header__link">"This week"</a>
                    <a href="/movies" class="header__link">"All movies"</a>
                    <span class="header__email">{user.email}</span>
                    <form action="/auth/logout" method="post" class="header__logout">
                        <button type="submit" class="header__button">"Logout"</button>
                    </form>
                </nav>
            </header>
        }
        .into_any(),
        None => view! {
            <header class="header">
                <h1 class="header__title">"Login Vote or Add Your Fav Movie"</h1>
            </header>
        }
        .into_any(),
    }
}
