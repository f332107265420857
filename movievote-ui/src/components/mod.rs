mod add_movie_form;
mod error_display;
mod movie_list;
mod site_header;

pub use add_movie_form::AddMovieForm;
pub use error_display::ErrorDisplay;
pub use movie_list::MovieList;
pub use site_header::SiteHeader;
