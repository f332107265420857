mod home;
mod movie_detail;
mod movies;

pub use home::HomePage;
pub use movie_detail::MovieDetailPage;
pub use movies::MoviesPage;
