mod movie_board;
mod submit_movie;
mod toggle_vote;

pub use movie_board::{HomeBoard, MovieBoard};
pub use submit_movie::SubmitMovie;
pub use toggle_vote::ToggleVote;
