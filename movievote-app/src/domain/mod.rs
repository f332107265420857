mod movie;
mod user;
mod vote;
mod week_window;

pub use movie::{Movie, MovieListItem, MovieOrder};
pub use user::{GoogleProfile, User};
pub use vote::{Vote, VoteToggle};
pub use week_window::{WeekPolicy, WeekWindow};
