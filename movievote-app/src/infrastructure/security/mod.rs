mod input_sanitizer;

pub use input_sanitizer::{InputSanitizer, MOVIE_ID_FIELD, TITLE_FIELD};
