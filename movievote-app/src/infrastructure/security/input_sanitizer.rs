use movievote_errors::AppError;
use std::sync::OnceLock;
use uuid::Uuid;

pub const TITLE_FIELD: &str = "title";
pub const MOVIE_ID_FIELD: &str = "movieId";

const MAX_TITLE_CHARS: usize = 200;

fn whitespace_run() -> &'static regex_lite::Regex {
    static RE: OnceLock<regex_lite::Regex> = OnceLock::new();
    RE.get_or_init(|| regex_lite::Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

pub struct InputSanitizer;

impl InputSanitizer {
    /// Normalises a submitted title: control characters dropped, whitespace
    /// runs collapsed to one space, ends trimmed.
    pub fn validate_title(raw: Option<&str>) -> Result<String, AppError> {
        let cleaned: String = raw
            .unwrap_or_default()
            .chars()
            .filter(|c| !c.is_control() || c.is_whitespace())
            .collect();
        let title = whitespace_run().replace_all(cleaned.trim(), " ").into_owned();

        if title.is_empty() {
            return Err(AppError::validation(TITLE_FIELD, "Title is required"));
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(AppError::validation(TITLE_FIELD, "Title is too long"));
        }
        Ok(title)
    }

    pub fn validate_movie_id(raw: Option<&str>) -> Result<Uuid, AppError> {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err(AppError::validation(MOVIE_ID_FIELD, "Movie Id is required"));
        }
        Uuid::parse_str(raw).map_err(|_| {
            tracing::warn!("Rejected malformed movie id: {}", raw);
            AppError::validation(MOVIE_ID_FIELD, "Movie Id is invalid")
        })
    }

    /// Accepts only same-site paths such as `/movies`, so a login link cannot
    /// bounce the user to another host.
    pub fn safe_redirect_target(raw: &str) -> Option<String> {
        let raw = raw.trim();
        if !raw.starts_with('/') || raw.starts_with("//") || raw.contains('\\') {
            return None;
        }
        // An absolute URL parses without a base; a plain path does not.
        if url::Url::parse(raw).is_ok() {
            return None;
        }
        Some(raw.to_string())
    }
}
