use std::{fmt::Display, ops::Deref, sync::OnceLock};

use regex::Regex;

/// The view URL form a list line may use instead of a bare token
const VIEW_URL_PATTERN: &str = r"^https?://coub\.com/view/([a-zA-Z0-9]+)";

static VIEW_URL_RE: OnceLock<Regex> = OnceLock::new();

fn view_url_re() -> &'static Regex {
    VIEW_URL_RE.get_or_init(|| Regex::new(VIEW_URL_PATTERN).unwrap())
}

/// A short alphanumeric token identifying one clip.
///
/// Used both as a lookup key for the clip page and as a component
/// of the output file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipId(String);

impl ClipId {
    /// Normalize a raw input line into a clip id.
    ///
    /// A line matching the view URL form yields the captured token.
    /// Anything else is trusted to already be a bare id, without
    /// validating its character set; a bad one surfaces later as a
    /// fetch failure. List lines keep their trailing newline, so the
    /// line is trimmed first.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let id = match view_url_re().captures(line) {
            Some(cap) => cap.get(1).unwrap().as_str(),
            None => line,
        };
        Self(id.to_owned())
    }

    /// The canonical page URL of the clip
    pub fn view_url(&self) -> String {
        format!("https://coub.com/view/{}", self.as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ClipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for ClipId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_token_from_view_url() {
        assert_eq!(ClipId::parse("https://coub.com/view/2ck4sw").as_str(), "2ck4sw");
        assert_eq!(ClipId::parse("http://coub.com/view/1k9fll").as_str(), "1k9fll");
    }

    #[test]
    fn bare_id_is_kept_verbatim() {
        assert_eq!(ClipId::parse("2ck4sw").as_str(), "2ck4sw");
    }

    #[test]
    fn list_lines_keep_their_newline() {
        assert_eq!(ClipId::parse("2ck4sw\n").as_str(), "2ck4sw");
        assert_eq!(ClipId::parse("https://coub.com/view/3abc9z\n").as_str(), "3abc9z");
    }

    #[test]
    fn no_false_positive_on_other_urls() {
        // Not the view URL form, trusted as-is like any other line
        let line = "https://example.com/view/2ck4sw";
        assert_eq!(ClipId::parse(line).as_str(), line);
    }

    #[test]
    fn url_without_token_is_not_a_match() {
        let line = "https://coub.com/view/";
        assert_eq!(ClipId::parse(line).as_str(), line);
    }
}
