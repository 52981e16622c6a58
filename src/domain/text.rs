use regex::Regex;
use std::sync::OnceLock;

use crate::domain::models::Show;

const UNKNOWN_NETWORK: &str = "Unknown";

fn tag_pattern() -> &'static Regex {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    TAGS.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

/// Drops markup tags from a catalog summary. Entities are left as-is.
pub fn strip_html(html: Option<&str>) -> String {
    match html {
        Some(html) => tag_pattern().replace_all(html, "").trim().to_string(),
        None => String::new(),
    }
}

/// Broadcast network name, else the streaming channel, else "Unknown".
pub fn network_name(show: &Show) -> &str {
    show.network
        .as_ref()
        .map(|n| n.name.as_str())
        .filter(|name| !name.is_empty())
        .or_else(|| {
            show.web_channel
                .as_ref()
                .map(|c| c.name.as_str())
                .filter(|name| !name.is_empty())
        })
        .unwrap_or(UNKNOWN_NETWORK)
}

pub fn image_url(show: &Show) -> Option<&str> {
    let image = show.image.as_ref()?;
    image
        .medium
        .as_deref()
        .filter(|url| !url.is_empty())
        .or_else(|| image.original.as_deref().filter(|url| !url.is_empty()))
}

/// Shortens `text` to at most `max` characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}
