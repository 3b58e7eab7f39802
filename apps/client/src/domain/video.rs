use reqwest::Url;
use tracing::debug;

/// Base for embedding a video by id.
pub const EMBED_BASE_URL: &str = "https://www.youtube.com/embed/";

/// Extract the video identifier from a video link.
///
/// Prefers the `v` query parameter, then the last non-empty path segment.
/// Anything that does not parse as an absolute URL has no identifier.
pub fn video_id(link: &str) -> Option<String> {
    let parsed = match Url::parse(link.trim()) {
        Ok(url) => url,
        Err(err) => {
            debug!(link, error = %err, "Failed to parse video id");
            return None;
        }
    };

    if let Some((_, v)) = parsed.query_pairs().find(|(key, _)| key == "v") {
        return (!v.is_empty()).then(|| v.into_owned());
    }

    parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_owned)
}

/// Embed URL with the player parameters the game uses.
pub fn embed_url(video_id: &str) -> String {
    format!("{EMBED_BASE_URL}{video_id}?modestbranding=1&rel=0&playsinline=1")
}
