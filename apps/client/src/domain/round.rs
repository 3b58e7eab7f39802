use std::fmt;

use serde::Serialize;

use crate::domain::video;

/// Opaque comment identifier issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CommentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Opaque round identifier issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoundId(String);

impl RoundId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentOption {
    pub comment_id: CommentId,
    pub text: String,
}

/// One game instance: a video plus a fixed set of candidate comments.
///
/// `options` is kept in display order, which is not sorted by likes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub round_id: RoundId,
    pub video_link: String,
    /// Daily theme; only ranking rounds carry one.
    pub theme: Option<String>,
    pub options: Vec<CommentOption>,
}

impl Round {
    pub fn option(&self, id: &CommentId) -> Option<&CommentOption> {
        self.options.iter().find(|o| &o.comment_id == id)
    }

    pub fn contains(&self, id: &CommentId) -> bool {
        self.option(id).is_some()
    }

    pub fn video_id(&self) -> Option<String> {
        video::video_id(&self.video_link)
    }

    /// Resolve a display label (`"A"`, `"b"`, ...) to the option it names.
    pub fn option_by_label(&self, label: &str) -> Option<&CommentOption> {
        let wanted = label.trim().to_ascii_uppercase();
        self.options
            .iter()
            .enumerate()
            .find(|(idx, _)| option_label(*idx) == wanted)
            .map(|(_, option)| option)
    }
}

/// Display label for the option at `index`: A..Z, then AA, AB, ...
pub fn option_label(index: usize) -> String {
    let mut n = index + 1;
    let mut label = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}
