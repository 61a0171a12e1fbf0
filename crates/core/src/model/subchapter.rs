use crate::model::ids::{ChapterId, SubchapterId};

/// An atomic unit of learning content with an HTML body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subchapter {
    id: SubchapterId,
    chapter_id: ChapterId,
    title: String,
    order_sequence: i64,
    content_html: String,
    content_css: Option<String>,
}

impl Subchapter {
    /// Creates a subchapter snapshot. Sources that omit the order field pass
    /// `order_sequence = 0`.
    #[must_use]
    pub fn new(
        id: SubchapterId,
        chapter_id: ChapterId,
        title: impl Into<String>,
        order_sequence: i64,
        content_html: impl Into<String>,
        content_css: Option<String>,
    ) -> Self {
        Self {
            id,
            chapter_id,
            title: title.into(),
            order_sequence,
            content_html: content_html.into(),
            content_css,
        }
    }

    #[must_use]
    pub fn id(&self) -> SubchapterId {
        self.id
    }

    #[must_use]
    pub fn chapter_id(&self) -> ChapterId {
        self.chapter_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn order_sequence(&self) -> i64 {
        self.order_sequence
    }

    #[must_use]
    pub fn content_html(&self) -> &str {
        &self.content_html
    }

    /// Optional stylesheet the renderer injects alongside the HTML body.
    #[must_use]
    pub fn content_css(&self) -> Option<&str> {
        self.content_css.as_deref()
    }

    /// Sort key that makes the module-wide sequence a total order: id is the
    /// tie-break when `order_sequence` collides.
    #[must_use]
    pub fn sort_key(&self) -> (i64, SubchapterId) {
        (self.order_sequence, self.id)
    }
}
