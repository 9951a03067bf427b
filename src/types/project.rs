use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub number: u64,
    pub title: String,
    pub url: String,
}

/// One page of projects, in the order GitHub returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectPage {
    pub projects: Vec<Project>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

// ---------------------------------------------------------------------------
// Project items
// ---------------------------------------------------------------------------

/// Title, state and URL of an issue or pull request on a board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentRef {
    pub id: String,
    pub title: String,
    pub state: String,
    pub url: String,
}

/// What a project item points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemContent {
    Issue(ContentRef),
    PullRequest(ContentRef),
    /// A draft lives only on the board: it has no state and no URL.
    DraftIssue { id: String, title: String },
    /// A content type this crate does not map. Only the tag and id are kept.
    Unknown { typename: String, id: String },
    /// GitHub returned no content, e.g. it has not materialized yet or the
    /// viewer cannot see it.
    Absent,
}

impl ItemContent {
    pub fn id(&self) -> &str {
        match self {
            Self::Issue(c) | Self::PullRequest(c) => &c.id,
            Self::DraftIssue { id, .. } | Self::Unknown { id, .. } => id,
            Self::Absent => "",
        }
    }

    /// The GraphQL `__typename` of the content, or `""` when absent.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Issue(_) => "Issue",
            Self::PullRequest(_) => "PullRequest",
            Self::DraftIssue { .. } => "DraftIssue",
            Self::Unknown { typename, .. } => typename,
            Self::Absent => "",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Issue(c) | Self::PullRequest(c) => &c.title,
            Self::DraftIssue { title, .. } => title,
            Self::Unknown { .. } | Self::Absent => "",
        }
    }

    pub fn state(&self) -> &str {
        match self {
            Self::Issue(c) | Self::PullRequest(c) => &c.state,
            _ => "",
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Issue(c) | Self::PullRequest(c) => &c.url,
            _ => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectItem {
    pub id: String,
    pub content: ItemContent,
}

impl ProjectItem {
    /// An item known only by its id (e.g. the echo of a field update).
    pub fn bare(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: ItemContent::Absent,
        }
    }
}

/// Serialized flat, as `{id, content_id, content_type, title, state, url}`,
/// with empty strings standing in for fields the content does not have.
impl Serialize for ProjectItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ProjectItem", 6)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("content_id", self.content.id())?;
        s.serialize_field("content_type", self.content.type_name())?;
        s.serialize_field("title", self.content.title())?;
        s.serialize_field("state", self.content.state())?;
        s.serialize_field("url", self.content.url())?;
        s.end()
    }
}

/// One page of project items, in board order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectItemPage {
    pub items: Vec<ProjectItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}
