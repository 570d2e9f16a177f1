//! Folder and tag records.
//!
//! Both collections share one shape, `{id, name}`, with `name` unique inside
//! its collection.

use crate::model::id::DocId;
use serde::{Deserialize, Serialize};

/// Stored record identified by a unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRecord {
    pub id: DocId,
    pub name: String,
}

pub type Folder = NamedRecord;
pub type Tag = NamedRecord;

/// Collections holding [`NamedRecord`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Folders,
    Tags,
}

impl Collection {
    pub(crate) fn table(self) -> &'static str {
        match self {
            Self::Folders => "folders",
            Self::Tags => "tags",
        }
    }

    /// Singular label used in log events.
    pub fn label(self) -> &'static str {
        match self {
            Self::Folders => "folder",
            Self::Tags => "tag",
        }
    }
}
