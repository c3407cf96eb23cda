use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Display verbs for the operation codes recorded by the content store
pub const CRUD_VERBS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "c" => "Created",
    "u" => "Edited",
    "d" => "Deleted",
    "transform" => "Transformed",
    "findreplace" => "Replaced text in",
    "contentdatarestore" => "Restored",
};

/// Kind of change a commit records against its content ids
///
/// The store writes these as short codes in the structured commit message
/// (`c`, `u`, `d`, `transform`, `findreplace`, `contentdatarestore`).
/// A code outside this set makes the raw record malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrudKind {
    #[serde(rename = "c")]
    Create,
    #[serde(rename = "u")]
    Update,
    #[serde(rename = "d")]
    Delete,
    #[serde(rename = "transform")]
    Transform,
    #[serde(rename = "findreplace")]
    FindReplace,
    #[serde(rename = "contentdatarestore")]
    ContentDataRestore,
}

impl CrudKind {
    pub fn try_parse(code: &str) -> Option<Self> {
        match code {
            "c" => Some(CrudKind::Create),
            "u" => Some(CrudKind::Update),
            "d" => Some(CrudKind::Delete),
            "transform" => Some(CrudKind::Transform),
            "findreplace" => Some(CrudKind::FindReplace),
            "contentdatarestore" => Some(CrudKind::ContentDataRestore),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CrudKind::Create => "c",
            CrudKind::Update => "u",
            CrudKind::Delete => "d",
            CrudKind::Transform => "transform",
            CrudKind::FindReplace => "findreplace",
            CrudKind::ContentDataRestore => "contentdatarestore",
        }
    }

    /// Past-tense verb used when rendering the commit message for display
    pub fn verb(&self) -> &'static str {
        CRUD_VERBS.get(self.code()).copied().unwrap_or(self.code())
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct CrudFilter: u32 {
        const CREATE = 0b000001;
        const UPDATE = 0b000010;
        const DELETE = 0b000100;
        const TRANSFORM = 0b001000;
        const FIND_REPLACE = 0b010000;
        const CONTENT_DATA_RESTORE = 0b100000;

        /// Every kind that touches section content; the set the history
        /// extractor admits
        const CONTENT = Self::CREATE.bits()
            | Self::UPDATE.bits()
            | Self::DELETE.bits()
            | Self::TRANSFORM.bits()
            | Self::FIND_REPLACE.bits()
            | Self::CONTENT_DATA_RESTORE.bits();
    }
}

impl CrudFilter {
    pub fn try_parse(s: &str) -> Option<Self> {
        let mut filter = Self::empty();

        for c in s.chars() {
            match c {
                'c' => filter |= Self::CREATE,
                'u' => filter |= Self::UPDATE,
                'd' => filter |= Self::DELETE,
                't' => filter |= Self::TRANSFORM,
                'f' => filter |= Self::FIND_REPLACE,
                'r' => filter |= Self::CONTENT_DATA_RESTORE,
                _ => return None,
            }
        }

        Some(filter)
    }

    pub fn matches(&self, kind: CrudKind) -> bool {
        let flag = match kind {
            CrudKind::Create => Self::CREATE,
            CrudKind::Update => Self::UPDATE,
            CrudKind::Delete => Self::DELETE,
            CrudKind::Transform => Self::TRANSFORM,
            CrudKind::FindReplace => Self::FIND_REPLACE,
            CrudKind::ContentDataRestore => Self::CONTENT_DATA_RESTORE,
        };

        self.contains(flag)
    }
}
