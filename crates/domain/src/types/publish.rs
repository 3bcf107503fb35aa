//! Publish targets: where extracted outcomes get written.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of document a destination URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Word,
    #[serde(rename = "sharepoint")]
    SharePoint,
    Loop,
    Unknown,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Word => "word",
            Self::SharePoint => "sharepoint",
            Self::Loop => "loop",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Classified destination for meeting outcomes.
///
/// Derived purely from a URL string and recomputed on every publish.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PublishTarget {
    Word {
        url: String,
    },
    #[serde(rename = "sharepoint")]
    SharePoint {
        #[serde(rename = "siteUrl")]
        site_url: String,
        #[serde(rename = "filePath")]
        file_path: String,
    },
    Loop {
        url: String,
    },
    Unknown {
        url: String,
    },
}

impl PublishTarget {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Word { .. } => DocumentKind::Word,
            Self::SharePoint { .. } => DocumentKind::SharePoint,
            Self::Loop { .. } => DocumentKind::Loop,
            Self::Unknown { .. } => DocumentKind::Unknown,
        }
    }

    pub fn is_supported(&self) -> bool {
        self.kind() != DocumentKind::Unknown
    }
}
