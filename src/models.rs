use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Catalog entries
// ============================================================================

/// A degree program backed by one remote folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    /// Container reference of the program's root folder in remote storage.
    pub id: String,
    /// Slug identifier used in navigation paths.
    pub tag: String,
    pub name: String,
}

/// A college and its ordered list of programs. Loaded once at startup and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct College {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub programs: Vec<Program>,
}

// ============================================================================
// Remote listing wire types
// ============================================================================

/// One file as returned by the remote storage collaborator. Held only for the
/// duration of a single resolution, never cached.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub created_time: Option<DateTime<Utc>>,
    pub web_view_link: Option<String>,
    pub thumbnail_link: Option<String>,
    pub file_extension: Option<String>,
}

// ============================================================================
// Projections
// ============================================================================

/// Coarse file type inferred from a name or MIME string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Folder,
}

/// Minimal `{id, name, type}` projection for raw-data responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub file_type: Option<FileType>,
}

/// A remote file after resolution: naturally sorted, optionally slugged,
/// optionally carrying its own children one level down.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedFile {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// "Area <n>" when the slug follows the area naming convention.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// Display label derived from the slug (lossy).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<FileType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_view_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<ResolvedFile>>,
}

// ============================================================================
// Type filters
// ============================================================================

/// Closed set of listing restrictions understood by the storage collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    Pdf,
    Folder,
    Any,
}

impl TypeFilter {
    /// Map a caller-supplied filter name to a filter. Unknown names are a
    /// configuration error reported at call time, never silently ignored.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "pdf" => Ok(TypeFilter::Pdf),
            "folder" => Ok(TypeFilter::Folder),
            "" | "any" => Ok(TypeFilter::Any),
            other => Err(Error::config(format!("unknown type filter {other:?}"))),
        }
    }

    /// Backing MIME predicate for the remote storage query language, if the
    /// filter restricts anything at all.
    pub fn mime_clause(&self) -> Option<&'static str> {
        match self {
            TypeFilter::Pdf => Some("mimeType = 'application/pdf'"),
            TypeFilter::Folder => Some("mimeType = 'application/vnd.google-apps.folder'"),
            TypeFilter::Any => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_names_map_to_the_closed_enum() {
        assert_eq!(TypeFilter::from_name("pdf").unwrap(), TypeFilter::Pdf);
        assert_eq!(TypeFilter::from_name("folder").unwrap(), TypeFilter::Folder);
        assert_eq!(TypeFilter::from_name("any").unwrap(), TypeFilter::Any);
        assert_eq!(TypeFilter::from_name("").unwrap(), TypeFilter::Any);
    }

    #[test]
    fn unknown_filter_name_is_a_config_error() {
        let err = TypeFilter::from_name("spreadsheet").unwrap_err();
        assert!(matches!(err, crate::error::Error::Config(_)));
    }

    #[test]
    fn remote_file_tolerates_missing_fields() {
        let file: RemoteFile = serde_json::from_str(r#"{"id": "f1"}"#).unwrap();
        assert_eq!(file.id, "f1");
        assert_eq!(file.name, "");
        assert_eq!(file.mime_type, "");
        assert!(file.created_time.is_none());
    }
}
