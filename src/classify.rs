//! Coarse file-type sniffing from names or MIME strings.

use crate::models::{FileSummary, FileType, RemoteFile};

/// Infer a coarse type by case-insensitive substring scan, checking "pdf"
/// before "folder" so pdf wins when both occur.
///
/// This is a heuristic, not a MIME-type-aware classifier: a name containing
/// "pdf" inside an unrelated word still classifies as pdf, as there is no
/// word-boundary check. Anything else classifies as `None`.
pub fn classify(text: &str) -> Option<FileType> {
    let lower = text.to_lowercase();
    if lower.contains("pdf") {
        Some(FileType::Pdf)
    } else if lower.contains("folder") {
        Some(FileType::Folder)
    } else {
        None
    }
}

/// Project raw listing entries into `{id, name, type}` summaries, classifying
/// each entry by its MIME string. Fields missing on the wire already arrive
/// defaulted to "" (see `RemoteFile`), so nothing here can fail.
pub fn format_files_list(files: &[RemoteFile]) -> Vec<FileSummary> {
    files
        .iter()
        .map(|file| FileSummary {
            id: file.id.clone(),
            name: file.name.clone(),
            file_type: classify(&file.mime_type),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_substring() {
        assert_eq!(classify("report.pdf"), Some(FileType::Pdf));
        assert_eq!(classify("application/pdf"), Some(FileType::Pdf));
        assert_eq!(classify("My Folder"), Some(FileType::Folder));
        assert_eq!(
            classify("application/vnd.google-apps.folder"),
            Some(FileType::Folder)
        );
        assert_eq!(classify("image.jpg"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn pdf_wins_when_both_substrings_occur() {
        assert_eq!(classify("pdf-folder"), Some(FileType::Pdf));
    }

    #[test]
    fn no_word_boundary_check() {
        assert_eq!(classify("notapdfreally.txt"), Some(FileType::Pdf));
    }

    #[test]
    fn formats_an_empty_listing() {
        assert_eq!(format_files_list(&[]), Vec::<FileSummary>::new());
    }

    #[test]
    fn formats_listing_entries() {
        let files = vec![RemoteFile {
            id: "1".into(),
            name: "x".into(),
            mime_type: "application/pdf".into(),
            ..Default::default()
        }];
        assert_eq!(
            format_files_list(&files),
            vec![FileSummary {
                id: "1".into(),
                name: "x".into(),
                file_type: Some(FileType::Pdf),
            }]
        );
    }
}
