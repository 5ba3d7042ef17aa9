#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Whole-file conflict content; a side missing from its snapshot is empty.
///
/// Neither side gets a trailing separator added, so content without a final
/// newline runs into the next marker.
pub fn conflict_content(ours: &str, theirs: &str) -> String {
    format!(
        "<<<<<<< HEAD{sep}{ours}======={sep}{theirs}>>>>>>>{sep}",
        sep = LINE_SEPARATOR
    )
}
