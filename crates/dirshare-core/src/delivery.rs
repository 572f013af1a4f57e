//! How single files are presented to a browser.

use std::fmt;
use std::path::Path;

/// Extensions that are always delivered as attachments.
///
/// Archives, installers, office documents and media are downloaded rather
/// than rendered even when a browser could display them.
pub const FORCED_DOWNLOAD_EXTENSIONS: &[&str] = &[
    "zip", "rar", "7z", "tar", "gz", "exe", "msi", "dmg", "deb", "bin", "iso", "img", "dll", "so",
    "doc", "docx", "xls", "xlsx", "ppt", "pptx", "mp3", "wav", "mp4", "avi", "mkv",
];

/// Whether a file is shown in the browser or saved to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Let the client render the file when it can.
    Inline,
    /// Ask the client to save the file.
    Attachment,
}

impl Disposition {
    /// The `Content-Disposition` type token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Attachment => "attachment",
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chooses the disposition for `file_name` by its final extension.
///
/// The match is case-insensitive. Names without an extension are inline.
///
/// # Examples
///
/// ```
/// use dirshare_core::Disposition;
/// use dirshare_core::disposition_for;
///
/// assert_eq!(disposition_for("backup.ZIP"), Disposition::Attachment);
/// assert_eq!(disposition_for("notes.txt"), Disposition::Inline);
/// ```
#[must_use]
pub fn disposition_for(file_name: &str) -> Disposition {
    let forced = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            FORCED_DOWNLOAD_EXTENSIONS
                .iter()
                .any(|forced| forced.eq_ignore_ascii_case(ext))
        });

    if forced {
        Disposition::Attachment
    } else {
        Disposition::Inline
    }
}
