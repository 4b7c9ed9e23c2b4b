//! URI scheme detection against a fixed allow-list.

use serde::{Deserialize, Serialize};

/// Schemes recognised by [`has_scheme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemePrefix {
    File,
    Content,
    Http,
    Https,
    Ftp,
    Ftps,
    Sftp,
    Smb,
}

impl SchemePrefix {
    pub const ALL: [SchemePrefix; 8] = [
        Self::File,
        Self::Content,
        Self::Http,
        Self::Https,
        Self::Ftp,
        Self::Ftps,
        Self::Sftp,
        Self::Smb,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Content => "content",
            Self::Http => "http",
            Self::Https => "https",
            Self::Ftp => "ftp",
            Self::Ftps => "ftps",
            Self::Sftp => "sftp",
            Self::Smb => "smb",
        }
    }
}

impl std::fmt::Display for SchemePrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when `uri` starts with `<scheme>://` for a known scheme, ignoring
/// case. `mailto:` and other schemes without `//` never match.
///
/// ```
/// use toolbelt_core::uri::has_scheme;
///
/// assert!(has_scheme(Some("HTTP://example.com")));
/// assert!(!has_scheme(Some("mailto:someone@example.com")));
/// assert!(!has_scheme(None));
/// ```
pub fn has_scheme(uri: Option<&str>) -> bool {
    let Some(uri) = uri.filter(|u| !u.is_empty()) else {
        return false;
    };
    let lower = uri.to_lowercase();
    SchemePrefix::ALL.iter().any(|scheme| {
        lower
            .strip_prefix(scheme.as_str())
            .is_some_and(|rest| rest.starts_with("://"))
    })
}
