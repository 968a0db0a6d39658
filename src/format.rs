use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::IdentityFileError;

const FORMAT_FILE: &str = "file";
const FORMAT_OPENSSH: &str = "openssh";
const FORMAT_TLS: &str = "tls";

/// Describes how an identity is laid out on disk.
///
/// The string forms are `"file"`, `"openssh"` and `"tls"`, matched
/// case-sensitively. [`Format::File`] is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// Key, certificates and trusted authorities concatenated into a single file.
    #[default]
    File,
    /// OpenSSH layout: the key at the base path and the SSH certificate next to
    /// it with a `-cert.pub` suffix.
    OpenSsh,
    /// TLS layout used by common TLS clients: `.key`, `.crt` and `.cas` files.
    Tls,
}

impl Format {
    /// Every supported format, in the order they are listed in error messages.
    pub const ALL: [Format; 3] = [Format::File, Format::OpenSsh, Format::Tls];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::File => FORMAT_FILE,
            Format::OpenSsh => FORMAT_OPENSSH,
            Format::Tls => FORMAT_TLS,
        }
    }

    /// Returns the paths this format writes for `base`, in the order
    /// [`crate::write::write`] reports them.
    ///
    /// # Example
    /// ```
    /// use identityfile::format::Format;
    /// use std::path::PathBuf;
    ///
    /// let paths = Format::Tls.output_paths("out/alice");
    /// assert_eq!(
    ///     paths,
    ///     vec![
    ///         PathBuf::from("out/alice.key"),
    ///         PathBuf::from("out/alice.crt"),
    ///         PathBuf::from("out/alice.cas"),
    ///     ]
    /// );
    /// ```
    pub fn output_paths(&self, base: impl AsRef<Path>) -> Vec<PathBuf> {
        let base = base.as_ref();
        match self {
            Format::File => vec![base.to_path_buf()],
            Format::OpenSsh => vec![base.to_path_buf(), with_suffix(base, "-cert.pub")],
            Format::Tls => vec![
                with_suffix(base, ".key"),
                with_suffix(base, ".crt"),
                with_suffix(base, ".cas"),
            ],
        }
    }
}

/// Appends `suffix` to the final path component without treating it as an
/// extension, so `id.v2` becomes `id.v2.crt` rather than `id.crt`.
pub(crate) fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut path = base.as_os_str().to_owned();
    path.push(suffix);
    PathBuf::from(path)
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Format {
    type Err = IdentityFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            FORMAT_FILE => Ok(Format::File),
            FORMAT_OPENSSH => Ok(Format::OpenSsh),
            FORMAT_TLS => Ok(Format::Tls),
            _ => Err(IdentityFileError::InvalidInput(format!(
                "unsupported identity format: {:?}, use one of {:?}, {:?}, or {:?}",
                s, FORMAT_FILE, FORMAT_OPENSSH, FORMAT_TLS
            ))),
        }
    }
}
