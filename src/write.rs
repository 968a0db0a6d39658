use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;

use crate::authority::CertAuthority;
use crate::error::{IdentityFileError, Result};
use crate::format::Format;
use crate::identity::Credentials;
use crate::sshutils::authorized_host_line;

/// Permissions of every file written by [`write`].
pub const FILE_MODE: u32 = 0o600;

/// Saves `credentials` to disk in the given `format`.
///
/// `base_path` is the base for the output file names; the names actually
/// written are returned, in the order given by [`Format::output_paths`].
/// Existing files are truncated. Files are created readable and writable by
/// the owner only.
///
/// Writing stops at the first failure. Files completed before the failure are
/// left in place.
///
/// # Example
/// ```no_run
/// use identityfile::{format::Format, identity::Credentials, write::write};
/// use identityfile::authority::StaticCertAuthority;
///
/// # fn main() -> identityfile::error::Result<()> {
/// let creds = Credentials::builder()
///     .private_key(std::fs::read("alice.pem").unwrap())
///     .tls_cert(std::fs::read("alice.crt").unwrap())
///     .build();
/// let written = write("out/alice", &creds, Format::Tls, &[] as &[StaticCertAuthority])?;
/// assert_eq!(written.len(), 3);
/// # Ok(())
/// # }
/// ```
pub fn write<A: CertAuthority>(
    base_path: impl AsRef<Path>,
    credentials: &Credentials,
    format: Format,
    authorities: &[A],
) -> Result<Vec<PathBuf>> {
    let base_path = base_path.as_ref();
    if base_path.as_os_str().is_empty() {
        return Err(IdentityFileError::InvalidInput(
            "identity location is not specified".to_string(),
        ));
    }

    let paths = format.output_paths(base_path);
    match format {
        Format::File => {
            let mut file = create_file(&paths[0])?;
            write_file_format(&mut file, credentials, authorities)
                .map_err(|e| with_path_context(e, &paths[0]))?;
            file.flush()
                .map_err(|e| IdentityFileError::io(format!("writing {}", paths[0].display()), e))?;
            debug!("wrote identity file {}", paths[0].display());
        }
        Format::OpenSsh => {
            let (key_path, cert_path) = (&paths[0], &paths[1]);
            write_all(cert_path, &credentials.ssh_cert)?;
            write_all(key_path, &credentials.private_key)?;
        }
        Format::Tls => {
            let (key_path, cert_path, cas_path) = (&paths[0], &paths[1], &paths[2]);
            write_all(cert_path, &credentials.tls_cert)?;
            write_all(key_path, &credentials.private_key)?;

            let ca_certs: Vec<u8> = authorities
                .iter()
                .flat_map(|ca| ca.tls_key_pairs())
                .flat_map(|pair| pair.cert.iter().copied())
                .collect();
            write_all(cas_path, &ca_certs)?;
        }
    }
    Ok(paths)
}

/// Writes the single-file layout to `writer`: the private key, the SSH
/// certificate and the TLS certificate, followed by one `@cert-authority`
/// line per authority host key and the TLS certificates of every authority.
///
/// Nothing is inserted between the components beyond the newline ending each
/// `@cert-authority` line.
pub fn write_file_format<W: Write, A: CertAuthority>(
    writer: &mut W,
    credentials: &Credentials,
    authorities: &[A],
) -> Result<()> {
    let io = |e| IdentityFileError::io("writing identity", e);

    writer.write_all(&credentials.private_key).map_err(io)?;
    writer.write_all(&credentials.ssh_cert).map_err(io)?;
    writer.write_all(&credentials.tls_cert).map_err(io)?;

    for ca in authorities {
        for public_key in ca.checking_keys() {
            writer
                .write_all(&authorized_host_line(ca.cluster_name(), public_key))
                .map_err(io)?;
        }
        for key_pair in ca.tls_key_pairs() {
            writer.write_all(&key_pair.cert).map_err(io)?;
        }
    }
    Ok(())
}

/// Renders the single-file layout into memory.
pub fn encode_file_format<A: CertAuthority>(
    credentials: &Credentials,
    authorities: &[A],
) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_file_format(&mut buf, credentials, authorities)?;
    Ok(buf)
}

fn create_file(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options
        .open(path)
        .map_err(|e| IdentityFileError::io(format!("creating {}", path.display()), e))
}

fn write_all(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = create_file(path)?;
    file.write_all(data)
        .and_then(|()| file.flush())
        .map_err(|e| IdentityFileError::io(format!("writing {}", path.display()), e))?;
    debug!("wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}

fn with_path_context(err: IdentityFileError, path: &Path) -> IdentityFileError {
    match err {
        IdentityFileError::Io { source, .. } => {
            IdentityFileError::io(format!("writing {}", path.display()), source)
        }
        other => other,
    }
}
