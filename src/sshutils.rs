//! Text forms of SSH public keys as they appear in identity files.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use bon::Builder;
use ed25519_dalek::VerifyingKey;
use sha2::{Digest, Sha256};

use crate::error::{IdentityFileError, Result};

/// Marker that starts a trusted host authority line in known-hosts files.
pub const CERT_AUTHORITY_MARKER: &str = "@cert-authority";

const ED25519_KEY_TYPE: &str = "ssh-ed25519";

/// Options for [`marshal_authorized_hosts_format`].
///
/// # Fields
/// * `logins` - Logins the authority is trusted for; appended as a
///   `logins=` comment when non-empty.
#[derive(Debug, Clone, Default, Builder)]
pub struct AuthorizedHostOptions {
    #[builder(default)]
    pub logins: Vec<String>,
}

/// Formats an authority host key as a known-hosts line:
/// `@cert-authority <cluster_name> <public_key>`.
///
/// Whitespace around `public_key` is dropped. The returned line has no
/// trailing newline.
///
/// # Example
/// ```
/// use identityfile::sshutils::{marshal_authorized_hosts_format, AuthorizedHostOptions};
///
/// let line = marshal_authorized_hosts_format(
///     "example.com",
///     b"ssh-ed25519 AAAAC3Nza\n",
///     &AuthorizedHostOptions::default(),
/// )
/// .unwrap();
/// assert_eq!(line, "@cert-authority example.com ssh-ed25519 AAAAC3Nza");
/// ```
pub fn marshal_authorized_hosts_format(
    cluster_name: &str,
    public_key: &[u8],
    options: &AuthorizedHostOptions,
) -> Result<String> {
    if cluster_name.trim().is_empty() {
        return Err(IdentityFileError::InvalidInput(
            "authority cluster name is empty".to_string(),
        ));
    }
    let key = std::str::from_utf8(public_key.trim_ascii()).map_err(|e| {
        IdentityFileError::InvalidInput(format!("host key of {cluster_name:?} is not text: {e}"))
    })?;
    if key.is_empty() {
        return Err(IdentityFileError::InvalidInput(format!(
            "host key of {cluster_name:?} is empty"
        )));
    }

    let mut line = format!("{CERT_AUTHORITY_MARKER} {cluster_name} {key}");
    if !options.logins.is_empty() {
        line.push_str(" logins=");
        line.push_str(&options.logins.join(","));
    }
    Ok(line)
}

/// Builds the known-hosts line written into identity files, newline included.
///
/// Unlike [`marshal_authorized_hosts_format`] the inputs are not checked: the
/// cluster name and the trimmed key bytes are copied as they are.
pub(crate) fn authorized_host_line(cluster_name: &str, public_key: &[u8]) -> Vec<u8> {
    let key = public_key.trim_ascii();
    let mut line =
        Vec::with_capacity(CERT_AUTHORITY_MARKER.len() + cluster_name.len() + key.len() + 3);
    line.extend_from_slice(CERT_AUTHORITY_MARKER.as_bytes());
    line.push(b' ');
    line.extend_from_slice(cluster_name.as_bytes());
    line.push(b' ');
    line.extend_from_slice(key);
    line.push(b'\n');
    line
}

/// Renders an Ed25519 public key in OpenSSH authorized-key form,
/// `ssh-ed25519 <base64 blob>`.
pub fn marshal_authorized_key(key: &VerifyingKey) -> String {
    let mut blob = Vec::with_capacity(4 + ED25519_KEY_TYPE.len() + 4 + 32);
    put_string(&mut blob, ED25519_KEY_TYPE.as_bytes());
    put_string(&mut blob, key.as_bytes());
    format!("{ED25519_KEY_TYPE} {}", STANDARD.encode(blob))
}

/// Computes the OpenSSH `SHA256:` fingerprint of a public key given in
/// authorized-key form. A leading `@cert-authority <hosts>` prefix is skipped,
/// so lines taken from [`crate::identity::CaCerts::ssh`] are accepted as is.
pub fn fingerprint(public_key: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(public_key)
        .map_err(|e| IdentityFileError::InvalidInput(format!("public key is not text: {e}")))?;
    let mut fields = text.split_whitespace().peekable();
    if fields.peek().is_some_and(|f| f.starts_with('@')) {
        fields.next();
        fields.next();
    }
    let blob = match (fields.next(), fields.next()) {
        (Some(_key_type), Some(blob)) => blob,
        _ => {
            return Err(IdentityFileError::InvalidInput(
                "public key must have a type and a base64 body".to_string(),
            ));
        }
    };
    let decoded = STANDARD.decode(blob)?;
    Ok(format!("SHA256:{}", STANDARD_NO_PAD.encode(Sha256::digest(decoded))))
}

fn put_string(buf: &mut Vec<u8>, data: &[u8]) {
    buf.extend_from_slice(&(data.len() as u32).to_be_bytes());
    buf.extend_from_slice(data);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::SigningKey;

    fn host_key() -> VerifyingKey {
        SigningKey::from_bytes(&[7u8; 32]).verifying_key()
    }

    #[test]
    fn test_authorized_hosts_line() {
        let line = marshal_authorized_hosts_format(
            "root.example.com",
            b"  ssh-rsa AAAAB3Nza host\n",
            &AuthorizedHostOptions::default(),
        )
        .unwrap();
        assert_eq!(line, "@cert-authority root.example.com ssh-rsa AAAAB3Nza host");
    }

    #[test]
    fn test_authorized_hosts_line_with_logins() {
        let options = AuthorizedHostOptions::builder()
            .logins(vec!["root".to_string(), "admin".to_string()])
            .build();
        let line = marshal_authorized_hosts_format("a", b"ssh-ed25519 AAAA", &options).unwrap();
        assert_eq!(line, "@cert-authority a ssh-ed25519 AAAA logins=root,admin");
    }

    #[test]
    fn test_authorized_hosts_rejects_empty_fields() {
        let options = AuthorizedHostOptions::default();
        assert!(matches!(
            marshal_authorized_hosts_format("", b"ssh-ed25519 AAAA", &options),
            Err(IdentityFileError::InvalidInput(_))
        ));
        assert!(matches!(
            marshal_authorized_hosts_format("cluster", b" \n", &options),
            Err(IdentityFileError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_authorized_host_line_copies_bytes() {
        assert_eq!(
            authorized_host_line("example.com", b" ssh-ed25519 AAAA\n"),
            b"@cert-authority example.com ssh-ed25519 AAAA\n"
        );
        assert_eq!(authorized_host_line("", b""), b"@cert-authority  \n");
        assert_eq!(
            authorized_host_line("c", &[0xff, 0xfe]),
            b"@cert-authority c \xff\xfe\n"
        );
    }

    #[test]
    fn test_authorized_key_wire_format() {
        let key = host_key();
        let line = marshal_authorized_key(&key);
        let (key_type, body) = line.split_once(' ').unwrap();
        assert_eq!(key_type, "ssh-ed25519");

        let blob = STANDARD.decode(body).unwrap();
        assert_eq!(blob.len(), 4 + 11 + 4 + 32);
        assert_eq!(&blob[..4], &11u32.to_be_bytes());
        assert_eq!(&blob[4..15], b"ssh-ed25519");
        assert_eq!(&blob[15..19], &32u32.to_be_bytes());
        assert_eq!(&blob[19..], key.as_bytes());
    }

    #[test]
    fn test_fingerprint_skips_authority_prefix() {
        let key_line = marshal_authorized_key(&host_key());
        let authority_line = marshal_authorized_hosts_format(
            "example.com",
            key_line.as_bytes(),
            &AuthorizedHostOptions::default(),
        )
        .unwrap();

        let plain = fingerprint(key_line.as_bytes()).unwrap();
        assert!(plain.starts_with("SHA256:"));
        assert!(!plain.ends_with('='));
        assert_eq!(fingerprint(authority_line.as_bytes()).unwrap(), plain);
    }

    #[test]
    fn test_fingerprint_rejects_bad_input() {
        assert!(matches!(
            fingerprint(b"ssh-ed25519"),
            Err(IdentityFileError::InvalidInput(_))
        ));
        assert!(matches!(
            fingerprint(b"ssh-ed25519 !!!not-base64!!!"),
            Err(IdentityFileError::DecodingError(_))
        ));
    }
}
