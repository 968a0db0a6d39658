use bon::Builder;

use crate::error::Result;

/// The credentials belonging to one identity.
///
/// The contents are never interpreted: writers copy the bytes as they are,
/// and the private key is expected to be PEM encoded already.
///
/// # Fields
/// * `private_key` - PEM-encoded private key.
/// * `ssh_cert` - SSH certificate in authorized-key text form, may be empty.
/// * `tls_cert` - PEM-encoded TLS certificate, may be empty.
#[derive(Clone, Default, PartialEq, Eq, Builder)]
pub struct Credentials {
    #[builder(into)]
    pub private_key: Vec<u8>,
    #[builder(default, into)]
    pub ssh_cert: Vec<u8>,
    #[builder(default, into)]
    pub tls_cert: Vec<u8>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("private_key", &format_args!("<{} bytes>", self.private_key.len()))
            .field("ssh_cert", &String::from_utf8_lossy(&self.ssh_cert))
            .field("tls_cert", &String::from_utf8_lossy(&self.tls_cert))
            .finish()
    }
}

impl From<IdentityFile> for Credentials {
    fn from(ident: IdentityFile) -> Self {
        Credentials {
            private_key: ident.private_key,
            ssh_cert: ident.certs.ssh,
            tls_cert: ident.certs.tls,
        }
    }
}

/// Certificates issued to the identity itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Certs {
    pub ssh: Vec<u8>,
    pub tls: Vec<u8>,
}

/// Certificates of the authorities the identity trusts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaCerts {
    /// `@cert-authority` lines, one entry per line.
    pub ssh: Vec<Vec<u8>>,
    /// PEM blocks, one entry per block.
    pub tls: Vec<Vec<u8>>,
}

/// The components recovered from an identity file by [`crate::decode::decode`].
///
/// PEM blocks are assigned by position: the first block is the private key,
/// the second is the TLS certificate and every later block is a trusted TLS
/// authority. The block labels are not consulted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct IdentityFile {
    pub private_key: Vec<u8>,
    pub certs: Certs,
    pub ca_certs: CaCerts,
}

impl IdentityFile {
    pub fn has_private_key(&self) -> bool {
        !self.private_key.is_empty()
    }

    pub fn has_tls_cert(&self) -> bool {
        !self.certs.tls.is_empty()
    }

    /// Places a completed PEM block according to how many blocks came before it.
    pub(crate) fn push_pem_block(&mut self, block: Vec<u8>) {
        if self.private_key.is_empty() {
            self.private_key = block;
        } else if self.certs.tls.is_empty() {
            self.certs.tls = block;
        } else {
            self.ca_certs.tls.push(block);
        }
    }

    /// Decodes the TLS certificate from PEM into DER.
    ///
    /// Returns `Ok(None)` if the identity has no TLS certificate.
    pub fn tls_cert_der(&self) -> Result<Option<Vec<u8>>> {
        if !self.has_tls_cert() {
            return Ok(None);
        }
        Ok(Some(crate::pem_utils::pem_to_der(&self.certs.tls)?))
    }

    /// Decodes every trusted TLS authority certificate from PEM into DER,
    /// preserving their order.
    pub fn tls_ca_certs_der(&self) -> Result<Vec<Vec<u8>>> {
        self.ca_certs
            .tls
            .iter()
            .map(|block| Ok(crate::pem_utils::pem_to_der(block)?))
            .collect()
    }
}

impl std::fmt::Debug for IdentityFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityFile")
            .field("private_key", &format_args!("<{} bytes>", self.private_key.len()))
            .field("certs", &self.certs)
            .field("ca_certs", &self.ca_certs)
            .finish()
    }
}
