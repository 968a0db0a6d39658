use bon::Builder;

/// A TLS certificate and, optionally, its private key as held by an authority.
///
/// Only `cert` is ever written into an identity file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct TlsKeyPair {
    #[builder(into)]
    pub cert: Vec<u8>,
    #[builder(default, into)]
    pub key: Vec<u8>,
}

/// Read-only view of a trusted certificate authority.
///
/// Implementations expose the cluster the authority belongs to, the SSH host
/// keys used to check host certificates, and the TLS certificates used to
/// validate peers. Identity writers only iterate over these values.
pub trait CertAuthority {
    /// Returns the name of the cluster this authority signs for.
    fn cluster_name(&self) -> &str;

    /// Returns the SSH public keys in authorized-key text form, e.g.
    /// `ssh-ed25519 AAAA...`.
    fn checking_keys(&self) -> &[Vec<u8>];

    /// Returns the TLS key pairs of this authority.
    fn tls_key_pairs(&self) -> &[TlsKeyPair];
}

/// An authority whose material is already held in memory.
///
/// # Example
/// ```
/// use identityfile::authority::{CertAuthority, StaticCertAuthority, TlsKeyPair};
///
/// let ca = StaticCertAuthority::builder()
///     .cluster_name("example.com")
///     .checking_keys(vec![b"ssh-ed25519 AAAA".to_vec()])
///     .tls_key_pairs(vec![TlsKeyPair::builder().cert(b"cert".to_vec()).build()])
///     .build();
/// assert_eq!(ca.cluster_name(), "example.com");
/// assert_eq!(ca.tls_key_pairs().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct StaticCertAuthority {
    #[builder(into)]
    pub cluster_name: String,
    #[builder(default)]
    pub checking_keys: Vec<Vec<u8>>,
    #[builder(default)]
    pub tls_key_pairs: Vec<TlsKeyPair>,
}

impl CertAuthority for StaticCertAuthority {
    fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    fn checking_keys(&self) -> &[Vec<u8>] {
        &self.checking_keys
    }

    fn tls_key_pairs(&self) -> &[TlsKeyPair] {
        &self.tls_key_pairs
    }
}

impl<T: CertAuthority + ?Sized> CertAuthority for &T {
    fn cluster_name(&self) -> &str {
        (**self).cluster_name()
    }

    fn checking_keys(&self) -> &[Vec<u8>] {
        (**self).checking_keys()
    }

    fn tls_key_pairs(&self) -> &[TlsKeyPair] {
        (**self).tls_key_pairs()
    }
}

impl<T: CertAuthority + ?Sized> CertAuthority for Box<T> {
    fn cluster_name(&self) -> &str {
        (**self).cluster_name()
    }

    fn checking_keys(&self) -> &[Vec<u8>] {
        (**self).checking_keys()
    }

    fn tls_key_pairs(&self) -> &[TlsKeyPair] {
        (**self).tls_key_pairs()
    }
}
