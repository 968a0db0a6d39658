use ed25519_dalek::SigningKey;
use ed25519_dalek::pkcs8::EncodePrivateKey;
use ed25519_dalek::pkcs8::spki::der::pem::LineEnding;
use identityfile::authority::{StaticCertAuthority, TlsKeyPair};
use identityfile::identity::Credentials;
use identityfile::pem_utils::der_to_pem;
use identityfile::sshutils::marshal_authorized_key;

pub fn private_key_pem(seed: u8) -> String {
    let key = SigningKey::from_bytes(&[seed; 32]);
    let mut pem = key
        .to_pkcs8_pem(LineEnding::LF)
        .expect("Failed to encode private key")
        .to_string();
    if !pem.ends_with('\n') {
        pem.push('\n');
    }
    pem
}

pub fn host_key_line(seed: u8) -> Vec<u8> {
    let key = SigningKey::from_bytes(&[seed; 32]);
    marshal_authorized_key(&key.verifying_key()).into_bytes()
}

pub fn cert_pem(contents: &str) -> String {
    der_to_pem(contents.as_bytes(), "CERTIFICATE")
}

pub fn credentials() -> Credentials {
    Credentials::builder()
        .private_key(private_key_pem(1).into_bytes())
        .ssh_cert(b"ssh-ed25519-cert-v01@openssh.com AAAAIHNzaC1lZDI1NTE5 alice\n".to_vec())
        .tls_cert(cert_pem("TLSCERT").into_bytes())
        .build()
}

pub fn authority(cluster_name: &str, ca_certs: &[&str]) -> StaticCertAuthority {
    StaticCertAuthority::builder()
        .cluster_name(cluster_name)
        .checking_keys(vec![host_key_line(2)])
        .tls_key_pairs(
            ca_certs
                .iter()
                .map(|cert| TlsKeyPair::builder().cert(cert_pem(cert).into_bytes()).build())
                .collect(),
        )
        .build()
}
