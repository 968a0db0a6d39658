/// Convert DER‑encoded data into a PEM‑encoded string with the provided label.
///
/// Lines end with `\n`, matching what [`crate::decode::decode`] produces for
/// each block it reads.
pub fn der_to_pem(der: &[u8], label: &str) -> String {
    let pem = pem::Pem::new(label, der);
    pem::encode_config(
        &pem,
        pem::EncodeConfig::new().set_line_ending(pem::LineEnding::LF),
    )
}

/// Convert a single PEM block to DER‑encoded bytes.
pub fn pem_to_der(pem_block: &[u8]) -> Result<Vec<u8>, pem::PemError> {
    let pem = pem::parse(pem_block)?;
    Ok(pem.contents().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_der_pem_conversion() {
        let encoded = der_to_pem(b"CACERT", "CERTIFICATE");
        assert!(encoded.starts_with("-----BEGIN CERTIFICATE-----"));
        assert!(encoded.ends_with("-----END CERTIFICATE-----\n"));
        assert!(!encoded.contains('\r'));
        assert_eq!(pem_to_der(encoded.as_bytes()).unwrap(), b"CACERT");
    }
}
