#![allow(dead_code)]

use std::path::Path;

use rcgen::{
    BasicConstraints, Certificate, CertificateParams, DistinguishedName, DnType, IsCa, KeyPair,
    PKCS_ECDSA_P256_SHA256,
};

use pinning_engine::MemoryLoader;

fn params(common_name: &str, san: Vec<String>, ca: bool, key: KeyPair) -> CertificateParams {
    let mut params = CertificateParams::new(san);
    params.alg = &PKCS_ECDSA_P256_SHA256;
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, common_name);
    params.distinguished_name = dn;
    if ca {
        params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    }
    params.key_pair = Some(key);
    params
}

fn fresh_key() -> KeyPair {
    KeyPair::generate(&PKCS_ECDSA_P256_SHA256).expect("keypair")
}

/// Root → intermediate test hierarchy. DER bytes are serialized once because
/// every ECDSA signature differs.
pub struct TestPki {
    root: Certificate,
    intermediate: Certificate,
    pub root_der: Vec<u8>,
    pub intermediate_der: Vec<u8>,
}

impl TestPki {
    pub fn new(name: &str) -> Self {
        let root = Certificate::from_params(params(&format!("{name} Root CA"), vec![], true, fresh_key()))
            .expect("root cert");
        let intermediate = Certificate::from_params(params(
            &format!("{name} Intermediate CA"),
            vec![],
            true,
            fresh_key(),
        ))
        .expect("intermediate cert");
        let root_der = root.serialize_der().expect("root der");
        let intermediate_der = intermediate
            .serialize_der_with_signer(&root)
            .expect("intermediate der");
        Self { root, intermediate, root_der, intermediate_der }
    }

    /// Leaf for `dns_name` with a freshly generated key.
    pub fn issue_leaf(&self, dns_name: &str) -> Vec<u8> {
        self.issue_leaf_with_key(dns_name, fresh_key())
    }

    pub fn issue_leaf_with_key(&self, dns_name: &str, key: KeyPair) -> Vec<u8> {
        let leaf = Certificate::from_params(params(dns_name, vec![dns_name.to_string()], false, key))
            .expect("leaf cert");
        leaf.serialize_der_with_signer(&self.intermediate).expect("leaf der")
    }

    /// `[leaf, intermediate, root]`, as a server would present it.
    pub fn chain(&self, leaf: &[u8]) -> Vec<Vec<u8>> {
        vec![leaf.to_vec(), self.intermediate_der.clone(), self.root_der.clone()]
    }
}

/// Two handles on the same key pair, for leaves that share a public key.
pub fn shared_key_pair() -> (KeyPair, KeyPair) {
    let key = fresh_key();
    let pem = key.serialize_pem();
    let copy = KeyPair::from_pem(&pem).expect("key from pem");
    (key, copy)
}

pub fn to_pem(der: &[u8]) -> String {
    openssl::x509::X509::from_der(der)
        .and_then(|c| c.to_pem())
        .map(|p| String::from_utf8(p).expect("utf8 pem"))
        .expect("pem")
}

pub fn spki(der: &[u8]) -> Vec<u8> {
    pinning_engine::extract_public_key(der)
        .expect("public key")
        .into_bytes()
}

pub fn memory_loader(entries: &[(&str, &[u8])]) -> MemoryLoader {
    let mut loader = MemoryLoader::new();
    for (name, bytes) in entries {
        loader.insert(*name, "cer", bytes.to_vec());
    }
    loader
}

pub fn write_resource(dir: &Path, file_name: &str, bytes: &[u8]) {
    std::fs::write(dir.join(file_name), bytes).expect("write resource");
}
