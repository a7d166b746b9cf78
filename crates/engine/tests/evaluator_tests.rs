mod common;

use pinning_engine as pe;
use pe::domain::types::{PinSource, PinningMode};
use pe::{PresentedCertificate, TrustDecision};

fn presented(chain: Vec<Vec<u8>>) -> Vec<PresentedCertificate> {
    chain.into_iter().map(PresentedCertificate::from).collect()
}

fn cert_store(certs: &[&[u8]]) -> pe::PinStore {
    pe::PinStore::from_anchors(certs.iter().map(|c| pe::TrustAnchor::RawCertificate(c.to_vec())))
}

fn key_store(certs: &[&[u8]]) -> pe::PinStore {
    pe::PinStore::from_anchors(certs.iter().map(|c| pe::TrustAnchor::PublicKey(common::spki(c))))
}

#[test]
fn pinned_leaf_is_accepted() {
    let pki = common::TestPki::new("eval");
    let c1 = pki.issue_leaf("api.example.com");
    let store = cert_store(&[&c1]);

    let decision = pe::evaluate(&presented(pki.chain(&c1)), &store, PinningMode::Certificate);
    assert_eq!(decision, TrustDecision::Accept(()));
}

#[test]
fn different_leaf_with_same_key_is_rejected_by_certificate_pinning() {
    let pki = common::TestPki::new("eval");
    let (k1, k2) = common::shared_key_pair();
    let c1 = pki.issue_leaf_with_key("api.example.com", k1);
    let c2 = pki.issue_leaf_with_key("www.example.com", k2);
    let store = cert_store(&[&c1]);

    let decision = pe::evaluate(&presented(pki.chain(&c2)), &store, PinningMode::Certificate);
    assert_eq!(decision, TrustDecision::Reject);

    // The same rotation is tolerated when the key is what is pinned.
    let decision = pe::evaluate(&presented(pki.chain(&c2)), &key_store(&[&c1]), PinningMode::PublicKey);
    assert!(decision.is_accept());
}

#[test]
fn certificate_pinning_only_looks_at_the_leaf() {
    let pki = common::TestPki::new("eval");
    let other = common::TestPki::new("other");
    let leaf = pki.issue_leaf("api.example.com");

    // Pinning the root certificate never matches.
    let root_only = cert_store(&[&pki.root_der]);
    assert_eq!(
        pe::evaluate(&presented(pki.chain(&leaf)), &root_only, PinningMode::Certificate),
        TrustDecision::Reject
    );

    // Swapping intermediates and root leaves the decision unchanged.
    let store = cert_store(&[&leaf]);
    let mixed = vec![leaf.clone(), other.intermediate_der.clone(), other.root_der.clone()];
    assert!(pe::evaluate(&presented(mixed), &store, PinningMode::Certificate).is_accept());

    // Swapping the leaf flips it.
    let new_leaf = pki.issue_leaf("api.example.com");
    assert_eq!(
        pe::evaluate(&presented(pki.chain(&new_leaf)), &store, PinningMode::Certificate),
        TrustDecision::Reject
    );
}

#[test]
fn key_pinning_matches_any_chain_position() {
    let pki = common::TestPki::new("eval");
    let leaf = pki.issue_leaf("api.example.com");
    let chain = presented(pki.chain(&leaf));

    for pinned in [&leaf, &pki.intermediate_der, &pki.root_der] {
        let store = key_store(&[pinned]);
        assert!(pe::evaluate(&chain, &store, PinningMode::PublicKey).is_accept());
    }

    let stranger = common::TestPki::new("stranger");
    let store = key_store(&[&stranger.root_der]);
    assert_eq!(pe::evaluate(&chain, &store, PinningMode::PublicKey), TrustDecision::Reject);
}

#[test]
fn policies_ignore_anchors_of_the_other_kind() {
    let pki = common::TestPki::new("eval");
    let leaf = pki.issue_leaf("api.example.com");
    let chain = presented(pki.chain(&leaf));

    assert_eq!(pe::evaluate(&chain, &key_store(&[&leaf]), PinningMode::Certificate), TrustDecision::Reject);
    assert_eq!(pe::evaluate(&chain, &cert_store(&[&leaf]), PinningMode::PublicKey), TrustDecision::Reject);
}

#[test]
fn empty_store_or_chain_fails_closed() {
    let pki = common::TestPki::new("eval");
    let leaf = pki.issue_leaf("api.example.com");
    let chain = presented(pki.chain(&leaf));
    let empty = pe::PinStore::default();

    for mode in [PinningMode::Certificate, PinningMode::PublicKey] {
        assert_eq!(pe::evaluate(&chain, &empty, mode), TrustDecision::Reject);
        assert_eq!(pe::evaluate(&[], &cert_store(&[&leaf]), mode), TrustDecision::Reject);
        assert_eq!(pe::evaluate(&[], &key_store(&[&leaf]), mode), TrustDecision::Reject);
    }
}

#[test]
fn comparison_is_exact_bytes() {
    let pki = common::TestPki::new("eval");
    let leaf = pki.issue_leaf("api.example.com");
    let mut truncated = leaf.clone();
    truncated.truncate(leaf.len() - 1);
    let store = cert_store(&[&truncated]);

    let decision = pe::evaluate(&presented(vec![leaf]), &store, PinningMode::Certificate);
    assert_eq!(decision, TrustDecision::Reject);
}

#[test]
fn repeated_evaluation_is_idempotent() {
    let pki = common::TestPki::new("eval");
    let leaf = pki.issue_leaf("api.example.com");
    let chain = presented(pki.chain(&leaf));
    let store = key_store(&[&pki.root_der]);

    let first = pe::evaluate(&chain, &store, PinningMode::PublicKey);
    for _ in 0..10 {
        assert_eq!(pe::evaluate(&chain, &store, PinningMode::PublicKey), first);
    }
}

#[test]
fn malformed_pin_resource_behaves_as_absent() {
    let pki = common::TestPki::new("eval");
    let leaf = pki.issue_leaf("api.example.com");
    let loader = common::memory_loader(&[("bad", b"\x00\x01garbage")]);
    let sources = [PinSource::certificate("api.example.com", "bad")];

    let strategy = pe::certificate_pinning(&sources, &loader);
    assert!(strategy.store().is_empty());
    assert_eq!(
        strategy.evaluate_handshake(pe::DerServerTrust::new(pki.chain(&leaf))),
        TrustDecision::Reject
    );
}
