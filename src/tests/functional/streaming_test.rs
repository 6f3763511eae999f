// Licensed under the Apache-2.0 license

use crate::digest::{HashAlgo, HashError};
use crate::tests::mock::{enabled_algos, open_session, reference_digest, Probe};
use hex_literal::hex;
use std::sync::Arc;

const CHUNK_SIZES: [usize; 8] = [1, 3, 55, 63, 64, 65, 127, 1000];

fn message(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

#[test]
fn test_chunk_size_invariance() {
    let probe = Arc::new(Probe::default());
    let session = open_session(&probe);
    let msg = message(1000);

    for algo in enabled_algos() {
        let mut whole = session.context(algo).unwrap();
        whole.append(&msg).unwrap();
        let expected = whole.finalize().unwrap();
        assert_eq!(expected.as_ref(), reference_digest(algo, &msg).as_slice());

        for chunk in CHUNK_SIZES {
            let mut ctx = session.context(algo).unwrap();
            for piece in msg.chunks(chunk) {
                ctx.append(piece).unwrap();
            }
            assert_eq!(ctx.total_len(), msg.len() as u64);
            assert_eq!(ctx.finalize().unwrap(), expected, "{algo:?} chunk {chunk}");
        }
    }
}

#[test]
fn test_digest_lengths() {
    let probe = Arc::new(Probe::default());
    let session = open_session(&probe);

    for algo in enabled_algos() {
        let mut ctx = session.context(algo).unwrap();
        ctx.append(b"length check").unwrap();
        let digest = ctx.finalize().unwrap();
        assert_eq!(digest.algo(), algo);
        assert_eq!(digest.len(), algo.digest_size());
    }
}

#[test]
fn test_sha256_abc_streaming() {
    let probe = Arc::new(Probe::default());
    let session = open_session(&probe);

    let mut ctx = session.context(HashAlgo::SHA256).unwrap();
    ctx.append(b"abc").unwrap();
    let digest = ctx.finalize().unwrap();

    assert_eq!(digest.len(), 32);
    assert_eq!(
        digest.as_ref(),
        hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
    );
}

#[cfg(feature = "hw-sha1")]
#[test]
fn test_sha1_abc_streaming() {
    let probe = Arc::new(Probe::default());
    let session = open_session(&probe);

    let mut ctx = session.context(HashAlgo::SHA1).unwrap();
    ctx.append(b"a").unwrap();
    ctx.append(b"bc").unwrap();

    assert_eq!(
        ctx.finalize().unwrap().as_ref(),
        hex!("a9993e364706816aba3e25717850c26c9cd0d89d")
    );
}

#[cfg(feature = "hw-sha224")]
#[test]
fn test_sha224_abc_streaming() {
    let probe = Arc::new(Probe::default());
    let session = open_session(&probe);

    let mut ctx = session.context(HashAlgo::SHA224).unwrap();
    ctx.append(b"ab").unwrap();
    ctx.append(b"c").unwrap();

    assert_eq!(
        ctx.finalize().unwrap().as_ref(),
        hex!("23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7")
    );
}

#[test]
fn test_reuse_after_finalize_skips_engine() {
    let probe = Arc::new(Probe::default());
    let session = open_session(&probe);

    for algo in enabled_algos() {
        let before = probe.computes();
        let mut ctx = session.context(algo).unwrap();
        ctx.append(b"once").unwrap();
        ctx.finalize().unwrap();

        assert_eq!(ctx.finalize(), Err(HashError::InvalidState));
        assert_eq!(ctx.append(b"twice"), Err(HashError::InvalidState));
        assert_eq!(probe.computes(), before + 1);
    }
}

#[cfg(not(feature = "hw-sha224"))]
#[test]
fn test_disabled_algorithm_context_rejected() {
    let probe = Arc::new(Probe::default());
    let session = open_session(&probe);

    assert_eq!(
        session.context(HashAlgo::SHA224).err(),
        Some(HashError::InvalidAlgorithm)
    );
    assert_eq!(probe.computes(), 0);
}
