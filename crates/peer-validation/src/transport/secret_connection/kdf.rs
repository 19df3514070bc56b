//! Session key derivation.
//!
//! ```text
//! transcript = Merlin("TENDERMINT_SECRET_CONNECTION_TRANSCRIPT_HASH")
//!   append EPHEMERAL_LOWER_PUBLIC_KEY, EPHEMERAL_UPPER_PUBLIC_KEY, DH_SECRET
//! okm        = HKDF-SHA256(ikm = dh, salt = none, info = KDF_INFO)[..96]
//! challenge  = transcript.challenge_bytes("SECRET_CONNECTION_MAC", 32)
//! ```
//!
//! The side holding the lexicographically smaller ephemeral key receives
//! with `okm[0..32]` and sends with `okm[32..64]`; the other side swaps them.

use hkdf::Hkdf;
use merlin::Transcript;
use sha2::Sha256;
use shared_crypto::{SecretKey, SharedSecret, EPHEMERAL_KEY_SIZE};
use zeroize::Zeroize;

use super::error::HandshakeError;

const TRANSCRIPT_LABEL: &[u8] = b"TENDERMINT_SECRET_CONNECTION_TRANSCRIPT_HASH";
const KDF_INFO: &[u8] = b"TENDERMINT_SECRET_CONNECTION_KEY_AND_CHALLENGE_GEN";
const LOWER_KEY_LABEL: &[u8] = b"EPHEMERAL_LOWER_PUBLIC_KEY";
const UPPER_KEY_LABEL: &[u8] = b"EPHEMERAL_UPPER_PUBLIC_KEY";
const DH_SECRET_LABEL: &[u8] = b"DH_SECRET";
const CHALLENGE_LABEL: &[u8] = b"SECRET_CONNECTION_MAC";

/// Output key material length (two keys plus an unused third block).
const OKM_SIZE: usize = 96;

/// Keys and challenge for one session.
pub(crate) struct SessionSecrets {
    pub recv_key: SecretKey,
    pub send_key: SecretKey,
    pub challenge: [u8; 32],
}

/// Derive session secrets from both ephemeral keys and the DH output.
pub(crate) fn derive_secrets(
    local_ephemeral: &[u8; EPHEMERAL_KEY_SIZE],
    remote_ephemeral: &[u8; EPHEMERAL_KEY_SIZE],
    shared: &SharedSecret,
) -> Result<SessionSecrets, HandshakeError> {
    let local_is_least = local_ephemeral <= remote_ephemeral;
    let (lower, upper) = if local_is_least {
        (local_ephemeral, remote_ephemeral)
    } else {
        (remote_ephemeral, local_ephemeral)
    };

    let mut transcript = Transcript::new(TRANSCRIPT_LABEL);
    transcript.append_message(LOWER_KEY_LABEL, lower);
    transcript.append_message(UPPER_KEY_LABEL, upper);
    transcript.append_message(DH_SECRET_LABEL, shared.as_bytes());

    let mut okm = [0u8; OKM_SIZE];
    Hkdf::<Sha256>::new(None, shared.as_bytes())
        .expand(KDF_INFO, &mut okm)
        .map_err(|_| HandshakeError::KeyDerivation)?;

    let (recv, send) = if local_is_least {
        (&okm[..32], &okm[32..64])
    } else {
        (&okm[32..64], &okm[..32])
    };
    let recv_key = SecretKey::from_slice(recv)?;
    let send_key = SecretKey::from_slice(send)?;
    okm.zeroize();

    let mut challenge = [0u8; 32];
    transcript.challenge_bytes(CHALLENGE_LABEL, &mut challenge);

    Ok(SessionSecrets {
        recv_key,
        send_key,
        challenge,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_crypto::EphemeralKeyPair;

    fn both_sides() -> (SessionSecrets, SessionSecrets) {
        let a = EphemeralKeyPair::generate();
        let b = EphemeralKeyPair::generate();
        let (a_pub, b_pub) = (a.public_bytes(), b.public_bytes());

        let a_dh = a.diffie_hellman(&b_pub).unwrap();
        let b_dh = b.diffie_hellman(&a_pub).unwrap();

        (
            derive_secrets(&a_pub, &b_pub, &a_dh).unwrap(),
            derive_secrets(&b_pub, &a_pub, &b_dh).unwrap(),
        )
    }

    #[test]
    fn test_keys_are_mirrored() {
        let (a, b) = both_sides();

        assert_eq!(a.send_key.as_bytes(), b.recv_key.as_bytes());
        assert_eq!(a.recv_key.as_bytes(), b.send_key.as_bytes());
        assert_ne!(a.send_key.as_bytes(), a.recv_key.as_bytes());
    }

    #[test]
    fn test_challenge_agrees() {
        let (a, b) = both_sides();
        assert_eq!(a.challenge, b.challenge);
    }

    #[test]
    fn test_sessions_are_independent() {
        let (first, _) = both_sides();
        let (second, _) = both_sides();
        assert_ne!(first.challenge, second.challenge);
    }
}
