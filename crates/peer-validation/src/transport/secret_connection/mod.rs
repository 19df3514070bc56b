//! # Secret Connection
//!
//! Authenticated encryption between two Tendermint nodes.
//!
//! ## Handshake
//!
//! ```text
//! Local                                   Remote
//!   |------ BytesValue(eph_pub) ----------->|
//!   |<----- BytesValue(eph_pub) ------------|
//!   |   X25519 + Merlin transcript + HKDF   |
//!   |====== AuthSigMessage(pk, sig) =======>|   (encrypted)
//!   |<===== AuthSigMessage(pk, sig) ========|
//!   |   verify sig over shared challenge    |
//! ```
//!
//! Both sides send before reading, so the exchange cannot deadlock on
//! transports without buffering beyond one message.

pub mod codec;
pub mod error;
mod kdf;
mod stream;


pub use error::{HandshakeError, SecretConnectionError};

use shared_crypto::{
    Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature, EphemeralKeyPair, EPHEMERAL_KEY_SIZE,
};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use codec::{public_key::Sum, AuthSigMessage, BytesValue, LengthPrefix, PublicKey};
use stream::EncryptedStream;

// =============================================================================
// FRAMING CONSTANTS
// =============================================================================

/// Size of the little-endian length header in each frame.
pub const DATA_LEN_SIZE: usize = 4;

/// Payload capacity of one frame.
pub const DATA_MAX_SIZE: usize = 1024;

/// Plaintext frame size.
pub const TOTAL_FRAME_SIZE: usize = DATA_LEN_SIZE + DATA_MAX_SIZE;

/// Frame size on the wire.
pub const SEALED_FRAME_SIZE: usize = TOTAL_FRAME_SIZE + shared_crypto::symmetric::TAG_SIZE;

// =============================================================================
// SECRET CONNECTION
// =============================================================================

/// An encrypted stream whose remote end proved its long-term key.
pub struct SecretConnection<S> {
    stream: EncryptedStream<S>,
    remote_public_key: Ed25519PublicKey,
}

impl<S> SecretConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Run the handshake over `io`, authenticating as `local`.
    ///
    /// `io` is dropped on failure.
    pub async fn handshake(mut io: S, local: &Ed25519KeyPair) -> Result<Self, HandshakeError> {
        let ephemeral = EphemeralKeyPair::generate();
        let local_ephemeral = ephemeral.public_bytes();
        let remote_ephemeral = exchange_ephemeral_keys(&mut io, &local_ephemeral).await?;

        let shared = ephemeral
            .diffie_hellman(&remote_ephemeral)
            .map_err(|_| HandshakeError::SmallOrderRemoteKey)?;
        let secrets = kdf::derive_secrets(&local_ephemeral, &remote_ephemeral, &shared)?;

        let mut stream = EncryptedStream::new(io, &secrets.send_key, &secrets.recv_key);
        let signature = local.sign(&secrets.challenge);
        stream
            .write_delimited(&auth_message(&local.public_key(), &signature))
            .await?;

        let reply: AuthSigMessage = codec::decode(&stream.read_delimited().await?)?;
        let (remote_public_key, remote_signature) = parse_auth_message(reply)?;
        remote_public_key
            .verify(&secrets.challenge, &remote_signature)
            .map_err(|_| HandshakeError::ChallengeVerification)?;

        Ok(Self {
            stream,
            remote_public_key,
        })
    }

    /// Long-term key the remote proved.
    pub fn remote_public_key(&self) -> &Ed25519PublicKey {
        &self.remote_public_key
    }

    /// Send `data`, split across as many frames as needed.
    pub async fn write_all(&mut self, data: &[u8]) -> Result<(), SecretConnectionError> {
        self.stream.write_all(data).await
    }

    /// Read at most `buf.len()` bytes.
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize, SecretConnectionError> {
        self.stream.read(buf).await
    }

    /// Read exactly `buf.len()` bytes.
    pub async fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), SecretConnectionError> {
        self.stream.read_exact(buf).await
    }

    /// Shut down the write half and release the transport.
    pub async fn close(mut self) -> Result<(), SecretConnectionError> {
        self.stream.shutdown().await?;
        Ok(())
    }
}

impl<S> std::fmt::Debug for SecretConnection<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretConnection")
            .field("remote_public_key", &self.remote_public_key)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// HANDSHAKE STEPS
// =============================================================================

/// Send our ephemeral key and read the remote one (both unencrypted).
pub(crate) async fn exchange_ephemeral_keys<S>(
    io: &mut S,
    local: &[u8; EPHEMERAL_KEY_SIZE],
) -> Result<[u8; EPHEMERAL_KEY_SIZE], HandshakeError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let msg = BytesValue {
        value: local.to_vec(),
    };
    io.write_all(&codec::encode_delimited(&msg)).await?;
    io.flush().await?;

    let reply: BytesValue = codec::decode(&read_delimited_plain(io).await?)?;
    let len = reply.value.len();
    reply
        .value
        .try_into()
        .map_err(|_| HandshakeError::InvalidEphemeralKey(len))
}

async fn read_delimited_plain<S>(io: &mut S) -> Result<Vec<u8>, HandshakeError>
where
    S: AsyncRead + Unpin,
{
    let mut prefix = LengthPrefix::new();
    let len = loop {
        if let Some(len) = prefix.push(io.read_u8().await?)? {
            break len;
        }
    };

    let mut body = vec![0u8; len];
    io.read_exact(&mut body).await?;
    Ok(body)
}

pub(crate) fn auth_message(key: &Ed25519PublicKey, signature: &Ed25519Signature) -> AuthSigMessage {
    AuthSigMessage {
        pub_key: Some(PublicKey {
            sum: Some(Sum::Ed25519(key.as_bytes().to_vec())),
        }),
        sig: signature.as_bytes().to_vec(),
    }
}

fn parse_auth_message(
    msg: AuthSigMessage,
) -> Result<(Ed25519PublicKey, Ed25519Signature), HandshakeError> {
    let key = match msg.pub_key.and_then(|key| key.sum) {
        Some(Sum::Ed25519(bytes)) => Ed25519PublicKey::from_slice(&bytes)?,
        Some(Sum::Secp256k1(_)) => return Err(HandshakeError::UnsupportedKeyType),
        None => return Err(HandshakeError::MissingRemoteKey),
    };
    let signature = Ed25519Signature::from_slice(&msg.sig)?;
    Ok((key, signature))
}
