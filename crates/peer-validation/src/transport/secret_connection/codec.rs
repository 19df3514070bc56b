//! Length-delimited protobuf messages of the handshake.
//!
//! Each message is `uvarint(len) || protobuf(msg)`. Readers accumulate the
//! prefix one byte at a time through [`LengthPrefix`] and then read exactly
//! `len` bytes.

use prost::Message;
use thiserror::Error;

/// Largest message a peer may announce.
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// A u64 varint never needs more than ten bytes.
const MAX_VARINT_LEN: usize = 10;

/// `google.protobuf.BytesValue`, carrying the ephemeral X25519 key.
#[derive(Clone, PartialEq, Message)]
pub struct BytesValue {
    /// Raw bytes
    #[prost(bytes = "vec", tag = "1")]
    pub value: Vec<u8>,
}

/// `tendermint.crypto.PublicKey`.
#[derive(Clone, PartialEq, Message)]
pub struct PublicKey {
    /// Key variant
    #[prost(oneof = "public_key::Sum", tags = "1, 2")]
    pub sum: Option<public_key::Sum>,
}

/// Variants of [`PublicKey`].
pub mod public_key {
    /// Key algorithm and bytes.
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Sum {
        /// Ed25519 public key
        #[prost(bytes = "vec", tag = "1")]
        Ed25519(Vec<u8>),
        /// Secp256k1 public key (never accepted for p2p identities)
        #[prost(bytes = "vec", tag = "2")]
        Secp256k1(Vec<u8>),
    }
}

/// `tendermint.p2p.AuthSigMessage`.
#[derive(Clone, PartialEq, Message)]
pub struct AuthSigMessage {
    /// Long-term public key of the sender
    #[prost(message, optional, tag = "1")]
    pub pub_key: Option<PublicKey>,
    /// Signature over the transcript challenge
    #[prost(bytes = "vec", tag = "2")]
    pub sig: Vec<u8>,
}

/// Codec failures.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Length prefix did not terminate within ten bytes
    #[error("length prefix longer than {MAX_VARINT_LEN} bytes")]
    VarintOverflow,

    /// Announced length exceeds [`MAX_MESSAGE_SIZE`]
    #[error("message of {size} bytes exceeds limit of {max}")]
    MessageTooLarge {
        /// Announced size
        size: u64,
        /// Limit
        max: usize,
    },

    /// Protobuf payload did not decode
    #[error("protobuf decode failed: {0}")]
    Decode(#[from] prost::DecodeError),
}

/// Incremental uvarint length prefix decoder.
#[derive(Debug, Default)]
pub struct LengthPrefix {
    buf: [u8; MAX_VARINT_LEN],
    len: usize,
}

impl LengthPrefix {
    /// Fresh decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte; returns the message length once the prefix is complete.
    pub fn push(&mut self, byte: u8) -> Result<Option<usize>, CodecError> {
        if self.len == MAX_VARINT_LEN {
            return Err(CodecError::VarintOverflow);
        }
        self.buf[self.len] = byte;
        self.len += 1;

        if byte & 0x80 != 0 {
            return Ok(None);
        }

        let size = prost::encoding::decode_varint(&mut &self.buf[..self.len])?;
        match usize::try_from(size) {
            Ok(size) if size <= MAX_MESSAGE_SIZE => Ok(Some(size)),
            _ => Err(CodecError::MessageTooLarge {
                size,
                max: MAX_MESSAGE_SIZE,
            }),
        }
    }
}

/// Encode `msg` with its length prefix.
pub fn encode_delimited<M: Message>(msg: &M) -> Vec<u8> {
    msg.encode_length_delimited_to_vec()
}

/// Decode a message body (prefix already stripped).
pub fn decode<M: Message + Default>(body: &[u8]) -> Result<M, CodecError> {
    Ok(M::decode(body)?)
}
