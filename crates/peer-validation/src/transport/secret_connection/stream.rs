//! Encrypted framing over an established key pair.
//!
//! ```text
//! plaintext frame: [len: u32 LE][data: 1024 bytes, zero padded]   1028 bytes
//! sealed frame:    ChaCha20-Poly1305(frame) || tag                1044 bytes
//! ```

use std::io;

use shared_crypto::{FrameCipher, Nonce, SecretKey};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::codec::{self, LengthPrefix};
use super::error::SecretConnectionError;
use super::{DATA_LEN_SIZE, DATA_MAX_SIZE, SEALED_FRAME_SIZE, TOTAL_FRAME_SIZE};

/// Bidirectional encrypted stream without an authenticated peer.
pub(crate) struct EncryptedStream<S> {
    io: S,
    send_cipher: FrameCipher,
    send_nonce: Nonce,
    recv_cipher: FrameCipher,
    recv_nonce: Nonce,
    /// Decrypted bytes not yet handed to a reader
    pending: Vec<u8>,
}

impl<S> EncryptedStream<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub(crate) fn new(io: S, send_key: &SecretKey, recv_key: &SecretKey) -> Self {
        Self {
            io,
            send_cipher: FrameCipher::new(send_key),
            send_nonce: Nonce::zero(),
            recv_cipher: FrameCipher::new(recv_key),
            recv_nonce: Nonce::zero(),
            pending: Vec::new(),
        }
    }

    /// Split `data` into frames, seal and send them.
    pub(crate) async fn write_all(&mut self, data: &[u8]) -> Result<(), SecretConnectionError> {
        for chunk in data.chunks(DATA_MAX_SIZE) {
            let mut frame = [0u8; TOTAL_FRAME_SIZE];
            // chunk.len() <= DATA_MAX_SIZE, fits in u32
            frame[..DATA_LEN_SIZE].copy_from_slice(&(chunk.len() as u32).to_le_bytes());
            frame[DATA_LEN_SIZE..DATA_LEN_SIZE + chunk.len()].copy_from_slice(chunk);

            let sealed = self.send_cipher.seal(&self.send_nonce, &frame)?;
            self.send_nonce.increment()?;
            self.io.write_all(&sealed).await?;
        }
        self.io.flush().await?;
        Ok(())
    }

    /// Read up to `buf.len()` decrypted bytes.
    ///
    /// Serves buffered leftovers first; otherwise reads frames until one
    /// carries data.
    pub(crate) async fn read(&mut self, buf: &mut [u8]) -> Result<usize, SecretConnectionError> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.pending.is_empty() {
            self.read_frame().await?;
        }

        let n = buf.len().min(self.pending.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.drain(..n);
        Ok(n)
    }

    /// Fill `buf` completely.
    pub(crate) async fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), SecretConnectionError> {
        let mut filled = 0;
        while filled < buf.len() {
            filled += self.read(&mut buf[filled..]).await?;
        }
        Ok(())
    }

    /// Read one length-delimited message body.
    pub(crate) async fn read_delimited(&mut self) -> Result<Vec<u8>, SecretConnectionError> {
        let mut prefix = LengthPrefix::new();
        let len = loop {
            let mut byte = [0u8; 1];
            self.read_exact(&mut byte).await?;
            if let Some(len) = prefix.push(byte[0])? {
                break len;
            }
        };

        let mut body = vec![0u8; len];
        self.read_exact(&mut body).await?;
        Ok(body)
    }

    /// Send one length-delimited message in a single write.
    pub(crate) async fn write_delimited<M: prost::Message>(
        &mut self,
        msg: &M,
    ) -> Result<(), SecretConnectionError> {
        self.write_all(&codec::encode_delimited(msg)).await
    }

    pub(crate) async fn shutdown(&mut self) -> io::Result<()> {
        self.io.shutdown().await
    }

    async fn read_frame(&mut self) -> Result<(), SecretConnectionError> {
        let mut sealed = [0u8; SEALED_FRAME_SIZE];
        self.io.read_exact(&mut sealed).await?;

        let frame = self
            .recv_cipher
            .open(&self.recv_nonce, &sealed)
            .map_err(|_| SecretConnectionError::Decrypt)?;
        self.recv_nonce.increment()?;

        let mut len = [0u8; DATA_LEN_SIZE];
        len.copy_from_slice(&frame[..DATA_LEN_SIZE]);
        let chunk_len = u32::from_le_bytes(len);
        if chunk_len as usize > DATA_MAX_SIZE {
            return Err(SecretConnectionError::OversizedChunk(chunk_len));
        }

        self.pending
            .extend_from_slice(&frame[DATA_LEN_SIZE..DATA_LEN_SIZE + chunk_len as usize]);
        Ok(())
    }
}
