//! Framed transport (C1): 12-byte header + typed payload over TCP.
//!
//! Every exchange between the three roles is a sequence of frames. Integers
//! are big-endian on the wire (spec §4.1, §9 resolves the original source's
//! inconsistent byte order in favor of big-endian everywhere).

use byteorder::{BigEndian, ByteOrder};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{sleep, Duration};

use crate::error::{DfsError, Result};

/// Fixed 12-byte frame header.
pub const HEADER_LEN: usize = 12;

/// Message-type constants (spec §6). Stable — do not renumber.
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum MessageType {
    Read = 1,
    Write = 2,
    Create = 3,
    Delete = 4,
    Stream = 5,
    GetLocation = 6,
    Location = 7,
    Error = 8,
    Heartbeat = 9,
    ReplicateWrite = 10,
    ReplicateDelete = 11,
    SsRegister = 12,
    SsRegisterAck = 13,
    GetFileInfo = 20,
    GetFileInfoResponse = 21,
    StreamData = 22,
    StreamControl = 23,
    StreamMetadata = 24,
    StreamEnd = 25,
}

impl MessageType {
    fn from_wire(value: u32) -> Result<Self> {
        MessageType::from_u32(value)
            .ok_or_else(|| DfsError::Protocol(format!("unknown message type {value}")))
    }
}

/// A parsed frame header plus its still-unread payload length.
#[derive(Debug, Copy, Clone)]
pub struct FrameHeader {
    pub request_id: u32,
    pub msg_type: MessageType,
    pub payload_size: u32,
}

/// One would-block retry budget for the transport's short-read/short-write
/// handling (spec §5: "retries on transient would-block with a 1ms backoff").
async fn retry_backoff() {
    sleep(Duration::from_millis(1)).await;
}

/// Reads exactly `buf.len()` bytes, retrying on `WouldBlock` and treating any
/// other short read or I/O error as [`ErrorCode::NetworkFailure`].
pub async fn read_exact<R: AsyncRead + Unpin>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]).await {
            Ok(0) => {
                return Err(DfsError::Network("connection closed mid-frame".into()));
            }
            Ok(n) => filled += n,
            Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                retry_backoff().await;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Writes the entirety of `buf`, retrying on `WouldBlock`.
pub async fn write_all<W: AsyncWrite + Unpin>(writer: &mut W, buf: &[u8]) -> Result<()> {
    let mut written = 0;
    while written < buf.len() {
        match writer.write(&buf[written..]).await {
            Ok(0) => return Err(DfsError::Network("write returned 0 bytes".into())),
            Ok(n) => written += n,
            Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                retry_backoff().await;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

/// Reads and decodes a [`FrameHeader`]. A short read closes the connection
/// with `NetworkFailure` at the caller.
pub async fn read_header<R: AsyncRead + Unpin>(reader: &mut R) -> Result<FrameHeader> {
    let mut buf = [0u8; HEADER_LEN];
    read_exact(reader, &mut buf).await?;
    let request_id = BigEndian::read_u32(&buf[0..4]);
    let msg_type = MessageType::from_wire(BigEndian::read_u32(&buf[4..8]))?;
    let payload_size = BigEndian::read_u32(&buf[8..12]);
    Ok(FrameHeader { request_id, msg_type, payload_size })
}

/// Reads exactly `header.payload_size` bytes of payload following a header.
pub async fn read_payload<R: AsyncRead + Unpin>(
    reader: &mut R,
    header: &FrameHeader,
) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; header.payload_size as usize];
    read_exact(reader, &mut buf).await?;
    Ok(buf)
}

/// Encodes a header into its 12-byte wire form.
pub fn encode_header(request_id: u32, msg_type: MessageType, payload_size: u32) -> [u8; HEADER_LEN] {
    let mut buf = [0u8; HEADER_LEN];
    BigEndian::write_u32(&mut buf[0..4], request_id);
    BigEndian::write_u32(&mut buf[4..8], msg_type.to_u32_value());
    BigEndian::write_u32(&mut buf[8..12], payload_size);
    buf
}

/// Writes a header followed by its payload as one logical message.
pub async fn write_frame<W: AsyncWrite + Unpin>(
    writer: &mut W,
    request_id: u32,
    msg_type: MessageType,
    payload: &[u8],
) -> Result<()> {
    let header = encode_header(request_id, msg_type, payload.len() as u32);
    write_all(writer, &header).await?;
    if !payload.is_empty() {
        write_all(writer, payload).await?;
    }
    Ok(())
}

/// Writes an `ERROR` frame carrying a single big-endian `i32` code.
pub async fn write_error<W: AsyncWrite + Unpin>(
    writer: &mut W,
    request_id: u32,
    code: crate::error::ErrorCode,
) -> Result<()> {
    let mut payload = [0u8; 4];
    BigEndian::write_i32(&mut payload, code.as_i32());
    write_frame(writer, request_id, MessageType::Error, &payload).await
}

impl MessageType {
    fn to_u32_value(self) -> u32 {
        use num_traits::ToPrimitive;
        self.to_u32().expect("MessageType always fits in u32")
    }
}

/// Big-endian helpers for the fixed-width fields embedded in payloads
/// (`offset: u64`, `length: u32`, etc.) — kept as free functions rather than
/// a trait so call sites read like the wire layout in spec §6.
pub mod primitive {
    use byteorder::{BigEndian, ByteOrder};

    pub fn read_u16(buf: &[u8]) -> u16 {
        BigEndian::read_u16(buf)
    }
    pub fn read_u32(buf: &[u8]) -> u32 {
        BigEndian::read_u32(buf)
    }
    pub fn read_u64(buf: &[u8]) -> u64 {
        BigEndian::read_u64(buf)
    }
    pub fn read_i32(buf: &[u8]) -> i32 {
        BigEndian::read_i32(buf)
    }
    pub fn write_u16(buf: &mut [u8], value: u16) {
        BigEndian::write_u16(buf, value)
    }
    pub fn write_u32(buf: &mut [u8], value: u32) {
        BigEndian::write_u32(buf, value)
    }
    pub fn write_u64(buf: &mut [u8], value: u64) {
        BigEndian::write_u64(buf, value)
    }
    pub fn write_i32(buf: &mut [u8], value: i32) {
        BigEndian::write_i32(buf, value)
    }

    /// Reads a fixed-size, NUL-padded ASCII path field (`path[N]` in spec §6).
    pub fn read_fixed_str(buf: &[u8]) -> String {
        let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
        String::from_utf8_lossy(&buf[..end]).into_owned()
    }

    /// Writes `s` into a fixed-size NUL-padded field, truncating if needed.
    pub fn write_fixed_str(buf: &mut [u8], s: &str) {
        let bytes = s.as_bytes();
        let n = bytes.len().min(buf.len());
        buf[..n].copy_from_slice(&bytes[..n]);
        for b in &mut buf[n..] {
            *b = 0;
        }
    }
}
