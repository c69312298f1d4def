//! Per-link frame codec and handshake state.
//!
//! A [`Link`] owns the receive state machine for one physical serial
//! link plus the handshake bookkeeping that decides when the next
//! outbound message may go out. Decoding is byte-at-a-time and
//! resynchronizes on every start-of-message marker, so line noise or a
//! truncated frame never wedges the link.

use heapless::Vec;

use crate::frame::{
    self, ACK, MAX_FRAME_DATA, MAX_PAYLOAD, MIN_FRAME_DATA, NAK, PREAMBLE, START_OF_MESSAGE,
};

/// How long a sent frame may wait for its ACK/NAK before the link counts
/// as timed out, in caller-supplied milliseconds.
pub const REPLY_TIMEOUT_MS: u32 = 1000;

/// Byte-emission side of the transport.
///
/// The codec calls this synchronously for every wire byte; a failure
/// aborts the send in progress.
pub trait ByteSink {
    type Error;

    /// Emit one byte on the wire.
    fn send_byte(&mut self, byte: u8) -> Result<(), Self::Error>;
}

/// Consumer of completed, checksum-valid payloads.
pub trait MessageHandler {
    /// Called with the decoded payload of an accepted frame.
    ///
    /// The returned status is forwarded verbatim to the caller of
    /// [`Link::receive_byte`].
    fn on_message(&mut self, payload: &[u8]) -> RxStatus;
}

/// Outcome of feeding one inbound byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxStatus {
    /// Byte consumed: frame progress, or a delivered message.
    Ok,
    /// A pending handshake was positively acknowledged.
    Ack,
    /// A pending handshake was negatively acknowledged.
    Nak,
    /// Unclassifiable byte outside any frame. Not an error; callers may
    /// count these to gauge line noise.
    Junk,
    /// Declared frame length above the protocol maximum; frame abandoned.
    MessageTooBig,
    /// Declared frame length below the protocol minimum; frame abandoned.
    MessageTooSmall,
    /// Frame received in full but the checksum did not match; the payload
    /// was discarded and a NAK sent back.
    BadChecksum,
}

/// Send readiness, as seen by whoever wants to transmit next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Readiness {
    /// Last handshake was a positive acknowledge.
    Ready,
    /// Last handshake was a negative acknowledge.
    Negative,
    /// Handshake pending, within the reply timeout.
    Busy,
    /// Handshake pending and the reply timeout has elapsed.
    TimedOut,
}

/// Errors from an outbound send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError<E> {
    /// Payload exceeds [`MAX_PAYLOAD`]; nothing was emitted.
    PayloadTooLarge,
    /// The transport failed; the send is aborted mid-frame.
    Transport(E),
}

/// Handshake result for the most recent send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reply {
    Pending,
    Ack,
    Nak,
}

/// Codec state for one physical link.
#[derive(Debug, Clone)]
pub struct Link {
    /// True while mid-frame.
    rx_active: bool,
    /// First hex digit of a pair, awaiting its partner.
    nibble: Option<u8>,
    /// Declared payload-plus-checksum byte count; None until decoded.
    frame_len: Option<u8>,
    /// Running checksum over the length field and payload bytes.
    sum: u8,
    /// Decoded frame bytes, checksum byte included.
    rx_buf: Vec<u8, MAX_FRAME_DATA>,
    last_reply: Reply,
    /// When the last send completed (caller-supplied milliseconds).
    last_sent_ms: u32,
    /// Copy of the last transmitted payload, for retransmission.
    tx_buf: Vec<u8, MAX_PAYLOAD>,
}

impl Default for Link {
    fn default() -> Self {
        Self::new()
    }
}

impl Link {
    /// Create a link in the idle, ready-to-send state.
    pub fn new() -> Self {
        Self {
            rx_active: false,
            nibble: None,
            frame_len: None,
            sum: 0,
            rx_buf: Vec::new(),
            last_reply: Reply::Ack,
            last_sent_ms: 0,
            tx_buf: Vec::new(),
        }
    }

    /// Feed one inbound byte through the decoder.
    ///
    /// Accepted frames are handed to `handler` after an ACK is emitted on
    /// `sink`; checksum failures emit a NAK instead. A start-of-message
    /// marker always begins a fresh frame, discarding any partial one.
    pub fn receive_byte<S: ByteSink, H: MessageHandler>(
        &mut self,
        byte: u8,
        sink: &mut S,
        handler: &mut H,
    ) -> Result<RxStatus, S::Error> {
        if byte == START_OF_MESSAGE {
            self.rx_active = true;
            self.nibble = None;
            self.frame_len = None;
            self.sum = 0;
            self.rx_buf.clear();
            return Ok(RxStatus::Ok);
        }
        if byte == ACK && self.last_reply == Reply::Pending {
            self.last_reply = Reply::Ack;
            return Ok(RxStatus::Ack);
        }
        if byte == NAK && self.last_reply == Reply::Pending {
            self.last_reply = Reply::Nak;
            return Ok(RxStatus::Nak);
        }
        if !self.rx_active {
            return Ok(RxStatus::Junk);
        }

        // Mid-frame: pair hex digits up into byte values.
        let high = match self.nibble.take() {
            Some(high) => high,
            None => {
                self.nibble = Some(byte);
                return Ok(RxStatus::Ok);
            }
        };
        let value = (frame::hex_value(high) << 4) | frame::hex_value(byte);

        let len = match self.frame_len {
            None => {
                // First decoded byte is the length field.
                if value as usize > MAX_FRAME_DATA {
                    self.rx_active = false;
                    return Ok(RxStatus::MessageTooBig);
                }
                if (value as usize) < MIN_FRAME_DATA {
                    self.rx_active = false;
                    return Ok(RxStatus::MessageTooSmall);
                }
                self.frame_len = Some(value);
                self.rx_buf.clear();
                // The length field seeds the checksum.
                self.sum = value;
                return Ok(RxStatus::Ok);
            }
            Some(len) => len,
        };

        // Capacity equals MAX_FRAME_DATA and len never exceeds it.
        let _ = self.rx_buf.push(value);
        if self.rx_buf.len() < len as usize {
            self.sum = self.sum.wrapping_add(value);
            return Ok(RxStatus::Ok);
        }

        // Terminal byte of the frame: the checksum itself.
        self.rx_active = false;
        if self.sum == value {
            sink.send_byte(ACK)?;
            let payload_len = len as usize - 1;
            Ok(handler.on_message(&self.rx_buf[..payload_len]))
        } else {
            sink.send_byte(NAK)?;
            Ok(RxStatus::BadChecksum)
        }
    }

    /// Report whether the link can take a new outbound message.
    ///
    /// Pure function of link state and the supplied time.
    pub fn ready_to_send(&self, now_ms: u32) -> Readiness {
        match self.last_reply {
            Reply::Ack => Readiness::Ready,
            Reply::Nak => Readiness::Negative,
            Reply::Pending => {
                if now_ms.wrapping_sub(self.last_sent_ms) >= REPLY_TIMEOUT_MS {
                    Readiness::TimedOut
                } else {
                    Readiness::Busy
                }
            }
        }
    }

    /// Encode and emit `payload` as one frame, recording it for
    /// retransmission.
    ///
    /// Marks the handshake pending; the caller learns the outcome through
    /// [`Link::receive_byte`] (ACK/NAK) or [`Link::ready_to_send`]
    /// (timeout).
    pub fn send_message<S: ByteSink>(
        &mut self,
        payload: &[u8],
        sink: &mut S,
        now_ms: u32,
    ) -> Result<(), SendError<S::Error>> {
        if payload.len() > MAX_PAYLOAD {
            return Err(SendError::PayloadTooLarge);
        }
        self.tx_buf.clear();
        let _ = self.tx_buf.extend_from_slice(payload);
        self.transmit(sink, now_ms)
    }

    /// Retransmit the last sent payload as a full fresh frame.
    pub fn resend_last<S: ByteSink>(
        &mut self,
        sink: &mut S,
        now_ms: u32,
    ) -> Result<(), SendError<S::Error>> {
        self.transmit(sink, now_ms)
    }

    fn transmit<S: ByteSink>(
        &mut self,
        sink: &mut S,
        now_ms: u32,
    ) -> Result<(), SendError<S::Error>> {
        // The preamble resynchronizes a listener stuck mid-line; it is
        // only needed when the previous exchange fully resolved.
        if self.last_reply != Reply::Pending {
            for byte in PREAMBLE {
                sink.send_byte(byte).map_err(SendError::Transport)?;
            }
        }
        self.last_reply = Reply::Pending;

        sink.send_byte(START_OF_MESSAGE)
            .map_err(SendError::Transport)?;

        // Length field counts the payload plus the checksum byte, and
        // seeds the running sum.
        let mut sum = (self.tx_buf.len() as u8).wrapping_add(1);
        emit_pair(sink, sum).map_err(SendError::Transport)?;
        for &byte in &self.tx_buf {
            sum = sum.wrapping_add(byte);
            emit_pair(sink, byte).map_err(SendError::Transport)?;
        }
        emit_pair(sink, sum).map_err(SendError::Transport)?;

        self.last_sent_ms = now_ms;
        Ok(())
    }
}

/// Emit one byte as two hex digits, most-significant nibble first.
fn emit_pair<S: ByteSink>(sink: &mut S, value: u8) -> Result<(), S::Error> {
    sink.send_byte(frame::hex_digit(value >> 4))?;
    sink.send_byte(frame::hex_digit(value))
}
