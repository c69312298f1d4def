//! Bounded retransmission queue.
//!
//! Serializes outbound messages over one [`Link`] so at most one is in
//! flight, retrying on NAK or timeout up to [`MAX_ATTEMPTS`] before
//! giving up. The queue owns the link; inbound bytes and the periodic
//! update tick both go through it, which is what keeps handshake
//! outcomes attributed to the send that caused them.
//!
//! There is no internal timer: call [`SendQueue::update`] on a regular
//! cadence (every transport poll is fine) with the current monotonic
//! time. Completions are returned from the call that retires an entry,
//! exactly once per accepted message.

use heapless::Vec;

use crate::frame::MAX_PAYLOAD;
use crate::link::{ByteSink, Link, MessageHandler, Readiness, RxStatus, SendError};

/// Ring capacity. Must stay a power of two for the masked index
/// arithmetic; one slot is always kept empty to tell full from empty.
pub const QUEUE_SIZE: usize = 8;

/// Send attempts per message, the initial send included.
pub const MAX_ATTEMPTS: u8 = 3;

/// Terminal disposition of a queued message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendOutcome {
    /// The panel acknowledged the message.
    Acknowledged,
    /// The panel negatively acknowledged the final attempt.
    Rejected,
    /// Every attempt went unanswered.
    RetriesExhausted,
}

/// Completion report for a retired entry, carrying the submitter's
/// opaque token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SendComplete {
    pub token: u32,
    pub outcome: SendOutcome,
}

/// Errors from submitting a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueError<E> {
    /// No free slot; retry after a retirement.
    Full,
    /// Payload exceeds [`MAX_PAYLOAD`].
    PayloadTooLarge,
    /// The transport failed while draining the queue.
    Transport(E),
}

#[derive(Debug, Clone)]
struct Entry {
    msg: Vec<u8, MAX_PAYLOAD>,
    token: u32,
    attempts: u8,
}

impl Entry {
    const EMPTY: Self = Self {
        msg: Vec::new(),
        token: 0,
        attempts: 0,
    };
}

/// FIFO retransmission queue over an owned [`Link`].
#[derive(Debug)]
pub struct SendQueue {
    link: Link,
    slots: [Entry; QUEUE_SIZE],
    /// Next entry to send or retire.
    head: usize,
    /// Next free slot.
    tail: usize,
    /// True while this queue owns the outcome of the in-flight send.
    awaiting_reply: bool,
}

impl SendQueue {
    /// Create an empty queue driving `link`.
    pub fn new(link: Link) -> Self {
        Self {
            link,
            slots: [Entry::EMPTY; QUEUE_SIZE],
            head: 0,
            tail: 0,
            awaiting_reply: false,
        }
    }

    /// The underlying link.
    pub fn link(&self) -> &Link {
        &self.link
    }

    /// Number of queued, not-yet-retired messages.
    pub fn len(&self) -> usize {
        self.tail.wrapping_sub(self.head) & (QUEUE_SIZE - 1)
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn is_full(&self) -> bool {
        self.len() == QUEUE_SIZE - 1
    }

    /// Submit a message for transmission.
    ///
    /// The payload is copied into a free slot and a drain is attempted
    /// immediately. `token` is handed back in the [`SendComplete`] that
    /// eventually retires the message. On rejection the queue is
    /// unchanged.
    pub fn enqueue<S: ByteSink>(
        &mut self,
        payload: &[u8],
        token: u32,
        sink: &mut S,
        now_ms: u32,
    ) -> Result<Option<SendComplete>, EnqueueError<S::Error>> {
        if self.is_full() {
            return Err(EnqueueError::Full);
        }
        let entry = &mut self.slots[self.tail];
        entry.msg.clear();
        entry
            .msg
            .extend_from_slice(payload)
            .map_err(|_| EnqueueError::PayloadTooLarge)?;
        entry.token = token;
        entry.attempts = 0;
        self.tail = (self.tail + 1) & (QUEUE_SIZE - 1);

        self.update(sink, now_ms).map_err(|err| match err {
            SendError::PayloadTooLarge => EnqueueError::PayloadTooLarge,
            SendError::Transport(err) => EnqueueError::Transport(err),
        })
    }

    /// Drive the queue: send the head entry when the link allows it, or
    /// settle a timed-out handshake.
    ///
    /// Idempotent and safe to call on every poll. Each call does at most
    /// one of: nothing, retire/requeue a timed-out send, or transmit.
    pub fn update<S: ByteSink>(
        &mut self,
        sink: &mut S,
        now_ms: u32,
    ) -> Result<Option<SendComplete>, SendError<S::Error>> {
        if self.is_empty() {
            return Ok(None);
        }
        match self.link.ready_to_send(now_ms) {
            Readiness::Busy => return Ok(None),
            Readiness::TimedOut if self.awaiting_reply => {
                // The reply never came; treat it like a notification.
                // The next update call performs the retry.
                return Ok(self.settle(SendOutcome::RetriesExhausted));
            }
            _ => {}
        }

        let entry = &mut self.slots[self.head];
        entry.attempts += 1;
        self.awaiting_reply = true;
        self.link.send_message(&entry.msg, sink, now_ms)?;
        Ok(None)
    }

    /// Feed one inbound byte through the link, routing any handshake
    /// outcome to the in-flight entry.
    ///
    /// When using a queue, deliver all inbound bytes here rather than to
    /// the link directly, or handshake outcomes will be lost.
    pub fn receive_byte<S: ByteSink, H: MessageHandler>(
        &mut self,
        byte: u8,
        sink: &mut S,
        handler: &mut H,
    ) -> Result<(RxStatus, Option<SendComplete>), S::Error> {
        let status = self.link.receive_byte(byte, sink, handler)?;
        let completion = match status {
            RxStatus::Ack => self.settle(SendOutcome::Acknowledged),
            RxStatus::Nak => self.settle(SendOutcome::Rejected),
            _ => None,
        };
        Ok((status, completion))
    }

    /// Resolve the in-flight send: retire the head entry if it is done,
    /// otherwise leave it for another attempt.
    fn settle(&mut self, outcome: SendOutcome) -> Option<SendComplete> {
        if !self.awaiting_reply {
            // The outcome belongs to a send this queue did not issue.
            return None;
        }
        // Drop the listener role either way, so a later stray ACK/NAK
        // cannot be attributed to a send that already resolved.
        self.awaiting_reply = false;

        let entry = &self.slots[self.head];
        if outcome == SendOutcome::Acknowledged || entry.attempts >= MAX_ATTEMPTS {
            let complete = SendComplete {
                token: entry.token,
                outcome,
            };
            self.head = (self.head + 1) & (QUEUE_SIZE - 1);
            return Some(complete);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{ACK, NAK, START_OF_MESSAGE};
    use crate::link::REPLY_TIMEOUT_MS;

    #[derive(Default)]
    struct Wire {
        bytes: Vec<u8, 2048>,
    }

    impl Wire {
        fn frames_sent(&self) -> usize {
            self.bytes
                .iter()
                .filter(|&&b| b == START_OF_MESSAGE)
                .count()
        }
    }

    impl ByteSink for Wire {
        type Error = ();

        fn send_byte(&mut self, byte: u8) -> Result<(), ()> {
            self.bytes.push(byte).map_err(|_| ())
        }
    }

    #[derive(Default)]
    struct Inbox;

    impl MessageHandler for Inbox {
        fn on_message(&mut self, _payload: &[u8]) -> RxStatus {
            RxStatus::Ok
        }
    }

    fn reply(queue: &mut SendQueue, byte: u8) -> Option<SendComplete> {
        let mut wire = Wire::default();
        let mut inbox = Inbox::default();
        let (_, completion) = queue.receive_byte(byte, &mut wire, &mut inbox).unwrap();
        completion
    }

    #[test]
    fn test_enqueue_sends_immediately() {
        let mut queue = SendQueue::new(Link::new());
        let mut wire = Wire::default();

        let completion = queue.enqueue(&[0x01, 0x02], 7, &mut wire, 0).unwrap();
        assert_eq!(completion, None);
        assert_eq!(wire.frames_sent(), 1);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.link().ready_to_send(0), Readiness::Busy);
    }

    #[test]
    fn test_ack_retires_head() {
        let mut queue = SendQueue::new(Link::new());
        let mut wire = Wire::default();
        queue.enqueue(&[0x01], 42, &mut wire, 0).unwrap();

        let completion = reply(&mut queue, ACK);
        assert_eq!(
            completion,
            Some(SendComplete {
                token: 42,
                outcome: SendOutcome::Acknowledged,
            })
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = SendQueue::new(Link::new());
        let mut wire = Wire::default();

        queue.enqueue(&[0x01], 1, &mut wire, 0).unwrap();
        queue.enqueue(&[0x02], 2, &mut wire, 0).unwrap();
        queue.enqueue(&[0x03], 3, &mut wire, 0).unwrap();
        // Only the first message went out; the link is busy.
        assert_eq!(wire.frames_sent(), 1);

        let mut retired = Vec::<u32, 4>::new();
        for _ in 0..3 {
            let completion = reply(&mut queue, ACK).unwrap();
            let _ = retired.push(completion.token);
            queue.update(&mut wire, 0).unwrap();
        }
        assert_eq!(&retired[..], &[1, 2, 3]);
        assert!(queue.is_empty());
        assert_eq!(wire.frames_sent(), 3);
    }

    #[test]
    fn test_queue_full_rejects_submission() {
        let mut queue = SendQueue::new(Link::new());
        let mut wire = Wire::default();

        // One slot stays empty, so capacity - 1 submissions fit.
        for token in 0..QUEUE_SIZE as u32 - 1 {
            queue.enqueue(&[token as u8], token, &mut wire, 0).unwrap();
        }
        assert!(queue.is_full());
        assert_eq!(
            queue.enqueue(&[0xEE], 99, &mut wire, 0),
            Err(EnqueueError::Full)
        );
        assert_eq!(queue.len(), QUEUE_SIZE - 1);

        // Retiring one entry frees one slot.
        reply(&mut queue, ACK).unwrap();
        queue.enqueue(&[0xEE], 99, &mut wire, 0).unwrap();
    }

    #[test]
    fn test_oversize_payload_rejected() {
        let mut queue = SendQueue::new(Link::new());
        let mut wire = Wire::default();
        let payload = [0u8; MAX_PAYLOAD + 1];

        assert_eq!(
            queue.enqueue(&payload, 0, &mut wire, 0),
            Err(EnqueueError::PayloadTooLarge)
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_timeout_retries_exactly_three_attempts() {
        let mut queue = SendQueue::new(Link::new());
        let mut wire = Wire::default();
        queue.enqueue(&[0x01], 5, &mut wire, 0).unwrap();

        let mut completion = None;
        let mut now = 0;
        // Poll for a long time with no reply ever arriving.
        for _ in 0..20 {
            now += REPLY_TIMEOUT_MS;
            let first = queue.update(&mut wire, now).unwrap();
            let second = queue.update(&mut wire, now).unwrap();
            if let Some(done) = first.or(second) {
                completion = Some(done);
                break;
            }
        }

        assert_eq!(
            completion,
            Some(SendComplete {
                token: 5,
                outcome: SendOutcome::RetriesExhausted,
            })
        );
        // Initial send plus two retries, and never a fourth attempt.
        assert_eq!(wire.frames_sent(), 3);
        assert!(queue.is_empty());

        let mut later = now + REPLY_TIMEOUT_MS;
        for _ in 0..4 {
            queue.update(&mut wire, later).unwrap();
            later += REPLY_TIMEOUT_MS;
        }
        assert_eq!(wire.frames_sent(), 3);
    }

    #[test]
    fn test_nak_on_final_attempt_reports_rejected() {
        let mut queue = SendQueue::new(Link::new());
        let mut wire = Wire::default();
        queue.enqueue(&[0x01], 9, &mut wire, 0).unwrap();

        // Two NAKs leave the entry queued for another attempt.
        assert_eq!(reply(&mut queue, NAK), None);
        queue.update(&mut wire, 0).unwrap();
        assert_eq!(reply(&mut queue, NAK), None);
        queue.update(&mut wire, 0).unwrap();
        assert_eq!(wire.frames_sent(), 3);

        // The third NAK is final.
        let completion = reply(&mut queue, NAK);
        assert_eq!(
            completion,
            Some(SendComplete {
                token: 9,
                outcome: SendOutcome::Rejected,
            })
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_update_is_idempotent_while_busy() {
        let mut queue = SendQueue::new(Link::new());
        let mut wire = Wire::default();
        queue.enqueue(&[0x01], 1, &mut wire, 0).unwrap();
        queue.enqueue(&[0x02], 2, &mut wire, 0).unwrap();

        // The in-flight handshake blocks the second message.
        for _ in 0..10 {
            queue.update(&mut wire, 100).unwrap();
        }
        assert_eq!(wire.frames_sent(), 1);
    }

    #[test]
    fn test_stray_ack_after_retirement_is_not_misattributed() {
        let mut queue = SendQueue::new(Link::new());
        let mut wire = Wire::default();
        queue.enqueue(&[0x01], 1, &mut wire, 0).unwrap();
        reply(&mut queue, ACK).unwrap();

        queue.enqueue(&[0x02], 2, &mut wire, 0).unwrap();
        reply(&mut queue, ACK).unwrap();

        // With nothing in flight, a further ACK byte is line noise and
        // retires nothing.
        let mut inbox = Inbox::default();
        let (status, completion) = queue.receive_byte(ACK, &mut wire, &mut inbox).unwrap();
        assert_eq!(status, RxStatus::Junk);
        assert_eq!(completion, None);
    }

    #[test]
    fn test_inbound_frames_flow_through_queue() {
        let mut queue = SendQueue::new(Link::new());
        let mut wire = Wire::default();

        struct Capture(Vec<u8, 64>);
        impl MessageHandler for Capture {
            fn on_message(&mut self, payload: &[u8]) -> RxStatus {
                let _ = self.0.extend_from_slice(payload);
                RxStatus::Ok
            }
        }

        let mut capture = Capture(Vec::new());
        for &byte in b"\n03010206" {
            queue.receive_byte(byte, &mut wire, &mut capture).unwrap();
        }
        assert_eq!(&capture.0[..], &[0x01, 0x02]);
        assert_eq!(&wire.bytes[..], &[ACK]);
    }

    #[test]
    fn test_transport_failure_recovers_via_timeout() {
        struct DeadWire;
        impl ByteSink for DeadWire {
            type Error = &'static str;
            fn send_byte(&mut self, _byte: u8) -> Result<(), &'static str> {
                Err("unplugged")
            }
        }

        let mut queue = SendQueue::new(Link::new());
        let mut dead = DeadWire;
        assert_eq!(
            queue.enqueue(&[0x01], 3, &mut dead, 0),
            Err(EnqueueError::Transport("unplugged"))
        );
        // The message was accepted; once the transport heals, the
        // timeout path retries it.
        assert_eq!(queue.len(), 1);

        let mut wire = Wire::default();
        queue.update(&mut wire, REPLY_TIMEOUT_MS).unwrap();
        queue.update(&mut wire, REPLY_TIMEOUT_MS).unwrap();
        assert_eq!(wire.frames_sent(), 1);

        let completion = reply(&mut queue, ACK);
        assert_eq!(
            completion.map(|done| done.outcome),
            Some(SendOutcome::Acknowledged)
        );
    }
}
