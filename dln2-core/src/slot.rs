//! Slot: one in-flight request/response exchange
//!
//! The transport owns slot memory and lifetime; the dispatcher and the
//! module handler borrow a slot for the duration of one call. A slot moves
//! Received → Dispatched → Answered and is answered exactly once — the
//! response helpers reject a second answer, and the dispatcher treats a
//! handler that returns without answering as a failure.

use dln2_protocol::{Header, ProtocolError, Status, HEADER_LEN, RESULT_LEN};
use heapless::Vec;

/// Response payload capacity: a u16 length prefix plus the largest data
/// transfer (256 bytes)
pub const RESPONSE_CAPACITY: usize = 258;

/// Where a slot is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotState {
    /// Framed request delivered by the transport
    Received,
    /// Handed to a module handler
    Dispatched,
    /// Status and payload written; ready for the transport to flush
    Answered,
}

/// Errors from the slot response API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotError {
    /// The slot has already been answered
    AlreadyAnswered,
    /// The slot has not been answered yet
    NotAnswered,
    /// Payload exceeds the response buffer capacity
    ResponseTooLarge,
    /// Destination buffer too small to encode the response
    BufferTooSmall,
}

/// A single request/response exchange
#[derive(Debug, PartialEq)]
pub struct Slot<'a> {
    header: Header,
    request: &'a [u8],
    response: Vec<u8, RESPONSE_CAPACITY>,
    status: Option<Status>,
    state: SlotState,
}

impl<'a> Slot<'a> {
    /// Wrap an already-decoded header and request payload
    pub fn new(header: Header, request: &'a [u8]) -> Self {
        Self {
            header,
            request,
            response: Vec::new(),
            status: None,
            state: SlotState::Received,
        }
    }

    /// Decode a framed request as delivered by the transport.
    ///
    /// The header's size field must match the delivered byte count.
    pub fn parse(frame: &'a [u8]) -> Result<Self, ProtocolError> {
        let header = Header::decode(frame)?;
        if header.size as usize != frame.len() {
            return Err(ProtocolError::SizeMismatch);
        }
        Ok(Self::new(header, &frame[HEADER_LEN..]))
    }

    /// The request header
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The request payload (bytes beyond the header)
    pub fn request(&self) -> &[u8] {
        self.request
    }

    /// Current lifecycle state
    pub fn state(&self) -> SlotState {
        self.state
    }

    /// The answered status, if any
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    /// The answered response payload
    pub fn response_payload(&self) -> &[u8] {
        &self.response
    }

    /// Whether the slot has been answered
    pub fn is_answered(&self) -> bool {
        self.state == SlotState::Answered
    }

    pub(crate) fn mark_dispatched(&mut self) {
        if self.state == SlotState::Received {
            self.state = SlotState::Dispatched;
        }
    }

    fn answer(&mut self, status: Status, payload: &[u8]) -> Result<(), SlotError> {
        if self.is_answered() {
            return Err(SlotError::AlreadyAnswered);
        }
        self.response.clear();
        self.response
            .extend_from_slice(payload)
            .map_err(|_| SlotError::ResponseTooLarge)?;
        self.status = Some(status);
        self.state = SlotState::Answered;
        Ok(())
    }

    /// Answer with the given status and no payload
    pub fn respond_empty(&mut self, status: Status) -> Result<(), SlotError> {
        self.answer(status, &[])
    }

    /// Answer an error; no partial payload bytes are ever emitted
    pub fn respond_error(&mut self, status: Status) -> Result<(), SlotError> {
        self.answer(status, &[])
    }

    /// Answer success with a single payload byte
    pub fn respond_u8(&mut self, value: u8) -> Result<(), SlotError> {
        self.answer(Status::Success, &[value])
    }

    /// Answer success with the given payload
    pub fn respond_with(&mut self, payload: &[u8]) -> Result<(), SlotError> {
        self.answer(Status::Success, payload)
    }

    /// Backstop used by the dispatcher: answer `status` unless the slot is
    /// already answered, in which case do nothing
    pub(crate) fn force_answer(&mut self, status: Status) {
        if !self.is_answered() {
            // Empty payload on a fresh answer cannot overflow
            let _ = self.answer(status, &[]);
        }
    }

    /// Encode the response frame for the transport: header (echo and
    /// handle copied from the request), result code, then the payload.
    ///
    /// Returns the number of bytes written.
    pub fn encode_response(&self, buffer: &mut [u8]) -> Result<usize, SlotError> {
        let status = self.status.ok_or(SlotError::NotAnswered)?;
        let total = HEADER_LEN + RESULT_LEN + self.response.len();
        if buffer.len() < total {
            return Err(SlotError::BufferTooSmall);
        }

        let header = Header {
            size: total as u16,
            id: self.header.id,
            echo: self.header.echo,
            handle: self.header.handle,
        };
        header
            .encode(buffer)
            .map_err(|_| SlotError::BufferTooSmall)?;
        buffer[HEADER_LEN..HEADER_LEN + RESULT_LEN].copy_from_slice(&status.code().to_le_bytes());
        buffer[HEADER_LEN + RESULT_LEN..total].copy_from_slice(&self.response);
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dln2_protocol::header::module;

    fn request_frame(command: u8, echo: u16, payload: &[u8]) -> Vec<u8, 64> {
        let header = Header {
            size: (HEADER_LEN + payload.len()) as u16,
            id: Header::opcode(command, module::I2C),
            echo,
            handle: 0x0007,
        };
        let mut frame = Vec::new();
        let mut hdr_bytes = [0u8; HEADER_LEN];
        header.encode(&mut hdr_bytes).unwrap();
        frame.extend_from_slice(&hdr_bytes).unwrap();
        frame.extend_from_slice(payload).unwrap();
        frame
    }

    #[test]
    fn test_parse_valid_frame() {
        let frame = request_frame(0x01, 0xABCD, &[0x00]);
        let slot = Slot::parse(&frame).unwrap();
        assert_eq!(slot.header().command(), 0x01);
        assert_eq!(slot.header().module(), module::I2C);
        assert_eq!(slot.header().echo, 0xABCD);
        assert_eq!(slot.request(), &[0x00]);
        assert_eq!(slot.state(), SlotState::Received);
    }

    #[test]
    fn test_parse_size_mismatch() {
        let mut frame = request_frame(0x01, 0, &[0x00]);
        frame.push(0xFF).unwrap(); // trailing byte the header does not claim
        assert_eq!(Slot::parse(&frame), Err(ProtocolError::SizeMismatch));
    }

    #[test]
    fn test_answered_exactly_once() {
        let frame = request_frame(0x00, 0, &[]);
        let mut slot = Slot::parse(&frame).unwrap();

        slot.respond_u8(2).unwrap();
        assert!(slot.is_answered());
        assert_eq!(slot.respond_empty(Status::Fail), Err(SlotError::AlreadyAnswered));

        // The first answer survives
        assert_eq!(slot.status(), Some(Status::Success));
        assert_eq!(slot.response_payload(), &[2]);
    }

    #[test]
    fn test_force_answer_is_a_no_op_when_answered() {
        let frame = request_frame(0x00, 0, &[]);
        let mut slot = Slot::parse(&frame).unwrap();
        slot.respond_u8(1).unwrap();
        slot.force_answer(Status::Fail);
        assert_eq!(slot.status(), Some(Status::Success));
    }

    #[test]
    fn test_encode_response_layout_and_echo() {
        let frame = request_frame(0x03, 0x1234, &[0x00]);
        let mut slot = Slot::parse(&frame).unwrap();
        slot.respond_u8(1).unwrap();

        let mut out = [0u8; 32];
        let len = slot.encode_response(&mut out).unwrap();
        assert_eq!(len, HEADER_LEN + RESULT_LEN + 1);

        let response_header = Header::decode(&out).unwrap();
        assert_eq!(response_header.size as usize, len);
        assert_eq!(response_header.id, slot.header().id);
        assert_eq!(response_header.echo, 0x1234);
        assert_eq!(response_header.handle, 0x0007);
        // result code, little-endian
        assert_eq!(&out[8..10], &[0x00, 0x00]);
        assert_eq!(out[10], 1);
    }

    #[test]
    fn test_encode_unanswered_slot_fails() {
        let frame = request_frame(0x00, 0, &[]);
        let slot = Slot::parse(&frame).unwrap();
        let mut out = [0u8; 32];
        assert_eq!(slot.encode_response(&mut out), Err(SlotError::NotAnswered));
    }

    #[test]
    fn test_response_too_large() {
        let frame = request_frame(0x07, 0, &[]);
        let mut slot = Slot::parse(&frame).unwrap();
        let oversized = [0u8; RESPONSE_CAPACITY + 1];
        assert_eq!(
            slot.respond_with(&oversized),
            Err(SlotError::ResponseTooLarge)
        );
        // A failed answer leaves the slot unanswered
        assert!(!slot.is_answered());
    }
}
