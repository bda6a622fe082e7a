//! RTP Packet module
//!
//! In-memory model of an RTP packet as defined in RFC 3550. The participant
//! layer only inspects packets (primarily the SSRC of an unexpected inbound
//! packet); wire parsing and serialization belong to the transport stack
//! sitting above this crate.

pub mod rtcp;

use bytes::Bytes;

use crate::{RtpSequenceNumber, RtpSsrc, RtpTimestamp};

/// RTP protocol version (always 2 in practice)
pub const RTP_VERSION: u8 = 2;

/// RTP packet header fields relevant to session-level processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpHeader {
    /// RTP version (should be 2)
    pub version: u8,

    /// Marker bit
    pub marker: bool,

    /// Payload type
    pub payload_type: u8,

    /// Sequence number
    pub sequence_number: RtpSequenceNumber,

    /// Timestamp
    pub timestamp: RtpTimestamp,

    /// Synchronization source identifier
    pub ssrc: RtpSsrc,
}

impl RtpHeader {
    /// Create a new RTP header
    pub fn new(payload_type: u8, sequence_number: RtpSequenceNumber,
               timestamp: RtpTimestamp, ssrc: RtpSsrc) -> Self {
        Self {
            version: RTP_VERSION,
            marker: false,
            payload_type,
            sequence_number,
            timestamp,
            ssrc,
        }
    }
}

/// An RTP packet: header plus opaque payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpPacket {
    /// Packet header
    pub header: RtpHeader,

    /// Packet payload
    pub payload: Bytes,
}

impl RtpPacket {
    /// Create a new RTP packet from a header and payload
    pub fn new(header: RtpHeader, payload: Bytes) -> Self {
        Self { header, payload }
    }

    /// Create a new RTP packet with the given field values
    pub fn new_with_payload(payload_type: u8, sequence_number: RtpSequenceNumber,
                            timestamp: RtpTimestamp, ssrc: RtpSsrc,
                            payload: Bytes) -> Self {
        Self {
            header: RtpHeader::new(payload_type, sequence_number, timestamp, ssrc),
            payload,
        }
    }

    /// Get the SSRC of the packet's source
    pub fn ssrc(&self) -> RtpSsrc {
        self.header.ssrc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rtp_packet_creation() {
        let payload = Bytes::from_static(b"test payload");
        let packet = RtpPacket::new_with_payload(
            96,          // Payload type
            1000,        // Sequence number
            12345,       // Timestamp
            0xabcdef01,  // SSRC
            payload.clone(),
        );

        assert_eq!(packet.header.version, RTP_VERSION);
        assert_eq!(packet.header.payload_type, 96);
        assert_eq!(packet.header.sequence_number, 1000);
        assert_eq!(packet.header.timestamp, 12345);
        assert_eq!(packet.ssrc(), 0xabcdef01);
        assert_eq!(packet.payload, payload);
    }
}
