//! RTP participant core for the RVOIP project
//!
//! This crate models the remote participants of an RTP session: their
//! network addresses, SSRC identity, and the self-reported descriptive
//! metadata carried by RTCP Source Description (SDES) reports. It is the
//! identity and reconciliation layer beneath the transport stack; packet
//! wire codecs, socket I/O, and session-wide scheduling live in their own
//! crates.
//!
//! The library is organized into a few small modules:
//!
//! - `session`: the participant record and its merge/collision logic
//! - `packet`: in-memory RTP packet and RTCP SDES models
//! - `endpoint`: the host/port endpoint type participants are reachable at

mod error;

// Main modules
pub mod endpoint;
pub mod packet;
pub mod session;

// Re-export core types
pub use error::Error;

pub use endpoint::RtpEndpoint;
pub use packet::rtcp::{RtcpSdesChunk, RtcpSdesItem, RtcpSdesItemType};
pub use packet::{RtpHeader, RtpPacket};
pub use session::RtpParticipant;

/// Typedef for RTP timestamp values
pub type RtpTimestamp = u32;

/// Typedef for RTP sequence numbers
pub type RtpSequenceNumber = u16;

/// Typedef for RTP synchronization source identifier
pub type RtpSsrc = u32;

/// Result type for participant operations
pub type Result<T> = std::result::Result<T, Error>;

/// Prelude module with commonly used types
pub mod prelude {
    pub use crate::{
        Error, Result, RtpEndpoint, RtpHeader, RtpPacket, RtpParticipant, RtpSequenceNumber,
        RtpSsrc, RtpTimestamp,
    };

    pub use crate::packet::rtcp::{RtcpSdesChunk, RtcpSdesItem, RtcpSdesItemType};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    // A remote peer shows up through an SDES chunk, re-describes itself, and
    // later loses an SSRC conflict against the local source.
    #[test]
    fn test_participant_lifecycle() {
        let origin: SocketAddr = "192.168.1.10:5001".parse().unwrap();

        let mut chunk = RtcpSdesChunk::new_with_cname(42, "alice@example.com".to_string());
        chunk.add_item(RtcpSdesItem::Name("Alice".to_string()));

        let mut participant = RtpParticipant::from_sdes_chunk(origin, &chunk);
        assert_eq!(participant.ssrc(), 42);
        assert_eq!(participant.data_address().port, 5000);
        assert_eq!(participant.control_address().port, 5001);
        assert_eq!(participant.cname(), Some("alice@example.com"));
        assert_eq!(participant.name(), Some("Alice"));

        // The same description again is not a reportable change
        assert!(!participant.update_from_sdes_chunk(&chunk));

        // A new NOTE is
        chunk.add_item(RtcpSdesItem::Note("back at 5".to_string()));
        assert!(participant.update_from_sdes_chunk(&chunk));
        assert_eq!(participant.note(), Some("back at 5"));

        // Local source claims SSRC 42; the participant must move off it
        let resolved = participant.resolve_ssrc_conflict(42);
        assert_ne!(resolved, 42);
        assert_eq!(resolved, participant.ssrc());
    }
}
