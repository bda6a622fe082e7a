//! RTP Session Management
//!
//! This module provides the participant records a session keeps for the
//! remote members of an RTP session. The registry layer above this crate
//! owns one record per remote peer, feeds it inbound SDES chunks, and drops
//! it when the peer is considered gone.

mod participant;

pub use participant::RtpParticipant;
