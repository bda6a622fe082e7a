//! RTCP Packet module
//!
//! This module provides the RTCP structures the participant layer consumes.
//! Today that is the Source Description (SDES) chunk and item model from
//! RFC 3550 Section 6.5; the remaining RTCP packet types (SR, RR, BYE, APP)
//! are handled by the report-scheduling layer above this crate.

mod sdes;

pub use sdes::{RtcpSdesChunk, RtcpSdesItem, RtcpSdesItemType};
