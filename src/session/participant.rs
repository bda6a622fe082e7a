//! Remote participant records
//!
//! A participant record tracks everything a session knows about one remote
//! peer: where to reach it (RTP and RTCP endpoints), its SSRC, and the
//! descriptive metadata it reports about itself through SDES. Records are
//! plain mutable values with a single logical owner; the only process-wide
//! state is the shared SSRC generator.

use std::collections::HashSet;
use std::fmt;
use std::net::SocketAddr;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::endpoint::RtpEndpoint;
use crate::error::Error;
use crate::packet::rtcp::{RtcpSdesChunk, RtcpSdesItem};
use crate::packet::RtpPacket;
use crate::{Result, RtpSsrc};

/// Upper bound of the valid SSRC range
const SSRC_MAX: u64 = 0xFFFF_FFFF;

/// Upper bound of the valid port range (inclusive)
const PORT_MAX: u64 = 65536;

/// Process-wide SSRC generator, seeded once from OS entropy.
///
/// Participants themselves are single-owner values; this generator is the
/// only shared state and may be hit from multiple threads at once.
static SSRC_RNG: Lazy<Mutex<StdRng>> = Lazy::new(|| Mutex::new(StdRng::from_entropy()));

/// A remote participant in an RTP session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpParticipant {
    /// Endpoint for RTP (media) traffic
    data_address: RtpEndpoint,

    /// Endpoint for RTCP (control) traffic
    control_address: RtpEndpoint,

    /// Synchronization source identifier
    ssrc: RtpSsrc,

    /// Canonical end-point identifier (SDES CNAME)
    cname: Option<String>,

    /// User name (SDES NAME)
    name: Option<String>,

    /// Electronic mail address (SDES EMAIL)
    email: Option<String>,

    /// Phone number (SDES PHONE)
    phone: Option<String>,

    /// Geographic location (SDES LOC)
    location: Option<String>,

    /// Application or tool name (SDES TOOL)
    tool: Option<String>,

    /// Notice/status (SDES NOTE)
    note: Option<String>,

    /// Private extension prefix (SDES PRIV); always set together with `priv_value`
    priv_prefix: Option<String>,

    /// Private extension value (SDES PRIV); always set together with `priv_prefix`
    priv_value: Option<String>,
}

impl RtpParticipant {
    /// Create a participant with explicit endpoints and a freshly generated SSRC
    ///
    /// Port numbers are validated against the inclusive range `[0;65536]`.
    pub fn new(host: impl Into<String>, data_port: u32, control_port: u32) -> Result<Self> {
        Self::new_with_ssrc(host, data_port, control_port, Self::generate_ssrc() as u64)
    }

    /// Create a participant with explicit endpoints and a known SSRC
    ///
    /// The SSRC is validated against `[0;0xffffffff]` and the ports against
    /// `[0;65536]`; validation happens before any field is set, so a failed
    /// call produces no record at all.
    pub fn new_with_ssrc(
        host: impl Into<String>,
        data_port: u32,
        control_port: u32,
        ssrc: u64,
    ) -> Result<Self> {
        let ssrc = validate_ssrc(ssrc)?;
        validate_port("data_port", data_port)?;
        validate_port("control_port", control_port)?;

        let host = host.into();
        Ok(Self::with_addresses(
            RtpEndpoint::new(host.clone(), data_port),
            RtpEndpoint::new(host, control_port),
            ssrc,
        ))
    }

    /// Create a participant from an RTP packet received from an unknown source
    ///
    /// The packet's origin becomes the data endpoint and the control endpoint
    /// is assumed to be one port above it. RFC 3550 says the origin of a
    /// packet MUST NOT be taken as a reachable destination, but offers no
    /// alternative for peers that never advertise their endpoints, so the
    /// origin is used anyway. Input is trusted (already parsed by the
    /// transport layer) and no descriptive fields are populated.
    pub fn from_unexpected_data_packet(origin: SocketAddr, packet: &RtpPacket) -> Self {
        let data_address = RtpEndpoint::from(origin);
        let control_address = data_address.with_port(data_address.port + 1);

        let participant = Self::with_addresses(data_address, control_address, packet.ssrc());
        debug!("New participant from unexpected data packet: {}", participant);
        participant
    }

    /// Create a participant from an SDES chunk received from an unknown source
    ///
    /// The chunk's origin is assumed to be the control endpoint, with the
    /// data endpoint one port below it (same RFC deviation as
    /// [`from_unexpected_data_packet`](Self::from_unexpected_data_packet)).
    /// The chunk's SSRC and items are merged in immediately.
    pub fn from_sdes_chunk(origin: SocketAddr, chunk: &RtcpSdesChunk) -> Self {
        let control_address = RtpEndpoint::from(origin);
        let data_address = control_address.with_port(control_address.port.saturating_sub(1));

        let mut participant = Self::with_addresses(data_address, control_address, chunk.ssrc);
        participant.update_from_sdes_chunk(chunk);
        debug!("New participant from SDES chunk: {}", participant);
        participant
    }

    fn with_addresses(
        data_address: RtpEndpoint,
        control_address: RtpEndpoint,
        ssrc: RtpSsrc,
    ) -> Self {
        Self {
            data_address,
            control_address,
            ssrc,
            cname: None,
            name: None,
            email: None,
            phone: None,
            location: None,
            tool: None,
            note: None,
            priv_prefix: None,
            priv_value: None,
        }
    }

    /// Randomly generate a new SSRC
    ///
    /// Draws uniformly from `[0;0x7fffffff]` rather than the full 32-bit
    /// space: one shared generator keeps per-process seeding simple at the
    /// cost of slightly higher collision odds (roughly 10^-4 for 1000
    /// sources, RFC 3550 Section 8.1).
    pub fn generate_ssrc() -> RtpSsrc {
        SSRC_RNG.lock().gen_range(0..=0x7FFF_FFFF)
    }

    /// Merge an SDES chunk into this record
    ///
    /// The chunk's SSRC always replaces the current one. Each item only
    /// writes its field when the candidate value is non-empty and differs
    /// from the current value, so a field that is set never reverts to
    /// unknown. Items of unrecognized type are skipped.
    ///
    /// Returns `true` iff the SSRC changed or at least one field was
    /// written. The owning session uses this to decide whether to emit a
    /// participant-updated notification, so there are no false positives or
    /// negatives.
    pub fn update_from_sdes_chunk(&mut self, chunk: &RtcpSdesChunk) -> bool {
        let mut modified = self.ssrc != chunk.ssrc;
        self.ssrc = chunk.ssrc;

        for item in &chunk.items {
            match item {
                RtcpSdesItem::Cname(value) => modified |= merge_field(&mut self.cname, value),
                RtcpSdesItem::Name(value) => modified |= merge_field(&mut self.name, value),
                RtcpSdesItem::Email(value) => modified |= merge_field(&mut self.email, value),
                RtcpSdesItem::Phone(value) => modified |= merge_field(&mut self.phone, value),
                RtcpSdesItem::Location(value) => {
                    modified |= merge_field(&mut self.location, value)
                }
                RtcpSdesItem::Tool(value) => modified |= merge_field(&mut self.tool, value),
                RtcpSdesItem::Note(value) => modified |= merge_field(&mut self.note, value),
                RtcpSdesItem::Priv { prefix, value } => {
                    // Prefix and value are a pair: either one differing
                    // rewrites both.
                    if will_cause_modification(&self.priv_prefix, prefix)
                        || will_cause_modification(&self.priv_value, value)
                    {
                        self.priv_prefix = Some(prefix.clone());
                        self.priv_value = Some(value.clone());
                        modified = true;
                    }
                }
                // Unknown item types are ignored for forward compatibility
                RtcpSdesItem::Unknown { .. } => {}
            }
        }

        if modified {
            trace!("Participant updated from SDES chunk: {}", self);
        }
        modified
    }

    /// Replace the data (RTP) endpoint
    ///
    /// Used when the session observes the peer's endpoint changing, e.g.
    /// after NAT rebinding; the record never infers this on its own outside
    /// construction.
    pub fn update_data_address(&mut self, address: RtpEndpoint) {
        self.data_address = address;
    }

    /// Replace the control (RTCP) endpoint
    pub fn update_control_address(&mut self, address: RtpEndpoint) {
        self.control_address = address;
    }

    /// Regenerate this participant's SSRC until it differs from `ssrc_to_avoid`
    ///
    /// Returns the resulting SSRC. If the current SSRC already differs,
    /// nothing is regenerated.
    pub fn resolve_ssrc_conflict(&mut self, ssrc_to_avoid: RtpSsrc) -> RtpSsrc {
        self.resolve_ssrc_conflict_with(ssrc_to_avoid, Self::generate_ssrc)
    }

    /// Like [`resolve_ssrc_conflict`](Self::resolve_ssrc_conflict), drawing
    /// candidates from a caller-supplied generator
    pub fn resolve_ssrc_conflict_with(
        &mut self,
        ssrc_to_avoid: RtpSsrc,
        mut generate: impl FnMut() -> RtpSsrc,
    ) -> RtpSsrc {
        // Will hardly ever loop more than once
        while self.ssrc == ssrc_to_avoid {
            self.ssrc = generate();
            debug!(
                "SSRC conflict with {:08x}, regenerated as {:08x}",
                ssrc_to_avoid, self.ssrc
            );
        }

        self.ssrc
    }

    /// Regenerate this participant's SSRC until it is not a member of
    /// `ssrcs_to_avoid`
    ///
    /// Returns the resulting SSRC. Looping more than once is still very
    /// unlikely: for 1000 participants the chance of a second collision is
    /// roughly 2*10^-7.
    pub fn resolve_ssrc_conflicts(&mut self, ssrcs_to_avoid: &HashSet<RtpSsrc>) -> RtpSsrc {
        self.resolve_ssrc_conflicts_with(ssrcs_to_avoid, Self::generate_ssrc)
    }

    /// Like [`resolve_ssrc_conflicts`](Self::resolve_ssrc_conflicts), drawing
    /// candidates from a caller-supplied generator
    pub fn resolve_ssrc_conflicts_with(
        &mut self,
        ssrcs_to_avoid: &HashSet<RtpSsrc>,
        mut generate: impl FnMut() -> RtpSsrc,
    ) -> RtpSsrc {
        while ssrcs_to_avoid.contains(&self.ssrc) {
            self.ssrc = generate();
            debug!("SSRC in conflict set, regenerated as {:08x}", self.ssrc);
        }

        self.ssrc
    }

    /// Unconditionally replace this participant's SSRC
    ///
    /// USE THIS WITH EXTREME CAUTION: sessions key their bookkeeping for
    /// incoming participants by SSRC, and replacing it behind the session's
    /// back desynchronizes that bookkeeping. Callers are expected to
    /// coordinate the change externally.
    pub fn update_ssrc(&mut self, ssrc: u64) -> Result<()> {
        self.ssrc = validate_ssrc(ssrc)?;
        Ok(())
    }

    /// Get the data (RTP) endpoint
    pub fn data_address(&self) -> &RtpEndpoint {
        &self.data_address
    }

    /// Get the control (RTCP) endpoint
    pub fn control_address(&self) -> &RtpEndpoint {
        &self.control_address
    }

    /// Get the SSRC
    pub fn ssrc(&self) -> RtpSsrc {
        self.ssrc
    }

    /// Get the canonical end-point identifier, if reported
    pub fn cname(&self) -> Option<&str> {
        self.cname.as_deref()
    }

    /// Set the canonical end-point identifier
    pub fn set_cname(&mut self, cname: impl Into<String>) {
        self.cname = Some(cname.into());
    }

    /// Get the user name, if reported
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the user name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Get the email address, if reported
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Set the email address
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = Some(email.into());
    }

    /// Get the phone number, if reported
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Set the phone number
    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = Some(phone.into());
    }

    /// Get the geographic location, if reported
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Set the geographic location
    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = Some(location.into());
    }

    /// Get the tool name, if reported
    pub fn tool(&self) -> Option<&str> {
        self.tool.as_deref()
    }

    /// Set the tool name
    pub fn set_tool(&mut self, tool: impl Into<String>) {
        self.tool = Some(tool.into());
    }

    /// Get the note, if reported
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Set the note
    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = Some(note.into());
    }

    /// Get the private extension prefix, if reported
    pub fn priv_prefix(&self) -> Option<&str> {
        self.priv_prefix.as_deref()
    }

    /// Get the private extension value, if reported
    pub fn priv_value(&self) -> Option<&str> {
        self.priv_value.as_deref()
    }

    /// Set the private extension prefix and value as a pair
    pub fn set_priv(&mut self, prefix: impl Into<String>, value: impl Into<String>) {
        self.priv_prefix = Some(prefix.into());
        self.priv_value = Some(value.into());
    }
}

impl fmt::Display for RtpParticipant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RtpParticipant{{ssrc={:08x}, data_address={}, control_address={}",
            self.ssrc, self.data_address, self.control_address
        )?;

        if let Some(cname) = &self.cname {
            write!(f, ", cname='{}'", cname)?;
        }
        if let Some(name) = &self.name {
            write!(f, ", name='{}'", name)?;
        }
        if let Some(email) = &self.email {
            write!(f, ", email='{}'", email)?;
        }
        if let Some(phone) = &self.phone {
            write!(f, ", phone='{}'", phone)?;
        }
        if let Some(location) = &self.location {
            write!(f, ", location='{}'", location)?;
        }
        if let Some(tool) = &self.tool {
            write!(f, ", tool='{}'", tool)?;
        }
        if let Some(note) = &self.note {
            write!(f, ", note='{}'", note)?;
        }
        if let (Some(prefix), Some(value)) = (&self.priv_prefix, &self.priv_value) {
            write!(f, ", priv='{}:{}'", prefix, value)?;
        }

        write!(f, "}}")
    }
}

/// An incoming value only modifies a field when it is non-empty and differs
/// from the current value; fields never revert to unknown.
fn will_cause_modification(current: &Option<String>, candidate: &str) -> bool {
    !candidate.is_empty() && current.as_deref() != Some(candidate)
}

fn merge_field(field: &mut Option<String>, candidate: &str) -> bool {
    if will_cause_modification(field, candidate) {
        *field = Some(candidate.to_string());
        true
    } else {
        false
    }
}

fn validate_ssrc(ssrc: u64) -> Result<RtpSsrc> {
    if ssrc > SSRC_MAX {
        return Err(Error::InvalidArgument {
            field: "ssrc",
            value: ssrc,
            min: 0,
            max: SSRC_MAX,
        });
    }
    Ok(ssrc as RtpSsrc)
}

fn validate_port(field: &'static str, port: u32) -> Result<()> {
    if port as u64 > PORT_MAX {
        return Err(Error::InvalidArgument {
            field,
            value: port as u64,
            min: 0,
            max: PORT_MAX,
        });
    }
    Ok(())
}
