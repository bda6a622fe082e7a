use crate::error::Error;
use crate::{Result, RtpSsrc};

/// SDES item types as defined in RFC 3550 Section 12.2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RtcpSdesItemType {
    /// Canonical end-point identifier (CNAME)
    Cname = 1,

    /// User name (NAME)
    Name = 2,

    /// Electronic mail address (EMAIL)
    Email = 3,

    /// Phone number (PHONE)
    Phone = 4,

    /// Geographic user location (LOC)
    Location = 5,

    /// Application or tool name (TOOL)
    Tool = 6,

    /// Notice/status (NOTE)
    Note = 7,

    /// Private extension (PRIV)
    Priv = 8,
}

impl TryFrom<u8> for RtcpSdesItemType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(RtcpSdesItemType::Cname),
            2 => Ok(RtcpSdesItemType::Name),
            3 => Ok(RtcpSdesItemType::Email),
            4 => Ok(RtcpSdesItemType::Phone),
            5 => Ok(RtcpSdesItemType::Location),
            6 => Ok(RtcpSdesItemType::Tool),
            7 => Ok(RtcpSdesItemType::Note),
            8 => Ok(RtcpSdesItemType::Priv),
            _ => Err(Error::InvalidArgument {
                field: "sdes_item_type",
                value: value as u64,
                min: 1,
                max: 8,
            }),
        }
    }
}

/// A single SDES item
///
/// PRIV carries a prefix in addition to its value. Item types this crate
/// does not know about are preserved as `Unknown` so a chunk can round-trip
/// through the participant layer without losing information; the participant
/// merge ignores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RtcpSdesItem {
    /// Canonical end-point identifier
    Cname(String),

    /// User name
    Name(String),

    /// Electronic mail address
    Email(String),

    /// Phone number
    Phone(String),

    /// Geographic user location
    Location(String),

    /// Application or tool name
    Tool(String),

    /// Notice/status
    Note(String),

    /// Private extension: prefix plus value
    Priv { prefix: String, value: String },

    /// Item type not defined by RFC 3550
    Unknown { item_type: u8, value: String },
}

impl RtcpSdesItem {
    /// Get the RFC 3550 item type, or `None` for unknown items
    pub fn item_type(&self) -> Option<RtcpSdesItemType> {
        match self {
            RtcpSdesItem::Cname(_) => Some(RtcpSdesItemType::Cname),
            RtcpSdesItem::Name(_) => Some(RtcpSdesItemType::Name),
            RtcpSdesItem::Email(_) => Some(RtcpSdesItemType::Email),
            RtcpSdesItem::Phone(_) => Some(RtcpSdesItemType::Phone),
            RtcpSdesItem::Location(_) => Some(RtcpSdesItemType::Location),
            RtcpSdesItem::Tool(_) => Some(RtcpSdesItemType::Tool),
            RtcpSdesItem::Note(_) => Some(RtcpSdesItemType::Note),
            RtcpSdesItem::Priv { .. } => Some(RtcpSdesItemType::Priv),
            RtcpSdesItem::Unknown { .. } => None,
        }
    }

    /// Get the item value
    pub fn value(&self) -> &str {
        match self {
            RtcpSdesItem::Cname(value)
            | RtcpSdesItem::Name(value)
            | RtcpSdesItem::Email(value)
            | RtcpSdesItem::Phone(value)
            | RtcpSdesItem::Location(value)
            | RtcpSdesItem::Tool(value)
            | RtcpSdesItem::Note(value)
            | RtcpSdesItem::Priv { value, .. }
            | RtcpSdesItem::Unknown { value, .. } => value,
        }
    }
}

/// An SDES chunk: one source's SSRC plus its ordered description items
/// Defined in RFC 3550 Section 6.5
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtcpSdesChunk {
    /// SSRC of the source being described
    pub ssrc: RtpSsrc,

    /// Description items, in wire order
    pub items: Vec<RtcpSdesItem>,
}

impl RtcpSdesChunk {
    /// Create a new chunk with no items
    pub fn new(ssrc: RtpSsrc) -> Self {
        Self {
            ssrc,
            items: Vec::new(),
        }
    }

    /// Create a new chunk carrying a single CNAME item
    pub fn new_with_cname(ssrc: RtpSsrc, cname: String) -> Self {
        let mut chunk = Self::new(ssrc);
        chunk.add_item(RtcpSdesItem::Cname(cname));
        chunk
    }

    /// Add an item to the chunk
    pub fn add_item(&mut self, item: RtcpSdesItem) {
        self.items.push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_conversion() {
        assert_eq!(RtcpSdesItemType::try_from(1).unwrap(), RtcpSdesItemType::Cname);
        assert_eq!(RtcpSdesItemType::try_from(2).unwrap(), RtcpSdesItemType::Name);
        assert_eq!(RtcpSdesItemType::try_from(3).unwrap(), RtcpSdesItemType::Email);
        assert_eq!(RtcpSdesItemType::try_from(4).unwrap(), RtcpSdesItemType::Phone);
        assert_eq!(RtcpSdesItemType::try_from(5).unwrap(), RtcpSdesItemType::Location);
        assert_eq!(RtcpSdesItemType::try_from(6).unwrap(), RtcpSdesItemType::Tool);
        assert_eq!(RtcpSdesItemType::try_from(7).unwrap(), RtcpSdesItemType::Note);
        assert_eq!(RtcpSdesItemType::try_from(8).unwrap(), RtcpSdesItemType::Priv);

        assert!(RtcpSdesItemType::try_from(0).is_err());
        assert!(RtcpSdesItemType::try_from(9).is_err());
    }

    #[test]
    fn test_item_accessors() {
        let item = RtcpSdesItem::Cname("alice@example.com".to_string());
        assert_eq!(item.item_type(), Some(RtcpSdesItemType::Cname));
        assert_eq!(item.value(), "alice@example.com");

        let item = RtcpSdesItem::Priv {
            prefix: "x-foo".to_string(),
            value: "bar".to_string(),
        };
        assert_eq!(item.item_type(), Some(RtcpSdesItemType::Priv));
        assert_eq!(item.value(), "bar");

        let item = RtcpSdesItem::Unknown {
            item_type: 42,
            value: "future".to_string(),
        };
        assert_eq!(item.item_type(), None);
        assert_eq!(item.value(), "future");
    }

    #[test]
    fn test_chunk_creation() {
        let chunk = RtcpSdesChunk::new(0x12345678);
        assert_eq!(chunk.ssrc, 0x12345678);
        assert!(chunk.items.is_empty());

        let chunk = RtcpSdesChunk::new_with_cname(0x12345678, "alice@example.com".to_string());
        assert_eq!(chunk.items.len(), 1);
        assert_eq!(chunk.items[0].value(), "alice@example.com");
    }

    #[test]
    fn test_chunk_add_item() {
        let mut chunk = RtcpSdesChunk::new(0x12345678);
        chunk.add_item(RtcpSdesItem::Cname("alice@example.com".to_string()));
        chunk.add_item(RtcpSdesItem::Tool("rvoip 0.1".to_string()));

        assert_eq!(chunk.items.len(), 2);
        assert_eq!(chunk.items[1].item_type(), Some(RtcpSdesItemType::Tool));
    }
}
