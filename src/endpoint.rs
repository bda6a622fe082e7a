//! Network endpoints for RTP and RTCP traffic
//!
//! A participant is reachable at two endpoints: one for RTP (media) and one
//! for RTCP (control). Endpoints carry the port as a `u32` because the
//! participant-level validation range is the inclusive `[0;65536]`, whose
//! upper bound does not fit in a `u16`.

use std::fmt;
use std::net::SocketAddr;

/// A remote endpoint (host + port) a participant can be reached at
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RtpEndpoint {
    /// Host name or address
    pub host: String,

    /// Port number
    pub port: u32,
}

impl RtpEndpoint {
    /// Create a new endpoint
    pub fn new(host: impl Into<String>, port: u32) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Create a copy of this endpoint with a different port
    ///
    /// Used to derive a control endpoint from a data endpoint (port + 1)
    /// and vice versa (port - 1).
    pub fn with_port(&self, port: u32) -> Self {
        Self {
            host: self.host.clone(),
            port,
        }
    }
}

impl From<SocketAddr> for RtpEndpoint {
    fn from(addr: SocketAddr) -> Self {
        Self {
            host: addr.ip().to_string(),
            port: addr.port() as u32,
        }
    }
}

impl fmt::Display for RtpEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_display() {
        let endpoint = RtpEndpoint::new("10.0.0.1", 5000);
        assert_eq!(endpoint.to_string(), "10.0.0.1:5000");
    }

    #[test]
    fn test_endpoint_from_socket_addr() {
        let addr: SocketAddr = "192.168.1.10:5004".parse().unwrap();
        let endpoint = RtpEndpoint::from(addr);

        assert_eq!(endpoint.host, "192.168.1.10");
        assert_eq!(endpoint.port, 5004);
    }

    #[test]
    fn test_endpoint_with_port() {
        let data = RtpEndpoint::new("10.0.0.1", 5000);
        let control = data.with_port(data.port + 1);

        assert_eq!(control.host, "10.0.0.1");
        assert_eq!(control.port, 5001);
        assert_ne!(data, control);
    }

    #[test]
    fn test_endpoint_equality() {
        let a = RtpEndpoint::new("10.0.0.1", 5000);
        let b = RtpEndpoint::new("10.0.0.1", 5000);
        let c = RtpEndpoint::new("10.0.0.2", 5000);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
