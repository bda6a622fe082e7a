use thiserror::Error;

/// Error type for participant operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A caller-supplied value is outside its legal range
    #[error("Invalid {field}: {value} is outside the valid range [{min};{max}]")]
    InvalidArgument {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidArgument {
            field: "ssrc",
            value: 0x1_0000_0000,
            min: 0,
            max: 0xFFFF_FFFF,
        };
        assert_eq!(
            err.to_string(),
            "Invalid ssrc: 4294967296 is outside the valid range [0;4294967295]"
        );

        let err = Error::InvalidArgument {
            field: "data_port",
            value: 70000,
            min: 0,
            max: 65536,
        };
        assert!(err.to_string().contains("data_port"));
        assert!(err.to_string().contains("[0;65536]"));
    }
}
