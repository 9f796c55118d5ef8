use std::{fmt, io};

/// Error raised when a field cannot be read from a payload window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    OutOfBounds {
        offset: usize,
        width: usize,
        len: usize,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::OutOfBounds { offset, width, len } => write!(
                f,
                "Field of {} bytes at offset {} does not fit a window of {} bytes",
                width, offset, len
            ),
        }
    }
}

impl std::error::Error for FieldError {}

/// Error that possible during packets decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserError {
    InvalidPacketLen {
        packet: &'static str,
        expect: usize,
        got: usize,
    },
    Field {
        packet: &'static str,
        source: FieldError,
    },
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::InvalidPacketLen {
                packet,
                expect,
                got,
            } => write!(
                f,
                "Invalid packet({}) length, expect {}, got {}",
                packet, expect, got
            ),
            ParserError::Field { packet, source } => {
                write!(f, "Invalid field of packet {}: {}", packet, source)
            },
        }
    }
}

impl std::error::Error for ParserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParserError::Field { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeError {
    InvalidDate,
    InvalidTime,
}

impl fmt::Display for DateTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTimeError::InvalidDate => f.write_str("invalid date"),
            DateTimeError::InvalidTime => f.write_str("invalid time"),
        }
    }
}

impl std::error::Error for DateTimeError {}

/// Error raised by the transverse Mercator projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionError {
    NonFinite,
    ZoneOutOfRange { zone: i32 },
    LatitudeOutOfRange { lat: f64 },
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::NonFinite => f.write_str("coordinate is not a finite number"),
            ProjectionError::ZoneOutOfRange { zone } => {
                write!(f, "UTM zone {} is outside of 1..=60", zone)
            },
            ProjectionError::LatitudeOutOfRange { lat } => {
                write!(f, "latitude {} is outside of -90..=90", lat)
            },
        }
    }
}

impl std::error::Error for ProjectionError {}

#[derive(Debug)]
pub enum RelayError {
    Hex(hex::FromHexError),
    Io(io::Error),
}

impl From<hex::FromHexError> for RelayError {
    fn from(error: hex::FromHexError) -> Self {
        RelayError::Hex(error)
    }
}

impl From<io::Error> for RelayError {
    fn from(error: io::Error) -> Self {
        RelayError::Io(error)
    }
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::Hex(e) => write!(f, "malformed correction data: {}", e),
            RelayError::Io(e) => write!(f, "correction transport failed: {}", e),
        }
    }
}

impl std::error::Error for RelayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RelayError::Hex(e) => Some(e),
            RelayError::Io(e) => Some(e),
        }
    }
}

/// Failure of the byte source driving a [FixStream](crate::FixStream)
#[derive(Debug)]
pub enum StreamError {
    IoError(io::Error),
}

impl From<io::Error> for StreamError {
    fn from(error: io::Error) -> Self {
        StreamError::IoError(error)
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::IoError(e) => write!(f, "byte source failed: {}", e),
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StreamError::IoError(e) => Some(e),
        }
    }
}
