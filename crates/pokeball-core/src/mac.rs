//! Link-layer hardware addresses
//!
//! The receiver is addressed by its 6-byte Wi-Fi station MAC. Parsing is a
//! `const fn` so that build-time overrides can be checked during const
//! evaluation (see [`crate::config`]).

use core::fmt;
use core::str::FromStr;

use thiserror_no_std::Error;

/// Length of the canonical text form, e.g. `08:3A:F2:B7:C0:EC`.
const TEXT_LEN: usize = 17;

/// A 6-byte IEEE 802 MAC address in transmission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress([u8; 6]);

/// Error returned when a MAC address string cannot be parsed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MacParseError {
    /// The text is not exactly 17 characters long
    #[error("expected 17 characters, found {0}")]
    InvalidLength(usize),

    /// A character inside an octet is not a hex digit
    #[error("invalid hex digit at position {0}")]
    InvalidDigit(usize),

    /// A separator is missing, unknown, or differs from the first one
    #[error("invalid separator at position {0}")]
    InvalidSeparator(usize),
}

impl MacAddress {
    /// `FF:FF:FF:FF:FF:FF`
    pub const BROADCAST: Self = Self([0xFF; 6]);

    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Parse `AA:BB:CC:DD:EE:FF` or `AA-BB-CC-DD-EE-FF` (either case).
    ///
    /// The separator must be the same throughout the string.
    pub const fn parse(text: &str) -> Result<Self, MacParseError> {
        let bytes = text.as_bytes();
        if bytes.len() != TEXT_LEN {
            return Err(MacParseError::InvalidLength(bytes.len()));
        }

        let separator = bytes[2];
        if separator != b':' && separator != b'-' {
            return Err(MacParseError::InvalidSeparator(2));
        }

        let mut octets = [0u8; 6];
        let mut i = 0;
        while i < 6 {
            let pos = i * 3;
            if i > 0 && bytes[pos - 1] != separator {
                return Err(MacParseError::InvalidSeparator(pos - 1));
            }

            let hi = match hex_value(bytes[pos]) {
                Some(v) => v,
                None => return Err(MacParseError::InvalidDigit(pos)),
            };
            let lo = match hex_value(bytes[pos + 1]) {
                Some(v) => v,
                None => return Err(MacParseError::InvalidDigit(pos + 1)),
            };
            octets[i] = (hi << 4) | lo;
            i += 1;
        }

        Ok(Self(octets))
    }

    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    pub const fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }

    /// Organizationally unique identifier (vendor prefix).
    pub const fn oui(&self) -> [u8; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }

    /// All zero. Used as the "not configured yet" placeholder.
    pub const fn is_unset(&self) -> bool {
        let mut i = 0;
        while i < 6 {
            if self.0[i] != 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    pub const fn is_broadcast(&self) -> bool {
        let mut i = 0;
        while i < 6 {
            if self.0[i] != 0xFF {
                return false;
            }
            i += 1;
        }
        true
    }

    /// I/G bit set. Broadcast is a multicast address too.
    pub const fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }

    pub const fn is_unicast(&self) -> bool {
        !self.is_multicast()
    }

    /// U/L bit set, i.e. not a vendor-assigned address.
    pub const fn is_locally_administered(&self) -> bool {
        self.0[0] & 0x02 != 0
    }
}

const fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

impl From<MacAddress> for [u8; 6] {
    fn from(mac: MacAddress) -> Self {
        mac.0
    }
}

impl FromStr for MacAddress {
    type Err = MacParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}
