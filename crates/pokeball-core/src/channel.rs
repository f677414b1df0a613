//! 2.4 GHz Wi-Fi channels and regulatory channel plans

use core::fmt;
use core::str::FromStr;

use thiserror_no_std::Error;

/// Highest channel number defined for the 2.4 GHz band.
pub const MAX_CHANNEL: u8 = 14;

/// A 2.4 GHz Wi-Fi channel number in `1..=14`.
///
/// Sender and receiver only hear each other when both are tuned to the same
/// channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WifiChannel(u8);

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    #[error("channel {0} is outside 1..=14")]
    OutOfRange(u8),

    #[error("channel number is empty")]
    Empty,

    #[error("channel number is not a decimal integer")]
    NotANumber,
}

impl WifiChannel {
    pub const fn new(number: u8) -> Result<Self, ChannelError> {
        if number == 0 || number > MAX_CHANNEL {
            return Err(ChannelError::OutOfRange(number));
        }
        Ok(Self(number))
    }

    /// Parse a decimal channel number such as `"6"`.
    pub const fn parse(text: &str) -> Result<Self, ChannelError> {
        let bytes = text.as_bytes();
        if bytes.is_empty() {
            return Err(ChannelError::Empty);
        }

        // Saturate instead of overflowing; anything past 255 is out of range anyway.
        let mut value: u16 = 0;
        let mut i = 0;
        while i < bytes.len() {
            let c = bytes[i];
            if !c.is_ascii_digit() {
                return Err(ChannelError::NotANumber);
            }
            value = value * 10 + (c - b'0') as u16;
            if value > u8::MAX as u16 {
                value = u8::MAX as u16;
            }
            i += 1;
        }

        Self::new(value as u8)
    }

    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Centre frequency in MHz. Channel 14 sits apart from the 5 MHz grid.
    pub const fn center_frequency_mhz(&self) -> u16 {
        if self.0 == 14 {
            2484
        } else {
            2407 + 5 * self.0 as u16
        }
    }

    pub const fn is_permitted_in(&self, region: Region) -> bool {
        self.0 <= region.max_channel()
    }
}

impl TryFrom<u8> for WifiChannel {
    type Error = ChannelError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number)
    }
}

impl FromStr for WifiChannel {
    type Err = ChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for WifiChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Regulatory channel plan for the 2.4 GHz band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    /// Americas: channels 1-11
    Fcc,
    /// Europe and most other countries: channels 1-13
    #[default]
    Etsi,
    /// Japan: channels 1-14
    Japan,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unknown region (expected FCC, ETSI or JP)")]
pub struct RegionParseError;

impl Region {
    pub const fn max_channel(&self) -> u8 {
        match self {
            Region::Fcc => 11,
            Region::Etsi => 13,
            Region::Japan => 14,
        }
    }

    /// Accepts `FCC`/`US`, `ETSI`/`EU` and `JP`/`JAPAN`, ignoring case.
    pub const fn parse(text: &str) -> Result<Self, RegionParseError> {
        let bytes = text.as_bytes();
        if eq_ignore_case(bytes, b"FCC") || eq_ignore_case(bytes, b"US") {
            Ok(Region::Fcc)
        } else if eq_ignore_case(bytes, b"ETSI") || eq_ignore_case(bytes, b"EU") {
            Ok(Region::Etsi)
        } else if eq_ignore_case(bytes, b"JP") || eq_ignore_case(bytes, b"JAPAN") {
            Ok(Region::Japan)
        } else {
            Err(RegionParseError)
        }
    }
}

const fn eq_ignore_case(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i].to_ascii_uppercase() != b[i].to_ascii_uppercase() {
            return false;
        }
        i += 1;
    }
    true
}

impl FromStr for Region {
    type Err = RegionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::Fcc => "FCC",
            Region::Etsi => "ETSI",
            Region::Japan => "JP",
        };
        f.write_str(name)
    }
}
