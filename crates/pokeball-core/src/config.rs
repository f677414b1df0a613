//! Compile-time sender configuration
//!
//! Set the receiver MAC address here, or override it without editing source
//! by exporting `POKEBALL_RECEIVER_MAC`, `POKEBALL_WIFI_CHANNEL` and
//! `POKEBALL_WIFI_REGION` (or putting them in a `.env` file) before building.
//!
//! Both values must match the receiver: the MAC is the one the Pokedex
//! receiver shows on its display, and the channel is the one it listens on.
//! Nothing at runtime can detect a mismatch, so an invalid value is rejected
//! while compiling instead.

use thiserror_no_std::Error;

use crate::channel::{ChannelError, Region, RegionParseError, WifiChannel};
use crate::mac::{MacAddress, MacParseError};

/// Receiver (D1 R32) MAC address.
pub const DEFAULT_RECEIVER_MAC_ADDRESS: MacAddress =
    MacAddress::new([0x08, 0x3A, 0xF2, 0xB7, 0xC0, 0xEC]);

pub const DEFAULT_WIFI_CHANNEL: u8 = 1;

pub const DEFAULT_REGION: Region = Region::Etsi;

pub const RECEIVER_MAC_ADDRESS: MacAddress =
    match receiver_mac_from(option_env!("POKEBALL_RECEIVER_MAC")) {
        Ok(mac) => mac,
        Err(_) => panic!("POKEBALL_RECEIVER_MAC must look like 08:3A:F2:B7:C0:EC"),
    };

pub const WIFI_CHANNEL: WifiChannel = match wifi_channel_from(option_env!("POKEBALL_WIFI_CHANNEL")) {
    Ok(channel) => channel,
    Err(_) => panic!("POKEBALL_WIFI_CHANNEL must be a channel number between 1 and 14"),
};

pub const WIFI_REGION: Region = match wifi_region_from(option_env!("POKEBALL_WIFI_REGION")) {
    Ok(region) => region,
    Err(_) => panic!("POKEBALL_WIFI_REGION must be one of FCC, ETSI or JP"),
};

/// Receiver address from a build-time override, or the default when unset.
pub const fn receiver_mac_from(text: Option<&str>) -> Result<MacAddress, MacParseError> {
    match text {
        Some(text) => MacAddress::parse(text),
        None => Ok(DEFAULT_RECEIVER_MAC_ADDRESS),
    }
}

pub const fn wifi_channel_from(text: Option<&str>) -> Result<WifiChannel, ChannelError> {
    match text {
        Some(text) => WifiChannel::parse(text),
        None => WifiChannel::new(DEFAULT_WIFI_CHANNEL),
    }
}

pub const fn wifi_region_from(text: Option<&str>) -> Result<Region, RegionParseError> {
    match text {
        Some(text) => Region::parse(text),
        None => Ok(DEFAULT_REGION),
    }
}

/// The validated configuration the firmware is built with.
pub const SENDER_CONFIG: SenderConfig =
    match SenderConfig::new(RECEIVER_MAC_ADDRESS, WIFI_CHANNEL, WIFI_REGION) {
        Ok(config) => config,
        Err(ConfigError::UnsetReceiver) => {
            panic!("receiver MAC address is 00:00:00:00:00:00, set it to the receiver's address")
        }
        Err(ConfigError::NotUnicast(_)) => {
            panic!("receiver MAC address must be a unicast address")
        }
        Err(ConfigError::ChannelNotPermitted { .. }) => {
            panic!("Wi-Fi channel is not permitted in the configured region")
        }
    };

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("receiver MAC address is not set")]
    UnsetReceiver,

    #[error("receiver MAC address {0} is not a unicast address")]
    NotUnicast(MacAddress),

    #[error("channel {channel} is not permitted in region {region}")]
    ChannelNotPermitted { channel: WifiChannel, region: Region },
}

/// Receiver address and channel as registered with the radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerConfig {
    pub address: MacAddress,
    pub channel: WifiChannel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SenderConfig {
    receiver: MacAddress,
    channel: WifiChannel,
    region: Region,
}

impl SenderConfig {
    pub const fn new(
        receiver: MacAddress,
        channel: WifiChannel,
        region: Region,
    ) -> Result<Self, ConfigError> {
        if receiver.is_unset() {
            return Err(ConfigError::UnsetReceiver);
        }
        if !receiver.is_unicast() {
            return Err(ConfigError::NotUnicast(receiver));
        }
        if !channel.is_permitted_in(region) {
            return Err(ConfigError::ChannelNotPermitted { channel, region });
        }
        Ok(Self {
            receiver,
            channel,
            region,
        })
    }

    pub const fn receiver(&self) -> MacAddress {
        self.receiver
    }

    pub const fn channel(&self) -> WifiChannel {
        self.channel
    }

    pub const fn region(&self) -> Region {
        self.region
    }

    pub const fn peer(&self) -> PeerConfig {
        PeerConfig {
            address: self.receiver,
            channel: self.channel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(n: u8) -> WifiChannel {
        WifiChannel::new(n).unwrap()
    }

    #[test]
    fn test_default_receiver_address() {
        let octets = DEFAULT_RECEIVER_MAC_ADDRESS.octets();
        assert_eq!(octets.len(), 6);
        assert_eq!(octets, [0x08, 0x3A, 0xF2, 0xB7, 0xC0, 0xEC]);
    }

    #[test]
    fn test_default_channel_is_valid() {
        let channel = WifiChannel::new(DEFAULT_WIFI_CHANNEL).unwrap();
        assert!(channel.get() > 0);
        assert!(channel.is_permitted_in(DEFAULT_REGION));
    }

    #[test]
    fn test_overrides_fall_back_to_defaults() {
        assert_eq!(receiver_mac_from(None), Ok(DEFAULT_RECEIVER_MAC_ADDRESS));
        assert_eq!(wifi_channel_from(None), Ok(channel(DEFAULT_WIFI_CHANNEL)));
        assert_eq!(wifi_region_from(None), Ok(DEFAULT_REGION));
    }

    #[test]
    fn test_override_values_are_parsed() {
        let mac = receiver_mac_from(Some("24-6f-28-00-11-22")).unwrap();
        assert_eq!(mac.octets(), [0x24, 0x6F, 0x28, 0x00, 0x11, 0x22]);

        let channel_13 = wifi_channel_from(Some("13")).unwrap();
        let region = wifi_region_from(Some("jp")).unwrap();
        assert_eq!(channel_13.get(), 13);
        assert_eq!(region, Region::Japan);

        let config = SenderConfig::new(mac, channel_13, region).unwrap();
        assert_eq!(config.peer().address, mac);
    }

    #[test]
    fn test_invalid_overrides_are_rejected() {
        assert_eq!(
            receiver_mac_from(Some("24:6F:28")),
            Err(MacParseError::InvalidLength(8))
        );
        assert_eq!(wifi_channel_from(Some("15")), Err(ChannelError::OutOfRange(15)));
        assert_eq!(wifi_region_from(Some("mars")), Err(RegionParseError));
    }

    #[test]
    fn test_builtin_config_is_consistent() {
        assert_eq!(SENDER_CONFIG.receiver(), RECEIVER_MAC_ADDRESS);
        assert_eq!(SENDER_CONFIG.channel(), WIFI_CHANNEL);
        assert_eq!(SENDER_CONFIG.region(), WIFI_REGION);
        assert!(SENDER_CONFIG.channel().get() >= 1);
        assert_eq!(
            SenderConfig::new(RECEIVER_MAC_ADDRESS, WIFI_CHANNEL, WIFI_REGION),
            Ok(SENDER_CONFIG)
        );
    }

    #[test]
    fn test_rejects_unset_receiver() {
        let result = SenderConfig::new(MacAddress::new([0; 6]), channel(1), Region::Etsi);
        assert_eq!(result, Err(ConfigError::UnsetReceiver));
    }

    #[test]
    fn test_rejects_group_addresses() {
        let result = SenderConfig::new(MacAddress::BROADCAST, channel(1), Region::Etsi);
        assert_eq!(result, Err(ConfigError::NotUnicast(MacAddress::BROADCAST)));

        let multicast = MacAddress::new([0x01, 0x00, 0x5E, 0x00, 0x00, 0xFB]);
        let result = SenderConfig::new(multicast, channel(1), Region::Etsi);
        assert_eq!(result, Err(ConfigError::NotUnicast(multicast)));
    }

    #[test]
    fn test_rejects_channel_outside_region() {
        let result = SenderConfig::new(DEFAULT_RECEIVER_MAC_ADDRESS, channel(13), Region::Fcc);
        assert_eq!(
            result,
            Err(ConfigError::ChannelNotPermitted {
                channel: channel(13),
                region: Region::Fcc,
            })
        );
        assert!(SenderConfig::new(DEFAULT_RECEIVER_MAC_ADDRESS, channel(14), Region::Japan).is_ok());
    }

    #[test]
    fn test_peer_config() {
        let config = SenderConfig::new(DEFAULT_RECEIVER_MAC_ADDRESS, channel(6), Region::Fcc).unwrap();
        assert_eq!(
            config.peer(),
            PeerConfig {
                address: DEFAULT_RECEIVER_MAC_ADDRESS,
                channel: channel(6),
            }
        );
    }
}
