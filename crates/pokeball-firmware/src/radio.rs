//! ESP-NOW adapter for the peer bring-up logic in `pokeball_core::link`

use esp_radio::esp_now::{EspNow, EspNowError, EspNowWifiInterface, PeerInfo};
use pokeball_core::{MacAddress, PeerConfig, PeerRadio, WifiChannel};

/// Owns the ESP-NOW handle for the lifetime of the firmware.
pub struct EspNowRadio<'d> {
    esp_now: EspNow<'d>,
}

impl<'d> EspNowRadio<'d> {
    pub fn new(esp_now: EspNow<'d>) -> Self {
        Self { esp_now }
    }

    /// ESP-NOW protocol version reported by the radio blob.
    pub fn version(&self) -> Result<u32, EspNowError> {
        self.esp_now.version()
    }
}

/// Peers are unencrypted and pinned to the configured channel on the station interface.
fn peer_info(peer: &PeerConfig) -> PeerInfo {
    PeerInfo {
        interface: EspNowWifiInterface::Sta,
        peer_address: peer.address.octets(),
        lmk: None,
        channel: Some(peer.channel.get()),
        encrypt: false,
    }
}

impl PeerRadio for EspNowRadio<'_> {
    type Error = EspNowError;

    fn set_channel(&mut self, channel: WifiChannel) -> Result<(), EspNowError> {
        self.esp_now.set_channel(channel.get())
    }

    fn peer_exists(&self, address: &MacAddress) -> bool {
        self.esp_now.peer_exists(address.as_bytes())
    }

    fn add_peer(&mut self, peer: &PeerConfig) -> Result<(), EspNowError> {
        self.esp_now.add_peer(peer_info(peer))
    }

    fn modify_peer(&mut self, peer: &PeerConfig) -> Result<(), EspNowError> {
        self.esp_now.modify_peer(peer_info(peer))
    }
}
