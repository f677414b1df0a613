//! ESP-NOW peer bring-up
//!
//! The receiver has to be registered as an ESP-NOW peer, on the right
//! channel, before anything can be addressed to it. This module does that
//! against the [`PeerRadio`] trait so it can run on the ESP32-C3 radio and
//! against a fake radio in tests.

use core::fmt::{Debug, Write};

use log::{debug, info, warn};
use thiserror_no_std::Error;

use crate::channel::WifiChannel;
use crate::config::{PeerConfig, SenderConfig};
use crate::mac::MacAddress;

/// Radio operations needed to register a peer.
pub trait PeerRadio {
    type Error: Debug;

    /// Tune the radio to `channel`.
    fn set_channel(&mut self, channel: WifiChannel) -> Result<(), Self::Error>;

    fn peer_exists(&self, address: &MacAddress) -> bool;

    fn add_peer(&mut self, peer: &PeerConfig) -> Result<(), Self::Error>;

    /// Update an already registered peer in place.
    fn modify_peer(&mut self, peer: &PeerConfig) -> Result<(), Self::Error>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("failed to tune radio: {0}")]
    Channel(heapless::String<64>),

    #[error("failed to register peer: {0}")]
    Peer(heapless::String<64>),

    #[error("peer {0} is not registered after bring-up")]
    PeerMissing(MacAddress),
}

/// How the receiver ended up registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BringUp {
    Added,
    Updated,
}

/// Tune to the configured channel and register the receiver as a peer.
///
/// A receiver that is already registered gets its entry refreshed, so calling
/// this again after a channel change is fine.
pub fn bring_up<R: PeerRadio>(radio: &mut R, config: &SenderConfig) -> Result<BringUp, LinkError> {
    let peer = config.peer();

    debug!("Tuning radio to channel {}", peer.channel);
    radio
        .set_channel(peer.channel)
        .map_err(|e| LinkError::Channel(describe(&e)))?;

    let outcome = if radio.peer_exists(&peer.address) {
        radio
            .modify_peer(&peer)
            .map_err(|e| LinkError::Peer(describe(&e)))?;
        BringUp::Updated
    } else {
        radio
            .add_peer(&peer)
            .map_err(|e| LinkError::Peer(describe(&e)))?;
        BringUp::Added
    };

    if !radio.peer_exists(&peer.address) {
        return Err(LinkError::PeerMissing(peer.address));
    }

    info!(
        "Receiver {} registered on channel {} ({} MHz)",
        peer.address,
        peer.channel,
        peer.channel.center_frequency_mhz()
    );
    Ok(outcome)
}

/// Re-run [`bring_up`] only if the receiver is no longer registered.
pub fn ensure_peer<R: PeerRadio>(
    radio: &mut R,
    config: &SenderConfig,
) -> Result<Option<BringUp>, LinkError> {
    if radio.peer_exists(&config.receiver()) {
        return Ok(None);
    }

    warn!("Receiver {} dropped from peer list", config.receiver());
    bring_up(radio, config).map(Some)
}

/// Render a radio error into a bounded string, truncating if needed.
fn describe<E: Debug>(error: &E) -> heapless::String<64> {
    let mut text = heapless::String::new();
    let mut writer = Truncating(&mut text);
    let _ = write!(writer, "{:?}", error);
    text
}

struct Truncating<'a, const N: usize>(&'a mut heapless::String<N>);

impl<const N: usize> Write for Truncating<'_, N> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Region;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum FakeError {
        Busy,
        PeerListFull,
    }

    /// Records calls and keeps a single-slot peer table.
    #[derive(Default)]
    struct FakeRadio {
        channel: Option<WifiChannel>,
        peer: Option<PeerConfig>,
        adds: usize,
        modifies: usize,
        fail_channel: bool,
        fail_add: bool,
        drop_on_add: bool,
    }

    impl PeerRadio for FakeRadio {
        type Error = FakeError;

        fn set_channel(&mut self, channel: WifiChannel) -> Result<(), FakeError> {
            if self.fail_channel {
                return Err(FakeError::Busy);
            }
            self.channel = Some(channel);
            Ok(())
        }

        fn peer_exists(&self, address: &MacAddress) -> bool {
            self.peer.is_some_and(|p| p.address == *address)
        }

        fn add_peer(&mut self, peer: &PeerConfig) -> Result<(), FakeError> {
            self.adds += 1;
            if self.fail_add {
                return Err(FakeError::PeerListFull);
            }
            if !self.drop_on_add {
                self.peer = Some(*peer);
            }
            Ok(())
        }

        fn modify_peer(&mut self, peer: &PeerConfig) -> Result<(), FakeError> {
            self.modifies += 1;
            self.peer = Some(*peer);
            Ok(())
        }
    }

    fn config(channel: u8) -> SenderConfig {
        SenderConfig::new(
            MacAddress::new([0x08, 0x3A, 0xF2, 0xB7, 0xC0, 0xEC]),
            WifiChannel::new(channel).unwrap(),
            Region::Etsi,
        )
        .unwrap()
    }

    #[test]
    fn test_bring_up_adds_new_peer() {
        let mut radio = FakeRadio::default();
        let config = config(1);

        assert_eq!(bring_up(&mut radio, &config), Ok(BringUp::Added));
        assert_eq!(radio.channel, Some(config.channel()));
        assert_eq!(radio.peer, Some(config.peer()));
        assert_eq!((radio.adds, radio.modifies), (1, 0));
    }

    #[test]
    fn test_bring_up_refreshes_existing_peer() {
        let mut radio = FakeRadio::default();
        bring_up(&mut radio, &config(1)).unwrap();

        assert_eq!(bring_up(&mut radio, &config(6)), Ok(BringUp::Updated));
        assert_eq!(radio.peer.map(|p| p.channel.get()), Some(6));
        assert_eq!(radio.channel.map(|c| c.get()), Some(6));
        assert_eq!((radio.adds, radio.modifies), (1, 1));
    }

    #[test]
    fn test_channel_failure_stops_bring_up() {
        let mut radio = FakeRadio {
            fail_channel: true,
            ..Default::default()
        };

        let err = bring_up(&mut radio, &config(1)).unwrap_err();
        assert_eq!(err, LinkError::Channel(describe(&FakeError::Busy)));
        assert_eq!(radio.adds, 0);
    }

    #[test]
    fn test_peer_failure_is_reported() {
        let mut radio = FakeRadio {
            fail_add: true,
            ..Default::default()
        };

        match bring_up(&mut radio, &config(1)) {
            Err(LinkError::Peer(text)) => assert_eq!(text.as_str(), "PeerListFull"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_silently_missing_peer_is_detected() {
        let mut radio = FakeRadio {
            drop_on_add: true,
            ..Default::default()
        };
        let config = config(1);

        assert_eq!(
            bring_up(&mut radio, &config),
            Err(LinkError::PeerMissing(config.receiver()))
        );
    }

    #[test]
    fn test_ensure_peer_only_reregisters_when_missing() {
        let mut radio = FakeRadio::default();
        let config = config(1);

        assert_eq!(ensure_peer(&mut radio, &config), Ok(Some(BringUp::Added)));
        assert_eq!(ensure_peer(&mut radio, &config), Ok(None));
        assert_eq!(radio.adds, 1);

        radio.peer = None;
        assert_eq!(ensure_peer(&mut radio, &config), Ok(Some(BringUp::Added)));
        assert_eq!(radio.adds, 2);
    }

    #[test]
    fn test_describe_truncates_long_errors() {
        #[derive(Debug)]
        struct Verbose([u8; 40]);

        let text = describe(&Verbose([0; 40]));
        assert_eq!(text.len(), 64);
        assert!(text.starts_with("Verbose(["));
    }
}
