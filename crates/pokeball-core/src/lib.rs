//! Hardware-independent core library for the Pokeball sender
//!
//! This crate holds everything about the sender that does not touch the
//! ESP32-C3 peripherals: the receiver MAC address and Wi-Fi channel types,
//! the compile-time sender configuration, and the ESP-NOW peer bring-up
//! logic written against the [`link::PeerRadio`] trait.
//!
//! It is `#![no_std]` so it compiles for the firmware target and for desktop
//! hosts (for `pokeball-check` and the tests).

#![no_std]

#[cfg(test)]
extern crate std;

#[cfg(test)]
#[path = "../build_env.rs"]
mod build_env;

pub mod channel;
pub mod config;
pub mod link;
pub mod mac;

pub use channel::{ChannelError, Region, RegionParseError, WifiChannel};
pub use config::{ConfigError, PeerConfig, SENDER_CONFIG, SenderConfig};
pub use link::{BringUp, LinkError, PeerRadio, bring_up, ensure_peer};
pub use mac::{MacAddress, MacParseError};
