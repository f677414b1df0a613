//! ESP32-C3 firmware-specific modules for the Pokeball sender
//!
//! This crate contains the code that only compiles for the Seeed XIAO
//! ESP32-C3: the ESP-NOW radio adapter behind `pokeball_core::PeerRadio`.

#![no_std]

pub mod radio;

pub use radio::EspNowRadio;
