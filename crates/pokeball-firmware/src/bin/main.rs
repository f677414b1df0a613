#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use esp_hal::clock::CpuClock;
use esp_hal::efuse::Efuse;
use esp_hal::interrupt::software::SoftwareInterruptControl;
use esp_hal::timer::timg::TimerGroup;
use esp_radio::wifi::{ClientConfig, ModeConfig};
use log::{error, info, warn};

use pokeball_core::{MacAddress, SENDER_CONFIG, bring_up, ensure_peer};
use pokeball_firmware::EspNowRadio;

/// How often the receiver's peer entry is checked and restored if missing.
const PEER_CHECK_INTERVAL: Duration = Duration::from_secs(10);

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rtt_target::rprintln!("PANIC: {}", info);
    loop {}
}

extern crate alloc;

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    rtt_target::rtt_init_log!(log::LevelFilter::Info);

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 66320);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt = SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    info!("Embassy initialized!");

    let radio_init = esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller");
    let (mut wifi_controller, interfaces) =
        esp_radio::wifi::new(&radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi controller");

    // ESP-NOW rides on the station interface; no association is needed.
    wifi_controller
        .set_config(&ModeConfig::Client(ClientConfig::default()))
        .expect("Failed to configure Wi-Fi station mode");
    wifi_controller
        .start()
        .expect("Failed to start Wi-Fi controller");

    let mut radio = EspNowRadio::new(interfaces.esp_now);
    match radio.version() {
        Ok(version) => info!("ESP-NOW version {}", version),
        Err(e) => warn!("ESP-NOW version unavailable: {:?}", e),
    }

    // The receiver needs this address only if it filters senders; show it anyway.
    info!("Sender MAC: {}", MacAddress::new(Efuse::mac_address()));
    info!(
        "Receiver MAC: {} (must match the address shown on the Pokedex receiver)",
        SENDER_CONFIG.receiver()
    );
    info!(
        "Wi-Fi channel: {} ({} MHz, region {}, must match the receiver)",
        SENDER_CONFIG.channel(),
        SENDER_CONFIG.channel().center_frequency_mhz(),
        SENDER_CONFIG.region()
    );

    match bring_up(&mut radio, &SENDER_CONFIG) {
        Ok(outcome) => info!("Peer bring-up complete: {:?}", outcome),
        Err(e) => error!("Peer bring-up failed, retrying: {}", e),
    }

    loop {
        Timer::after(PEER_CHECK_INTERVAL).await;

        match ensure_peer(&mut radio, &SENDER_CONFIG) {
            Ok(None) => {}
            Ok(Some(outcome)) => info!("Receiver peer restored: {:?}", outcome),
            Err(e) => error!("Receiver peer restore failed: {}", e),
        }
    }
}
