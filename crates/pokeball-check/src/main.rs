//! Host tool for the Pokeball sender configuration.
//!
//! Without arguments it prints the configuration baked into `pokeball-core`
//! at build time. With `--mac`, `--channel` or `--region` it validates a
//! candidate configuration with the same rules the firmware build uses and
//! prints the `.env` lines that select it.
//!
//! ```text
//! pokeball-check
//! pokeball-check --mac 08:3A:F2:B7:C0:EC --channel 6 --region fcc
//! ```

use std::process::ExitCode;

use clap::Parser;
use log::{debug, error, warn};

use pokeball_core::{MacAddress, Region, SENDER_CONFIG, SenderConfig, WifiChannel};

#[derive(Parser, Debug)]
#[command(name = "pokeball-check", version, about = "Print or validate the Pokeball sender configuration")]
struct Args {
    /// Receiver MAC address as shown on the Pokedex receiver
    #[arg(long, value_parser = parse_mac)]
    mac: Option<MacAddress>,

    /// Wi-Fi channel the receiver listens on (1-14)
    #[arg(long, value_parser = parse_channel)]
    channel: Option<WifiChannel>,

    /// Regulatory region: FCC, ETSI or JP
    #[arg(long, value_parser = parse_region)]
    region: Option<Region>,
}

impl Args {
    fn is_candidate(&self) -> bool {
        self.mac.is_some() || self.channel.is_some() || self.region.is_some()
    }
}

fn parse_mac(s: &str) -> Result<MacAddress, String> {
    s.parse::<MacAddress>().map_err(|e| format!("{e}"))
}

fn parse_channel(s: &str) -> Result<WifiChannel, String> {
    s.parse::<WifiChannel>().map_err(|e| format!("{e}"))
}

fn parse_region(s: &str) -> Result<Region, String> {
    s.parse::<Region>().map_err(|e| format!("{e}"))
}

/// Fill unset arguments from the built-in configuration and validate.
fn resolve(args: &Args) -> Result<SenderConfig, pokeball_core::ConfigError> {
    SenderConfig::new(
        args.mac.unwrap_or(SENDER_CONFIG.receiver()),
        args.channel.unwrap_or(SENDER_CONFIG.channel()),
        args.region.unwrap_or(SENDER_CONFIG.region()),
    )
}

fn render(config: &SenderConfig, candidate: bool) -> String {
    let heading = if candidate { "Candidate" } else { "Built-in" };
    let receiver = config.receiver();
    let channel = config.channel();
    let region = config.region();

    let mut out = format!(
        "{heading} sender configuration\n  \
         receiver MAC : {receiver}\n  \
         Wi-Fi channel: {channel} ({mhz} MHz)\n  \
         region       : {region} (channels 1-{max})\n",
        mhz = channel.center_frequency_mhz(),
        max = region.max_channel(),
    );

    if candidate {
        out.push_str(&format!(
            "\n# .env\n\
             POKEBALL_RECEIVER_MAC={receiver}\n\
             POKEBALL_WIFI_CHANNEL={channel}\n\
             POKEBALL_WIFI_REGION={region}\n"
        ));
    }
    out
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    debug!("Arguments: {:?}", args);

    match resolve(&args) {
        Ok(config) => {
            if config.receiver().is_locally_administered() {
                warn!(
                    "{} is locally administered; check it is the receiver's station MAC",
                    config.receiver()
                );
            }
            print!("{}", render(&config, args.is_candidate()));
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Invalid configuration: {}", e);
            ExitCode::FAILURE
        }
    }
}
