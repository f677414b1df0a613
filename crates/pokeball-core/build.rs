//! Forwards the sender configuration overrides to the compiler.
//!
//! Values are taken from the process environment first, then from the nearest
//! `.env` file above this crate. Validation happens in `src/config.rs` during
//! const evaluation, so a bad value fails the build there with a clear message.

use std::env;
use std::path::PathBuf;

#[path = "build_env.rs"]
mod build_env;

const CONFIG_KEYS: [&str; 3] = [
    "POKEBALL_RECEIVER_MAC",
    "POKEBALL_WIFI_CHANNEL",
    "POKEBALL_WIFI_REGION",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=build_env.rs");

    // Missing paths count as stale, so this reruns until a `.env` shows up.
    let manifest_dir = env::var_os("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    for candidate in build_env::dotenv_candidates(&manifest_dir) {
        println!("cargo:rerun-if-changed={}", candidate.display());
    }

    // dotenvy never overrides variables that are already set.
    match dotenvy::dotenv() {
        Ok(path) => println!("cargo:rerun-if-changed={}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => println!("cargo:warning=ignoring unreadable .env file: {e}"),
    }

    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={key}");
        if let Some(value) = env::var(key).ok().as_deref().and_then(build_env::forwarded_value) {
            println!("cargo:rustc-env={key}={value}");
        }
    }
}
