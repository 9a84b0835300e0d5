//! Build script for cropcast-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml and exports it to the crate as `CROPCAST_*` env vars
//! - Checks the CYW43439 firmware blobs are present

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Longest base URL that still fits `<base_url>/predict` in the client buffer
const MAX_BASE_URL_LEN: usize = 88;

/// Accepted socket timeout range (ms)
const TIMEOUT_RANGE_MS: std::ops::RangeInclusive<i64> = 100..=60_000;

const DEFAULT_TIMEOUT_MS: i64 = 5_000;

const RADIO_BLOBS: [&str; 2] = ["cyw43-firmware/43439A0.bin", "cyw43-firmware/43439A0_clm.bin"];

fn main() {
    setup_linker();
    check_radio_blobs();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

fn check_radio_blobs() {
    let missing: Vec<&str> = RADIO_BLOBS
        .iter()
        .copied()
        .filter(|path| !Path::new(path).exists())
        .collect();

    for path in RADIO_BLOBS {
        println!("cargo:rerun-if-changed={}", path);
    }

    if !missing.is_empty() {
        report(
            "CYW43439 firmware not found",
            &missing
                .iter()
                .map(|m| format!("missing {}", m))
                .chain([
                    "Copy 43439A0.bin and 43439A0_clm.bin from the".to_string(),
                    "cyw43-firmware directory of the embassy repository.".to_string(),
                ])
                .collect::<Vec<_>>(),
        );
    }
}

/// Validate device.toml and export its values
fn validate_config() {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        report(
            "device.toml not found!",
            &[
                "The firmware requires a device.toml configuration file.".to_string(),
                "Create one in the cropcast-firmware directory with".to_string(),
                "[wifi] ssid/password and [server] base_url.".to_string(),
            ],
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => report("Failed to read device.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => report(
            "Invalid TOML syntax in device.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();

    let ssid = string_key(&config, "wifi", "ssid", &mut errors);
    let password = string_key(&config, "wifi", "password", &mut errors);
    let base_url = string_key(&config, "server", "base_url", &mut errors);

    if let Some(ssid) = &ssid {
        if ssid.is_empty() {
            errors.push("[wifi] ssid cannot be empty".to_string());
        } else if ssid.len() > 32 {
            errors.push("[wifi] ssid must be at most 32 bytes".to_string());
        }
    }

    if let Some(password) = &password {
        if !password.is_empty() && !(8..=63).contains(&password.len()) {
            errors.push("[wifi] password must be empty or 8-63 characters".to_string());
        }
    }

    if let Some(url) = &base_url {
        errors.extend(check_base_url(url));
    }

    let timeout_ms = match config.get("server").and_then(|s| s.get("request_timeout_ms")) {
        None => DEFAULT_TIMEOUT_MS,
        Some(toml::Value::Integer(ms)) if TIMEOUT_RANGE_MS.contains(ms) => *ms,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!(
                "[server] request_timeout_ms must be {}-{}",
                TIMEOUT_RANGE_MS.start(),
                TIMEOUT_RANGE_MS.end()
            ));
            DEFAULT_TIMEOUT_MS
        }
        Some(_) => {
            errors.push("[server] request_timeout_ms must be an integer".to_string());
            DEFAULT_TIMEOUT_MS
        }
    };

    if !errors.is_empty() {
        report("Invalid device configuration", &errors);
    }

    println!("cargo:rustc-env=CROPCAST_WIFI_SSID={}", ssid.unwrap_or_default());
    println!("cargo:rustc-env=CROPCAST_WIFI_PASSWORD={}", password.unwrap_or_default());
    println!("cargo:rustc-env=CROPCAST_BASE_URL={}", base_url.unwrap_or_default());
    println!("cargo:rustc-env=CROPCAST_REQUEST_TIMEOUT_MS={}", timeout_ms);

    println!("cargo:warning=device.toml validated successfully");
}

/// Look up a required string key, recording an error if it is missing
fn string_key(
    config: &toml::Value,
    section: &str,
    key: &str,
    errors: &mut Vec<String>,
) -> Option<String> {
    match config.get(section) {
        Some(toml::Value::Table(table)) => match table.get(key) {
            Some(toml::Value::String(s)) => Some(s.clone()),
            Some(_) => {
                errors.push(format!("[{}] {} must be a string", section, key));
                None
            }
            None => {
                errors.push(format!("[{}] missing '{}'", section, key));
                None
            }
        },
        Some(_) => {
            errors.push(format!("[{}] must be a table", section));
            None
        }
        None => {
            errors.push(format!("Missing [{}] section", section));
            None
        }
    }
}

fn check_base_url(url: &str) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(rest) = url.strip_prefix("http://") else {
        errors.push("[server] base_url must start with http://".to_string());
        return errors;
    };

    if url.len() > MAX_BASE_URL_LEN {
        errors.push(format!(
            "[server] base_url must be at most {} characters",
            MAX_BASE_URL_LEN
        ));
    }

    let authority = rest.split('/').next().unwrap_or("");
    let host = authority.split(':').next().unwrap_or("");
    if host.is_empty() {
        errors.push("[server] base_url has no host".to_string());
    }
    if let Some(port) = authority.split(':').nth(1) {
        if !matches!(port.parse::<u16>(), Ok(p) if p > 0) {
            errors.push("[server] base_url port must be 1-65535".to_string());
        }
    }
    if url.ends_with('/') {
        errors.push("[server] base_url must not end with '/'".to_string());
    }

    errors
}

/// Abort the build with a boxed report
fn report(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|line| format!("║  • {:<62} ║", fit_line(line)))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Clip a report line to the box width, counting chars rather than bytes
fn fit_line(line: &str) -> String {
    if line.chars().count() > 62 {
        format!("{}...", line.chars().take(59).collect::<String>())
    } else {
        line.to_string()
    }
}
