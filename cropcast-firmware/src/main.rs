//! Cropcast - Field Crop Advisor Firmware
//!
//! Firmware for a Raspberry Pi Pico W soil and climate node. Samples a DHT22
//! and a resistive soil probe, asks a remote crop model for a recommendation
//! over WiFi and rotates the results across an SH1106 OLED.
//!
//! Wiring:
//! - DHT22 data: GP15 (open drain, pulled up)
//! - Soil probe: ADC0 / GP26
//! - SH1106: I2C0, SDA GP4, SCL GP5, address 0x3C

#![no_std]
#![no_main]

use cortex_m::peripheral::SCB;
use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::*;
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, StackResources};
use embassy_rp::adc::{self, Adc, Channel};
use embassy_rp::bind_interrupts;
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Level, Output, OutputOpenDrain, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{DMA_CH0, PIO0};
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use cropcast_core::config::{DeviceConfig, Intervals};
use cropcast_core::{Board, Device};
use cropcast_drivers::display::{GraphicsDisplay, Sh1106};
use cropcast_drivers::sensor::Dht22;

use crate::board::{EmbassyClock, MoistureAdc};
use crate::net::{PicoLink, PicoTransport};

mod board;
mod net;

/// Network identity and server, validated by build.rs from device.toml
const DEVICE_CONFIG: DeviceConfig = DeviceConfig {
    wifi_ssid: env!("CROPCAST_WIFI_SSID"),
    wifi_password: env!("CROPCAST_WIFI_PASSWORD"),
    base_url: env!("CROPCAST_BASE_URL"),
};

const REQUEST_TIMEOUT_MS: u64 = parse_ms(env!("CROPCAST_REQUEST_TIMEOUT_MS"));

/// Parse a decimal literal at compile time
const fn parse_ms(digits: &str) -> u64 {
    let bytes = digits.as_bytes();
    let mut value = 0u64;
    let mut i = 0;
    while i < bytes.len() {
        core::assert!(bytes[i].is_ascii_digit(), "timeout must be decimal");
        value = value * 10 + (bytes[i] - b'0') as u64;
        i += 1;
    }
    value
}

/// I2C clock for the OLED
const I2C_FREQUENCY_HZ: u32 = 400_000;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

static CYW43_STATE: StaticCell<cyw43::State> = StaticCell::new();
static NET_RESOURCES: StaticCell<StackResources<3>> = StaticCell::new();

#[embassy_executor::task]
async fn cyw43_task(
    runner: cyw43::Runner<'static, Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>,
) -> ! {
    runner.run().await
}

#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Cropcast firmware starting...");

    let p = embassy_rp::init(Default::default());

    // CYW43439 radio over PIO SPI
    let fw = include_bytes!("../cyw43-firmware/43439A0.bin");
    let clm = include_bytes!("../cyw43-firmware/43439A0_clm.bin");

    let pwr = Output::new(p.PIN_23, Level::Low);
    let cs = Output::new(p.PIN_25, Level::High);
    let mut pio = Pio::new(p.PIO0, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        p.PIN_24,
        p.PIN_29,
        p.DMA_CH0,
    );

    let state = CYW43_STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;
    spawner.spawn(cyw43_task(runner)).unwrap();

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;

    let seed = RoscRng.next_u64();
    let (stack, runner) = embassy_net::new(
        net_device,
        NetConfig::dhcpv4(Default::default()),
        NET_RESOURCES.init(StackResources::new()),
        seed,
    );
    spawner.spawn(net_task(runner)).unwrap();
    info!("Radio initialized");

    // DHT22 on GP15
    let dht_pin = OutputOpenDrain::new(p.PIN_15, Level::High);
    let climate = Dht22::new(dht_pin, Delay);

    // Soil probe on ADC0
    let adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let probe = Channel::new_pin(p.PIN_26, Pull::None);

    // SH1106 on I2C0
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let mut oled = Sh1106::new(i2c);
    if oled.init().is_err() {
        warn!("OLED init failed, continuing without display");
    }
    info!("Peripherals initialized");

    let board = Board {
        climate,
        adc: MoistureAdc::new(adc, probe),
        link: PicoLink::new(control, stack),
        transport: PicoTransport::new(stack, REQUEST_TIMEOUT_MS),
        display: GraphicsDisplay::new(oled),
        clock: EmbassyClock,
        delay: Delay,
    };

    let mut device = match Device::new(DEVICE_CONFIG, Intervals::default(), board) {
        Ok(device) => device,
        Err(e) => {
            error!("Unusable server URL: {}", e);
            loop {
                Timer::after_secs(60).await;
            }
        }
    };

    info!("Server: {}", DEVICE_CONFIG.base_url);

    if device.boot().await.is_err() {
        error!("Restarting after WiFi failure");
        SCB::sys_reset();
    }

    info!("Entering control loop");
    device.run().await
}
