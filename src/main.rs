#[cfg(target_os = "espidf")]
use anyhow::{Context, Result};
#[cfg(target_os = "espidf")]
use esp_idf_hal::{gpio::AnyOutputPin, prelude::Peripherals};
#[cfg(target_os = "espidf")]
use log::info;
#[cfg(target_os = "espidf")]
use rcp_status_led::{rmt::RmtTransmitter, Led, StatusLed};

#[cfg(target_os = "espidf")]
#[toml_cfg::toml_config]
pub struct Config {
    #[default(27)]
    led_gpio: i32,
    #[default(32)]
    led_brightness: u8,
}

#[cfg(target_os = "espidf")]
fn main() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    let app_config = CONFIG;

    let peripherals = Peripherals::take()?;

    // SAFETY: no other driver in this firmware claims the status LED pin.
    let pin = unsafe { AnyOutputPin::new(app_config.led_gpio) };
    let transmitter = RmtTransmitter::new(peripherals.rmt.channel0, pin);

    let mut status_led =
        StatusLed::with_brightness(Led::new(transmitter), app_config.led_brightness);

    status_led
        .boot()
        .with_context(|| "Failed to show boot status")?;
    info!("Status LED on GPIO{} signals boot", app_config.led_gpio);

    status_led
        .ready()
        .with_context(|| "Failed to show ready status")?;
    info!("Status LED signals ready");

    Ok(())
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    println!("rcp-status-led drives an RMT peripheral; build it for an ESP-IDF target");
}
