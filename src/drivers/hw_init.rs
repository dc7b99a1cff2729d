//! One-shot GPIO initialization and raw line access.
//!
//! Configures the PLC input and output lines using raw ESP-IDF sys calls.
//! Called once from `main()` before the PLC tasks start.
//!
//! On host builds every GPIO lives in an in-memory pin bank so the GPIO
//! adapters and the full task pipeline run in tests.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::plc::table::{GpioNum, InputTable, OutputTable};

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot GPIO initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed { pin: GpioNum, rc: i32 },
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed { pin, rc } => {
                write!(f, "GPIO{} config failed (rc={})", pin, rc)
            }
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

// ── Init ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_plc_pins(inputs: &InputTable, outputs: &OutputTable) -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the PLC tasks exist.
    unsafe {
        init_gpio_inputs(inputs)?;
        init_gpio_outputs(outputs)?;
    }
    info!("hw_init: {} inputs, {} outputs configured", inputs.len(), outputs.len());
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_plc_pins(inputs: &InputTable, outputs: &OutputTable) -> Result<(), HwInitError> {
    for o in outputs.iter() {
        gpio_write(o.pin, false);
    }
    log::info!(
        "hw_init(sim): {} inputs, {} outputs in sim pin bank",
        inputs.len(),
        outputs.len()
    );
    Ok(())
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs(inputs: &InputTable) -> Result<(), HwInitError> {
    for ch in inputs.iter() {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << ch.pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed { pin: ch.pin, rc: ret });
        }
    }
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: GpioNum) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs(outputs: &OutputTable) -> Result<(), HwInitError> {
    for ch in outputs.iter() {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << ch.pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed { pin: ch.pin, rc: ret });
        }
        unsafe { gpio_set_level(ch.pin, 0) };
    }
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: GpioNum, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // each output pin is written by the evaluator task only.
    unsafe {
        gpio_set_level(pin, u32::from(high));
    }
}

// ── Simulated pin bank ───────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
static SIM_PINS: core::sync::atomic::AtomicU64 = core::sync::atomic::AtomicU64::new(0);

#[cfg(not(target_os = "espidf"))]
fn sim_bit(pin: GpioNum) -> u64 {
    debug_assert!((0..64).contains(&pin), "sim pin bank holds GPIO0..63");
    1u64 << (pin as u32 & 63)
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: GpioNum) -> bool {
    use core::sync::atomic::Ordering;
    SIM_PINS.load(Ordering::Acquire) & sim_bit(pin) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: GpioNum, high: bool) {
    use core::sync::atomic::Ordering;
    if high {
        SIM_PINS.fetch_or(sim_bit(pin), Ordering::AcqRel);
    } else {
        SIM_PINS.fetch_and(!sim_bit(pin), Ordering::AcqRel);
    }
}

/// Drive a simulated input line (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_input(pin: GpioNum, high: bool) {
    gpio_write(pin, high);
}

/// Current level of a simulated line (host only).
#[cfg(not(target_os = "espidf"))]
pub fn sim_level(pin: GpioNum) -> bool {
    gpio_read(pin)
}
