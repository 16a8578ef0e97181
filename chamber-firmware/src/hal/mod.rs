// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul implementiert die chamber-core Traits auf echter
// ESP32-C6 Hardware. Sensor und Display teilen sich den I2C-Bus
// über embedded-hal-bus RefCellDevice.

pub mod display;
pub mod relay;
pub mod sensor;

pub use display::StatusDisplay;
pub use relay::GpioRelay;
pub use sensor::Sht31;

use core::cell::RefCell;
use embedded_hal_bus::i2c::RefCellDevice;
use esp_hal::Blocking;
use esp_hal::i2c::master::I2c;

/// Geteilter I2C-Bus: Sensor und Display hängen am selben Controller
///
/// Beide Geräte werden ausschließlich vom Dispatcher-Task benutzt,
/// RefCell (statt Mutex) reicht daher aus.
pub type SharedI2c = RefCellDevice<'static, I2c<'static, Blocking>>;
