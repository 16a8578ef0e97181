// OLED Status-Display - DisplayAdapter Implementation über ssd1306
//
// Dünner Wrapper um den Terminal-Mode des SSD1306: pro Refresh wird
// das Display gelöscht und Temperatur/Feuchte neu geschrieben.
// Pixel-/Font-Rendering übernimmt komplett die ssd1306 Crate.

use core::fmt::Write;

use chamber_core::{DisplayAdapter, DisplayError, SensorSample};
use embedded_hal::i2c::I2c;
use ssd1306::mode::TerminalMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

/// 128x64 OLED im Terminal-Mode
pub struct StatusDisplay<I: I2c> {
    display: Ssd1306<I2CInterface<I>, DisplaySize128x64, TerminalMode>,
}

impl<I: I2c> StatusDisplay<I> {
    /// Initialisiert das Display und zeigt den Boot-Text
    pub fn new(i2c: I) -> Result<Self, DisplayError> {
        let interface = I2CDisplayInterface::new(i2c);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_terminal_mode();
        display.init().map_err(|_| DisplayError::WriteFailed)?;
        display.clear().map_err(|_| DisplayError::WriteFailed)?;
        let _ = display.write_str("Klimakammer\nwartet auf\nMesswerte...");
        Ok(Self { display })
    }
}

impl<I: I2c> DisplayAdapter for StatusDisplay<I> {
    fn redraw(&mut self, sample: &SensorSample) -> Result<(), DisplayError> {
        self.display
            .clear()
            .map_err(|_| DisplayError::WriteFailed)?;
        write!(
            self.display,
            "Temp: {:.1} C\n      {:.1} F\nFeuchte: {:.1}%",
            sample.temperature_c, sample.temperature_f, sample.humidity_pct
        )
        .map_err(|_| DisplayError::WriteFailed)
    }
}
