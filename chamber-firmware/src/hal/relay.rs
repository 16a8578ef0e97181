// GPIO Relay - RelayLine Implementation über esp-hal Output
//
// Ein Relais-Kanal ist ein simpler Push-Pull-Ausgang: high = aktiv.

use chamber_core::{RelayError, RelayLine};
use esp_hal::gpio::Output;

/// Relais-Ausgang auf einem GPIO-Pin
///
/// Der Pin wird in `main.rs` mit `Level::Low` erstellt, die Registry
/// treibt ihn beim Start zusätzlich explizit auf inaktiv.
pub struct GpioRelay {
    line: Output<'static>,
}

impl GpioRelay {
    pub fn new(line: Output<'static>) -> Self {
        Self { line }
    }
}

impl RelayLine for GpioRelay {
    fn set_active(&mut self, active: bool) -> Result<(), RelayError> {
        // GPIO-Writes auf dem ESP32 sind infallibel - der Fehlerpfad
        // existiert für Implementierungen mit externen Port-Expandern
        if active {
            self.line.set_high();
        } else {
            self.line.set_low();
        }
        Ok(())
    }
}
