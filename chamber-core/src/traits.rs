//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use crate::types::{SensorReading, SensorSample};

/// Fehler-Typ für Relais-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RelayError {
    WriteFailed,
}

/// Fehler-Typ für Sensor-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Bus-Transfer fehlgeschlagen (I2C NACK, Timeout)
    Bus,
    /// Checksumme der Sensor-Antwort stimmt nicht
    Crc,
    /// Messwert außerhalb des plausiblen Bereichs (oder NaN)
    OutOfRange,
}

/// Fehler-Typ für Display-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    WriteFailed,
}

/// Trait für eine Relais-Ausgangsleitung
///
/// Abstrahiert den Zugriff auf einen binären Aktor-Ausgang
/// (Kühlung, Befeuchter, Lüfter, ...).
///
/// # Implementierungen
/// - **Production:** GpioRelay (ESP32 GPIO Output)
/// - **Testing:** MockRelay (in-memory Mock)
pub trait RelayLine {
    /// Treibt die Leitung auf aktiv (true) oder inaktiv (false)
    ///
    /// # Fehlerbehandlung
    /// Gibt `RelayError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn set_active(&mut self, active: bool) -> Result<(), RelayError>;
}

/// Trait für den Temperatur-/Feuchte-Sensor
///
/// Eine Messung liefert Roh-Werte in °C und %RH. Plausibilitäts-Prüfung
/// und Übernahme in den SampleStore übernimmt der Refresh-Zyklus
/// (siehe `scheduler`-Modul).
pub trait SensorProbe {
    /// Löst eine Einzelmessung aus und liefert das Ergebnis
    fn read(&mut self) -> Result<SensorReading, SensorError>;
}

/// Trait für das lokale Display
///
/// Wird vom Refresh-Zyklus mit dem jeweils neuesten gültigen
/// Sample aufgerufen.
pub trait DisplayAdapter {
    /// Zeichnet das Display mit den übergebenen Messwerten neu
    fn redraw(&mut self, sample: &SensorSample) -> Result<(), DisplayError>;
}
