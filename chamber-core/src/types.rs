//! Core Types für die Kammer-Steuerung
//!
//! Datenstrukturen ohne Hardware-Dependencies

/// Roh-Messung vom Sensor (eine Einzelmessung)
///
/// Noch nicht plausibilitäts-geprüft - siehe `SampleStore::ingest()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// Letztes gültiges Sensor-Sample
///
/// Alleiniger Schreiber ist der Refresh-Zyklus; Status-Serializer und
/// Display lesen nur. `valid` ist false bis zur ersten erfolgreichen
/// Messung - die numerischen Felder sind dann noch die Startwerte.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample {
    pub temperature_c: f32,
    pub temperature_f: f32,
    pub humidity_pct: f32,
    pub valid: bool,
}

impl SensorSample {
    /// Leeres Sample für den Systemstart (noch keine Messung)
    pub const fn empty() -> Self {
        Self {
            temperature_c: 0.0,
            temperature_f: 0.0,
            humidity_pct: 0.0,
            valid: false,
        }
    }

    /// Erstellt ein gültiges Sample aus einer Roh-Messung
    ///
    /// Die Fahrenheit-Umrechnung passiert hier genau einmal, damit
    /// Serializer und Display denselben Wert sehen.
    pub fn from_reading(reading: SensorReading) -> Self {
        Self {
            temperature_c: reading.temperature_c,
            temperature_f: reading.temperature_c * 9.0 / 5.0 + 32.0,
            humidity_pct: reading.humidity_pct,
            valid: true,
        }
    }
}

impl Default for SensorSample {
    fn default() -> Self {
        Self::empty()
    }
}
