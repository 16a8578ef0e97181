//! Sampling/Refresh Scheduler - Duty-Cycle für Sensor und Display
//!
//! `due()` wird einmal pro Dispatcher-Iteration gefragt und feuert
//! nur beim Überschreiten der Periodengrenze. Statt der
//! Modulo-Prüfung des Ur-Designs (`millis() % period == 0`, die auf
//! derselben Millisekunde doppelt feuern oder eine Periode komplett
//! verpassen kann) wird hier gegen einen gespeicherten
//! Zuletzt-gefeuert-Zeitstempel geprüft: höchstens ein Feuern pro
//! Periode, verpasste Perioden werden nicht nachgeholt.

use crate::traits::{DisplayAdapter, DisplayError, SensorError, SensorProbe};
use crate::types::{SensorReading, SensorSample};

/// Fehler eines Refresh-Zyklus, nach Verursacher getrennt
///
/// Die Unterscheidung ist für den Aufrufer relevant: bei einem
/// Sensor-Fehler blieb das alte Sample stehen, bei einem
/// Display-Fehler wurde die Messung bereits übernommen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshError {
    Sensor(SensorError),
    Display(DisplayError),
}

/// Plausibler Messbereich (Sensor-Datenblatt-Grenzen)
const TEMP_MIN_C: f32 = -40.0;
const TEMP_MAX_C: f32 = 85.0;
const HUM_MIN_PCT: f32 = 0.0;
const HUM_MAX_PCT: f32 = 100.0;

/// Perioden-Prüfung für den Refresh-Zyklus
pub struct RefreshScheduler {
    period_ms: u64,
    last_fired_ms: Option<u64>,
}

impl RefreshScheduler {
    pub const fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            last_fired_ms: None,
        }
    }

    /// Prüft ob der Refresh fällig ist und merkt sich das Feuern
    ///
    /// Der allererste Aufruf feuert sofort, damit schon vor dem
    /// ersten Request ein Sample vorliegt.
    pub fn due(&mut self, now_ms: u64) -> bool {
        match self.last_fired_ms {
            None => {
                self.last_fired_ms = Some(now_ms);
                true
            }
            Some(last) if now_ms.wrapping_sub(last) >= self.period_ms => {
                self.last_fired_ms = Some(now_ms);
                true
            }
            Some(_) => false,
        }
    }
}

/// Hält das letzte gültige Sensor-Sample
///
/// Alleiniger Schreiber ist `run_refresh()`; alle Konsumenten
/// (Status Serializer, Telemetrie, Display) lesen über `latest()`.
pub struct SampleStore {
    latest: SensorSample,
}

impl SampleStore {
    pub const fn new() -> Self {
        Self {
            latest: SensorSample::empty(),
        }
    }

    /// Übernimmt eine Roh-Messung nach Plausibilitäts-Prüfung
    ///
    /// Bei NaN oder Werten außerhalb des Messbereichs bleibt das
    /// gespeicherte Sample unangetastet.
    pub fn ingest(&mut self, reading: SensorReading) -> Result<(), SensorError> {
        if !reading.temperature_c.is_finite()
            || !reading.humidity_pct.is_finite()
            || reading.temperature_c < TEMP_MIN_C
            || reading.temperature_c > TEMP_MAX_C
            || reading.humidity_pct < HUM_MIN_PCT
            || reading.humidity_pct > HUM_MAX_PCT
        {
            return Err(SensorError::OutOfRange);
        }

        self.latest = SensorSample::from_reading(reading);
        Ok(())
    }

    pub fn latest(&self) -> &SensorSample {
        &self.latest
    }
}

impl Default for SampleStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Ein Refresh-Zyklus: messen, übernehmen, Display neu zeichnen
///
/// Schlägt die Messung fehl (Bus, CRC, Bereich), bleibt das letzte
/// gültige Sample stehen und das Display wird für diesen Zyklus nicht
/// neu gezeichnet. Display-Fehler werden als `RefreshError::Display`
/// zurückgegeben, das frisch übernommene Sample bleibt dabei erhalten.
pub fn run_refresh<S, D>(
    store: &mut SampleStore,
    probe: &mut S,
    display: &mut D,
) -> Result<(), RefreshError>
where
    S: SensorProbe,
    D: DisplayAdapter,
{
    let reading = probe.read().map_err(RefreshError::Sensor)?;
    store.ingest(reading).map_err(RefreshError::Sensor)?;
    display
        .redraw(store.latest())
        .map_err(RefreshError::Display)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe(Result<SensorReading, SensorError>);

    impl SensorProbe for FixedProbe {
        fn read(&mut self) -> Result<SensorReading, SensorError> {
            self.0
        }
    }

    struct FailingDisplay;

    impl DisplayAdapter for FailingDisplay {
        fn redraw(&mut self, _sample: &SensorSample) -> Result<(), DisplayError> {
            Err(DisplayError::WriteFailed)
        }
    }

    #[test]
    fn test_display_error_is_reported_but_sample_kept() {
        let mut store = SampleStore::new();
        let mut probe = FixedProbe(Ok(SensorReading {
            temperature_c: 4.2,
            humidity_pct: 65.0,
        }));
        let mut display = FailingDisplay;

        // Messung wurde übernommen, der Display-Fehler kommt beim
        // Aufrufer an statt verschluckt zu werden
        assert_eq!(
            run_refresh(&mut store, &mut probe, &mut display),
            Err(RefreshError::Display(DisplayError::WriteFailed))
        );
        assert!(store.latest().valid);
        assert_eq!(store.latest().temperature_c, 4.2);
    }

    #[test]
    fn test_sensor_error_keeps_previous_sample() {
        let mut store = SampleStore::new();
        let mut display = FailingDisplay;

        let mut probe = FixedProbe(Err(SensorError::Crc));
        assert_eq!(
            run_refresh(&mut store, &mut probe, &mut display),
            Err(RefreshError::Sensor(SensorError::Crc))
        );
        assert!(!store.latest().valid);
    }

    #[test]
    fn test_first_tick_fires_immediately() {
        let mut sched = RefreshScheduler::new(4000);
        assert!(sched.due(123));
        assert!(!sched.due(124));
    }

    #[test]
    fn test_fires_once_per_period() {
        let mut sched = RefreshScheduler::new(1000);
        assert!(sched.due(0));
        assert!(!sched.due(500));
        assert!(!sched.due(999));
        assert!(sched.due(1000));
        assert!(!sched.due(1001));
        assert!(sched.due(2500));
    }

    #[test]
    fn test_no_double_fire_on_same_millisecond() {
        // Die Schwäche der Modulo-Variante: mehrere Iterationen auf
        // derselben Millisekunde feuerten mehrfach. Hier nicht.
        let mut sched = RefreshScheduler::new(1000);
        assert!(sched.due(1000));
        assert!(!sched.due(1000));
        assert!(!sched.due(1000));
    }

    #[test]
    fn test_ingest_accepts_plausible_reading() {
        let mut store = SampleStore::new();
        store
            .ingest(SensorReading {
                temperature_c: 4.2,
                humidity_pct: 65.0,
            })
            .unwrap();
        assert!(store.latest().valid);
        assert_eq!(store.latest().temperature_c, 4.2);
    }

    #[test]
    fn test_ingest_rejects_out_of_range() {
        let mut store = SampleStore::new();
        store
            .ingest(SensorReading {
                temperature_c: 10.0,
                humidity_pct: 50.0,
            })
            .unwrap();

        let rejected = [
            SensorReading { temperature_c: -41.0, humidity_pct: 50.0 },
            SensorReading { temperature_c: 90.0, humidity_pct: 50.0 },
            SensorReading { temperature_c: 10.0, humidity_pct: -1.0 },
            SensorReading { temperature_c: 10.0, humidity_pct: 101.0 },
            SensorReading { temperature_c: f32::NAN, humidity_pct: 50.0 },
        ];
        for reading in rejected {
            assert_eq!(store.ingest(reading), Err(SensorError::OutOfRange));
            // Letztes gültiges Sample bleibt stehen
            assert_eq!(store.latest().temperature_c, 10.0);
            assert_eq!(store.latest().humidity_pct, 50.0);
        }
    }
}
