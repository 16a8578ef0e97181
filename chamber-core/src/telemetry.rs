//! Telemetrie-Snapshot für die Desktop-Anwendung
//!
//! Die Desktop-Seite erwartet ein JSON-Objekt mit einem Boolean pro
//! Gerät plus `curTemp`/`curHum`. Die Feldnamen sind Wire-Protokoll
//! und dürfen nicht umbenannt werden.

use crate::registry::DeviceRegistry;
use crate::traits::RelayLine;
use crate::types::SensorSample;

/// Anzahl der Aktoren in diesem Deployment
pub const DEVICE_COUNT: usize = 8;

/// Zustands-Snapshot für das MQTT-Publishing
///
/// Copy-Struct, damit er durch einen Channel zwischen Dispatcher- und
/// MQTT-Task wandern kann.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TelemetrySnapshot {
    pub freezer: bool,
    pub humidifier: bool,
    pub dehumidifier: bool,
    pub heater: bool,
    pub internalfan: bool,
    pub freshairfan: bool,
    pub device7: bool,
    pub device8: bool,
    #[cfg_attr(feature = "serde", serde(rename = "curTemp"))]
    pub cur_temp: f32,
    #[cfg_attr(feature = "serde", serde(rename = "curHum"))]
    pub cur_hum: f32,
}

impl TelemetrySnapshot {
    /// Baut den Snapshot aus Registry-Zuständen und Sample
    ///
    /// Erwartet die Registry in Deklarations-Reihenfolge dieses
    /// Deployments (freezer, humidifier, dehumidifier, heater,
    /// internalfan, freshairfan, device7, device8).
    pub fn capture<R: RelayLine>(
        registry: &DeviceRegistry<R, DEVICE_COUNT>,
        sample: &SensorSample,
    ) -> Self {
        let states = registry.states();
        Self {
            freezer: states[0],
            humidifier: states[1],
            dehumidifier: states[2],
            heater: states[3],
            internalfan: states[4],
            freshairfan: states[5],
            device7: states[6],
            device8: states[7],
            cur_temp: sample.temperature_c,
            cur_hum: sample.humidity_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::RelayError;
    use crate::types::SensorReading;

    struct TestRelay;

    impl RelayLine for TestRelay {
        fn set_active(&mut self, _active: bool) -> Result<(), RelayError> {
            Ok(())
        }
    }

    #[test]
    fn test_capture_mirrors_registry_order() {
        let mut reg = DeviceRegistry::new([
            ("freezer", TestRelay),
            ("humidifier", TestRelay),
            ("dehumidifier", TestRelay),
            ("heater", TestRelay),
            ("internalfan", TestRelay),
            ("freshairfan", TestRelay),
            ("device7", TestRelay),
            ("device8", TestRelay),
        ])
        .unwrap();
        reg.set(0, true).unwrap();
        reg.set(5, true).unwrap();

        let sample = SensorSample::from_reading(SensorReading {
            temperature_c: 7.5,
            humidity_pct: 71.0,
        });

        let snapshot = TelemetrySnapshot::capture(&reg, &sample);
        assert!(snapshot.freezer);
        assert!(snapshot.freshairfan);
        assert!(!snapshot.humidifier);
        assert!(!snapshot.device8);
        assert_eq!(snapshot.cur_temp, 7.5);
        assert_eq!(snapshot.cur_hum, 71.0);
    }
}
