//! Device Registry - statische Tabelle der schaltbaren Aktoren
//!
//! Jeder Eintrag: Token-Id, physische Ausgangsleitung, aktueller
//! Zustand. Die Geräteliste ist zur Build-Zeit fix (6-8 Einträge),
//! nicht dynamisch erweiterbar.

use crate::traits::{RelayError, RelayLine};

/// Ein Registry-Eintrag: Aktor mit Id, Leitung und Zustand
///
/// Invariante: `state` spiegelt immer den zuletzt auf die Leitung
/// geschriebenen Pegel. Beides wird nur innerhalb von
/// `DeviceRegistry::set()` verändert.
pub struct Device<R> {
    id: &'static str,
    line: R,
    state: bool,
}

/// Statische Tabelle aller schaltbaren Aktoren
///
/// Wird einmal beim Start erstellt (alle Ausgänge inaktiv), danach
/// nur noch vom Command Interpreter mutiert.
///
/// # Generics
/// - `R`: Leitungs-Typ (GpioRelay auf Hardware, MockRelay in Tests)
/// - `N`: Anzahl der Geräte (Build-Zeit-Konstante)
pub struct DeviceRegistry<R, const N: usize> {
    devices: [Device<R>; N],
}

impl<R: RelayLine, const N: usize> DeviceRegistry<R, N> {
    /// Erstellt die Registry und treibt alle Leitungen auf inaktiv
    ///
    /// Schlägt fehl wenn ein physischer Write beim Initialisieren
    /// fehlschlägt - ohne definierten Startzustand darf das System
    /// nicht weiterlaufen.
    pub fn new(entries: [(&'static str, R); N]) -> Result<Self, RelayError> {
        let mut devices = entries.map(|(id, line)| Device {
            id,
            line,
            state: false,
        });
        for device in devices.iter_mut() {
            device.line.set_active(false)?;
        }
        Ok(Self { devices })
    }

    /// Anzahl der Geräte
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Token-Id des Geräts an Position `index`
    pub fn id(&self, index: usize) -> &'static str {
        self.devices[index].id
    }

    /// Aktueller Zustand des Geräts an Position `index`
    pub fn state(&self, index: usize) -> bool {
        self.devices[index].state
    }

    /// Schaltet ein Gerät: erst der physische Write, dann das Flag
    ///
    /// Das Flag wird nur nach erfolgreichem Write nachgezogen, damit
    /// kein Beobachter einen Zustand ohne zugehörigen Leitungspegel
    /// sieht.
    pub fn set(&mut self, index: usize, active: bool) -> Result<(), RelayError> {
        self.devices[index].line.set_active(active)?;
        self.devices[index].state = active;
        Ok(())
    }

    /// Iteriert über `(id, state)` in Deklarations-Reihenfolge
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        self.devices.iter().map(|d| (d.id, d.state))
    }

    /// Alle Zustände als Array (für Telemetrie-Snapshots)
    pub fn states(&self) -> [bool; N] {
        let mut states = [false; N];
        for (i, device) in self.devices.iter().enumerate() {
            states[i] = device.state;
        }
        states
    }

    /// Zustand per Id nachschlagen (hauptsächlich für Tests)
    pub fn state_of(&self, id: &str) -> Option<bool> {
        self.devices.iter().find(|d| d.id == id).map(|d| d.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimaler Mock - merkt sich den zuletzt geschriebenen Pegel
    struct TestRelay {
        level: Option<bool>,
    }

    impl RelayLine for TestRelay {
        fn set_active(&mut self, active: bool) -> Result<(), RelayError> {
            self.level = Some(active);
            Ok(())
        }
    }

    fn registry() -> DeviceRegistry<TestRelay, 2> {
        DeviceRegistry::new([
            ("freezer", TestRelay { level: None }),
            ("heater", TestRelay { level: None }),
        ])
        .unwrap()
    }

    #[test]
    fn test_new_drives_all_lines_inactive() {
        let reg = registry();
        assert_eq!(reg.len(), 2);
        for (_, state) in reg.iter() {
            assert!(!state);
        }
        assert_eq!(reg.devices[0].line.level, Some(false));
        assert_eq!(reg.devices[1].line.level, Some(false));
    }

    #[test]
    fn test_set_updates_line_and_state_together() {
        let mut reg = registry();
        reg.set(0, true).unwrap();
        assert!(reg.state(0));
        assert_eq!(reg.devices[0].line.level, Some(true));
        // Nachbar-Eintrag unberührt
        assert!(!reg.state(1));
    }

    #[test]
    fn test_failed_write_leaves_state_untouched() {
        struct FailingRelay {
            armed: bool,
        }
        impl RelayLine for FailingRelay {
            fn set_active(&mut self, _active: bool) -> Result<(), RelayError> {
                if self.armed {
                    Err(RelayError::WriteFailed)
                } else {
                    Ok(())
                }
            }
        }

        let mut reg =
            DeviceRegistry::new([("freezer", FailingRelay { armed: false })]).unwrap();
        reg.devices[0].line.armed = true;
        assert_eq!(reg.set(0, true), Err(RelayError::WriteFailed));
        assert!(!reg.state(0));
    }

    #[test]
    fn test_state_of_lookup() {
        let mut reg = registry();
        reg.set(1, true).unwrap();
        assert_eq!(reg.state_of("heater"), Some(true));
        assert_eq!(reg.state_of("freezer"), Some(false));
        assert_eq!(reg.state_of("nodevice"), None);
    }
}
