//! Command Interpreter - Token-Scan über den fertigen Request
//!
//! Zwei unabhängige Scans über die rohen Request-Bytes: die
//! Routen-Entscheidung (Status-Snapshot vs. Standard-Seite) und pro
//! Gerät die Schalt-Tokens `<id>=1` / `<id>=0`. Der Scan ist bewusst
//! unverankert (Substring-Suche über den ganzen Request, auch in
//! Header-Werten) - das ist Wire-Protokoll, kein Bug.

use crate::registry::DeviceRegistry;
use crate::traits::{RelayError, RelayLine};

/// Marker-Token für die Status-Route (AJAX-Poll des Dashboards)
pub const STATUS_ROUTE_TOKEN: &[u8] = b"updateData";

/// Routen-Entscheidung - pro Request abgeleitet, nie gespeichert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// XML-Snapshot der Sensor- und Gerätezustände
    StatusSnapshot,
    /// Statisches Dashboard-Dokument
    DefaultPage,
}

/// Unverankerte Substring-Suche über Byte-Slices
pub fn contains_token(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() || needle.len() > haystack.len() {
        return needle.is_empty();
    }
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Sucht das letzte Schalt-Token `<id>=1` oder `<id>=0` für ein Gerät
///
/// Tie-Break bei pathologischen Requests mit beiden Tokens: die
/// spätere Fundstelle gewinnt (Links-nach-rechts-Scan, letzter
/// Treffer überschreibt).
pub fn last_switch_match(haystack: &[u8], id: &str) -> Option<bool> {
    let id = id.as_bytes();
    let window = id.len() + 2;
    if window > haystack.len() {
        return None;
    }

    let mut matched = None;
    for w in haystack.windows(window) {
        if &w[..id.len()] == id && w[id.len()] == b'=' {
            match w[id.len() + 1] {
                b'1' => matched = Some(true),
                b'0' => matched = Some(false),
                _ => {}
            }
        }
    }
    matched
}

/// Wendet einen fertigen Request auf die Registry an
///
/// Pro Gerät unabhängig gescannt - ein Request kann beliebige
/// Teilmengen schalten. Fehlt das Token für ein Gerät, bleibt dessen
/// Zustand unverändert (Abwesenheit ist kein Reset-auf-aus).
pub fn apply<R: RelayLine, const N: usize>(
    request: &[u8],
    registry: &mut DeviceRegistry<R, N>,
) -> Result<RouteDecision, RelayError> {
    for index in 0..registry.len() {
        if let Some(active) = last_switch_match(request, registry.id(index)) {
            registry.set(index, active)?;
        }
    }

    Ok(if contains_token(request, STATUS_ROUTE_TOKEN) {
        RouteDecision::StatusSnapshot
    } else {
        RouteDecision::DefaultPage
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRelay;

    impl RelayLine for TestRelay {
        fn set_active(&mut self, _active: bool) -> Result<(), RelayError> {
            Ok(())
        }
    }

    fn registry() -> DeviceRegistry<TestRelay, 3> {
        DeviceRegistry::new([
            ("freezer", TestRelay),
            ("humidifier", TestRelay),
            ("heater", TestRelay),
        ])
        .unwrap()
    }

    #[test]
    fn test_contains_token() {
        assert!(contains_token(b"GET /?updateData HTTP/1.1", b"updateData"));
        assert!(!contains_token(b"GET / HTTP/1.1", b"updateData"));
        assert!(!contains_token(b"upd", b"updateData"));
    }

    #[test]
    fn test_single_token_sets_device() {
        let mut reg = registry();
        let route = apply(b"GET /?freezer=1 HTTP/1.1\r\n\r\n", &mut reg).unwrap();
        assert_eq!(route, RouteDecision::DefaultPage);
        assert_eq!(reg.state_of("freezer"), Some(true));
        assert_eq!(reg.state_of("humidifier"), Some(false));
        assert_eq!(reg.state_of("heater"), Some(false));
    }

    #[test]
    fn test_absent_token_leaves_state() {
        let mut reg = registry();
        reg.set(1, true).unwrap();
        apply(b"GET /?freezer=0 HTTP/1.1\r\n\r\n", &mut reg).unwrap();
        // humidifier war an und bleibt an
        assert_eq!(reg.state_of("humidifier"), Some(true));
    }

    #[test]
    fn test_subset_toggle_in_one_request() {
        let mut reg = registry();
        apply(b"GET /?freezer=1&heater=1 HTTP/1.1\r\n\r\n", &mut reg).unwrap();
        assert_eq!(reg.state_of("freezer"), Some(true));
        assert_eq!(reg.state_of("heater"), Some(true));
        assert_eq!(reg.state_of("humidifier"), Some(false));
    }

    #[test]
    fn test_last_occurrence_wins() {
        let mut reg = registry();
        apply(b"GET /?freezer=1&freezer=0 HTTP/1.1\r\n\r\n", &mut reg).unwrap();
        assert_eq!(reg.state_of("freezer"), Some(false));

        apply(b"GET /?freezer=0&freezer=1 HTTP/1.1\r\n\r\n", &mut reg).unwrap();
        assert_eq!(reg.state_of("freezer"), Some(true));
    }

    #[test]
    fn test_token_in_header_value_matches() {
        // Unverankerter Scan: Token in einem Header-Wert zählt auch
        let mut reg = registry();
        let route = apply(
            b"GET / HTTP/1.1\r\nReferer: /?updateData&heater=1\r\n\r\n",
            &mut reg,
        )
        .unwrap();
        assert_eq!(route, RouteDecision::StatusSnapshot);
        assert_eq!(reg.state_of("heater"), Some(true));
    }

    #[test]
    fn test_route_decision_independent_of_toggles() {
        let mut reg = registry();
        let route = apply(b"GET /?updateData HTTP/1.1\r\n\r\n", &mut reg).unwrap();
        assert_eq!(route, RouteDecision::StatusSnapshot);
        for (_, state) in reg.iter() {
            assert!(!state);
        }
    }

    #[test]
    fn test_malformed_value_is_ignored() {
        let mut reg = registry();
        apply(b"GET /?freezer=2&humidifier=x HTTP/1.1\r\n\r\n", &mut reg).unwrap();
        assert_eq!(reg.state_of("freezer"), Some(false));
        assert_eq!(reg.state_of("humidifier"), Some(false));
    }

    #[test]
    fn test_truncated_buffer_is_still_scannable() {
        // Abgeschnittene Requests werden auf dem Rumpf gescannt
        let mut reg = registry();
        let route = apply(b"GET /?free", &mut reg).unwrap();
        assert_eq!(route, RouteDecision::DefaultPage);
        assert_eq!(reg.state_of("freezer"), Some(false));
    }
}
