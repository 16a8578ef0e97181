// Web-Modul: Static Asset Responder
//
// Liefert das feste Dashboard-Dokument unter seinem wohlbekannten
// Namen. Das Dokument wird zur Compile-Zeit ins Binary eingebettet
// (das Ur-System las es von SD-Karte - gleiche Schnittstelle,
// anderes Storage).

/// Wohlbekannter Name des Dashboard-Dokuments
pub const DASHBOARD_ASSET: &str = "dashboard";

// HTML-Datei zur Compile-Zeit einbinden
const DASHBOARD_HTML: &str = include_str!("dashboard.html");

/// Schlägt ein statisches Asset per Name nach
///
/// `None` wenn kein Asset unter dem Namen existiert - der Dispatcher
/// schließt die Verbindung dann trotzdem sauber.
pub fn asset_by_name(name: &str) -> Option<&'static [u8]> {
    match name {
        DASHBOARD_ASSET => Some(DASHBOARD_HTML.as_bytes()),
        _ => None,
    }
}
