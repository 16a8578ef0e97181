//! Status Serializer - XML-Snapshot von Registry und Sensor-Sample
//!
//! Festes Schema: erst die drei Sensor-Felder, dann pro Gerät ein
//! Boolean-Feld in Registry-Reihenfolge. Das Dokument hat immer
//! dieselbe Form - kein Feld wird je weggelassen.

use core::fmt::{self, Write};

use crate::registry::DeviceRegistry;
use crate::traits::RelayLine;
use crate::types::SensorSample;

/// Text-Literale für die Boolean-Felder (erwartet vom Dashboard-JS)
const STATE_ACTIVE: &str = "checked";
const STATE_INACTIVE: &str = "unchecked";

/// Rendert den Status-Snapshot als XML
///
/// Pure Funktion über `(registry, sample)`: gleiche Eingaben ergeben
/// byte-identische Ausgabe, weder Registry noch Sample werden
/// verändert. Ein ungültiges Sample (noch keine erfolgreiche Messung)
/// wird mit seinen zuletzt gespeicherten Zahlenwerten serialisiert -
/// der Refresh-Zyklus sorgt dafür, dass das immer die letzten
/// gültigen Werte sind.
pub fn render<W, R, const N: usize>(
    out: &mut W,
    registry: &DeviceRegistry<R, N>,
    sample: &SensorSample,
) -> fmt::Result
where
    W: Write,
    R: RelayLine,
{
    out.write_str("<?xml version=\"1.0\"?>")?;
    out.write_str("<output>")?;

    write!(out, "<tempC>{:.2}</tempC>", sample.temperature_c)?;
    write!(out, "<tempF>{:.2}</tempF>", sample.temperature_f)?;
    write!(out, "<hum>{:.2}</hum>", sample.humidity_pct)?;

    for (id, state) in registry.iter() {
        let literal = if state { STATE_ACTIVE } else { STATE_INACTIVE };
        write!(out, "<{id}>{literal}</{id}>")?;
    }

    out.write_str("</output>")
}
