// Projekt-Konfiguration: Konstanten und die Referenz-Tabelle der
// Pin-Verdrahtung (die Pin-Singletons selbst vergibt main.rs, weil
// esp-hal Peripherals nicht über Konstanten adressierbar sind)
#![allow(dead_code)]

// ============================================================================
// Geräte-Konfiguration (Registry-Reihenfolge ist Response-Schema!)
// ============================================================================

/// Token-Ids der acht Aktoren in Registry-Reihenfolge
///
/// Reihenfolge bestimmt das Feld-Layout im XML-Snapshot und im
/// Telemetrie-JSON - nicht umsortieren ohne Dashboard und
/// Desktop-App anzupassen.
///
/// Verdrahtung (Pin-Singletons werden in main.rs aus `Peripherals`
/// entnommen, die Zuordnung ist hier die Referenz):
///
/// | Index | Id           | Pin    |
/// |-------|--------------|--------|
/// | 0     | freezer      | GPIO2  |
/// | 1     | humidifier   | GPIO3  |
/// | 2     | dehumidifier | GPIO4  |
/// | 3     | heater       | GPIO5  |
/// | 4     | internalfan  | GPIO10 |
/// | 5     | freshairfan  | GPIO11 |
/// | 6     | device7      | GPIO20 |
/// | 7     | device8      | GPIO21 |
///
/// I2C-Bus (Sensor + Display): SDA = GPIO6, SCL = GPIO7.
pub const DEVICE_IDS: [&str; 8] = [
    "freezer",
    "humidifier",
    "dehumidifier",
    "heater",
    "internalfan",
    "freshairfan",
    "device7",
    "device8",
];

// ============================================================================
// HTTP Server Konfiguration
// ============================================================================

/// TCP-Port des Webservers
pub const LISTEN_PORT: u16 = 80;

/// Kapazität des Request-Puffers in Bytes
/// Größere Requests werden abgeschnitten (nicht abgewiesen)
pub const REQUEST_BUFFER_CAPACITY: usize = 512;

/// Puffer für den XML-Status-Body
/// 3 Sensor-Felder + 8 Geräte-Felder passen locker in 512 Bytes
pub const STATUS_BODY_SIZE: usize = 512;

/// Puffer für Response-Header
pub const RESPONSE_HEADER_SIZE: usize = 128;

/// TCP RX Buffer-Größe in Bytes
/// Für eingehende TCP-Daten vom Client
pub const TCP_RX_BUFFER_SIZE: usize = 1024;

/// TCP TX Buffer-Größe in Bytes
/// Für ausgehende TCP-Daten zum Client
pub const TCP_TX_BUFFER_SIZE: usize = 1024;

/// Poll-Quantum des Dispatcher-Loops in Millisekunden
/// So lange wartet der Accept höchstens, bevor der Refresh-Tick
/// wieder drankommt
pub const ACCEPT_POLL_MS: u64 = 250;

/// Timeout für einen einzelnen Socket-Read in Millisekunden
/// Hält den Dispatcher kooperativ: kein Read blockiert länger
pub const READ_TIMEOUT_MS: u64 = 500;

/// Obergrenze für einen kompletten Request in Millisekunden
/// Clients die nie eine Leerzeile senden werden hier abgeräumt
pub const REQUEST_DEADLINE_MS: u64 = 5_000;

// ============================================================================
// Sensor & Display Konfiguration
// ============================================================================

/// Duty-Cycle für Sensor-Messung und Display-Refresh in Millisekunden
pub const REFRESH_PERIOD_MS: u64 = 4_000;

/// I2C-Adresse des SHT31 (ADDR-Pin auf GND)
pub const SHT31_ADDRESS: u8 = 0x44;

/// Wartezeit zwischen Mess-Kommando und Auslesen in Millisekunden
/// (Datenblatt: max. 15ms bei High Repeatability)
pub const SHT31_MEASURE_DELAY_MS: u32 = 15;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

// Gesamt-Heap: ~100 KB für WiFi-Stack

// ============================================================================
// MQTT Konfiguration (Telemetrie zur Desktop-App)
// ============================================================================

/// MQTT Broker Hostname oder IP-Adresse
/// Wird zur Build-Zeit aus der Environment Variable MQTT_BROKER geladen
/// Setze diese in .env file (siehe .env.example)
pub const MQTT_BROKER: &str = env!(
    "MQTT_BROKER",
    "MQTT Broker nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Broker Port
/// Standard: 1883 (unverschlüsselt)
pub const MQTT_PORT: u16 = 1883;

/// MQTT Client ID
/// Eindeutige Kennung für diesen ESP32-C6
/// Wird zur Build-Zeit aus der Environment Variable MQTT_CLIENT_ID geladen
pub const MQTT_CLIENT_ID: &str = env!(
    "MQTT_CLIENT_ID",
    "MQTT Client ID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Topic für den Zustands-Snapshot
/// Die Desktop-App subscribt hier auf das Telemetrie-JSON
pub const MQTT_TOPIC_REPLY: &str = env!(
    "MQTT_TOPIC_REPLY",
    "MQTT Topic nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Reconnect Delay in Sekunden
/// Wartezeit nach Verbindungsfehler vor erneutem Versuch
pub const MQTT_RECONNECT_DELAY_SECS: u64 = 5;

/// MQTT Buffer-Größe in Bytes
/// Muss groß genug für MQTT-Pakete sein
pub const MQTT_BUFFER_SIZE: usize = 1024;

/// JSON Serialisierungs-Buffer für den Telemetrie-Snapshot
/// 8 Booleans + 2 Floats passen in 256 Bytes
pub const TELEMETRY_JSON_SIZE: usize = 256;

/// DNS Query Timeout in Sekunden
pub const DNS_TIMEOUT_SECS: u64 = 10;
