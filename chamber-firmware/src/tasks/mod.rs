// Task-Modul: Enthält alle Embassy Tasks
//
// Der Dispatcher-Task besitzt den gesamten Geräte-Zustand; WiFi- und
// MQTT-Tasks sind Infrastruktur daneben. Kommunikation Dispatcher →
// MQTT läuft über einen Embassy Channel (Telemetrie-Snapshots).

pub mod mqtt;
pub mod server;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use mqtt::mqtt_task;
pub use server::control_server_task;
pub use wifi::{connection_task, dhcp_task, net_task};
