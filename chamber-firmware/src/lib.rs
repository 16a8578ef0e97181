// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;
pub mod web;

// Re-exports von chamber-core
pub use chamber_core::{
    DeviceRegistry, RefreshScheduler, RequestBuffer, RouteDecision, SampleStore, SensorSample,
    TelemetrySnapshot,
};

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================
//
// Diese Type-Aliase vereinfachen die Lesbarkeit der Funktionssignaturen.
// Statt:  Sender<'static, NoopRawMutex, TelemetrySnapshot, 2>
// Nutze:  TelemetrySender

/// Channel für Telemetrie-Snapshots (Dispatcher → MQTT Task)
/// - 2: Nachrichten-Kapazität (älterer Snapshot darf überschrieben warten)
pub type TelemetryChannel = Channel<NoopRawMutex, TelemetrySnapshot, 2>;

/// Sender für Telemetrie-Snapshots (Dispatcher published)
/// Erzeugt aus TelemetryChannel
pub type TelemetrySender = Sender<'static, NoopRawMutex, TelemetrySnapshot, 2>;

/// Receiver für Telemetrie-Snapshots (MQTT Task empfängt)
/// Empfängt Snapshots von TelemetrySender
pub type TelemetryReceiver = Receiver<'static, NoopRawMutex, TelemetrySnapshot, 2>;
