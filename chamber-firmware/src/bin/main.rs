// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (WiFi benötigt dynamischen Speicher)
extern crate alloc;

use core::cell::RefCell;

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;
use esp_hal::Blocking;

use embedded_hal_bus::i2c::RefCellDevice;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use esp_klimakammer::config::{DEVICE_IDS, EXTRA_HEAP_SIZE, WIFI_HEAP_SIZE};
use esp_klimakammer::hal::{GpioRelay, Sht31, StatusDisplay};
use esp_klimakammer::tasks::{
    connection_task, control_server_task, dhcp_task, mqtt_task, net_task,
};
use esp_klimakammer::{DeviceRegistry, TelemetryChannel};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

// Kurzer Helfer, damit die Registry-Tabelle unten lesbar bleibt
fn relay(line: Output<'static>) -> GpioRelay {
    GpioRelay::new(line)
}

/// Main Entry Point
///
/// Initialisiert Hardware, WiFi, Registry und Sensorik, startet die
/// Embassy Runtime und spawnt Tasks. Danach schläft main() - alle
/// Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Heap Allocator initialisieren (WiFi braucht dynamischen Speicher!)
    // Zwei Bereiche: reclaimed RAM (64 KB) + extra (36 KB) = 100 KB total
    esp_alloc::heap_allocator!(
        #[esp_hal::ram(reclaimed)]
        size: WIFI_HEAP_SIZE
    );
    esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // WiFi Hardware initialisieren
    static RADIO_INIT: static_cell::StaticCell<esp_radio::Controller> =
        static_cell::StaticCell::new();
    let radio_init =
        RADIO_INIT.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));

    let (wifi_controller, wifi_interface) =
        esp_radio::wifi::new(radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi");

    // Netzwerk-Stack erstellen
    // Random seed für TCP/IP Stack (von Hardware RNG)
    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    // Static resources für embassy-net
    // 4 Sockets: HTTP-Listener (1) + MQTT (1) + DNS (1) + Reserve (1)
    static RESOURCES: static_cell::StaticCell<StackResources<4>> = static_cell::StaticCell::new();
    let resources = RESOURCES.init(StackResources::new());

    // embassy-net erstellt Stack + Runner (nutzt STA interface für Client-Modus)
    let (stack, runner) = embassy_net::new(
        wifi_interface.sta,
        NetConfig::dhcpv4(Default::default()),
        resources,
        seed,
    );

    // Stack muss 'static sein für Tasks
    static STACK: static_cell::StaticCell<Stack<'static>> = static_cell::StaticCell::new();
    let stack = &*STACK.init(stack);

    // I2C-Bus für Sensor und Display (geteilt via RefCellDevice)
    let i2c = I2c::new(peripherals.I2C0, I2cConfig::default())
        .expect("Failed to initialize I2C")
        .with_sda(peripherals.GPIO6)
        .with_scl(peripherals.GPIO7);

    static I2C_BUS: static_cell::StaticCell<RefCell<I2c<'static, Blocking>>> =
        static_cell::StaticCell::new();
    let i2c_bus = &*I2C_BUS.init(RefCell::new(i2c));

    let sensor = Sht31::new(RefCellDevice::new(i2c_bus), Delay::new());
    let display =
        StatusDisplay::new(RefCellDevice::new(i2c_bus)).expect("Failed to initialize display");

    // Geräte-Registry: acht Relais, alle Ausgänge starten inaktiv
    // (Id-Reihenfolge und Pin-Zuordnung: Tabelle bei config::DEVICE_IDS)
    let registry = DeviceRegistry::new([
        (DEVICE_IDS[0], relay(Output::new(peripherals.GPIO2, Level::Low, OutputConfig::default()))),
        (DEVICE_IDS[1], relay(Output::new(peripherals.GPIO3, Level::Low, OutputConfig::default()))),
        (DEVICE_IDS[2], relay(Output::new(peripherals.GPIO4, Level::Low, OutputConfig::default()))),
        (DEVICE_IDS[3], relay(Output::new(peripherals.GPIO5, Level::Low, OutputConfig::default()))),
        (DEVICE_IDS[4], relay(Output::new(peripherals.GPIO10, Level::Low, OutputConfig::default()))),
        (DEVICE_IDS[5], relay(Output::new(peripherals.GPIO11, Level::Low, OutputConfig::default()))),
        (DEVICE_IDS[6], relay(Output::new(peripherals.GPIO20, Level::Low, OutputConfig::default()))),
        (DEVICE_IDS[7], relay(Output::new(peripherals.GPIO21, Level::Low, OutputConfig::default()))),
    ])
    .expect("Failed to initialize relay registry");

    // Telemetrie-Channel erstellen (Dispatcher → MQTT)
    static TELEMETRY_CHANNEL: static_cell::StaticCell<TelemetryChannel> =
        static_cell::StaticCell::new();
    let telemetry_channel = TELEMETRY_CHANNEL.init(TelemetryChannel::new());
    let telemetry_sender = telemetry_channel.sender();
    let telemetry_receiver = telemetry_channel.receiver();

    // Spawn WiFi Tasks
    spawner.spawn(connection_task(wifi_controller)).unwrap();
    spawner.spawn(net_task(runner)).unwrap();
    spawner.spawn(dhcp_task(stack)).unwrap();

    // Spawn Connection Dispatcher (besitzt Registry, Sensor, Display)
    spawner
        .spawn(control_server_task(
            stack,
            registry,
            sensor,
            display,
            telemetry_sender,
        ))
        .unwrap();

    // Spawn MQTT Task (published Snapshots an die Desktop-App)
    spawner.spawn(mqtt_task(stack, telemetry_receiver)).unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
