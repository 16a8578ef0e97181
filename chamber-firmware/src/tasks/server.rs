// Connection Dispatcher Task - HTTP-Steuerung + Refresh-Duty-Cycle
//
// Ein einziger Task besitzt den kompletten veränderlichen Zustand
// (Registry, Request-Puffer, Scheduler, Sample-Store, Sensor,
// Display) und verzahnt Netzwerk-Bedienung mit der periodischen
// Sensor-Messung kooperativ: kein Aufruf blockiert unbeschränkt, der
// Refresh-Tick läuft in jeder Loop-Iteration - auch während eine
// Verbindung bedient wird.

use core::fmt::Write as FmtWrite;

use defmt::{Debug2Format, error, info, warn};
use embassy_futures::select::{Either, select};
use embassy_net::Stack;
use embassy_net::tcp::TcpSocket;
use embassy_time::{Duration, Instant, Timer, with_timeout};
use embedded_io_async::Write;
use esp_hal::delay::Delay;

use chamber_core::{
    DEVICE_COUNT, DeviceRegistry, FeedOutcome, RefreshError, RefreshScheduler, RequestBuffer,
    RouteDecision, STATUS_ROUTE_TOKEN, SampleStore, TelemetrySnapshot, apply, contains_token,
    render, run_refresh,
};

use crate::TelemetrySender;
use crate::config::{
    ACCEPT_POLL_MS, LISTEN_PORT, READ_TIMEOUT_MS, REFRESH_PERIOD_MS, REQUEST_BUFFER_CAPACITY,
    REQUEST_DEADLINE_MS, RESPONSE_HEADER_SIZE, STATUS_BODY_SIZE, TCP_RX_BUFFER_SIZE,
    TCP_TX_BUFFER_SIZE,
};
use crate::hal::{GpioRelay, SharedI2c, Sht31, StatusDisplay};
use crate::web::{DASHBOARD_ASSET, asset_by_name};

/// Registry dieses Deployments (acht Relais auf GPIO)
pub type ChamberRegistry = DeviceRegistry<GpioRelay, DEVICE_COUNT>;

/// Ausgang eines Bedien-Versuchs einer Verbindung
enum ServeOutcome {
    /// Response gesendet
    Responded,
    /// Peer weg oder Deadline gerissen - keine (Teil-)Response
    Abandoned,
}

/// Connection Dispatcher Task
///
/// Pro Loop-Iteration:
/// 1. Refresh-Tick (unbedingt, sonst verhungert die Telemetrie
///    unter Verbindungs-Churn)
/// 2. Accept-Poll mit kurzem Timeout
/// 3. Bei Verbindung: Request byte-weise einsammeln, Kommandos
///    anwenden, Route beantworten, Verbindung schließen
///
/// Es wird bewusst nur eine Verbindung zur Zeit bedient; ein
/// hängender Client blockiert neue Verbindungen bis zum Timeout
/// (akzeptierte Einschränkung dieses Designs).
#[embassy_executor::task]
pub async fn control_server_task(
    stack: &'static Stack<'static>,
    mut registry: ChamberRegistry,
    mut sensor: Sht31<SharedI2c, Delay>,
    mut display: StatusDisplay<SharedI2c>,
    telemetry: TelemetrySender,
) {
    info!("HTTP: Dispatcher task starting on port {}...", LISTEN_PORT);

    let mut scheduler = RefreshScheduler::new(REFRESH_PERIOD_MS);
    let mut store = SampleStore::new();
    let mut request = RequestBuffer::<REQUEST_BUFFER_CAPACITY>::new();

    let mut rx_buffer = [0u8; TCP_RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TCP_TX_BUFFER_SIZE];

    loop {
        // Refresh-Tick läuft auch ohne Netzwerk weiter
        tick_refresh(
            &mut scheduler,
            &mut store,
            &mut sensor,
            &mut display,
            &registry,
            &telemetry,
        );

        if !stack.is_link_up() || stack.config_v4().is_none() {
            Timer::after(Duration::from_millis(ACCEPT_POLL_MS)).await;
            continue;
        }

        let mut socket = TcpSocket::new(*stack, &mut rx_buffer, &mut tx_buffer);
        socket.set_timeout(Some(Duration::from_secs(10)));

        // Accept-Poll: höchstens ACCEPT_POLL_MS warten, dann ist der
        // Refresh-Tick wieder dran
        let accepted = select(
            socket.accept(LISTEN_PORT),
            Timer::after(Duration::from_millis(ACCEPT_POLL_MS)),
        )
        .await;

        match accepted {
            Either::First(Ok(())) => {
                info!("HTTP: Client connected");
                let outcome = serve_connection(
                    &mut socket,
                    &mut request,
                    &mut registry,
                    &mut scheduler,
                    &mut store,
                    &mut sensor,
                    &mut display,
                    &telemetry,
                )
                .await;

                match outcome {
                    ServeOutcome::Responded => info!("HTTP: Response sent"),
                    ServeOutcome::Abandoned => warn!("HTTP: Request abandoned"),
                }

                // Verbindung bedingungslos schließen
                socket.close();
                let _ = with_timeout(Duration::from_secs(1), socket.flush()).await;
                socket.abort();
                info!("HTTP: Client disconnected");
            }
            Either::First(Err(e)) => {
                warn!("HTTP: Accept failed: {}", Debug2Format(&e));
            }
            Either::Second(()) => {
                // Kein Client in diesem Quantum - nur Refresh-Tick
            }
        }
    }
}

/// Sammelt einen Request ein und beantwortet ihn
///
/// Liest byte-weise unter Read-Timeout (kooperativ, kein Read
/// blockiert länger als READ_TIMEOUT_MS) und füttert den Accumulator
/// bis zur Leerzeile. Zwischen den Reads läuft der Refresh-Tick
/// weiter. Ohne Leerzeile innerhalb der Request-Deadline wird die
/// Verbindung ohne Response aufgegeben.
#[allow(clippy::too_many_arguments)]
async fn serve_connection(
    socket: &mut TcpSocket<'_>,
    request: &mut RequestBuffer<REQUEST_BUFFER_CAPACITY>,
    registry: &mut ChamberRegistry,
    scheduler: &mut RefreshScheduler,
    store: &mut SampleStore,
    sensor: &mut Sht31<SharedI2c, Delay>,
    display: &mut StatusDisplay<SharedI2c>,
    telemetry: &TelemetrySender,
) -> ServeOutcome {
    request.reset();
    let deadline = Instant::now() + Duration::from_millis(REQUEST_DEADLINE_MS);
    let mut chunk = [0u8; 64];

    let complete = 'collect: loop {
        tick_refresh(scheduler, store, sensor, display, registry, telemetry);

        if Instant::now() >= deadline {
            warn!("HTTP: Request deadline exceeded");
            break false;
        }

        match with_timeout(
            Duration::from_millis(READ_TIMEOUT_MS),
            socket.read(&mut chunk),
        )
        .await
        {
            // Peer hat sauber geschlossen, ohne den Request zu beenden
            Ok(Ok(0)) => break false,
            Ok(Ok(n)) => {
                for &byte in &chunk[..n] {
                    if request.feed(byte) == FeedOutcome::Complete {
                        break 'collect true;
                    }
                }
            }
            Ok(Err(e)) => {
                warn!("HTTP: Read error: {}", Debug2Format(&e));
                break false;
            }
            // Read-Timeout: Loop dreht weiter, Deadline begrenzt das Warten
            Err(_) => continue,
        }
    };

    if !complete {
        return ServeOutcome::Abandoned;
    }

    // Kommandos anwenden und Route bestimmen. Ein Relais-Fehler
    // bricht den Request nicht ab - die Route wird dann direkt aus
    // dem Puffer bestimmt und der Rest normal beantwortet.
    let route = match apply(request.as_bytes(), registry) {
        Ok(route) => route,
        Err(e) => {
            error!("HTTP: Relay write failed: {}", e);
            if contains_token(request.as_bytes(), STATUS_ROUTE_TOKEN) {
                RouteDecision::StatusSnapshot
            } else {
                RouteDecision::DefaultPage
            }
        }
    };

    // Jeder Kommando-Request kann Zustände geändert haben
    publish_snapshot(registry, store, telemetry);

    let sent = match route {
        RouteDecision::StatusSnapshot => {
            let mut body: heapless::String<STATUS_BODY_SIZE> = heapless::String::new();
            if render(&mut body, registry, store.latest()).is_err() {
                error!("HTTP: Status body exceeds buffer");
                return ServeOutcome::Abandoned;
            }
            send_response(socket, "text/xml", body.as_bytes()).await
        }
        RouteDecision::DefaultPage => match asset_by_name(DASHBOARD_ASSET) {
            Some(document) => send_response(socket, "text/html", document).await,
            None => {
                // Storage-Kollaborateur liefert nichts - trotzdem
                // sauber schließen statt hängen lassen
                error!("HTTP: Dashboard asset missing");
                return ServeOutcome::Abandoned;
            }
        },
    };

    match sent {
        Ok(()) => ServeOutcome::Responded,
        Err(e) => {
            warn!("HTTP: Write error: {}", Debug2Format(&e));
            ServeOutcome::Abandoned
        }
    }
}

/// Schreibt Statuszeile, Header und Body
async fn send_response(
    socket: &mut TcpSocket<'_>,
    content_type: &str,
    body: &[u8],
) -> Result<(), embassy_net::tcp::Error> {
    let mut header: heapless::String<RESPONSE_HEADER_SIZE> = heapless::String::new();
    // Header passen per Konstruktion in den Puffer
    let _ = write!(
        header,
        "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        content_type,
        body.len()
    );

    socket.write_all(header.as_bytes()).await?;
    socket.write_all(body).await?;
    socket.flush().await
}

/// Ein Dispatcher-Tick des Refresh-Schedulers
///
/// Feuert nur beim Überschreiten der Periodengrenze. Bei
/// fehlgeschlagener Messung bleibt das letzte gültige Sample stehen
/// und es wird nur geloggt - der HTTP-Client sieht davon nichts.
fn tick_refresh(
    scheduler: &mut RefreshScheduler,
    store: &mut SampleStore,
    sensor: &mut Sht31<SharedI2c, Delay>,
    display: &mut StatusDisplay<SharedI2c>,
    registry: &ChamberRegistry,
    telemetry: &TelemetrySender,
) {
    if !scheduler.due(Instant::now().as_millis()) {
        return;
    }

    match run_refresh(store, sensor, display) {
        Ok(()) => {
            let sample = store.latest();
            info!(
                "Sensor: {} °C / {} %RH",
                sample.temperature_c, sample.humidity_pct
            );
            publish_snapshot(registry, store, telemetry);
        }
        Err(RefreshError::Sensor(e)) => {
            warn!("Sensor: Read failed ({}), keeping last sample", e);
        }
        Err(RefreshError::Display(e)) => {
            // Messung wurde übernommen, nur die Anzeige hängt
            warn!("Display: Redraw failed ({})", e);
            publish_snapshot(registry, store, telemetry);
        }
    }
}

/// Reicht einen Zustands-Snapshot an den MQTT-Task weiter
///
/// Non-blocking: ist der Channel voll, hängt dort schon ein frischer
/// Snapshot - der Verlust ist egal.
fn publish_snapshot(registry: &ChamberRegistry, store: &SampleStore, telemetry: &TelemetrySender) {
    let snapshot = TelemetrySnapshot::capture(registry, store.latest());
    let _ = telemetry.try_send(snapshot);
}
