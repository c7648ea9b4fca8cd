//! llrptk-cli - Runs a simple inventory operation against an LLRP reader.
//!
//! Connects, clears the reader's configuration, installs a single ROSpec,
//! then starts it a configurable number of times, printing the EPCs of
//! the tags each run reports.

use clap::Parser;
use colored::Colorize;
use llrptk_client::{ClientError, Connection, ConnectionConfig, RecvTimeout};
use llrptk_protocol::schema::{self, msg, param};
use llrptk_protocol::{to_xml_string, Element, FieldValue, TypeRegistry};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tracing_subscriber::EnvFilter;

/// ROSpec id the demo installs and runs.
const ROSPEC_ID: u32 = 123;

/// How long each inventory run observes tags, in milliseconds.
const INVENTORY_DURATION_MS: u32 = 5000;

#[derive(Parser)]
#[command(name = "llrptk-cli")]
#[command(about = "Simple LLRP inventory client")]
#[command(version)]
struct Cli {
    /// Reader hostname or address
    reader: String,

    /// Reader port
    #[arg(short, long, default_value_t = llrptk_protocol::DEFAULT_PORT)]
    port: u16,

    /// Number of inventory runs
    #[arg(short, long, default_value_t = 5)]
    runs: u32,

    /// Per-operation timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,

    /// Largest frame accepted from the reader, in bytes
    #[arg(long, default_value_t = 32 * 1024)]
    max_frame: u32,

    /// Increase verbosity (-v prints progress, -vv dumps messages)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    std::process::exit(run(cli).await);
}

async fn run(cli: Cli) -> i32 {
    let registry = Arc::new(TypeRegistry::new());
    let config = ConnectionConfig::new().with_max_frame_size(cli.max_frame);
    let timeout = RecvTimeout::Bounded(Duration::from_millis(cli.timeout_ms));

    let mut conn =
        match Connection::open(registry, config, &cli.reader, cli.port).await {
            Ok(conn) => conn,
            Err(e) => {
                eprintln!(
                    "{}: cannot connect to {}:{}: {e}",
                    "Error".red(),
                    cli.reader,
                    cli.port
                );
                return 1;
            }
        };
    println!("{} {}:{}", "Connected to".green(), cli.reader, cli.port);

    let outcome = inventory(&mut conn, &cli, timeout).await;

    // Best-effort teardown; the reader drops state on disconnect anyway.
    let _ = scrub_configuration(&mut conn, &cli, timeout).await;
    let _ = conn
        .transact(&Element::new(&schema::CLOSE_CONNECTION), timeout)
        .await;
    let _ = conn.close().await;

    match outcome {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}: {e}", "Error".red());
            2
        }
    }
}

/// The full demo sequence: verify the connection, scrub, install and
/// enable the ROSpec, then run it `cli.runs` times.
async fn inventory(
    conn: &mut Connection<TcpStream>,
    cli: &Cli,
    timeout: RecvTimeout,
) -> Result<(), ClientError> {
    check_connection_status(conn, cli, timeout).await?;
    scrub_configuration(conn, cli, timeout).await?;
    add_rospec(conn, cli, timeout).await?;
    enable_rospec(conn, cli, timeout).await?;

    for run in 1..=cli.runs {
        println!("{} {run}/{}", "Inventory run".cyan(), cli.runs);
        start_rospec(conn, cli, timeout).await?;
        await_and_print_report(conn, cli).await?;
    }
    Ok(())
}

/// Waits for the reader's initial READER_EVENT_NOTIFICATION and checks
/// the connection attempt succeeded.
async fn check_connection_status(
    conn: &mut Connection<TcpStream>,
    cli: &Cli,
    timeout: RecvTimeout,
) -> Result<(), ClientError> {
    let notification = conn.receive(timeout).await?;
    dump(cli, &notification);

    let status = notification
        .first_child(param::READER_EVENT_NOTIFICATION_DATA)
        .and_then(|d| d.first_child(param::CONNECTION_ATTEMPT_EVENT))
        .and_then(|e| e.enum_label("Status"));
    match status {
        Some("Success") => {
            tracing::info!("reader accepted the connection");
            Ok(())
        }
        Some(other) => Err(ClientError::Reader {
            status: 0,
            message: format!("reader refused the connection: {other}"),
        }),
        None => Err(ClientError::Reader {
            status: 0,
            message: "reader did not announce a connection attempt event".into(),
        }),
    }
}

/// Factory-resets the reader and deletes all ROSpecs, leaving a clean
/// slate for the demo's own configuration.
async fn scrub_configuration(
    conn: &mut Connection<TcpStream>,
    cli: &Cli,
    timeout: RecvTimeout,
) -> Result<(), ClientError> {
    let reset = Element::new(&schema::SET_READER_CONFIG)
        .with_field("ResetToFactoryDefault", FieldValue::Bool(true))?;
    let response = conn.transact(&reset, timeout).await?;
    dump(cli, &response);
    check_llrp_status(&response)?;
    tracing::info!("factory defaults restored");

    // ROSpecID zero addresses every ROSpec on the reader.
    let delete = Element::new(&schema::DELETE_ROSPEC)
        .with_field("ROSpecID", FieldValue::U32(0))?;
    let response = conn.transact(&delete, timeout).await?;
    dump(cli, &response);
    check_llrp_status(&response)?;
    tracing::info!("all ROSpecs deleted");
    Ok(())
}

/// Installs the demo ROSpec: all antennas, a fixed-duration AISpec, and
/// a report at the end of each run.
async fn add_rospec(
    conn: &mut Connection<TcpStream>,
    cli: &Cli,
    timeout: RecvTimeout,
) -> Result<(), ClientError> {
    let boundary = Element::new(&schema::RO_BOUNDARY_SPEC)
        .with_child(
            Element::new(&schema::RO_SPEC_START_TRIGGER)
                .with_enum("ROSpecStartTriggerType", "Null")?,
        )
        .with_child(
            Element::new(&schema::RO_SPEC_STOP_TRIGGER)
                .with_enum("ROSpecStopTriggerType", "Null")?,
        );

    let ai_spec = Element::new(&schema::AI_SPEC)
        // Antenna id zero means every antenna.
        .with_field("AntennaIDs", FieldValue::U16V(vec![0]))?
        .with_child(
            Element::new(&schema::AI_SPEC_STOP_TRIGGER)
                .with_enum("AISpecStopTriggerType", "Duration")?
                .with_field("DurationTrigger", FieldValue::U32(INVENTORY_DURATION_MS))?,
        )
        .with_child(
            Element::new(&schema::INVENTORY_PARAMETER_SPEC)
                .with_field("InventoryParameterSpecID", FieldValue::U16(1234))?
                .with_enum("ProtocolID", "EPCGlobalClass1Gen2")?,
        );

    let report_spec = Element::new(&schema::RO_REPORT_SPEC)
        .with_enum("ROReportTrigger", "Upon_N_Tags_Or_End_Of_ROSpec")?
        .with_field("N", FieldValue::U16(0))?
        .with_child(Element::new(&schema::TAG_REPORT_CONTENT_SELECTOR));

    let rospec = Element::new(&schema::RO_SPEC)
        .with_field("ROSpecID", FieldValue::U32(ROSPEC_ID))?
        .with_field("Priority", FieldValue::U8(0))?
        .with_enum("CurrentState", "Disabled")?
        .with_child(boundary)
        .with_child(ai_spec)
        .with_child(report_spec);

    let add = Element::new(&schema::ADD_ROSPEC).with_child(rospec);
    dump(cli, &add);

    let response = conn.transact(&add, timeout).await?;
    dump(cli, &response);
    check_llrp_status(&response)?;
    tracing::info!("ROSpec {ROSPEC_ID} added");
    Ok(())
}

async fn enable_rospec(
    conn: &mut Connection<TcpStream>,
    cli: &Cli,
    timeout: RecvTimeout,
) -> Result<(), ClientError> {
    let enable = Element::new(&schema::ENABLE_ROSPEC)
        .with_field("ROSpecID", FieldValue::U32(ROSPEC_ID))?;
    let response = conn.transact(&enable, timeout).await?;
    dump(cli, &response);
    check_llrp_status(&response)?;
    tracing::info!("ROSpec {ROSPEC_ID} enabled");
    Ok(())
}

async fn start_rospec(
    conn: &mut Connection<TcpStream>,
    cli: &Cli,
    timeout: RecvTimeout,
) -> Result<(), ClientError> {
    let start = Element::new(&schema::START_ROSPEC)
        .with_field("ROSpecID", FieldValue::U32(ROSPEC_ID))?;
    let response = conn.transact(&start, timeout).await?;
    dump(cli, &response);
    check_llrp_status(&response)?;
    tracing::info!("ROSpec {ROSPEC_ID} started");
    Ok(())
}

/// Collects reports and events until the run's duration (plus slack for
/// the reader to deliver the final report) has elapsed.
async fn await_and_print_report(
    conn: &mut Connection<TcpStream>,
    cli: &Cli,
) -> Result<(), ClientError> {
    let slack = Duration::from_millis(2000);
    let deadline = Instant::now() + Duration::from_millis(INVENTORY_DURATION_MS as u64) + slack;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(());
        }
        let message = match conn.receive(RecvTimeout::Bounded(remaining)).await {
            Ok(message) => message,
            Err(e) if e.is_timeout() => return Ok(()),
            Err(e) => return Err(e),
        };
        dump(cli, &message);

        match message.type_num() {
            msg::RO_ACCESS_REPORT => print_tag_report(&message),
            msg::READER_EVENT_NOTIFICATION => print_reader_event(&message),
            other => {
                tracing::warn!("ignoring unexpected message type {other} while inventorying")
            }
        }
    }
}

/// Prints one line per tag in an RO_ACCESS_REPORT.
fn print_tag_report(report: &Element) {
    for tag in report.children_of(param::TAG_REPORT_DATA) {
        let epc = tag
            .first_child(param::EPC_DATA)
            .or_else(|| tag.first_child(param::EPC_96))
            .and_then(|e| e.bytes_field("EPC"));
        let epc = match epc {
            Some(bytes) => bytes
                .iter()
                .map(|b| format!("{b:02X}"))
                .collect::<Vec<_>>()
                .join(""),
            None => "<no EPC>".to_owned(),
        };

        let mut line = format!("  {}", epc.bold());
        if let Some(antenna) = tag
            .first_child(param::ANTENNA_ID)
            .and_then(|a| a.u16_field("AntennaID"))
        {
            line.push_str(&format!(" antenna={antenna}"));
        }
        if let Some(rssi) = tag
            .first_child(param::PEAK_RSSI)
            .and_then(|r| r.u8_field("PeakRSSI"))
        {
            line.push_str(&format!(" rssi={}", rssi as i8));
        }
        if let Some(count) = tag
            .first_child(param::TAG_SEEN_COUNT)
            .and_then(|c| c.u16_field("TagCount"))
        {
            line.push_str(&format!(" seen={count}"));
        }
        println!("{line}");
    }
}

/// Prints antenna and exception events carried by a notification.
fn print_reader_event(notification: &Element) {
    let data = match notification.first_child(param::READER_EVENT_NOTIFICATION_DATA) {
        Some(data) => data,
        None => return,
    };

    if let Some(antenna) = data.first_child(param::ANTENNA_EVENT) {
        let what = antenna.enum_label("EventType").unwrap_or("?");
        let id = antenna.u16_field("AntennaID").unwrap_or(0);
        println!("  {} antenna {id}: {what}", "event".yellow());
    }
    if let Some(exception) = data.first_child(param::READER_EXCEPTION_EVENT) {
        let text = exception.str_field("Message").unwrap_or("");
        println!("  {} {text}", "exception".yellow());
    }
}

/// Verifies a response's LLRPStatus says M_Success.
fn check_llrp_status(response: &Element) -> Result<(), ClientError> {
    let status = response
        .first_child(param::LLRP_STATUS)
        .ok_or_else(|| ClientError::Reader {
            status: 0,
            message: format!("{} carries no LLRPStatus", response.name()),
        })?;

    if status.enum_label("StatusCode") == Some("M_Success") {
        return Ok(());
    }
    Err(ClientError::Reader {
        status: status.u16_field("StatusCode").unwrap_or(0),
        message: status.str_field("ErrorDescription").unwrap_or("").to_owned(),
    })
}

/// Dumps a message tree at -vv.
fn dump(cli: &Cli, elem: &Element) {
    if cli.verbose >= 2 {
        print!("{}", to_xml_string(elem));
    }
}
