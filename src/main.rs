use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use dotenvy::dotenv;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use logship::client::LogAnalyticsClient;
use logship::config::Config;

const DEMO_LOG_TYPE: &str = "logtable";

#[derive(Debug, Serialize)]
struct AuditEvent {
    #[serde(rename = "EventDateTimeUTC")]
    event_date_time_utc: DateTime<Utc>,
    #[serde(rename = "EventType")]
    event_type: String,
    #[serde(rename = "UserID")]
    user_id: String,
    #[serde(rename = "LocationId", skip_serializing_if = "Option::is_none")]
    location_id: Option<String>,
    #[serde(rename = "FileName", skip_serializing_if = "Option::is_none")]
    file_name: Option<String>,
}

impl AuditEvent {
    fn login() -> Self {
        Self {
            event_date_time_utc: Utc::now(),
            event_type: "Login".to_string(),
            user_id: Uuid::new_v4().to_string(),
            location_id: Some(Uuid::new_v4().to_string()),
            file_name: None,
        }
    }

    fn open_file() -> Self {
        Self {
            event_date_time_utc: Utc::now(),
            event_type: "Open File".to_string(),
            user_id: Uuid::new_v4().to_string(),
            location_id: None,
            file_name: Some(Uuid::new_v4().to_string()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv();
    init_tracing();

    let cfg_path = std::env::args().nth(1).map(PathBuf::from);
    let cfg = Config::load(cfg_path)?;
    let client = LogAnalyticsClient::new(&cfg)?;
    info!("log analytics client ready, endpoint {}", client.ingestion_url());

    print_menu();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "1" => send_demo_batch(&client, AuditEvent::login, "login").await,
            "2" => send_demo_batch(&client, AuditEvent::open_file, "open-file").await,
            "" => {}
            other => {
                info!("unknown command '{other}'");
                print_menu();
            }
        }
    }

    Ok(())
}

async fn send_demo_batch(client: &LogAnalyticsClient, make: fn() -> AuditEvent, label: &str) {
    let events: Vec<AuditEvent> = (0..5).map(|_| make()).collect();
    match client.submit_many(&events, DEMO_LOG_TYPE).await {
        Ok(()) => info!("sent {} demo {label} events", events.len()),
        Err(err) => warn!("demo {label} batch failed: {err}"),
    }
}

fn print_menu() {
    info!("enter 1 to send demo login events, 2 to send demo open-file events");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();
}
