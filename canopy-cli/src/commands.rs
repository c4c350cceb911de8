//! Command handlers that drive the core flows from the terminal.
//!
//! Each handler builds the relevant board, walks the same sequence a UI
//! would (including the gate dialog for moderated actions), and prints the
//! resulting notification.

use anyhow::{Context, anyhow, bail};
use clap::Subcommand;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use canopy_core::events::EventBoard;
use canopy_core::gate::{AccessGate, GateState};
use canopy_core::locations::LocationBoard;
use canopy_core::notify::NotificationChannel;
use canopy_core::outcome::{LoadPhase, SubmitError};
use canopy_core::partners::PartnerDirectory;
use canopy_core::reports::ReportDesk;
use canopy_sdk::client::{
    EventsClient, GeocodeClient, LocationsClient, PartnersClient, ReportsClient,
};
use canopy_sdk::objects::events::{EventDraft, RegistrationDraft};
use canopy_sdk::objects::locations::LocationDraft;
use canopy_sdk::objects::partners::PartnerSignup;
use canopy_sdk::objects::reports::ReportDraft;

use crate::config::FileConfig;

#[derive(Subcommand, Debug)]
pub enum EventsAction {
    /// List upcoming events with their registration status
    List,
    /// Add a new event (requires the moderation code)
    Add {
        /// Moderation code
        #[arg(long)]
        code: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        location: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Event date, RFC 3339 (e.g. 2026-09-12T08:00:00Z)
        #[arg(long, value_parser = parse_datetime)]
        date: OffsetDateTime,
        #[arg(long)]
        capacity: u32,
    },
    /// Remove an event (requires the moderation code)
    Remove {
        /// Moderation code
        #[arg(long)]
        code: String,
        id: i64,
    },
    /// Register a participant for an event
    Register {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PartnersAction {
    /// List registered waste-bank partners
    List,
    /// Sign up a new partner
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "")]
        message: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReportsAction {
    /// Show the latest filed reports
    List,
    /// File a new damage report
    File {
        #[arg(long)]
        reporter: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        damage_type: String,
        #[arg(long)]
        description: String,
        /// Day the damage was observed (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: Date,
    },
}

#[derive(Subcommand, Debug)]
pub enum LocationsAction {
    /// List green-action sites on the community map
    List,
    /// Add a site; coordinates are geocoded from the name when omitted
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        latitude: Option<f64>,
        #[arg(long)]
        longitude: Option<f64>,
    },
}

pub async fn events(config: &FileConfig, action: EventsAction) -> anyhow::Result<()> {
    let client = EventsClient::new(config.api.base_url.clone());
    let gate = AccessGate::new(config.moderation.secret.clone());
    let mut board = EventBoard::new(client, gate);

    match action {
        EventsAction::List => {
            board.load().await;
            print_events(&board)
        }
        EventsAction::Add {
            code,
            title,
            location,
            description,
            date,
            capacity,
        } => {
            require_secret(config)?;
            board.open_add_dialog();
            if !board.submit_add_code(&code) {
                bail!(gate_error(board.add_dialog()));
            }
            let draft = EventDraft {
                title,
                location,
                description,
                date,
                capacity,
            };
            match board.submit_new_event(draft).await {
                Ok(()) => {
                    print_notification(board.notifications());
                    Ok(())
                }
                Err(err) => Err(dialog_failure(board.add_dialog(), err)),
            }
        }
        EventsAction::Remove { code, id } => {
            require_secret(config)?;
            // Load first so the removal notification can name the title.
            board.load().await;
            board.open_remove_dialog();
            if !board.submit_remove_code(&code) {
                bail!(gate_error(board.remove_dialog()));
            }
            match board.submit_removal(id).await {
                Ok(()) => {
                    print_notification(board.notifications());
                    Ok(())
                }
                Err(err) => Err(dialog_failure(board.remove_dialog(), err)),
            }
        }
        EventsAction::Register {
            id,
            name,
            email,
            phone,
        } => {
            board.load().await;
            if let LoadPhase::Failed { message } = board.phase() {
                bail!("{message}");
            }
            if let Some(event) = board.events().iter().find(|e| e.id == id) {
                if event.is_full() {
                    bail!(
                        "Event \"{}\" is full ({}/{})",
                        event.title,
                        event.registered,
                        event.capacity
                    );
                }
            }
            board
                .submit_registration(id, RegistrationDraft { name, email, phone })
                .await
                .context("registration was not accepted")?;
            print_notification(board.notifications());
            Ok(())
        }
    }
}

pub async fn partners(config: &FileConfig, action: PartnersAction) -> anyhow::Result<()> {
    let mut directory = PartnerDirectory::new(PartnersClient::new(config.api.base_url.clone()));

    match action {
        PartnersAction::List => {
            directory.load().await;
            if let LoadPhase::Failed { message } = directory.phase() {
                bail!("{message}");
            }
            if directory.partners().is_empty() {
                println!("No partners registered yet.");
            }
            for partner in directory.partners() {
                println!(
                    "#{:<4} {:<30} {:<18} {}",
                    partner.id,
                    partner.name,
                    partner.phone,
                    partner.address.as_deref().unwrap_or("address not available"),
                );
            }
            Ok(())
        }
        PartnersAction::Signup {
            name,
            email,
            phone,
            address,
            message,
        } => {
            let signup = PartnerSignup {
                name,
                email,
                phone,
                address,
                message,
            };
            directory
                .submit_signup(signup)
                .await
                .context("signup was not accepted")?;
            print_notification(directory.notifications());
            Ok(())
        }
    }
}

pub async fn reports(config: &FileConfig, action: ReportsAction) -> anyhow::Result<()> {
    let mut desk = ReportDesk::new(ReportsClient::new(config.api.base_url.clone()));

    match action {
        ReportsAction::List => {
            desk.load().await;
            if let LoadPhase::Failed { message } = desk.phase() {
                bail!("{message}");
            }
            if desk.reports().is_empty() {
                println!("No reports filed yet. Be the first!");
            }
            for report in desk.reports() {
                println!(
                    "#{:<4} {}  {:<24} {:<20} by {}",
                    report.id,
                    report.incident_date,
                    report.location,
                    report.damage_type,
                    report.reporter_name,
                );
            }
            Ok(())
        }
        ReportsAction::File {
            reporter,
            location,
            damage_type,
            description,
            date,
        } => {
            let draft = ReportDraft {
                reporter_name: reporter,
                location,
                damage_type,
                description,
                incident_date: date,
            };
            desk.submit(draft)
                .await
                .context("the report was not accepted")?;
            print_notification(desk.notifications());
            Ok(())
        }
    }
}

pub async fn locations(config: &FileConfig, action: LocationsAction) -> anyhow::Result<()> {
    let mut board = LocationBoard::new(
        LocationsClient::new(config.api.base_url.clone()),
        GeocodeClient::new(config.geocoding.endpoint.clone()),
    );

    match action {
        LocationsAction::List => {
            board.load().await;
            if let LoadPhase::Failed { message } = board.phase() {
                bail!("{message}");
            }
            if board.locations().is_empty() {
                println!("No locations on the map yet.");
            }
            for location in board.locations() {
                println!(
                    "#{:<4} {:<30} {:.5}, {:.5}",
                    location.id, location.name, location.latitude, location.longitude,
                );
            }
            Ok(())
        }
        LocationsAction::Add {
            name,
            description,
            latitude,
            longitude,
        } => {
            let draft = LocationDraft {
                name,
                description,
                latitude,
                longitude,
            };
            match board.add_location(draft).await {
                Ok(created) => {
                    println!(
                        "Location \"{}\" added at {:.5}, {:.5}",
                        created.name, created.latitude, created.longitude,
                    );
                    Ok(())
                }
                Err(err) => match board.notifications().current() {
                    Some(note) => Err(anyhow!("{}", note.message)),
                    None => Err(err.into()),
                },
            }
        }
    }
}

pub async fn ping(config: &FileConfig) -> anyhow::Result<()> {
    let client = EventsClient::new(config.api.base_url.clone());
    let gate = AccessGate::new(config.moderation.secret.clone());
    let mut board = EventBoard::new(client, gate);

    if board.check_connection().await {
        println!("Backend reachable at {}", config.api.base_url);
        Ok(())
    } else {
        match board.phase() {
            LoadPhase::Failed { message } => bail!("{message}"),
            _ => bail!("Connection test failed"),
        }
    }
}

fn require_secret(config: &FileConfig) -> anyhow::Result<()> {
    if config.moderation.secret.is_empty() {
        bail!("No moderation secret is configured; set [moderation].secret in the config file.");
    }
    Ok(())
}

fn gate_error(state: &GateState) -> String {
    match state {
        GateState::CodeEntry {
            error: Some(message),
        } => message.clone(),
        _ => "The moderation code was not accepted.".to_string(),
    }
}

/// Prefer the inline dialog error (it carries the server's message) over
/// the raw submit error.
fn dialog_failure(state: &GateState, err: SubmitError) -> anyhow::Error {
    match state {
        GateState::ActionForm {
            error: Some(message),
        } => anyhow!("{message}"),
        _ => anyhow::Error::new(err),
    }
}

fn print_events(board: &EventBoard<EventsClient>) -> anyhow::Result<()> {
    if let LoadPhase::Failed { message } = board.phase() {
        bail!("{message} (run `canopy ping` to test the connection)");
    }
    if board.events().is_empty() {
        println!("No events available yet.");
        return Ok(());
    }
    for event in board.events() {
        let date = event
            .date
            .format(&Rfc3339)
            .unwrap_or_else(|_| event.date.to_string());
        let status = if event.is_full() { "FULL" } else { "open" };
        println!(
            "#{:<4} {:<30} {}  {:<24} {}/{} {}",
            event.id,
            event.title,
            date,
            event.location,
            event.registered,
            event.capacity,
            status,
        );
    }
    Ok(())
}

fn print_notification(channel: &NotificationChannel) {
    if let Some(note) = channel.current() {
        println!("{}", note.message);
    }
}

fn parse_datetime(s: &str) -> Result<OffsetDateTime, String> {
    OffsetDateTime::parse(s, &Rfc3339).map_err(|e| e.to_string())
}

fn parse_date(s: &str) -> Result<Date, String> {
    Date::parse(s, format_description!("[year]-[month]-[day]")).map_err(|e| e.to_string())
}
