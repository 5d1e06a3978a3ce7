use std::{process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{flows::DeletionState, forms::FormData, ApiConfig, RegistryClient};
use shared::domain::DonorId;
use tracing_subscriber::EnvFilter;

mod console;
mod page;
mod settings;
mod shell;

use console::ConsoleOperator;
use page::Page;
use settings::load_settings;

#[derive(Parser, Debug)]
#[command(name = "hemobank", about = "Operator console for the blood-donor registry")]
struct Args {
    /// Registry API base URL, e.g. http://127.0.0.1:5000/api
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show registered donors
    List {
        /// Read-only listing without delete controls
        #[arg(long)]
        public: bool,
    },
    /// Submit the donor registration form
    Register {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        blood_type: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        emergency_contact: Option<String>,
    },
    /// Delete a donor after confirmation
    Delete {
        id: DonorId,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Submit the donation form
    RecordDonation {
        #[arg(long)]
        donor_id: Option<String>,
        #[arg(long = "date")]
        donation_date: Option<String>,
        #[arg(long)]
        quantity_ml: Option<String>,
        #[arg(long)]
        hemoglobin: Option<String>,
        #[arg(long)]
        blood_pressure: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Show one donor's full record
    Show { id: DonorId },
    /// Check whether a donor may donate
    Eligibility { id: DonorId },
    /// Interactive session (default)
    Shell,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn form_from<const N: usize>(fields: [(&str, Option<String>); N]) -> FormData {
    fields
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)))
        .collect()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }
    let config = ApiConfig::new(&settings.api_base_url)
        .with_context(|| format!("invalid registry API url '{}'", settings.api_base_url))?;
    tracing::info!(api = %config.base_url(), "registry client ready");

    let assume_yes = matches!(args.command, Some(Command::Delete { yes: true, .. }));
    let operator = Arc::new(ConsoleOperator::new(assume_yes));
    let page = Page::new(&settings, Arc::new(RegistryClient::new(config)), operator);

    let succeeded = match args.command.unwrap_or(Command::Shell) {
        Command::List { public } => {
            if public {
                page.show_public().await;
            } else {
                page.show_management().await;
            }
            true
        }
        Command::Register {
            name,
            age,
            email,
            phone,
            blood_type,
            address,
            emergency_contact,
        } => {
            let form = form_from([
                ("name", name),
                ("age", age),
                ("email", email),
                ("phone", phone),
                ("blood_type", blood_type),
                ("address", address),
                ("emergency_contact", emergency_contact),
            ]);
            page.register(&form).await.is_success()
        }
        Command::Delete { id, .. } => {
            !matches!(page.delete(id).await, DeletionState::Failed(_))
        }
        Command::RecordDonation {
            donor_id,
            donation_date,
            quantity_ml,
            hemoglobin,
            blood_pressure,
            notes,
        } => {
            let mut form = form_from([
                ("donor_id", donor_id),
                ("donation_date", donation_date),
                ("quantity_ml", quantity_ml),
                ("hemoglobin", hemoglobin),
                ("blood_pressure", blood_pressure),
                ("notes", notes),
            ]);
            page.record_donation(&mut form).await.is_success()
        }
        Command::Show { id } => page.show_donor(id).await,
        Command::Eligibility { id } => page.check_eligibility(id).await,
        Command::Shell => {
            shell::run(&page).await;
            true
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
