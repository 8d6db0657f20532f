use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use complaintdesk::complaint::intake::digits_only;
use complaintdesk::complaint::{encode_photo, validate};
use complaintdesk::config::load_or_default;
use complaintdesk::dashboard::{status_choices, DashboardView, StatusChangeOutcome, EMPTY_COLUMN_TEXT};
use complaintdesk::logging::init_logging;
use complaintdesk::repository::default_fixtures;
use complaintdesk::summary::format_summary;
use complaintdesk::{
    App, Complaint, ComplaintCategory, ComplaintDeskError, ComplaintStatus, NewComplaint, Result,
};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Complaint intake and triage desk.
#[derive(Parser)]
#[command(name = "complaintdesk", version, about = "Complaint intake and triage desk")]
struct Cli {
    /// Path to the JSON config file (defaults apply when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the triage board grouped by status
    Board,

    /// Submit a new complaint
    Submit {
        /// 12-digit customer account number
        #[arg(long)]
        ca_number: String,
        /// Customer's full name
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        /// power-outage, high-voltage, billing or new-connection
        #[arg(long)]
        category: ComplaintCategory,
        #[arg(long)]
        description: String,
        /// Where the problem is
        #[arg(long)]
        location: String,
        /// Image file to attach
        #[arg(long)]
        photo: Option<PathBuf>,
    },

    /// Change the status of a complaint
    SetStatus {
        id: String,
        /// pending, in-progress or resolved
        status: ComplaintStatus,
    },

    /// Show a single complaint
    Show { id: String },

    /// Generate a staff summary for a complaint
    Summarize {
        id: String,
        /// Print the summary rendered as HTML
        #[arg(long)]
        html: bool,
    },

    /// Seed the demo complaints into an empty store
    Seed,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {}", e);
        let code = match e {
            ComplaintDeskError::InvalidSubmission(_) => 2,
            _ => 1,
        };
        process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = load_or_default(cli.config.as_deref())?;
    if let Err(e) = init_logging(&config.logging) {
        eprintln!("warning: {}", e);
    }

    if matches!(cli.command, Commands::Seed) {
        config.seed.enabled = false;
    }
    let app = App::bootstrap(config).await?;

    match cli.command {
        Commands::Board => cmd_board(&app, cli.output).await,
        Commands::Submit {
            ca_number,
            name,
            phone,
            category,
            description,
            location,
            photo,
        } => {
            let photo = match photo {
                Some(path) => Some(
                    encode_photo(&path).map_err(|source| ComplaintDeskError::Photo { path, source })?,
                ),
                None => None,
            };
            let fields = NewComplaint {
                ca_number: digits_only(&ca_number),
                full_name: name,
                phone,
                category,
                description,
                photo,
                location,
            };
            validate(&fields)?;
            let complaint = app.repository().create(fields).await?;
            print_complaint(&complaint, cli.output);
            Ok(())
        }
        Commands::SetStatus { id, status } => cmd_set_status(&app, &id, status, cli.output).await,
        Commands::Show { id } => {
            let complaint = app
                .repository()
                .find(&id)
                .await?
                .ok_or(ComplaintDeskError::NotFound(id))?;
            print_complaint(&complaint, cli.output);
            Ok(())
        }
        Commands::Summarize { id, html } => {
            let dashboard = app.dashboard();
            dashboard.refresh().await;
            if dashboard.open_details(&id).is_none() {
                return Err(ComplaintDeskError::NotFound(id));
            }
            let text = dashboard
                .generate_summary(app.summarizer())
                .await
                .unwrap_or_default();
            if html {
                println!("{}", format_summary(&text));
            } else {
                println!("{}", text);
            }
            Ok(())
        }
        Commands::Seed => {
            let seeded = app.repository().seed_if_empty(&default_fixtures()).await?;
            if seeded == 0 {
                println!("Store already holds complaints; nothing seeded.");
            } else {
                println!("Seeded {} complaints.", seeded);
            }
            Ok(())
        }
    }
}

async fn cmd_board(app: &App, output: OutputFormat) -> Result<()> {
    app.dashboard().refresh().await;

    let board = match app.dashboard().view() {
        DashboardView::Ready(board) => board,
        DashboardView::Failed { message } => {
            eprintln!("{}", message);
            process::exit(1);
        }
        DashboardView::Loading => return Ok(()),
    };

    if output == OutputFormat::Json {
        println!("{}", to_json(&board));
        return Ok(());
    }

    for column in &board.columns {
        println!("== {} ==", column.heading());
        if column.is_empty() {
            println!("  {}", EMPTY_COLUMN_TEXT);
        }
        for complaint in &column.complaints {
            println!(
                "  [{}] {}  CA: {}  Received: {}",
                complaint.id,
                complaint.category,
                complaint.ca_number,
                complaint.created_at.format("%Y-%m-%d %H:%M")
            );
            if let Some(choices) = status_choices(complaint) {
                let labels: Vec<&str> = choices.iter().map(|s| s.label()).collect();
                println!("      move to: {}", labels.join(" | "));
            }
        }
        println!();
    }
    Ok(())
}

async fn cmd_set_status(
    app: &App,
    id: &str,
    status: ComplaintStatus,
    output: OutputFormat,
) -> Result<()> {
    let dashboard = app.dashboard();
    dashboard.refresh().await;

    match dashboard.apply_status_change(id, status).await {
        StatusChangeOutcome::Confirmed(complaint) => {
            print_complaint(&complaint, output);
            Ok(())
        }
        StatusChangeOutcome::Reverted => {
            if let Some(notice) = dashboard.take_notice() {
                eprintln!("{}", notice);
            }
            process::exit(1);
        }
    }
}

fn print_complaint(complaint: &Complaint, output: OutputFormat) {
    if output == OutputFormat::Json {
        println!("{}", to_json(complaint));
        return;
    }

    println!("Complaint {}", complaint.id);
    println!("  Status:      {}", complaint.status);
    println!("  Category:    {}", complaint.category);
    println!("  Name:        {}", complaint.full_name);
    println!("  CA Number:   {}", complaint.ca_number);
    println!("  Phone:       {}", complaint.phone);
    println!("  Location:    {}", complaint.location);
    println!("  Description: {}", complaint.description);
    if complaint.photo.is_some() {
        println!("  Photo:       attached");
    }
    println!("  Created:     {}", complaint.created_at.to_rfc3339());
    println!("  Updated:     {}", complaint.updated_at.to_rfc3339());
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}
