//! Command-line surface.

use boothtrack_core::import::ImportTarget;
use boothtrack_core::view::SortBy;
use boothtrack_core::{BoothId, LeadStatus, ListType};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "boothtrack")]
#[command(about = "Trade-show booth and lead tracker.", version)]
pub struct CommandLine {
    /// Config file (defaults to $BOOTHTRACK_CONFIG, then the user data dir).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage shows
    #[command(subcommand)]
    Shows(ShowCommand),
    /// Manage reps
    #[command(subcommand)]
    Reps(RepCommand),
    /// List booths of one show list
    List(ListArgs),
    /// Print the filter choices accepted by `list`
    Filters,
    /// Remove every booth of one list
    Clear {
        #[arg(long)]
        show: String,
        /// Required for hit lists
        #[arg(long)]
        rep: Option<String>,
        #[arg(long = "list", value_parser = parse_list_type)]
        list_type: ListType,
    },
    /// Remove one booth
    Remove { booth: BoothId },
    /// Show one booth with linked people
    Detail { booth: BoothId },
    /// Record the visit outcome
    Status {
        booth: BoothId,
        #[arg(value_parser = parse_status)]
        status: LeadStatus,
    },
    /// Replace the booth notes
    Notes { booth: BoothId, text: String },
    /// Set the contact name
    Contact { booth: BoothId, name: String },
    /// Set orders per month (e.g. "1,000 - 10,000" or N/A)
    Orders { booth: BoothId, option: String },
    /// Set average order value (e.g. "$100 - $200" or N/A)
    Aov { booth: BoothId, option: String },
    /// Attach or remove a business card image
    #[command(subcommand)]
    Card(CardCommand),
    /// Print follow-up text; unvisited booths move to Follow Up
    FollowUp { booth: BoothId },
    /// Print demo text and mark the booth Demo Booked
    Demo { booth: BoothId },
    /// Copy a shared-list booth into a rep's hit list
    Claim {
        booth: BoothId,
        #[arg(long)]
        rep: String,
    },
    /// Import a list from a file, stdin or a shared sheet
    Import(ImportArgs),
    /// List a show's people
    People {
        #[arg(long)]
        show: String,
        /// Only people of this company domain
        #[arg(long)]
        domain: Option<String>,
    },
    /// Rep leaderboard for a show
    Dashboard {
        #[arg(long)]
        show: String,
    },
    /// Export booths as CSV
    Export {
        #[arg(long)]
        show: String,
        #[arg(long)]
        rep: Option<String>,
        #[arg(long = "list", value_parser = parse_list_type)]
        list_type: Option<ListType>,
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ShowCommand {
    List,
    Add {
        name: String,
        #[arg(long, default_value = "")]
        location: String,
    },
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum RepCommand {
    List,
    Add {
        name: String,
        /// Owner id of this rep in the CRM
        #[arg(long)]
        owner_id: Option<String>,
    },
    Delete { id: String },
    /// Set (or clear, when omitted) the rep's CRM owner id
    Owner { id: String, owner_id: Option<String> },
}

#[derive(Subcommand)]
pub enum CardCommand {
    Attach { booth: BoothId, image: PathBuf },
    Remove { booth: BoothId },
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(long)]
    pub show: String,
    /// Rep whose hit list to open
    #[arg(long)]
    pub rep: Option<String>,
    /// hit_list, master, customers or current_opps
    #[arg(long = "list", value_parser = parse_list_type)]
    pub list_type: Option<ListType>,
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, default_value = "booth", value_parser = parse_sort)]
    pub sort: SortBy,
    /// Options are listed by `boothtrack filters`
    #[arg(long)]
    pub platform: Option<String>,
    #[arg(long)]
    pub protection: Option<String>,
    #[arg(long)]
    pub returns: Option<String>,
    /// One of the listed minimum revenue thresholds
    #[arg(long, default_value_t = 0.0)]
    pub min_revenue: f64,
    #[arg(long, value_parser = parse_status)]
    pub status: Option<LeadStatus>,
}

#[derive(Args)]
pub struct ImportArgs {
    #[arg(long)]
    pub show: String,
    /// Required for hit lists
    #[arg(long)]
    pub rep: Option<String>,
    /// hit_list, master, customers, current_opps or people
    #[arg(long, value_parser = parse_target)]
    pub target: ImportTarget,
    /// Tab or comma separated file; stdin when neither --file nor --url
    #[arg(long, conflicts_with = "url")]
    pub file: Option<PathBuf>,
    /// Shared spreadsheet link
    #[arg(long)]
    pub url: Option<String>,
    /// Column override, `field=Header` (empty header skips the field)
    #[arg(long = "map", value_parser = parse_override)]
    pub overrides: Vec<(String, String)>,
    /// Print the detected mapping without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_list_type(value: &str) -> Result<ListType, String> {
    ListType::parse(value).ok_or_else(|| format!("unknown list type `{value}`"))
}

fn parse_status(value: &str) -> Result<LeadStatus, String> {
    LeadStatus::parse(value).ok_or_else(|| format!("unknown status `{value}`"))
}

fn parse_sort(value: &str) -> Result<SortBy, String> {
    SortBy::parse(value).ok_or_else(|| format!("unknown sort `{value}` (booth, value, name)"))
}

fn parse_target(value: &str) -> Result<ImportTarget, String> {
    ImportTarget::parse(value).ok_or_else(|| format!("unknown import target `{value}`"))
}

fn parse_override(value: &str) -> Result<(String, String), String> {
    let (field, header) = value
        .split_once('=')
        .ok_or_else(|| format!("expected field=header, got `{value}`"))?;
    Ok((field.trim().to_string(), header.trim().to_string()))
}
