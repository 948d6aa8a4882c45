//! Immutable view-model snapshots built from `AppState` and service output.

use crate::import::FieldSpec;
use crate::model::booth::{Booth, BoothId, LeadStatus};
use crate::model::catalog::{PLATFORMS, PROTECTION_PROVIDERS, RETURNS_PROVIDERS, REVENUE_THRESHOLDS};
use crate::model::person::Person;
use crate::model::rep::Rep;
use crate::model::show::Show;
use crate::service::{DashboardStats, PendingImport};
use crate::view::format::{date_range, format_currency, revenue_threshold_label};
use crate::view::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowCard {
    pub id: String,
    pub name: String,
    pub location: String,
    /// `Feb 12 - Feb 15`, when both dates are known.
    pub dates: Option<String>,
}

pub fn show_cards(shows: &[Show]) -> Vec<ShowCard> {
    shows
        .iter()
        .map(|show| ShowCard {
            id: show.id.clone(),
            name: show.name.clone(),
            location: show.location.clone(),
            dates: date_range(&show.start_date, &show.end_date),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepCard {
    pub id: String,
    pub name: String,
    pub initial: String,
}

pub fn rep_cards(reps: &[Rep]) -> Vec<RepCard> {
    reps.iter()
        .map(|rep| RepCard {
            id: rep.id.clone(),
            name: rep.name.clone(),
            initial: rep.initial(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoothRow {
    pub id: BoothId,
    pub status: LeadStatus,
    /// `-` when unknown.
    pub booth_number: String,
    pub company_name: String,
    pub platform: String,
    /// Protection provider, or `No protection`.
    pub protection: String,
    pub sales: String,
}

impl BoothRow {
    fn from_booth(booth: &Booth) -> Self {
        Self {
            id: booth.id,
            status: booth.status,
            booth_number: or_placeholder(&booth.booth_number, "-"),
            company_name: or_placeholder(&booth.company_name, "Unknown"),
            platform: booth.platform.clone(),
            protection: or_placeholder(&booth.protection, "No protection"),
            sales: format_currency(booth.estimated_monthly_sales),
        }
    }
}

/// What an empty list suggests next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyHint {
    /// The list itself has no records.
    ImportData,
    /// Records exist but search/filters hide all of them.
    ClearFilters,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoothListView {
    pub title: String,
    pub rows: Vec<BoothRow>,
    pub showing: usize,
    /// Status counts over the whole list, ignoring filters.
    pub to_visit: usize,
    pub follow_up: usize,
    pub demos: usize,
    pub filter_chips: Vec<String>,
    pub empty_hint: Option<EmptyHint>,
}

pub fn booth_list_view(state: &AppState) -> BoothListView {
    let rows: Vec<BoothRow> = state
        .visible_booths()
        .into_iter()
        .map(BoothRow::from_booth)
        .collect();
    let count = |status: LeadStatus| {
        state
            .booths
            .iter()
            .filter(|booth| booth.status == status)
            .count()
    };
    let empty_hint = match (rows.is_empty(), state.booths.is_empty()) {
        (false, _) => None,
        (true, true) => Some(EmptyHint::ImportData),
        (true, false) => Some(EmptyHint::ClearFilters),
    };

    BoothListView {
        title: state.list_title(),
        showing: rows.len(),
        rows,
        to_visit: count(LeadStatus::NotVisited),
        follow_up: count(LeadStatus::FollowUp),
        demos: count(LeadStatus::DemoBooked),
        filter_chips: state.filters.chips(),
        empty_hint,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonLine {
    pub full_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoothDetailView {
    pub id: BoothId,
    pub company_name: String,
    /// `Booth 101` / `Booth -`.
    pub booth_label: String,
    /// `$52K/mo`.
    pub sales_label: String,
    pub domain: String,
    /// Platform, protection and returns summary.
    pub meta: String,
    pub status: LeadStatus,
    pub contact_name: String,
    pub orders_per_month: String,
    pub aov: String,
    pub notes: String,
    pub has_card: bool,
    pub list_label: String,
    /// Rep matched through the imported CRM owner id.
    pub owner: Option<String>,
    /// `claimed from <id>` on copies, `claimed by <rep>` on sources.
    pub claim: Option<String>,
    pub people: Vec<PersonLine>,
}

pub fn booth_detail_view(booth: &Booth, people: &[Person], owner: Option<&Rep>) -> BoothDetailView {
    let mut meta = or_placeholder(&booth.platform, "No platform");
    if booth.protection.is_empty() {
        meta.push_str(" • No protection");
    } else {
        meta.push_str(&format!(" • {}", booth.protection));
    }
    if !booth.returns.is_empty() {
        meta.push_str(&format!(" • Returns: {}", booth.returns));
    }

    let claim = if booth.is_claimed_copy() {
        booth
            .source_booth_id
            .map(|source| format!("claimed from {source}"))
    } else {
        booth.claimed_by.as_ref().map(|rep| format!("claimed by {rep}"))
    };

    BoothDetailView {
        id: booth.id,
        company_name: or_placeholder(&booth.company_name, "Unknown"),
        booth_label: format!("Booth {}", or_placeholder(&booth.booth_number, "-")),
        sales_label: format!("{}/mo", format_currency(booth.estimated_monthly_sales)),
        domain: booth.domain.clone(),
        meta,
        status: booth.status,
        contact_name: booth.contact_name.clone(),
        orders_per_month: or_placeholder(&booth.orders_per_month, "N/A"),
        aov: or_placeholder(&booth.aov, "N/A"),
        notes: booth.notes.clone(),
        has_card: booth.has_card(),
        list_label: booth.list_type.label().to_string(),
        owner: owner.map(|rep| rep.name.clone()),
        claim,
        people: people
            .iter()
            .map(|person| PersonLine {
                full_name: person.full_name.clone(),
                title: person.title.clone(),
                email: person.email.clone(),
                phone: person.phone.clone(),
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevenueOption {
    pub threshold: f64,
    /// `Any` or `≥ $50K`.
    pub label: String,
}

/// Choices offered by the filter panel; "All" is implied for every
/// section except revenue, whose `Any` entry is listed.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptionsView {
    pub platforms: Vec<&'static str>,
    pub protection: Vec<&'static str>,
    pub returns: Vec<&'static str>,
    pub min_revenue: Vec<RevenueOption>,
    pub statuses: Vec<LeadStatus>,
}

pub fn filter_options_view() -> FilterOptionsView {
    FilterOptionsView {
        platforms: PLATFORMS.to_vec(),
        protection: PROTECTION_PROVIDERS.to_vec(),
        returns: RETURNS_PROVIDERS.to_vec(),
        min_revenue: REVENUE_THRESHOLDS
            .iter()
            .map(|&threshold| RevenueOption {
                threshold,
                label: revenue_threshold_label(threshold),
            })
            .collect(),
        statuses: LeadStatus::ALL.to_vec(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderRow {
    pub rank: usize,
    pub rep_name: String,
    pub demos: usize,
    pub follow_up: usize,
    pub to_visit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub title: String,
    pub total: usize,
    pub to_visit: usize,
    pub follow_up: usize,
    pub demos: usize,
    pub leaderboard: Vec<LeaderRow>,
}

pub fn dashboard_view(show_name: &str, stats: &DashboardStats) -> DashboardView {
    DashboardView {
        title: format!("{show_name} Dashboard"),
        total: stats.totals.total,
        to_visit: stats.totals.to_visit,
        follow_up: stats.totals.follow_up,
        demos: stats.totals.demos,
        leaderboard: stats
            .reps
            .iter()
            .enumerate()
            .map(|(index, rep)| LeaderRow {
                rank: index + 1,
                rep_name: rep.rep_name.clone(),
                demos: rep.demos,
                follow_up: rep.follow_up,
                to_visit: rep.to_visit,
            })
            .collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperRow {
    pub field: FieldSpec,
    /// Selected header, or `None` for "skip".
    pub column: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperView {
    pub target: String,
    pub headers: Vec<String>,
    pub rows: Vec<MapperRow>,
    pub data_rows: usize,
    /// Labels of required fields still skipped; confirmation is blocked
    /// while non-empty.
    pub missing_required: Vec<&'static str>,
}

pub fn mapper_view(pending: &PendingImport) -> MapperView {
    let headers = pending.headers().to_vec();
    let rows = pending
        .mapping
        .assignments()
        .into_iter()
        .map(|(field, column)| MapperRow {
            field,
            column: column.and_then(|index| headers.get(index).cloned()),
        })
        .collect();

    MapperView {
        target: pending.target.label().to_string(),
        rows,
        data_rows: pending.table.rows.len(),
        missing_required: pending.mapping.missing_required(),
        headers,
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}
