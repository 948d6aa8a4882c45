//! Plain-text rendering of core view models.

use boothtrack_core::view::models::{RepCard, ShowCard};
use boothtrack_core::view::{
    BoothDetailView, BoothListView, DashboardView, EmptyHint, FilterOptionsView, MapperView,
};
use boothtrack_core::Person;
use std::fmt::Write;

pub fn shows(cards: &[ShowCard]) -> String {
    if cards.is_empty() {
        return "No shows configured. Add one with `boothtrack shows add <name>`.\n".to_string();
    }
    let mut out = String::new();
    for card in cards {
        let _ = write!(out, "{:<28} {}", card.id, card.name);
        if !card.location.is_empty() {
            let _ = write!(out, " · {}", card.location);
        }
        if let Some(dates) = &card.dates {
            let _ = write!(out, " · {dates}");
        }
        out.push('\n');
    }
    out
}

pub fn reps(cards: &[RepCard], owner_ids: &[Option<String>]) -> String {
    let mut out = String::new();
    for (card, owner) in cards.iter().zip(owner_ids) {
        let _ = write!(out, "[{}] {:<16} {}", card.initial, card.id, card.name);
        if let Some(owner) = owner {
            let _ = write!(out, " (CRM owner {owner})");
        }
        out.push('\n');
    }
    out
}

pub fn booth_list(view: &BoothListView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(
        out,
        "showing {} · to visit {} · follow up {} · demos {}",
        view.showing, view.to_visit, view.follow_up, view.demos
    );
    if !view.filter_chips.is_empty() {
        let _ = writeln!(out, "filters: {}", view.filter_chips.join(", "));
    }

    match view.empty_hint {
        Some(EmptyHint::ImportData) => {
            out.push_str("No booths found. Import a list with `boothtrack import`.\n");
            return out;
        }
        Some(EmptyHint::ClearFilters) => {
            out.push_str("No booths found. Clear the search or filters.\n");
            return out;
        }
        None => {}
    }

    for row in &view.rows {
        let _ = writeln!(
            out,
            "{:<11} {:>6}  {:<32} {:>7}  {} • {}  {}",
            row.status.label(),
            row.booth_number,
            row.company_name,
            row.sales,
            row.platform,
            row.protection,
            row.id
        );
    }
    out
}

pub fn booth_detail(view: &BoothDetailView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", view.company_name, view.list_label);
    let _ = writeln!(out, "{} · {}", view.booth_label, view.sales_label);
    if !view.domain.is_empty() {
        let _ = writeln!(out, "{}", view.domain);
    }
    let _ = writeln!(out, "{}", view.meta);
    let _ = writeln!(out, "status:    {}", view.status.label());
    let _ = writeln!(out, "contact:   {}", view.contact_name);
    let _ = writeln!(out, "orders/mo: {}", view.orders_per_month);
    let _ = writeln!(out, "aov:       {}", view.aov);
    let _ = writeln!(out, "card:      {}", if view.has_card { "attached" } else { "none" });
    if let Some(owner) = &view.owner {
        let _ = writeln!(out, "owner:     {owner}");
    }
    if let Some(claim) = &view.claim {
        let _ = writeln!(out, "claim:     {claim}");
    }
    if !view.notes.is_empty() {
        let _ = writeln!(out, "notes:\n{}", view.notes);
    }
    if !view.people.is_empty() {
        out.push_str("people:\n");
        for person in &view.people {
            let _ = writeln!(
                out,
                "  {} {} {} {}",
                person.full_name, person.title, person.email, person.phone
            );
        }
    }
    out
}

pub fn filter_options(view: &FilterOptionsView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--platform:    {}", view.platforms.join(", "));
    let _ = writeln!(out, "--protection:  {}", view.protection.join(", "));
    let _ = writeln!(out, "--returns:     {}", view.returns.join(", "));
    let thresholds: Vec<String> = view
        .min_revenue
        .iter()
        .map(|option| format!("{} ({})", option.threshold, option.label))
        .collect();
    let _ = writeln!(out, "--min-revenue: {}", thresholds.join(", "));
    let statuses: Vec<&str> = view.statuses.iter().map(|status| status.as_str()).collect();
    let _ = writeln!(out, "--status:      {}", statuses.join(", "));
    out
}

pub fn dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(
        out,
        "total {} · to visit {} · follow up {} · demos {}",
        view.total, view.to_visit, view.follow_up, view.demos
    );
    for row in &view.leaderboard {
        let _ = writeln!(
            out,
            "{:>2}. {:<16} {} demos  {} follow  {} left",
            row.rank, row.rep_name, row.demos, row.follow_up, row.to_visit
        );
    }
    out
}

pub fn mapper(view: &MapperView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} import: {} data rows", view.target, view.data_rows);
    for row in &view.rows {
        let marker = if row.field.required { " *" } else { "" };
        let column = row.column.as_deref().unwrap_or("-- skip --");
        let _ = writeln!(
            out,
            "  {:<20} <- {column}",
            format!("{}{marker}", row.field.label())
        );
    }
    if !view.missing_required.is_empty() {
        let _ = writeln!(out, "missing required: {}", view.missing_required.join(", "));
    }
    out
}

pub fn people(people: &[Person]) -> String {
    let mut out = String::new();
    for person in people {
        let _ = writeln!(
            out,
            "{:<24} {:<20} {:<28} {:<16} {}",
            person.full_name, person.company_domain, person.title, person.phone, person.email
        );
    }
    out
}
