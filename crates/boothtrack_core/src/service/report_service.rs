//! Show dashboard statistics and CSV export.
//!
//! # Invariants
//! - Dashboard stats only count each rep's own hit list.
//! - Rep ranking is demos desc, then follow-ups desc; ties keep rep order.
//! - Export columns are fixed and every cell is quoted.

use crate::model::booth::{Booth, LeadStatus, ListType};
use crate::repo::{BoothQuery, Store};
use crate::service::{not_found, ServiceError, ServiceResult};
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// Export header row, in column order.
pub const EXPORT_HEADERS: [&str; 14] = [
    "Company Name",
    "Booth",
    "Domain",
    "Est Monthly Sales",
    "Platform",
    "Protection",
    "Returns",
    "Status",
    "Contact",
    "Orders/Mo",
    "AOV",
    "Notes",
    "Rep",
    "List Type",
];

/// Status counts for one rep's hit list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepStats {
    pub rep_id: String,
    pub rep_name: String,
    pub to_visit: usize,
    pub follow_up: usize,
    pub demos: usize,
    pub dq: usize,
    pub total: usize,
}

impl RepStats {
    fn count(&mut self, status: LeadStatus) {
        match status {
            LeadStatus::NotVisited => self.to_visit += 1,
            LeadStatus::FollowUp => self.follow_up += 1,
            LeadStatus::DemoBooked => self.demos += 1,
            LeadStatus::Dq => self.dq += 1,
        }
        self.total += 1;
    }

    fn absorb(&mut self, other: &RepStats) {
        self.to_visit += other.to_visit;
        self.follow_up += other.follow_up;
        self.demos += other.demos;
        self.dq += other.dq;
        self.total += other.total;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardStats {
    /// Ranked leaderboard.
    pub reps: Vec<RepStats>,
    /// Sum over every rep; `rep_id`/`rep_name` are empty.
    pub totals: RepStats,
}

pub struct ReportService<'s, S: Store> {
    store: &'s S,
}

impl<'s, S: Store> ReportService<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    pub fn dashboard(&self, show_id: &str) -> ServiceResult<DashboardStats> {
        self.require_show(show_id)?;
        let booths = self
            .store
            .list_booths(&BoothQuery::show(show_id).with_list(ListType::HitList))?;

        let mut reps: Vec<RepStats> = self
            .store
            .list_reps()?
            .into_iter()
            .map(|rep| {
                let mut stats = RepStats::default();
                for booth in &booths {
                    if booth.rep_id.as_deref() == Some(rep.id.as_str()) {
                        stats.count(booth.status);
                    }
                }
                RepStats {
                    rep_id: rep.id,
                    rep_name: rep.name,
                    ..stats
                }
            })
            .collect();
        reps.sort_by(|a, b| {
            b.demos
                .cmp(&a.demos)
                .then_with(|| b.follow_up.cmp(&a.follow_up))
        });

        let mut totals = RepStats::default();
        for stats in &reps {
            totals.absorb(stats);
        }
        Ok(DashboardStats { reps, totals })
    }

    /// Exports booths of a show, narrowed by rep and/or list type.
    ///
    /// With a rep and no list type, all of that rep's booths are exported;
    /// with neither, the whole show. A hit list needs a rep.
    pub fn export_csv(
        &self,
        show_id: &str,
        rep_id: Option<&str>,
        list_type: Option<ListType>,
    ) -> ServiceResult<String> {
        self.require_show(show_id)?;
        if rep_id.is_none() && list_type.is_some_and(ListType::is_personal) {
            return Err(ServiceError::InvalidInput(
                "exporting a hit list needs a rep".to_string(),
            ));
        }

        let mut query = BoothQuery::show(show_id).with_rep(rep_id.map(str::to_string));
        if let Some(list_type) = list_type {
            query = query.with_list(list_type);
        }
        let booths = self.store.list_booths(&query)?;
        write_export(&booths)
    }

    fn require_show(&self, show_id: &str) -> ServiceResult<()> {
        if self.store.get_show(show_id)?.is_none() {
            return Err(not_found("show", show_id));
        }
        Ok(())
    }
}

fn write_export(booths: &[Booth]) -> ServiceResult<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS).map_err(export_error)?;
    for booth in booths {
        writer
            .write_record(export_row(booth))
            .map_err(export_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ServiceError::Export(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ServiceError::Export(err.to_string()))
}

fn export_row(booth: &Booth) -> [String; 14] {
    let sales = if booth.estimated_monthly_sales == 0.0 {
        String::new()
    } else {
        booth.estimated_monthly_sales.to_string()
    };
    [
        booth.company_name.clone(),
        booth.booth_number.clone(),
        booth.domain.clone(),
        sales,
        booth.platform.clone(),
        booth.protection.clone(),
        booth.returns.clone(),
        booth.status.label().to_string(),
        booth.contact_name.clone(),
        booth.orders_per_month.clone(),
        booth.aov.clone(),
        booth.notes.clone(),
        booth.rep_id.clone().unwrap_or_default(),
        booth.list_type.label().to_string(),
    ]
}

fn export_error(err: csv::Error) -> ServiceError {
    ServiceError::Export(err.to_string())
}
