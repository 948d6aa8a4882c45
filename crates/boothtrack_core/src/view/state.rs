//! Explicit navigation and list state passed between renders.
//!
//! # Invariants
//! - Selecting a rep always lands on that rep's hit list.
//! - Shared-list tabs clear the rep selection.
//! - `booths` always holds the `(show, rep, list)` slice being viewed.

use crate::model::booth::{validate_rep_for_list, Booth, BoothId, ListType};
use crate::model::rep::Rep;
use crate::model::show::Show;
use crate::repo::{BoothQuery, RepoResult, Store};
use crate::service::{PendingImport, ServiceResult};
use crate::view::filter::{filter_and_sort, Filters, SortBy};
use crate::view::format::list_title;

/// Screen currently shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Shows,
    RepSelect,
    List,
    Detail,
    Dashboard,
}

/// Tabs on a show's landing screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Reps,
    Master,
    Customers,
    Opps,
    Dashboard,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub shows: Vec<Show>,
    pub reps: Vec<Rep>,
    pub booths: Vec<Booth>,
    pub screen: Screen,
    pub current_show_id: Option<String>,
    pub current_rep_id: Option<String>,
    pub current_list_type: ListType,
    pub current_booth_id: Option<BoothId>,
    pub sort_by: SortBy,
    pub search: String,
    pub filters: Filters,
    pub pending_import: Option<PendingImport>,
}

impl AppState {
    /// Loads shows and reps; everything else starts unselected.
    pub fn load<S: Store>(store: &S) -> RepoResult<Self> {
        Ok(Self {
            shows: store.list_shows()?,
            reps: store.list_reps()?,
            ..Self::default()
        })
    }

    pub fn current_show(&self) -> Option<&Show> {
        let id = self.current_show_id.as_deref()?;
        self.shows.iter().find(|show| show.id == id)
    }

    pub fn current_rep(&self) -> Option<&Rep> {
        let id = self.current_rep_id.as_deref()?;
        self.reps.iter().find(|rep| rep.id == id)
    }

    pub fn current_booth(&self) -> Option<&Booth> {
        let id = self.current_booth_id?;
        self.booths.iter().find(|booth| booth.id == id)
    }

    pub fn select_show(&mut self, show_id: &str) {
        self.current_show_id = Some(show_id.to_string());
        self.current_rep_id = None;
        self.current_booth_id = None;
        self.booths.clear();
        self.screen = Screen::RepSelect;
    }

    pub fn select_rep<S: Store>(&mut self, store: &S, rep_id: &str) -> RepoResult<()> {
        self.current_rep_id = Some(rep_id.to_string());
        self.current_list_type = ListType::HitList;
        self.reload_booths(store)?;
        self.screen = Screen::List;
        Ok(())
    }

    pub fn select_list_type<S: Store>(&mut self, store: &S, list_type: ListType) -> RepoResult<()> {
        self.current_list_type = list_type;
        if !list_type.is_personal() {
            self.current_rep_id = None;
        }
        self.reload_booths(store)?;
        self.screen = Screen::List;
        Ok(())
    }

    /// Opens a list by rep and/or list type. A rep alone opens their hit
    /// list, nothing at all opens Master. A hit list needs a rep and a shared
    /// list rejects one.
    pub fn open_list<S: Store>(
        &mut self,
        store: &S,
        rep_id: Option<&str>,
        list_type: Option<ListType>,
    ) -> ServiceResult<()> {
        let list_type = list_type.unwrap_or(match rep_id {
            Some(_) => ListType::HitList,
            None => ListType::Master,
        });
        validate_rep_for_list(list_type, rep_id)?;
        match rep_id {
            Some(rep_id) => self.select_rep(store, rep_id)?,
            None => self.select_list_type(store, list_type)?,
        }
        Ok(())
    }

    pub fn switch_tab<S: Store>(&mut self, store: &S, tab: Tab) -> RepoResult<()> {
        match tab {
            Tab::Reps => {
                self.current_rep_id = None;
                self.screen = Screen::RepSelect;
                Ok(())
            }
            Tab::Dashboard => {
                self.screen = Screen::Dashboard;
                Ok(())
            }
            Tab::Master => self.select_list_type(store, ListType::Master),
            Tab::Customers => self.select_list_type(store, ListType::Customers),
            Tab::Opps => self.select_list_type(store, ListType::CurrentOpps),
        }
    }

    /// Re-reads the viewed list slice from storage.
    pub fn reload_booths<S: Store>(&mut self, store: &S) -> RepoResult<()> {
        self.booths = match self.current_show_id.as_deref() {
            Some(show_id) => store.list_booths(
                &BoothQuery::show(show_id)
                    .with_rep(self.current_rep_id.clone())
                    .with_list(self.current_list_type),
            )?,
            None => Vec::new(),
        };
        Ok(())
    }

    /// Opens the detail screen; returns `false` when the booth is not in
    /// the current list.
    pub fn open_booth(&mut self, id: BoothId) -> bool {
        if self.booths.iter().any(|booth| booth.id == id) {
            self.current_booth_id = Some(id);
            self.screen = Screen::Detail;
            true
        } else {
            false
        }
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    pub fn clear_filters(&mut self) {
        self.filters = Filters::default();
    }

    pub fn visible_booths(&self) -> Vec<&Booth> {
        filter_and_sort(&self.booths, &self.search, &self.filters, self.sort_by)
    }

    /// Title of the list screen; an unknown rep id renders as `Rep`.
    pub fn list_title(&self) -> String {
        let rep_name = self
            .current_rep_id
            .as_ref()
            .map(|_| self.current_rep().map_or("Rep", |rep| rep.name.as_str()));
        list_title(rep_name, self.current_list_type)
    }
}
