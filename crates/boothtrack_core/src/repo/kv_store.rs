//! JSON key-value backend.
//!
//! # Responsibility
//! - Persist each collection as one JSON array under a fixed key
//!   (`shows`, `reps`, `booths`, `people`).
//! - Offer the same repository contracts as the SQLite backend.
//!
//! # Invariants
//! - Every successful write rewrites the backing file before returning.
//! - Changes are staged on a copy and become visible only after the file
//!   write succeeds; a failed write leaves memory and disk unchanged.
//! - Each repository call writes the file at most once, cascades included.
//! - A missing key reads as an empty collection.
//! - The file is replaced via write-to-temp + rename, never truncated in place.

use crate::model::booth::{Booth, BoothId, ListType};
use crate::model::ident::normalize_domain;
use crate::model::person::Person;
use crate::model::rep::Rep;
use crate::model::show::Show;
use crate::repo::booth_repo::ensure_list_key;
use crate::repo::person_repo::validate_person;
use crate::repo::{
    now_epoch_ms, BoothQuery, BoothRepository, PersonRepository, RepRepository, RepoError,
    RepoResult, ShowRepository,
};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const SHOWS_KEY: &str = "shows";
pub const REPS_KEY: &str = "reps";
pub const BOOTHS_KEY: &str = "booths";
pub const PEOPLE_KEY: &str = "people";

/// File-backed (or in-memory) key-value store.
///
/// Values are JSON documents stored as strings, so the on-disk file is a
/// flat `{ "key": "<json>" }` object.
#[derive(Debug)]
pub struct KvStore {
    path: Option<PathBuf>,
    entries: RefCell<BTreeMap<String, String>>,
}

impl KvStore {
    /// Opens the store at `path`, starting empty when the file is absent.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            BTreeMap::new()
        };

        info!(
            "event=kv_open module=repo status=ok keys={}",
            entries.len()
        );
        Ok(Self {
            path: Some(path),
            entries: RefCell::new(entries),
        })
    }

    /// Creates a store that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: RefCell::new(BTreeMap::new()),
        }
    }

    /// Raw value stored under `key`.
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> RepoResult<Vec<T>> {
        match self.entries.borrow().get(key) {
            Some(raw) => Ok(serde_json::from_str(raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn write_collection<T: Serialize>(&self, key: &'static str, items: &[T]) -> RepoResult<()> {
        self.commit(vec![encode(key, items)?])
    }

    /// Applies `updates` to a staged copy, persists it, then swaps it in.
    fn commit(&self, updates: Vec<(&'static str, String)>) -> RepoResult<()> {
        let mut staged = self.entries.borrow().clone();
        for (key, raw) in updates {
            staged.insert(key.to_string(), raw);
        }
        self.persist(&staged)?;
        *self.entries.borrow_mut() = staged;
        Ok(())
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> RepoResult<()> {
        let Some(path) = self.path.as_ref() else {
            return Ok(());
        };

        let serialized = serde_json::to_string_pretty(entries)?;
        let tmp_path = path.with_extension("tmp");
        std::fs::write(&tmp_path, serialized)?;
        std::fs::rename(&tmp_path, path)?;
        debug!("event=kv_flush module=repo status=ok");
        Ok(())
    }
}

impl ShowRepository for KvStore {
    fn list_shows(&self) -> RepoResult<Vec<Show>> {
        let mut shows: Vec<Show> = self.read_collection(SHOWS_KEY)?;
        shows.sort_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then_with(|| a.name.to_ascii_lowercase().cmp(&b.name.to_ascii_lowercase()))
        });
        Ok(shows)
    }

    fn get_show(&self, id: &str) -> RepoResult<Option<Show>> {
        let shows: Vec<Show> = self.read_collection(SHOWS_KEY)?;
        Ok(shows.into_iter().find(|show| show.id == id))
    }

    fn save_show(&self, show: &Show) -> RepoResult<()> {
        if show.id.trim().is_empty() || show.name.trim().is_empty() {
            return Err(RepoError::InvalidData(
                "show id and name cannot be empty".to_string(),
            ));
        }

        let mut shows: Vec<Show> = self.read_collection(SHOWS_KEY)?;
        match shows.iter_mut().find(|existing| existing.id == show.id) {
            Some(existing) => *existing = show.clone(),
            None => shows.push(show.clone()),
        }
        self.write_collection(SHOWS_KEY, &shows)
    }

    fn delete_show(&self, id: &str) -> RepoResult<()> {
        let mut shows: Vec<Show> = self.read_collection(SHOWS_KEY)?;
        let before = shows.len();
        shows.retain(|show| show.id != id);
        if shows.len() == before {
            return Err(RepoError::NotFound {
                entity: "show",
                id: id.to_string(),
            });
        }

        let mut booths: Vec<Booth> = self.read_collection(BOOTHS_KEY)?;
        booths.retain(|booth| booth.show_id != id);
        let mut people: Vec<Person> = self.read_collection(PEOPLE_KEY)?;
        people.retain(|person| person.show_id != id);

        self.commit(vec![
            encode(SHOWS_KEY, &shows)?,
            encode(BOOTHS_KEY, &booths)?,
            encode(PEOPLE_KEY, &people)?,
        ])?;
        info!("event=show_delete module=repo status=ok backend=kv");
        Ok(())
    }
}

impl RepRepository for KvStore {
    fn list_reps(&self) -> RepoResult<Vec<Rep>> {
        let mut reps: Vec<Rep> = self.read_collection(REPS_KEY)?;
        reps.sort_by(|a, b| {
            a.name
                .to_ascii_lowercase()
                .cmp(&b.name.to_ascii_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(reps)
    }

    fn get_rep(&self, id: &str) -> RepoResult<Option<Rep>> {
        let reps: Vec<Rep> = self.read_collection(REPS_KEY)?;
        Ok(reps.into_iter().find(|rep| rep.id == id))
    }

    fn save_rep(&self, rep: &Rep) -> RepoResult<()> {
        if rep.id.trim().is_empty() || rep.name.trim().is_empty() {
            return Err(RepoError::InvalidData(
                "rep id and name cannot be empty".to_string(),
            ));
        }

        let mut reps: Vec<Rep> = self.read_collection(REPS_KEY)?;
        match reps.iter_mut().find(|existing| existing.id == rep.id) {
            Some(existing) => *existing = rep.clone(),
            None => reps.push(rep.clone()),
        }
        self.write_collection(REPS_KEY, &reps)
    }

    fn delete_rep(&self, id: &str) -> RepoResult<()> {
        let mut reps: Vec<Rep> = self.read_collection(REPS_KEY)?;
        let before = reps.len();
        reps.retain(|rep| rep.id != id);
        if reps.len() == before {
            return Err(RepoError::NotFound {
                entity: "rep",
                id: id.to_string(),
            });
        }

        let mut booths: Vec<Booth> = self.read_collection(BOOTHS_KEY)?;
        booths.retain(|booth| booth.rep_id.as_deref() != Some(id));

        self.commit(vec![encode(REPS_KEY, &reps)?, encode(BOOTHS_KEY, &booths)?])?;
        info!("event=rep_delete module=repo status=ok backend=kv");
        Ok(())
    }

    fn find_rep_by_crm_owner(&self, crm_owner_id: &str) -> RepoResult<Option<Rep>> {
        let trimmed = crm_owner_id.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let mut reps: Vec<Rep> = self.read_collection(REPS_KEY)?;
        reps.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(reps
            .into_iter()
            .find(|rep| rep.crm_owner_id.as_deref() == Some(trimmed)))
    }
}

impl BoothRepository for KvStore {
    fn list_booths(&self, query: &BoothQuery) -> RepoResult<Vec<Booth>> {
        let booths: Vec<Booth> = self.read_collection(BOOTHS_KEY)?;
        let mut matching: Vec<Booth> = booths
            .into_iter()
            .filter(|booth| query.matches(booth))
            .collect();
        matching.sort_by(|a, b| {
            a.company_name
                .to_ascii_lowercase()
                .cmp(&b.company_name.to_ascii_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(matching)
    }

    fn get_booth(&self, id: BoothId) -> RepoResult<Option<Booth>> {
        let booths: Vec<Booth> = self.read_collection(BOOTHS_KEY)?;
        Ok(booths.into_iter().find(|booth| booth.id == id))
    }

    fn save_booth(&self, booth: &Booth) -> RepoResult<()> {
        self.save_booths(std::slice::from_ref(booth))
    }

    fn save_booths(&self, booths: &[Booth]) -> RepoResult<()> {
        for booth in booths {
            booth.validate()?;
        }

        let mut existing: Vec<Booth> = self.read_collection(BOOTHS_KEY)?;
        upsert_all(&mut existing, booths, now_epoch_ms());
        self.write_collection(BOOTHS_KEY, &existing)
    }

    fn delete_booth(&self, id: BoothId) -> RepoResult<()> {
        let mut booths: Vec<Booth> = self.read_collection(BOOTHS_KEY)?;
        let before = booths.len();
        booths.retain(|booth| booth.id != id);
        if booths.len() == before {
            return Err(RepoError::NotFound {
                entity: "booth",
                id: id.to_string(),
            });
        }
        self.write_collection(BOOTHS_KEY, &booths)
    }

    fn delete_booths_for_list(
        &self,
        show_id: &str,
        rep_id: Option<&str>,
        list_type: ListType,
    ) -> RepoResult<usize> {
        let mut booths: Vec<Booth> = self.read_collection(BOOTHS_KEY)?;
        let removed = remove_list(&mut booths, show_id, rep_id, list_type);
        self.write_collection(BOOTHS_KEY, &booths)?;
        Ok(removed)
    }

    fn replace_list(
        &self,
        show_id: &str,
        rep_id: Option<&str>,
        list_type: ListType,
        booths: &[Booth],
    ) -> RepoResult<usize> {
        for booth in booths {
            booth.validate()?;
            ensure_list_key(booth, show_id, rep_id, list_type)?;
        }

        let mut existing: Vec<Booth> = self.read_collection(BOOTHS_KEY)?;
        let removed = remove_list(&mut existing, show_id, rep_id, list_type);
        upsert_all(&mut existing, booths, now_epoch_ms());
        self.write_collection(BOOTHS_KEY, &existing)?;

        info!(
            "event=list_replace module=repo status=ok backend=kv list_type={} removed={} inserted={}",
            list_type.as_str(),
            removed,
            booths.len()
        );
        Ok(removed)
    }
}

impl PersonRepository for KvStore {
    fn list_people(&self, show_id: &str) -> RepoResult<Vec<Person>> {
        let people: Vec<Person> = self.read_collection(PEOPLE_KEY)?;
        let mut matching: Vec<Person> = people
            .into_iter()
            .filter(|person| person.show_id == show_id)
            .collect();
        sort_people(&mut matching);
        Ok(matching)
    }

    fn people_for_domain(&self, show_id: &str, domain: &str) -> RepoResult<Vec<Person>> {
        let normalized = normalize_domain(domain);
        if normalized.is_empty() {
            return Ok(Vec::new());
        }

        let mut matching: Vec<Person> = self
            .list_people(show_id)?
            .into_iter()
            .filter(|person| person.company_domain == normalized)
            .collect();
        sort_people(&mut matching);
        Ok(matching)
    }

    fn replace_people(&self, show_id: &str, people: &[Person]) -> RepoResult<usize> {
        for person in people {
            validate_person(person, show_id)?;
        }

        let mut existing: Vec<Person> = self.read_collection(PEOPLE_KEY)?;
        let before = existing.len();
        existing.retain(|person| person.show_id != show_id);
        let removed = before - existing.len();

        let now = now_epoch_ms();
        existing.extend(people.iter().map(|person| Person {
            company_domain: normalize_domain(&person.company_domain),
            updated_at: now,
            ..person.clone()
        }));
        self.write_collection(PEOPLE_KEY, &existing)?;

        info!(
            "event=people_replace module=repo status=ok backend=kv removed={removed} inserted={}",
            people.len()
        );
        Ok(removed)
    }
}

fn encode<T: Serialize>(key: &'static str, items: &[T]) -> RepoResult<(&'static str, String)> {
    Ok((key, serde_json::to_string(items)?))
}

/// Replaces known ids in place and appends new ones, keeping prior order.
fn upsert_all(existing: &mut Vec<Booth>, updates: &[Booth], now: i64) {
    for update in updates {
        let stamped = Booth {
            updated_at: now,
            ..update.clone()
        };
        match existing.iter_mut().find(|booth| booth.id == update.id) {
            Some(slot) => *slot = stamped,
            None => existing.push(stamped),
        }
    }
}

fn remove_list(
    booths: &mut Vec<Booth>,
    show_id: &str,
    rep_id: Option<&str>,
    list_type: ListType,
) -> usize {
    let before = booths.len();
    booths.retain(|booth| {
        !(booth.show_id == show_id
            && booth.rep_id.as_deref() == rep_id
            && booth.list_type == list_type)
    });
    before - booths.len()
}

fn sort_people(people: &mut [Person]) {
    people.sort_by(|a, b| {
        a.full_name
            .to_ascii_lowercase()
            .cmp(&b.full_name.to_ascii_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
}
