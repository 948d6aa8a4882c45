//! Show and rep administration.

use crate::model::booth::{validate_rep_for_list, ListType};
use crate::model::ident::slugify;
use crate::model::rep::Rep;
use crate::model::show::Show;
use crate::repo::{now_epoch_ms, Store};
use crate::service::{not_found, ServiceError, ServiceResult};
use log::info;

pub struct AdminService<'s, S: Store> {
    store: &'s S,
}

impl<'s, S: Store> AdminService<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    pub fn list_shows(&self) -> ServiceResult<Vec<Show>> {
        Ok(self.store.list_shows()?)
    }

    pub fn list_reps(&self) -> ServiceResult<Vec<Rep>> {
        Ok(self.store.list_reps()?)
    }

    /// Creates a show whose id is the name slug suffixed with the current
    /// epoch milliseconds, so repeated names never collide.
    pub fn add_show(&self, name: &str, location: &str) -> ServiceResult<Show> {
        let name = required_name("show", name)?;
        let id = format!("{}_{}", slugify(name), now_epoch_ms());
        let show = Show::new(id, name, location.trim());
        self.store.save_show(&show)?;
        info!("event=show_add module=service status=ok show={}", show.id);
        Ok(show)
    }

    /// Creates a rep with a slug id; an existing slug is rejected.
    pub fn add_rep(&self, name: &str, crm_owner_id: Option<&str>) -> ServiceResult<Rep> {
        let name = required_name("rep", name)?;
        let id = slugify(name);
        if self.store.get_rep(&id)?.is_some() {
            return Err(ServiceError::RepAlreadyExists(id));
        }

        let mut rep = Rep::new(id, name);
        rep.crm_owner_id = normalize_owner_id(crm_owner_id);
        self.store.save_rep(&rep)?;
        info!("event=rep_add module=service status=ok rep={}", rep.id);
        Ok(rep)
    }

    /// Sets or clears (`None`/blank) the rep's CRM owner id.
    pub fn set_rep_owner_id(&self, rep_id: &str, crm_owner_id: Option<&str>) -> ServiceResult<Rep> {
        let mut rep = self
            .store
            .get_rep(rep_id)?
            .ok_or_else(|| not_found("rep", rep_id))?;
        rep.crm_owner_id = normalize_owner_id(crm_owner_id);
        self.store.save_rep(&rep)?;
        Ok(rep)
    }

    pub fn delete_show(&self, show_id: &str) -> ServiceResult<()> {
        self.store.delete_show(show_id)?;
        Ok(())
    }

    pub fn delete_rep(&self, rep_id: &str) -> ServiceResult<()> {
        self.store.delete_rep(rep_id)?;
        Ok(())
    }

    /// Empties one `(show, rep, list)` list; returns how many booths went.
    pub fn clear_list(
        &self,
        show_id: &str,
        rep_id: Option<&str>,
        list_type: ListType,
    ) -> ServiceResult<usize> {
        validate_rep_for_list(list_type, rep_id)?;
        if self.store.get_show(show_id)?.is_none() {
            return Err(not_found("show", show_id));
        }
        let removed = self
            .store
            .delete_booths_for_list(show_id, rep_id, list_type)?;
        info!(
            "event=list_clear module=service status=ok show={show_id} list_type={} removed={removed}",
            list_type.as_str()
        );
        Ok(removed)
    }
}

fn required_name<'a>(entity: &str, name: &'a str) -> ServiceResult<&'a str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidInput(format!(
            "{entity} name cannot be empty"
        )));
    }
    Ok(trimmed)
}

fn normalize_owner_id(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
