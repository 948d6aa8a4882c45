//! Per-booth lead workflow: visit outcome, notes, business cards, claims.
//!
//! # Invariants
//! - Every mutation reads the current record, changes one concern, and
//!   saves the whole record back (last write wins).
//! - A claim creates exactly one new hit-list record per call.

use crate::model::booth::{Booth, BoothId, LeadStatus, ListType};
use crate::model::catalog::{AOV_OPTIONS, NOT_APPLICABLE, ORDER_OPTIONS};
use crate::model::rep::Rep;
use crate::repo::{now_epoch_ms, Store};
use crate::service::{not_found, ServiceError, ServiceResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::info;
use uuid::Uuid;

pub struct LeadService<'s, S: Store> {
    store: &'s S,
}

impl<'s, S: Store> LeadService<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    pub fn get(&self, id: BoothId) -> ServiceResult<Booth> {
        self.store.get_booth(id)?.ok_or_else(|| not_found("booth", id))
    }

    pub fn set_status(&self, id: BoothId, status: LeadStatus) -> ServiceResult<Booth> {
        self.update(id, |booth| {
            booth.status = status;
            Ok(())
        })
    }

    pub fn set_contact_name(&self, id: BoothId, contact_name: &str) -> ServiceResult<Booth> {
        let contact_name = contact_name.trim().to_string();
        self.update(id, |booth| {
            booth.contact_name = contact_name;
            Ok(())
        })
    }

    pub fn set_notes(&self, id: BoothId, notes: &str) -> ServiceResult<Booth> {
        let notes = notes.to_string();
        self.update(id, |booth| {
            booth.notes = notes;
            Ok(())
        })
    }

    pub fn set_orders_per_month(&self, id: BoothId, value: &str) -> ServiceResult<Booth> {
        let value = catalog_value("orders/mo", ORDER_OPTIONS, value)?;
        self.update(id, |booth| {
            booth.orders_per_month = value;
            Ok(())
        })
    }

    pub fn set_aov(&self, id: BoothId, value: &str) -> ServiceResult<Booth> {
        let value = catalog_value("AOV", AOV_OPTIONS, value)?;
        self.update(id, |booth| {
            booth.aov = value;
            Ok(())
        })
    }

    /// Stores an image as a `data:` URL on the booth.
    pub fn attach_card(&self, id: BoothId, image: &[u8], mime: &str) -> ServiceResult<Booth> {
        let mime = mime.trim().to_ascii_lowercase();
        if !mime.starts_with("image/") {
            return Err(ServiceError::InvalidCard(format!(
                "expected an image, got `{mime}`"
            )));
        }
        if image.is_empty() {
            return Err(ServiceError::InvalidCard("image is empty".to_string()));
        }

        let data_url = format!("data:{mime};base64,{}", STANDARD.encode(image));
        let booth = self.update(id, |booth| {
            booth.business_card_data = Some(data_url);
            Ok(())
        })?;
        info!(
            "event=card_attach module=service status=ok bytes={}",
            image.len()
        );
        Ok(booth)
    }

    pub fn remove_card(&self, id: BoothId) -> ServiceResult<Booth> {
        self.update(id, |booth| {
            booth.business_card_data = None;
            Ok(())
        })
    }

    /// Returns the follow-up hand-off text and marks an unvisited booth
    /// as `follow_up`. Other statuses are kept.
    pub fn copy_for_follow_up(&self, id: BoothId) -> ServiceResult<String> {
        let booth = self.get(id)?;
        let text = handoff_text(&booth);
        if booth.status == LeadStatus::NotVisited {
            self.set_status(id, LeadStatus::FollowUp)?;
        }
        Ok(text)
    }

    /// Returns the demo hand-off text and marks the booth `demo_booked`.
    pub fn copy_for_demo(&self, id: BoothId) -> ServiceResult<String> {
        let booth = self.get(id)?;
        let text = handoff_text(&booth);
        self.set_status(id, LeadStatus::DemoBooked)?;
        Ok(text)
    }

    /// Copies a shared-list booth into `rep_id`'s hit list.
    ///
    /// The copy gets a fresh id, status `not_visited`, a back-reference to
    /// the source, and the rep's CRM owner id when one is configured. The
    /// source is stamped with `claimed_by`/`claimed_at`.
    pub fn claim(&self, id: BoothId, rep_id: &str) -> ServiceResult<Booth> {
        let mut source = self.get(id)?;
        if source.list_type.is_personal() {
            return Err(ServiceError::NotClaimable(id));
        }
        let rep = self
            .store
            .get_rep(rep_id)?
            .ok_or_else(|| not_found("rep", rep_id))?;

        let now = now_epoch_ms();
        let mut copy = source.clone();
        copy.id = Uuid::new_v4();
        copy.rep_id = Some(rep.id.clone());
        copy.list_type = ListType::HitList;
        copy.status = LeadStatus::NotVisited;
        copy.source_booth_id = Some(source.id);
        copy.claimed_by = None;
        copy.claimed_at = None;
        if rep.crm_owner_id.is_some() {
            copy.owner_id = rep.crm_owner_id.clone();
        }

        source.claimed_by = Some(rep.id.clone());
        source.claimed_at = Some(now);

        self.store.save_booths(&[copy.clone(), source])?;
        info!(
            "event=lead_claim module=service status=ok source={id} copy={} rep={}",
            copy.id, rep.id
        );
        self.get(copy.id)
    }

    /// Removes one booth; a claimed copy's source keeps its `claimed_by` stamp.
    pub fn delete(&self, id: BoothId) -> ServiceResult<()> {
        self.store.delete_booth(id)?;
        info!("event=booth_delete module=service status=ok booth={id}");
        Ok(())
    }

    /// Resolves the booth's imported CRM owner id to a known rep.
    pub fn owner_rep(&self, booth: &Booth) -> ServiceResult<Option<Rep>> {
        match booth.owner_id.as_deref() {
            Some(owner_id) => Ok(self.store.find_rep_by_crm_owner(owner_id)?),
            None => Ok(None),
        }
    }

    fn update<F>(&self, id: BoothId, change: F) -> ServiceResult<Booth>
    where
        F: FnOnce(&mut Booth) -> ServiceResult<()>,
    {
        let mut booth = self.get(id)?;
        change(&mut booth)?;
        self.store.save_booth(&booth)?;
        self.get(id)
    }
}

/// Company, orders/mo, AOV and notes, one per line; empty parts dropped.
pub fn handoff_text(booth: &Booth) -> String {
    let orders = non_empty_or_na(&booth.orders_per_month);
    let aov = non_empty_or_na(&booth.aov);
    [booth.company_name.as_str(), orders, aov, booth.notes.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn non_empty_or_na(value: &str) -> &str {
    if value.is_empty() {
        NOT_APPLICABLE
    } else {
        value
    }
}

fn catalog_value(
    field: &'static str,
    options: &[&str],
    value: &str,
) -> ServiceResult<String> {
    let trimmed = value.trim();
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(trimmed))
        .map(|option| option.to_string())
        .ok_or_else(|| ServiceError::UnknownOption {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::handoff_text;
    use crate::model::booth::{Booth, ListType};

    #[test]
    fn handoff_text_skips_empty_notes() {
        let mut booth = Booth::new("expo", None, ListType::Master, "Acme");
        assert_eq!(handoff_text(&booth), "Acme\nN/A\nN/A");

        booth.orders_per_month = "10,000+".to_string();
        booth.notes = "Wants a demo Tuesday".to_string();
        assert_eq!(handoff_text(&booth), "Acme\n10,000+\nN/A\nWants a demo Tuesday");
    }
}
