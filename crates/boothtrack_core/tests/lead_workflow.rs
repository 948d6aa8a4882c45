use boothtrack_core::db::open_db_in_memory;
use boothtrack_core::repo::BoothRepository;
use boothtrack_core::service::LeadService;
use boothtrack_core::{seed_defaults, Booth, KvStore, LeadStatus, ListType, ServiceError, SqliteStore};
use uuid::Uuid;

const SHOW: &str = "expowest2026";

fn stored_booth<S: BoothRepository>(store: &S, name: &str) -> Booth {
    let booth = Booth::new(SHOW, Some("drew".to_string()), ListType::HitList, name);
    store.save_booth(&booth).unwrap();
    booth
}

#[test]
fn status_and_notes_round_trip_through_the_store() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::try_new(&conn).unwrap();
    seed_defaults(&store).unwrap();
    let booth = stored_booth(&store, "Acme");
    let leads = LeadService::new(&store);

    let updated = leads.set_status(booth.id, LeadStatus::Dq).unwrap();
    assert_eq!(updated.status, LeadStatus::Dq);
    assert!(updated.updated_at > 0);

    leads.set_contact_name(booth.id, "  Pat Doe ").unwrap();
    leads.set_notes(booth.id, "Booth 2 floors up\nasks for pricing").unwrap();

    let reloaded = leads.get(booth.id).unwrap();
    assert_eq!(reloaded.contact_name, "Pat Doe");
    assert_eq!(reloaded.notes, "Booth 2 floors up\nasks for pricing");
    assert_eq!(reloaded.status, LeadStatus::Dq);
}

#[test]
fn picker_values_must_come_from_the_catalog() {
    let store = KvStore::in_memory();
    let booth = stored_booth(&store, "Acme");
    let leads = LeadService::new(&store);

    let updated = leads.set_orders_per_month(booth.id, "10,000+").unwrap();
    assert_eq!(updated.orders_per_month, "10,000+");
    let updated = leads.set_aov(booth.id, "n/a").unwrap();
    assert_eq!(updated.aov, "N/A");

    match leads.set_aov(booth.id, "$1M") {
        Err(ServiceError::UnknownOption { field, value }) => {
            assert_eq!(field, "AOV");
            assert_eq!(value, "$1M");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(matches!(
        leads.set_orders_per_month(booth.id, "lots"),
        Err(ServiceError::UnknownOption { field: "orders/mo", .. })
    ));
    assert_eq!(leads.get(booth.id).unwrap().orders_per_month, "10,000+");
}

#[test]
fn business_card_is_stored_as_a_data_url() {
    let store = KvStore::in_memory();
    let booth = stored_booth(&store, "Acme");
    let leads = LeadService::new(&store);

    let updated = leads.attach_card(booth.id, b"png-bytes", "Image/PNG").unwrap();
    assert_eq!(
        updated.business_card_data.as_deref(),
        Some("data:image/png;base64,cG5nLWJ5dGVz")
    );
    assert!(updated.has_card());

    assert!(matches!(
        leads.attach_card(booth.id, b"%PDF", "application/pdf"),
        Err(ServiceError::InvalidCard(_))
    ));
    assert!(matches!(
        leads.attach_card(booth.id, b"", "image/jpeg"),
        Err(ServiceError::InvalidCard(_))
    ));

    let cleared = leads.remove_card(booth.id).unwrap();
    assert!(!cleared.has_card());
}

#[test]
fn follow_up_copy_only_promotes_unvisited_booths() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::try_new(&conn).unwrap();
    seed_defaults(&store).unwrap();
    let booth = stored_booth(&store, "Acme");
    let leads = LeadService::new(&store);
    leads.set_orders_per_month(booth.id, "500 - 1,000").unwrap();
    leads.set_notes(booth.id, "Call after the show").unwrap();

    let text = leads.copy_for_follow_up(booth.id).unwrap();
    assert_eq!(text, "Acme\n500 - 1,000\nN/A\nCall after the show");
    assert_eq!(leads.get(booth.id).unwrap().status, LeadStatus::FollowUp);

    leads.set_status(booth.id, LeadStatus::Dq).unwrap();
    leads.copy_for_follow_up(booth.id).unwrap();
    assert_eq!(leads.get(booth.id).unwrap().status, LeadStatus::Dq);
}

#[test]
fn demo_copy_always_books_the_demo() {
    let store = KvStore::in_memory();
    let booth = stored_booth(&store, "Globex");
    let leads = LeadService::new(&store);
    leads.set_status(booth.id, LeadStatus::FollowUp).unwrap();

    let text = leads.copy_for_demo(booth.id).unwrap();
    assert_eq!(text, "Globex\nN/A\nN/A");
    assert_eq!(leads.get(booth.id).unwrap().status, LeadStatus::DemoBooked);
}

#[test]
fn unknown_booth_is_not_found() {
    let store = KvStore::in_memory();
    let leads = LeadService::new(&store);

    assert!(matches!(
        leads.set_status(Uuid::new_v4(), LeadStatus::FollowUp),
        Err(ServiceError::NotFound { entity: "booth", .. })
    ));
}

#[test]
fn deleted_booth_is_gone() {
    let store = KvStore::in_memory();
    let keep = stored_booth(&store, "Keep");
    let gone = stored_booth(&store, "Gone");
    let leads = LeadService::new(&store);

    leads.delete(gone.id).unwrap();
    assert!(matches!(
        leads.get(gone.id),
        Err(ServiceError::NotFound { entity: "booth", .. })
    ));
    assert_eq!(leads.get(keep.id).unwrap().company_name, "Keep");
    assert!(matches!(
        leads.delete(gone.id),
        Err(ServiceError::NotFound { entity: "booth", .. })
    ));
}
