use boothtrack_core::db::open_db_in_memory;
use boothtrack_core::repo::{BoothQuery, BoothRepository, RepRepository};
use boothtrack_core::service::LeadService;
use boothtrack_core::{
    seed_defaults, Booth, KvStore, LeadStatus, ListType, Rep, ServiceError, SqliteStore, Store,
};

const SHOW: &str = "expowest2026";

fn customer(owner: Option<&str>) -> Booth {
    let mut booth = Booth::new(SHOW, None, ListType::Customers, "Wayne Enterprises");
    booth.domain = "wayne.com".to_string();
    booth.booth_number = "1001".to_string();
    booth.estimated_monthly_sales = 400_000.0;
    booth.status = LeadStatus::FollowUp;
    booth.owner_id = owner.map(str::to_string);
    booth
}

fn hit_list<S: Store>(store: &S, rep: &str) -> Vec<Booth> {
    store
        .list_booths(
            &BoothQuery::show(SHOW)
                .with_rep(Some(rep.to_string()))
                .with_list(ListType::HitList),
        )
        .unwrap()
}

fn claim_copies_into_the_rep_hit_list<S: Store>(store: &S) {
    seed_defaults(store).unwrap();
    let source = customer(Some("hs-1"));
    store
        .replace_list(SHOW, None, ListType::Customers, std::slice::from_ref(&source))
        .unwrap();
    let leads = LeadService::new(store);

    let copy = leads.claim(source.id, "drew").unwrap();
    assert_ne!(copy.id, source.id);
    assert_eq!(copy.rep_id.as_deref(), Some("drew"));
    assert_eq!(copy.list_type, ListType::HitList);
    assert_eq!(copy.status, LeadStatus::NotVisited);
    assert_eq!(copy.source_booth_id, Some(source.id));
    assert_eq!(copy.company_name, "Wayne Enterprises");
    assert_eq!(copy.booth_number, "1001");
    assert_eq!(copy.estimated_monthly_sales, 400_000.0);
    assert_eq!(copy.owner_id.as_deref(), Some("hs-1"));
    assert!(copy.claimed_by.is_none());

    let stamped = leads.get(source.id).unwrap();
    assert_eq!(stamped.claimed_by.as_deref(), Some("drew"));
    assert!(stamped.claimed_at.is_some());
    assert_eq!(stamped.list_type, ListType::Customers);
    assert_eq!(stamped.status, LeadStatus::FollowUp);

    assert_eq!(hit_list(store, "drew").len(), 1);
}

fn repeated_claims_make_independent_copies<S: Store>(store: &S) {
    seed_defaults(store).unwrap();
    let source = customer(None);
    store
        .replace_list(SHOW, None, ListType::Customers, std::slice::from_ref(&source))
        .unwrap();
    let leads = LeadService::new(store);

    let first = leads.claim(source.id, "drew").unwrap();
    let second = leads.claim(source.id, "drew").unwrap();
    leads.claim(source.id, "jason").unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(hit_list(store, "drew").len(), 2);
    assert_eq!(hit_list(store, "jason").len(), 1);
    assert_eq!(
        leads.get(source.id).unwrap().claimed_by.as_deref(),
        Some("jason")
    );
}

fn claim_uses_the_rep_crm_owner_id<S: Store>(store: &S) {
    seed_defaults(store).unwrap();
    let mut jason = store.get_rep("jason").unwrap().unwrap();
    jason.crm_owner_id = Some("hs-jason".to_string());
    store.save_rep(&jason).unwrap();

    let source = customer(Some("hs-other"));
    store
        .replace_list(SHOW, None, ListType::Customers, std::slice::from_ref(&source))
        .unwrap();
    let leads = LeadService::new(store);

    let copy = leads.claim(source.id, "jason").unwrap();
    assert_eq!(copy.owner_id.as_deref(), Some("hs-jason"));
    let owner: Option<Rep> = leads.owner_rep(&copy).unwrap();
    assert_eq!(owner.map(|rep| rep.id), Some("jason".to_string()));
}

fn hit_list_records_cannot_be_claimed<S: Store>(store: &S) {
    seed_defaults(store).unwrap();
    let personal = Booth::new(SHOW, Some("drew".to_string()), ListType::HitList, "Acme");
    store.save_booth(&personal).unwrap();
    let source = customer(None);
    store.save_booth(&source).unwrap();
    let leads = LeadService::new(store);

    assert!(matches!(
        leads.claim(personal.id, "jason"),
        Err(ServiceError::NotClaimable(id)) if id == personal.id
    ));
    assert!(matches!(
        leads.claim(source.id, "nobody"),
        Err(ServiceError::NotFound { entity: "rep", .. })
    ));
    assert!(hit_list(store, "jason").is_empty());
    assert!(leads.get(source.id).unwrap().claimed_by.is_none());
}

#[test]
fn sqlite_claim_copies_into_the_rep_hit_list() {
    let conn = open_db_in_memory().unwrap();
    claim_copies_into_the_rep_hit_list(&SqliteStore::try_new(&conn).unwrap());
}

#[test]
fn kv_claim_copies_into_the_rep_hit_list() {
    claim_copies_into_the_rep_hit_list(&KvStore::in_memory());
}

#[test]
fn sqlite_repeated_claims_make_independent_copies() {
    let conn = open_db_in_memory().unwrap();
    repeated_claims_make_independent_copies(&SqliteStore::try_new(&conn).unwrap());
}

#[test]
fn kv_repeated_claims_make_independent_copies() {
    repeated_claims_make_independent_copies(&KvStore::in_memory());
}

#[test]
fn sqlite_claim_uses_the_rep_crm_owner_id() {
    let conn = open_db_in_memory().unwrap();
    claim_uses_the_rep_crm_owner_id(&SqliteStore::try_new(&conn).unwrap());
}

#[test]
fn kv_hit_list_records_cannot_be_claimed() {
    hit_list_records_cannot_be_claimed(&KvStore::in_memory());
}

#[test]
fn sqlite_hit_list_records_cannot_be_claimed() {
    let conn = open_db_in_memory().unwrap();
    hit_list_records_cannot_be_claimed(&SqliteStore::try_new(&conn).unwrap());
}
