use boothtrack_core::db::open_db_in_memory;
use boothtrack_core::repo::{BoothRepository, RepRepository};
use boothtrack_core::service::AdminService;
use boothtrack_core::view::{
    booth_detail_view, booth_list_view, filter_options_view, EmptyHint, Screen, SortBy, Tab,
};
use boothtrack_core::{
    seed_defaults, AppState, Booth, BoothValidationError, LeadService, LeadStatus, ListType,
    ServiceError, SqliteStore,
};

const SHOW: &str = "expowest2026";

fn booth(rep: Option<&str>, list_type: ListType, name: &str, number: &str, sales: f64) -> Booth {
    let mut booth = Booth::new(SHOW, rep.map(str::to_string), list_type, name);
    booth.booth_number = number.to_string();
    booth.estimated_monthly_sales = sales;
    booth
}

fn seeded(store: &SqliteStore<'_>) {
    seed_defaults(store).unwrap();
    let mut demo = booth(Some("drew"), ListType::HitList, "Globex", "12", 80_000.0);
    demo.status = LeadStatus::DemoBooked;
    demo.platform = "Shopify".to_string();
    store
        .save_booths(&[
            booth(Some("drew"), ListType::HitList, "Acme", "101", 20_000.0),
            demo,
            booth(Some("drew"), ListType::HitList, "Initech", "", 500_000.0),
            booth(Some("jason"), ListType::HitList, "Hooli", "5", 0.0),
            booth(None, ListType::Master, "Umbrella", "900", 1_000.0),
        ])
        .unwrap();
}

#[test]
fn selecting_a_rep_lands_on_their_hit_list() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::try_new(&conn).unwrap();
    seeded(&store);

    let mut state = AppState::load(&store).unwrap();
    assert_eq!(state.screen, Screen::Shows);
    state.select_show(SHOW);
    assert_eq!(state.screen, Screen::RepSelect);
    assert_eq!(state.current_show().map(|s| s.name.as_str()), Some("Expo West"));

    state.current_list_type = ListType::Master;
    state.select_rep(&store, "drew").unwrap();
    assert_eq!(state.screen, Screen::List);
    assert_eq!(state.current_list_type, ListType::HitList);
    assert_eq!(state.booths.len(), 3);
    assert_eq!(state.list_title(), "Drew - Hit List");

    let numbers: Vec<&str> = state
        .visible_booths()
        .iter()
        .map(|b| b.booth_number.as_str())
        .collect();
    assert_eq!(numbers, vec!["12", "101", ""]);

    state.sort_by = SortBy::Value;
    let names: Vec<&str> = state
        .visible_booths()
        .iter()
        .map(|b| b.company_name.as_str())
        .collect();
    assert_eq!(names, vec!["Initech", "Globex", "Acme"]);
}

#[test]
fn shared_tabs_clear_the_rep_selection() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::try_new(&conn).unwrap();
    seeded(&store);

    let mut state = AppState::load(&store).unwrap();
    state.select_show(SHOW);
    state.select_rep(&store, "drew").unwrap();

    state.switch_tab(&store, Tab::Master).unwrap();
    assert_eq!(state.current_rep_id, None);
    assert_eq!(state.current_list_type, ListType::Master);
    assert_eq!(state.list_title(), "Master");
    assert_eq!(state.booths.len(), 1);

    state.switch_tab(&store, Tab::Customers).unwrap();
    assert!(state.booths.is_empty());
    assert_eq!(booth_list_view(&state).empty_hint, Some(EmptyHint::ImportData));

    state.switch_tab(&store, Tab::Dashboard).unwrap();
    assert_eq!(state.screen, Screen::Dashboard);
    state.switch_tab(&store, Tab::Reps).unwrap();
    assert_eq!(state.screen, Screen::RepSelect);
}

#[test]
fn list_view_counts_ignore_filters_and_suggest_clearing_them() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::try_new(&conn).unwrap();
    seeded(&store);

    let mut state = AppState::load(&store).unwrap();
    state.select_show(SHOW);
    state.select_rep(&store, "drew").unwrap();

    state.filters.min_revenue = 50_000.0;
    state.filters.platform = Some("Shopify".to_string());
    let view = booth_list_view(&state);
    assert_eq!(view.showing, 1);
    assert_eq!(view.rows[0].company_name, "Globex");
    assert_eq!(view.rows[0].sales, "$80K");
    assert_eq!(view.rows[0].protection, "No protection");
    assert_eq!(view.to_visit, 2);
    assert_eq!(view.demos, 1);
    assert_eq!(view.filter_chips, vec!["Shopify", "≥ $50K"]);

    state.set_search("acme");
    let view = booth_list_view(&state);
    assert!(view.rows.is_empty());
    assert_eq!(view.empty_hint, Some(EmptyHint::ClearFilters));

    state.clear_filters();
    let view = booth_list_view(&state);
    assert_eq!(view.showing, 1);
    assert_eq!(view.rows[0].company_name, "Acme");

    state.clear_search();
    assert_eq!(booth_list_view(&state).showing, 3);
}

#[test]
fn opening_a_booth_requires_it_in_the_current_list() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::try_new(&conn).unwrap();
    seeded(&store);

    let mut state = AppState::load(&store).unwrap();
    state.select_show(SHOW);
    state.select_rep(&store, "jason").unwrap();
    let hooli = state.booths[0].id;
    let umbrella = store
        .list_booths(&boothtrack_core::repo::BoothQuery::show(SHOW).with_list(ListType::Master))
        .unwrap()[0]
        .id;

    assert!(!state.open_booth(umbrella));
    assert!(state.open_booth(hooli));
    assert_eq!(state.screen, Screen::Detail);
    assert_eq!(state.current_booth().map(|b| b.company_name.as_str()), Some("Hooli"));
}

#[test]
fn admin_adds_shows_and_reps_with_slug_ids() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::try_new(&conn).unwrap();
    seed_defaults(&store).unwrap();
    let admin = AdminService::new(&store);

    let show = admin.add_show("  Natural Products Expo ", "Anaheim").unwrap();
    assert!(show.id.starts_with("natural_products_expo_"));
    assert_eq!(show.name, "Natural Products Expo");

    let rep = admin.add_rep("Mary Ann", Some(" 7731 ")).unwrap();
    assert_eq!(rep.id, "mary_ann");
    assert_eq!(rep.crm_owner_id.as_deref(), Some("7731"));
    assert!(matches!(
        admin.add_rep("mary   ann", None),
        Err(ServiceError::RepAlreadyExists(id)) if id == "mary_ann"
    ));
    assert!(matches!(
        admin.add_rep("   ", None),
        Err(ServiceError::InvalidInput(_))
    ));

    let cleared = admin.set_rep_owner_id("mary_ann", Some("  ")).unwrap();
    assert_eq!(cleared.crm_owner_id, None);
    assert!(store.get_rep("mary_ann").unwrap().unwrap().crm_owner_id.is_none());

    admin.delete_rep("mary_ann").unwrap();
    assert!(matches!(
        admin.delete_rep("mary_ann"),
        Err(ServiceError::NotFound { entity: "rep", .. })
    ));
    assert_eq!(admin.list_reps().unwrap().len(), 3);
}

#[test]
fn opening_a_list_needs_a_rep_only_for_hit_lists() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::try_new(&conn).unwrap();
    seeded(&store);

    let mut state = AppState::load(&store).unwrap();
    state.select_show(SHOW);
    assert!(matches!(
        state.open_list(&store, None, Some(ListType::HitList)),
        Err(ServiceError::Validation(BoothValidationError::MissingRep(ListType::HitList)))
    ));
    assert!(state.booths.is_empty());
    assert!(matches!(
        state.open_list(&store, Some("drew"), Some(ListType::Customers)),
        Err(ServiceError::Validation(BoothValidationError::UnexpectedRep(ListType::Customers)))
    ));

    state.open_list(&store, None, None).unwrap();
    assert_eq!(state.list_title(), "Master");
    assert_eq!(state.booths.len(), 1);

    state.open_list(&store, Some("drew"), None).unwrap();
    assert_eq!(state.list_title(), "Drew - Hit List");
    assert_eq!(state.booths.len(), 3);
}

#[test]
fn filter_options_list_every_catalog_choice() {
    let options = filter_options_view();
    assert_eq!(options.platforms.first(), Some(&"BigCommerce"));
    assert_eq!(options.platforms.last(), Some(&"[No Platform]"));
    assert!(options.protection.contains(&"Route"));
    assert_eq!(options.returns.last(), Some(&"[No Returns]"));
    let labels: Vec<&str> = options.min_revenue.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["Any", "≥ $50K", "≥ $100K", "≥ $200K", "≥ $300K", "≥ $500K", "≥ $1.0M"]);
    assert_eq!(options.statuses.len(), 4);
}

#[test]
fn detail_view_labels_claim_copies_and_sources() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::try_new(&conn).unwrap();
    seeded(&store);
    let umbrella = store
        .list_booths(&boothtrack_core::repo::BoothQuery::show(SHOW).with_list(ListType::Master))
        .unwrap()
        .remove(0);
    assert_eq!(booth_detail_view(&umbrella, &[], None).claim, None);

    let leads = LeadService::new(&store);
    let copy = leads.claim(umbrella.id, "wyatt").unwrap();
    let source = leads.get(umbrella.id).unwrap();

    assert_eq!(
        booth_detail_view(&copy, &[], None).claim,
        Some(format!("claimed from {}", umbrella.id))
    );
    assert_eq!(
        booth_detail_view(&source, &[], None).claim,
        Some("claimed by wyatt".to_string())
    );
}

#[test]
fn admin_clears_one_list() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteStore::try_new(&conn).unwrap();
    seeded(&store);
    let admin = AdminService::new(&store);

    assert!(matches!(
        admin.clear_list(SHOW, None, ListType::HitList),
        Err(ServiceError::Validation(BoothValidationError::MissingRep(_)))
    ));
    assert!(matches!(
        admin.clear_list("nope", Some("drew"), ListType::HitList),
        Err(ServiceError::NotFound { entity: "show", .. })
    ));

    assert_eq!(admin.clear_list(SHOW, Some("drew"), ListType::HitList).unwrap(), 3);
    let mut state = AppState::load(&store).unwrap();
    state.select_show(SHOW);
    state.open_list(&store, Some("drew"), None).unwrap();
    assert!(state.booths.is_empty());
    state.open_list(&store, Some("jason"), None).unwrap();
    assert_eq!(state.booths.len(), 1);
    assert_eq!(admin.clear_list(SHOW, None, ListType::Master).unwrap(), 1);
}
