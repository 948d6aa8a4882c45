//! Static option catalogs and seed data.
//!
//! Picker options double as validation vocabularies: a booth may only carry
//! values listed here for `orders_per_month` and `aov`.

use crate::model::rep::Rep;
use crate::model::show::Show;

/// Placeholder stored when a picker has not been answered.
pub const NOT_APPLICABLE: &str = "N/A";

pub const ORDER_OPTIONS: &[&str] = &[
    NOT_APPLICABLE,
    "0 - 500",
    "500 - 1,000",
    "1,000 - 10,000",
    "10,000+",
];

pub const AOV_OPTIONS: &[&str] = &[
    NOT_APPLICABLE,
    "< $100",
    "$100 - $200",
    "$200 - $300",
    "$300 - $400",
    "$400 - $500",
    "$500+",
];

/// Minimum monthly sales choices offered by the filter panel.
pub const REVENUE_THRESHOLDS: &[f64] = &[
    0.0,
    50_000.0,
    100_000.0,
    200_000.0,
    300_000.0,
    500_000.0,
    1_000_000.0,
];

pub const NO_PLATFORM: &str = "[No Platform]";
pub const NO_PROTECTION: &str = "[No Protection]";
pub const NO_RETURNS: &str = "[No Returns]";

pub const PLATFORMS: &[&str] = &[
    "BigCommerce",
    "CommerceTools",
    "Custom Cart",
    "Magento (Adobe Commerce)",
    "NetSuite SuiteCommerce",
    "Salesforce Commerce Cloud",
    "SAP Hybris",
    "Shopify",
    "Shopify Headless",
    "Shopify Plus",
    "Shopware",
    "VTEX",
    "WooCommerce",
    NO_PLATFORM,
];

pub const PROTECTION_PROVIDERS: &[&str] = &[
    "Bolt Protect",
    "Corso",
    "Cover Genius",
    "Clyde",
    "DIY",
    "Extend",
    "Navidium",
    "Onward",
    "OrderProtection",
    "Protecht",
    "Redo",
    "Route",
    "SavedBy",
    "Seel",
    "SipTection",
    "Swap",
    "XCover",
    NO_PROTECTION,
];

pub const RETURNS_PROVIDERS: &[&str] = &[
    "AfterShip",
    "Clicksit",
    "Corso",
    "Frate (Route)",
    "Happy Returns",
    "In-House",
    "Loop",
    "Narvar",
    "Optoro",
    "ParcelLab",
    "Redo",
    "ReturnLogic",
    "ReturnsGo",
    "ReverseLogix",
    "Reversely",
    "Rich Returns",
    "Sorted",
    "Swap",
    "ZigZag Global",
    NO_RETURNS,
];

/// Shows seeded into an empty store.
pub fn default_shows() -> Vec<Show> {
    [
        (
            "whce2026",
            "Western Hunting Expo",
            "SLC",
            "2026-02-12",
            "2026-02-15",
            "https://huntexpo.com/",
            "https://whce2026.smallworldlabs.com/exhibitors",
        ),
        (
            "expowest2026",
            "Expo West",
            "Anaheim",
            "2026-03-03",
            "2026-03-06",
            "https://www.expowest.com/en/home.html",
            "https://www.expowest.com/en/exhibitor-list/2026-exhibitor-list.html",
        ),
        (
            "bewell2026",
            "Be Well",
            "NY",
            "2026-03-08",
            "2026-03-10",
            "https://www.bewellshownewyork.com/",
            "https://iecscibsny2026.smallworldlabs.com/exhibitors",
        ),
        (
            "asd2026",
            "ASD",
            "Las Vegas",
            "2026-03-17",
            "2026-03-19",
            "https://asdonline.com/",
            "https://march2026.smallworldlabs.com/exhibitors",
        ),
        (
            "globalpet2026",
            "Global Pet Expo",
            "Orlando",
            "2026-03-25",
            "2026-03-27",
            "https://globalpetexpo.org/",
            "https://globalpetexpo26.mapyourshow.com/8_0/explore/exhibitor-gallery.cfm",
        ),
        (
            "tpe2026",
            "TPE",
            "Las Vegas",
            "2026-03-31",
            "2026-04-01",
            "https://totalproductexpo.com/",
            "https://tpe2026.smallworldlabs.com/exhibitors",
        ),
    ]
    .into_iter()
    .map(
        |(id, name, location, start_date, end_date, website, exhibitor_list)| Show {
            id: id.to_string(),
            name: name.to_string(),
            location: location.to_string(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
            website: website.to_string(),
            exhibitor_list: exhibitor_list.to_string(),
        },
    )
    .collect()
}

/// Reps seeded into an empty store.
pub fn default_reps() -> Vec<Rep> {
    [("drew", "Drew"), ("jason", "Jason"), ("wyatt", "Wyatt")]
        .into_iter()
        .map(|(id, name)| Rep::new(id, name))
        .collect()
}
