//! Integration tests for catalog-filters
//!
//! These drive a `FilterPanel` against an in-memory router with a manual
//! clock, the same way the browse screen and the replay command do.

use catalog_filters::catalog::{CatalogService, MemoryCatalog, ProductQuery};
use catalog_filters::commands::replay::{ReplayScript, run};
use catalog_filters::config::{NavigationErrorPolicy, SyncSettings};
use catalog_filters::query::{FilterKey, QuerySnapshot, SortOrder};
use catalog_filters::store::{MemoryRouter, NavigateOptions, QueryStore};
use catalog_filters::sync::{FilterPanel, ManualClock};
use pretty_assertions::assert_eq;

fn panel<'a>(
    router: &'a MemoryRouter,
    clock: &ManualClock,
    settings: SyncSettings,
) -> FilterPanel<&'a MemoryRouter, ManualClock> {
    FilterPanel::builder()
        .store(router)
        .clock(clock.clone())
        .settings(settings)
        .build()
        .unwrap()
}

fn hrefs(router: &MemoryRouter) -> Vec<String> {
    router.calls().into_iter().map(|call| call.href).collect()
}

#[test]
fn test_clearing_search_resets_page() {
    let router = MemoryRouter::new("?search=pump&page=3");
    let clock = ManualClock::new();
    let mut panel = panel(&router, &clock, SyncSettings::default());

    panel.on_input_change(FilterKey::Search, "").unwrap();
    clock.advance_ms(600);
    panel.tick().unwrap();
    router.settle();

    assert_eq!(hrefs(&router), vec!["?page=1"]);
    assert_eq!(router.current().to_href(), "?page=1");
    assert_eq!(router.current().get(FilterKey::Search), None);
}

#[test]
fn test_fast_typing_commits_final_text_once() {
    let router = MemoryRouter::new("");
    let clock = ManualClock::new();
    let mut panel = panel(&router, &clock, SyncSettings::default());

    for text in ["s", "se", "sen"] {
        panel.on_input_change(FilterKey::Search, text).unwrap();
        panel.tick().unwrap();
        clock.advance_ms(100);
        panel.tick().unwrap();
    }
    clock.advance_ms(1000);
    panel.tick().unwrap();

    assert_eq!(hrefs(&router), vec!["?search=sen&page=1"]);
}

#[test]
fn test_toggle_commits_immediately() {
    let router = MemoryRouter::new("?brandId=b1,b2");
    let clock = ManualClock::new();
    let mut panel = panel(&router, &clock, SyncSettings::default());

    assert!(panel.toggle(FilterKey::BrandId, "b3").unwrap());

    assert_eq!(hrefs(&router), vec!["?brandId=b1,b2,b3&page=1"]);
    assert_eq!(
        router.last_call().map(|call| call.options),
        Some(NavigateOptions { scroll: false })
    );
}

#[test]
fn test_clear_wins_over_pending_price_edit() {
    let router = MemoryRouter::new("");
    let clock = ManualClock::new();
    let mut panel = panel(&router, &clock, SyncSettings::default());

    panel.on_input_change(FilterKey::MinPrice, "10").unwrap();
    clock.advance_ms(200);
    panel.clear_filters().unwrap();
    clock.advance_ms(2000);
    panel.tick().unwrap();

    assert_eq!(panel.display_value(FilterKey::MinPrice), Some(""));
    assert!(!panel.is_editing(FilterKey::MinPrice));
    assert_eq!(hrefs(&router), vec!["?page=1"]);
}

#[test]
fn test_burst_of_any_length_navigates_once() {
    for keystrokes in 1..=12 {
        let router = MemoryRouter::new("");
        let clock = ManualClock::new();
        let mut panel = panel(&router, &clock, SyncSettings::default());

        let mut text = String::new();
        for i in 0..keystrokes {
            text.push(char::from(b'a' + u8::try_from(i).unwrap()));
            panel.on_input_change(FilterKey::Search, text.clone()).unwrap();
            clock.advance_ms(80);
            panel.tick().unwrap();
        }
        clock.advance_ms(500);
        panel.tick().unwrap();

        assert_eq!(hrefs(&router), vec![format!("?search={text}&page=1")]);
    }
}

#[test]
fn test_external_change_never_overwrites_text_being_typed() {
    let router = MemoryRouter::new("");
    let clock = ManualClock::new();
    let mut panel = panel(&router, &clock, SyncSettings::default());

    panel.on_input_change(FilterKey::Search, "pu").unwrap();
    router.visit("search=valve&brandId=b1");
    panel.tick().unwrap();
    assert_eq!(panel.display_value(FilterKey::Search), Some("pu"));

    clock.advance_ms(500);
    panel.tick().unwrap();
    router.settle();
    panel.tick().unwrap();
    assert_eq!(router.current().to_href(), "?search=pu&brandId=b1&page=1");
    assert_eq!(panel.display_value(FilterKey::Search), Some("pu"));

    router.visit("search=hose");
    panel.tick().unwrap();
    assert_eq!(panel.display_value(FilterKey::Search), Some("hose"));
}

#[test]
fn test_every_commit_kind_resets_page() {
    for start_page in 2..=5 {
        let router = MemoryRouter::new(&format!("page={start_page}"));
        let clock = ManualClock::new();
        let mut panel = panel(&router, &clock, SyncSettings::default());

        panel.toggle(FilterKey::CategoryId, "c2").unwrap();
        router.settle();
        panel.tick().unwrap();
        panel.go_to_page(start_page).unwrap();
        router.settle();
        panel.tick().unwrap();
        panel.set_sort(SortOrder::TitleAsc).unwrap();
        router.settle();
        panel.tick().unwrap();
        panel.go_to_page(start_page).unwrap();
        router.settle();
        panel.tick().unwrap();
        panel.on_input_change(FilterKey::MaxPrice, "80").unwrap();
        clock.advance_ms(500);
        panel.tick().unwrap();

        let calls = hrefs(&router);
        assert_eq!(calls.len(), 5);
        for (idx, href) in calls.iter().enumerate() {
            let page = QuerySnapshot::parse(href).page();
            if idx % 2 == 0 {
                assert_eq!(page, 1, "{href}");
            } else {
                assert_eq!(page, start_page, "{href}");
            }
        }
    }
}

#[test]
fn test_empty_value_deletes_each_text_key() {
    for key in [FilterKey::Search, FilterKey::MinPrice, FilterKey::MaxPrice] {
        let router = MemoryRouter::new("search=pump&minPrice=5&maxPrice=50");
        let clock = ManualClock::new();
        let mut panel = panel(&router, &clock, SyncSettings::default());

        panel.on_input_change(key, "").unwrap();
        clock.advance_ms(500);
        panel.tick().unwrap();

        let href = router.last_call().unwrap().href;
        assert!(!href.contains(&format!("{key}=")), "{href}");
        assert!(QuerySnapshot::parse(&href).get(key).is_none());
    }
}

#[test]
fn test_double_toggle_restores_membership_and_order() {
    let router = MemoryRouter::new("categoryId=c3,c1,c4");
    let clock = ManualClock::new();
    let mut panel = panel(&router, &clock, SyncSettings::default());

    panel.toggle(FilterKey::CategoryId, "c1").unwrap();
    router.settle();
    panel.tick().unwrap();
    panel.toggle(FilterKey::CategoryId, "c1").unwrap();
    router.settle();

    assert_eq!(router.current().get(FilterKey::CategoryId), Some("c3,c1,c4"));
}

#[test]
fn test_clear_is_one_navigation() {
    let router = MemoryRouter::new("search=pump&minPrice=5&brandId=b1,b2&categoryId=c1&sort=price_desc&page=7&utm=x");
    let clock = ManualClock::new();
    let mut panel = panel(&router, &clock, SyncSettings::default());
    panel.on_input_change(FilterKey::MaxPrice, "90").unwrap();

    panel.clear_filters().unwrap();
    clock.advance_ms(1000);
    panel.tick().unwrap();

    assert_eq!(hrefs(&router), vec!["?page=1"]);
}

#[test]
fn test_same_tick_toggles_both_survive() {
    let router = MemoryRouter::new("");
    let clock = ManualClock::new();
    let mut panel = panel(&router, &clock, SyncSettings::default());

    panel.toggle(FilterKey::BrandId, "b1").unwrap();
    panel.toggle(FilterKey::CategoryId, "c2").unwrap();
    router.settle();

    assert_eq!(router.current().to_href(), "?brandId=b1&categoryId=c2&page=1");
}

#[test]
fn test_unknown_keys_survive_edits() {
    let router = MemoryRouter::new("utm=newsletter&brandId=b1");
    let clock = ManualClock::new();
    let mut panel = panel(&router, &clock, SyncSettings::default());

    panel.toggle(FilterKey::BrandId, "b2").unwrap();

    assert_eq!(hrefs(&router), vec!["?brandId=b1,b2&page=1&utm=newsletter"]);
}

#[test]
fn test_refused_navigation_reverts_field_and_raises_notice() {
    let router = MemoryRouter::new("search=pump");
    let clock = ManualClock::new();
    let settings = SyncSettings::default().with_navigation_errors(NavigationErrorPolicy::Surface);
    let mut panel = panel(&router, &clock, settings);

    router.reject_next(1);
    panel.on_input_change(FilterKey::Search, "valve").unwrap();
    clock.advance_ms(500);
    panel.tick().unwrap();

    assert_eq!(panel.display_value(FilterKey::Search), Some("pump"));
    let notices = panel.drain_notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].text.starts_with("Couldn't update filters"));
}

#[test]
fn test_disposed_panel_never_navigates() {
    let router = MemoryRouter::new("");
    let clock = ManualClock::new();
    {
        let mut panel = panel(&router, &clock, SyncSettings::default());
        panel.on_input_change(FilterKey::Search, "pump").unwrap();
    }
    clock.advance_ms(5000);

    assert_eq!(router.call_count(), 0);
}

#[test]
fn test_replay_script_end_to_end() {
    let script = ReplayScript::parse(
        r#"
        initial = "search=pump&page=3"

        [[step]]
        input = { key = "search", text = "" }

        [[step]]
        advance_ms = 600

        [[step]]
        toggle = { key = "brandId", id = "b3" }

        [[step]]
        sort = "price_asc"
        "#,
    )
    .unwrap();

    let report = run(&script, &SyncSettings::default()).unwrap();

    let navigations: Vec<&str> = report.navigations.iter().map(|n| n.href.as_str()).collect();
    assert_eq!(
        navigations,
        vec!["?page=1", "?brandId=b3&page=1", "?brandId=b3&sort=price_asc&page=1"]
    );
    assert_eq!(report.final_href, "?brandId=b3&sort=price_asc&page=1");
}

#[test]
fn test_committed_query_selects_products() {
    let router = MemoryRouter::new("");
    let clock = ManualClock::new();
    let mut panel = panel(&router, &clock, SyncSettings::default());
    let catalog = MemoryCatalog::sample(12).unwrap();

    panel.toggle(FilterKey::CategoryId, "c1").unwrap();
    router.settle();
    panel.tick().unwrap();
    panel.on_input_change(FilterKey::MaxPrice, "100").unwrap();
    clock.advance_ms(500);
    panel.tick().unwrap();
    panel.set_sort(SortOrder::PriceAsc).unwrap();
    router.settle();

    let page = catalog
        .fetch_products(&ProductQuery::from_snapshot(&router.current()))
        .unwrap();
    let titles: Vec<&str> = page.items.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Fountain pump mini", "Pond pump 1200 l/h", "Garden pump 250W"]
    );
}
