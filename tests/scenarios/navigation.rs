use portfolio_shell::services::session::{
    JsonFileSessionStore, MarkerStore, MemorySessionStore, ReferrerMarker,
};
use portfolio_shell::shell::navigation::NavigationStateDeriver;
use tempfile::TempDir;

fn check_flag_lifecycle(store: &mut dyn MarkerStore) {
    let deriver = NavigationStateDeriver::default();

    assert!(!deriver.on_mount(store, None).show_back_button);

    store.write_marker(ReferrerMarker::FeaturedProjects).unwrap();
    assert!(deriver.on_mount(store, None).show_back_button);

    store.clear().unwrap();
    assert!(!deriver.on_mount(store, None).show_back_button);
}

#[test]
fn flag_follows_marker_in_memory() {
    check_flag_lifecycle(&mut MemorySessionStore::new());
}

#[test]
fn flag_follows_marker_on_disk() {
    let dir = TempDir::new().unwrap();
    check_flag_lifecycle(&mut JsonFileSessionStore::new(dir.path().join("session.json")));
}

#[test]
fn external_referrer_does_not_show_back_button() {
    let deriver = NavigationStateDeriver::new(
        "/",
        Some(url::Url::parse("https://portfolio.example").unwrap()),
    );
    let mut store = MemorySessionStore::new();

    let flag = deriver.on_mount(&mut store, Some("https://news.example/projects"));
    assert!(!flag.show_back_button);
    assert_eq!(store.read_marker(), Some(ReferrerMarker::External));

    let flag = deriver.on_mount(&mut store, Some("https://portfolio.example/projects"));
    assert!(flag.show_back_button);
}

#[test]
fn marker_survives_a_fresh_store_on_the_same_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    let deriver = NavigationStateDeriver::new("/site/", None);

    deriver.on_mount(&mut JsonFileSessionStore::new(&path), Some("/site/#featured-projects"));

    let mut reopened = JsonFileSessionStore::new(&path);
    assert!(deriver.on_mount(&mut reopened, Some("/site/about")).show_back_button);
}
