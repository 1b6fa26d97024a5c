use portfolio_shell::registries::atomic::project::{
    Gradient, ProjectRecord, ProjectRegistry, ProjectTag, TagColor, projects,
};

fn record(id: &str, title: &str) -> ProjectRecord {
    ProjectRecord {
        id: id.to_string(),
        title: title.to_string(),
        subtitle: None,
        description: format!("About {title}"),
        tags: vec![ProjectTag {
            label: "Rust".to_string(),
            color: TagColor::Red,
        }],
        link: Some(format!("/projects/{id}")),
        is_external: false,
        gradient: Gradient {
            from: "from-red-500".to_string(),
            to: "to-orange-600".to_string(),
        },
    }
}

#[test]
fn lookup_over_two_records() {
    let registry = ProjectRegistry::from_records([record("a", "Alpha"), record("b", "Beta")]).unwrap();

    assert_eq!(registry.get_by_id("a").map(|r| r.title.as_str()), Some("Alpha"));
    assert!(registry.get_by_id("c").is_none());

    let ids: Vec<_> = registry.get_all().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn process_registry_lookups_are_stable() {
    for _ in 0..3 {
        let imsop = projects().get_by_id("imsop").unwrap();
        assert_eq!(imsop.title, "IMSOP");
        assert!(projects().get_by_id("nonexistent-id").is_none());
    }
    assert_eq!(projects().get_all().len(), projects().len());
    assert_eq!(projects().len(), 2);
}

#[test]
fn seed_records_round_trip_through_json() {
    let json = serde_json::to_string(projects().get_all()).unwrap();
    let decoded: Vec<ProjectRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, projects().get_all());
}
