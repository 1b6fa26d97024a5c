use portfolio_shell::registries::atomic::asset::{
    AssetPathError, ImagePathResolver, PROFILE_IMAGE_PATH, resolve, resolve_profile_image,
};
use rstest::rstest;

#[rstest]
#[case("test.jpg", "/", "/test.jpg")]
#[case("images/sub/test.jpg", "/base/", "/base/images/sub/test.jpg")]
#[case("", "/base/", "/base/")]
fn resolves_without_double_separators(
    #[case] relative: &str,
    #[case] base: &str,
    #[case] expected: &str,
) {
    let resolved = resolve(relative, Some(base)).unwrap();
    assert_eq!(resolved, expected);
    assert!(!resolved.contains("//"));
}

#[test]
fn profile_image_path_is_stable() {
    let first = resolve_profile_image().to_string();
    let second = resolve_profile_image().to_string();
    assert_eq!(first, second);
    assert!(first.ends_with(PROFILE_IMAGE_PATH));
}

#[test]
fn resolver_rejects_escaping_paths() {
    let resolver = ImagePathResolver::new("/portfolio/");
    assert_eq!(
        resolver.resolve("../private/key.pem"),
        Err(AssetPathError::ParentTraversal("../private/key.pem".to_string()))
    );
}
