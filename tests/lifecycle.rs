use font_registry::config::{DuplicatePolicy, HandlePolicy, RegistrySettings};
use font_registry::registry::FontFile;
use font_registry::stylesheet::{binds_family, StyleSheetError};
use font_registry::{use_fonts, FontProvider, FontRegistry, FontsHandle, RegistryError};

fn ink() -> FontFile {
    FontFile::new("Ink.otf", "font/otf", vec![0x4fu8; 32])
}

fn names(fonts: &FontsHandle) -> Vec<String> {
    fonts.custom_fonts().iter().map(|n| n.to_string()).collect()
}

fn rules_binding(fonts: &FontsHandle, family: &str) -> usize {
    fonts.with_registry(|r| {
        r.style_sheet()
            .rules()
            .iter()
            .filter(|css| binds_family(css, family))
            .count()
    })
}

#[tokio::test]
async fn test_ink_scenario() {
    let provider = FontProvider::default();
    let _scope = provider.enter();
    let fonts = use_fonts();

    // 1. First upload
    fonts.add_custom_font(ink()).await.unwrap();
    assert_eq!(names(&fonts), vec!["Ink"]);
    assert_eq!(rules_binding(&fonts, "Ink"), 1);

    // 2. Same file again stacks a second entry
    fonts.add_custom_font(ink()).await.unwrap();
    assert_eq!(names(&fonts), vec!["Ink", "Ink"]);
    assert_eq!(rules_binding(&fonts, "Ink"), 2);

    // 3. Removal takes every occurrence
    assert_eq!(fonts.remove_custom_font("Ink"), 2);
    assert!(names(&fonts).is_empty());
    assert_eq!(rules_binding(&fonts, "Ink"), 0);
    assert_eq!(fonts.with_registry(|r| r.resources().live_count()), 0);
}

#[tokio::test]
async fn test_add_increments_count_by_one() {
    let provider = FontProvider::default();
    let fonts = provider.handle();

    for expected in 1..=3 {
        fonts
            .add_custom_font(FontFile::new("MyFont.woff2", "font/woff2", vec![1u8; 4]))
            .await
            .unwrap();
        let count = fonts.custom_fonts().iter().filter(|n| n.as_str() == "MyFont").count();
        assert_eq!(count, expected);
    }
}

#[tokio::test]
async fn test_only_last_extension_is_stripped() {
    let provider = FontProvider::default();
    let fonts = provider.handle();

    let name = fonts
        .add_custom_font(FontFile::new("archive.tar.gz", "font/ttf", vec![1u8; 4]))
        .await
        .unwrap();
    assert_eq!(name, "archive.tar");
    assert_eq!(rules_binding(&fonts, "archive.tar"), 1);
}

#[tokio::test]
async fn test_failed_add_is_a_noop_for_ignoring_callers() {
    let provider = FontProvider::default();
    let fonts = provider.handle();

    let _ = fonts
        .add_custom_font(FontFile::new("Ink.otf", "", vec![1u8; 4]))
        .await;
    assert!(names(&fonts).is_empty());
    assert!(fonts.with_registry(|r| r.style_sheet().is_empty()));
}

#[tokio::test]
async fn test_injection_failure_is_reported() {
    let settings = RegistrySettings {
        max_rules: Some(0),
        ..RegistrySettings::default()
    };
    let provider = FontProvider::new(FontRegistry::in_memory(settings));
    let fonts = provider.handle();

    let err = fonts.add_custom_font(ink()).await.unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Injection(StyleSheetError::Full { capacity: 0 })
    ));
    assert!(names(&fonts).is_empty());
    assert_eq!(fonts.with_registry(|r| r.resources().live_count()), 0);
}

#[tokio::test]
async fn test_handle_policies() {
    for (policy, live_after) in [(HandlePolicy::Release, 0), (HandlePolicy::Retain, 2)] {
        let settings = RegistrySettings {
            handles: policy,
            ..RegistrySettings::default()
        };
        let provider = FontProvider::new(FontRegistry::in_memory(settings));
        let fonts = provider.handle();

        fonts.add_custom_font(ink()).await.unwrap();
        fonts.add_custom_font(ink()).await.unwrap();
        fonts.remove_custom_font("Ink");

        assert_eq!(
            fonts.with_registry(|r| r.resources().live_count()),
            live_after,
            "policy {:?}",
            policy
        );
    }
}

#[tokio::test]
async fn test_replace_policy_keeps_single_binding() {
    let settings = RegistrySettings {
        duplicates: DuplicatePolicy::Replace,
        ..RegistrySettings::default()
    };
    let provider = FontProvider::new(FontRegistry::in_memory(settings));
    let fonts = provider.handle();

    fonts.add_custom_font(ink()).await.unwrap();
    fonts.add_custom_font(ink()).await.unwrap();

    assert_eq!(names(&fonts), vec!["Ink"]);
    assert_eq!(rules_binding(&fonts, "Ink"), 1);
    assert_eq!(fonts.with_registry(|r| r.resources().live_count()), 1);
}

#[tokio::test]
async fn test_subscribers_follow_the_list() {
    let provider = FontProvider::default();
    let fonts = provider.handle();
    let mut rx = fonts.subscribe();

    fonts.add_custom_font(ink()).await.unwrap();
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().len(), 1);

    fonts.remove_custom_font("Ink");
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_empty());
}

#[tokio::test]
async fn test_add_font_path() {
    let dir = std::env::temp_dir().join(format!("font-registry-lifecycle-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let good = dir.join("Ink.otf");
    let unknown = dir.join("Ink.bin");
    std::fs::write(&good, b"OTTO").unwrap();
    std::fs::write(&unknown, b"OTTO").unwrap();

    let provider = FontProvider::default();
    let fonts = provider.handle();

    let added = fonts.add_font_path(&good).await;
    let rejected = fonts.add_font_path(&unknown).await;
    let missing = fonts.add_font_path(&dir.join("Nope.ttf")).await;
    let _ = std::fs::remove_dir_all(&dir);

    assert_eq!(added.unwrap(), "Ink");
    assert!(matches!(rejected, Err(RegistryError::MissingMimeType { .. })));
    assert!(matches!(missing, Err(RegistryError::Io { .. })));
    assert_eq!(names(&fonts), vec!["Ink"]);
}

#[test]
#[should_panic(expected = "use_fonts must be used within a FontProvider")]
fn test_scope_guard() {
    let _ = use_fonts();
}
