//! Integration tests for pattern-driven mapping

use async_trait::async_trait;
use globmap_engine::*;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Build the `expand/` fixture tree in a fresh temp directory
fn expand_fixture() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for file in [
        "expand/README.md",
        "expand/css/baz.css",
        "expand/css/qux.css",
        "expand/deep/deep.txt",
        "expand/deep/deeper/deeper.txt",
        "expand/deep/deeper/deepest/deepest.txt",
        "expand/js/bar.js",
        "expand/js/foo.js",
    ] {
        let path = temp_dir.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, file).unwrap();
    }
    temp_dir
}

fn rooted(dir: &TempDir) -> FindOptions {
    FindOptions::new().with_cwd(dir.path())
}

#[tokio::test]
async fn test_basic_matching_both_call_forms() {
    let dir = expand_fixture();
    let expected = vec![
        MappingEntry::new("expand/deep/deep.txt", ["expand/deep/deep.txt"]),
        MappingEntry::new(
            "expand/deep/deeper/deeper.txt",
            ["expand/deep/deeper/deeper.txt"],
        ),
        MappingEntry::new(
            "expand/deep/deeper/deepest/deepest.txt",
            ["expand/deep/deeper/deepest/deepest.txt"],
        ),
    ];

    let finder = MappingFinder::new();
    let actual = finder
        .find_mapping((vec!["expand/**/*.txt"], rooted(&dir)))
        .await
        .unwrap();
    assert_eq!(actual, expected);

    let actual = finder
        .find_mapping(rooted(&dir).with_src(vec!["expand/**/*.txt"]))
        .await
        .unwrap();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_src_base_is_stripped_from_destinations() {
    let dir = expand_fixture();
    let expected = vec![
        MappingEntry::new("dest/deep.txt", ["expand/deep/deep.txt"]),
        MappingEntry::new("dest/deeper/deeper.txt", ["expand/deep/deeper/deeper.txt"]),
        MappingEntry::new(
            "dest/deeper/deepest/deepest.txt",
            ["expand/deep/deeper/deepest/deepest.txt"],
        ),
    ];
    let mapping = MappingOptions::new()
        .with_dest_base("dest")
        .with_src_base("expand/deep");

    let actual = find_mapping((["**/*.txt"], rooted(&dir).with_mapping(mapping.clone())))
        .await
        .unwrap();
    assert_eq!(actual, expected);

    let actual = find_mapping(
        rooted(&dir)
            .with_src(["**/*.txt"])
            .with_mapping(mapping),
    )
    .await
    .unwrap();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn test_multiple_sources_per_destination_via_rename() {
    let dir = expand_fixture();
    let options = rooted(&dir)
        .with_filter(Filter::IsFile)
        .with_mapping(MappingOptions::new().with_src_base("expand").with_rename(
            |dest, _| {
                let ext = dest.rsplit('.').next().unwrap_or_default();
                format!("build/all.{ext}")
            },
        ));

    let actual = find_mapping(("**/*.{js,css,txt}", options)).await.unwrap();
    assert_eq!(
        actual,
        vec![
            MappingEntry::new("build/all.css", ["expand/css/baz.css", "expand/css/qux.css"]),
            MappingEntry::new(
                "build/all.txt",
                [
                    "expand/deep/deep.txt",
                    "expand/deep/deeper/deeper.txt",
                    "expand/deep/deeper/deepest/deepest.txt",
                ]
            ),
            MappingEntry::new("build/all.js", ["expand/js/bar.js", "expand/js/foo.js"]),
        ]
    );
}

#[tokio::test]
async fn test_options_from_value_drive_the_search() {
    let dir = expand_fixture();
    let options = FindOptions::from_value(serde_json::json!({
        "src": ["**/*.js", "!**/foo.js"],
        "srcBase": "expand",
        "destBase": "out",
        "flatten": true,
        "ext": ".min.js",
        "filter": "isFile"
    }))
    .unwrap()
    .with_cwd(dir.path());

    let actual = find_mapping(options).await.unwrap();
    assert_eq!(
        actual,
        vec![MappingEntry::new("out/bar.min.js", ["expand/js/bar.js"])]
    );
}

#[tokio::test]
async fn test_find_returns_relative_or_prefixed_paths() {
    let dir = expand_fixture();
    let mut options = rooted(&dir).with_mapping(MappingOptions::new().with_src_base("expand/"));

    let relative = find(("js/*.js", options.clone())).await.unwrap();
    assert_eq!(relative, vec!["js/bar.js", "js/foo.js"]);

    options.prefix_base = true;
    let prefixed = find(("js/*.js", options)).await.unwrap();
    assert_eq!(prefixed, vec!["expand/js/bar.js", "expand/js/foo.js"]);
}

#[tokio::test]
async fn test_src_base_spellings_give_the_same_mapping() {
    let dir = expand_fixture();
    let with_base = |base: &str| {
        rooted(&dir).with_mapping(MappingOptions::new().with_src_base(base))
    };

    let plain = find_mapping(("**/*.js", with_base("expand"))).await.unwrap();
    assert_eq!(
        plain,
        vec![
            MappingEntry::new("js/bar.js", ["expand/js/bar.js"]),
            MappingEntry::new("js/foo.js", ["expand/js/foo.js"]),
        ]
    );
    for base in ["expand/", "./expand", "expand//"] {
        let actual = find_mapping(("**/*.js", with_base(base))).await.unwrap();
        assert_eq!(actual, plain, "srcBase {base:?}");
    }
}

#[tokio::test]
async fn test_empty_src_base_matches_like_no_src_base() {
    // Runs in the package directory, where `src/lib.rs` exists
    let absent = find_mapping(("src/*.rs", FindOptions::new())).await.unwrap();

    for base in ["", "./"] {
        let options = FindOptions::new().with_mapping(MappingOptions::new().with_src_base(base));
        let actual = find_mapping(("src/*.rs", options)).await.unwrap();
        assert_eq!(actual, absent, "srcBase {base:?}");
    }

    let entry = MappingEntry::new("src/lib.rs", ["src/lib.rs"]);
    assert_eq!(absent.get("src/lib.rs"), Some(&entry));
    let built = build_mapping(["src/lib.rs"], &MappingOptions::new().with_src_base(""));
    assert_eq!(built, vec![entry]);
}

#[tokio::test]
async fn test_no_matches_gives_empty_mapping() {
    let dir = expand_fixture();
    let actual = find_mapping(("**/*.rs", rooted(&dir))).await.unwrap();
    assert!(actual.is_empty());
}

#[tokio::test]
async fn test_invalid_pattern_is_an_expansion_error() {
    let dir = expand_fixture();
    let err = find_mapping(("**/*.{js", rooted(&dir))).await.unwrap_err();
    assert!(matches!(err, ExpansionError::InvalidPattern { .. }));
    assert!(err.to_string().contains("**/*.{js"));
}

#[tokio::test]
async fn test_concurrent_searches_are_independent() {
    let dir = expand_fixture();
    let finder = MappingFinder::new();
    let flat = rooted(&dir).with_mapping(MappingOptions::new().with_flatten(true));

    let (css, js) = tokio::join!(
        finder.find_mapping(("expand/css/*.css", flat.clone())),
        finder.find_mapping(("expand/js/*.js", flat)),
    );
    let css: Vec<String> = css.unwrap().iter().map(|e| e.dest.clone()).collect();
    let js: Vec<String> = js.unwrap().iter().map(|e| e.dest.clone()).collect();
    assert_eq!(css, vec!["baz.css", "qux.css"]);
    assert_eq!(js, vec!["bar.js", "foo.js"]);
}

/// Expander that replays a fixed answer and records what it was asked
struct ScriptedExpander {
    answer: std::result::Result<Vec<String>, String>,
    calls: Mutex<Vec<(Vec<String>, ExpandOptions)>>,
}

impl ScriptedExpander {
    fn new(answer: std::result::Result<Vec<&str>, &str>) -> Self {
        Self {
            answer: answer
                .map(|paths| paths.into_iter().map(String::from).collect())
                .map_err(String::from),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl GlobExpander for ScriptedExpander {
    async fn expand(
        &self,
        patterns: &[String],
        options: &ExpandOptions,
    ) -> globmap_engine::Result<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .push((patterns.to_vec(), options.clone()));
        self.answer.clone().map_err(ExpansionError::Expander)
    }
}

#[tokio::test]
async fn test_custom_expander_receives_src_base_as_cwd() {
    let expander = Arc::new(ScriptedExpander::new(Ok(vec!["a.js", "./lib/b.js"])));
    let finder = MappingFinder::with_expander(expander.clone());
    let options = FindOptions::new()
        .with_filter(Filter::IsFile)
        .with_mapping(MappingOptions::new().with_src_base("src").with_dest_base("dist"));

    let mapping = finder.find_mapping(("**/*.js", options)).await.unwrap();
    assert_eq!(
        mapping,
        vec![
            MappingEntry::new("dist/a.js", ["src/a.js"]),
            MappingEntry::new("dist/lib/b.js", ["src/lib/b.js"]),
        ]
    );

    let calls = expander.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, vec!["**/*.js".to_string()]);
    assert_eq!(calls[0].1.cwd.as_deref(), Some(Path::new("src")));
    assert!(matches!(calls[0].1.filter, Some(Filter::IsFile)));
}

#[cfg(unix)]
#[tokio::test]
async fn test_custom_expander_absolute_paths_are_made_relative() {
    let expander = ScriptedExpander::new(Ok(vec!["/data/src/a.js", "/data/src/x/b.js"]));
    let finder = MappingFinder::with_expander(expander);
    let options = FindOptions::new()
        .with_cwd("/data")
        .with_mapping(MappingOptions::new().with_src_base("src"));

    let mapping = finder.find_mapping(("**/*.js", options)).await.unwrap();
    assert_eq!(
        mapping,
        vec![
            MappingEntry::new("a.js", ["src/a.js"]),
            MappingEntry::new("x/b.js", ["src/x/b.js"]),
        ]
    );
}

#[tokio::test]
async fn test_expander_failure_produces_no_mapping() {
    let finder = MappingFinder::with_expander(ScriptedExpander::new(Err("permission denied")));
    let err = finder
        .find_mapping(("**/*", FindOptions::new()))
        .await
        .unwrap_err();
    assert!(matches!(err, ExpansionError::Expander(ref msg) if msg == "permission denied"));
}
