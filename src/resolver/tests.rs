//! Resolver tests over real directory trees.

use super::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct Site {
    _dir: TempDir,
    config: AssetConfig,
}

impl Site {
    fn new(extra: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let mut config = crate::config::test_parse_config(extra);
        config.finalize(dir.path());
        fs::create_dir_all(&config.client_dir).unwrap();
        Self { _dir: dir, config }
    }

    fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.config.client_dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn resolver(&self) -> Resolver {
        Resolver::new(self.config.clone(), |src: &str, _: &Path| {
            Ok::<_, String>(format!("/* compiled */\n{src}"))
        })
    }
}

#[test]
fn test_script_order_scenario() {
    let site = Site::new("");
    site.file("pageA/lib/vendor.js", "");
    site.file("pageA/app.js", "");
    site.file("pageA/widgets/foo.js", "");

    let set = site.resolver().paths("pageA", false).unwrap();
    assert_eq!(
        set.js,
        vec!["/pageA/lib/vendor.js", "/pageA/app.js", "/pageA/widgets/foo.js"]
    );
    assert!(set.css.is_empty());
}

#[test]
fn test_root_level_scripts_reverse_sorted_discovery() {
    // Sorted walk discovers one.js before two.js.
    let site = Site::new("");
    site.file("pageA/one.js", "");
    site.file("pageA/two.js", "");

    let set = site.resolver().paths("pageA", false).unwrap();
    assert_eq!(set.js, vec!["/pageA/two.js", "/pageA/one.js"]);
}

#[test]
fn test_stylesheet_compiled_into_build_dir() {
    let site = Site::new("");
    site.file("pageA/styles.styl", "body\n  color red");
    site.file("pageA/reset.css", "* {}");

    let set = site.resolver().paths("pageA", false).unwrap();
    assert_eq!(set.css, vec!["/pageA/reset.css", "/pageA/styles.css"]);

    let compiled = fs::read_to_string(site.config.build_dir.join("pageA/styles.css")).unwrap();
    assert!(compiled.starts_with("/* compiled */"));
    assert!(!set.css.iter().any(|p| p.ends_with(".styl")));
}

#[test]
fn test_compile_failure_fails_request() {
    let site = Site::new("");
    site.file("pageA/styles.styl", "broken");
    site.file("pageA/app.js", "");

    let resolver = Resolver::new(site.config.clone(), |_: &str, _: &Path| {
        Err::<String, _>("expected indent".to_string())
    });
    let err = resolver.paths("pageA", false).unwrap_err();
    match err {
        AssetError::Compile { path, message } => {
            assert!(path.ends_with("pageA/styles.styl"));
            assert_eq!(message, "expected indent");
        }
        other => panic!("expected compile error, got {other:?}"),
    }
}

#[test]
fn test_exclude_glob_applies_to_both_branches() {
    let site = Site::new("exclude = \"*.test.js\"");
    site.file("pageA/foo.test.js", "");
    site.file("pageA/foo.js", "");

    let set = site.resolver().paths("pageA", false).unwrap();
    assert_eq!(set.js, vec!["/pageA/foo.js"]);

    let site = Site::new("exclude = \"drafts\"");
    site.file("pageA/drafts/wip.styl", "x");
    site.file("pageA/main.css", "");

    let set = site.resolver().paths("pageA", false).unwrap();
    assert_eq!(set.css, vec!["/pageA/main.css"]);
    assert!(!site.config.build_dir.join("pageA/drafts").exists());
}

#[test]
fn test_debug_marks_scripts_only() {
    let site = Site::new("");
    site.file("pageA/app.js", "");
    site.file("pageA/main.css", "");

    let set = site.resolver().paths("pageA", true).unwrap();
    assert_eq!(set.js, vec!["/pageA/app.js?__scriptdebug__=true"]);
    assert_eq!(set.css, vec!["/pageA/main.css"]);
}

#[test]
fn test_optimized_mode_never_touches_filesystem() {
    let dir = TempDir::new().unwrap();
    let mut config = crate::config::test_parse_config(
        "[optimize]\nenable = true\nresource_root = \"//cdn/<%= version %>\"\nversion = \"5.0.1\"",
    );
    config.finalize(&dir.path().join("does/not/exist"));

    let resolver = Resolver::new(config, |_: &str, _: &Path| {
        Err::<String, _>("compiler must not run".to_string())
    });
    let set = resolver.paths("checkout", false).unwrap();
    assert_eq!(
        set,
        AssetPathSet {
            css: vec!["//cdn/5.0.1/css/checkout.min.css".into()],
            js: vec!["//cdn/5.0.1/js/checkout.min.js".into()],
        }
    );
}

#[test]
fn test_debug_overrides_optimized_mode() {
    let site = Site::new("[optimize]\nenable = true\nresource_root = \"/s/<%= version %>\"");
    site.file("pageA/app.js", "");

    let resolver = site.resolver();
    let optimized = resolver.paths("pageA", false).unwrap();
    assert_eq!(optimized.js, vec!["/s/js/pageA.min.js"]);

    let debug = resolver.paths("pageA", true).unwrap();
    assert_eq!(debug.js, vec!["/pageA/app.js?__scriptdebug__=true"]);
}

#[test]
fn test_optimized_without_template_is_configuration_error() {
    let site = Site::new("[optimize]\nenable = true");
    let err = site.resolver().paths("pageA", false).unwrap_err();
    assert!(matches!(err, AssetError::Configuration(_)));
}

#[test]
fn test_missing_page_is_io_error() {
    let site = Site::new("");
    let err = site.resolver().paths("nope", false).unwrap_err();
    assert!(matches!(err, AssetError::Io { .. }));
}

#[test]
fn test_invalid_page_name_rejected() {
    let site = Site::new("");
    site.file("pageA/app.js", "");
    for page in ["", "..", "pageA/../pageA", "/etc"] {
        let err = site.resolver().paths(page, false).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }), "page {page:?}");
    }
}

#[test]
fn test_returned_paths_are_browser_absolute() {
    let site = Site::new("");
    site.file("pageA/lib/a.js", "");
    site.file("pageA/x/y/z.js", "");
    site.file("pageA/s.styl", "");

    let set = site.resolver().paths("pageA", false).unwrap();
    let client = site.config.client_dir.to_string_lossy().into_owned();
    for path in set.css.iter().chain(&set.js) {
        assert!(path.starts_with("/pageA/"), "{path}");
        assert!(!path.contains(&client), "{path}");
    }
}

#[test]
fn test_concurrent_requests() {
    let site = Site::new("");
    site.file("pageA/app.js", "");
    site.file("pageB/lib/b.js", "");
    site.file("pageB/b.styl", "b");

    let resolver = site.resolver();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let resolver = resolver.clone();
                let page = if i % 2 == 0 { "pageA" } else { "pageB" };
                s.spawn(move || resolver.paths(page, false).unwrap())
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let set = handle.join().unwrap();
            if i % 2 == 0 {
                assert_eq!(set.js, vec!["/pageA/app.js"]);
            } else {
                assert_eq!(set.js, vec!["/pageB/lib/b.js"]);
                assert_eq!(set.css, vec!["/pageB/b.css"]);
            }
        }
    });
}

#[test]
fn test_development_inside_single_thread_pool() {
    let site = Site::new("");
    site.file("pageA/lib/vendor.js", "");
    site.file("pageA/app.js", "");
    site.file("pageA/styles.styl", "body\n  color red");

    let resolver = site.resolver();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(1).build().unwrap();
    let set = pool.install(|| resolver.paths("pageA", false)).unwrap();

    assert_eq!(set.js, vec!["/pageA/lib/vendor.js", "/pageA/app.js"]);
    assert_eq!(set.css, vec!["/pageA/styles.css"]);
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_in_page_is_ignored() {
    let site = Site::new("");
    site.file("pageA/app.js", "");
    let lock = site.config.client_dir.join("pageA/.#app.js");
    std::os::unix::fs::symlink("user@host.1234:99", &lock).unwrap();

    let set = site.resolver().paths("pageA", false).unwrap();
    assert_eq!(set.js, vec!["/pageA/app.js"]);
}

#[test]
fn test_asset_path_set_serializes() {
    let set = AssetPathSet {
        css: vec!["/a.css".into()],
        js: vec!["/a.js".into()],
    };
    let json = serde_json::to_string(&set).unwrap();
    assert_eq!(json, r#"{"css":["/a.css"],"js":["/a.js"]}"#);
}
