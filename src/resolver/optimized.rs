//! Optimized resolution: precomputed bundle URLs, no filesystem access.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AssetError, Result};

use super::AssetPathSet;

/// `<%= name %>` (underscore/lodash style) or `{{ name }}`.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<%[=-]?[ \t]*([A-Za-z_][A-Za-z0-9_]*)[ \t]*%>|\{\{[ \t]*([A-Za-z_][A-Za-z0-9_]*)[ \t]*\}\}")
        .unwrap()
});

/// Substitute `version` into a resource-root template.
///
/// A trailing `/` is dropped so joined bundle URLs never contain `//`.
///
/// # Examples
/// ```ignore
/// render_resource_root("//cdn.example.com/app/<%= version %>", "1.4.2")
///     == Ok("//cdn.example.com/app/1.4.2")
/// ```
pub fn render_resource_root(template: &str, version: &str) -> Result<String> {
    if template.trim().is_empty() {
        return Err(AssetError::Configuration(
            "optimized mode requires a resource root template".into(),
        ));
    }

    let mut rendered = String::with_capacity(template.len() + version.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        if name != "version" {
            return Err(AssetError::Configuration(format!(
                "unknown placeholder `{name}` in resource root template `{template}`"
            )));
        }

        rendered.push_str(&template[last..whole.start()]);
        rendered.push_str(version);
        last = whole.end();
    }
    rendered.push_str(&template[last..]);

    let trimmed = rendered.trim_end_matches('/');
    Ok(if trimmed.is_empty() { rendered } else { trimmed.to_owned() })
}

/// Bundle URLs for `page` under an already rendered resource root.
pub fn bundle_paths(resource_root: &str, page: &str) -> AssetPathSet {
    AssetPathSet {
        css: vec![format!("{resource_root}/css/{page}.min.css")],
        js: vec![format!("{resource_root}/js/{page}.min.js")],
    }
}

/// Render the template and build the bundle URLs for `page`.
pub fn optimized_paths(template: &str, version: &str, page: &str) -> Result<AssetPathSet> {
    let root = render_resource_root(template, version)?;
    Ok(bundle_paths(&root, page))
}
