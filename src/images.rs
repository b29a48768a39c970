use std::sync::LazyLock;

use regex::Regex;

static RELATIVE_ASSETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\.\./)+assets/").expect("assets pattern is valid"));

/// Rewrites `../../assets/x.png` style paths stored by the back office into
/// site-root paths (`/x.png`). Anything else is returned unchanged.
pub fn normalize_image_path(path: &str) -> String {
    RELATIVE_ASSETS.replace(path, "/").into_owned()
}

pub fn normalize_optional(path: Option<String>) -> Option<String> {
    path.map(|p| normalize_image_path(&p))
}
