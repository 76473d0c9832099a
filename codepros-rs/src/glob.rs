/// Rewrite a raw CODEPROS path into a matchable glob. Directory shorthands
/// (a trailing slash, or a bare name with no extension and no wildcard) mean
/// "any direct child of this directory" and get a `/*` appended; anything
/// already explicit passes through verbatim.
pub fn globulize(raw: &str) -> String {
    if let Some(dir) = raw.strip_suffix('/') {
        return format!("{}/*", dir);
    }

    let last_segment = raw.rsplit('/').next().unwrap_or(raw);
    if raw.ends_with('*') || last_segment.contains('.') {
        raw.to_string()
    } else {
        format!("{}/*", raw)
    }
}

/// Match a path against a normalized glob. Three pattern shapes are
/// supported: `*` and `**/*` match every path, `dir/*` matches the direct
/// children of `dir` and nothing deeper, and anything else is a literal
/// path comparison. Matching is case-sensitive and uses `/` separators on
/// every platform.
pub fn matches(pattern: &str, path: &str) -> bool {
    if pattern == "*" || pattern == "**/*" {
        return true;
    }

    if let Some(dir) = pattern.strip_suffix("/*") {
        return path
            .strip_prefix(dir)
            .and_then(|rest| rest.strip_prefix('/'))
            .map(|child| !child.is_empty() && !child.contains('/'))
            .unwrap_or(false);
    }

    pattern == path
}
