use regex::{NoExpand, RegexBuilder};

/// Loader body importing the renamed bindings and initializing them with
/// the renamed module.
pub fn loader_template(bindings: &str, wasm: &str) -> String {
    format!("import init from './{bindings}';await init('./{wasm}');")
}

/// Compiled-size cap for the attribute pattern. An escaped attribute name
/// always parses, so only an oversized name can fail to build.
const PATTERN_SIZE_LIMIT: usize = 4 * 1024 * 1024;

/// Point the first `attribute="<path>.js"` assignment in `html` at
/// `./{loader}`.
///
/// The old value must consist of word characters, dots and slashes and
/// end in `.js`. Exactly one occurrence is replaced. Returns `Ok(None)`
/// when nothing matches.
pub fn patch_worker_uri(
    html: &str,
    attribute: &str,
    loader: &str,
) -> Result<Option<String>, regex::Error> {
    let pattern = format!(r#"{}="([\w./]+\.js)""#, regex::escape(attribute));
    let re = RegexBuilder::new(&pattern)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()?;
    if !re.is_match(html) {
        return Ok(None);
    }
    let replacement = format!(r#"{attribute}="./{loader}""#);
    Ok(Some(re.replacen(html, 1, NoExpand(&replacement)).into_owned()))
}
