//! Label mangling and quoted-text helpers.

/// Replace every hyphen in a label with an underscore.
///
/// Total and deterministic, but lossy: `a-b` and `a_b` mangle alike.
#[must_use]
pub fn mangle(label: &str) -> String {
    label.replace('-', "_")
}

/// Remove the common leading indentation from every non-blank line.
///
/// Whitespace-only lines are ignored when computing the margin and come out
/// empty. Tabs count as one column, like spaces.
#[must_use]
pub fn dedent(text: &str) -> String {
    let margin = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    let mut out = String::with_capacity(text.len());
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if line.trim().is_empty() {
            continue;
        }
        let cut = line
            .char_indices()
            .take_while(|(_, c)| *c == ' ' || *c == '\t')
            .take(margin)
            .count();
        out.push_str(&line[cut..]);
    }
    out
}
