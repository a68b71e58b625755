//! Plotting-library color aliases and their CSS equivalents.

const TABLEAU: [(&str, &str); 10] = [
    ("blue", "#1f77b4"),
    ("orange", "#ff7f0e"),
    ("green", "#2ca02c"),
    ("red", "#d62728"),
    ("purple", "#9467bd"),
    ("brown", "#8c564b"),
    ("pink", "#e377c2"),
    ("gray", "#7f7f7f"),
    ("olive", "#bcbd22"),
    ("cyan", "#17becf"),
];

const BASE: [(&str, &str); 8] = [
    ("b", "#0000ff"),
    ("g", "#008000"),
    ("r", "#ff0000"),
    ("c", "#00bfbf"),
    ("m", "#bf00bf"),
    ("y", "#bfbf00"),
    ("k", "#000000"),
    ("w", "#ffffff"),
];

/// Resolves a single-letter base color, a `tab:` palette entry or a `C0`..`C9`
/// cycle entry to CSS hex. Returns `None` for anything else.
pub fn resolve_alias(name: &str) -> Option<&'static str> {
    let name = name.trim();
    if let Some(entry) = name.strip_prefix("tab:") {
        let entry = if entry == "grey" { "gray" } else { entry };
        return TABLEAU
            .iter()
            .find(|(key, _)| *key == entry)
            .map(|(_, css)| *css);
    }
    if let Some(digit) = name.strip_prefix('C') {
        let index: usize = digit.parse().ok()?;
        return TABLEAU.get(index).map(|(_, css)| *css);
    }
    BASE.iter().find(|(key, _)| *key == name).map(|(_, css)| *css)
}
