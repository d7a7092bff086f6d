use super::Resolution;

const BOM: char = '\u{feff}';

/// Splits `key:value` lines at the first colon. Lines without one are skipped.
pub(super) fn entries(text: &str) -> impl Iterator<Item = (&str, &str)> {
    text.trim_start_matches(BOM)
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, _)| !k.is_empty())
}

/// `WxH` with both sides positive.
pub(super) fn resolution(value: &str) -> Option<Resolution> {
    let (w, h) = value.split_once(['x', 'X'])?;
    let width = w.trim().parse::<u32>().ok().filter(|&v| v > 0)?;
    let height = h.trim().parse::<u32>().ok().filter(|&v| v > 0)?;
    Some(Resolution { width, height })
}

pub(super) fn boolean(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}
