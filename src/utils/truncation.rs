const MAX_INDICATOR_DISPLAY_LENGTH: usize = 120;

/// Shorten an indicator for inclusion in threat labels and info notices.
/// The full value stays in the verdict's indicator list.
pub fn truncate_indicator(value: &str) -> String {
    if value.len() <= MAX_INDICATOR_DISPLAY_LENGTH {
        value.to_string()
    } else {
        let cut = value
            .char_indices()
            .take_while(|(i, _)| *i < MAX_INDICATOR_DISPLAY_LENGTH)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &value[..cut])
    }
}
