//! Page-number to offset conversion.

/// Converts a 1-based `page` query value into a row offset.
///
/// Anything that is not a positive integer (absent, `0`, negative, garbage)
/// means the first page.
pub fn offset(page: Option<&str>, page_size: u32) -> usize {
    match page.and_then(|p| p.trim().parse::<u64>().ok()) {
        Some(page) if page > 0 => {
            let offset = (page - 1).saturating_mul(u64::from(page_size));
            usize::try_from(offset).unwrap_or(usize::MAX)
        }
        _ => 0,
    }
}
