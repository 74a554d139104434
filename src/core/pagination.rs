//! Fixed-size paging over sorted result sets.

/// One page of a larger sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Entries on this page.
    pub items: &'a [T],
    /// The 1-based page number actually shown, after clamping.
    pub page: usize,
    /// Total number of pages; `0` when there are no entries.
    pub total_pages: usize,
}

/// Slice `items` into pages of `page_size` and return the requested one.
///
/// The page number is 1-based and clamped into `[1, total_pages]`, so page 0
/// or a page past the end still yields a valid page. A `page_size` of zero
/// is treated as one.
///
/// # Examples
///
/// ```
/// use bevy_command_console::core::paginate;
///
/// let entries: Vec<u32> = (1..=12).collect();
/// let page = paginate(&entries, 5, 3);
/// assert_eq!(page.items, &[11, 12]);
/// assert_eq!(page.total_pages, 3);
/// ```
pub fn paginate<T>(items: &[T], page_size: usize, requested: i64) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size);

    let page = usize::try_from(requested)
        .unwrap_or(0)
        .clamp(1, total_pages.max(1));

    let start = ((page - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());

    Page {
        items: &items[start..end],
        page,
        total_pages,
    }
}
