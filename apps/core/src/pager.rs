use std::collections::VecDeque;

use crate::logging;
use crate::model::RawBookmark;
use crate::remote::BookmarkSource;

/// Lazy, finite, single-pass walk over the full bookmark collection. Pages
/// are pulled on demand; the total count is captured from the first
/// successful page only, so a total that shifts mid-iteration cannot make
/// the walk unbounded. A page error ends the sequence early after draining
/// whatever was already fetched.
pub struct Pager<'a> {
    source: &'a dyn BookmarkSource,
    limit: u64,
    offset: u64,
    total: Option<u64>,
    buffer: VecDeque<RawBookmark>,
    done: bool,
}

impl<'a> Pager<'a> {
    pub fn new(source: &'a dyn BookmarkSource, limit: u64) -> Self {
        Self {
            source,
            limit: limit.max(1),
            offset: 0,
            total: None,
            buffer: VecDeque::new(),
            done: false,
        }
    }

    fn fetch_next_page(&mut self) {
        if let Some(total) = self.total {
            if self.offset > total {
                self.done = true;
                return;
            }
        }

        match self.source.list_page(self.offset, self.limit) {
            Ok(page) => {
                if self.total.is_none() {
                    self.total = Some(page.total_count);
                }
                self.offset += self.limit;
                self.buffer.extend(page.bookmarks);
            }
            Err(error) => {
                logging::warn(&format!(
                    "bookmark page fetch failed at offset {}: {error}",
                    self.offset
                ));
                self.done = true;
            }
        }
    }
}

impl Iterator for Pager<'_> {
    type Item = RawBookmark;

    fn next(&mut self) -> Option<RawBookmark> {
        loop {
            if let Some(bookmark) = self.buffer.pop_front() {
                return Some(bookmark);
            }
            if self.done {
                return None;
            }
            self.fetch_next_page();
        }
    }
}
