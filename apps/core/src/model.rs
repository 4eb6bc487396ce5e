use serde::Deserialize;

/// Bookmark as reported by the Readeck API. Unknown fields are ignored,
/// absent fields default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawBookmark {
    pub id: String,
    pub url: String,
    pub title: String,
    pub labels: Vec<String>,
    pub is_marked: bool,
    pub is_archived: bool,
    pub href: String,
}

/// Logical action bindings carried by a search record. The host decides how
/// to execute open/copy; archive and delete route back through the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkAction {
    OpenInReadeck { url: String },
    OpenSourceUrl { url: String },
    CopyUrl { url: String },
    Archive { id: String },
    Delete { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRecord {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub url: String,
    pub filter: String,
    pub actions: Vec<BookmarkAction>,
    normalized_filter: String,
}

impl SearchRecord {
    pub fn from_raw(raw: &RawBookmark) -> Self {
        let display = if raw.title.is_empty() {
            raw.url.clone()
        } else {
            raw.title.clone()
        };
        // Star marks favourites, like the Readeck UI does.
        let title = if raw.is_marked {
            format!("⭐ {display}")
        } else {
            display
        };

        let labels = raw.labels.join(",");
        let subtitle = format!("{labels}: {}", raw.url);
        let filter = format!("{},{},{labels}", raw.url, raw.title);
        let normalized_filter = normalize_for_search(&filter);

        let actions = vec![
            BookmarkAction::OpenInReadeck {
                url: reader_url(&raw.href),
            },
            BookmarkAction::OpenSourceUrl {
                url: raw.url.clone(),
            },
            BookmarkAction::CopyUrl {
                url: raw.url.clone(),
            },
            BookmarkAction::Archive { id: raw.id.clone() },
            BookmarkAction::Delete { id: raw.id.clone() },
        ];

        Self {
            id: raw.id.clone(),
            title,
            subtitle,
            url: raw.url.clone(),
            filter,
            actions,
            normalized_filter,
        }
    }

    pub fn normalized_filter(&self) -> &str {
        &self.normalized_filter
    }
}

/// The API self-link points at `/api/bookmarks/{id}`; the reader view lives
/// at the same path without the `/api` segment.
pub fn reader_url(href: &str) -> String {
    href.replacen("/api", "", 1)
}

pub fn normalize_for_search(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(|c| c.to_lowercase())
        .collect()
}
