use serde::{Deserialize, Serialize};

use crate::model::{BookmarkAction, SearchRecord};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionDto {
    pub kind: String,
    pub target: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResultDto {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub url: String,
    pub actions: Vec<ActionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResponse {
    pub results: Vec<SearchResultDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshResponse {
    pub indexed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MutateRequest {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MutateResponse {
    pub refreshed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum CoreRequest {
    Search(SearchRequest),
    Refresh,
    Archive(MutateRequest),
    Delete(MutateRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum CoreResponse {
    Search(SearchResponse),
    Refresh(RefreshResponse),
    Archive(MutateResponse),
    Delete(MutateResponse),
}

impl From<&SearchRecord> for SearchResultDto {
    fn from(value: &SearchRecord) -> Self {
        Self {
            id: value.id.clone(),
            title: value.title.clone(),
            subtitle: value.subtitle.clone(),
            url: value.url.clone(),
            actions: value.actions.iter().map(action_dto).collect(),
        }
    }
}

fn action_dto(action: &BookmarkAction) -> ActionDto {
    match action {
        BookmarkAction::OpenInReadeck { url } => ActionDto {
            kind: "open_in_readeck".to_string(),
            target: url.clone(),
        },
        BookmarkAction::OpenSourceUrl { url } => ActionDto {
            kind: "open_source_url".to_string(),
            target: url.clone(),
        },
        BookmarkAction::CopyUrl { url } => ActionDto {
            kind: "copy_url".to_string(),
            target: url.clone(),
        },
        BookmarkAction::Archive { id } => ActionDto {
            kind: "archive".to_string(),
            target: id.clone(),
        },
        BookmarkAction::Delete { id } => ActionDto {
            kind: "delete".to_string(),
            target: id.clone(),
        },
    }
}
