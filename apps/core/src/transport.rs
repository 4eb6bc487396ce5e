use serde::{Deserialize, Serialize};

use crate::contract::{
    CoreRequest, CoreResponse, MutateResponse, RefreshResponse, SearchResponse, SearchResultDto,
};
use crate::core_service::{CoreService, ServiceError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    ItemNotFound,
    Remote,
    Config,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransportResponse {
    Ok { response: CoreResponse },
    Err { error: ErrorResponse },
}

pub fn handle_request(service: &CoreService, request: CoreRequest) -> TransportResponse {
    let result = match request {
        CoreRequest::Search(request) => {
            let results: Vec<SearchResultDto> = service
                .search(&request.query, request.limit.unwrap_or(0))
                .iter()
                .map(SearchResultDto::from)
                .collect();
            Ok(CoreResponse::Search(SearchResponse { results }))
        }
        CoreRequest::Refresh => Ok(CoreResponse::Refresh(RefreshResponse {
            indexed: service.refresh_now(),
        })),
        CoreRequest::Archive(request) => service
            .archive(&request.id)
            .map(|()| CoreResponse::Archive(MutateResponse { refreshed: true })),
        CoreRequest::Delete(request) => service
            .delete(&request.id)
            .map(|()| CoreResponse::Delete(MutateResponse { refreshed: true })),
    };

    match result {
        Ok(response) => TransportResponse::Ok { response },
        Err(error) => TransportResponse::Err {
            error: map_service_error(error),
        },
    }
}

pub fn handle_json(service: &CoreService, payload: &str) -> String {
    let response = match serde_json::from_str::<CoreRequest>(payload) {
        Ok(request) => handle_request(service, request),
        Err(error) => TransportResponse::Err {
            error: ErrorResponse {
                code: ErrorCode::InvalidJson,
                message: error.to_string(),
            },
        },
    };

    serde_json::to_string(&response).expect("transport response should serialize")
}

fn map_service_error(error: ServiceError) -> ErrorResponse {
    match error {
        ServiceError::Config(message) => ErrorResponse {
            code: ErrorCode::Config,
            message,
        },
        ServiceError::Remote(error) => ErrorResponse {
            code: ErrorCode::Remote,
            message: error.to_string(),
        },
        ServiceError::ItemNotFound(id) => ErrorResponse {
            code: ErrorCode::ItemNotFound,
            message: id,
        },
    }
}
