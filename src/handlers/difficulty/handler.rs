//! Difficulty handler implementations

use std::sync::Arc;

use crate::{
    envelope::OperationResult,
    middleware::RequestParams,
    services::DifficultyService,
};

use super::{request::DifficultyParams, response::DifficultyAttributesResponse};

/// Handler group serving difficulty attributes
pub struct DifficultyHandler {
    service: Arc<DifficultyService>,
}

impl DifficultyHandler {
    pub fn new(service: Arc<DifficultyService>) -> Self {
        Self { service }
    }

    /// Difficulty attributes of a beatmap
    pub async fn attributes(
        self: Arc<Self>,
        params: RequestParams,
    ) -> OperationResult<DifficultyAttributesResponse> {
        let query = match params.decode::<DifficultyParams>().and_then(DifficultyParams::into_query) {
            Ok(query) => query,
            Err(e) => return e.into(),
        };

        self.service.attributes(&query).await
    }
}
