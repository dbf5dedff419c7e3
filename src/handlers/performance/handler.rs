//! Performance handler implementations

use std::sync::Arc;

use crate::{
    envelope::OperationResult,
    middleware::RequestParams,
    services::PerformanceService,
};

use super::{
    request::{PerformanceParams, ScorePerformanceParams},
    response::PerformanceResponse,
};

/// Handler group serving performance calculations
pub struct PerformanceHandler {
    service: Arc<PerformanceService>,
}

impl PerformanceHandler {
    pub fn new(service: Arc<PerformanceService>) -> Self {
        Self { service }
    }

    /// Performance of a play described in the request
    pub async fn calculate(
        self: Arc<Self>,
        params: RequestParams,
    ) -> OperationResult<PerformanceResponse> {
        let query = match params.decode::<PerformanceParams>().and_then(PerformanceParams::into_query) {
            Ok(query) => query,
            Err(e) => return e.into(),
        };

        self.service.calculate(&query).await
    }

    /// Performance of a player's best stored play
    pub async fn score(self: Arc<Self>, params: RequestParams) -> OperationResult<PerformanceResponse> {
        let query = match params
            .decode::<ScorePerformanceParams>()
            .and_then(ScorePerformanceParams::into_query)
        {
            Ok(query) => query,
            Err(e) => return e.into(),
        };

        self.service.score_performance(&query).await
    }
}
