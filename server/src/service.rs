//! `ToggleLock` orchestration: validate, build, send, normalize, map.
//!
//! # Design
//! `ActionService` owns no per-request state. The core builds and parses; the
//! transport moves bytes. Every failure is logged once here and returned
//! whole; nothing is retried and there is no partial success. The outbound
//! call is awaited inside the RPC handler, so a caller that goes away drops
//! the in-flight backend request with it.

use remote_action_core::{
    ActionOutcome, ApiError, AuthContext, LockDirective, RemoteActionClient, VehicleRef,
};
use tracing::{debug, error, field, info, warn, Span};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::ServiceError;
use crate::rpc::{RemoteActionResponse, ToggleLockRequest};
use crate::transport::HttpTransport;

#[derive(Debug, Clone)]
pub struct ActionService {
    client: RemoteActionClient,
    transport: HttpTransport,
}

impl ActionService {
    pub fn new(config: &ServerConfig) -> Result<Self, ServiceError> {
        let transport = HttpTransport::new(config.backend_timeout)?;
        Ok(Self::with_parts(
            RemoteActionClient::new(config.backend.clone()),
            transport,
        ))
    }

    pub fn with_parts(client: RemoteActionClient, transport: HttpTransport) -> Self {
        Self { client, transport }
    }

    #[tracing::instrument(
        name = "toggle_lock",
        skip_all,
        fields(request_id = %Uuid::new_v4(), service = field::Empty)
    )]
    pub async fn toggle_lock(
        &self,
        request: ToggleLockRequest,
    ) -> Result<RemoteActionResponse, ServiceError> {
        let (auth, vehicle, directive) = request.into_parts().map_err(|e| {
            warn!(error = %e, "rejecting toggle lock request");
            e
        })?;
        Span::current().record("service", directive.service_token());
        info!(vin = %vehicle.vin, "processing {directive} request");

        let outcome = self
            .perform(&auth, &vehicle, directive)
            .await
            .map_err(|e| {
                error!(error = %e, kind = e.kind(), "failed to toggle lock");
                ServiceError::from(e)
            })?;

        info!(
            succeeded = outcome.succeeded(),
            result = %outcome.result_code,
            detail = outcome.detail.variant_name(),
            "{directive} request processed"
        );
        Ok(outcome.into())
    }

    /// One backend round trip, without RPC mapping.
    pub async fn perform(
        &self,
        auth: &AuthContext,
        vehicle: &VehicleRef,
        directive: LockDirective,
    ) -> Result<ActionOutcome, ApiError> {
        let request = self.client.build_toggle_lock(auth, vehicle, directive)?;
        debug!(method = request.method.as_str(), "sending remote action");
        let response = self.transport.execute(request).await?;

        debug!(status = response.status, bytes = response.body.len(), "backend replied");
        if !(200..300).contains(&response.status) {
            warn!(status = response.status, "backend replied with non-success status");
        }

        self.client.parse_toggle_lock(response)
    }
}
