//! `remote_action.v1` RPC messages.
//!
//! # Design
//! Served as JSON over HTTP/1 at the gRPC method path. Field names follow the
//! proto3 JSON mapping of the message definitions, so clients using a JSON
//! codec (Connect-style) can call it; protobuf-over-HTTP/2 gRPC clients
//! cannot. Missing members decode to their zero value, as proto3 does. These
//! are data contracts; the domain types live in `remote-action-core`.

use remote_action_core::{ActionOutcome, AuthContext, ErrorDetail, LockDirective, VehicleRef};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Fully-qualified path of the `ToggleLock` method.
pub const TOGGLE_LOCK_PATH: &str = "/remote_action.v1.RemoteActionService/ToggleLock";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockAction {
    #[default]
    #[serde(rename = "LOCK_ACTION_UNSPECIFIED")]
    Unspecified,
    #[serde(rename = "LOCK_ACTION_LOCK")]
    Lock,
    #[serde(rename = "LOCK_ACTION_UNLOCK")]
    Unlock,
}

impl LockAction {
    pub fn directive(self) -> Option<LockDirective> {
        match self {
            LockAction::Unspecified => None,
            LockAction::Lock => Some(LockDirective::Lock),
            LockAction::Unlock => Some(LockDirective::Unlock),
        }
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToggleLockRequest {
    pub username: String,
    pub jwt_token: String,
    pub pin: String,
    pub registration_id: String,
    pub vin: String,
    pub generation: String,
    pub lock_action: LockAction,
}

// Hand-written so request logging never prints credentials.
impl std::fmt::Debug for ToggleLockRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToggleLockRequest")
            .field("username", &self.username)
            .field("registration_id", &self.registration_id)
            .field("vin", &self.vin)
            .field("generation", &self.generation)
            .field("lock_action", &self.lock_action)
            .finish_non_exhaustive()
    }
}

impl ToggleLockRequest {
    /// Split into domain values, rejecting requests the backend could never
    /// accept. Vehicle identifiers are passed through unchecked.
    pub fn into_parts(self) -> Result<(AuthContext, VehicleRef, LockDirective), ServiceError> {
        let directive = self.lock_action.directive().ok_or_else(|| {
            ServiceError::InvalidArgument("lockAction must be LOCK or UNLOCK".to_string())
        })?;
        if self.username.is_empty() {
            return Err(ServiceError::InvalidArgument("username is required".to_string()));
        }
        if self.jwt_token.is_empty() {
            return Err(ServiceError::InvalidArgument("jwtToken is required".to_string()));
        }
        if directive.sends_pin() && self.pin.is_empty() {
            return Err(ServiceError::InvalidArgument(
                "pin is required to unlock".to_string(),
            ));
        }

        Ok((
            AuthContext::new(self.username, self.pin, self.jwt_token),
            VehicleRef::new(self.registration_id, self.vin, self.generation),
            directive,
        ))
    }
}

/// Structured diagnostic block. Always present on the wire, zero-valued when
/// the backend did not send one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseString {
    pub error_sub_code: String,
    pub system_name: String,
    pub function_name: String,
    pub error_message: String,
    pub error_code: i32,
    pub service_name: String,
}

impl From<ErrorDetail> for ResponseString {
    fn from(detail: ErrorDetail) -> Self {
        Self {
            error_sub_code: detail.error_sub_code,
            system_name: detail.system_name,
            function_name: detail.function_name,
            error_message: detail.error_message,
            error_code: detail.error_code,
            service_name: detail.service_name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteActionResponse {
    pub result: String,
    pub fail_msg: String,
    pub response_string: ResponseString,
}

impl From<ActionOutcome> for RemoteActionResponse {
    fn from(outcome: ActionOutcome) -> Self {
        Self {
            response_string: outcome.detail.structured_or_default().into(),
            result: outcome.result_code,
            fail_msg: outcome.failure_message,
        }
    }
}
