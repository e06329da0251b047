//! Domain types for a remote lock/unlock action.
//!
//! # Design
//! `AuthContext` and `VehicleRef` are per-request inputs consumed once by the
//! request builder. `ActionOutcome` is the only output of normalization. None
//! of them outlive a single remote action.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identity and credentials used to authenticate against the backend.
///
/// `Debug` redacts the PIN and session token so the value can sit in a
/// tracing span without leaking credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub username: String,
    /// Only sent for [`LockDirective::Unlock`].
    pub pin: String,
    /// Opaque pre-issued credential; travels both as the `token` query
    /// parameter and as the session cookie.
    pub session_token: String,
}

impl AuthContext {
    pub fn new(
        username: impl Into<String>,
        pin: impl Into<String>,
        session_token: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            pin: pin.into(),
            session_token: session_token.into(),
        }
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("username", &self.username)
            .field("pin", &"[REDACTED]")
            .field("session_token", &"[REDACTED]")
            .finish()
    }
}

/// Identifies the target vehicle. All three values are opaque to us and are
/// passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleRef {
    pub registration_id: String,
    pub vin: String,
    pub generation: String,
}

impl VehicleRef {
    pub fn new(
        registration_id: impl Into<String>,
        vin: impl Into<String>,
        generation: impl Into<String>,
    ) -> Self {
        Self {
            registration_id: registration_id.into(),
            vin: vin.into(),
            generation: generation.into(),
        }
    }
}

/// Lock or unlock intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockDirective {
    Lock,
    Unlock,
}

impl LockDirective {
    /// Backend service name for this directive.
    pub fn service_token(&self) -> &'static str {
        match self {
            LockDirective::Lock => "remotelock",
            LockDirective::Unlock => "remoteunlock",
        }
    }

    /// The backend rejects (or misbehaves on) a lock that carries a PIN, so
    /// only unlock sends one.
    pub fn sends_pin(&self) -> bool {
        matches!(self, LockDirective::Unlock)
    }
}

impl fmt::Display for LockDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.service_token())
    }
}

/// Structured diagnostic record the backend sometimes returns in place of a
/// plain string. Missing members decode to zero values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorDetail {
    pub error_sub_code: String,
    pub system_name: String,
    pub function_name: String,
    pub error_message: String,
    /// Any integral JSON number in range; anything else reads as 0 so the
    /// other members survive.
    #[serde(deserialize_with = "lenient_error_code")]
    pub error_code: i32,
    pub service_name: String,
}

fn lenient_error_code<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(integral_i32(&value).unwrap_or_default())
}

fn integral_i32(value: &Value) -> Option<i32> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(n) = number.as_i64() {
        return i32::try_from(n).ok();
    }
    if let Some(n) = number.as_u64() {
        return i32::try_from(n).ok();
    }
    let n = number.as_f64()?;
    let in_range = n >= f64::from(i32::MIN) && n <= f64::from(i32::MAX);
    (n.fract() == 0.0 && in_range).then_some(n as i32)
}

/// The backend's third response field, in whichever shape it arrived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResponseDetail {
    /// Field missing, `null`, or of a shape we do not recognise.
    #[default]
    Absent,
    /// Plain diagnostic string.
    Message(String),
    Structured(ErrorDetail),
}

impl ResponseDetail {
    /// The structured record, or an all-zero one when the backend sent a
    /// plain string or nothing.
    pub fn structured_or_default(&self) -> ErrorDetail {
        match self {
            ResponseDetail::Structured(detail) => detail.clone(),
            ResponseDetail::Message(_) | ResponseDetail::Absent => ErrorDetail::default(),
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            ResponseDetail::Absent => "absent",
            ResponseDetail::Message(_) => "message",
            ResponseDetail::Structured(_) => "structured",
        }
    }
}

/// Normalized result of one remote action.
///
/// A backend rejection is still an `ActionOutcome`; callers branch on
/// `result_code` / `failure_message`, not on call failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionOutcome {
    pub result_code: String,
    pub failure_message: String,
    pub detail: ResponseDetail,
}

impl ActionOutcome {
    /// Whether the backend reported success. The backend spells the token in
    /// lower case, but nothing guarantees that.
    pub fn succeeded(&self) -> bool {
        self.result_code.eq_ignore_ascii_case("success")
    }
}
