use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::time::date_or_empty;
use crate::utils::validation::validate_phone;

/// An id as it travels on the wire: the backend uses numbers, the screen strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Num(i64),
    Text(String),
}

impl WireId {
    pub fn into_string(self) -> String {
        match self {
            WireId::Num(n) => n.to_string(),
            WireId::Text(s) => s,
        }
    }

    /// Numbers stay numbers on the backend side.
    pub fn from_canonical(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(n) => WireId::Num(n),
            Err(_) => WireId::Text(raw.to_string()),
        }
    }
}

/// Camel-cased record the screen works with (`TalentInfo`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    #[serde(default)]
    pub id: Option<WireId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub recruitment_channel: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statue: Option<String>,
    #[serde(default, with = "date_or_empty", skip_serializing_if = "Option::is_none")]
    pub entry_time: Option<NaiveDate>,
    #[serde(default)]
    pub operator: Option<String>,
    #[serde(default, with = "date_or_empty")]
    pub create_time: Option<NaiveDate>,
    #[serde(default, with = "date_or_empty")]
    pub update_time: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_task_id: Option<WireId>,
}

/// Abbreviated record of the talent-pool backend (`TalentItem`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<WireId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_task_id: Option<WireId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_date: Option<String>,
}

/// Search parameters sent by the screen. Both the camel-cased names and the
/// backend names are accepted; the camel-cased one wins when both are set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientSearchParams {
    pub id: Option<String>,
    pub keyword: Option<String>,
    pub status: Option<String>,
    pub statue: Option<String>,
    pub recruitment_channel: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub current: Option<i64>,
    pub page_size: Option<i64>,
    pub page: Option<i64>,
    #[serde(rename = "per_page")]
    pub per_page: Option<i64>,
    #[serde(rename = "start_date")]
    pub start_date: Option<String>,
    #[serde(rename = "end_date")]
    pub end_date: Option<String>,
}

/// Query string of the backend's list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerQueryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientListResponse {
    pub data: Vec<ClientRecord>,
    pub total: i64,
    pub current: i64,
    pub page_size: i64,
}

/// List body of the backend. The misspelled `dates` key is what the backend
/// actually sends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerListResponse {
    #[serde(default)]
    pub dates: Vec<ServerRecord>,
    #[serde(default)]
    pub total: i64,
}

/// Response wrapper used by the backend: `{ code, message, data }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: Some(0),
            message: Some("success".to_string()),
            data,
        }
    }
}

/// Bodies coming back from the backend, wrapped or not.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MaybeEnveloped<T> {
    Wrapped(ApiEnvelope<T>),
    Bare(T),
}

impl<T> MaybeEnveloped<T> {
    pub fn into_inner(self) -> T {
        match self {
            MaybeEnveloped::Wrapped(envelope) => envelope.data,
            MaybeEnveloped::Bare(inner) => inner,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTalentPayload {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Position is required"))]
    pub position: String,
    #[validate(length(min = 1, message = "Recruitment channel is required"))]
    pub recruitment_channel: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, with = "date_or_empty")]
    pub entry_time: Option<NaiveDate>,
    #[validate(length(min = 1, message = "Operator is required"))]
    pub operator: String,
    #[serde(default)]
    pub analysis_task_id: Option<WireId>,
}

/// Partial record; only the supplied fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateTalentPayload {
    pub id: Option<WireId>,
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub gender: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    pub position: Option<String>,
    pub recruitment_channel: Option<String>,
    pub status: Option<String>,
    pub statue: Option<String>,
    #[serde(with = "date_or_empty")]
    pub entry_time: Option<NaiveDate>,
    pub operator: Option<String>,
    pub analysis_task_id: Option<WireId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchStatusPayload {
    pub ids: Vec<WireId>,
    pub status: Option<String>,
    pub statue: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchDeletePayload {
    pub ids: Vec<WireId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedTalentResponse {
    pub success: bool,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: String,
    pub i18n_key: String,
    pub count: i64,
}
