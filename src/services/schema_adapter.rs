//! Translation between the two boundary schemas of a talent-pool entry and
//! the canonical [`CandidateRecord`].
//!
//! The screen speaks camelCase (`status`, `position`, `recruitmentChannel`,
//! `operator`, string ids); the backend speaks an abbreviated schema
//! (`statue`, `job`, `channel`, `inputer`, numeric ids). Every conversion
//! between them goes through this module.

use serde_json::{Map, Value};

use crate::dto::talent_dto::{
    ClientRecord, ClientSearchParams, ServerQueryParams, ServerRecord, UpdateTalentPayload,
    WireId, CreateTalentPayload,
};
use crate::error::{Error, Result};
use crate::models::talent::{
    CandidateRecord, Gender, NewTalent, RecruitmentChannel, TalentId, TalentPatch, TalentStatus,
};
use crate::services::query_engine::{DateRange, PageRequest, TalentFilter};
use crate::utils::time::{format_date, parse_date};

/// A field known under two names: the canonical (screen) one and the backend one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAlias {
    pub canonical: &'static str,
    pub server: &'static str,
}

pub const FIELD_ALIASES: [FieldAlias; 5] = [
    FieldAlias { canonical: "id", server: "id" },
    FieldAlias { canonical: "status", server: "statue" },
    FieldAlias { canonical: "position", server: "job" },
    FieldAlias { canonical: "recruitmentChannel", server: "channel" },
    FieldAlias { canonical: "operator", server: "inputer" },
];

/// Backend fields with a different name but no aliasing ambiguity.
const SERVER_RENAMES: [FieldAlias; 2] = [
    FieldAlias { canonical: "createTime", server: "create_date" },
    FieldAlias { canonical: "analysisTaskId", server: "analysis_task_id" },
];

const CLIENT_ONLY_FIELDS: [&str; 8] = [
    "status",
    "position",
    "recruitmentChannel",
    "operator",
    "entryTime",
    "createTime",
    "updateTime",
    "analysisTaskId",
];

const SERVER_ONLY_FIELDS: [&str; 5] =
    ["job", "channel", "inputer", "create_date", "analysis_task_id"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordShape {
    Client,
    Server,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnyRecord {
    Client(ClientRecord),
    Server(ServerRecord),
}

impl AnyRecord {
    pub fn shape(&self) -> RecordShape {
        match self {
            AnyRecord::Client(_) => RecordShape::Client,
            AnyRecord::Server(_) => RecordShape::Server,
        }
    }

    /// Reads a payload of either schema. A payload using only backend names is
    /// read as a [`ServerRecord`]; anything else is read as a [`ClientRecord`],
    /// with backend names filling in canonical fields that are absent.
    pub fn from_json(value: Value) -> Result<Self> {
        let mut map = match value {
            Value::Object(map) => map,
            other => {
                return Err(Error::validation(format!(
                    "Talent payload must be a JSON object, got {}",
                    other
                )))
            }
        };

        let has_client = CLIENT_ONLY_FIELDS.iter().any(|k| is_present(&map, k));
        let has_server = SERVER_ONLY_FIELDS.iter().any(|k| is_present(&map, k));
        if has_server && !has_client {
            return Ok(AnyRecord::Server(serde_json::from_value(Value::Object(map))?));
        }

        for alias in FIELD_ALIASES.iter().chain(SERVER_RENAMES.iter()) {
            if alias.canonical == alias.server {
                continue;
            }
            let fallback = map.remove(alias.server);
            if is_present(&map, alias.canonical) {
                continue;
            }
            if let Some(value) = fallback.filter(|v| !is_blank(v)) {
                map.insert(alias.canonical.to_string(), value);
            }
        }
        Ok(AnyRecord::Client(serde_json::from_value(Value::Object(map))?))
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn is_present(map: &Map<String, Value>, key: &str) -> bool {
    map.get(key).map(|v| !is_blank(v)).unwrap_or(false)
}

/// Canonical field first, alias only when the canonical one is absent or blank.
fn pick<'a>(canonical: Option<&'a str>, alias: Option<&'a str>) -> Option<&'a str> {
    let present = |v: Option<&'a str>| v.filter(|s| !s.trim().is_empty());
    present(canonical).or_else(|| present(alias))
}

fn text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn wire_id_string(id: Option<WireId>) -> Option<String> {
    id.map(WireId::into_string).filter(|s| !s.trim().is_empty())
}

pub fn to_canonical(record: AnyRecord) -> CandidateRecord {
    match record {
        AnyRecord::Client(c) => {
            let status = pick(c.status.as_deref(), c.statue.as_deref())
                .and_then(TalentStatus::from_label)
                .unwrap_or_default();
            CandidateRecord {
                id: TalentId::new(wire_id_string(c.id).unwrap_or_default()),
                name: text(c.name),
                gender: c.gender.as_deref().and_then(Gender::from_label).unwrap_or_default(),
                phone: text(c.phone),
                position: text(c.position),
                recruitment_channel: c
                    .recruitment_channel
                    .as_deref()
                    .and_then(RecruitmentChannel::from_label)
                    .unwrap_or_default(),
                status,
                entry_time: c.entry_time,
                operator: text(c.operator),
                create_time: c.create_time,
                update_time: c.update_time,
                analysis_task_id: wire_id_string(c.analysis_task_id),
            }
        }
        AnyRecord::Server(s) => CandidateRecord {
            id: TalentId::new(wire_id_string(s.id).unwrap_or_default()),
            name: text(s.name),
            gender: s.gender.as_deref().and_then(Gender::from_label).unwrap_or_default(),
            phone: text(s.phone),
            position: text(s.job),
            recruitment_channel: s
                .channel
                .as_deref()
                .and_then(RecruitmentChannel::from_label)
                .unwrap_or_default(),
            status: s
                .statue
                .as_deref()
                .and_then(TalentStatus::from_label)
                .unwrap_or_default(),
            entry_time: None,
            operator: text(s.inputer),
            create_time: s.create_date.as_deref().and_then(parse_date),
            update_time: None,
            analysis_task_id: wire_id_string(s.analysis_task_id),
        },
    }
}

pub fn from_canonical(record: &CandidateRecord, shape: RecordShape) -> AnyRecord {
    match shape {
        RecordShape::Client => AnyRecord::Client(to_client(record)),
        RecordShape::Server => AnyRecord::Server(to_server(record)),
    }
}

pub fn to_client(record: &CandidateRecord) -> ClientRecord {
    ClientRecord {
        id: Some(WireId::Text(record.id.to_string())),
        name: Some(record.name.clone()),
        gender: Some(record.gender.label().to_string()),
        phone: Some(record.phone.clone()),
        position: Some(record.position.clone()),
        recruitment_channel: Some(record.recruitment_channel.label().to_string()),
        status: Some(record.status.label().to_string()),
        statue: None,
        entry_time: record.entry_time,
        operator: Some(record.operator.clone()),
        create_time: record.create_time,
        update_time: record.update_time,
        analysis_task_id: record
            .analysis_task_id
            .as_ref()
            .map(|t| WireId::Text(t.clone())),
    }
}

pub fn to_server(record: &CandidateRecord) -> ServerRecord {
    ServerRecord {
        id: (!record.id.is_empty()).then(|| WireId::from_canonical(record.id.as_str())),
        name: Some(record.name.clone()),
        gender: Some(record.gender.label().to_string()),
        phone: Some(record.phone.clone()),
        job: Some(record.position.clone()),
        channel: Some(record.recruitment_channel.label().to_string()),
        statue: Some(record.status.label().to_string()),
        inputer: Some(record.operator.clone()),
        analysis_task_id: record
            .analysis_task_id
            .as_deref()
            .map(WireId::from_canonical),
        create_date: record.create_time.map(format_date),
    }
}

/// Numeric id the backend requires for updates and deletes.
pub fn server_id(id: &TalentId) -> Result<i64> {
    if id.is_empty() {
        return Err(Error::validation("Talent id is required"));
    }
    id.as_numeric().ok_or_else(|| {
        Error::validation(format!("Talent id `{}` is not a valid backend id", id))
    })
}

pub fn server_ids(ids: &[TalentId]) -> Result<Vec<i64>> {
    ids.iter().map(server_id).collect()
}

fn parse_status(raw: &str) -> Result<TalentStatus> {
    TalentStatus::from_label(raw)
        .ok_or_else(|| Error::validation(format!("Unknown talent status: {}", raw)))
}

fn parse_channel(raw: &str) -> Result<RecruitmentChannel> {
    RecruitmentChannel::from_label(raw)
        .ok_or_else(|| Error::validation(format!("Unknown recruitment channel: {}", raw)))
}

fn parse_gender(raw: &str) -> Result<Gender> {
    Gender::from_label(raw).ok_or_else(|| Error::validation(format!("Unknown gender: {}", raw)))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// Labels in a create payload are checked strictly; only absent ones default.
pub fn new_talent_from_client(payload: CreateTalentPayload) -> Result<NewTalent> {
    Ok(NewTalent {
        gender: non_blank(payload.gender.as_deref())
            .map(parse_gender)
            .transpose()?
            .unwrap_or_default(),
        recruitment_channel: parse_channel(&payload.recruitment_channel)?,
        status: non_blank(payload.status.as_deref())
            .map(parse_status)
            .transpose()?
            .unwrap_or_default(),
        name: payload.name,
        phone: payload.phone,
        position: payload.position,
        entry_time: payload.entry_time,
        operator: payload.operator,
        analysis_task_id: wire_id_string(payload.analysis_task_id),
    })
}

fn label_or_default<T: Default>(
    raw: Option<&str>,
    parse: fn(&str) -> Result<T>,
) -> Result<T> {
    Ok(non_blank(raw).map(parse).transpose()?.unwrap_or_default())
}

/// Builds an insert from a record of either schema. Unlike [`to_canonical`],
/// unknown labels are rejected; only absent ones default.
pub fn new_talent_from_record(record: AnyRecord) -> Result<NewTalent> {
    match record {
        AnyRecord::Client(c) => Ok(NewTalent {
            gender: label_or_default(c.gender.as_deref(), parse_gender)?,
            recruitment_channel: label_or_default(c.recruitment_channel.as_deref(), parse_channel)?,
            status: label_or_default(pick(c.status.as_deref(), c.statue.as_deref()), parse_status)?,
            name: text(c.name),
            phone: text(c.phone),
            position: text(c.position),
            entry_time: c.entry_time,
            operator: text(c.operator),
            analysis_task_id: wire_id_string(c.analysis_task_id),
        }),
        AnyRecord::Server(s) => Ok(NewTalent {
            gender: label_or_default(s.gender.as_deref(), parse_gender)?,
            recruitment_channel: label_or_default(s.channel.as_deref(), parse_channel)?,
            status: label_or_default(s.statue.as_deref(), parse_status)?,
            name: text(s.name),
            phone: text(s.phone),
            position: text(s.job),
            entry_time: None,
            operator: text(s.inputer),
            analysis_task_id: wire_id_string(s.analysis_task_id),
        }),
    }
}

pub fn new_talent_to_server(new: &NewTalent) -> ServerRecord {
    ServerRecord {
        id: None,
        name: Some(new.name.clone()),
        gender: Some(new.gender.label().to_string()),
        phone: Some(new.phone.clone()),
        job: Some(new.position.clone()),
        channel: Some(new.recruitment_channel.label().to_string()),
        statue: Some(new.status.label().to_string()),
        inputer: Some(new.operator.clone()),
        analysis_task_id: new.analysis_task_id.as_deref().map(WireId::from_canonical),
        create_date: None,
    }
}

impl From<UpdateTalentPayload> for ClientRecord {
    fn from(payload: UpdateTalentPayload) -> Self {
        Self {
            id: payload.id,
            name: payload.name,
            gender: payload.gender,
            phone: payload.phone,
            position: payload.position,
            recruitment_channel: payload.recruitment_channel,
            status: payload.status,
            statue: payload.statue,
            entry_time: payload.entry_time,
            operator: payload.operator,
            create_time: None,
            update_time: None,
            analysis_task_id: payload.analysis_task_id,
        }
    }
}

/// Splits a partial record of either schema into its id and the fields to
/// merge. Fails when the id is missing; labels are checked strictly.
pub fn patch_from_record(record: AnyRecord) -> Result<(TalentId, TalentPatch)> {
    let (id, patch) = match record {
        AnyRecord::Client(c) => {
            let status = pick(c.status.as_deref(), c.statue.as_deref())
                .map(parse_status)
                .transpose()?;
            let patch = TalentPatch {
                gender: non_blank(c.gender.as_deref()).map(parse_gender).transpose()?,
                recruitment_channel: non_blank(c.recruitment_channel.as_deref())
                    .map(parse_channel)
                    .transpose()?,
                status,
                name: c.name,
                phone: c.phone,
                position: c.position,
                entry_time: c.entry_time,
                operator: c.operator,
                analysis_task_id: wire_id_string(c.analysis_task_id),
            };
            (c.id, patch)
        }
        AnyRecord::Server(s) => {
            let patch = TalentPatch {
                gender: non_blank(s.gender.as_deref()).map(parse_gender).transpose()?,
                recruitment_channel: non_blank(s.channel.as_deref())
                    .map(parse_channel)
                    .transpose()?,
                status: non_blank(s.statue.as_deref()).map(parse_status).transpose()?,
                name: s.name,
                phone: s.phone,
                position: s.job,
                entry_time: None,
                operator: s.inputer,
                analysis_task_id: wire_id_string(s.analysis_task_id),
            };
            (s.id, patch)
        }
    };

    let id = wire_id_string(id)
        .ok_or_else(|| Error::validation("Talent id is required for updates"))?;
    Ok((TalentId::new(id), patch))
}

/// Backend body of an update. The backend has no entry-time field, so an entry
/// time in the patch is not forwarded.
pub fn patch_to_server(id: &TalentId, patch: &TalentPatch) -> Result<ServerRecord> {
    Ok(ServerRecord {
        id: Some(WireId::Num(server_id(id)?)),
        name: patch.name.clone(),
        gender: patch.gender.map(|g| g.label().to_string()),
        phone: patch.phone.clone(),
        job: patch.position.clone(),
        channel: patch.recruitment_channel.map(|c| c.label().to_string()),
        statue: patch.status.map(|s| s.label().to_string()),
        inputer: patch.operator.clone(),
        analysis_task_id: patch.analysis_task_id.as_deref().map(WireId::from_canonical),
        create_date: None,
    })
}

/// Resolves a status given under either name, for batch requests.
pub fn status_from_aliases(
    status: Option<&str>,
    statue: Option<&str>,
) -> Result<Option<TalentStatus>> {
    pick(status, statue).map(parse_status).transpose()
}

fn date_range(start: Option<&str>, end: Option<&str>) -> Result<Option<DateRange>> {
    let parse = |raw: &str| {
        parse_date(raw).ok_or_else(|| Error::validation(format!("Invalid date: {}", raw)))
    };
    match (non_blank(start), non_blank(end)) {
        (Some(start), Some(end)) => Ok(Some(DateRange {
            start: parse(start)?,
            end: parse(end)?,
        })),
        _ => Ok(None),
    }
}

fn keyword(raw: Option<&str>) -> Option<String> {
    raw.filter(|k| !k.is_empty()).map(str::to_string)
}

pub fn search_from_client(
    params: &ClientSearchParams,
    default_page_size: i64,
) -> Result<(TalentFilter, PageRequest)> {
    let filter = TalentFilter {
        id: non_blank(params.id.as_deref()).map(TalentId::from),
        keyword: keyword(params.keyword.as_deref()),
        status: status_from_aliases(params.status.as_deref(), params.statue.as_deref())?,
        channel: non_blank(params.recruitment_channel.as_deref())
            .map(parse_channel)
            .transpose()?,
        date_range: date_range(
            pick(params.start_time.as_deref(), params.start_date.as_deref()),
            pick(params.end_time.as_deref(), params.end_date.as_deref()),
        )?,
    };
    let page = PageRequest::new(
        params.current.or(params.page).unwrap_or(1),
        params.page_size.or(params.per_page).unwrap_or(default_page_size),
    );
    Ok((filter, page))
}

pub fn search_from_server(
    params: &ServerQueryParams,
    default_page_size: i64,
) -> Result<(TalentFilter, PageRequest)> {
    let filter = TalentFilter {
        id: non_blank(params.id.as_deref()).map(TalentId::from),
        keyword: keyword(params.keyword.as_deref()),
        status: non_blank(params.statue.as_deref()).map(parse_status).transpose()?,
        channel: non_blank(params.channel.as_deref()).map(parse_channel).transpose()?,
        date_range: date_range(params.start_date.as_deref(), params.end_date.as_deref())?,
    };
    let page = PageRequest::new(
        params.page.unwrap_or(1),
        params.per_page.unwrap_or(default_page_size),
    );
    Ok((filter, page))
}

pub fn search_to_server(filter: &TalentFilter, page: PageRequest) -> ServerQueryParams {
    ServerQueryParams {
        id: filter.id.as_ref().map(|id| id.to_string()),
        keyword: filter.keyword.clone().filter(|k| !k.is_empty()),
        statue: filter.status.map(|s| s.label().to_string()),
        channel: filter.channel.map(|c| c.label().to_string()),
        page: Some(page.page),
        per_page: Some(page.page_size),
        start_date: filter.date_range.map(|r| format_date(r.start)),
        end_date: filter.date_range.map(|r| format_date(r.end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn server_record() -> ServerRecord {
        ServerRecord {
            id: Some(WireId::Num(17)),
            name: Some("李娜".into()),
            gender: Some("女".into()),
            phone: Some("15912345678".into()),
            job: Some("数据分析师".into()),
            channel: Some("猎聘网".into()),
            statue: Some("安排面试".into()),
            inputer: Some("小李".into()),
            analysis_task_id: Some(WireId::Num(301)),
            create_date: Some("2024-02-29".into()),
        }
    }

    #[test]
    fn server_round_trip_reproduces_aliased_fields() {
        let original = server_record();
        let canonical = to_canonical(AnyRecord::Server(original.clone()));
        assert_eq!(canonical.id, TalentId::from(17));
        assert_eq!(canonical.position, "数据分析师");
        assert_eq!(canonical.recruitment_channel, RecruitmentChannel::Liepin);
        assert_eq!(canonical.status, TalentStatus::InterviewScheduled);
        assert_eq!(canonical.operator, "小李");

        match from_canonical(&canonical, RecordShape::Server) {
            AnyRecord::Server(back) => assert_eq!(back, original),
            other => panic!("unexpected shape {:?}", other.shape()),
        }
    }

    #[test]
    fn server_records_map_to_client_names() {
        let canonical = to_canonical(AnyRecord::Server(server_record()));
        let client = to_client(&canonical);
        let value = serde_json::to_value(&client).unwrap();
        assert_eq!(value["id"], json!("17"));
        assert_eq!(value["position"], json!("数据分析师"));
        assert_eq!(value["recruitmentChannel"], json!("猎聘网"));
        assert_eq!(value["status"], json!("安排面试"));
        assert_eq!(value["operator"], json!("小李"));
        assert_eq!(value["createTime"], json!("2024-02-29"));
        assert_eq!(value["updateTime"], json!(""));
        assert!(value.get("statue").is_none());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let canonical = to_canonical(AnyRecord::Server(ServerRecord {
            id: Some(WireId::Num(1)),
            ..ServerRecord::default()
        }));
        assert_eq!(canonical.gender, Gender::Undisclosed);
        assert_eq!(canonical.status, TalentStatus::NewCandidate);
        assert_eq!(canonical.recruitment_channel, RecruitmentChannel::Other);
        assert_eq!(canonical.name, "");
        assert_eq!(canonical.create_time, None);
        assert_eq!(canonical.update_time, None);
    }

    #[test]
    fn canonical_name_wins_over_alias() {
        let record = AnyRecord::from_json(json!({
            "id": "4",
            "status": "面试通过",
            "statue": "已淘汰",
            "position": "项目经理",
            "job": "运维工程师",
            "inputer": "小王"
        }))
        .unwrap();
        assert_eq!(record.shape(), RecordShape::Client);

        let canonical = to_canonical(record);
        assert_eq!(canonical.status, TalentStatus::InterviewPassed);
        assert_eq!(canonical.position, "项目经理");
        // operator absent, so the backend name fills it
        assert_eq!(canonical.operator, "小王");
    }

    #[test]
    fn alias_used_when_canonical_is_blank() {
        let canonical = to_canonical(AnyRecord::Client(ClientRecord {
            status: Some(String::new()),
            statue: Some("待入职".into()),
            ..ClientRecord::default()
        }));
        assert_eq!(canonical.status, TalentStatus::PendingEntry);
    }

    #[test]
    fn backend_only_payload_is_read_as_server_shape() {
        let record = AnyRecord::from_json(json!({
            "id": 9,
            "name": "赵强",
            "job": "测试工程师",
            "statue": "初选通过",
            "create_date": "2024-01-05 09:00:00"
        }))
        .unwrap();
        assert_eq!(record.shape(), RecordShape::Server);
        let canonical = to_canonical(record);
        assert_eq!(canonical.id, TalentId::from(9));
        assert_eq!(canonical.create_time, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert!(AnyRecord::from_json(json!([1, 2])).is_err());
    }

    #[test]
    fn mutations_need_a_numeric_backend_id() {
        assert_eq!(server_id(&TalentId::from(5)).unwrap(), 5);
        assert!(matches!(server_id(&TalentId::new("")), Err(Error::Validation(_))));
        assert!(matches!(server_id(&TalentId::new("talent_5")), Err(Error::Validation(_))));
        assert!(server_ids(&[TalentId::from(1), TalentId::new("x")]).is_err());
    }

    #[test]
    fn patch_requires_id_and_keeps_only_supplied_fields() {
        let missing = patch_from_record(AnyRecord::Client(ClientRecord {
            name: Some("x".into()),
            ..ClientRecord::default()
        }));
        assert!(matches!(missing, Err(Error::Validation(_))));

        let (id, patch) = patch_from_record(AnyRecord::Server(ServerRecord {
            id: Some(WireId::Num(3)),
            statue: Some("已发offer".into()),
            ..ServerRecord::default()
        }))
        .unwrap();
        assert_eq!(id, TalentId::from(3));
        assert_eq!(patch, TalentPatch::status(TalentStatus::OfferSent));

        let body = patch_to_server(&id, &patch).unwrap();
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"id": 3, "statue": "已发offer"})
        );
    }

    #[test]
    fn patch_rejects_unknown_labels() {
        let result = patch_from_record(AnyRecord::Client(ClientRecord {
            id: Some(WireId::Text("3".into())),
            status: Some("hired".into()),
            ..ClientRecord::default()
        }));
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn insert_from_server_record_needs_no_entry_time() {
        let new = new_talent_from_record(AnyRecord::Server(ServerRecord {
            statue: Some("待入职".into()),
            ..server_record()
        }))
        .unwrap();
        assert_eq!(new.status, TalentStatus::PendingEntry);
        assert_eq!(new.entry_time, None);
        assert_eq!(new.position, "数据分析师");
        assert_eq!(new.recruitment_channel, RecruitmentChannel::Liepin);
        assert_eq!(new.analysis_task_id.as_deref(), Some("301"));

        let bare = new_talent_from_record(AnyRecord::Server(ServerRecord::default())).unwrap();
        assert_eq!(bare.status, TalentStatus::NewCandidate);
        assert_eq!(bare.gender, Gender::Undisclosed);
    }

    #[test]
    fn insert_from_record_rejects_unknown_labels() {
        let bad_gender = ServerRecord {
            gender: Some("未知".into()),
            ..server_record()
        };
        let bad_channel = ServerRecord {
            channel: Some("街头".into()),
            ..server_record()
        };
        let bad_status = ServerRecord {
            statue: Some("录用".into()),
            ..server_record()
        };
        for record in [bad_gender, bad_channel, bad_status] {
            assert!(matches!(
                new_talent_from_record(AnyRecord::Server(record)),
                Err(Error::Validation(_))
            ));
        }

        let client = new_talent_from_record(AnyRecord::Client(ClientRecord {
            name: Some("王芳".into()),
            statue: Some("录用".into()),
            ..ClientRecord::default()
        }));
        assert!(matches!(client, Err(Error::Validation(_))));
    }

    #[test]
    fn client_search_prefers_camel_case_names() {
        let params = ClientSearchParams {
            keyword: Some("张".into()),
            status: Some("待入职".into()),
            statue: Some("已淘汰".into()),
            recruitment_channel: Some("Boss直聘".into()),
            start_time: Some("2024-06-01".into()),
            end_time: Some("2024-06-30".into()),
            start_date: Some("2020-01-01".into()),
            current: Some(2),
            page: Some(9),
            per_page: Some(20),
            ..ClientSearchParams::default()
        };
        let (filter, page) = search_from_client(&params, 10).unwrap();
        assert_eq!(filter.status, Some(TalentStatus::PendingEntry));
        assert_eq!(filter.channel, Some(RecruitmentChannel::BossZhipin));
        assert_eq!(
            filter.date_range,
            Some(DateRange {
                start: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            })
        );
        assert_eq!(page, PageRequest::new(2, 20));

        let server = search_to_server(&filter, page);
        assert_eq!(server.statue.as_deref(), Some("待入职"));
        assert_eq!(server.per_page, Some(20));
        assert_eq!(server.start_date.as_deref(), Some("2024-06-01"));
    }

    #[test]
    fn half_date_range_and_empty_values_are_ignored() {
        let params = ClientSearchParams {
            keyword: Some(String::new()),
            status: Some(String::new()),
            start_time: Some("2024-06-01".into()),
            ..ClientSearchParams::default()
        };
        let (filter, page) = search_from_client(&params, 10).unwrap();
        assert_eq!(filter, TalentFilter::default());
        assert_eq!(page, PageRequest::new(1, 10));
    }

    #[test]
    fn server_search_rejects_bad_values() {
        let bad_status = ServerQueryParams {
            statue: Some("hired".into()),
            ..ServerQueryParams::default()
        };
        assert!(matches!(search_from_server(&bad_status, 10), Err(Error::Validation(_))));

        let bad_date = ServerQueryParams {
            start_date: Some("2024-13-01".into()),
            end_date: Some("2024-12-01".into()),
            ..ServerQueryParams::default()
        };
        assert!(matches!(search_from_server(&bad_date, 10), Err(Error::Validation(_))));
    }
}
