use tracing::{debug, info, warn};

use crate::config::{Config, DataSource};
use crate::dto::talent_dto::{
    BatchDeletePayload, BatchStatusPayload, ClientListResponse, ClientSearchParams,
    CreateTalentPayload, ServerListResponse, ServerQueryParams, StatusCount, UpdateTalentPayload,
    WireId,
};
use crate::error::{Error, Result};
use crate::models::talent::{CandidateRecord, NewTalent, TalentId, TalentPatch, TalentStatus};
use crate::services::query_engine::{PageRequest, QueryResult, TalentFilter, TransitionPolicy};
use crate::services::remote_talent::RemoteTalentClient;
use crate::services::schema_adapter::{self, AnyRecord};
use crate::services::talent_store::MockTalentStore;
use crate::utils::time::today;
use crate::utils::validation::is_mobile_phone;

/// Where talent records live.
#[derive(Clone)]
pub enum TalentSource {
    Mock(MockTalentStore),
    Remote(RemoteTalentClient),
}

impl TalentSource {
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.data_source {
            DataSource::Mock => {
                info!(
                    count = config.mock_seed_count,
                    seed = config.mock_seed,
                    "Seeding mock talent store"
                );
                Ok(TalentSource::Mock(MockTalentStore::seeded(
                    config.mock_seed_count,
                    config.mock_seed,
                    today(),
                )))
            }
            DataSource::Remote => {
                let base_url = config
                    .talent_api_base_url
                    .as_deref()
                    .ok_or_else(|| Error::Config("TALENT_API_BASE_URL is not set".to_string()))?;
                let client = RemoteTalentClient::new(base_url, config.talent_api_timeout_secs)?;
                info!(endpoint = client.endpoint(), "Using remote talent backend");
                Ok(TalentSource::Remote(client))
            }
        }
    }
}

#[derive(Clone)]
pub struct TalentService {
    source: TalentSource,
    policy: TransitionPolicy,
    default_page_size: i64,
}

impl TalentService {
    pub fn new(source: TalentSource, policy: TransitionPolicy, default_page_size: i64) -> Self {
        Self {
            source,
            policy,
            default_page_size,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            TalentSource::from_config(config)?,
            TransitionPolicy::from_flag(config.enforce_transitions),
            config.default_page_size,
        ))
    }

    pub fn source(&self) -> &TalentSource {
        &self.source
    }

    pub async fn list(&self, filter: &TalentFilter, page: PageRequest) -> Result<QueryResult> {
        debug!(?filter, ?page, "Listing talents");
        match &self.source {
            TalentSource::Mock(store) => Ok(store.query(filter, page).await),
            TalentSource::Remote(client) => {
                let response = client
                    .query(&schema_adapter::search_to_server(filter, page))
                    .await?;
                let items = response
                    .dates
                    .into_iter()
                    .map(|r| schema_adapter::to_canonical(AnyRecord::Server(r)))
                    .collect();
                Ok(QueryResult {
                    items,
                    total: response.total,
                })
            }
        }
    }

    pub async fn list_client(&self, params: &ClientSearchParams) -> Result<ClientListResponse> {
        let (filter, page) = schema_adapter::search_from_client(params, self.default_page_size)?;
        let result = self.list(&filter, page).await?;
        Ok(ClientListResponse {
            data: result.items.iter().map(schema_adapter::to_client).collect(),
            total: result.total,
            current: page.page,
            page_size: page.page_size,
        })
    }

    pub async fn list_server(&self, params: &ServerQueryParams) -> Result<ServerListResponse> {
        let (filter, page) = schema_adapter::search_from_server(params, self.default_page_size)?;
        let result = self.list(&filter, page).await?;
        Ok(ServerListResponse {
            dates: result.items.iter().map(schema_adapter::to_server).collect(),
            total: result.total,
        })
    }

    pub async fn get(&self, id: &TalentId) -> Result<CandidateRecord> {
        if id.is_empty() {
            return Err(Error::validation("Talent id is required"));
        }
        let found = match &self.source {
            TalentSource::Mock(store) => store.get(id).await,
            TalentSource::Remote(_) => {
                let filter = TalentFilter {
                    id: Some(id.clone()),
                    ..TalentFilter::default()
                };
                self.list(&filter, PageRequest::new(1, 1))
                    .await?
                    .items
                    .into_iter()
                    .find(|r| &r.id == id)
            }
        };
        found.ok_or_else(|| Error::not_found(format!("Talent {} not found", id)))
    }

    pub async fn create(&self, payload: CreateTalentPayload) -> Result<TalentId> {
        crate::utils::validation::validate(&payload)?;
        let new = schema_adapter::new_talent_from_client(payload)?;
        if new.status == TalentStatus::PendingEntry && new.entry_time.is_none() {
            return Err(Error::validation("Entry time is required for pending-entry talents"));
        }
        self.create_new(new).await
    }

    /// Creates an entry from an already canonical record.
    pub async fn create_new(&self, new: NewTalent) -> Result<TalentId> {
        validate_new(&new)?;
        match &self.source {
            TalentSource::Mock(store) => {
                let record = store.insert(new).await;
                info!(talent_id = %record.id, "Talent created");
                Ok(record.id)
            }
            TalentSource::Remote(client) => {
                let created = client
                    .create(&schema_adapter::new_talent_to_server(&new))
                    .await?;
                let id = created.id.map(WireId::into_string).ok_or_else(|| {
                    Error::Transport("Backend did not return the new talent id".into())
                })?;
                info!(talent_id = %id, "Talent created on backend");
                Ok(TalentId::new(id))
            }
        }
    }

    /// Creates an entry from a record of either schema and returns it as stored.
    /// The backend schema carries no entry time, so none is required here.
    pub async fn create_record(&self, record: AnyRecord) -> Result<CandidateRecord> {
        let new = schema_adapter::new_talent_from_record(record)?;
        let id = self.create_new(new).await?;
        self.get(&id).await
    }

    pub async fn update(&self, payload: UpdateTalentPayload) -> Result<()> {
        crate::utils::validation::validate(&payload)?;
        self.update_record(AnyRecord::Client(payload.into())).await
    }

    pub async fn update_record(&self, record: AnyRecord) -> Result<()> {
        let (id, patch) = schema_adapter::patch_from_record(record)?;
        self.apply_patch(&id, patch).await
    }

    /// Merge update. On the mock store an unknown id is a silent no-op; the
    /// backend answers for itself.
    pub async fn apply_patch(&self, id: &TalentId, patch: TalentPatch) -> Result<()> {
        validate_patch(&patch)?;
        match &self.source {
            TalentSource::Mock(store) => match store.update(id, &patch, self.policy).await? {
                Some(_) => {
                    info!(talent_id = %id, "Talent updated");
                    Ok(())
                }
                None => {
                    warn!(talent_id = %id, "Update for unknown talent ignored");
                    Ok(())
                }
            },
            TalentSource::Remote(client) => {
                let body = schema_adapter::patch_to_server(id, &patch)?;
                if let Some(next) = patch.status {
                    if self.policy == TransitionPolicy::Enforced {
                        let current = self.get(id).await?;
                        self.policy.check(id, current.status, next)?;
                    }
                }
                client.update(&body).await
            }
        }
    }

    pub async fn delete(&self, id: &TalentId) -> Result<()> {
        if id.is_empty() {
            return Err(Error::validation("Talent id is required"));
        }
        self.delete_ids(std::slice::from_ref(id)).await
    }

    pub async fn batch_delete(&self, payload: BatchDeletePayload) -> Result<()> {
        let ids = collect_ids(payload.ids)?;
        self.delete_ids(&ids).await
    }

    async fn delete_ids(&self, ids: &[TalentId]) -> Result<()> {
        match &self.source {
            TalentSource::Mock(store) => {
                let removed = store.remove_many(ids).await;
                info!(requested = ids.len(), removed, "Talents deleted");
                Ok(())
            }
            TalentSource::Remote(client) => {
                let numeric = schema_adapter::server_ids(ids)?;
                client.delete(&numeric).await
            }
        }
    }

    pub async fn batch_update_status(&self, payload: BatchStatusPayload) -> Result<()> {
        let status = schema_adapter::status_from_aliases(
            payload.status.as_deref(),
            payload.statue.as_deref(),
        )?
        .ok_or_else(|| Error::validation("A status is required"))?;
        let ids = collect_ids(payload.ids)?;
        self.set_status(&ids, status).await
    }

    pub async fn set_status(&self, ids: &[TalentId], status: TalentStatus) -> Result<()> {
        if ids.is_empty() {
            return Err(Error::validation("At least one talent id is required"));
        }
        match &self.source {
            TalentSource::Mock(store) => {
                let updated = store.set_status_many(ids, status, self.policy).await?;
                info!(requested = ids.len(), updated, status = %status, "Talent statuses updated");
                Ok(())
            }
            TalentSource::Remote(client) => {
                let numeric = schema_adapter::server_ids(ids)?;
                if self.policy == TransitionPolicy::Enforced {
                    for id in ids {
                        let current = self.get(id).await?;
                        self.policy.check(id, current.status, status)?;
                    }
                }
                client.update_status(&numeric, status.label()).await
            }
        }
    }

    /// Number of entries in each pipeline status, in pipeline order.
    pub async fn status_counts(&self) -> Result<Vec<StatusCount>> {
        let mut counts = Vec::with_capacity(TalentStatus::ALL.len());
        for status in TalentStatus::ALL {
            let filter = TalentFilter {
                status: Some(status),
                ..TalentFilter::default()
            };
            let result = self.list(&filter, PageRequest::new(1, 1)).await?;
            counts.push(StatusCount {
                status: status.label().to_string(),
                i18n_key: status.i18n_key().to_string(),
                count: result.total,
            });
        }
        Ok(counts)
    }
}

fn collect_ids(ids: Vec<WireId>) -> Result<Vec<TalentId>> {
    if ids.is_empty() {
        return Err(Error::validation("At least one talent id is required"));
    }
    ids.into_iter()
        .map(|id| {
            let id = TalentId::new(id.into_string());
            if id.is_empty() {
                Err(Error::validation("Talent ids cannot be blank"))
            } else {
                Ok(id)
            }
        })
        .collect()
}

fn validate_new(new: &NewTalent) -> Result<()> {
    if new.name.trim().is_empty() {
        return Err(Error::validation("Name is required"));
    }
    if !is_mobile_phone(&new.phone) {
        return Err(Error::validation(format!("Invalid phone number: {}", new.phone)));
    }
    Ok(())
}

fn validate_patch(patch: &TalentPatch) -> Result<()> {
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(Error::validation("Name cannot be empty"));
        }
    }
    if let Some(phone) = &patch.phone {
        if !is_mobile_phone(phone) {
            return Err(Error::validation(format!("Invalid phone number: {}", phone)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::talent_dto::ServerRecord;
    use chrono::NaiveDate;
    use tokio_test::{assert_err, assert_ok};

    fn service(seed: usize, policy: TransitionPolicy) -> (TalentService, MockTalentStore) {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let store = MockTalentStore::seeded(seed, 11, today);
        (
            TalentService::new(TalentSource::Mock(store.clone()), policy, 10),
            store,
        )
    }

    fn create_payload(status: Option<&str>, entry_time: Option<NaiveDate>) -> CreateTalentPayload {
        CreateTalentPayload {
            name: "周杰".into(),
            gender: Some("男".into()),
            phone: "18712345678".into(),
            position: "全栈开发工程师".into(),
            recruitment_channel: "员工推荐".into(),
            status: status.map(str::to_string),
            entry_time,
            operator: "小张".into(),
            analysis_task_id: Some(WireId::Num(88)),
        }
    }

    #[tokio::test]
    async fn create_then_get() {
        let (svc, _) = service(5, TransitionPolicy::Unchecked);
        let id = svc.create(create_payload(None, None)).await.unwrap();
        assert_eq!(id, TalentId::from(6));

        let record = svc.get(&id).await.unwrap();
        assert_eq!(record.status, TalentStatus::NewCandidate);
        assert_eq!(record.analysis_task_id.as_deref(), Some("88"));
        assert_eq!(record.create_time, Some(today()));
        assert_eq!(record.update_time, record.create_time);
    }

    #[tokio::test]
    async fn create_validates_before_touching_the_store() {
        let (svc, store) = service(5, TransitionPolicy::Unchecked);
        let mut bad_phone = create_payload(None, None);
        bad_phone.phone = "12345".into();
        assert!(matches!(svc.create(bad_phone).await, Err(Error::InvalidPayload(_))));

        let pending_without_date = create_payload(Some("待入职"), None);
        assert!(matches!(
            svc.create(pending_without_date).await,
            Err(Error::Validation(_))
        ));

        let mut bad_channel = create_payload(None, None);
        bad_channel.recruitment_channel = "街头".into();
        assert!(matches!(svc.create(bad_channel).await, Err(Error::Validation(_))));

        assert_eq!(store.len().await, 5);
    }

    #[tokio::test]
    async fn backend_shape_create_accepts_pending_entry_without_date() {
        let (svc, store) = service(2, TransitionPolicy::Unchecked);
        let record = AnyRecord::Server(ServerRecord {
            name: Some("杨过".into()),
            phone: Some("13612345678".into()),
            job: Some("架构师".into()),
            channel: Some("猎聘网".into()),
            statue: Some("待入职".into()),
            inputer: Some("小红".into()),
            ..ServerRecord::default()
        });
        let created = svc.create_record(record).await.unwrap();
        assert_eq!(created.status, TalentStatus::PendingEntry);
        assert_eq!(created.entry_time, None);
        assert_eq!(store.len().await, 3);

        let unknown_channel = AnyRecord::Server(ServerRecord {
            name: Some("杨过".into()),
            phone: Some("13612345678".into()),
            channel: Some("街头".into()),
            ..ServerRecord::default()
        });
        assert_err!(svc.create_record(unknown_channel).await);
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let (svc, _) = service(3, TransitionPolicy::Unchecked);
        assert!(matches!(svc.get(&TalentId::from(99)).await, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn update_without_id_is_rejected() {
        let (svc, _) = service(3, TransitionPolicy::Unchecked);
        let payload = UpdateTalentPayload {
            name: Some("新名字".into()),
            ..UpdateTalentPayload::default()
        };
        assert!(matches!(svc.update(payload).await, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn update_of_unknown_id_succeeds_without_changes() {
        let (svc, store) = service(3, TransitionPolicy::Unchecked);
        let before = store.snapshot().await;
        let payload = UpdateTalentPayload {
            id: Some(WireId::Text("x".into())),
            ..UpdateTalentPayload::default()
        };
        assert_ok!(svc.update(payload).await);
        assert_eq!(store.snapshot().await, before);
    }

    #[tokio::test]
    async fn status_change_away_from_pending_entry_clears_entry_time() {
        let (svc, _) = service(0, TransitionPolicy::Unchecked);
        let entry = NaiveDate::from_ymd_opt(2030, 1, 2);
        let id = svc.create(create_payload(Some("待入职"), entry)).await.unwrap();
        assert_eq!(svc.get(&id).await.unwrap().entry_time, entry);

        svc.set_status(&[id.clone()], TalentStatus::Eliminated).await.unwrap();
        let record = svc.get(&id).await.unwrap();
        assert_eq!(record.status, TalentStatus::Eliminated);
        assert_eq!(record.entry_time, None);
    }

    #[tokio::test]
    async fn transitions_are_not_enforced_by_default() {
        let (svc, _) = service(0, TransitionPolicy::Unchecked);
        let id = svc.create(create_payload(None, None)).await.unwrap();
        let payload = UpdateTalentPayload {
            id: Some(WireId::Text(id.to_string())),
            status: Some("已发offer未入职".into()),
            ..UpdateTalentPayload::default()
        };
        assert_ok!(svc.update(payload).await);
        assert_eq!(svc.get(&id).await.unwrap().status, TalentStatus::OfferSentNoShow);
    }

    #[tokio::test]
    async fn enforced_transitions_reject_skipping_stages() {
        let (svc, _) = service(0, TransitionPolicy::Enforced);
        let id = svc.create(create_payload(None, None)).await.unwrap();

        let skip = UpdateTalentPayload {
            id: Some(WireId::Text(id.to_string())),
            status: Some("面试通过".into()),
            ..UpdateTalentPayload::default()
        };
        assert_err!(svc.update(skip).await);
        assert_eq!(svc.get(&id).await.unwrap().status, TalentStatus::NewCandidate);

        assert_ok!(svc.set_status(&[id.clone()], TalentStatus::FirstPass).await);
        assert_ok!(svc.set_status(&[id.clone()], TalentStatus::Eliminated).await);
    }

    #[tokio::test]
    async fn batch_operations_validate_input() {
        let (svc, store) = service(10, TransitionPolicy::Unchecked);
        let no_ids = BatchStatusPayload {
            ids: vec![],
            status: Some("已淘汰".into()),
            statue: None,
        };
        assert!(matches!(svc.batch_update_status(no_ids).await, Err(Error::Validation(_))));

        let no_status = BatchStatusPayload {
            ids: vec![WireId::Num(1)],
            status: None,
            statue: None,
        };
        assert!(matches!(svc.batch_update_status(no_status).await, Err(Error::Validation(_))));

        let by_alias = BatchStatusPayload {
            ids: vec![WireId::Num(1), WireId::Text("2".into())],
            status: None,
            statue: Some("已淘汰".into()),
        };
        assert_ok!(svc.batch_update_status(by_alias).await);
        assert_eq!(store.get(&TalentId::from(2)).await.unwrap().status, TalentStatus::Eliminated);

        assert!(svc.batch_delete(BatchDeletePayload { ids: vec![] }).await.is_err());
        assert_ok!(
            svc.batch_delete(BatchDeletePayload {
                ids: vec![WireId::Num(1), WireId::Num(2), WireId::Num(3)],
            })
            .await
        );
        assert_eq!(store.len().await, 7);
    }

    #[tokio::test]
    async fn status_counts_cover_the_whole_store() {
        let (svc, _) = service(50, TransitionPolicy::Unchecked);
        let counts = svc.status_counts().await.unwrap();
        assert_eq!(counts.len(), 8);
        assert_eq!(counts.iter().map(|c| c.count).sum::<i64>(), 50);
        assert_eq!(counts[0].i18n_key, "talent.status.new");
    }

    #[tokio::test]
    async fn client_list_reports_requested_page() {
        let (svc, _) = service(50, TransitionPolicy::Unchecked);
        let params = ClientSearchParams {
            current: Some(6),
            page_size: Some(10),
            ..ClientSearchParams::default()
        };
        let response = svc.list_client(&params).await.unwrap();
        assert!(response.data.is_empty());
        assert_eq!(response.total, 50);
        assert_eq!(response.current, 6);
        assert_eq!(response.page_size, 10);
    }
}
