use chrono::{Duration, NaiveDate};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::talent::{
    CandidateRecord, Gender, NewTalent, RecruitmentChannel, TalentId, TalentPatch, TalentStatus,
};
use crate::services::query_engine::{self, PageRequest, QueryResult, TalentFilter, TransitionPolicy};
use crate::utils::time::today;

const POSITIONS: [&str; 10] = [
    "前端开发工程师",
    "后端开发工程师",
    "UI设计师",
    "产品经理",
    "数据分析师",
    "DevOps工程师",
    "测试工程师",
    "全栈开发工程师",
    "项目经理",
    "运维工程师",
];

const OPERATORS: [&str; 5] = ["小明", "小红", "小李", "小张", "小王"];

const SURNAMES: [&str; 20] = [
    "张", "李", "王", "赵", "刘", "陈", "杨", "黄", "周", "吴", "徐", "孙", "马", "朱", "胡", "林",
    "郭", "何", "高", "罗",
];

const GIVEN_NAMES: [&str; 30] = [
    "伟", "芳", "娜", "秀英", "敏", "静", "丽", "强", "磊", "军", "洋", "勇", "艳", "杰", "娟",
    "涛", "明", "超", "秀兰", "霞", "平", "刚", "桂英", "文", "云", "建国", "建华", "建军", "国强",
    "国庆",
];

const PHONE_PREFIXES: [&str; 16] = [
    "138", "139", "137", "136", "135", "134", "188", "187", "183", "182", "159", "158", "157",
    "152", "151", "150",
];

#[derive(Debug, Default)]
struct StoreState {
    records: Vec<CandidateRecord>,
    next_id: u64,
}

impl StoreState {
    fn allocate_id(&mut self) -> TalentId {
        self.next_id += 1;
        TalentId::new(self.next_id.to_string())
    }

    fn position(&self, id: &TalentId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }
}

/// In-memory talent pool standing in for the backend during development.
///
/// Clones share the same records. Every mutation takes the write lock, so
/// batches are applied as a unit with respect to other callers.
#[derive(Clone, Default)]
pub struct MockTalentStore {
    state: Arc<RwLock<StoreState>>,
}

impl MockTalentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `count` generated candidates. The same seed
    /// always yields the same candidates relative to `reference_day`.
    pub fn seeded(count: usize, seed: u64, reference_day: NaiveDate) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let records = (1..=count as u64)
            .map(|n| generate_record(&mut rng, TalentId::new(n.to_string()), reference_day))
            .collect();
        Self::from_records(records)
    }

    pub fn from_records(records: Vec<CandidateRecord>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|r| r.id.as_numeric())
            .filter(|n| *n > 0)
            .max()
            .unwrap_or(0) as u64;
        Self {
            state: Arc::new(RwLock::new(StoreState { records, next_id })),
        }
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn snapshot(&self) -> Vec<CandidateRecord> {
        self.state.read().await.records.clone()
    }

    pub async fn query(&self, filter: &TalentFilter, page: PageRequest) -> QueryResult {
        let state = self.state.read().await;
        query_engine::query(&state.records, filter, page)
    }

    pub async fn get(&self, id: &TalentId) -> Option<CandidateRecord> {
        let state = self.state.read().await;
        state.records.iter().find(|r| &r.id == id).cloned()
    }

    pub async fn insert(&self, new: NewTalent) -> CandidateRecord {
        let mut state = self.state.write().await;
        let id = state.allocate_id();
        let record = new.into_record(id, today());
        state.records.push(record.clone());
        tracing::debug!(talent_id = %record.id, "Inserted talent into mock store");
        record
    }

    /// Merges `patch` into the record. `Ok(None)` means the id is unknown and
    /// nothing changed.
    pub async fn update(
        &self,
        id: &TalentId,
        patch: &TalentPatch,
        policy: TransitionPolicy,
    ) -> Result<Option<CandidateRecord>> {
        let mut state = self.state.write().await;
        let Some(index) = state.position(id) else {
            return Ok(None);
        };
        let record = &mut state.records[index];
        if let Some(next) = patch.status {
            policy.check(id, record.status, next)?;
        }
        patch.apply(record, today());
        Ok(Some(record.clone()))
    }

    /// Sets `status` on every known id. Legality is checked for all of them
    /// before any record changes. Returns how many records were updated.
    pub async fn set_status_many(
        &self,
        ids: &[TalentId],
        status: TalentStatus,
        policy: TransitionPolicy,
    ) -> Result<usize> {
        let mut state = self.state.write().await;
        let wanted: HashSet<&TalentId> = ids.iter().collect();

        for record in state.records.iter().filter(|r| wanted.contains(&r.id)) {
            policy.check(&record.id, record.status, status)?;
        }

        let patch = TalentPatch::status(status);
        let day = today();
        let mut updated = 0;
        for record in state.records.iter_mut().filter(|r| wanted.contains(&r.id)) {
            patch.apply(record, day);
            updated += 1;
        }
        Ok(updated)
    }

    pub async fn remove(&self, id: &TalentId) -> bool {
        self.remove_many(std::slice::from_ref(id)).await == 1
    }

    pub async fn remove_many(&self, ids: &[TalentId]) -> usize {
        let mut state = self.state.write().await;
        let wanted: HashSet<&TalentId> = ids.iter().collect();
        let before = state.records.len();
        state.records.retain(|r| !wanted.contains(&r.id));
        before - state.records.len()
    }
}

fn pick(rng: &mut StdRng, items: &[&'static str]) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

fn generate_record(rng: &mut StdRng, id: TalentId, reference_day: NaiveDate) -> CandidateRecord {
    let name = format!("{}{}", pick(rng, &SURNAMES), pick(rng, &GIVEN_NAMES));
    let gender = if rng.gen_bool(0.5) { Gender::Male } else { Gender::Female };
    let position = pick(rng, &POSITIONS).to_string();
    let recruitment_channel = *RecruitmentChannel::ALL
        .choose(rng)
        .unwrap_or(&RecruitmentChannel::Other);
    let status = *TalentStatus::ALL.choose(rng).unwrap_or(&TalentStatus::NewCandidate);
    let operator = pick(rng, &OPERATORS).to_string();

    let create_time = reference_day - Duration::days(rng.gen_range(0..90));
    let update_time = create_time + Duration::days(rng.gen_range(0..10));
    let entry_time = (status == TalentStatus::PendingEntry)
        .then(|| update_time + Duration::days(rng.gen_range(0..15)));

    let phone = format!(
        "{}{:08}",
        pick(rng, &PHONE_PREFIXES),
        rng.gen_range(0..100_000_000u32)
    );

    CandidateRecord {
        id,
        name,
        gender,
        phone,
        position,
        recruitment_channel,
        status,
        entry_time,
        operator,
        create_time: Some(create_time),
        update_time: Some(update_time),
        analysis_task_id: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::utils::validation::is_mobile_phone;

    fn reference_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn new_talent(name: &str, status: TalentStatus) -> NewTalent {
        NewTalent {
            name: name.into(),
            gender: Gender::Female,
            phone: "13612345678".into(),
            position: "产品经理".into(),
            recruitment_channel: RecruitmentChannel::InternalReferral,
            status,
            entry_time: None,
            operator: "小明".into(),
            analysis_task_id: None,
        }
    }

    #[tokio::test]
    async fn seeding_is_deterministic_and_well_formed() {
        let a = MockTalentStore::seeded(50, 7, reference_day()).snapshot().await;
        let b = MockTalentStore::seeded(50, 7, reference_day()).snapshot().await;
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);

        let ids: HashSet<_> = a.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), 50);

        for record in &a {
            assert!(is_mobile_phone(&record.phone), "bad phone {}", record.phone);
            assert!(record.update_time >= record.create_time);
            assert_ne!(record.gender, Gender::Undisclosed);
            assert_eq!(
                record.entry_time.is_some(),
                record.status == TalentStatus::PendingEntry
            );
        }
    }

    #[tokio::test]
    async fn ids_are_monotonic_even_after_deletes() {
        let store = MockTalentStore::seeded(3, 1, reference_day());
        let first = store.insert(new_talent("甲", TalentStatus::NewCandidate)).await;
        assert_eq!(first.id, TalentId::from(4));
        assert!(store.remove(&first.id).await);

        let second = store.insert(new_talent("乙", TalentStatus::NewCandidate)).await;
        assert_eq!(second.id, TalentId::from(5));
        assert_eq!(second.create_time, second.update_time);
        assert_eq!(store.len().await, 4);
    }

    #[tokio::test]
    async fn update_merges_and_missing_id_is_a_no_op() {
        let store = MockTalentStore::new();
        let record = store.insert(new_talent("丙", TalentStatus::FirstPass)).await;

        let patch = TalentPatch {
            operator: Some("小王".into()),
            ..TalentPatch::default()
        };
        let updated = store
            .update(&record.id, &patch, TransitionPolicy::Unchecked)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.operator, "小王");
        assert_eq!(updated.name, "丙");
        assert_eq!(updated.status, TalentStatus::FirstPass);

        let before = store.snapshot().await;
        let missing = store
            .update(&TalentId::new("x"), &patch, TransitionPolicy::Unchecked)
            .await
            .unwrap();
        assert!(missing.is_none());
        assert_eq!(store.snapshot().await, before);
    }

    #[tokio::test]
    async fn batch_status_is_all_or_nothing_under_enforcement() {
        let store = MockTalentStore::new();
        let a = store.insert(new_talent("甲", TalentStatus::OfferSent)).await;
        let b = store.insert(new_talent("乙", TalentStatus::NewCandidate)).await;
        let ids = vec![a.id.clone(), b.id.clone()];

        let result = store
            .set_status_many(&ids, TalentStatus::PendingEntry, TransitionPolicy::Enforced)
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(store.get(&a.id).await.unwrap().status, TalentStatus::OfferSent);
        assert_eq!(store.get(&b.id).await.unwrap().status, TalentStatus::NewCandidate);

        let updated = store
            .set_status_many(&ids, TalentStatus::PendingEntry, TransitionPolicy::Unchecked)
            .await
            .unwrap();
        assert_eq!(updated, 2);
        assert_eq!(store.get(&b.id).await.unwrap().status, TalentStatus::PendingEntry);
    }

    #[tokio::test]
    async fn remove_many_ignores_unknown_ids() {
        let store = MockTalentStore::seeded(10, 3, reference_day());
        let removed = store
            .remove_many(&[TalentId::from(2), TalentId::from(4), TalentId::new("nope")])
            .await;
        assert_eq!(removed, 2);
        assert_eq!(store.len().await, 8);
        assert!(store.get(&TalentId::from(2)).await.is_none());
    }
}
