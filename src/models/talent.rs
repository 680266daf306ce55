use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical identifier of a talent-pool entry. Numeric ids coming from the
/// backend are kept as their decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct TalentId(pub String);

impl TalentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Numeric form expected by the backend's wire contract.
    pub fn as_numeric(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }
}

impl fmt::Display for TalentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for TalentId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for TalentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Undisclosed,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Undisclosed];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "男",
            Gender::Female => "女",
            Gender::Undisclosed => "保密",
        }
    }

    /// Accepts the display label as well as the english key.
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim() {
            "男" | "male" => Some(Gender::Male),
            "女" | "female" => Some(Gender::Female),
            "保密" | "undisclosed" => Some(Gender::Undisclosed),
            _ => None,
        }
    }
}

/// Stage of a candidate in the hiring pipeline.
///
/// ```text
/// NewCandidate -> FirstPass -> InterviewScheduled -> InterviewPassed -> OfferSent
///     OfferSent -> PendingEntry      (onboarding branch)
///     OfferSent -> OfferSentNoShow   (terminal)
/// any -> Eliminated                  (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum TalentStatus {
    #[default]
    NewCandidate,
    FirstPass,
    InterviewScheduled,
    InterviewPassed,
    OfferSent,
    PendingEntry,
    OfferSentNoShow,
    Eliminated,
}

struct StatusEntry {
    status: TalentStatus,
    label: &'static str,
    i18n_key: &'static str,
    slug: &'static str,
}

const STATUS_TABLE: [StatusEntry; 8] = [
    StatusEntry {
        status: TalentStatus::NewCandidate,
        label: "新候选人",
        i18n_key: "talent.status.new",
        slug: "new-candidate",
    },
    StatusEntry {
        status: TalentStatus::FirstPass,
        label: "初选通过",
        i18n_key: "talent.status.firstPass",
        slug: "first-pass",
    },
    StatusEntry {
        status: TalentStatus::InterviewScheduled,
        label: "安排面试",
        i18n_key: "talent.status.interview",
        slug: "interview-scheduled",
    },
    StatusEntry {
        status: TalentStatus::InterviewPassed,
        label: "面试通过",
        i18n_key: "talent.status.interviewPass",
        slug: "interview-passed",
    },
    StatusEntry {
        status: TalentStatus::OfferSent,
        label: "已发offer",
        i18n_key: "talent.status.offered",
        slug: "offer-sent",
    },
    StatusEntry {
        status: TalentStatus::PendingEntry,
        label: "待入职",
        i18n_key: "talent.status.pendingEntry",
        slug: "pending-entry",
    },
    StatusEntry {
        status: TalentStatus::OfferSentNoShow,
        label: "已发offer未入职",
        i18n_key: "talent.status.offeredNotJoined",
        slug: "offer-sent-no-show",
    },
    StatusEntry {
        status: TalentStatus::Eliminated,
        label: "已淘汰",
        i18n_key: "talent.status.eliminated",
        slug: "eliminated",
    },
];

impl TalentStatus {
    pub const ALL: [TalentStatus; 8] = [
        TalentStatus::NewCandidate,
        TalentStatus::FirstPass,
        TalentStatus::InterviewScheduled,
        TalentStatus::InterviewPassed,
        TalentStatus::OfferSent,
        TalentStatus::PendingEntry,
        TalentStatus::OfferSentNoShow,
        TalentStatus::Eliminated,
    ];

    fn entry(self) -> &'static StatusEntry {
        // STATUS_TABLE is ordered like the enum
        &STATUS_TABLE[self as usize]
    }

    /// Label used on both wire schemas.
    pub fn label(self) -> &'static str {
        self.entry().label
    }

    /// Localization key used by the screen.
    pub fn i18n_key(self) -> &'static str {
        self.entry().i18n_key
    }

    pub fn slug(self) -> &'static str {
        self.entry().slug
    }

    /// Resolves a wire label or a slug.
    pub fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        STATUS_TABLE
            .iter()
            .find(|e| e.label == raw || e.slug == raw)
            .map(|e| e.status)
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TalentStatus::PendingEntry | TalentStatus::OfferSentNoShow | TalentStatus::Eliminated
        )
    }

    /// Legality of a pipeline move. Staying in the same status is always allowed.
    pub fn can_transition_to(self, next: TalentStatus) -> bool {
        use TalentStatus::*;
        if self == next {
            return true;
        }
        match (self, next) {
            (_, Eliminated) => true,
            (NewCandidate, FirstPass)
            | (FirstPass, InterviewScheduled)
            | (InterviewScheduled, InterviewPassed)
            | (InterviewPassed, OfferSent)
            | (OfferSent, PendingEntry)
            | (OfferSent, OfferSentNoShow) => true,
            _ => false,
        }
    }
}

impl fmt::Display for TalentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecruitmentChannel {
    Job51,
    BossZhipin,
    Zhaopin,
    Lagou,
    Liepin,
    ChinaTalentHotline,
    FiveEightTongcheng,
    Ganji,
    Dajie,
    ChinaHr,
    InternalReferral,
    EmployeeReferral,
    WeChat,
    #[default]
    Other,
}

impl RecruitmentChannel {
    pub const ALL: [RecruitmentChannel; 14] = [
        RecruitmentChannel::Job51,
        RecruitmentChannel::BossZhipin,
        RecruitmentChannel::Zhaopin,
        RecruitmentChannel::Lagou,
        RecruitmentChannel::Liepin,
        RecruitmentChannel::ChinaTalentHotline,
        RecruitmentChannel::FiveEightTongcheng,
        RecruitmentChannel::Ganji,
        RecruitmentChannel::Dajie,
        RecruitmentChannel::ChinaHr,
        RecruitmentChannel::InternalReferral,
        RecruitmentChannel::EmployeeReferral,
        RecruitmentChannel::WeChat,
        RecruitmentChannel::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RecruitmentChannel::Job51 => "前程无忧",
            RecruitmentChannel::BossZhipin => "Boss直聘",
            RecruitmentChannel::Zhaopin => "智联招聘",
            RecruitmentChannel::Lagou => "拉勾网",
            RecruitmentChannel::Liepin => "猎聘网",
            RecruitmentChannel::ChinaTalentHotline => "中国人才热线",
            RecruitmentChannel::FiveEightTongcheng => "58同城",
            RecruitmentChannel::Ganji => "赶集网",
            RecruitmentChannel::Dajie => "大街网",
            RecruitmentChannel::ChinaHr => "中华英才网",
            RecruitmentChannel::InternalReferral => "内部推荐",
            RecruitmentChannel::EmployeeReferral => "员工推荐",
            RecruitmentChannel::WeChat => "微信招聘",
            RecruitmentChannel::Other => "其他",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|c| c.label() == raw)
    }
}

macro_rules! label_serde {
    ($ty:ty, $what:literal) => {
        impl Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                <$ty>::from_label(&raw)
                    .ok_or_else(|| serde::de::Error::custom(format!("Unknown {}: {}", $what, raw)))
            }
        }
    };
}

label_serde!(TalentStatus, "talent status");
label_serde!(Gender, "gender");
label_serde!(RecruitmentChannel, "recruitment channel");

/// A talent-pool entry in the form all business logic works on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: TalentId,
    pub name: String,
    pub gender: Gender,
    pub phone: String,
    pub position: String,
    pub recruitment_channel: RecruitmentChannel,
    pub status: TalentStatus,
    pub entry_time: Option<NaiveDate>,
    pub operator: String,
    pub create_time: Option<NaiveDate>,
    pub update_time: Option<NaiveDate>,
    pub analysis_task_id: Option<String>,
}

impl CandidateRecord {
    /// Drops an entry time that no longer applies to the current status.
    pub fn normalize_entry_time(&mut self) {
        if self.status != TalentStatus::PendingEntry {
            self.entry_time = None;
        }
    }
}

/// Everything a caller supplies when creating an entry; the store assigns
/// the id and the timestamps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewTalent {
    pub name: String,
    pub gender: Gender,
    pub phone: String,
    pub position: String,
    pub recruitment_channel: RecruitmentChannel,
    pub status: TalentStatus,
    pub entry_time: Option<NaiveDate>,
    pub operator: String,
    pub analysis_task_id: Option<String>,
}

impl NewTalent {
    pub fn into_record(self, id: TalentId, today: NaiveDate) -> CandidateRecord {
        let mut record = CandidateRecord {
            id,
            name: self.name,
            gender: self.gender,
            phone: self.phone,
            position: self.position,
            recruitment_channel: self.recruitment_channel,
            status: self.status,
            entry_time: self.entry_time,
            operator: self.operator,
            create_time: Some(today),
            update_time: Some(today),
            analysis_task_id: self.analysis_task_id,
        };
        record.normalize_entry_time();
        record
    }
}

impl From<CandidateRecord> for NewTalent {
    fn from(record: CandidateRecord) -> Self {
        Self {
            name: record.name,
            gender: record.gender,
            phone: record.phone,
            position: record.position,
            recruitment_channel: record.recruitment_channel,
            status: record.status,
            entry_time: record.entry_time,
            operator: record.operator,
            analysis_task_id: record.analysis_task_id,
        }
    }
}

/// Merge update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TalentPatch {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub recruitment_channel: Option<RecruitmentChannel>,
    pub status: Option<TalentStatus>,
    pub entry_time: Option<NaiveDate>,
    pub operator: Option<String>,
    pub analysis_task_id: Option<String>,
}

impl TalentPatch {
    pub fn status(status: TalentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Writes the supplied fields and refreshes `update_time`. `create_time`
    /// is never touched.
    pub fn apply(&self, record: &mut CandidateRecord, today: NaiveDate) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(gender) = self.gender {
            record.gender = gender;
        }
        if let Some(phone) = &self.phone {
            record.phone = phone.clone();
        }
        if let Some(position) = &self.position {
            record.position = position.clone();
        }
        if let Some(channel) = self.recruitment_channel {
            record.recruitment_channel = channel;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(entry_time) = self.entry_time {
            record.entry_time = Some(entry_time);
        }
        if let Some(operator) = &self.operator {
            record.operator = operator.clone();
        }
        if let Some(task) = &self.analysis_task_id {
            record.analysis_task_id = Some(task.clone());
        }
        record.normalize_entry_time();
        record.update_time = Some(match record.create_time {
            Some(created) if created > today => created,
            _ => today,
        });
    }
}
