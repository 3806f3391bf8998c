//! Record model for the triage pipeline.
//!
//! One `EmailRecord` per ingested message. Stages never mutate a record in
//! place: resolution wraps it into a `ResolvedRecord`, thread consolidation
//! into a `ConsolidatedRecord`, and classification/scoring into the final
//! `PipelineRecord`.

use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel company name used when every resolution path fails.
pub const UNKNOWN_COMPANY: &str = "Unknown Company";

/// Sentinel role title used by upstream extraction when no role was found.
pub const UNKNOWN_ROLE: &str = "Unknown Role";

/// Coarse status label assigned by upstream ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Applied,
    InterviewScheduled,
    Offer,
    Rejected,
    Withdrawn,
    FollowUp,
    OnHold,
    #[serde(other)]
    #[default]
    Unknown,
}

impl Status {
    /// Closed statuses: no follow-up makes sense.
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Rejected | Status::Offer | Status::Withdrawn)
    }

    /// Statuses that describe a live back-and-forth.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            Status::Applied | Status::InterviewScheduled | Status::FollowUp
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Applied => "applied",
            Status::InterviewScheduled => "interview_scheduled",
            Status::Offer => "offer",
            Status::Rejected => "rejected",
            Status::Withdrawn => "withdrawn",
            Status::FollowUp => "follow_up",
            Status::OnHold => "on_hold",
            Status::Unknown => "unknown",
        }
    }
}

/// Pipeline-health classification of one opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Hot,
    Warm,
    Cooling,
    Cold,
    Ghosted,
    Closed,
    UnknownTimeline,
    UnknownStatus,
}

impl PipelineStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PipelineStatus::Hot => "hot",
            PipelineStatus::Warm => "warm",
            PipelineStatus::Cooling => "cooling",
            PipelineStatus::Cold => "cold",
            PipelineStatus::Ghosted => "ghosted",
            PipelineStatus::Closed => "closed",
            PipelineStatus::UnknownTimeline => "unknown_timeline",
            PipelineStatus::UnknownStatus => "unknown_status",
        }
    }
}

/// Follow-up urgency bucket derived from the priority score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityLevel {
    Critical,
    High,
    Medium,
    Low,
    Inactive,
}

/// Response pattern inferred from thread size and status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    MultiExchange,
    Responded,
    RespondedNegative,
    NoResponse,
}

/// Kind of opportunity inferred from subject/sender keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityType {
    DirectApplication,
    RecruiterOutreach,
    InterviewProcess,
    FollowUp,
    Networking,
    Other,
}

/// One message-derived record as produced by upstream ingestion.
///
/// Numeric and date fields are lenient on the wire: an unparseable cell
/// degrades to `None`, never to a fake value and never to a row abort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EmailRecord {
    #[serde(default)]
    pub sender_email: String,
    #[serde(default)]
    pub sender_domain: String,
    #[serde(default)]
    pub subject_line: String,
    #[serde(default)]
    pub body_preview: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default, deserialize_with = "de_lenient_confidence")]
    pub status_confidence: Option<u8>,
    #[serde(default, deserialize_with = "de_blank_as_none")]
    pub email_date: Option<String>,
    #[serde(default, deserialize_with = "de_blank_as_none")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "de_blank_as_none")]
    pub role_title: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_confidence")]
    pub role_confidence: Option<u8>,
    #[serde(default = "default_thread_count", deserialize_with = "de_lenient_count")]
    pub thread_email_count: u32,
}

fn default_thread_count() -> u32 {
    1
}

/// EmailRecord plus the resolved organization identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRecord {
    pub email: EmailRecord,
    /// Never empty — falls back to [`UNKNOWN_COMPANY`].
    pub company_name: String,
    /// 0–100, implied by the source tier that produced the name.
    pub company_confidence: u8,
    /// Originally-supplied name, kept when resolution changed it.
    pub company_before_cleanup: Option<String>,
}

/// One (possibly consolidated) conversation after thread deduplication.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsolidatedRecord {
    /// Representative member of the thread.
    pub record: ResolvedRecord,
    pub thread_id: Option<String>,
    /// Count of member records folded into this thread, >= 1.
    pub thread_email_count: u32,
    /// Ordered `"<date>: <subject>"` member timeline, `"; "`-joined.
    pub thread_emails: Option<String>,
    pub first_email_date: Option<String>,
    pub last_email_date: Option<String>,
    /// Maximum observed across thread members.
    pub status_confidence: Option<u8>,
    pub company_confidence: u8,
    pub role_confidence: Option<u8>,
}

impl ConsolidatedRecord {
    /// Wrap a record that did not participate in any thread merge.
    pub fn single(record: ResolvedRecord) -> Self {
        let status_confidence = record.email.status_confidence;
        let role_confidence = record.email.role_confidence;
        let company_confidence = record.company_confidence;
        let thread_email_count = record.email.thread_email_count.max(1);
        ConsolidatedRecord {
            record,
            thread_id: None,
            thread_email_count,
            thread_emails: None,
            first_email_date: None,
            last_email_date: None,
            status_confidence,
            company_confidence,
            role_confidence,
        }
    }
}

/// Final output unit: consolidated record plus derived pipeline fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineRecord {
    pub record: ConsolidatedRecord,
    pub pipeline_status: PipelineStatus,
    pub days_since_contact: Option<i64>,
    pub priority_score: u8,
    pub priority_level: PriorityLevel,
    pub recommended_action: String,
    pub response_type: ResponseType,
    pub opportunity_type: OpportunityType,
}

// ---------------------------------------------------------------------------
// Lenient field deserializers
// ---------------------------------------------------------------------------

/// Empty or whitespace-only strings become `None`.
fn de_blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

/// Confidence cells arrive as "85", "85.0", or garbage. Parse what we can,
/// clamp to 0–100, degrade the rest to absent.
fn de_lenient_confidence<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| parse_confidence(&s)))
}

pub(crate) fn parse_confidence(raw: &str) -> Option<u8> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.clamp(0.0, 100.0).round() as u8)
}

/// Thread counts default to 1 when absent or unparseable.
fn de_lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 1.0)
        .map(|v| v.round() as u32)
        .unwrap_or(1))
}
