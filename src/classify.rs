//! Pipeline-health classification and categorical typing.
//!
//! Three independent classifiers run per consolidated record:
//! pipeline status (recency buckets over days since last contact),
//! response type (thread size and status), and opportunity type
//! (subject/sender keyword tables). All three are pure functions of the
//! record and the reference date.

use chrono::NaiveDateTime;

use crate::dates::EmailDate;
use crate::model::{EmailRecord, OpportunityType, PipelineStatus, ResponseType, Status};

// ---------------------------------------------------------------------------
// Pipeline status
// ---------------------------------------------------------------------------

/// Recency buckets for an active opportunity, in days since last contact.
const HOT_DAYS: i64 = 7;
const WARM_DAYS: i64 = 14;
const COOLING_DAYS: i64 = 21;
const COLD_DAYS: i64 = 30;

/// Whole days between the last contact and the reference date. Undefined
/// when the contact date never parsed.
pub fn days_since_contact(date: &EmailDate, reference: NaiveDateTime) -> Option<i64> {
    date.days_until(reference)
}

/// Classify pipeline health.
///
/// An uncomputable timeline wins over everything else, including terminal
/// statuses: without a date we cannot claim the opportunity is anything
/// more specific than unknown_timeline.
pub fn classify_pipeline(status: Status, days_since: Option<i64>) -> PipelineStatus {
    let Some(days) = days_since else {
        return PipelineStatus::UnknownTimeline;
    };

    if status.is_terminal() {
        return PipelineStatus::Closed;
    }

    if status.is_active() {
        return if days <= HOT_DAYS {
            PipelineStatus::Hot
        } else if days <= WARM_DAYS {
            PipelineStatus::Warm
        } else if days <= COOLING_DAYS {
            PipelineStatus::Cooling
        } else if days <= COLD_DAYS {
            PipelineStatus::Cold
        } else {
            PipelineStatus::Ghosted
        };
    }

    PipelineStatus::UnknownStatus
}

// ---------------------------------------------------------------------------
// Response type
// ---------------------------------------------------------------------------

/// Response pattern: thread size dominates, then status polarity.
pub fn classify_response(thread_email_count: u32, status: Status) -> ResponseType {
    if thread_email_count > 1 {
        return ResponseType::MultiExchange;
    }
    match status {
        Status::Applied | Status::InterviewScheduled | Status::Offer => ResponseType::Responded,
        Status::Rejected => ResponseType::RespondedNegative,
        _ => ResponseType::NoResponse,
    }
}

// ---------------------------------------------------------------------------
// Opportunity type
// ---------------------------------------------------------------------------

const APPLICATION_TERMS: &[&str] = &["application", "applied", "thank you for applying"];
const RECRUITER_SENDER_TERMS: &[&str] = &["recruiting", "talent", "hr"];
const RECRUITER_SUBJECT_TERMS: &[&str] = &["opportunity", "role for you", "interested in"];
const FOLLOW_UP_TERMS: &[&str] = &["update", "follow", "checking", "re:"];
const NETWORKING_TERMS: &[&str] = &["connection", "networking", "coffee", "chat"];

fn contains_any(haystack: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| haystack.contains(term))
}

/// Categorize the kind of opportunity from subject and sender keywords.
/// First matching category wins; the order encodes specificity.
pub fn classify_opportunity(email: &EmailRecord) -> OpportunityType {
    let subject = email.subject_line.to_lowercase();
    let sender = email.sender_email.to_lowercase();

    if contains_any(&subject, APPLICATION_TERMS) {
        OpportunityType::DirectApplication
    } else if contains_any(&sender, RECRUITER_SENDER_TERMS)
        || contains_any(&subject, RECRUITER_SUBJECT_TERMS)
    {
        OpportunityType::RecruiterOutreach
    } else if subject.contains("interview") {
        OpportunityType::InterviewProcess
    } else if contains_any(&subject, FOLLOW_UP_TERMS) {
        OpportunityType::FollowUp
    } else if contains_any(&subject, NETWORKING_TERMS) {
        OpportunityType::Networking
    } else {
        OpportunityType::Other
    }
}
