//! Additive priority scoring for follow-up triage.
//!
//! Every factor contributes independently to a base of 50 and the sum is
//! clamped to [0, 100]. Absent inputs contribute zero rather than a
//! penalty, except low status confidence, which is an explicit negative
//! signal. The score then maps to a coarse level and, together with the
//! pipeline status, to a recommended action.

use crate::model::{PipelineStatus, PriorityLevel, Status, UNKNOWN_ROLE};

const BASE_SCORE: i32 = 50;

fn status_weight(status: Status) -> i32 {
    match status {
        Status::InterviewScheduled => 40,
        Status::Offer => 50,
        Status::Applied => 20,
        Status::FollowUp => 15,
        Status::OnHold => -10,
        Status::Rejected => -50,
        Status::Withdrawn | Status::Unknown => 0,
    }
}

fn confidence_bonus(confidence: Option<u8>) -> i32 {
    match confidence {
        Some(c) if c >= 80 => 15,
        Some(c) if c >= 60 => 5,
        Some(_) => -10,
        None => 0,
    }
}

fn recency_bonus(days_since: Option<i64>) -> i32 {
    match days_since {
        Some(d) if d <= 3 => 20,
        Some(d) if d <= 7 => 10,
        Some(d) if d <= 14 => 0,
        Some(d) if d <= 21 => -10,
        Some(_) => -20,
        None => 0,
    }
}

fn engagement_bonus(thread_email_count: u32) -> i32 {
    if thread_email_count > 3 {
        15
    } else if thread_email_count > 1 {
        5
    } else {
        0
    }
}

/// Inputs to one score, already consolidated at the thread level.
pub struct ScoreInputs<'a> {
    pub status: Status,
    pub status_confidence: Option<u8>,
    pub days_since_contact: Option<i64>,
    pub company_known: bool,
    pub role_title: Option<&'a str>,
    pub thread_email_count: u32,
}

/// Compute the bounded priority score.
pub fn priority_score(inputs: &ScoreInputs) -> u8 {
    let role_known = inputs
        .role_title
        .is_some_and(|role| !role.is_empty() && role != UNKNOWN_ROLE);

    let score = BASE_SCORE
        + status_weight(inputs.status)
        + confidence_bonus(inputs.status_confidence)
        + recency_bonus(inputs.days_since_contact)
        + if inputs.company_known { 10 } else { 0 }
        + if role_known { 10 } else { 0 }
        + engagement_bonus(inputs.thread_email_count);

    score.clamp(0, 100) as u8
}

/// Map a score onto its follow-up urgency level.
pub fn priority_level(score: u8) -> PriorityLevel {
    if score >= 80 {
        PriorityLevel::Critical
    } else if score >= 65 {
        PriorityLevel::High
    } else if score >= 50 {
        PriorityLevel::Medium
    } else if score >= 35 {
        PriorityLevel::Low
    } else {
        PriorityLevel::Inactive
    }
}

/// Decision table keyed on (pipeline status, record status). First match
/// wins, mirroring the triage workflow: closed and ghosted are absolute,
/// then the actionable overlaps, then the catch-all.
pub fn recommended_action(pipeline: PipelineStatus, status: Status) -> &'static str {
    match pipeline {
        PipelineStatus::Closed => "No action needed",
        PipelineStatus::Ghosted => "Send follow-up or mark inactive",
        PipelineStatus::Hot if status == Status::InterviewScheduled => "Prepare for interview",
        PipelineStatus::Cooling if matches!(status, Status::Applied | Status::FollowUp) => {
            "Send polite follow-up"
        }
        PipelineStatus::Cold => "Final follow-up attempt",
        PipelineStatus::Warm | PipelineStatus::Hot => "Monitor - no action needed",
        _ => "Review status",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> ScoreInputs<'static> {
        ScoreInputs {
            status: Status::Applied,
            status_confidence: None,
            days_since_contact: None,
            company_known: false,
            role_title: None,
            thread_email_count: 1,
        }
    }

    #[test]
    fn test_maximal_record_saturates() {
        // interview +40, confidence 90 +15, 2 days ago +20, company +10,
        // role +10, 5-email thread +15 — raw 160, clamped to 100.
        let score = priority_score(&ScoreInputs {
            status: Status::InterviewScheduled,
            status_confidence: Some(90),
            days_since_contact: Some(2),
            company_known: true,
            role_title: Some("Platform Engineer"),
            thread_email_count: 5,
        });
        assert_eq!(score, 100);
        assert_eq!(priority_level(score), PriorityLevel::Critical);
    }

    #[test]
    fn test_rejected_stale_record_floors() {
        let score = priority_score(&ScoreInputs {
            status: Status::Rejected,
            status_confidence: Some(30),
            days_since_contact: Some(60),
            ..inputs()
        });
        // 50 - 50 - 10 - 20 = -30, clamped to 0
        assert_eq!(score, 0);
        assert_eq!(priority_level(score), PriorityLevel::Inactive);
    }

    #[test]
    fn test_absent_inputs_are_neutral() {
        let score = priority_score(&inputs());
        // 50 + 20 applied, everything else absent
        assert_eq!(score, 70);
    }

    #[test]
    fn test_unknown_role_sentinel_earns_no_bonus() {
        let without = priority_score(&inputs());
        let sentinel = priority_score(&ScoreInputs {
            role_title: Some(UNKNOWN_ROLE),
            ..inputs()
        });
        assert_eq!(without, sentinel);
        let with = priority_score(&ScoreInputs {
            role_title: Some("Data Engineer"),
            ..inputs()
        });
        assert_eq!(with, without + 10);
    }

    #[test]
    fn test_engagement_tiers() {
        let single = priority_score(&inputs());
        let pair = priority_score(&ScoreInputs {
            thread_email_count: 2,
            ..inputs()
        });
        let busy = priority_score(&ScoreInputs {
            thread_email_count: 4,
            ..inputs()
        });
        assert_eq!(pair, single + 5);
        assert_eq!(busy, single + 15);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(priority_level(100), PriorityLevel::Critical);
        assert_eq!(priority_level(80), PriorityLevel::Critical);
        assert_eq!(priority_level(79), PriorityLevel::High);
        assert_eq!(priority_level(65), PriorityLevel::High);
        assert_eq!(priority_level(64), PriorityLevel::Medium);
        assert_eq!(priority_level(50), PriorityLevel::Medium);
        assert_eq!(priority_level(49), PriorityLevel::Low);
        assert_eq!(priority_level(35), PriorityLevel::Low);
        assert_eq!(priority_level(34), PriorityLevel::Inactive);
        assert_eq!(priority_level(0), PriorityLevel::Inactive);
    }

    #[test]
    fn test_recommended_actions() {
        assert_eq!(
            recommended_action(PipelineStatus::Closed, Status::Rejected),
            "No action needed"
        );
        assert_eq!(
            recommended_action(PipelineStatus::Ghosted, Status::Applied),
            "Send follow-up or mark inactive"
        );
        assert_eq!(
            recommended_action(PipelineStatus::Hot, Status::InterviewScheduled),
            "Prepare for interview"
        );
        assert_eq!(
            recommended_action(PipelineStatus::Hot, Status::Applied),
            "Monitor - no action needed"
        );
        assert_eq!(
            recommended_action(PipelineStatus::Cooling, Status::Applied),
            "Send polite follow-up"
        );
        assert_eq!(
            recommended_action(PipelineStatus::Cooling, Status::InterviewScheduled),
            "Review status"
        );
        assert_eq!(
            recommended_action(PipelineStatus::Cold, Status::Applied),
            "Final follow-up attempt"
        );
        assert_eq!(
            recommended_action(PipelineStatus::Warm, Status::FollowUp),
            "Monitor - no action needed"
        );
        assert_eq!(
            recommended_action(PipelineStatus::UnknownTimeline, Status::Applied),
            "Review status"
        );
    }
}
