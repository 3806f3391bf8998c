//! Thread deduplicator: fuzzy-groups interview records into conversation
//! threads and folds each thread into one consolidated record.
//!
//! Grouping is a single ordered pass with greedy first-fit assignment:
//! a record joins the first existing thread where any member's normalized
//! subject is similar enough AND the company key matches exactly. This is
//! O(n*k) over existing threads and resolves ties by thread creation
//! order, which keeps the pass deterministic for a given input order.
//! Only `interview_scheduled` records participate; everything else passes
//! through one-to-one.

use crate::config::PipelineConfig;
use crate::dates::EmailDate;
use crate::model::{ConsolidatedRecord, ResolvedRecord, Status};
use crate::text::{normalize_subject, truncate_chars};

struct ThreadMember {
    record: ResolvedRecord,
    normalized_subject: String,
    company_key: String,
    date: EmailDate,
}

struct Thread {
    members: Vec<ThreadMember>,
}

/// Normalized-subject similarity, symmetric in [0, 1]. Empty strings never
/// match anything.
fn subject_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::normalized_levenshtein(a, b)
}

/// Consolidate interview threads. Non-interview records keep their input
/// order and are followed by one consolidated record per thread, in thread
/// creation order.
pub fn consolidate(records: Vec<ResolvedRecord>, config: &PipelineConfig) -> Vec<ConsolidatedRecord> {
    let mut output = Vec::new();
    let mut threads: Vec<Thread> = Vec::new();

    for record in records {
        if record.email.status != Status::InterviewScheduled {
            output.push(ConsolidatedRecord::single(record));
            continue;
        }

        let member = ThreadMember {
            normalized_subject: normalize_subject(&record.email.subject_line),
            company_key: record.company_name.to_lowercase(),
            date: EmailDate::parse(record.email.email_date.as_deref()),
            record,
        };

        let existing = threads.iter_mut().find(|thread| {
            thread.members.iter().any(|m| {
                m.company_key == member.company_key
                    && subject_similarity(&m.normalized_subject, &member.normalized_subject)
                        >= config.subject_similarity_threshold
            })
        });

        match existing {
            Some(thread) => thread.members.push(member),
            None => threads.push(Thread {
                members: vec![member],
            }),
        }
    }

    let interview_count: usize = threads.iter().map(|t| t.members.len()).sum();
    if !threads.is_empty() {
        log::info!(
            "consolidated {} interview emails into {} threads",
            interview_count,
            threads.len()
        );
    }

    for (index, thread) in threads.into_iter().enumerate() {
        output.push(consolidate_thread(index, thread));
    }
    output
}

fn consolidate_thread(index: usize, thread: Thread) -> ConsolidatedRecord {
    // Max confidences are folded before the representative is moved out:
    // a single high-confidence signal anywhere in the thread is trusted.
    let status_confidence = thread
        .members
        .iter()
        .filter_map(|m| m.record.email.status_confidence)
        .max();
    let role_confidence = thread
        .members
        .iter()
        .filter_map(|m| m.record.email.role_confidence)
        .max();
    let company_confidence = thread
        .members
        .iter()
        .map(|m| m.record.company_confidence)
        .max()
        .unwrap_or(0);

    let timeline = thread
        .members
        .iter()
        .map(|m| {
            let date = match &m.record.email.email_date {
                Some(raw) => truncate_chars(raw, 10),
                None => "No date",
            };
            let subject = match m.record.email.subject_line.trim() {
                "" => "No subject",
                s => truncate_chars(s, 50),
            };
            format!("{}: {}", date, subject)
        })
        .collect::<Vec<_>>()
        .join("; ");

    let first_email_date = thread
        .members
        .iter()
        .filter(|m| m.date.is_parsed())
        .min_by_key(|m| m.date.timestamp())
        .and_then(|m| m.record.email.email_date.clone());
    let last_email_date = thread
        .members
        .iter()
        .filter(|m| m.date.is_parsed())
        .max_by_key(|m| m.date.timestamp())
        .and_then(|m| m.record.email.email_date.clone());

    // Folded count: members each carry their own prior count (default 1),
    // so re-consolidating an already-consolidated set stays exact.
    let member_count: u32 = thread
        .members
        .iter()
        .map(|m| m.record.email.thread_email_count.max(1))
        .sum();

    let representative = select_representative(thread.members);

    ConsolidatedRecord {
        record: representative,
        thread_id: Some(format!("thread_{:03}", index)),
        thread_email_count: member_count,
        thread_emails: Some(timeline),
        first_email_date,
        last_email_date,
        status_confidence,
        company_confidence,
        role_confidence,
    }
}

/// Prefer the member with the most recent parseable date; with no parseable
/// dates at all, keep the first member in input order.
fn select_representative(members: Vec<ThreadMember>) -> ResolvedRecord {
    let mut best: Option<usize> = None;
    for (i, member) in members.iter().enumerate() {
        let Some(ts) = member.date.timestamp() else {
            continue;
        };
        match best {
            Some(b) if members[b].date.timestamp().is_some_and(|bt| bt >= ts) => {}
            _ => best = Some(i),
        }
    }
    let index = best.unwrap_or(0);
    members
        .into_iter()
        .nth(index)
        .map(|m| m.record)
        .expect("thread has at least one member")
}
