//! Batch-level aggregation: conversion funnel, activity cadence, and
//! summary statistics over the scored records.
//!
//! All rates are percentages rounded to one decimal and degrade to 0.0 on
//! an empty denominator. Activity metrics only exist when at least one
//! record carries a parseable date.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::dates::EmailDate;
use crate::model::{PipelineRecord, PipelineStatus, PriorityLevel, Status, UNKNOWN_COMPANY};

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn percent(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        round1(numerator as f64 / denominator as f64 * 100.0)
    }
}

// ---------------------------------------------------------------------------
// Conversion funnel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionMetrics {
    pub total_applications: usize,
    pub total_interviews: usize,
    pub total_offers: usize,
    pub interview_rate: f64,
    pub offer_rate: f64,
    pub overall_conversion: f64,
}

/// Statuses that count as a submitted application for funnel purposes.
fn counts_as_application(status: Status) -> bool {
    matches!(
        status,
        Status::Applied | Status::InterviewScheduled | Status::Offer | Status::Rejected
    )
}

pub fn conversion_metrics(records: &[PipelineRecord]) -> ConversionMetrics {
    let statuses = || records.iter().map(|r| r.record.record.email.status);

    let total_applications = statuses().filter(|s| counts_as_application(*s)).count();
    let total_interviews = statuses()
        .filter(|s| *s == Status::InterviewScheduled)
        .count();
    let total_offers = statuses().filter(|s| *s == Status::Offer).count();

    ConversionMetrics {
        total_applications,
        total_interviews,
        total_offers,
        interview_rate: percent(total_interviews, total_applications),
        offer_rate: percent(total_offers, total_interviews),
        overall_conversion: percent(total_offers, total_applications),
    }
}

// ---------------------------------------------------------------------------
// Activity cadence
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityMetrics {
    pub date_range_days: i64,
    pub avg_weekly_activity: f64,
    pub peak_weekly_activity: usize,
    pub avg_monthly_activity: f64,
    /// `YYYY-MM` of the busiest month; earliest wins a tie.
    pub most_active_month: String,
}

/// Cadence over the records with parseable dates. `None` when no record
/// has one.
pub fn activity_metrics(records: &[PipelineRecord]) -> Option<ActivityMetrics> {
    let dates: Vec<_> = records
        .iter()
        .filter_map(|r| {
            match EmailDate::parse(r.record.record.email.email_date.as_deref()) {
                EmailDate::Parsed(dt) => Some(dt),
                EmailDate::Unparseable => None,
            }
        })
        .collect();
    if dates.is_empty() {
        return None;
    }

    let min = dates.iter().min().copied()?;
    let max = dates.iter().max().copied()?;
    let date_range_days = (max.date() - min.date()).num_days() + 1;

    // ISO week and calendar month buckets. BTreeMap keeps chronological
    // order so ties resolve to the earliest bucket.
    let mut weekly: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    let mut monthly: BTreeMap<String, usize> = BTreeMap::new();
    for dt in &dates {
        let iso = dt.iso_week();
        *weekly.entry((iso.year(), iso.week())).or_default() += 1;
        *monthly
            .entry(format!("{:04}-{:02}", dt.year(), dt.month()))
            .or_default() += 1;
    }

    let avg_weekly_activity = round1(dates.len() as f64 / weekly.len() as f64);
    let peak_weekly_activity = weekly.values().copied().max().unwrap_or(0);
    let avg_monthly_activity = round1(dates.len() as f64 / monthly.len() as f64);
    let most_active_month = monthly
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
        .map(|(month, _)| month.clone())?;

    Some(ActivityMetrics {
        date_range_days,
        avg_weekly_activity,
        peak_weekly_activity,
        avg_monthly_activity,
        most_active_month,
    })
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_records: usize,
    pub active_opportunities: usize,
    pub ghosted_opportunities: usize,
    pub high_priority_items: usize,
    pub companies_engaged: usize,
    pub avg_priority_score: f64,
}

pub fn summary_stats(records: &[PipelineRecord]) -> SummaryStats {
    let active_opportunities = records
        .iter()
        .filter(|r| {
            matches!(
                r.pipeline_status,
                PipelineStatus::Hot | PipelineStatus::Warm | PipelineStatus::Cooling
            )
        })
        .count();
    let ghosted_opportunities = records
        .iter()
        .filter(|r| r.pipeline_status == PipelineStatus::Ghosted)
        .count();
    let high_priority_items = records
        .iter()
        .filter(|r| matches!(r.priority_level, PriorityLevel::Critical | PriorityLevel::High))
        .count();

    let mut companies: Vec<&str> = records
        .iter()
        .map(|r| r.record.record.company_name.as_str())
        .filter(|name| *name != UNKNOWN_COMPANY)
        .collect();
    companies.sort_unstable();
    companies.dedup();

    let avg_priority_score = if records.is_empty() {
        0.0
    } else {
        round1(
            records.iter().map(|r| r.priority_score as f64).sum::<f64>() / records.len() as f64,
        )
    };

    SummaryStats {
        total_records: records.len(),
        active_opportunities,
        ghosted_opportunities,
        high_priority_items,
        companies_engaged: companies.len(),
        avg_priority_score,
    }
}
