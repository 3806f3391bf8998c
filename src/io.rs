//! CSV boundary: lenient batch reader and stable-schema writer.
//!
//! Reading is per-row fault-isolated: a malformed row is logged and
//! skipped, never fatal to the batch. Writing emits a fixed column set in
//! a fixed order; downstream consumers key on the header, so the
//! `OutputRow` field order is part of the contract.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::error::JobtrailError;
use crate::model::{
    EmailRecord, OpportunityType, PipelineRecord, PipelineStatus, PriorityLevel, ResponseType,
    Status,
};

/// Read one batch of input records. Rows that fail to deserialize are
/// skipped with a warning; an unreadable file is fatal.
pub fn read_records(path: &Path) -> Result<Vec<EmailRecord>, JobtrailError> {
    let file = File::open(path).map_err(|source| JobtrailError::InputNotReadable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (index, row) in reader.deserialize::<EmailRecord>().enumerate() {
        match row {
            Ok(record) => records.push(record),
            Err(err) => {
                skipped += 1;
                log::warn!("skipping unreadable row {}: {}", index + 2, err);
            }
        }
    }
    if skipped > 0 {
        log::warn!("skipped {} of {} input rows", skipped, records.len() + skipped);
    }
    Ok(records)
}

/// One output row. Field order defines the stable CSV header.
#[derive(Debug, Serialize)]
pub struct OutputRow<'a> {
    pub sender_email: &'a str,
    pub sender_domain: &'a str,
    pub subject_line: &'a str,
    pub body_preview: &'a str,
    pub status: Status,
    pub status_confidence: Option<u8>,
    pub email_date: Option<&'a str>,
    pub company_name: &'a str,
    pub company_before_cleanup: Option<&'a str>,
    pub company_confidence: u8,
    pub role_title: Option<&'a str>,
    pub role_confidence: Option<u8>,
    pub thread_id: Option<&'a str>,
    pub thread_email_count: u32,
    pub thread_emails: Option<&'a str>,
    pub first_email_date: Option<&'a str>,
    pub last_email_date: Option<&'a str>,
    pub pipeline_status: PipelineStatus,
    pub days_since_contact: Option<i64>,
    pub priority_score: u8,
    pub priority_level: PriorityLevel,
    pub recommended_action: &'a str,
    pub response_type: ResponseType,
    pub opportunity_type: OpportunityType,
}

impl<'a> From<&'a PipelineRecord> for OutputRow<'a> {
    fn from(record: &'a PipelineRecord) -> Self {
        let consolidated = &record.record;
        let resolved = &consolidated.record;
        let email = &resolved.email;
        OutputRow {
            sender_email: &email.sender_email,
            sender_domain: &email.sender_domain,
            subject_line: &email.subject_line,
            body_preview: &email.body_preview,
            status: email.status,
            status_confidence: consolidated.status_confidence,
            email_date: email.email_date.as_deref(),
            company_name: &resolved.company_name,
            company_before_cleanup: resolved.company_before_cleanup.as_deref(),
            company_confidence: consolidated.company_confidence,
            role_title: email.role_title.as_deref(),
            role_confidence: consolidated.role_confidence,
            thread_id: consolidated.thread_id.as_deref(),
            thread_email_count: consolidated.thread_email_count,
            thread_emails: consolidated.thread_emails.as_deref(),
            first_email_date: consolidated.first_email_date.as_deref(),
            last_email_date: consolidated.last_email_date.as_deref(),
            pipeline_status: record.pipeline_status,
            days_since_contact: record.days_since_contact,
            priority_score: record.priority_score,
            priority_level: record.priority_level,
            recommended_action: &record.recommended_action,
            response_type: record.response_type,
            opportunity_type: record.opportunity_type,
        }
    }
}

/// Write the scored batch with the stable header.
pub fn write_records(path: &Path, records: &[PipelineRecord]) -> Result<(), JobtrailError> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(OutputRow::from(record))?;
    }
    writer.flush()?;
    log::info!("wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Write any serializable summary as pretty JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), JobtrailError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_lenient_fields() {
        let file = temp_csv(
            "sender_email,sender_domain,subject_line,body_preview,status,status_confidence,email_date,company_name,role_title,thread_email_count\n\
             a@acme.com,acme.com,Interview,Hello,interview_scheduled,85.0,2025-06-01,Acme,Engineer,2\n\
             b@x.com,x.com,Update,,phone_screen,n/a,,,,\n",
        );
        let records = read_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].status, Status::InterviewScheduled);
        assert_eq!(records[0].status_confidence, Some(85));
        assert_eq!(records[0].thread_email_count, 2);
        assert_eq!(records[0].company_name.as_deref(), Some("Acme"));

        // Unknown status label, garbage confidence, blank cells
        assert_eq!(records[1].status, Status::Unknown);
        assert_eq!(records[1].status_confidence, None);
        assert_eq!(records[1].email_date, None);
        assert_eq!(records[1].company_name, None);
        assert_eq!(records[1].thread_email_count, 1);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = read_records(Path::new("/nonexistent/batch.csv"));
        assert!(result.is_err());
    }

    #[test]
    fn test_stable_output_header() {
        use crate::model::{ConsolidatedRecord, ResolvedRecord};

        let record = PipelineRecord {
            record: ConsolidatedRecord::single(ResolvedRecord {
                email: EmailRecord {
                    sender_email: "a@acme.com".to_string(),
                    subject_line: "Interview".to_string(),
                    status: Status::InterviewScheduled,
                    ..EmailRecord::default()
                },
                company_name: "Acme".to_string(),
                company_confidence: 75,
                company_before_cleanup: None,
            }),
            pipeline_status: PipelineStatus::Hot,
            days_since_contact: Some(2),
            priority_score: 90,
            priority_level: PriorityLevel::Critical,
            recommended_action: "Prepare for interview".to_string(),
            response_type: ResponseType::Responded,
            opportunity_type: OpportunityType::InterviewProcess,
        };

        let file = tempfile::NamedTempFile::new().unwrap();
        write_records(file.path(), &[record]).unwrap();
        let written = std::fs::read_to_string(file.path()).unwrap();
        let header = written.lines().next().unwrap();
        assert_eq!(
            header,
            "sender_email,sender_domain,subject_line,body_preview,status,\
             status_confidence,email_date,company_name,company_before_cleanup,\
             company_confidence,role_title,role_confidence,thread_id,\
             thread_email_count,thread_emails,first_email_date,last_email_date,\
             pipeline_status,days_since_contact,priority_score,priority_level,\
             recommended_action,response_type,opportunity_type"
        );
        let row = written.lines().nth(1).unwrap();
        assert!(row.contains("interview_scheduled"));
        assert!(row.contains("hot"));
        assert!(row.contains("Critical"));
        assert!(row.contains("interview_process"));
    }
}
