//! Job status documents and HTTP error bodies.

use std::fmt;
use std::str::FromStr;

use hmc_core::{EntryRecord, Record};

/// Status reported by a job response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    NotStarted,
    Running,
    CompletedOk,
    CompletedWithWarnings,
    CompletedWithError,
}

impl JobStatus {
    pub const fn is_complete(self) -> bool {
        matches!(
            self,
            JobStatus::CompletedOk
                | JobStatus::CompletedWithWarnings
                | JobStatus::CompletedWithError
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            JobStatus::NotStarted => "NOT_STARTED",
            JobStatus::Running => "RUNNING",
            JobStatus::CompletedOk => "COMPLETED_OK",
            JobStatus::CompletedWithWarnings => "COMPLETED_WITH_WARNINGS",
            JobStatus::CompletedWithError => "COMPLETED_WITH_ERROR",
        }
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_STARTED" => Ok(JobStatus::NotStarted),
            "RUNNING" => Ok(JobStatus::Running),
            "COMPLETED_OK" => Ok(JobStatus::CompletedOk),
            "COMPLETED_WITH_WARNINGS" => Ok(JobStatus::CompletedWithWarnings),
            "COMPLETED_WITH_ERROR" => Ok(JobStatus::CompletedWithError),
            other => Err(format!("unknown job status: {other}")),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

record_type! {
    /// Status of an asynchronous job.
    pub struct JobResponse(EntryRecord) = "JobResponse" {
        job_id,
        status,
        operation,
        group,
        /// Milliseconds since the epoch.
        time_started,
        time_completed,
        message,
    }
    nested {
        /// Parameters the job was submitted with.
        parameters: JobParameter = "JobRequestInstance/JobParameters/JobParameter",
        /// Result values reported on completion.
        results: JobParameter = "Results/JobParameter",
    }
}

impl JobResponse {
    /// Parsed job status; unknown values are `None`.
    pub fn job_status(&self) -> Option<JobStatus> {
        self.inner.parse_field("status")
    }

    /// Value of the named result parameter.
    pub fn result(&self, name: &str) -> Option<&str> {
        self.results
            .iter()
            .find(|p| p.name() == Some(name))
            .and_then(JobParameter::value)
    }
}

record_type! {
    pub struct JobParameter(Record) = "JobParameter" {
        name,
        value,
    }
}

record_type! {
    /// Error body returned by the REST server for a failed request.
    pub struct HttpErrorResponse(EntryRecord) = "HttpErrorResponse" {
        status,
        reason_code,
        message,
    }
}

impl HttpErrorResponse {
    pub fn status_code(&self) -> Option<u16> {
        self.inner.parse_field("status")
    }

    /// Request that failed, from the `RequestURI` link.
    pub fn request_uri(&self) -> Option<String> {
        self.inner.attribute("RequestURI", "href")
    }
}
