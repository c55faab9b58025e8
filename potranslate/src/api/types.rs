//! Typed payloads exchanged with the Gengo v2 API.

use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser::SerializeMap};
use serde_json::Value;

use crate::error::Error;

/// Gengo service tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Standard,
    Pro,
}

impl Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Standard => write!(f, "standard"),
            Tier::Pro => write!(f, "pro"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    #[default]
    Text,
}

/// One job of an order, built from a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobDescriptor {
    #[serde(rename = "type")]
    pub kind: JobKind,
    /// Identifier of the entry's source text; comes back on the finished job.
    pub slug: String,
    pub body_src: String,
    pub lc_src: String,
    pub lc_tgt: String,
    pub tier: Tier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
}

/// All jobs of one order, in catalog order.
///
/// Serializes as `{"jobs": {"job_0": ..., "job_1": ...}}` with the labels in
/// the same order as the jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobBatch {
    pub jobs: Vec<JobDescriptor>,
}

impl JobBatch {
    pub fn from_jobs(jobs: impl IntoIterator<Item = JobDescriptor>) -> Self {
        JobBatch {
            jobs: jobs.into_iter().collect(),
        }
    }

    /// The per-batch label of the job at `index`.
    pub fn label(index: usize) -> String {
        format!("job_{index}")
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

impl Serialize for JobBatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Labelled<'a>(&'a [JobDescriptor]);

        impl Serialize for Labelled<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (index, job) in self.0.iter().enumerate() {
                    map.serialize_entry(&JobBatch::label(index), job)?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("jobs", &Labelled(&self.jobs))?;
        map.end()
    }
}

/// What the API answered to an order submission.
///
/// The raw document is kept so a rejection can be shown verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReceipt {
    pub opstat: String,
    pub order_id: Option<String>,
    pub raw: Value,
}

impl SubmitReceipt {
    pub fn from_value(raw: Value) -> Self {
        let opstat = raw
            .get("opstat")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let order_id = raw
            .get("response")
            .and_then(|response| response.get("order_id"))
            .and_then(value_to_id);
        SubmitReceipt {
            opstat,
            order_id,
            raw,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.opstat == "ok"
    }
}

/// Job id lists of an order, grouped by job state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrderJobs {
    #[serde(default, deserialize_with = "id_string")]
    pub order_id: String,
    #[serde(deserialize_with = "count")]
    pub total_jobs: usize,
    #[serde(default, deserialize_with = "id_list")]
    pub jobs_available: Vec<String>,
    #[serde(default, deserialize_with = "id_list")]
    pub jobs_pending: Vec<String>,
    #[serde(default, deserialize_with = "id_list")]
    pub jobs_reviewable: Vec<String>,
    #[serde(default, deserialize_with = "id_list")]
    pub jobs_approved: Vec<String>,
    #[serde(default, deserialize_with = "id_list")]
    pub jobs_revising: Vec<String>,
}

impl OrderJobs {
    /// An order counts as complete when as many jobs are approved as the
    /// order declares in total.
    pub fn is_complete(&self) -> bool {
        self.jobs_approved.len() == self.total_jobs
    }
}

/// A single job as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobDetail {
    #[serde(deserialize_with = "id_string")]
    pub job_id: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub body_src: String,
    #[serde(default)]
    pub body_tgt: String,
    #[serde(default)]
    pub status: String,
}

/// Decision applied to a reviewable job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum JobAction {
    Approve,
    Revise { comment: String },
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrderResponse {
    pub order: OrderJobs,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobResponse {
    pub job: JobDetail,
}

/// Unwraps the `{opstat, response, err}` envelope every endpoint answers with.
pub(crate) fn unwrap_envelope(mut raw: Value) -> Result<Value, Error> {
    let opstat = raw.get("opstat").and_then(Value::as_str).unwrap_or_default();
    if opstat != "ok" {
        let err = raw.get("err");
        let code = err
            .and_then(|e| e.get("code"))
            .and_then(|code| code.as_i64().or_else(|| code.as_str()?.parse().ok()));
        let message = err
            .and_then(|e| e.get("msg"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| raw.to_string());
        return Err(Error::Api { code, message });
    }
    Ok(raw
        .get_mut("response")
        .map(Value::take)
        .unwrap_or(Value::Null))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn value_to_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    StringOrNumber::deserialize(deserializer).map(StringOrNumber::into_string)
}

fn id_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let ids = Option::<Vec<StringOrNumber>>::deserialize(deserializer)?;
    Ok(ids
        .unwrap_or_default()
        .into_iter()
        .map(StringOrNumber::into_string)
        .collect())
}

fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let raw = StringOrNumber::deserialize(deserializer)?.into_string();
    raw.trim()
        .parse()
        .map_err(|_| de::Error::custom(format!("invalid job count `{raw}`")))
}
