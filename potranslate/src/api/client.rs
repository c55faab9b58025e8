//! Blocking HTTP client for the Gengo v2 API.

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use reqwest::{
    Method, Url,
    blocking::{Client, Response},
    header::ACCEPT,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use sha1::Sha1;
use tracing::debug;

use crate::{
    api::{
        TranslationService,
        types::{
            JobAction, JobBatch, JobDetail, JobResponse, OrderJobs, OrderResponse, SubmitReceipt,
            unwrap_envelope,
        },
    },
    config::ClientConfig,
    error::Error,
};

type HmacSha1 = Hmac<Sha1>;

/// Signs a request timestamp: hex HMAC-SHA1 of `timestamp` keyed with the
/// private key.
pub fn sign(private_key: &str, timestamp: &str) -> Result<String, Error> {
    let mut mac = HmacSha1::new_from_slice(private_key.as_bytes())
        .map_err(|e| Error::UnexpectedResponse(format!("cannot sign request: {e}")))?;
    mac.update(timestamp.as_bytes());
    Ok(format!("{:x}", mac.finalize().into_bytes()))
}

/// Client for the Gengo translation API.
///
/// Constructed once from a [`ClientConfig`] and handed to every workflow step.
pub struct GengoClient {
    config: ClientConfig,
    base: Url,
    http: Client,
}

impl GengoClient {
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let mut base = config.endpoint.base_url().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base).map_err(|e| Error::InvalidUrl(format!("{base}: {e}")))?;

        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .https_only(config.https_only)
            .danger_accept_invalid_certs(false)
            .timeout(config.timeout)
            .build()?;

        Ok(GengoClient { config, base, http })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn auth_params(&self) -> Result<Vec<(&'static str, String)>, Error> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default()
            .to_string();
        let signature = sign(&self.config.credentials.private_key, &timestamp)?;
        Ok(vec![
            ("api_key", self.config.credentials.public_key.clone()),
            ("api_sig", signature),
            ("ts", timestamp),
        ])
    }

    fn get(&self, segments: &[&str]) -> Result<Value, Error> {
        let url = self.url(segments)?;
        debug!(method = "GET", %url, "sending request");
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .query(&self.auth_params()?)
            .send()?;
        read_json(response)
    }

    fn send_data<T: Serialize>(
        &self,
        method: Method,
        segments: &[&str],
        data: &T,
    ) -> Result<Value, Error> {
        let url = self.url(segments)?;
        let mut form = self.auth_params()?;
        form.push(("data", serde_json::to_string(data)?));

        debug!(%method, %url, "sending request");
        let response = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()?;
        read_json(response)
    }
}

fn read_json(response: Response) -> Result<Value, Error> {
    let status = response.status();
    let body = response.text()?;
    debug!(%status, bytes = body.len(), "received response");
    serde_json::from_str(&body)
        .map_err(|_| Error::UnexpectedResponse(format!("HTTP {status}: {body}")))
}

fn decode<T: DeserializeOwned>(raw: Value) -> Result<T, Error> {
    let response = unwrap_envelope(raw)?;
    serde_json::from_value(response).map_err(Error::Json)
}

impl TranslationService for GengoClient {
    fn submit_jobs(&self, batch: &JobBatch) -> Result<SubmitReceipt, Error> {
        let raw = self.send_data(Method::POST, &["translate", "jobs"], batch)?;
        Ok(SubmitReceipt::from_value(raw))
    }

    fn order_jobs(&self, order_id: &str) -> Result<OrderJobs, Error> {
        let raw = self.get(&["translate", "order", order_id])?;
        decode::<OrderResponse>(raw).map(|response| response.order)
    }

    fn job(&self, job_id: &str) -> Result<JobDetail, Error> {
        let raw = self.get(&["translate", "job", job_id])?;
        decode::<JobResponse>(raw).map(|response| response.job)
    }

    fn update_job(&self, job_id: &str, action: &JobAction) -> Result<(), Error> {
        let raw = self.send_data(Method::PUT, &["translate", "job", job_id], action)?;
        unwrap_envelope(raw).map(|_| ())
    }
}
