#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    fs,
    io::Cursor,
    path::PathBuf,
};

use potranslate::{
    Console, Error, JobAction, JobBatch, JobDetail, OrderJobs, TranslationService, api::SubmitReceipt,
};
use serde_json::{Value, json};
use tempfile::TempDir;

/// A request the fake service received.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Submit(JobBatch),
    Order(String),
    Job(String),
    Update(String, JobAction),
}

/// In-memory stand-in for the Gengo API.
///
/// Order states are answered in sequence; the last one repeats.
#[derive(Default)]
pub struct FakeService {
    receipt: Option<Value>,
    orders: RefCell<VecDeque<OrderJobs>>,
    jobs: HashMap<String, JobDetail>,
    calls: RefCell<Vec<Call>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accepting(order_id: &str) -> Self {
        Self::new().with_receipt(json!({
            "opstat": "ok",
            "response": { "order_id": order_id, "job_count": 1, "credits_used": "0.50" }
        }))
    }

    pub fn with_receipt(mut self, receipt: Value) -> Self {
        self.receipt = Some(receipt);
        self
    }

    pub fn with_order(self, order: OrderJobs) -> Self {
        self.orders.borrow_mut().push_back(order);
        self
    }

    pub fn with_job(mut self, job_id: &str, slug: &str, body_src: &str, body_tgt: &str) -> Self {
        self.jobs.insert(
            job_id.to_string(),
            JobDetail {
                job_id: job_id.to_string(),
                slug: slug.to_string(),
                body_src: body_src.to_string(),
                body_tgt: body_tgt.to_string(),
                status: "reviewable".to_string(),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn submitted(&self) -> Vec<JobBatch> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Submit(batch) => Some(batch),
                _ => None,
            })
            .collect()
    }

    pub fn updates(&self) -> Vec<(String, JobAction)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Update(job_id, action) => Some((job_id, action)),
                _ => None,
            })
            .collect()
    }
}

impl TranslationService for FakeService {
    fn submit_jobs(&self, batch: &JobBatch) -> Result<SubmitReceipt, Error> {
        self.calls.borrow_mut().push(Call::Submit(batch.clone()));
        let raw = self
            .receipt
            .clone()
            .unwrap_or_else(|| json!({ "opstat": "error", "err": { "code": 2750, "msg": "no receipt" } }));
        Ok(SubmitReceipt::from_value(raw))
    }

    fn order_jobs(&self, order_id: &str) -> Result<OrderJobs, Error> {
        self.calls.borrow_mut().push(Call::Order(order_id.to_string()));
        let mut orders = self.orders.borrow_mut();
        let order = if orders.len() > 1 {
            orders.pop_front()
        } else {
            orders.front().cloned()
        };
        order.ok_or_else(|| Error::Api {
            code: Some(2400),
            message: format!("unknown order {order_id}"),
        })
    }

    fn job(&self, job_id: &str) -> Result<JobDetail, Error> {
        self.calls.borrow_mut().push(Call::Job(job_id.to_string()));
        self.jobs.get(job_id).cloned().ok_or_else(|| Error::Api {
            code: Some(2050),
            message: format!("unknown job {job_id}"),
        })
    }

    fn update_job(&self, job_id: &str, action: &JobAction) -> Result<(), Error> {
        self.calls
            .borrow_mut()
            .push(Call::Update(job_id.to_string(), action.clone()));
        Ok(())
    }
}

pub fn order(order_id: &str, total_jobs: usize, reviewable: &[&str], approved: &[&str]) -> OrderJobs {
    OrderJobs {
        order_id: order_id.to_string(),
        total_jobs,
        jobs_reviewable: reviewable.iter().map(|id| id.to_string()).collect(),
        jobs_approved: approved.iter().map(|id| id.to_string()).collect(),
        ..OrderJobs::default()
    }
}

/// Writes `content` to `messages.po` inside a fresh temporary directory.
pub fn write_catalog(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("messages.po");
    fs::write(&path, content).unwrap();
    (dir, path)
}

pub fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
    Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), 20)
}

pub fn console_output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8(console.into_output()).unwrap()
}
