use std::{io::Read, thread};

use potranslate::{
    ClientConfig, Credentials, Endpoint, Error, GengoClient, JobAction, JobBatch, JobDescriptor, Tier,
    TranslationService, api::JobKind, api::client::sign,
};
use reqwest::Url;
use serde_json::Value;
use tiny_http::{Header, Response, Server};

#[derive(Debug)]
struct Captured {
    method: String,
    path: String,
    query: Vec<(String, String)>,
    form: Vec<(String, String)>,
}

impl Captured {
    fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .chain(&self.form)
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn data(&self) -> Value {
        serde_json::from_str(self.param("data").expect("data parameter")).expect("json data")
    }
}

fn pairs(encoded: &str) -> Vec<(String, String)> {
    Url::parse(&format!("http://localhost/?{encoded}"))
        .unwrap()
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

/// Answers exactly one request with `body` and hands back what was received.
fn serve_once(body: &'static str) -> (GengoClient, thread::JoinHandle<Captured>) {
    let server = Server::http("127.0.0.1:0").expect("start server");
    let addr = server.server_addr().to_string();

    let handle = thread::spawn(move || {
        let mut request = server.recv().expect("request");
        let mut form = String::new();
        request.as_reader().read_to_string(&mut form).expect("body");
        let (path, query) = match request.url().split_once('?') {
            Some((path, query)) => (path.to_string(), pairs(query)),
            None => (request.url().to_string(), Vec::new()),
        };
        let captured = Captured {
            method: request.method().to_string(),
            path,
            query,
            form: pairs(&form),
        };
        let response = Response::from_string(body)
            .with_header(Header::from_bytes("Content-Type", "application/json").expect("header"));
        request.respond(response).expect("respond");
        captured
    });

    let config = ClientConfig::new(Credentials::new("public", "private"))
        .with_endpoint(Endpoint::Custom(format!("http://{addr}/v2/")))
        .with_https_only(false);
    (GengoClient::new(config).expect("client"), handle)
}

fn assert_signed(captured: &Captured) {
    assert_eq!(captured.param("api_key"), Some("public"));
    let ts = captured.param("ts").expect("timestamp");
    assert!(ts.parse::<u64>().is_ok());
    assert_eq!(captured.param("api_sig"), Some(sign("private", ts).unwrap().as_str()));
}

#[test]
fn test_submit_posts_signed_form() {
    let (client, handle) = serve_once(r#"{"opstat":"ok","response":{"order_id":42,"job_count":1}}"#);

    let batch = JobBatch::from_jobs([JobDescriptor {
        kind: JobKind::Text,
        slug: "7b502c3a1f48c8609ae212cdfb639dee39673f5e".to_string(),
        body_src: "Hello world".to_string(),
        lc_src: "en".to_string(),
        lc_tgt: "de".to_string(),
        tier: Tier::Pro,
        comment: None,
        tone: Some("friendly".to_string()),
    }]);
    let receipt = client.submit_jobs(&batch).unwrap();
    let captured = handle.join().unwrap();

    assert!(receipt.is_ok());
    assert_eq!(receipt.order_id.as_deref(), Some("42"));

    assert_eq!(captured.method, "POST");
    assert_eq!(captured.path, "/v2/translate/jobs");
    assert_signed(&captured);

    let job = &captured.data()["jobs"]["job_0"];
    assert_eq!(job["type"], "text");
    assert_eq!(job["slug"], "7b502c3a1f48c8609ae212cdfb639dee39673f5e");
    assert_eq!(job["body_src"], "Hello world");
    assert_eq!(job["lc_src"], "en");
    assert_eq!(job["lc_tgt"], "de");
    assert_eq!(job["tier"], "pro");
    assert_eq!(job["tone"], "friendly");
    assert!(job.get("comment").is_none());
}

#[test]
fn test_submit_returns_rejection_as_receipt() {
    let (client, handle) =
        serve_once(r#"{"opstat":"error","err":{"code":2750,"msg":"Insufficient credits"}}"#);

    let receipt = client.submit_jobs(&JobBatch::default()).unwrap();
    handle.join().unwrap();

    assert!(!receipt.is_ok());
    assert_eq!(receipt.order_id, None);
    assert_eq!(receipt.raw["err"]["msg"], "Insufficient credits");
}

#[test]
fn test_order_jobs_reads_job_lists() {
    let (client, handle) = serve_once(
        r#"{"opstat":"ok","response":{"order":{
            "order_id":"42","total_jobs":"3","jobs_available":[],"jobs_pending":["1"],
            "jobs_reviewable":[2],"jobs_approved":["3"],"jobs_revising":null
        }}}"#,
    );

    let order = client.order_jobs("42").unwrap();
    let captured = handle.join().unwrap();

    assert_eq!(captured.method, "GET");
    assert_eq!(captured.path, "/v2/translate/order/42");
    assert!(captured.form.is_empty());
    assert_signed(&captured);

    assert_eq!(order.order_id, "42");
    assert_eq!(order.total_jobs, 3);
    assert_eq!(order.jobs_pending, vec!["1".to_string()]);
    assert_eq!(order.jobs_reviewable, vec!["2".to_string()]);
    assert_eq!(order.jobs_approved, vec!["3".to_string()]);
    assert!(order.jobs_revising.is_empty());
    assert!(!order.is_complete());
}

#[test]
fn test_job_reads_bodies() {
    let (client, handle) = serve_once(
        r#"{"opstat":"ok","response":{"job":{
            "job_id":"7","slug":"abc","body_src":"Hello world","body_tgt":"Hallo Welt",
            "status":"reviewable","lc_src":"en","lc_tgt":"de"
        }}}"#,
    );

    let job = client.job("7").unwrap();
    let captured = handle.join().unwrap();

    assert_eq!(captured.method, "GET");
    assert_eq!(captured.path, "/v2/translate/job/7");
    assert_eq!(job.slug, "abc");
    assert_eq!(job.body_src, "Hello world");
    assert_eq!(job.body_tgt, "Hallo Welt");
    assert_eq!(job.status, "reviewable");
}

#[test]
fn test_update_job_puts_action() {
    let (client, handle) = serve_once(r#"{"opstat":"ok","response":{}}"#);

    client
        .update_job(
            "7",
            &JobAction::Revise {
                comment: "Please say Welt".to_string(),
            },
        )
        .unwrap();
    let captured = handle.join().unwrap();

    assert_eq!(captured.method, "PUT");
    assert_eq!(captured.path, "/v2/translate/job/7");
    assert_signed(&captured);
    let data = captured.data();
    assert_eq!(data["action"], "revise");
    assert_eq!(data["comment"], "Please say Welt");
}

#[test]
fn test_error_envelope_becomes_api_error() {
    let (client, handle) = serve_once(r#"{"opstat":"error","err":{"code":"2050","msg":"job not found"}}"#);

    let err = client.job("99").unwrap_err();
    handle.join().unwrap();

    match err {
        Error::Api { code, message } => {
            assert_eq!(code, Some(2050));
            assert_eq!(message, "job not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_non_json_answer_is_unexpected() {
    let (client, handle) = serve_once("<html>maintenance</html>");

    let err = client.order_jobs("42").unwrap_err();
    handle.join().unwrap();

    match err {
        Error::UnexpectedResponse(text) => assert!(text.contains("maintenance")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_plain_http_is_refused_by_default() {
    let config = ClientConfig::new(Credentials::new("public", "private"))
        .with_endpoint(Endpoint::Custom("http://127.0.0.1:9/v2/".to_string()));
    let client = GengoClient::new(config).unwrap();

    assert!(matches!(client.order_jobs("42"), Err(Error::Http(_))));
}
