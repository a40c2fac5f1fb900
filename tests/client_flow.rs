mod common;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use contact_form_service::app::build_router;
use contact_form_service::client::{
    ContactForm, HttpContactApi, LeadLog, MathCaptcha, MemoryKeyValueStore, SubmissionFlow,
    SubmitOutcome,
};
use contact_form_service::features::contacts::{ContactStore, InMemoryContactStore};

use common::test_config;

async fn spawn_server() -> (String, Arc<InMemoryContactStore>) {
    let store = Arc::new(InMemoryContactStore::new());
    let app = build_router(&test_config(0), store.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    (format!("http://{}", addr), store)
}

fn ready_flow(base_url: &str, leads: LeadLog) -> SubmissionFlow {
    let api = HttpContactApi::new(base_url, Duration::from_secs(5)).unwrap();
    let mut flow = SubmissionFlow::new(Some(Arc::new(api)), leads).with_debug(true);
    *flow.form_mut() = ContactForm {
        name: "Ada Lovelace".into(),
        email: "Ada@Example.com".into(),
        phone: String::new(),
        subject: "Engines".into(),
        message: "About the analytical engine.".into(),
    };
    flow.set_captcha(MathCaptcha::new(6, 7));
    flow.set_captcha_answer("13");
    flow
}

#[tokio::test]
async fn form_submission_reaches_the_server() {
    let (base_url, store) = spawn_server().await;
    let leads = LeadLog::new(Arc::new(MemoryKeyValueStore::new()));
    let mut flow = ready_flow(&base_url, leads);

    let outcome = flow.submit().await;

    let receipt = match outcome {
        SubmitOutcome::Success(receipt) => receipt,
        other => panic!("expected success, got {:?}", other),
    };
    let saved = store.find_by_id(receipt.id).await.unwrap().unwrap();
    assert_eq!(saved.email, "ada@example.com");
    assert_eq!(saved.source_address, "127.0.0.1");
    assert_eq!(flow.form(), &ContactForm::default());
    assert_eq!(flow.view_all_leads().map(|l| l.len()), Some(1));
}

#[tokio::test]
async fn server_rejection_falls_back_locally() {
    let (base_url, store) = spawn_server().await;
    let leads = LeadLog::new(Arc::new(MemoryKeyValueStore::new()));
    let mut flow = ready_flow(&base_url, leads.clone());
    // Passes the client rules but exceeds the stored name length
    flow.form_mut().name = "n".repeat(150);

    let outcome = flow.submit().await;

    assert!(matches!(outcome, SubmitOutcome::LocalFallback(_)));
    assert_eq!(store.count().await.unwrap(), 0);
    assert_eq!(leads.all().len(), 1);
}
