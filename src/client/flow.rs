use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::api::{ContactApi, SubmissionReceipt};
use crate::client::captcha::MathCaptcha;
use crate::client::leads::{LeadLog, LocalLead};
use crate::client::ClientError;
use crate::shared::validation::{check_contact_fields, ContactFields};

pub const NOTICE_SUCCESS: &str =
    "Thank you! Your message has been saved successfully to our database.";
pub const NOTICE_LOCAL_FALLBACK: &str =
    "Your message has been saved locally. We will sync it when the connection is restored.";
pub const NOTICE_ERROR: &str = "Sorry, there was an error saving your message. Please try again.";
pub const MSG_CAPTCHA_INCORRECT: &str = "Please solve the math problem correctly";

/// The five visitor-editable fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn fields(&self) -> ContactFields<'_> {
        ContactFields {
            name: Some(&self.name),
            email: Some(&self.email),
            phone: Some(&self.phone),
            subject: Some(&self.subject),
            message: Some(&self.message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Editing,
    Submitting,
}

/// Holds the flow in `Submitting` until dropped, including when the submit
/// future is cancelled mid-request.
struct SubmittingGuard<'a>(&'a mut Phase);

impl<'a> SubmittingGuard<'a> {
    fn enter(phase: &'a mut Phase) -> Self {
        *phase = Phase::Submitting;
        Self(phase)
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = Phase::Editing;
    }
}

/// How one press of the submit control resolved
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The API accepted the submission
    Success(SubmissionReceipt),
    /// The API was unavailable; the submission was kept locally
    LocalFallback(LocalLead),
    /// Neither the API nor the local log took the submission
    Error(ClientError),
    /// Client-side validation or the captcha rejected the form. Nothing was sent.
    Blocked(String),
}

impl SubmitOutcome {
    /// Text shown to the visitor
    pub fn notice(&self) -> &str {
        match self {
            SubmitOutcome::Success(_) => NOTICE_SUCCESS,
            SubmitOutcome::LocalFallback(_) => NOTICE_LOCAL_FALLBACK,
            SubmitOutcome::Error(_) => NOTICE_ERROR,
            SubmitOutcome::Blocked(message) => message.as_str(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Success(_))
    }
}

/// Form state machine driving a single visitor's submissions
pub struct SubmissionFlow {
    api: Option<Arc<dyn ContactApi>>,
    leads: LeadLog,
    form: ContactForm,
    captcha: MathCaptcha,
    captcha_answer: String,
    phase: Phase,
    debug: bool,
}

impl SubmissionFlow {
    /// `api = None` runs the form in local-only mode
    pub fn new(api: Option<Arc<dyn ContactApi>>, leads: LeadLog) -> Self {
        Self {
            api,
            leads,
            form: ContactForm::default(),
            captcha: MathCaptcha::generate(),
            captcha_answer: String::new(),
            phase: Phase::Editing,
            debug: false,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn captcha(&self) -> MathCaptcha {
        self.captcha
    }

    pub fn set_captcha(&mut self, captcha: MathCaptcha) {
        self.captcha = captcha;
    }

    pub fn refresh_captcha(&mut self) {
        self.captcha = MathCaptcha::generate();
        self.captcha_answer.clear();
    }

    pub fn set_captcha_answer(&mut self, answer: impl Into<String>) {
        self.captcha_answer = answer.into();
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if let Err(rule) = check_contact_fields(&self.form.fields()) {
            tracing::debug!("Submission blocked on {}: {}", rule.field(), rule);
            return SubmitOutcome::Blocked(rule.message().to_string());
        }
        if !self.captcha.check(&self.captcha_answer) {
            tracing::debug!("Submission blocked: captcha answer incorrect");
            return SubmitOutcome::Blocked(MSG_CAPTCHA_INCORRECT.to_string());
        }

        let guard = SubmittingGuard::enter(&mut self.phase);
        let result = match &self.api {
            Some(api) => api.submit(&self.form).await,
            None => Err(ClientError::ApiUnavailable),
        };
        drop(guard);

        let outcome = match result {
            Ok(receipt) => {
                // Backup copy; the API already has the submission
                if let Err(e) = self.leads.append(&self.form) {
                    tracing::warn!("Failed to keep local backup of submission: {}", e);
                }
                self.form = ContactForm::default();
                SubmitOutcome::Success(receipt)
            }
            Err(e) if e.is_network_error() => {
                tracing::warn!("Contact API unavailable, saving locally: {}", e);
                match self.leads.append(&self.form) {
                    Ok(lead) => {
                        self.form = ContactForm::default();
                        SubmitOutcome::LocalFallback(lead)
                    }
                    Err(storage) => {
                        tracing::error!("Failed to save submission locally: {}", storage);
                        SubmitOutcome::Error(storage)
                    }
                }
            }
            Err(e) => {
                tracing::error!("Submission failed: {}", e);
                SubmitOutcome::Error(e)
            }
        };

        self.refresh_captcha();
        outcome
    }

    /// Saved local leads, available only when debugging is enabled
    pub fn view_all_leads(&self) -> Option<Vec<LocalLead>> {
        if !self.debug {
            return None;
        }
        Some(self.leads.all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::api::HttpContactApi;
    use crate::client::leads::{KeyValueStore, MemoryKeyValueStore};
    use crate::client::Result;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use uuid::Uuid;

    #[derive(Default)]
    struct CountingApi {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl ContactApi for CountingApi {
        async fn submit(&self, _form: &ContactForm) -> Result<SubmissionReceipt> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ClientError::Rejected {
                    status: 503,
                    message: "Service Unavailable".into(),
                });
            }
            Ok(SubmissionReceipt {
                id: Uuid::now_v7(),
                submitted_at: Utc::now(),
            })
        }
    }

    struct StalledApi;

    #[async_trait]
    impl ContactApi for StalledApi {
        async fn submit(&self, _form: &ContactForm) -> Result<SubmissionReceipt> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Err(ClientError::ApiUnavailable)
        }
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(ClientError::Storage("disk full".into()))
        }
    }

    fn filled_form() -> ContactForm {
        ContactForm {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            phone: "+1 234-567-8900".into(),
            subject: "Partnership inquiry".into(),
            message: "Hello, I would like to know more.".into(),
        }
    }

    fn flow_with(api: Option<Arc<dyn ContactApi>>, store: Arc<dyn KeyValueStore>) -> SubmissionFlow {
        let mut flow = SubmissionFlow::new(api, LeadLog::new(store));
        *flow.form_mut() = filled_form();
        flow.set_captcha(MathCaptcha::new(2, 3));
        flow.set_captcha_answer("5");
        flow
    }

    #[tokio::test]
    async fn test_wrong_captcha_sends_nothing() {
        let api = Arc::new(CountingApi::default());
        let mut flow = flow_with(Some(api.clone()), Arc::new(MemoryKeyValueStore::new()));
        flow.set_captcha_answer("6");

        let outcome = flow.submit().await;

        assert_eq!(outcome.notice(), MSG_CAPTCHA_INCORRECT);
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert_eq!(flow.form(), &filled_form());
        assert_eq!(flow.captcha(), MathCaptcha::new(2, 3));
    }

    #[tokio::test]
    async fn test_invalid_fields_block_before_captcha() {
        let api = Arc::new(CountingApi::default());
        let mut flow = flow_with(Some(api.clone()), Arc::new(MemoryKeyValueStore::new()));
        flow.form_mut().email = "not-an-email".into();

        let outcome = flow.submit().await;

        assert_eq!(outcome.notice(), "Valid email is required");
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_success_clears_form_and_keeps_backup() {
        let api = Arc::new(CountingApi::default());
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut flow = flow_with(Some(api.clone()), store.clone()).with_debug(true);

        let outcome = flow.submit().await;

        assert!(outcome.is_success());
        assert_eq!(outcome.notice(), NOTICE_SUCCESS);
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        assert_eq!(flow.form(), &ContactForm::default());
        assert!(!flow.is_submitting());
        assert_eq!(flow.view_all_leads().map(|l| l.len()), Some(1));
    }

    #[tokio::test]
    async fn test_api_failure_appends_exactly_one_lead() {
        let api = Arc::new(CountingApi {
            fail: true,
            ..Default::default()
        });
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut flow = flow_with(Some(api.clone()), store.clone());

        let outcome = flow.submit().await;

        assert!(matches!(outcome, SubmitOutcome::LocalFallback(_)));
        assert_eq!(outcome.notice(), NOTICE_LOCAL_FALLBACK);
        let leads = LeadLog::new(store).all();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].form, filled_form());
        assert_eq!(flow.form(), &ContactForm::default());
    }

    #[tokio::test]
    async fn test_unreachable_server_falls_back() {
        let api = HttpContactApi::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut flow = flow_with(Some(Arc::new(api)), store.clone());

        let outcome = flow.submit().await;

        assert!(matches!(outcome, SubmitOutcome::LocalFallback(_)));
        assert_eq!(LeadLog::new(store).all().len(), 1);
    }

    #[tokio::test]
    async fn test_local_only_mode_falls_back() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut flow = flow_with(None, store.clone());

        assert!(matches!(flow.submit().await, SubmitOutcome::LocalFallback(_)));
        assert_eq!(LeadLog::new(store).all().len(), 1);
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_form_for_retry() {
        let mut flow = flow_with(None, Arc::new(BrokenStore));

        let outcome = flow.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Error(ClientError::Storage(_))));
        assert_eq!(outcome.notice(), NOTICE_ERROR);
        assert_eq!(flow.form(), &filled_form());
    }

    #[tokio::test]
    async fn test_cancelled_submit_returns_to_editing() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let mut flow = flow_with(Some(Arc::new(StalledApi)), store.clone());

        let timed_out = tokio::time::timeout(Duration::from_millis(50), flow.submit()).await;

        assert!(timed_out.is_err());
        assert!(!flow.is_submitting());
        assert_eq!(flow.form(), &filled_form());
        assert!(LeadLog::new(store).all().is_empty());
    }

    #[test]
    fn test_leads_hidden_without_debug() {
        let flow = SubmissionFlow::new(None, LeadLog::new(Arc::new(MemoryKeyValueStore::new())));
        assert!(flow.view_all_leads().is_none());
    }
}
