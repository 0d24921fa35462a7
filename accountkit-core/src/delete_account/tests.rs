use std::sync::{Arc, Mutex};

use test_case::test_case;
use tokio_test::{assert_pending, task};

use super::*;
use crate::{error::AccountServiceError, i18n::SourceTranslator};

/// Answers every request after it is polled, or never with `pending`.
struct StubService {
    pending: bool,
    fail_with: Option<&'static str>,
}

#[async_trait::async_trait]
impl AccountService for StubService {
    async fn request_account_delete(&self) -> Result<(), AccountServiceError> {
        self.answer().await
    }

    async fn delete_account(
        &self,
        _did: String,
        _password: String,
        _token: String,
    ) -> Result<(), AccountServiceError> {
        self.answer().await
    }
}

impl StubService {
    async fn answer(&self) -> Result<(), AccountServiceError> {
        if self.pending {
            std::future::pending::<()>().await;
        }
        match self.fail_with {
            Some(error) => Err(AccountServiceError::Generic {
                error: error.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
struct Journal(Mutex<Vec<&'static str>>);

impl Journal {
    fn entries(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().clone()
    }

    fn push(&self, entry: &'static str) {
        self.0.lock().unwrap().push(entry);
    }
}

impl ModalHost for Journal {
    fn show_toast(&self, _message: String) {
        self.push("toast");
    }

    fn reset_to_home(&self) {
        self.push("home");
    }

    fn close_modal(&self) {
        self.push("close");
    }
}

impl SessionStore for Journal {
    fn current_account(&self) -> Option<Account> {
        None
    }

    fn remove_account(&self, _account: Account) {
        self.push("remove");
    }

    fn clear_current_account(&self) {
        self.push("clear");
    }
}

fn alice() -> Account {
    Account {
        did: "did:plc:alice".to_string(),
        handle: "alice.test".to_string(),
    }
}

fn flow(service: StubService) -> (DeleteAccountFlow, Arc<Journal>) {
    let journal = Arc::new(Journal::default());
    let flow = DeleteAccountFlow::new(
        alice(),
        Arc::new(service),
        journal.clone(),
        journal.clone(),
        Arc::new(SourceTranslator),
    );
    (flow, journal)
}

fn ok_service() -> StubService {
    StubService {
        pending: false,
        fail_with: None,
    }
}

#[test_case(" 12 34 ", "1234" ; "spaces")]
#[test_case("AB\tCD\nEF\r\n", "ABCDEF" ; "tabs and newlines")]
#[test_case("ab\u{00A0}cd\u{2003}ef", "abcdef" ; "unicode spaces")]
#[test_case("   ", "" ; "only whitespace")]
#[test_case("k3x-9q", "k3x-9q" ; "untouched")]
fn test_strip_whitespace(input: &str, expected: &str) {
    assert_eq!(strip_whitespace(input), expected);
}

#[test]
fn test_flow_state_follows_form() {
    let mut form = FormState::default();
    assert_eq!(form.flow_state(), FlowState::IdleRequest);

    form.processing = true;
    assert_eq!(form.flow_state(), FlowState::LoadingRequest);

    form.processing = false;
    form.error_message = "boom".to_string();
    assert_eq!(form.flow_state(), FlowState::ErrorRequest);

    form.error_message.clear();
    form.email_sent = true;
    assert_eq!(form.flow_state(), FlowState::IdleConfirm);

    form.processing = true;
    assert_eq!(form.flow_state(), FlowState::LoadingConfirm);

    form.processing = false;
    form.error_message = "boom".to_string();
    assert_eq!(form.flow_state(), FlowState::ErrorConfirm);

    form.closed = true;
    assert_eq!(form.flow_state(), FlowState::Closed);
}

#[test]
fn test_request_screen_has_no_inputs() {
    let (flow, _) = flow(ok_service());
    let view = flow.view();

    assert_eq!(view.title, "Delete Account");
    assert_eq!(view.handle, "alice.test");
    assert_eq!(view.phase, Phase::RequestCode);
    assert!(view.inputs.is_empty());
    assert_eq!(
        view.description.as_deref(),
        Some("For security reasons, we'll need to send a confirmation code to your email address.")
    );
    assert_eq!(view.error, None);
    assert_eq!(view.snap_point, SHEET_SNAP_POINT);

    let kinds: Vec<_> = view.controls.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, [ControlKind::SendEmail, ControlKind::Cancel]);
    assert_eq!(view.controls[1].accessibility_hint, None);
}

#[test]
fn test_inputs_ignored_before_email_sent() {
    let (flow, _) = flow(ok_service());
    flow.set_confirmation_code("1234".to_string());
    flow.set_password("hunter2".to_string());

    let form = lock(&flow.state);
    assert!(form.confirmation_code.is_empty());
    assert!(form.password.expose_secret().is_empty());
}

#[tokio::test]
async fn test_confirm_screen_never_echoes_password() {
    let (flow, _) = flow(ok_service());
    assert_eq!(flow.request_code().await, ActionOutcome::Completed);
    flow.set_confirmation_code("12 34".to_string());
    flow.set_password("hunter2".to_string());

    let view = flow.view();
    assert_eq!(view.phase, Phase::ConfirmDeletion);
    assert_eq!(view.description, None);
    assert_eq!(view.inputs.len(), 2);
    assert_eq!(view.inputs[0].kind, InputKind::ConfirmationCode);
    assert_eq!(
        view.inputs[0].description,
        "Check your inbox for an email with the confirmation code to enter below:"
    );
    assert_eq!(view.inputs[0].value.as_deref(), Some("12 34"));
    assert_eq!(view.inputs[1].kind, InputKind::Password);
    assert!(view.inputs[1].secure);
    assert_eq!(view.inputs[1].value, None);
    assert_eq!(view.controls[0].style, ControlStyle::Destructive);
}

#[test]
fn test_abandoned_request_releases_form() {
    let (flow, journal) = flow(StubService {
        pending: true,
        fail_with: None,
    });

    let mut request = task::spawn(flow.request_code());
    assert_pending!(request.poll());
    drop(request);

    assert_eq!(flow.state(), FlowState::IdleRequest);
    assert!(!flow.view().loading);
    assert_eq!(flow.cancel(), ActionOutcome::Completed);
    assert_eq!(journal.entries(), ["close"]);
}

#[tokio::test]
async fn test_failure_is_cleaned_for_display() {
    let (flow, _) = flow(StubService {
        pending: false,
        fail_with: Some("Error: Upstream Failure"),
    });

    let outcome = flow.request_code().await;

    let expected = crate::error::UPSTREAM_FAILURE.to_string();
    assert_eq!(
        outcome,
        ActionOutcome::Failed {
            message: expected.clone()
        }
    );
    assert_eq!(flow.view().error, Some(expected));
}

#[tokio::test]
async fn test_closed_flow_ignores_actions() {
    let (flow, journal) = flow(ok_service());
    assert_eq!(flow.cancel(), ActionOutcome::Completed);

    assert_eq!(flow.request_code().await, ActionOutcome::Ignored);
    assert_eq!(flow.confirm_deletion().await, ActionOutcome::Ignored);
    assert_eq!(flow.cancel(), ActionOutcome::Ignored);
    assert!(flow.view().controls.is_empty());
    assert_eq!(journal.entries(), ["close"]);
}
