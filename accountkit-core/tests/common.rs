//! Fakes for the collaborators of a flow. Every side effect is recorded in one
//! shared journal so tests can assert on the order across collaborators.
#![allow(dead_code, missing_docs)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use accountkit_core::{
    Account, AccountService, AccountServiceError, DeleteAccountFlow, ModalHost,
    SessionStore, SourceTranslator, Translator,
};
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    RequestAccountDelete,
    DeleteAccount {
        did: String,
        password: String,
        token: String,
    },
    Toast(String),
    ResetToHome,
    RemoveAccount(Account),
    ClearCurrentAccount,
    CloseModal,
}

#[derive(Default)]
pub struct Journal {
    events: Mutex<Vec<Event>>,
}

impl Journal {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn alice() -> Account {
    Account {
        did: "did:plc:ewvi7nxzyoun6zhxrhs64oiz".to_string(),
        handle: "alice.bsky.social".to_string(),
    }
}

pub fn bob() -> Account {
    Account {
        did: "did:plc:44ybard66vv44zksje25o7dz".to_string(),
        handle: "bob.bsky.social".to_string(),
    }
}

/// Multi-account session store and modal host of a fake app.
pub struct FakeApp {
    pub journal: Arc<Journal>,
    accounts: Mutex<Vec<Account>>,
    current: Mutex<Option<Account>>,
}

impl FakeApp {
    pub fn signed_in(account: Account) -> Arc<Self> {
        Arc::new(Self {
            journal: Arc::new(Journal::default()),
            accounts: Mutex::new(vec![account.clone(), bob()]),
            current: Mutex::new(Some(account)),
        })
    }

    pub fn signed_out() -> Arc<Self> {
        Arc::new(Self {
            journal: Arc::new(Journal::default()),
            accounts: Mutex::new(vec![bob()]),
            current: Mutex::new(None),
        })
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.lock().unwrap().clone()
    }
}

impl SessionStore for FakeApp {
    fn current_account(&self) -> Option<Account> {
        self.current.lock().unwrap().clone()
    }

    fn remove_account(&self, account: Account) {
        self.accounts.lock().unwrap().retain(|a| a.did != account.did);
        self.journal.record(Event::RemoveAccount(account));
    }

    fn clear_current_account(&self) {
        *self.current.lock().unwrap() = None;
        self.journal.record(Event::ClearCurrentAccount);
    }
}

impl ModalHost for FakeApp {
    fn show_toast(&self, message: String) {
        self.journal.record(Event::Toast(message));
    }

    fn reset_to_home(&self) {
        self.journal.record(Event::ResetToHome);
    }

    fn close_modal(&self) {
        self.journal.record(Event::CloseModal);
    }
}

/// Holds a service call until the test releases it.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

/// Answers calls from a script; once the script runs out every call succeeds.
pub struct ScriptedService {
    journal: Arc<Journal>,
    script: Mutex<VecDeque<Result<(), AccountServiceError>>>,
    gate: Option<Arc<Gate>>,
}

impl ScriptedService {
    pub fn new(
        app: &FakeApp,
        script: impl IntoIterator<Item = Result<(), AccountServiceError>>,
    ) -> Self {
        Self {
            journal: app.journal.clone(),
            script: Mutex::new(script.into_iter().collect()),
            gate: None,
        }
    }

    pub fn gated(app: &FakeApp, gate: Arc<Gate>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(app, [])
        }
    }

    async fn answer(&self, event: Event) -> Result<(), AccountServiceError> {
        self.journal.record(event);
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        self.script.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

#[async_trait::async_trait]
impl AccountService for ScriptedService {
    async fn request_account_delete(&self) -> Result<(), AccountServiceError> {
        self.answer(Event::RequestAccountDelete).await
    }

    async fn delete_account(
        &self,
        did: String,
        password: String,
        token: String,
    ) -> Result<(), AccountServiceError> {
        self.answer(Event::DeleteAccount {
            did,
            password,
            token,
        })
        .await
    }
}

pub fn xrpc_error(error: &str, message: &str) -> AccountServiceError {
    AccountServiceError::Xrpc {
        status: 400,
        error: error.to_string(),
        message: Some(message.to_string()),
    }
}

pub fn open_flow(app: &Arc<FakeApp>, service: ScriptedService) -> Arc<DeleteAccountFlow> {
    open_flow_translated(app, service, Arc::new(SourceTranslator))
}

pub fn open_flow_translated(
    app: &Arc<FakeApp>,
    service: ScriptedService,
    translator: Arc<dyn Translator>,
) -> Arc<DeleteAccountFlow> {
    let flow = DeleteAccountFlow::for_current_account(
        Arc::new(service),
        app.clone(),
        app.clone(),
        translator,
    )
    .expect("app has a current account");
    Arc::new(flow)
}
