//! Multi-account session store persisted as a JSON file.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use accountkit_core::{Account, SessionStore};
use eyre::{eyre, Result, WrapErr};
use serde::{Deserialize, Serialize};

/// An account signed in through the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAccount {
    pub did: String,
    pub handle: String,
    pub service_url: String,
    pub access_jwt: String,
}

impl StoredAccount {
    pub fn account(&self) -> Account {
        Account {
            did: self.did.clone(),
            handle: self.handle.clone(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct AccountsFile {
    #[serde(default)]
    current: Option<String>,
    #[serde(default)]
    accounts: Vec<StoredAccount>,
}

/// Default location: `<data dir>/accountkit/accounts.json`.
pub fn default_path() -> Result<PathBuf> {
    let dir = dirs::data_dir().ok_or_else(|| eyre!("no data directory on this platform"))?;
    Ok(dir.join("accountkit").join("accounts.json"))
}

pub struct FileSessionStore {
    path: PathBuf,
    file: Mutex<AccountsFile>,
}

impl FileSessionStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: &Path) -> Result<Self> {
        let file = match fs::read(path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .wrap_err_with(|| format!("corrupt account store {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => AccountsFile::default(),
            Err(e) => {
                return Err(e).wrap_err_with(|| format!("reading {}", path.display()));
            }
        };
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    fn lock(&self) -> MutexGuard<'_, AccountsFile> {
        self.file.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn accounts(&self) -> Vec<StoredAccount> {
        self.lock().accounts.clone()
    }

    pub fn current(&self) -> Option<StoredAccount> {
        let file = self.lock();
        let did = file.current.as_ref()?;
        file.accounts.iter().find(|a| &a.did == did).cloned()
    }

    /// Adds or replaces the account with the same DID.
    pub fn upsert(&self, account: StoredAccount, make_current: bool) -> Result<()> {
        let mut file = self.lock();
        let did = account.did.clone();
        match file.accounts.iter_mut().find(|a| a.did == did) {
            Some(existing) => *existing = account,
            None => file.accounts.push(account),
        }
        if make_current || file.current.is_none() {
            file.current = Some(did);
        }
        self.persist(&file)
    }

    /// Points the store at the account whose DID or handle is `key`.
    pub fn switch_to(&self, key: &str) -> Result<StoredAccount> {
        let mut file = self.lock();
        let account = file
            .accounts
            .iter()
            .find(|a| a.did == key || a.handle == key)
            .cloned()
            .ok_or_else(|| eyre!("no stored account matches {key}"))?;
        file.current = Some(account.did.clone());
        self.persist(&file)?;
        Ok(account)
    }

    fn persist(&self, file: &AccountsFile) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).wrap_err_with(|| format!("creating {}", dir.display()))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(file)?;
        fs::write(&tmp, bytes).wrap_err_with(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .wrap_err_with(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }

    fn persist_or_log(&self, file: &AccountsFile) {
        if let Err(e) = self.persist(file) {
            tracing::error!("failed to save account store: {e:#}");
        }
    }
}

impl SessionStore for FileSessionStore {
    fn current_account(&self) -> Option<Account> {
        self.current().map(|a| a.account())
    }

    fn remove_account(&self, account: Account) {
        let mut file = self.lock();
        file.accounts.retain(|a| a.did != account.did);
        tracing::info!(did = %account.did, "removed account from store");
        self.persist_or_log(&file);
    }

    fn clear_current_account(&self) {
        let mut file = self.lock();
        file.current = None;
        self.persist_or_log(&file);
    }
}
