use serde::{Deserialize, Serialize};

/// Persisted consent record. `essential` is always true; the other two flags
/// gate task persistence and file export/import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoragePreferences {
    pub essential: bool,
    #[serde(default)]
    pub task_storage: bool,
    #[serde(default)]
    pub file_storage: bool,
}

impl Default for StoragePreferences {
    fn default() -> Self {
        Self {
            essential: true,
            task_storage: false,
            file_storage: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentState {
    Unset,
    EssentialOnly,
    Full,
}

/// Outcome of applying a consent choice. `revokes_stored_tasks` means task
/// storage was just withdrawn and previously persisted task data must be
/// deleted.
#[derive(Debug, PartialEq, Eq)]
pub struct ConsentOutcome {
    pub revokes_stored_tasks: bool,
}

/// The consent-preference state machine: no choice yet, essential-only, or
/// full. The first user choice leaves `Unset` permanently; afterwards the two
/// granted states toggle freely through the settings modal.
#[derive(Debug, Default)]
pub struct Consent {
    choice: Option<StoragePreferences>,
}

impl Consent {
    pub fn from_saved(saved: Option<StoragePreferences>) -> Self {
        Self { choice: saved }
    }

    pub fn state(&self) -> ConsentState {
        match self.choice {
            None => ConsentState::Unset,
            Some(prefs) if prefs.task_storage => ConsentState::Full,
            Some(_) => ConsentState::EssentialOnly,
        }
    }

    pub fn preferences(&self) -> StoragePreferences {
        self.choice.unwrap_or_default()
    }

    pub fn task_storage_enabled(&self) -> bool {
        self.choice.is_some_and(|prefs| prefs.task_storage)
    }

    pub fn file_storage_enabled(&self) -> bool {
        self.choice.is_some_and(|prefs| prefs.file_storage)
    }

    /// Record a choice. `essential` cannot be declined, so it is forced on
    /// regardless of what the caller sends.
    pub fn apply(&mut self, requested: StoragePreferences) -> ConsentOutcome {
        let had_task_storage = self.task_storage_enabled();
        self.choice = Some(StoragePreferences {
            essential: true,
            ..requested
        });

        ConsentOutcome {
            revokes_stored_tasks: had_task_storage && !requested.task_storage,
        }
    }
}
