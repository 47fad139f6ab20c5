use crate::consent::Consent;
use crate::models::AppData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub prefs_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub consent: Arc<Mutex<Consent>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, prefs_path: PathBuf, data: AppData, consent: Consent) -> Self {
        Self {
            data_path,
            prefs_path,
            data: Arc::new(Mutex::new(data)),
            consent: Arc::new(Mutex::new(consent)),
        }
    }
}
