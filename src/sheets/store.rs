// src/sheets/store.rs
//! Latest parsed sheet per domain.
//!
//! Every refresh takes a request token for its domain before fetching. When the
//! response arrives it is applied only if no newer refresh for the same domain
//! has been issued meanwhile, so overlapping refreshes cannot roll a domain
//! back to older data. Domains never share state: one failing fetch leaves the
//! others untouched.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use super::csv::parse_csv;
use super::definitions::{Domain, ParsedSheet};
use super::error::SheetError;
use super::fetcher::SheetSource;

#[derive(Debug, Clone, Default)]
pub enum DomainState {
    #[default]
    NotLoaded,
    Loaded(Arc<ParsedSheet>),
    Failed(SheetError),
}

#[derive(Debug, Clone, Default)]
struct DomainSlot {
    latest_token: u64,
    state: DomainState,
    last_synced: Option<DateTime<Local>>,
}

#[derive(Debug, Default)]
pub struct DashboardStore {
    tabs: HashMap<Domain, String>,
    slots: Mutex<HashMap<Domain, DomainSlot>>,
}

impl DashboardStore {
    pub fn new(tabs: HashMap<Domain, String>) -> Self {
        Self {
            tabs,
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<Domain, DomainSlot>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn tab_id(&self, domain: Domain) -> Option<&str> {
        self.tabs.get(&domain).map(String::as_str)
    }

    /// Issues the next request token for `domain`.
    pub fn begin_refresh(&self, domain: Domain) -> u64 {
        let mut slots = self.slots();
        let slot = slots.entry(domain).or_default();
        slot.latest_token += 1;
        slot.latest_token
    }

    /// Applies a finished fetch. Returns `false` when a newer refresh has been
    /// issued for the domain and this result was discarded.
    pub fn complete_refresh(&self, domain: Domain, token: u64, result: Result<ParsedSheet, SheetError>) -> bool {
        let mut slots = self.slots();
        let slot = slots.entry(domain).or_default();
        if token != slot.latest_token {
            debug!(
                "Discarding stale {} refresh (token {}, latest {})",
                domain, token, slot.latest_token
            );
            return false;
        }
        slot.state = match result {
            Ok(sheet) => {
                slot.last_synced = Some(Local::now());
                DomainState::Loaded(Arc::new(sheet))
            }
            Err(e) => DomainState::Failed(e),
        };
        true
    }

    pub fn state(&self, domain: Domain) -> DomainState {
        self.slots()
            .get(&domain)
            .map(|s| s.state.clone())
            .unwrap_or_default()
    }

    pub fn sheet(&self, domain: Domain) -> Option<Arc<ParsedSheet>> {
        match self.state(domain) {
            DomainState::Loaded(sheet) => Some(sheet),
            _ => None,
        }
    }

    pub fn last_synced(&self, domain: Domain) -> Option<DateTime<Local>> {
        self.slots().get(&domain).and_then(|s| s.last_synced)
    }

    /// Fetches and parses one domain's tab, replacing its slot wholesale.
    pub async fn refresh<S: SheetSource>(&self, source: &S, domain: Domain) -> DomainState {
        let token = self.begin_refresh(domain);
        let result = match self.tab_id(domain) {
            Some(tab_id) => source
                .fetch_csv(tab_id)
                .await
                .map(|text| parse_csv(&text, tab_id)),
            None => Err(SheetError::NotConfigured(domain.label().to_string())),
        };
        match &result {
            Ok(sheet) => info!("{}: loaded {} records", domain, sheet.records.len()),
            Err(e) => warn!("{}: refresh failed: {}", domain, e),
        }
        self.complete_refresh(domain, token, result);
        self.state(domain)
    }

    /// Refreshes every domain concurrently. Failures stay scoped to their domain.
    pub async fn refresh_all<S: SheetSource>(&self, source: &S) {
        tokio::join!(
            self.refresh(source, Domain::SocialMedia),
            self.refresh(source, Domain::Proxy),
            self.refresh(source, Domain::Legal),
            self.refresh(source, Domain::Important),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticSource(HashMap<String, Result<String, SheetError>>);

    impl SheetSource for StaticSource {
        async fn fetch_csv(&self, tab_id: &str) -> Result<String, SheetError> {
            self.0
                .get(tab_id)
                .cloned()
                .unwrap_or(Err(SheetError::Transport("unknown tab".to_string())))
        }
    }

    fn tabs() -> HashMap<Domain, String> {
        HashMap::from([
            (Domain::SocialMedia, "856039892".to_string()),
            (Domain::Proxy, "0".to_string()),
            (Domain::Legal, "11".to_string()),
            (Domain::Important, "12".to_string()),
        ])
    }

    #[tokio::test]
    async fn test_failures_are_domain_scoped() {
        let source = StaticSource(HashMap::from([
            ("856039892".to_string(), Ok("Ticket ID,Ticket Status\nT-1,Closed\n".to_string())),
            ("0".to_string(), Err(SheetError::AccessDenied)),
            ("11".to_string(), Err(SheetError::EmptyBody)),
            ("12".to_string(), Ok("S. No.,Status\n1,WIP\n2,Done\n".to_string())),
        ]));
        let store = DashboardStore::new(tabs());
        store.refresh_all(&source).await;

        assert_eq!(store.sheet(Domain::SocialMedia).map(|s| s.records.len()), Some(1));
        assert_eq!(store.sheet(Domain::Important).map(|s| s.records.len()), Some(2));
        assert!(matches!(store.state(Domain::Proxy), DomainState::Failed(SheetError::AccessDenied)));
        assert!(matches!(store.state(Domain::Legal), DomainState::Failed(SheetError::EmptyBody)));
        assert!(store.last_synced(Domain::SocialMedia).is_some());
        assert!(store.last_synced(Domain::Proxy).is_none());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let store = DashboardStore::new(tabs());
        let older = store.begin_refresh(Domain::Proxy);
        let newer = store.begin_refresh(Domain::Proxy);

        let fresh = parse_csv("S no.\n2\n", "0");
        assert!(store.complete_refresh(Domain::Proxy, newer, Ok(fresh)));
        assert!(!store.complete_refresh(Domain::Proxy, older, Err(SheetError::EmptyBody)));

        let sheet = store.sheet(Domain::Proxy).expect("newer result kept");
        assert_eq!(sheet.records[0].value("S no."), "2");
    }

    #[test]
    fn test_refresh_replaces_wholesale() {
        let store = DashboardStore::new(tabs());
        let t1 = store.begin_refresh(Domain::Legal);
        store.complete_refresh(Domain::Legal, t1, Ok(parse_csv("A\n1\n2\n", "11")));
        let t2 = store.begin_refresh(Domain::Legal);
        store.complete_refresh(Domain::Legal, t2, Ok(parse_csv("A\n3\n", "11")));
        let sheet = store.sheet(Domain::Legal).expect("loaded");
        assert_eq!(sheet.records.len(), 1);
        assert_eq!(sheet.records[0].value("A"), "3");
    }
}
