use crate::debounce::Debouncer;
use crate::search::{search, SearchResults};
use crate::store::ArticleStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub results: SearchResults,
    pub is_loading: bool,
}

/// Interactive search: each query change is debounced before the store is
/// scanned, and the latest state is published on a watch channel.
#[derive(Debug)]
pub struct SearchSession {
    store: Arc<ArticleStore>,
    debouncer: Debouncer,
    state: Arc<watch::Sender<SearchState>>,
}

impl SearchSession {
    pub fn new(store: Arc<ArticleStore>, delay: Duration) -> SearchSession {
        let (state, _) = watch::channel(SearchState::default());
        SearchSession {
            store,
            debouncer: Debouncer::new(delay),
            state: Arc::new(state),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Blank queries clear the results at once; anything else marks the
    /// session loading and (re)starts the debounce timer.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query.trim().is_empty() {
            self.debouncer.cancel();
            self.state.send_replace(SearchState {
                query,
                ..Default::default()
            });
            return;
        }

        self.state.send_modify(|state| {
            state.query = query.clone();
            state.is_loading = true;
        });

        let store = Arc::clone(&self.store);
        let state = Arc::clone(&self.state);
        self.debouncer.schedule(async move {
            let results = search(&query, store.all());
            debug!(query = %query, hits = results.len(), "debounced search ran");
            state.send_modify(|current| {
                if current.query == query {
                    current.results = results;
                    current.is_loading = false;
                }
            });
        });
    }

    pub fn clear(&mut self) {
        self.set_query(String::new());
    }

    /// Waits until a pending search, if any, has published its results.
    pub async fn settle(&mut self) {
        self.debouncer.flush().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(100);

    fn session() -> SearchSession {
        let store = ArticleStore::bundled().unwrap();
        SearchSession::new(Arc::new(store), DELAY)
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_results_after_the_delay() {
        let mut session = session();
        session.set_query("rust");

        let state = session.state();
        assert!(state.is_loading);
        assert!(state.results.is_empty());

        tokio::time::sleep(DELAY + Duration::from_millis(10)).await;
        let state = session.state();
        assert!(!state.is_loading);
        assert_eq!(state.results.ids(), vec!["go-vs-rust"]);
    }

    #[tokio::test(start_paused = true)]
    async fn only_the_last_keystroke_is_searched() {
        let mut session = session();
        let mut updates = session.subscribe();

        for query in ["g", "gr", "gra", "graphql"] {
            session.set_query(query);
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        session.settle().await;

        let state = updates.borrow_and_update().clone();
        assert_eq!(state.query, "graphql");
        assert!(!state.is_loading);
        assert_eq!(state.results.ids(), vec!["rest-vs-graphql"]);
    }

    #[tokio::test(start_paused = true)]
    async fn blank_query_clears_immediately() {
        let mut session = session();
        session.set_query("typescript");
        session.settle().await;
        assert_eq!(session.state().results.len(), 1);

        session.set_query("   ");
        let state = session.state();
        assert!(state.results.is_empty());
        assert!(!state.is_loading);

        session.set_query("rust");
        session.clear();
        tokio::time::sleep(DELAY * 2).await;
        assert_eq!(session.state(), SearchState::default());
    }
}
