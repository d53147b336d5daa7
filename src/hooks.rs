use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;

use gloo_console::error;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::models::{GerbangResponse, LalinResponse};
use crate::services::{self, FetchError};

/// Lifecycle of one fetch as seen by the UI. A new value for the same
/// key replaces the previous one wholesale.
#[derive(Clone, PartialEq)]
pub enum QueryState<T> {
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> QueryState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, QueryState::Error(_))
    }
}

thread_local! {
    static QUERY_CACHE: RefCell<HashMap<String, serde_json::Value>> =
        RefCell::new(HashMap::new());
}

pub fn cache_key(op: &str, params: &str) -> String {
    format!("{}:{}", op, params)
}

fn cache_get<T: DeserializeOwned>(key: &str) -> Option<T> {
    QUERY_CACHE
        .with(|cache| cache.borrow().get(key).cloned())
        .and_then(|value| serde_json::from_value(value).ok())
}

fn cache_put<T: Serialize>(key: &str, value: &T) {
    if let Ok(json) = serde_json::to_value(value) {
        QUERY_CACHE.with(|cache| {
            cache.borrow_mut().insert(key.to_string(), json);
        });
    }
}

/// Binds an async fetch to a cache key. A cached value is served
/// immediately and refreshed in the background; a key change issues a
/// new fetch whose result supersedes the previous one. Out-of-order
/// completions are dropped via a generation counter, so the last
/// request issued always wins.
#[hook]
fn use_query<T, F, Fut>(key: String, fetch: F) -> QueryState<T>
where
    T: Clone + PartialEq + Serialize + DeserializeOwned + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, FetchError>> + 'static,
{
    let state = use_state(|| QueryState::Loading);
    let generation = use_mut_ref(|| 0u64);

    {
        let state = state.clone();
        let generation = generation.clone();
        use_effect_with_deps(
            move |key: &String| {
                let current = {
                    let mut gen = generation.borrow_mut();
                    *gen += 1;
                    *gen
                };

                match cache_get::<T>(key) {
                    Some(hit) => state.set(QueryState::Loaded(hit)),
                    None => state.set(QueryState::Loading),
                }

                let key = key.clone();
                let generation = generation.clone();
                spawn_local(async move {
                    let result = fetch().await;
                    if *generation.borrow() != current {
                        // a newer request for this hook is in flight
                        return;
                    }
                    match result {
                        Ok(data) => {
                            cache_put(&key, &data);
                            state.set(QueryState::Loaded(data));
                        }
                        Err(err) => {
                            error!(format!("query {} failed: {}", key, err));
                            state.set(QueryState::Error(err.to_string()));
                        }
                    }
                });
                || ()
            },
            key,
        );
    }

    (*state).clone()
}

#[hook]
pub fn use_gerbangs() -> QueryState<GerbangResponse> {
    use_query(cache_key("gerbangs", ""), services::fetch_gerbangs)
}

#[hook]
pub fn use_lalins(tanggal: String) -> QueryState<LalinResponse> {
    let key = cache_key("lalins", &tanggal);
    use_query(key, move || {
        let tanggal = tanggal.clone();
        async move { services::fetch_lalins(&tanggal).await }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_is_operation_plus_params() {
        assert_eq!(cache_key("lalins", "2023-11-01"), "lalins:2023-11-01");
        assert_eq!(cache_key("gerbangs", ""), "gerbangs:");
    }

    #[test]
    fn distinct_dates_yield_distinct_keys() {
        assert_ne!(cache_key("lalins", "2023-11-01"), cache_key("lalins", "2023-11-02"));
    }

    #[test]
    fn cache_round_trips_values_per_key() {
        cache_put(&cache_key("lalins", "2023-11-01"), &vec![1u32, 2, 3]);
        cache_put(&cache_key("lalins", "2023-11-02"), &vec![9u32]);

        let first: Option<Vec<u32>> = cache_get(&cache_key("lalins", "2023-11-01"));
        let second: Option<Vec<u32>> = cache_get(&cache_key("lalins", "2023-11-02"));
        assert_eq!(first, Some(vec![1, 2, 3]));
        assert_eq!(second, Some(vec![9]));
    }

    #[test]
    fn cache_replaces_rather_than_merges() {
        let key = cache_key("lalins", "2023-11-03");
        cache_put(&key, &vec![1u32]);
        cache_put(&key, &vec![7u32, 8]);

        let latest: Option<Vec<u32>> = cache_get(&key);
        assert_eq!(latest, Some(vec![7, 8]));
    }

    #[test]
    fn cache_miss_is_none() {
        let missing: Option<Vec<u32>> = cache_get("lalins:1999-01-01");
        assert_eq!(missing, None);
    }

    #[test]
    fn query_state_accessors() {
        let loading: QueryState<u32> = QueryState::Loading;
        assert!(loading.is_loading());
        assert!(!loading.is_error());
        assert_eq!(loading.data(), None);

        let loaded = QueryState::Loaded(5u32);
        assert_eq!(loaded.data(), Some(&5));

        let failed: QueryState<u32> = QueryState::Error("network error".into());
        assert!(failed.is_error());
        assert_eq!(failed.data(), None);
    }
}
