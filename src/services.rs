use gloo_net::http::{Request, RequestBuilder};
use thiserror::Error;

use crate::models::{GerbangResponse, LalinResponse, LoginResponse};

pub const API_BASE_URL: &str = "http://localhost:8080/api";

const TOKEN_KEY: &str = "access_token";

#[derive(Clone, PartialEq, Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned status {0}")]
    Status(u16),
    #[error("{0}")]
    BadRequest(String),
}

impl From<gloo_net::Error> for FetchError {
    fn from(err: gloo_net::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

pub fn stored_token() -> Option<String> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    storage.get_item(TOKEN_KEY).ok()?.filter(|t| !t.is_empty())
}

pub fn store_token(token: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(TOKEN_KEY, token);
        }
    }
}

pub fn clear_token() {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

fn with_auth(req: RequestBuilder) -> RequestBuilder {
    match stored_token() {
        Some(token) => req.header("Authorization", &format!("Bearer {}", token)),
        None => req,
    }
}

/// `GET /gerbangs` — the full gate list.
pub async fn fetch_gerbangs() -> Result<GerbangResponse, FetchError> {
    let url = format!("{}/gerbangs", API_BASE_URL);
    let resp = with_auth(Request::get(&url)).send().await?;
    if !resp.ok() {
        return Err(FetchError::Status(resp.status()));
    }
    Ok(resp.json().await?)
}

/// `GET /lalins?tanggal=<ISO date>` — traffic/payment records for one day.
pub async fn fetch_lalins(tanggal: &str) -> Result<LalinResponse, FetchError> {
    if tanggal.is_empty() {
        return Err(FetchError::BadRequest("tanggal must not be empty".into()));
    }
    let url = format!("{}/lalins?tanggal={}", API_BASE_URL, tanggal);
    let resp = with_auth(Request::get(&url)).send().await?;
    if !resp.ok() {
        return Err(FetchError::Status(resp.status()));
    }
    Ok(resp.json().await?)
}

/// `POST /auth/login` — credentials are sent once and never persisted;
/// only the returned token is kept.
pub async fn login(username: &str, password: &str) -> Result<LoginResponse, FetchError> {
    let url = format!("{}/auth/login", API_BASE_URL);
    let body = serde_json::json!({
        "username": username,
        "password": password,
    });
    let resp = Request::post(&url).json(&body)?.send().await?;
    if !resp.ok() {
        return Err(FetchError::Status(resp.status()));
    }
    Ok(resp.json().await?)
}
