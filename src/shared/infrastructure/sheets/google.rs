// Google Sheets v4 implementation of the SheetStore port.
//
// Responsibilities
// - Translate A1 ranges into `spreadsheets.values` REST calls.
// - Hold the service account access token and refresh it when it is about to expire.

use crate::shared::infrastructure::sheets::service_account::{
    AccessToken, ServiceAccountKey, fetch_access_token,
};
use crate::shared::infrastructure::sheets::{
    A1Range, Row, SheetError, SheetStore, ValueInputOption, cell_text,
};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Request, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::sync::RwLock;

const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeBody<'a> {
    range: String,
    major_dimension: &'a str,
    values: Vec<Row>,
}

#[derive(Deserialize, Default)]
struct ValueRangeResponse {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

pub struct GoogleSheetsClient {
    http: Client,
    base_url: String,
    spreadsheet_id: String,
    key: ServiceAccountKey,
    token: RwLock<Option<AccessToken>>,
}

impl GoogleSheetsClient {
    pub fn new(
        spreadsheet_id: impl Into<String>,
        key: ServiceAccountKey,
    ) -> Result<Self, SheetError> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            http,
            base_url: SHEETS_BASE_URL.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            key,
            token: RwLock::new(None),
        })
    }

    async fn access_token(&self) -> Result<String, SheetError> {
        if let Some(token) = self.token.read().await.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.value.clone());
            }
        }

        let mut guard = self.token.write().await;
        if let Some(token) = guard.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.value.clone());
            }
        }
        tracing::debug!(client_email = %self.key.client_email, "requesting sheets access token");
        let token = fetch_access_token(&self.http, &self.key).await?;
        let value = token.value.clone();
        *guard = Some(token);
        Ok(value)
    }

    fn values_url(&self, range: &A1Range, suffix: &str) -> Result<Url, SheetError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| SheetError::Backend(format!("invalid base url: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| SheetError::Backend("base url cannot carry a path".into()))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values"])
            .push(&format!("{range}{suffix}"));
        Ok(url)
    }

    /// `values.append` leaves `insertDataOption` unset so the API default (OVERWRITE) applies.
    fn append_request(
        &self,
        token: &str,
        range: &A1Range,
        rows: Vec<Row>,
        option: ValueInputOption,
    ) -> Result<Request, SheetError> {
        let url = self.values_url(range, ":append")?;
        let body = ValueRangeBody {
            range: range.to_string(),
            major_dimension: "ROWS",
            values: rows,
        };
        Ok(self
            .http
            .post(url)
            .bearer_auth(token)
            .query(&[("valueInputOption", option.as_str())])
            .json(&body)
            .build()?)
    }

    fn read_request(&self, token: &str, range: &A1Range) -> Result<Request, SheetError> {
        let url = self.values_url(range, "")?;
        Ok(self.http.get(url).bearer_auth(token).build()?)
    }

    fn update_request(
        &self,
        token: &str,
        range: &A1Range,
        rows: Vec<Row>,
        option: ValueInputOption,
    ) -> Result<Request, SheetError> {
        let url = self.values_url(range, "")?;
        let body = ValueRangeBody {
            range: range.to_string(),
            major_dimension: "ROWS",
            values: rows,
        };
        Ok(self
            .http
            .put(url)
            .bearer_auth(token)
            .query(&[("valueInputOption", option.as_str())])
            .json(&body)
            .build()?)
    }

    fn clear_request(&self, token: &str, range: &A1Range) -> Result<Request, SheetError> {
        let url = self.values_url(range, ":clear")?;
        Ok(self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .build()?)
    }
}

async fn ensure_success(response: Response) -> Result<Response, SheetError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SheetError::Api {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl SheetStore for GoogleSheetsClient {
    async fn append(
        &self,
        range: &A1Range,
        rows: Vec<Row>,
        option: ValueInputOption,
    ) -> Result<(), SheetError> {
        let token = self.access_token().await?;
        let request = self.append_request(&token, range, rows, option)?;
        ensure_success(self.http.execute(request).await?).await?;
        Ok(())
    }

    async fn read(&self, range: &A1Range) -> Result<Vec<Vec<String>>, SheetError> {
        let token = self.access_token().await?;
        let request = self.read_request(&token, range)?;
        let response = ensure_success(self.http.execute(request).await?).await?;
        let payload: ValueRangeResponse = response.json().await?;
        Ok(payload
            .values
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect())
    }

    async fn update(
        &self,
        range: &A1Range,
        rows: Vec<Row>,
        option: ValueInputOption,
    ) -> Result<(), SheetError> {
        let token = self.access_token().await?;
        let request = self.update_request(&token, range, rows, option)?;
        ensure_success(self.http.execute(request).await?).await?;
        Ok(())
    }

    async fn clear(&self, range: &A1Range) -> Result<(), SheetError> {
        let token = self.access_token().await?;
        let request = self.clear_request(&token, range)?;
        ensure_success(self.http.execute(request).await?).await?;
        Ok(())
    }
}
