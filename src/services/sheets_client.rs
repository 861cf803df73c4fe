use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::{send_with_retry, SheetStore, SheetsAuth};

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueUpdate<'a> {
    range: &'a str,
    major_dimension: &'a str,
    values: [[&'a str; 1]; 1],
}

/// Google Sheets v4 values API.
pub struct GoogleSheetsClient {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    auth: SheetsAuth,
}

impl GoogleSheetsClient {
    pub fn new(client: Client, base_url: &str, spreadsheet_id: String, auth: SheetsAuth) -> Self {
        GoogleSheetsClient {
            client,
            base_url: base_url.to_string(),
            spreadsheet_id,
            auth,
        }
    }

    fn values_url(&self, range: &str) -> anyhow::Result<Url> {
        let mut url = Url::parse(&self.base_url).context("Invalid sheets base url")?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Sheets base url cannot be a base"))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values", range]);
        Ok(url)
    }
}

fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl SheetStore for GoogleSheetsClient {
    async fn read_sheet(&self, sheet_name: &str) -> anyhow::Result<Vec<Vec<String>>> {
        let url = self.values_url(sheet_name)?;
        let token = self.auth.bearer_token().await?;
        let res = send_with_retry(self.client.get(url).bearer_auth(token))
            .await
            .with_context(|| format!("Reading sheet {}", sheet_name))?;

        if !res.status().is_success() {
            return Err(anyhow!(
                "Reading sheet {} failed with {}",
                sheet_name,
                res.status()
            ));
        }

        let range: ValueRange = res.json().await.context("Invalid sheet values")?;
        Ok(range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    async fn write_cell(
        &self,
        row: usize,
        column: &str,
        value: &str,
        sheet_name: &str,
    ) -> anyhow::Result<()> {
        let range = format!("{}!{}{}", sheet_name, column, row);
        let url = self.values_url(&range)?;
        let token = self.auth.bearer_token().await?;
        let body = ValueUpdate {
            range: &range,
            major_dimension: "ROWS",
            values: [[value]],
        };

        let res = send_with_retry(
            self.client
                .put(url)
                .bearer_auth(token)
                .query(&[("valueInputOption", "RAW")])
                .json(&body),
        )
        .await
        .with_context(|| format!("Writing {}", range))?;

        match res.status().is_success() {
            true => Ok(()),
            false => Err(anyhow!("Writing {} failed with {}", range, res.status())),
        }
    }
}
