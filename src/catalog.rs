use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::error::SheetError;
use crate::query::{CatalogQuery, Endpoint};

#[derive(Clone)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Report {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Result<usize, SheetError> {
        self.optional_column(name)
            .ok_or_else(|| SheetError::MissingColumn(name.to_string()))
    }

    pub fn optional_column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn rows(&self) -> impl Iterator<Item = ReportRow<'_>> {
        self.rows.iter().map(|cells| ReportRow { cells })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReportRow<'a> {
    cells: &'a [Option<String>],
}

impl<'a> ReportRow<'a> {
    pub fn get(&self, column: usize) -> Option<&'a str> {
        self.cells.get(column).and_then(|cell| cell.as_deref())
    }

    pub fn get_owned(&self, column: Option<usize>) -> Option<String> {
        column.and_then(|column| self.get(column)).map(str::to_string)
    }
}

pub fn parse_report(text: &str) -> Result<Report, SheetError> {
    // The catalog prefixes reports with a generation timestamp line.
    let body = text
        .split('\n')
        .filter(|line| !line.starts_with("20"))
        .collect::<Vec<_>>()
        .join("\n");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = reader
        .headers()
        .map_err(|err| SheetError::ReportParse(err.to_string()))?
        .iter()
        .map(|header| header.trim().to_string())
        .collect::<Vec<_>>();
    if headers.iter().all(|header| header.is_empty()) {
        return Err(SheetError::ReportParse("report has no header row".to_string()));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| SheetError::ReportParse(err.to_string()))?;
        let cells: Vec<Option<String>> = record
            .iter()
            .map(|cell| {
                let cell = cell.trim_end_matches('\r');
                if cell.is_empty() {
                    None
                } else {
                    Some(cell.to_string())
                }
            })
            .collect();
        rows.push(cells);
    }

    Ok(Report { headers, rows })
}

pub trait CatalogClient {
    fn fetch_report(&self, query: &CatalogQuery) -> Result<Report, SheetError>;
}

#[derive(Clone)]
pub struct IgvfHttpClient {
    client: Client,
    endpoint: Endpoint,
    credentials: Credentials,
}

impl IgvfHttpClient {
    pub fn new(
        endpoint: Endpoint,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self, SheetError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("igvf-sheet/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| SheetError::CatalogHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|err| SheetError::CatalogHttp(err.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            credentials,
        })
    }

    fn handle_status(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, SheetError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .unwrap_or_else(|_| "catalog request failed".to_string());
        Err(SheetError::CatalogStatus { status, message })
    }
}

impl CatalogClient for IgvfHttpClient {
    fn fetch_report(&self, query: &CatalogQuery) -> Result<Report, SheetError> {
        let url = query.to_url(&self.endpoint);
        debug!(%url, "requesting catalog report");
        let response = self
            .client
            .get(url)
            .basic_auth(
                &self.credentials.access_key,
                Some(&self.credentials.secret_key),
            )
            .send()
            .map_err(|err| SheetError::CatalogHttp(err.to_string()))?;
        let text = Self::handle_status(response)?
            .text()
            .map_err(|err| SheetError::CatalogHttp(err.to_string()))?;
        parse_report(&text)
    }
}
