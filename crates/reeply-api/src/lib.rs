// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use reeply_app::{Message, MessageKind, Thread};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use serde::Deserialize;
use std::time::Duration;
use time::PrimitiveDateTime;
use time::macros::format_description;
use url::Url;

/// Blocking client for the threads endpoint. Pages are addressed by
/// offset/limit; the server returns threads ordered by first message,
/// oldest first, and never reports a total count.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }
        let parsed = Url::parse(&base_url)
            .with_context(|| format!("api.base_url {base_url:?} is not a valid URL"))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            bail!(
                "api.base_url must use http or https, got {:?}",
                parsed.scheme()
            );
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetches one page of threads, messages already sorted by date on the
    /// server side.
    pub fn fetch_threads(&self, offset: usize, limit: usize) -> Result<Vec<Thread>> {
        let response = self
            .http
            .get(format!("{}/api/threads", self.base_url))
            .query(&[("offset", offset.to_string()), ("limit", limit.to_string())])
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }

        let parsed: Vec<WireThread> = response.json().context("decode thread page")?;
        parsed
            .into_iter()
            .map(WireThread::into_thread)
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("thread page at offset {offset}"))
    }

    /// Cheap reachability probe: asks for a single thread and discards it.
    pub fn ping(&self) -> Result<()> {
        self.fetch_threads(0, 1).map(|_| ())
    }
}

fn connection_error(base_url: &str, error: reqwest::Error) -> anyhow::Error {
    anyhow!(
        "cannot reach {} -- is the threads server running? ({})",
        base_url,
        error
    )
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(error) = parsed.error
        && !error.is_empty()
    {
        return anyhow!("server error ({}): {}", status.as_u16(), error);
    }

    if body.len() < 100 && !body.contains('{') {
        let trimmed = body.trim();
        if !trimmed.is_empty() {
            return anyhow!("server error ({}): {}", status.as_u16(), trimmed);
        }
    }

    anyhow!("server returned {}", status.as_u16())
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireThread {
    address: String,
    messages: Vec<WireMessage>,
    first_message: String,
    last_message: String,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    date: String,
    #[serde(rename = "type")]
    kind: i64,
}

impl WireThread {
    fn into_thread(self) -> Result<Thread> {
        let address = self.address;
        let messages = self
            .messages
            .into_iter()
            .map(|message| {
                Ok(Message {
                    sent_at: parse_wire_timestamp(&message.date)?,
                    kind: MessageKind::from_wire(message.kind),
                })
            })
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("messages for {address:?}"))?;
        let first_message = parse_wire_timestamp(&self.first_message)
            .with_context(|| format!("first_message for {address:?}"))?;
        let last_message = parse_wire_timestamp(&self.last_message)
            .with_context(|| format!("last_message for {address:?}"))?;
        Ok(Thread {
            address,
            messages,
            first_message,
            last_message,
        })
    }
}

/// Accepts the two naive timestamp shapes the server emits: ISO-8601 with a
/// `T` separator, or SQLite's space-separated form. Fractional seconds are
/// ignored; a calendar day never depends on them.
fn parse_wire_timestamp(raw: &str) -> Result<PrimitiveDateTime> {
    let trimmed = raw.trim();
    let seconds = trimmed.split('.').next().unwrap_or(trimmed);

    if let Ok(value) = PrimitiveDateTime::parse(
        seconds,
        &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        return Ok(value);
    }

    PrimitiveDateTime::parse(
        seconds,
        &format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
    .with_context(|| format!("timestamp {raw:?} is not of the form 2025-02-22T11:28:16"))
}

#[cfg(test)]
mod tests {
    use super::{Client, WireThread, parse_wire_timestamp};
    use anyhow::Result;
    use reeply_app::MessageKind;
    use std::time::Duration;
    use time::macros::datetime;

    #[test]
    fn timestamps_parse_in_both_server_shapes() -> Result<()> {
        assert_eq!(
            parse_wire_timestamp("2025-02-22T11:28:16")?,
            datetime!(2025-02-22 11:28:16)
        );
        assert_eq!(
            parse_wire_timestamp("2025-02-22 11:28:16")?,
            datetime!(2025-02-22 11:28:16)
        );
        assert_eq!(
            parse_wire_timestamp("2025-02-22T11:28:16.123456")?,
            datetime!(2025-02-22 11:28:16)
        );
        Ok(())
    }

    #[test]
    fn garbage_timestamp_reports_the_raw_value() {
        let error = parse_wire_timestamp("1740223696").expect_err("epoch seconds should fail");
        assert!(error.to_string().contains("1740223696"));
    }

    #[test]
    fn wire_thread_decodes_and_converts() -> Result<()> {
        let raw = r#"{
            "address": "+15550001111",
            "messages": [
                {"date": "2025-02-21T09:00:00", "type": 1},
                {"date": "2025-02-21T09:05:00", "type": 2},
                {"date": "2025-02-22 08:30:00", "type": 5}
            ],
            "first_message": "2025-02-21T09:00:00",
            "last_message": "2025-02-22 08:30:00"
        }"#;
        let wire: WireThread = serde_json::from_str(raw)?;
        let thread = wire.into_thread()?;

        assert_eq!(thread.address, "+15550001111");
        assert_eq!(thread.messages.len(), 3);
        assert_eq!(thread.messages[0].kind, MessageKind::Received);
        assert_eq!(thread.messages[1].kind, MessageKind::Sent);
        assert_eq!(thread.messages[2].kind, MessageKind::Other);
        assert_eq!(thread.first_message, datetime!(2025-02-21 09:00:00));
        assert_eq!(thread.last_message, datetime!(2025-02-22 08:30:00));
        Ok(())
    }

    #[test]
    fn bad_timestamp_names_the_offending_thread() {
        let raw = r#"{
            "address": "+15550001111",
            "messages": [{"date": "not a date", "type": 1}],
            "first_message": "2025-02-21T09:00:00",
            "last_message": "2025-02-21T09:00:00"
        }"#;
        let wire: WireThread = serde_json::from_str(raw).expect("valid JSON");
        let error = wire.into_thread().expect_err("conversion should fail");
        let chain = format!("{error:#}");
        assert!(chain.contains("+15550001111"));
        assert!(chain.contains("not a date"));
    }

    #[test]
    fn client_rejects_non_http_base_urls() {
        let error = Client::new("ftp://127.0.0.1:8000", Duration::from_secs(1))
            .expect_err("ftp should be rejected");
        assert!(error.to_string().contains("http"));

        Client::new("", Duration::from_secs(1)).expect_err("empty base URL should be rejected");
    }

    #[test]
    fn client_strips_trailing_slash() -> Result<()> {
        let client = Client::new("http://127.0.0.1:8000/", Duration::from_secs(1))?;
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");
        Ok(())
    }
}
