// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::env;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use bcsign::brightcloud::Config;
use bcsign::{Client, Context, ErrorKind, HttpSend, OsRandom, Reputation, StaticEnv};
use bytes::Bytes;
use http::header::AUTHORIZATION;
use http::StatusCode;
use log::warn;
use pretty_assertions::assert_eq;

const HEARTBEAT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<bcap>
  <response>
    <status>200</status>
    <statusmsg>OK</statusmsg>
    <updatecdn>true</updatecdn>
    <updatertu>1</updatertu>
    <updatetime>2024-05-06 07:08:09</updatetime>
    <cdnlist>
      <uri>http://cdn-b.example.com</uri>
      <uri>http://cdn-a.example.com</uri>
    </cdnlist>
  </response>
</bcap>"#;

const INFO: &str = r#"<bcap>
  <response>
    <status>200</status>
    <statusmsg>OK</statusmsg>
    <uri>example.com</uri>
    <categories>
      <cat><catid>6</catid><conf>99</conf></cat>
    </categories>
    <bcri>35</bcri>
    <a1cat>0</a1cat>
  </response>
</bcap>"#;

const CATEGORIES: &str = r#"<bcap>
  <response>
    <categories>
      <cat><catid>6</catid><catname>Search Engines</catname><catgroup>IT Resources</catgroup></cat>
    </categories>
  </response>
</bcap>"#;

/// Answers every request with a canned response and keeps the requests.
#[derive(Debug, Clone)]
struct MockHttpSend {
    status: StatusCode,
    body: &'static str,
    requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
}

impl MockHttpSend {
    fn new(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            requests: Arc::default(),
        }
    }

    fn uris(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("lock poisoned")
            .iter()
            .map(|req| req.uri().to_string())
            .collect()
    }

    fn authorizations(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("lock poisoned")
            .iter()
            .map(|req| {
                req.headers()[AUTHORIZATION]
                    .to_str()
                    .expect("header must be valid")
                    .to_string()
            })
            .collect()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> bcsign::Result<http::Response<Bytes>> {
        self.requests.lock().expect("lock poisoned").push(req);

        Ok(http::Response::builder()
            .status(self.status)
            .body(Bytes::from_static(self.body.as_bytes()))?)
    }
}

fn init_client(mock: &MockHttpSend) -> Client {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new()
        .with_http_send(mock.clone())
        .with_random(OsRandom);
    Client::new(ctx, "test_key", "test_secret")
}

#[tokio::test]
async fn test_heartbeat() -> Result<()> {
    let mock = MockHttpSend::new(StatusCode::OK, HEARTBEAT);
    let client = init_client(&mock);

    let hb = client.heartbeat().await?;

    assert!(hb.update_cdn);
    assert!(hb.update_rtu);
    assert_eq!(
        hb.cdn_uris,
        vec!["http://cdn-b.example.com", "http://cdn-a.example.com"]
    );
    assert_eq!(mock.uris(), vec!["http://thor.brightcloud.com/rest/uris"]);

    let auth = &mock.authorizations()[0];
    assert!(auth.starts_with(
        r#"OAuth realm="",oauth_version="1.0",oauth_consumer_key="test_key","#
    ));
    assert!(auth.contains(r#",oauth_signature=""#));
    assert!(!auth.contains("test_secret"));
    Ok(())
}

#[tokio::test]
async fn test_info() -> Result<()> {
    let mock = MockHttpSend::new(StatusCode::OK, INFO);
    let client = init_client(&mock).with_endpoint("http://127.0.0.1:8080/rest/uris/");

    let info = client.info("example.com").await?;

    assert_eq!(info.uri, "example.com");
    assert_eq!(info.categories[0].id, 6);
    assert_eq!(info.categories[0].confidence, 99);
    assert_eq!(info.reputation(), Reputation::Suspicious);
    assert!(!info.all_same_category);
    assert_eq!(mock.uris(), vec!["http://127.0.0.1:8080/rest/uris/example.com"]);
    Ok(())
}

#[tokio::test]
async fn test_info_rejects_invalid_url_without_sending() -> Result<()> {
    let mock = MockHttpSend::new(StatusCode::OK, INFO);
    let client = init_client(&mock);

    let err = client.info("http://").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    assert!(mock.uris().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_list_categories() -> Result<()> {
    let mock = MockHttpSend::new(StatusCode::OK, CATEGORIES);
    let client = init_client(&mock);

    let taxonomy = client.list_categories().await?;

    assert_eq!(taxonomy.len(), 1);
    assert_eq!(taxonomy[0].name, "Search Engines");
    assert_eq!(
        mock.uris(),
        vec!["http://thor.brightcloud.com/rest/uris/categories"]
    );
    Ok(())
}

#[tokio::test]
async fn test_every_call_is_signed_fresh() -> Result<()> {
    let mock = MockHttpSend::new(StatusCode::OK, HEARTBEAT);
    let client = init_client(&mock);

    client.heartbeat().await?;
    client.heartbeat().await?;

    let auths = mock.authorizations();
    assert_eq!(auths.len(), 2);
    assert_ne!(auths[0], auths[1]);
    Ok(())
}

#[tokio::test]
async fn test_error_status() -> Result<()> {
    let mock = MockHttpSend::new(StatusCode::UNAUTHORIZED, "signature rejected");
    let client = init_client(&mock);

    let err = client.heartbeat().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unexpected);
    assert!(err.message().contains("401"));
    assert!(err.message().contains("signature rejected"));
    Ok(())
}

#[tokio::test]
async fn test_malformed_response() -> Result<()> {
    let mock = MockHttpSend::new(StatusCode::OK, "<html><body>maintenance</body></html>");
    let client = init_client(&mock);

    let err = client.heartbeat().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ResponseInvalid);
    Ok(())
}

#[tokio::test]
async fn test_missing_randomness_sends_nothing() -> Result<()> {
    let mock = MockHttpSend::new(StatusCode::OK, HEARTBEAT);
    let client = Client::new(
        Context::new().with_http_send(mock.clone()),
        "test_key",
        "test_secret",
    );

    let err = client.heartbeat().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RandomnessUnavailable);
    assert!(mock.uris().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_from_config() -> Result<()> {
    let mock = MockHttpSend::new(StatusCode::OK, HEARTBEAT);
    let ctx = Context::new()
        .with_http_send(mock.clone())
        .with_random(OsRandom)
        .with_env(StaticEnv {
            envs: [
                ("BRIGHTCLOUD_CONSUMER_KEY", "env_key"),
                ("BRIGHTCLOUD_CONSUMER_SECRET", "env_secret"),
                ("BRIGHTCLOUD_ENDPOINT", "http://mirror.example.com/rest/uris"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        });

    let client = Client::from_config(ctx.clone(), Config::new().from_env(&ctx))?;
    assert_eq!(client.endpoint(), "http://mirror.example.com/rest/uris");

    client.heartbeat().await?;
    assert!(mock.authorizations()[0].contains(r#"oauth_consumer_key="env_key""#));

    let err = Client::from_config(ctx, Config::new().with_consumer_key("only_key")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    Ok(())
}

fn init_live_client() -> Option<Client> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("BCSIGN_BRIGHTCLOUD_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let ctx = bcsign::default_context();
    let config = Config::new().from_env(&ctx);
    Some(
        Client::from_config(ctx, config)
            .expect("env BRIGHTCLOUD_CONSUMER_KEY and BRIGHTCLOUD_CONSUMER_SECRET must set"),
    )
}

#[tokio::test]
async fn test_live_heartbeat() -> Result<()> {
    let Some(client) = init_live_client() else {
        warn!("BCSIGN_BRIGHTCLOUD_TEST is not set, skipped");
        return Ok(());
    };

    let hb = client.heartbeat().await?;
    assert_eq!(hb.status, 200, "heartbeat status: {}", hb.status_message);
    Ok(())
}

#[tokio::test]
async fn test_live_info() -> Result<()> {
    let Some(client) = init_live_client() else {
        warn!("BCSIGN_BRIGHTCLOUD_TEST is not set, skipped");
        return Ok(());
    };

    let taxonomy = client.list_categories().await?;
    assert!(!taxonomy.is_empty());

    let info = client
        .info("www.google.com")
        .await?
        .with_category_names(&taxonomy);
    assert!(!info.categories.is_empty());
    assert!(info.categories.iter().all(|v| !v.name.is_empty()));
    Ok(())
}
