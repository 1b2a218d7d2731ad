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

use crate::response::{
    decode_categories, decode_heartbeat, decode_url_info, Category, HeartBeat, UrlInfo,
};
use crate::url::{lookup_uri, validate_url};
use bcsign_brightcloud::{Config, Credential, RequestSigner, StaticCredentialProvider};
use bcsign_core::{Context, Error, Result, Signer};
use bytes::Bytes;
use log::debug;

/// Longest part of an error body kept in error messages.
const ERROR_BODY_LIMIT: usize = 256;

/// Client for the BrightCloud uri service.
///
/// Every call builds and signs a fresh request, so no two requests share a
/// nonce or timestamp.
#[derive(Clone, Debug)]
pub struct Client {
    signer: Signer<Credential>,
    endpoint: String,
}

impl Client {
    /// Create a client for the given consumer key and secret.
    pub fn new(ctx: Context, consumer_key: &str, consumer_secret: &str) -> Self {
        Self::with_signer(Signer::new(
            ctx,
            StaticCredentialProvider::new(consumer_key, consumer_secret),
            RequestSigner::new(),
        ))
    }

    /// Create a client from an already built signer.
    ///
    /// Requests are sent through the signer's context.
    pub fn with_signer(signer: Signer<Credential>) -> Self {
        Self {
            signer,
            endpoint: bcsign_brightcloud::DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Create a client from config.
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](bcsign_core::ErrorKind::ConfigInvalid)
    /// if the consumer key or secret is missing.
    pub fn from_config(ctx: Context, config: Config) -> Result<Self> {
        let (Some(key), Some(secret)) = (&config.consumer_key, &config.consumer_secret) else {
            return Err(Error::config_invalid(
                "consumer_key and consumer_secret are required",
            ));
        };
        if key.is_empty() || secret.is_empty() {
            return Err(Error::config_invalid(
                "consumer_key and consumer_secret must not be empty",
            ));
        }

        Ok(Self::new(ctx, key, secret).with_endpoint(config.endpoint()))
    }

    /// Send requests to `endpoint` instead of the public service.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Look up the categories and reputation of `url`.
    pub async fn info(&self, url: &str) -> Result<UrlInfo> {
        validate_url(url)?;

        let body = self.get(&lookup_uri(&self.endpoint, url)).await?;
        decode_url_info(&body)
    }

    /// Check the service status and whether clients should update.
    pub async fn heartbeat(&self) -> Result<HeartBeat> {
        let body = self.get(&self.endpoint).await?;
        decode_heartbeat(&body)
    }

    /// Fetch the full category taxonomy.
    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let body = self.get(&format!("{}/categories", self.endpoint)).await?;
        decode_categories(&body)
    }

    async fn get(&self, uri: &str) -> Result<Bytes> {
        let (mut parts, _) = http::Request::get(uri).body(())?.into_parts();
        self.signer.sign(&mut parts, None).await?;

        debug!("sending brightcloud request: {} {}", parts.method, parts.uri);
        let resp = self
            .signer
            .context()
            .http_send(http::Request::from_parts(parts, Bytes::new()))
            .await?;

        let status = resp.status();
        let body = resp.into_body();
        if !status.is_success() {
            let excerpt = String::from_utf8_lossy(&body);
            let excerpt: String = excerpt.chars().take(ERROR_BODY_LIMIT).collect();
            return Err(Error::unexpected(format!(
                "brightcloud responded with status {status}: {excerpt}"
            )));
        }

        Ok(body)
    }
}
