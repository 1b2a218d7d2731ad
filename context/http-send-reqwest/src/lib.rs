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

//! Reqwest based [`HttpSend`] implementation for bcsign.

use async_trait::async_trait;
use bcsign_core::{Error, HttpSend, Result};
use bytes::Bytes;
use http_body_util::BodyExt;
use reqwest::{Client, Request};

/// ReqwestHttpSend sends requests with a [`reqwest::Client`].
///
/// Transport failures are surfaced as `ErrorKind::Unexpected` with the
/// reqwest error kept as source; nothing is retried.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req).map_err(|e| {
            Error::request_invalid("failed to convert request").with_source(anyhow::Error::new(e))
        })?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| {
                Error::unexpected("failed to send request").with_source(anyhow::Error::new(e))
            })?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| {
                Error::unexpected("failed to read response body").with_source(anyhow::Error::new(e))
            })?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcsign_core::{Context, ErrorKind};

    #[tokio::test]
    async fn test_unreachable_host_is_unexpected() {
        let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
        let req = http::Request::get("http://127.0.0.1:1/rest/uris")
            .body(Bytes::new())
            .unwrap();

        let err = ctx.http_send(req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }
}
