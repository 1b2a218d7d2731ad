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

//! BrightCloud request signer.
use std::fmt::{Debug, Formatter, Write};
use std::time::Duration;

use http::header::AUTHORIZATION;
use http::HeaderValue;
use http::Method;
use log::debug;
use percent_encoding::{percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::constants::*;
use crate::credential::Credential;
use bcsign_core::hash::{base64_hmac_sha1, hex_md5};
use bcsign_core::time::{format_unix_seconds, now, DateTime};
use bcsign_core::utils::Redact;
use bcsign_core::{Context, Error, Result, SignRequest, SigningRequest};

/// Bytes left alone by [`query_escape`]: ASCII alphanumerics and `-_.~`.
const QUERY_ESCAPE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Random bytes fed into every nonce.
const NONCE_LEN: usize = 16;

/// RequestSigner that implements BrightCloud's single-use HMAC-SHA1 authorization.
///
/// Every call takes a fresh timestamp and nonce, so a signed request is never
/// reused, even when the same request is signed twice.
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self { time: None }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait::async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        ctx: &Context,
        parts: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        if expires_in.is_some() {
            return Err(Error::request_invalid(
                "brightcloud doesn't support query signing",
            ));
        }
        let cred = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;

        // The nonce goes first: without one the request must stay untouched.
        let nonce = generate_nonce(ctx)?;
        let now = self.time.unwrap_or_else(now);
        let params = SignatureParameters::new(&cred.consumer_key, now, &nonce);

        let mut req = SigningRequest::build(parts)?;

        let url = normalized_url(&req);
        let base = base_string(&req.method, &url, &params);
        debug!("calculated base string: {base}");

        let sig = signature(&cred.consumer_secret, &base);
        let mut value: HeaderValue = authorization_header(&params, &sig).parse()?;
        value.set_sensitive(true);
        req.header_append(AUTHORIZATION, value);

        req.apply(parts)
    }
}

/// The ordered protocol parameters covered by the signature.
///
/// The order is fixed and shared by the base string and the header:
///
/// ```text
/// oauth_version, oauth_consumer_key, oauth_signature_method, oauth_timestamp, oauth_nonce
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SignatureParameters {
    params: Vec<(&'static str, String)>,
}

impl SignatureParameters {
    /// Build the parameters for one request.
    pub fn new(consumer_key: &str, timestamp: DateTime, nonce: &str) -> Self {
        Self {
            params: vec![
                ("oauth_version", OAUTH_VERSION.to_string()),
                ("oauth_consumer_key", consumer_key.to_string()),
                ("oauth_signature_method", OAUTH_SIGNATURE_METHOD.to_string()),
                ("oauth_timestamp", format_unix_seconds(timestamp)),
                ("oauth_nonce", nonce.to_string()),
            ],
        }
    }

    /// Iterate over `(name, value)` in signing order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl Debug for SignatureParameters {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for (k, v) in self.iter() {
            if k == "oauth_consumer_key" {
                list.entry(&(k, Redact::from(v)));
            } else {
                list.entry(&(k, v));
            }
        }
        list.finish()
    }
}

/// Escape input the way html form query components are escaped.
///
/// ASCII alphanumerics and `-_.~` pass through, a space becomes `+` and every
/// other byte becomes `%XX`.
pub fn query_escape(input: impl AsRef<[u8]>) -> String {
    let input = input.as_ref();
    let mut s = String::with_capacity(input.len());
    for (idx, part) in input.split(|b| *b == b' ').enumerate() {
        if idx != 0 {
            s.push('+');
        }
        s.extend(percent_encode(part, QUERY_ESCAPE_SET));
    }
    s
}

/// Generate a nonce: [`NONCE_LEN`] random bytes from the context, MD5 hex encoded.
///
/// Fails with `ErrorKind::RandomnessUnavailable` if the random source does.
pub fn generate_nonce(ctx: &Context) -> Result<String> {
    let mut buf = [0u8; NONCE_LEN];
    ctx.random_bytes(&mut buf)?;
    Ok(hex_md5(&buf))
}

/// Normalize the request url: `scheme://host[:port]path`.
///
/// - The port is kept only when it's present and is neither 80 nor 443.
/// - The query and fragment are dropped.
/// - The path is percent decoded into raw bytes, which may not be utf-8.
pub fn normalized_url(req: &SigningRequest) -> Vec<u8> {
    let mut s = format!("{}://{}", req.scheme, req.authority.host());
    if let Some(port) = req.port().filter(|p| *p != 80 && *p != 443) {
        // Writing into a String never fails.
        let _ = write!(s, ":{port}");
    }
    let mut url = s.into_bytes();
    url.extend_from_slice(&req.path_percent_decoded());
    url
}

/// Construct the base string.
///
/// ## Format
///
/// ```text
/// METHOD + "&" +
/// query_escape(normalized_url) + "&" +
/// query_escape("oauth_version=1.0") + "%26" + ... + query_escape("oauth_nonce=<nonce>")
/// ```
pub fn base_string(method: &Method, normalized_url: &[u8], params: &SignatureParameters) -> String {
    let mut s = String::new();
    s.push_str(method.as_str());
    s.push('&');
    s.push_str(&query_escape(normalized_url));
    s.push('&');
    for (idx, (k, v)) in params.iter().enumerate() {
        if idx != 0 {
            s.push_str("%26");
        }
        s.push_str(&query_escape(&format!("{k}={v}")));
    }
    s
}

/// Calculate the escaped signature of a base string.
///
/// The HMAC key is `query_escape(secret) + "&"`: the trailing `&` stands for
/// the empty token secret.
pub fn signature(consumer_secret: &str, base_string: &str) -> String {
    let key = format!("{}&", query_escape(consumer_secret));
    query_escape(&base64_hmac_sha1(key.as_bytes(), base_string.as_bytes()))
}

/// Assemble the `Authorization` header value.
///
/// ```text
/// OAuth realm="",oauth_version="1.0",...,oauth_nonce="<nonce>",oauth_signature="<signature>"
/// ```
pub fn authorization_header(params: &SignatureParameters, signature: &str) -> String {
    let mut s = String::from("OAuth realm=\"\",");
    for (idx, (k, v)) in params.iter().enumerate() {
        if idx != 0 {
            s.push(',');
        }
        s.push_str(&query_escape(k));
        s.push_str("=\"");
        s.push_str(&query_escape(v));
        s.push('"');
    }
    s.push_str(",oauth_signature=\"");
    s.push_str(signature);
    s.push('"');
    s
}
