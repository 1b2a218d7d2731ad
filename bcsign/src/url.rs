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

use bcsign_core::{Error, Result};
use http::Uri;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped when a looked-up url is embedded in the endpoint path.
///
/// `/`, `:`, `=`, `&` and `@` stay as they are so `http://a.com/b?c=d`
/// still reads as a url on the service side.
const LOOKUP_ESCAPE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Characters escaped before a url is parsed for validation.
///
/// `[` and `]` stay so that IPv6 literal hosts parse.
const VALIDATE_ESCAPE_SET: &AsciiSet = &LOOKUP_ESCAPE_SET.remove(b'[').remove(b']');

/// Check that `url` is something BrightCloud can look up.
///
/// Urls without an `http://` or `https://` scheme are checked as if they
/// had `http://` in front. The url must carry a non-empty host.
///
/// Returns the url with `http://` prepended where it was missing.
pub fn validate_url(url: &str) -> Result<String> {
    if url.trim().is_empty() {
        return Err(Error::request_invalid("url to look up is empty"));
    }

    let full = if has_http_scheme(url) {
        url.to_string()
    } else {
        format!("http://{url}")
    };

    let escaped = utf8_percent_encode(&full, VALIDATE_ESCAPE_SET).to_string();
    let uri: Uri = escaped.parse().map_err(|e| {
        Error::request_invalid(format!("url {url} is not valid")).with_source(anyhow::Error::new(e))
    })?;

    match uri.host() {
        Some(host) if !host.is_empty() => Ok(full),
        _ => Err(Error::request_invalid(format!("url {url} has no host"))),
    }
}

/// Build the lookup uri for `url` below `endpoint`.
///
/// The url is embedded as given by the caller, without the scheme added by
/// [`validate_url`].
pub fn lookup_uri(endpoint: &str, url: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        utf8_percent_encode(url, LOOKUP_ESCAPE_SET)
    )
}

fn has_http_scheme(url: &str) -> bool {
    ["http://", "https://"].iter().any(|prefix| {
        url.get(..prefix.len())
            .is_some_and(|v| v.eq_ignore_ascii_case(prefix))
    })
}
