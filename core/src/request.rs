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

use std::borrow::Cow;
use std::mem;

use http::header::HeaderName;
use http::uri::Authority;
use http::uri::PathAndQuery;
use http::uri::Scheme;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use http::Uri;
use std::str::FromStr;

use crate::{Error, Result};

/// Signing context for request.
///
/// Built from `http::request::Parts` and applied back after signing. The
/// query string is kept verbatim so that applying never rewrites the uri.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, still percent encoded.
    pub path: String,
    /// Raw HTTP query, without the leading `?`.
    pub query: Option<String>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let uri = mem::take(&mut parts.uri).into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        let Some(authority) = uri.authority else {
            return Err(Error::request_invalid(
                "request without authority is invalid for signing",
            ));
        };

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: uri.scheme.unwrap_or(Scheme::HTTP),
            authority,
            path: paq.path().to_string(),
            query: paq.query().map(|v| v.to_string()),

            // Take the headers out of the request to avoid copy.
            // We will return it back when apply the context.
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        // Return headers back.
        mem::swap(&mut parts.headers, &mut self.headers);
        parts.method = self.method;
        parts.uri = {
            let mut uri_parts = mem::take(&mut parts.uri).into_parts();
            uri_parts.scheme = Some(self.scheme);
            uri_parts.authority = Some(self.authority);
            uri_parts.path_and_query = {
                let paq = match self.query {
                    Some(query) => format!("{}?{}", self.path, query),
                    None => self.path,
                };

                Some(PathAndQuery::from_str(&paq)?)
            };
            Uri::from_parts(uri_parts)?
        };

        Ok(())
    }

    /// Get the path percent decoded.
    ///
    /// Escapes that don't form valid utf-8, like `%FF`, are kept as raw bytes.
    pub fn path_percent_decoded(&self) -> Cow<[u8]> {
        percent_encoding::percent_decode_str(&self.path).into()
    }

    /// Get the explicit port of the authority, if any.
    #[inline]
    pub fn port(&self) -> Option<u16> {
        self.authority.port_u16()
    }

    /// Append a header value without touching existing values of the same name.
    pub fn header_append(&mut self, key: HeaderName, value: HeaderValue) {
        self.headers.append(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parts(uri: &str) -> http::request::Parts {
        http::Request::get(uri)
            .header("x-existing", "1")
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[test]
    fn test_build_and_apply_keeps_uri() -> Result<()> {
        let uri = "https://api.example.com:8443/rest/uris/a%20b?x=%2F&flag";
        let mut parts = parts(uri);
        let expected = parts.uri.clone();

        let req = SigningRequest::build(&mut parts)?;
        assert_eq!(req.scheme, Scheme::HTTPS);
        assert_eq!(req.authority.host(), "api.example.com");
        assert_eq!(req.port(), Some(8443));
        assert_eq!(req.path, "/rest/uris/a%20b");
        assert_eq!(req.path_percent_decoded().as_ref(), b"/rest/uris/a b");
        assert_eq!(req.query.as_deref(), Some("x=%2F&flag"));
        assert!(parts.headers.is_empty());

        req.apply(&mut parts)?;
        assert_eq!(parts.uri, expected);
        assert_eq!(parts.headers.get("x-existing").unwrap(), "1");
        Ok(())
    }

    #[test]
    fn test_path_percent_decoded_keeps_raw_bytes() -> Result<()> {
        let mut parts = parts("http://example.com/a%FFb%20c");
        let req = SigningRequest::build(&mut parts)?;

        assert_eq!(req.path_percent_decoded().as_ref(), b"/a\xffb c");
        Ok(())
    }

    #[test]
    fn test_build_without_authority() {
        let mut parts = parts("/rest/uris");

        let err = SigningRequest::build(&mut parts).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_header_append_keeps_existing() -> Result<()> {
        let mut parts = parts("http://example.com/");
        let mut req = SigningRequest::build(&mut parts)?;

        req.header_append(
            HeaderName::from_static("x-existing"),
            HeaderValue::from_static("2"),
        );
        req.apply(&mut parts)?;

        let values: Vec<_> = parts.headers.get_all("x-existing").iter().collect();
        assert_eq!(values, vec!["1", "2"]);
        Ok(())
    }
}
