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

//! Request signer for the BrightCloud web service.
//!
//! BrightCloud authenticates every request with a single-use HMAC-SHA1
//! signature carried in an OAuth 1.0 style `Authorization` header. The
//! signature covers the method, the normalized url and five ordered
//! protocol parameters, including a fresh timestamp and nonce.
//!
//! ```no_run
//! use bcsign_brightcloud::{RequestSigner, StaticCredentialProvider};
//! use bcsign_core::{Context, OsRandom, Signer};
//!
//! # async fn example() -> bcsign_core::Result<()> {
//! let ctx = Context::new().with_random(OsRandom);
//! let signer = Signer::new(
//!     ctx,
//!     StaticCredentialProvider::new("consumer_key", "consumer_secret"),
//!     RequestSigner::new(),
//! );
//!
//! let (mut parts, _) = http::Request::get("http://thor.brightcloud.com/rest/uris")
//!     .body(())?
//!     .into_parts();
//! signer.sign(&mut parts, None).await?;
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::*;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{
    authorization_header, base_string, generate_nonce, normalized_url, query_escape, signature,
    RequestSigner, SignatureParameters,
};

mod provide_credential;
pub use provide_credential::*;
