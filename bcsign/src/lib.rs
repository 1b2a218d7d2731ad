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

//! Signed client for the BrightCloud url reputation service.
//!
//! bcsign looks up the categories and reputation of urls, checks the
//! service heartbeat and lists the category taxonomy. Every request is
//! signed with a single-use HMAC-SHA1 signature, see
//! [`brightcloud::RequestSigner`].
//!
//! ## Example
//!
//! ```no_run
//! use bcsign::{default_context, Client};
//!
//! # async fn example() -> bcsign::Result<()> {
//! let client = Client::new(default_context(), "consumer_key", "consumer_secret");
//!
//! let taxonomy = client.list_categories().await?;
//! let info = client.info("example.com").await?.with_category_names(&taxonomy);
//! for cat in &info.categories {
//!     println!("{} ({}%)", cat.name, cat.confidence);
//! }
//! println!("reputation: {:?}", info.reputation());
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `default-context` (enabled by default): [`default_context`] backed by
//!   reqwest, the process env and the OS random generator.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use bcsign_core::*;

/// BrightCloud request signing.
pub mod brightcloud {
    pub use bcsign_brightcloud::*;
}

mod client;
pub use client::Client;

pub mod response;
pub use response::{Category, HeartBeat, Reputation, UrlInfo};

mod url;
pub use url::{lookup_uri, validate_url};

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::{default_context, default_context_with_client};
