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

use crate::{constants::*, Credential};
use async_trait::async_trait;
use bcsign_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads BrightCloud credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `BRIGHTCLOUD_CONSUMER_KEY`: The consumer key
/// - `BRIGHTCLOUD_CONSUMER_SECRET`: The consumer secret
///
/// Both must be set and non-empty, otherwise nothing is loaded.
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let key = ctx.env_var(BRIGHTCLOUD_CONSUMER_KEY);
        let secret = ctx.env_var(BRIGHTCLOUD_CONSUMER_SECRET);

        match (key, secret) {
            (Some(key), Some(secret)) if !key.is_empty() && !secret.is_empty() => {
                Ok(Some(Credential::new(key, secret)))
            }
            _ => Ok(None),
        }
    }
}
