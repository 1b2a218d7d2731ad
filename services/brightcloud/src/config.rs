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

use std::fmt::{Debug, Formatter};

use crate::constants::*;
use bcsign_core::{utils::Redact, Context};

/// Config carries all the configuration for the BrightCloud client.
#[derive(Clone, Default)]
pub struct Config {
    /// `consumer_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`BRIGHTCLOUD_CONSUMER_KEY`]
    pub consumer_key: Option<String>,
    /// `consumer_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`BRIGHTCLOUD_CONSUMER_SECRET`]
    pub consumer_secret: Option<String>,
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`BRIGHTCLOUD_ENDPOINT`]
    /// - [`DEFAULT_ENDPOINT`] otherwise
    pub endpoint: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set consumer_key
    pub fn with_consumer_key(mut self, consumer_key: impl Into<String>) -> Self {
        self.consumer_key = Some(consumer_key.into());
        self
    }

    /// Set consumer_secret
    pub fn with_consumer_secret(mut self, consumer_secret: impl Into<String>) -> Self {
        self.consumer_secret = Some(consumer_secret.into());
        self
    }

    /// Set endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Fill unset fields from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(BRIGHTCLOUD_CONSUMER_KEY) {
            self.consumer_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(BRIGHTCLOUD_CONSUMER_SECRET) {
            self.consumer_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(BRIGHTCLOUD_ENDPOINT) {
            self.endpoint.get_or_insert(v);
        }

        self
    }

    /// The endpoint to use, falling back to [`DEFAULT_ENDPOINT`].
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("consumer_key", &Redact::from(&self.consumer_key))
            .field("consumer_secret", &Redact::from(&self.consumer_secret))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcsign_core::{OsEnv, StaticEnv};
    use std::collections::HashMap;

    #[test]
    fn test_config_from_env_keeps_explicit_values() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (BRIGHTCLOUD_CONSUMER_KEY.to_string(), "env_key".to_string()),
                (
                    BRIGHTCLOUD_CONSUMER_SECRET.to_string(),
                    "env_secret".to_string(),
                ),
            ]),
        });

        let config = Config::new().with_consumer_key("explicit_key").from_env(&ctx);

        assert_eq!(config.consumer_key.as_deref(), Some("explicit_key"));
        assert_eq!(config.consumer_secret.as_deref(), Some("env_secret"));
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_config_from_os_env() {
        temp_env::with_vars(
            vec![
                (BRIGHTCLOUD_CONSUMER_KEY, Some("os_key")),
                (BRIGHTCLOUD_CONSUMER_SECRET, Some("os_secret")),
                (BRIGHTCLOUD_ENDPOINT, Some("https://example.com/rest/uris")),
            ],
            || {
                let ctx = Context::new().with_env(OsEnv);
                let config = Config::new().from_env(&ctx);

                assert_eq!(config.consumer_key.as_deref(), Some("os_key"));
                assert_eq!(config.consumer_secret.as_deref(), Some("os_secret"));
                assert_eq!(config.endpoint(), "https://example.com/rest/uris");
            },
        );
    }

    #[test]
    fn test_config_debug_is_redacted() {
        let config = Config::new()
            .with_consumer_key("AK")
            .with_consumer_secret("a-long-consumer-secret");
        let output = format!("{config:?}");

        assert!(!output.contains("a-long-consumer-secret"));
    }
}
