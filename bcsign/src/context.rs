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

use bcsign_core::{Context, OsEnv, OsRandom};
use bcsign_http_send_reqwest::ReqwestHttpSend;

/// Build a [`Context`] ready for production use.
///
/// Requests go through a default [`reqwest::Client`], env values come from
/// the process and nonces from the OS random generator.
pub fn default_context() -> Context {
    default_context_with_client(reqwest::Client::new())
}

/// Same as [`default_context`] but sends requests through `client`.
pub fn default_context_with_client(client: reqwest::Client) -> Context {
    Context::new()
        .with_http_send(ReqwestHttpSend::new(client))
        .with_env(OsEnv)
        .with_random(OsRandom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context_has_randomness() {
        let ctx = default_context();

        let mut buf = [0u8; 16];
        assert!(ctx.random_bytes(&mut buf).is_ok());
    }
}
