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

// Env values used in bcsign.
pub const BRIGHTCLOUD_CONSUMER_KEY: &str = "BRIGHTCLOUD_CONSUMER_KEY";
pub const BRIGHTCLOUD_CONSUMER_SECRET: &str = "BRIGHTCLOUD_CONSUMER_SECRET";
pub const BRIGHTCLOUD_ENDPOINT: &str = "BRIGHTCLOUD_ENDPOINT";

/// Base url of the BrightCloud uri service.
pub const DEFAULT_ENDPOINT: &str = "http://thor.brightcloud.com/rest/uris";

// Fixed protocol parameters.
pub const OAUTH_VERSION: &str = "1.0";
pub const OAUTH_SIGNATURE_METHOD: &str = "HMAC-SHA1";
