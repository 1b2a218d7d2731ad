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

//! Look up urls given on the command line.
//!
//! ```shell
//! BRIGHTCLOUD_CONSUMER_KEY=xxx BRIGHTCLOUD_CONSUMER_SECRET=yyy \
//!     cargo run --example lookup -- example.com rust-lang.org
//! ```

use anyhow::Result;
use bcsign::brightcloud::Config;
use bcsign::{default_context, Client};
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();

    let ctx = default_context();
    let client = Client::from_config(ctx.clone(), Config::new().from_env(&ctx))?;

    let hb = client.heartbeat().await?;
    info!(
        "service status {} ({}), cdn update pending: {}",
        hb.status, hb.status_message, hb.update_cdn
    );

    let taxonomy = client.list_categories().await?;
    for url in std::env::args().skip(1) {
        let result = client.info(&url).await?.with_category_names(&taxonomy);

        println!(
            "{url}: reputation {} ({:?})",
            result.reputation_index,
            result.reputation()
        );
        for cat in &result.categories {
            println!("  {} / {} ({}%)", cat.group, cat.name, cat.confidence);
        }
    }

    Ok(())
}
