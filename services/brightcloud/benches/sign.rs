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

use bcsign_brightcloud::{
    base_string, normalized_url, signature, Credential, RequestSigner, SignatureParameters,
};
use bcsign_core::time::now;
use bcsign_core::{Context, OsRandom, SignRequest, SigningRequest};
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;
use once_cell::sync::Lazy;

criterion_group!(benches, bench);
criterion_main!(benches);

static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .expect("must success")
});

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("brightcloud");

    group.bench_function("sign_request", |b| {
        let cred = Credential::new("consumer_key", "consumer_secret");
        let s = RequestSigner::new();
        let ctx = Context::new().with_random(OsRandom);

        b.to_async(&*RUNTIME).iter(|| async {
            let mut req = http::Request::new("");
            *req.uri_mut() = "http://thor.brightcloud.com/rest/uris/example.com"
                .parse()
                .expect("url must be valid");

            let (mut parts, _) = req.into_parts();
            s.sign_request(&ctx, &mut parts, Some(&cred), None)
                .await
                .expect("must success")
        })
    });

    group.bench_function("signature", |b| {
        let (mut parts, _) = http::Request::get("http://thor.brightcloud.com/rest/uris")
            .body(())
            .expect("request must be valid")
            .into_parts();
        let req = SigningRequest::build(&mut parts).expect("request must be valid");
        let params = SignatureParameters::new("consumer_key", now(), "0123456789abcdef");

        b.iter(|| {
            let base = base_string(&req.method, &normalized_url(&req), &params);
            signature("consumer_secret", &base)
        })
    });

    group.finish()
}
