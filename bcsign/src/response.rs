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

//! Response documents of the BrightCloud uri service.
//!
//! Every document is rooted at `<bcap>` and carries the payload in its
//! `<response>` child:
//!
//! ```xml
//! <bcap>
//!   <response>
//!     <status>200</status>
//!     <statusmsg>OK</statusmsg>
//!     ...
//!   </response>
//! </bcap>
//! ```

use bcsign_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Name of the root element of every document.
const ROOT: &[u8] = b"bcap";

/// A BrightCloud category.
///
/// A lookup only fills `id` and `confidence`; `name` and `group` come from
/// [`Client::list_categories`](crate::Client::list_categories), see
/// [`UrlInfo::with_category_names`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Category {
    /// Category id.
    pub id: u32,
    /// Category name, like `Search Engines`.
    pub name: String,
    /// One of `Security`, `Legal Liability`, `IT Resources` or `Productivity`.
    pub group: String,
    /// How confident BrightCloud is about the classification, from 1 to 100.
    pub confidence: u32,
}

/// Risk tier of a reputation index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reputation {
    /// 80 to 100.
    Trustworthy,
    /// 60 to 79.
    LowRisk,
    /// 40 to 59.
    ModerateRisk,
    /// 20 to 39.
    Suspicious,
    /// 0 to 19.
    HighRisk,
}

impl Reputation {
    /// Bucket a 0-100 reputation index.
    ///
    /// Indexes below 0 count as high risk and above 100 as trustworthy.
    pub fn from_index(index: i32) -> Self {
        match index {
            80.. => Reputation::Trustworthy,
            60..=79 => Reputation::LowRisk,
            40..=59 => Reputation::ModerateRisk,
            20..=39 => Reputation::Suspicious,
            _ => Reputation::HighRisk,
        }
    }
}

/// Category and reputation data of a url.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlInfo {
    /// Status reported inside the document.
    pub status: i32,
    /// Status message reported inside the document.
    pub status_message: String,
    /// The uri BrightCloud looked up.
    pub uri: String,
    /// Categories of the uri, with only `id` and `confidence` set.
    pub categories: Vec<Category>,
    /// Security score from 0 (high risk) to 100 (trustworthy).
    pub reputation_index: i32,
    /// All subdomains of the url share the same category.
    pub all_same_category: bool,
}

impl UrlInfo {
    /// Risk tier of [`UrlInfo::reputation_index`].
    pub fn reputation(&self) -> Reputation {
        Reputation::from_index(self.reputation_index)
    }

    /// Fill in category names and groups from the category taxonomy.
    ///
    /// Categories missing from `taxonomy` are left as they are.
    pub fn with_category_names(mut self, taxonomy: &[Category]) -> Self {
        for cat in &mut self.categories {
            if let Some(known) = taxonomy.iter().find(|v| v.id == cat.id) {
                cat.name.clone_from(&known.name);
                cat.group.clone_from(&known.group);
            }
        }
        self
    }
}

/// Service heartbeat and CDN status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeartBeat {
    /// Status reported inside the document.
    pub status: i32,
    /// Status message reported inside the document.
    pub status_message: String,
    /// Clients should refresh their CDN database.
    pub update_cdn: bool,
    /// Clients should refresh their real time update database.
    pub update_rtu: bool,
    /// Time of the last update, as sent by the service.
    pub update_time: String,
    /// CDN uris, in document order.
    pub cdn_uris: Vec<String>,
}

#[derive(Deserialize)]
struct Document<T> {
    response: T,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct CategoryList {
    cat: Vec<CategoryElement>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct CategoryElement {
    catid: u32,
    catname: String,
    catgroup: String,
    conf: u32,
}

impl From<CategoryElement> for Category {
    fn from(v: CategoryElement) -> Self {
        Category {
            id: v.catid,
            name: v.catname,
            group: v.catgroup,
            confidence: v.conf,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct InfoResponse {
    status: i32,
    statusmsg: String,
    uri: String,
    categories: CategoryList,
    bcri: i32,
    a1cat: i32,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct UriList {
    uri: Vec<String>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct HeartBeatResponse {
    status: i32,
    statusmsg: String,
    updatecdn: bool,
    updatertu: bool,
    updatetime: String,
    cdnlist: UriList,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct CategoriesResponse {
    categories: CategoryList,
}

/// Decode the response of a url lookup.
pub fn decode_url_info(body: &[u8]) -> Result<UrlInfo> {
    let v: InfoResponse = decode(body)?;

    Ok(UrlInfo {
        status: v.status,
        status_message: v.statusmsg,
        uri: v.uri,
        categories: v.categories.cat.into_iter().map(Category::from).collect(),
        reputation_index: v.bcri,
        all_same_category: v.a1cat != 0,
    })
}

/// Decode the response of a heartbeat.
pub fn decode_heartbeat(body: &[u8]) -> Result<HeartBeat> {
    let v: HeartBeatResponse = decode(body)?;

    Ok(HeartBeat {
        status: v.status,
        status_message: v.statusmsg,
        update_cdn: v.updatecdn,
        update_rtu: v.updatertu,
        update_time: v.updatetime,
        cdn_uris: v.cdnlist.uri,
    })
}

/// Decode the category taxonomy.
pub fn decode_categories(body: &[u8]) -> Result<Vec<Category>> {
    let v: CategoriesResponse = decode(body)?;

    Ok(v.categories.cat.into_iter().map(Category::from).collect())
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    check_root(body)?;

    let doc: Document<T> = quick_xml::de::from_reader(body).map_err(|e| {
        Error::response_invalid("failed to decode brightcloud response")
            .with_source(anyhow::Error::new(e))
    })?;
    Ok(doc.response)
}

/// Make sure the first element of the document is `<bcap>`.
fn check_root(body: &[u8]) -> Result<()> {
    let mut reader = Reader::from_reader(body);
    let mut buf = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            Error::response_invalid("response is not well-formed xml")
                .with_source(anyhow::Error::new(e))
        })?;

        match event {
            Event::Start(e) | Event::Empty(e) => {
                if e.name().as_ref() == ROOT {
                    return Ok(());
                }
                return Err(Error::response_invalid(format!(
                    "expected element <bcap> but have <{}>",
                    String::from_utf8_lossy(e.name().as_ref())
                )));
            }
            Event::Eof => {
                return Err(Error::response_invalid("response has no root element"));
            }
            _ => buf.clear(),
        }
    }
}
