//! etcd v2 client handle.

use super::{EtcdApiError, EtcdError, EtcdResponse, EtcdResult, EtcdVersion, MembersResponse};
use crate::etcd2::domain::RegistryKey;
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, instrument};
use url::{Url, form_urlencoded};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Handle on one etcd cluster.
///
/// Requests go to the known members in order; a member failing at the
/// transport level hands the request to the next one. The handle is safe to
/// share between tasks: the transport pools connections internally and the
/// member list is only locked to copy or replace it.
#[derive(Debug)]
pub struct EtcdClient {
    http: reqwest::Client,
    seeds: Vec<Url>,
    members: RwLock<Vec<Url>>,
}

impl EtcdClient {
    pub(super) fn new(http: reqwest::Client, seeds: Vec<Url>) -> Self {
        Self {
            http,
            members: RwLock::new(seeds.clone()),
            seeds,
        }
    }

    /// Returns the URLs the handle was built with.
    #[must_use]
    pub fn seeds(&self) -> &[Url] {
        &self.seeds
    }

    /// Returns the member URLs requests are currently routed to.
    #[must_use]
    pub fn endpoints(&self) -> Vec<Url> {
        self.members
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Re-resolves cluster membership via `GET /v2/members`.
    ///
    /// Known members are asked first, then the seeds. The first member
    /// reporting a non-empty set of client URLs replaces the member list.
    /// Returns `false` and keeps the current list when nobody answers.
    #[instrument(skip(self))]
    pub async fn sync_cluster(&self) -> bool {
        let mut candidates = self.endpoints();
        for seed in &self.seeds {
            if !candidates.contains(seed) {
                candidates.push(seed.clone());
            }
        }

        for candidate in &candidates {
            match self.fetch_members(candidate).await {
                Ok(urls) if !urls.is_empty() => {
                    debug!(member = %candidate, count = urls.len(), "synced cluster members");
                    *self.members.write().unwrap_or_else(PoisonError::into_inner) = urls;
                    return true;
                }
                Ok(_) => debug!(member = %candidate, "member reported no client URLs"),
                Err(err) => debug!(member = %candidate, error = %err, "member sync failed"),
            }
        }
        false
    }

    /// Reads the server and cluster version via `GET /version`.
    ///
    /// # Errors
    ///
    /// Returns [`EtcdError`] when no member answers or the answer is not a
    /// version document.
    pub async fn version(&self) -> EtcdResult<EtcdVersion> {
        decode(self.request_version().await?).await
    }

    /// Checks that a member answers `GET /version` with a success status.
    ///
    /// Any body is accepted; etcd 2.0 answers in plain text. The version
    /// document is returned when the body is one.
    ///
    /// # Errors
    ///
    /// Returns [`EtcdError`] when no member answers or the status is not a
    /// success.
    pub async fn ping(&self) -> EtcdResult<Option<EtcdVersion>> {
        let (url, body) = success_body(self.request_version().await?).await?;
        match serde_json::from_slice(&body) {
            Ok(version) => Ok(Some(version)),
            Err(err) => {
                debug!(url = %url, error = %err, "version answer is not a JSON document");
                Ok(None)
            }
        }
    }

    /// Sets `key` to `value`, creating or overwriting it.
    ///
    /// With `ttl_seconds` the key expires unless set again in time.
    ///
    /// # Errors
    ///
    /// Returns [`EtcdError`] when no member answers or etcd rejects the write.
    #[instrument(skip(self))]
    pub async fn set(
        &self,
        key: &RegistryKey,
        value: &str,
        ttl_seconds: Option<u64>,
    ) -> EtcdResult<EtcdResponse> {
        let body = {
            let mut form = form_urlencoded::Serializer::new(String::new());
            form.append_pair("value", value);
            if let Some(ttl) = ttl_seconds {
                form.append_pair("ttl", &ttl.to_string());
            }
            form.finish()
        };

        let response = self
            .send(|http, member| {
                Ok(http
                    .put(key_url(member, key)?)
                    .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                    .body(body.clone()))
            })
            .await?;
        decode(response).await
    }

    /// Reads `key`.
    ///
    /// # Errors
    ///
    /// Returns [`EtcdError`] when no member answers or the key is missing.
    #[instrument(skip(self))]
    pub async fn get(&self, key: &RegistryKey) -> EtcdResult<EtcdResponse> {
        let response = self
            .send(|http, member| Ok(http.get(key_url(member, key)?)))
            .await?;
        decode(response).await
    }

    /// Deletes `key`.
    ///
    /// A missing key is reported by etcd as error code 100.
    ///
    /// # Errors
    ///
    /// Returns [`EtcdError`] when no member answers or etcd rejects the
    /// delete.
    #[instrument(skip(self))]
    pub async fn delete(&self, key: &RegistryKey, recursive: bool) -> EtcdResult<EtcdResponse> {
        let response = self
            .send(|http, member| {
                let mut url = key_url(member, key)?;
                url.query_pairs_mut()
                    .append_pair("recursive", if recursive { "true" } else { "false" });
                Ok(http.delete(url))
            })
            .await?;
        decode(response).await
    }

    async fn fetch_members(&self, member: &Url) -> EtcdResult<Vec<Url>> {
        let response = self
            .http
            .get(endpoint_url(member, &["v2", "members"])?)
            .send()
            .await
            .map_err(EtcdError::Unreachable)?;
        let document: MembersResponse = decode(response).await?;

        let mut urls: Vec<Url> = Vec::new();
        for raw in document
            .members
            .iter()
            .flat_map(|entry| entry.client_urls.iter())
        {
            match Url::parse(raw) {
                Ok(url) if !urls.contains(&url) => urls.push(url),
                Ok(_) => {}
                Err(err) => debug!(url = %raw, error = %err, "skipping unparsable client URL"),
            }
        }
        Ok(urls)
    }

    async fn request_version(&self) -> EtcdResult<Response> {
        self.send(|http, member| Ok(http.get(endpoint_url(member, &["version"])?)))
            .await
    }

    async fn send<F>(&self, build: F) -> EtcdResult<Response>
    where
        F: Fn(&reqwest::Client, &Url) -> EtcdResult<RequestBuilder>,
    {
        let mut last_error = None;
        for member in self.endpoints() {
            match build(&self.http, &member)?.send().await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    debug!(member = %member, error = %err, "etcd member unreachable");
                    last_error = Some(err);
                }
            }
        }
        Err(last_error.map_or(EtcdError::NoMembers, EtcdError::Unreachable))
    }
}

fn endpoint_url(member: &Url, segments: &[&str]) -> EtcdResult<Url> {
    let mut url = member.clone();
    url.path_segments_mut()
        .map_err(|()| EtcdError::InvalidMemberUrl(member.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn key_url(member: &Url, key: &RegistryKey) -> EtcdResult<Url> {
    let mut url = endpoint_url(member, &["v2", "keys"])?;
    url.path_segments_mut()
        .map_err(|()| EtcdError::InvalidMemberUrl(member.to_string()))?
        .extend(key.segments());
    Ok(url)
}

async fn decode<T: DeserializeOwned>(response: Response) -> EtcdResult<T> {
    let (url, body) = success_body(response).await?;
    serde_json::from_slice(&body).map_err(|source| EtcdError::Decode { url, source })
}

async fn success_body(response: Response) -> EtcdResult<(String, Vec<u8>)> {
    let url = response.url().to_string();
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|source| EtcdError::Body {
            url: url.clone(),
            source,
        })?;

    if status.is_success() {
        return Ok((url, body.to_vec()));
    }

    match serde_json::from_slice::<EtcdApiError>(&body) {
        Ok(api) => Err(EtcdError::Api(api)),
        Err(_) => Err(EtcdError::UnexpectedStatus {
            status: status.as_u16(),
            url,
            body: String::from_utf8_lossy(&body).into_owned(),
        }),
    }
}
