//! Resource Operation Facade
//!
//! [`ContentClient`] is what screens call. Each operation:
//!
//! 1. reads the session token; no token means `Unauthenticated` and no request
//! 2. runs the request through the [`RequestExecutor`] under the caller's scope
//! 3. folds any failure into an [`Outcome`]; a 401 also clears the stored token
//! 4. decodes the body into the resource's record type
//!
//! No operation returns `Err` or panics; everything resolves to an `Outcome`.

use bridge_traits::{HttpMethod, HttpResponse};
use core_auth::CredentialStore;
use core_runtime::{AdminConfig, CancellationScope, UploadPolicy};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::classifier::{to_failure, ErrorKind};
use crate::envelope::{decode_list, decode_record, DecodeError};
use crate::error::RequestFailure;
use crate::executor::{RequestBody, RequestExecutor, RequestSpec};
use crate::outcome::{Failure, Outcome};
use crate::paths::PathNormalizer;
use crate::resources::{encode_fields, Resource, ResourceKind};

/// Typed CRUD over every managed resource.
///
/// Cheap to clone; clones share the transport and the token slot.
///
/// ```ignore
/// let scope = CancellationScope::new();
/// match client.list::<SocialLink>(&scope).await {
///     Outcome::Success(links) => render(links),
///     Outcome::Unauthenticated => redirect_to_login(),
///     Outcome::Failure(failure) => show_error(&failure.message),
///     Outcome::Cancelled => {}
/// }
/// ```
#[derive(Clone)]
pub struct ContentClient {
    executor: RequestExecutor,
    credentials: CredentialStore,
    paths: PathNormalizer,
    upload_policy: UploadPolicy,
}

impl ContentClient {
    pub fn new(
        executor: RequestExecutor,
        credentials: CredentialStore,
        upload_policy: UploadPolicy,
    ) -> Self {
        let paths = PathNormalizer::new(executor.base_url());
        Self {
            executor,
            credentials,
            paths,
            upload_policy,
        }
    }

    /// Wire a client from a validated configuration
    pub fn from_config(config: &AdminConfig) -> Self {
        let executor = RequestExecutor::new(config.http_client.clone(), &config.api_base_url)
            .with_timeout(config.request_timeout);
        let credentials =
            CredentialStore::new(config.secure_store.clone(), &config.token_storage_key);
        Self::new(executor, credentials, config.upload_policy.clone())
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Limits forms must enforce before submitting a file
    pub fn upload_policy(&self) -> &UploadPolicy {
        &self.upload_policy
    }

    /// Display URL for a stored image path
    pub fn image_url(&self, stored_path: &str) -> String {
        self.paths.normalize(stored_path)
    }

    /// Display URL for a record's image, if it has one
    pub fn record_image_url<R: Resource>(&self, record: &R) -> Option<String> {
        record.image_path().map(|path| self.image_url(path))
    }

    pub async fn is_authenticated(&self) -> bool {
        self.credentials.is_authenticated().await
    }

    /// Forget the session token
    pub async fn logout(&self) {
        self.credentials.clear().await;
    }

    pub async fn list<R: Resource>(&self, scope: &CancellationScope) -> Outcome<Vec<R>> {
        let spec = RequestSpec::new(HttpMethod::Get, R::descriptor().collection_path());
        self.perform(R::KIND, Ok(spec), scope, |response| {
            decode_list(&response.body)
        })
        .await
    }

    pub async fn get<R: Resource>(&self, id: u64, scope: &CancellationScope) -> Outcome<R> {
        let spec = RequestSpec::new(HttpMethod::Get, R::descriptor().item_path(id));
        self.perform(R::KIND, Ok(spec), scope, |response| {
            decode_record(&response.body)
        })
        .await
    }

    pub async fn create<R: Resource>(
        &self,
        fields: &R::Fields,
        scope: &CancellationScope,
    ) -> Outcome<R> {
        let descriptor = R::descriptor();
        let spec = encode_fields(descriptor, fields).map(|body| {
            RequestSpec::new(HttpMethod::Post, descriptor.collection_path()).with_body(body)
        });
        self.perform(R::KIND, spec, scope, |response| {
            decode_record(&response.body)
        })
        .await
    }

    pub async fn update<R: Resource>(
        &self,
        id: u64,
        fields: &R::Fields,
        scope: &CancellationScope,
    ) -> Outcome<R> {
        let descriptor = R::descriptor();
        let spec = encode_fields(descriptor, fields).map(|body| {
            RequestSpec::new(HttpMethod::Put, descriptor.item_path(id)).with_body(body)
        });
        self.perform(R::KIND, spec, scope, |response| {
            decode_record(&response.body)
        })
        .await
    }

    pub async fn delete<R: Resource>(&self, id: u64, scope: &CancellationScope) -> Outcome<()> {
        let spec = RequestSpec::new(HttpMethod::Delete, R::descriptor().item_path(id));
        self.perform(R::KIND, Ok(spec), scope, |_| Ok(())).await
    }

    /// Shared flow behind every operation.
    ///
    /// `spec` is `Err` when the fields could not be encoded; that is reported
    /// only after the token check so a signed-out user is still redirected.
    async fn perform<T, D>(
        &self,
        kind: ResourceKind,
        spec: Result<RequestSpec, String>,
        scope: &CancellationScope,
        decode: D,
    ) -> Outcome<T>
    where
        D: FnOnce(&HttpResponse) -> Result<T, DecodeError>,
    {
        let method = match &spec {
            Ok(spec) => spec.method.as_str(),
            Err(_) => "ENCODE",
        };
        let span = info_span!(
            "content_request",
            resource = %kind,
            method,
            request_id = %Uuid::new_v4()
        );

        async move {
            let Some(token) = self.credentials.get().await else {
                debug!("No session token, skipping request");
                return Outcome::Unauthenticated;
            };

            let spec = match spec {
                Ok(spec) => spec,
                Err(message) => {
                    warn!(error = %message, "Could not encode request fields");
                    return Outcome::Failure(Failure::new(ErrorKind::Unknown, message));
                }
            };

            match self.executor.execute(spec, Some(&token), scope).await {
                Ok(response) => match decode(&response) {
                    Ok(value) => {
                        debug!(status = response.status, "Request succeeded");
                        Outcome::Success(value)
                    }
                    Err(e) => {
                        warn!(
                            status = response.status,
                            error = %e.message(),
                            "Response did not match the expected record shape"
                        );
                        Outcome::Failure(
                            Failure::new(ErrorKind::Unknown, e.message())
                                .with_status(response.status),
                        )
                    }
                },
                Err(RequestFailure::Cancelled) => {
                    debug!("Request cancelled, dropping result");
                    Outcome::Cancelled
                }
                Err(failure) => self.fail(failure).await,
            }
        }
        .instrument(span)
        .await
    }

    async fn fail<T>(&self, failure: RequestFailure) -> Outcome<T> {
        let failure = to_failure(&failure);

        if failure.kind == ErrorKind::Unauthorized {
            info!("Session token rejected by the backend, clearing it");
            self.credentials.clear().await;
        }

        warn!(
            kind = %failure.kind,
            status = ?failure.status,
            message = %failure.message,
            "Request failed"
        );
        Outcome::Failure(failure)
    }
}
