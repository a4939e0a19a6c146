//! The authenticated HTTP client.
//!
//! Every call goes through the same sequence:
//!
//! ```text
//! authorize -> send -> 401? -> refresh (shared) -> authorize -> send -> caller
//! ```
//!
//! Only a first 401 is recovered here. Transport errors and every other
//! status go straight back to the caller, and a request that is still
//! unauthorized after its one retry fails terminally.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::context::{ExchangeState, RequestContext};
use super::refresh::RefreshCoordinator;
use super::session::SessionManager;
use super::token_store::TokenStore;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult, AuthError, RefreshError};
use crate::traits::{CredentialStore, HttpClient, HttpRequest, Response};

const CONTENT_TYPE: &str = "Content-Type";

struct ClientInner {
    http: Arc<dyn HttpClient>,
    tokens: Arc<TokenStore>,
    config: ClientConfig,
    refresher: RefreshCoordinator,
    session: SessionManager,
}

/// HTTP client that attaches the stored bearer token to every request and
/// renews it once when the server rejects it.
///
/// Cheap to clone; clones share the token store and the in-flight refresh.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use eventmap::adapters::{FileCredentialStore, ReqwestHttpClient};
/// use eventmap::auth::AuthenticatedClient;
/// use eventmap::config::ClientConfig;
///
/// let client = AuthenticatedClient::new(
///     ClientConfig::default(),
///     Arc::new(ReqwestHttpClient::new()),
///     Arc::new(FileCredentialStore::new()?),
/// );
/// let response = client.get("/events/").await?;
/// ```
#[derive(Clone)]
pub struct AuthenticatedClient {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for AuthenticatedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedClient")
            .field("base_url", &self.inner.config.base_url)
            .field("refresher", &self.inner.refresher)
            .finish_non_exhaustive()
    }
}

impl AuthenticatedClient {
    pub fn new(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        let tokens = Arc::new(TokenStore::new(credentials));
        let refresher =
            RefreshCoordinator::new(Arc::clone(&http), Arc::clone(&tokens), config.refresh_url());
        let session =
            SessionManager::new(Arc::clone(&http), Arc::clone(&tokens), config.login_url());

        Self {
            inner: Arc::new(ClientInner {
                http,
                tokens,
                config,
                refresher,
                session,
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Login/logout entry points sharing this client's token store.
    pub fn session(&self) -> &SessionManager {
        &self.inner.session
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.inner.tokens
    }

    /// Number of refresh exchanges this client has started.
    pub fn refreshes_started(&self) -> u64 {
        self.inner.refresher.refreshes_started()
    }

    /// `GET {base_url}{path}`.
    pub async fn get(&self, path: &str) -> ApiResult<Response> {
        self.send(HttpRequest::get(self.inner.config.url(path))).await
    }

    /// `POST {base_url}{path}` with a JSON body.
    pub async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> ApiResult<Response> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.send(HttpRequest::post(self.inner.config.url(path), body))
            .await
    }

    /// Send a request through the authenticate/refresh/retry sequence.
    ///
    /// Any response that is not a 401 is returned as `Ok`, whatever its
    /// status.
    pub async fn send(&self, request: HttpRequest) -> ApiResult<Response> {
        let mut ctx = RequestContext::new(request);
        self.send_with_context(&mut ctx).await
    }

    /// Like [`send`](Self::send), leaving the final state and retry marker
    /// on `ctx` for inspection.
    pub async fn send_with_context(&self, ctx: &mut RequestContext) -> ApiResult<Response> {
        if !ctx.request().headers.contains_key(CONTENT_TYPE) {
            ctx.request_mut()
                .headers
                .insert(CONTENT_TYPE.to_string(), "application/json".to_string());
        }

        loop {
            let sent_token = self.authorize(ctx).await?;

            let response = self.inner.http.send(ctx.request()).await.map_err(|e| {
                debug!("Transport failure for {} {}: {}", ctx.request().method, ctx.request().url, e);
                ApiError::from(e)
            })?;

            if !response.is_unauthorized() {
                let next = if ctx.is_retried() {
                    ExchangeState::RetriedSucceeded
                } else {
                    ExchangeState::Succeeded
                };
                ctx.transition(next);
                return Ok(response);
            }

            if !ctx.mark_retried() {
                ctx.transition(ExchangeState::RetriedFailed);
                warn!(url = %ctx.request().url, "Still unauthorized after refresh");
                return Err(unauthorized(&response));
            }

            ctx.transition(ExchangeState::AuthFailedFirst);
            warn!(url = %ctx.request().url, "Unauthorized, attempting token refresh");

            let token = self.recover(ctx, sent_token.as_deref(), &response).await?;
            ctx.apply_refreshed_token(token);
        }
    }

    /// Request authenticator: put the current access token on the request,
    /// or send it unauthenticated when there is none.
    async fn authorize(&self, ctx: &mut RequestContext) -> ApiResult<Option<String>> {
        let token = match ctx.refreshed_token() {
            Some(token) => Some(token.to_string()),
            None => self.inner.tokens.access_token().await?,
        };

        match &token {
            Some(token) => {
                debug!("Attaching bearer token");
                ctx.request_mut().set_bearer(token);
            }
            None => {
                debug!("No access token stored, sending unauthenticated");
                ctx.request_mut().clear_authorization();
            }
        }

        Ok(token)
    }

    /// Obtain the token for the single retry.
    async fn recover(
        &self,
        ctx: &mut RequestContext,
        sent_token: Option<&str>,
        rejected: &Response,
    ) -> ApiResult<String> {
        ctx.transition(ExchangeState::Refreshing);

        match self.inner.refresher.refresh(sent_token).await {
            Ok(token) => Ok(token),
            Err(RefreshError::MissingRefreshToken) => {
                ctx.transition(ExchangeState::NoRefreshToken);
                Err(unauthorized(rejected))
            }
            Err(e) => {
                ctx.transition(ExchangeState::RefreshFailed);
                Err(e.into())
            }
        }
    }
}

fn unauthorized(response: &Response) -> ApiError {
    AuthError::Unauthorized {
        status: response.status,
        message: response.text_lossy(),
    }
    .into()
}
