//! Vault HTTP client.

use futures::stream::{self, Stream, TryStreamExt};
use reqwest::{Client, Response};
use tracing::{debug, instrument};
use url::Url;

use crate::config::VaultConfig;
use crate::credential::Credential;
use crate::error::{VaultError, VaultResult};
use crate::types::{GetSecretResponse, SecretBundle, SecretListPage, SecretProperties};

/// Header carrying the vault token on every request.
const VAULT_TOKEN_HEADER: &str = "X-Vault-Token";

/// Shared, task-safe handle to the remote vault.
///
/// Constructed once at startup and shared via `Arc`; all operations take
/// `&self` and perform no mutation, so no synchronization is needed on top.
pub struct VaultClient {
    config: VaultConfig,
    http: Client,
    credential: Credential,
}

impl VaultClient {
    /// Create a new vault client.
    pub fn new(config: VaultConfig, credential: Credential) -> VaultResult<Self> {
        if config.addr.cannot_be_a_base() {
            return Err(VaultError::InvalidConfig(format!(
                "vault address {} cannot be a base URL",
                config.addr
            )));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(VaultError::Http)?;

        Ok(Self {
            config,
            http,
            credential,
        })
    }

    /// Fetch the current value of the named secret.
    ///
    /// The name is passed through as given; the vault decides whether it
    /// exists. A 404 surfaces as [`VaultError::SecretNotFound`].
    #[instrument(skip(self))]
    pub async fn get_secret(&self, name: &str) -> VaultResult<SecretBundle> {
        debug!(name, "fetching secret");

        let response = self
            .http
            .get(self.secret_url(name))
            .header(VAULT_TOKEN_HEADER, self.credential.token())
            .send()
            .await
            .map_err(|e| VaultError::unavailable(e.to_string()))?;

        let response = check_status(response, name).await?;
        let wire: GetSecretResponse = response.json().await?;
        Ok(SecretBundle::from(wire))
    }

    /// Lazily enumerate secret metadata, one page at a time.
    ///
    /// Pages are fetched only as the stream is polled, following the
    /// vault's `nextLink` continuation until exhausted. Dropping the stream
    /// stops further vault calls. Items are yielded in the order the vault
    /// returns them.
    pub fn list_secrets(&self) -> impl Stream<Item = VaultResult<SecretProperties>> + Send + use<> {
        let http = self.http.clone();
        let credential = self.credential.clone();
        let first = self.list_url().to_string();

        stream::try_unfold(Some(first), move |next| {
            let http = http.clone();
            let credential = credential.clone();
            async move {
                let Some(url) = next else { return Ok::<_, VaultError>(None) };
                let page = fetch_page(&http, &credential, &url).await?;
                Ok(Some((page.items, page.next_link)))
            }
        })
        .map_ok(|items| stream::iter(items.into_iter().map(Ok::<SecretProperties, VaultError>)))
        .try_flatten()
    }

    fn list_url(&self) -> Url {
        let mut url = self.secrets_url();
        url.set_query(Some(&format!("limit={}", self.config.page_size)));
        url
    }

    fn secrets_url(&self) -> Url {
        let mut url = self.config.addr.clone();
        // cannot_be_a_base is rejected in new(), so segments are available
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("secrets");
        }
        url
    }

    fn secret_url(&self, name: &str) -> Url {
        let mut url = self.secrets_url();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(name);
        }
        url
    }
}

async fn fetch_page(http: &Client, credential: &Credential, url: &str) -> VaultResult<SecretListPage> {
    debug!(url, "fetching secret list page");

    let response = http
        .get(url)
        .header(VAULT_TOKEN_HEADER, credential.token())
        .send()
        .await
        .map_err(|e| VaultError::unavailable(e.to_string()))?;

    let response = check_status(response, url).await?;
    response.json().await.map_err(VaultError::from)
}

/// Maps non-success statuses onto the error taxonomy.
async fn check_status(response: Response, subject: &str) -> VaultResult<Response> {
    let status = response.status();
    match status.as_u16() {
        401 => Err(VaultError::auth_failed(format!(
            "vault rejected the token for {subject}"
        ))),
        403 => Err(VaultError::PermissionDenied(subject.to_string())),
        404 => Err(VaultError::not_found(subject)),
        429 => Err(VaultError::RateLimited),
        _ if !status.is_success() => {
            let text = response.text().await.unwrap_or_default();
            Err(VaultError::unavailable(format!("status {status}: {text}")))
        }
        _ => Ok(response),
    }
}
