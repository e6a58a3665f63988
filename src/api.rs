// GitHub API client: a small blocking HTTP client for the three REST calls
// the keepalive run needs (list repositories, list workflows, enable a
// workflow). Every failure status is turned into `Error::Api` with a
// readable message built from GitHub's `message` field.

use crate::error::{Error, Result};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Url;
use serde::Deserialize;

/// Public GitHub API endpoint, used unless `GITHUB_API_URL` says otherwise.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const ACCEPT_V3: &str = "application/vnd.github.v3+json";
const ACCEPT_GITHUB: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("workflow-keepalive/", env!("CARGO_PKG_VERSION"));

/// Blocking GitHub client. Holds the reqwest client, the API base URL and
/// the access token used as bearer credential.
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

/// Repository entry from `GET /users/{owner}/repos`. Only the name matters.
#[derive(Deserialize, Debug)]
pub struct Repository {
    pub name: String,
}

/// Workflow entry from `GET /repos/{owner}/{repo}/actions/workflows`.
#[derive(Deserialize, Debug)]
pub struct Workflow {
    pub path: String,
}

impl Workflow {
    /// File name of the workflow definition, e.g. `ci.yml` for
    /// `.github/workflows/ci.yml`.
    pub fn filename(&self) -> &str {
        let path = self.path.trim_end_matches('/');
        path.rsplit('/').next().unwrap_or(path)
    }
}

#[derive(Deserialize)]
struct WorkflowList {
    workflows: Vec<Workflow>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl GithubClient {
    /// Create a client for the given API base URL. The URL may carry a path
    /// prefix (GitHub Enterprise uses `https://host/api/v3`).
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid API base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "API base URL '{base_url}' must be an absolute http(s) URL"
            )));
        }
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(GithubClient {
            client,
            base_url,
            token: None,
        })
    }

    /// Create a client configured from the environment variable
    /// `GITHUB_API_URL` or fall back to the public API.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        Self::new(&base_url)
    }

    /// Store the access token used for every subsequent request.
    pub fn set_token(&mut self, token: &str) {
        self.token = Some(token.trim().to_string());
    }

    /// Builder form of `set_token`.
    pub fn with_token(mut self, token: &str) -> Self {
        self.set_token(token);
        self
    }

    /// True once a non-blank token has been set.
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// API base URL every request path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Names of all repositories owned by `owner`, in the order GitHub
    /// returns them. Only the first page is read.
    pub fn list_repositories(&self, owner: &str) -> Result<Vec<String>> {
        let url = self.url(&["users", owner, "repos"])?;
        let res = self
            .client
            .get(url)
            .headers(self.headers(ACCEPT_V3)?)
            .send()?;
        if !res.status().is_success() {
            return Err(api_error(
                format!("ERROR reading repositories for user {owner}"),
                res,
            ));
        }

        let repositories: Vec<Repository> = res.json()?;
        let names: Vec<String> = repositories.into_iter().map(|r| r.name).collect();
        tracing::debug!("found {} repositories for user {owner}", names.len());
        Ok(names)
    }

    /// Workflow file names (not paths) defined in `owner/repository`.
    pub fn list_workflows(&self, owner: &str, repository: &str) -> Result<Vec<String>> {
        let url = self.url(&["repos", owner, repository, "actions", "workflows"])?;
        let res = self
            .client
            .get(url)
            .headers(self.headers(ACCEPT_V3)?)
            .send()?;
        if !res.status().is_success() {
            return Err(api_error(
                format!("ERROR reading workflows for user {owner}, repository {repository}"),
                res,
            ));
        }

        let list: WorkflowList = res.json()?;
        let filenames: Vec<String> = list
            .workflows
            .iter()
            .map(|w| w.filename().to_string())
            .collect();
        tracing::debug!(
            "found {} workflows for user {owner}, repository {repository}",
            filenames.len()
        );
        Ok(filenames)
    }

    /// Enable one workflow. `workflow_filename` is sent as a single,
    /// percent-encoded path segment. Returns a short confirmation line.
    pub fn enable_workflow(
        &self,
        owner: &str,
        repository: &str,
        workflow_filename: &str,
    ) -> Result<String> {
        let url = self.url(&[
            "repos",
            owner,
            repository,
            "actions",
            "workflows",
            workflow_filename,
            "enable",
        ])?;
        let mut headers = self.headers(ACCEPT_GITHUB)?;
        headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));

        let res = self.client.put(url).headers(headers).send()?;
        if !res.status().is_success() {
            return Err(api_error(
                format!(
                    "ERROR enabling repository {repository}, workflow {workflow_filename}"
                ),
                res,
            ));
        }

        let result = format!("enabled repository {repository}, workflow {workflow_filename}");
        tracing::debug!("{result}");
        Ok(result)
    }

    /// Base URL with `segments` appended, each one percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| Error::Config("API base URL cannot carry a path".into()))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    /// Authorization plus the given Accept header.
    fn headers(&self, accept: &'static str) -> Result<HeaderMap> {
        let token = self
            .token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Config("no GitHub access token set".into()))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| Error::Config("access token contains invalid characters".into()))?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static(accept));
        Ok(headers)
    }
}

/// Build and log the `Error::Api` for a failed response. The caller reports
/// the returned error, so the log line stays at debug level.
fn api_error(context: String, res: Response) -> Error {
    let status = res.status();
    let message = format!("{context}: {}", error_message(res));
    tracing::debug!(%status, "{message}");
    Error::Api(message)
}

/// GitHub's `message` field from an error body, or `Error` when the body is
/// not JSON or carries no message.
fn error_message(res: Response) -> String {
    res.text()
        .ok()
        .and_then(|body| serde_json::from_str::<ApiErrorBody>(&body).ok())
        .and_then(|body| body.message)
        .unwrap_or_else(|| "Error".into())
}
