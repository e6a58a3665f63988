// Keepalive run: walk every repository of an owner and enable each of its
// workflows, one call at a time. The first failure stops the run.

use crate::api::GithubClient;
use crate::error::Result;

/// The three GitHub operations a keepalive run is built from. Implemented by
/// `GithubClient`; tests substitute a recording fake.
pub trait WorkflowApi {
    fn list_repositories(&self, owner: &str) -> Result<Vec<String>>;
    fn list_workflows(&self, owner: &str, repository: &str) -> Result<Vec<String>>;
    fn enable_workflow(&self, owner: &str, repository: &str, workflow: &str) -> Result<String>;
}

impl WorkflowApi for GithubClient {
    fn list_repositories(&self, owner: &str) -> Result<Vec<String>> {
        GithubClient::list_repositories(self, owner)
    }

    fn list_workflows(&self, owner: &str, repository: &str) -> Result<Vec<String>> {
        GithubClient::list_workflows(self, owner, repository)
    }

    fn enable_workflow(&self, owner: &str, repository: &str, workflow: &str) -> Result<String> {
        GithubClient::enable_workflow(self, owner, repository, workflow)
    }
}

/// One successfully enabled workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnabledWorkflow {
    pub repository: String,
    pub workflow: String,
}

/// Outcome of a complete run.
#[derive(Debug, Clone, Default)]
pub struct KeepaliveReport {
    pub owner: String,
    /// Number of repositories whose workflows were listed.
    pub repositories: usize,
    /// Enabled workflows, in call order.
    pub enabled: Vec<EnabledWorkflow>,
}

impl KeepaliveReport {
    /// One-line description of the run, printed by the UI.
    pub fn summary(&self) -> String {
        format!(
            "enabled {} workflows in {} repositories for user {}",
            self.enabled.len(),
            self.repositories,
            self.owner
        )
    }
}

/// Enable every workflow in every repository of `owner`.
///
/// `on_enabled` is called after each successful enable call, which lets the
/// UI drive a progress indicator. Any error aborts the run and is returned
/// as-is; workflows enabled before the failure stay enabled.
pub fn enable_all_workflows<A, F>(
    api: &A,
    owner: &str,
    mut on_enabled: F,
) -> Result<KeepaliveReport>
where
    A: WorkflowApi + ?Sized,
    F: FnMut(&EnabledWorkflow),
{
    let mut report = KeepaliveReport {
        owner: owner.to_string(),
        ..Default::default()
    };

    for repository in api.list_repositories(owner)? {
        let workflows = api.list_workflows(owner, &repository)?;
        report.repositories += 1;
        for workflow in workflows {
            let result = api.enable_workflow(owner, &repository, &workflow)?;
            tracing::debug!(%result, "workflow enabled");
            let enabled = EnabledWorkflow {
                repository: repository.clone(),
                workflow,
            };
            on_enabled(&enabled);
            report.enabled.push(enabled);
        }
    }

    tracing::debug!("{}", report.summary());
    Ok(report)
}
