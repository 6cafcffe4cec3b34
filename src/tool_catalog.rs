//! Registry of tool names exposed by the GitHub MCP server.

use std::collections::BTreeSet;

/// Tools that cannot mutate remote state and are safe to auto-approve.
const READ_ONLY_TOOLS: &[&str] = &[
    "search_repositories",
    "search_code",
    "search_issues",
    "search_commits",
    "get_file_contents",
    "get_issue",
    "list_issues",
    "list_issue_comments",
    "get_pull_request",
    "get_pull_request_diff",
    "get_commit",
    "list_commits",
    "compare_commits",
    "get_commit_status",
    "list_commit_comments",
    "list_branches",
    "get_branch",
    // GitHub Actions
    "list_workflows",
    "get_workflow",
    "list_workflow_runs",
    "get_workflow_run",
    "download_workflow_run_logs",
    "list_workflow_jobs",
    "get_workflow_job",
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolCatalog {
    read_only: BTreeSet<String>,
}

impl ToolCatalog {
    pub fn new<I, S>(read_only: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { read_only: read_only.into_iter().map(Into::into).collect() }
    }

    /// The catalog shipped with the server.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(READ_ONLY_TOOLS.iter().copied())
    }

    #[must_use]
    pub const fn read_only(&self) -> &BTreeSet<String> {
        &self.read_only
    }

    #[must_use]
    pub fn is_read_only(&self, tool: &str) -> bool {
        self.read_only.contains(tool)
    }
}
