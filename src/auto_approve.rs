use crate::tool_catalog::ToolCatalog;
use std::collections::BTreeSet;
use tracing::debug;

/// Token that expands to every read-only tool in the catalog.
pub const ALLOW_READ_ONLY: &str = "allow-read-only";

/// Expands a comma-separated auto-approve list into a set of tool names.
///
/// Names other than [`ALLOW_READ_ONLY`] are passed through as given, so tools the
/// catalog does not know about yet can still be approved.
#[must_use]
pub fn resolve_auto_approve(list: &str, catalog: &ToolCatalog) -> BTreeSet<String> {
    let mut tools = BTreeSet::new();

    for token in list.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if token == ALLOW_READ_ONLY {
            debug!("Expanding {} to {} read-only tool(s)", ALLOW_READ_ONLY, catalog.read_only().len());
            tools.extend(catalog.read_only().iter().cloned());
        } else {
            tools.insert(token.to_string());
        }
    }

    tools
}
