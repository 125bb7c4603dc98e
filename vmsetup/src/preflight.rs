//! Check that the tools the run relies on before installing anything are on PATH.

use vmsetup_core::command_stream::is_tool_installed;

/// Tools invoked before any step could have installed them.
pub const REQUIRED_TOOLS: &[&str] = &["sudo", "apt", "git", "python3", "bash"];

/// Names from `tools` that `is_installed` does not find, in input order.
pub fn missing_tools<'a, F>(tools: &[&'a str], is_installed: F) -> Vec<&'a str>
where
    F: Fn(&str) -> bool,
{
    tools
        .iter()
        .copied()
        .filter(|tool| !is_installed(*tool))
        .collect()
}

/// Missing required tools on this machine.
pub fn check() -> Vec<&'static str> {
    missing_tools(REQUIRED_TOOLS, is_tool_installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tools_preserves_order() {
        let missing = missing_tools(REQUIRED_TOOLS, |tool| tool == "bash" || tool == "sudo");
        assert_eq!(missing, vec!["apt", "git", "python3"]);
    }

    #[test]
    fn test_nothing_missing() {
        assert!(missing_tools(REQUIRED_TOOLS, |_| true).is_empty());
    }
}
