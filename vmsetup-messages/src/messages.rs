//! Central registry for all user-facing message templates.
//!
//! Naming Convention:
//! - `*_banner` - text centred inside the step banner
//! - everything else - status lines printed around a provisioning run
//!
//! Templates use `{variable}` syntax for runtime values, which are
//! substituted by the `MessageBuilder`.

pub struct Messages {
    // ============================================================================
    // Step Banners (alphabetically sorted)
    // ============================================================================
    pub apt_install_banner: &'static str,
    pub bash_banner: &'static str,
    pub clone_banner: &'static str,
    pub clone_to_banner: &'static str,
    pub delete_directory_banner: &'static str,
    pub delete_file_banner: &'static str,
    pub execute_banner: &'static str,
    pub move_banner: &'static str,
    pub python_banner: &'static str,

    // ============================================================================
    // Run Status (alphabetically sorted)
    // ============================================================================
    pub dry_run_header: &'static str,
    pub missing_tools: &'static str,
    pub provision_complete: &'static str,
    pub provision_complete_with_failures: &'static str,
    pub provision_failed_step: &'static str,
    pub provision_header: &'static str,
    pub strict_hint: &'static str,
    pub versions_loaded: &'static str,
}

pub const MESSAGES: Messages = Messages {
    // ============================================================================
    // Step Banners
    // ============================================================================
    apt_install_banner: "sudo apt install {package}",
    bash_banner: "bash {script}",
    clone_banner: "cloning repo {repo}",
    clone_to_banner: "cloning repo {repo} to {destination}",
    delete_directory_banner: "deleting directory='{path}'",
    delete_file_banner: "deleting file='{path}'",
    execute_banner: "execute cmd: {command}",
    move_banner: "moving from {from} to {to}",
    python_banner: "running python3 {command}",

    // ============================================================================
    // Run Status
    // ============================================================================
    dry_run_header: "Dry run: printing the provisioning plan, nothing will be executed",
    missing_tools: "Not found in PATH: {tools}. Steps using them will fail.",
    provision_complete: "Provisioning complete",
    provision_complete_with_failures: "Provisioning finished, {count} step(s) exited unsuccessfully:",
    provision_failed_step: "{command} (exit status {code})",
    provision_header: "Provisioning {user} ({home})",
    strict_hint: "Re-run without --strict to continue past failing commands",
    versions_loaded: "Loaded {count} Python version(s) from {path}",
};
