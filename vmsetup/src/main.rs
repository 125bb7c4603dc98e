use std::env;

use clap::Parser;
use tracing::info;
use vmsetup::cli::Args;
use vmsetup::{preflight, FailedStep, FailurePolicy, Provisioner, Provisioning};
use vmsetup_config::{load_python_versions, Settings};
use vmsetup_core::error::{Result, VmSetupError};
use vmsetup_core::{
    vm_error, vm_error_hint, vm_error_with_details, vm_info, vm_success, vm_warning,
    DryRunExecutor, Executor, SystemExecutor,
};
use vmsetup_messages::{msg, MESSAGES};

fn main() {
    let args = Args::parse();
    let _log_guard = vmsetup_logging::init_subscriber();

    if let Err(e) = run(args) {
        vm_error!("{:#}", e);
        if matches!(e, VmSetupError::CommandFailed { .. }) {
            vm_error_hint!("{}", MESSAGES.strict_hint);
        }
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let cwd = env::current_dir()?;
    let settings = Settings::load(args.config.as_deref(), &cwd)?;

    let user = args.resolve_user(&settings)?;

    // Read before any step runs so a bad file leaves the machine untouched.
    let versions = load_python_versions(&args.versions_file)?;
    vm_info!(
        "{}",
        msg!(
            MESSAGES.versions_loaded,
            count = versions.len().to_string(),
            path = args.versions_file.display().to_string()
        )
    );

    let provisioning = Provisioning::new(user, settings, versions, args.flags());
    vm_info!(
        "{}",
        msg!(
            MESSAGES.provision_header,
            user = provisioning.user().name(),
            home = provisioning.user().home().display().to_string()
        )
    );
    info!(flags = ?provisioning.flags(), strict = args.strict, dry_run = args.dry_run, "starting provisioning");

    let failures = if args.dry_run {
        vm_info!("{}", MESSAGES.dry_run_header);
        drive(&provisioning, DryRunExecutor::new(), FailurePolicy::Continue)?
    } else {
        let missing = preflight::check();
        if !missing.is_empty() {
            vm_warning!("{}", msg!(MESSAGES.missing_tools, tools = missing.join(", ")));
        }
        drive(&provisioning, SystemExecutor::new(), args.failure_policy())?
    };

    report(&failures);
    Ok(())
}

fn drive<E: Executor>(
    provisioning: &Provisioning,
    executor: E,
    policy: FailurePolicy,
) -> Result<Vec<FailedStep>> {
    let mut provisioner = Provisioner::new(executor, policy);
    provisioning.run(&mut provisioner)?;
    let (_, failures) = provisioner.into_parts();
    Ok(failures)
}

fn report(failures: &[FailedStep]) {
    if failures.is_empty() {
        vm_success!("{}", MESSAGES.provision_complete);
        return;
    }

    let details: Vec<String> = failures
        .iter()
        .map(|failure| {
            let code = failure
                .code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            msg!(MESSAGES.provision_failed_step, command = failure.command.as_str(), code = code)
        })
        .collect();
    vm_error_with_details!(
        msg!(
            MESSAGES.provision_complete_with_failures,
            count = failures.len().to_string()
        ),
        &details
    );
}
