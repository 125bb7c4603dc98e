//! The provisioning run: a fixed sequence of blocks, three of which are
//! toggled by command-line flags.

use std::path::{Path, PathBuf};

use tracing::{info, info_span};
use vmsetup_config::{PythonVersion, Settings};
use vmsetup_core::error::Result;
use vmsetup_core::user::UserIdentity;
use vmsetup_core::Executor;

use crate::provisioner::Provisioner;
use crate::repo::Repo;

const APT_KEYRINGS_DIR: &str = "/etc/apt/keyrings";
const VIRTUALENV_PYZ: &str = "/tmp/virtualenv.pyz";
const VIRTUALENV_URL: &str = "https://bootstrap.pypa.io/virtualenv.pyz";
const SYSTEM_VIRTUALENV: &str = "/bin/virtualenv";
const DEADSNAKES_PPA: &str = "ppa:deadsnakes/ppa";

/// Toolchains YouCompleteMe's `install.py --all` builds completers for.
const YCM_PACKAGES: &[&str] = &[
    "cmake",
    "mono-complete",
    "golang",
    "nodejs",
    "openjdk-17-jdk",
    "openjdk-17-jre",
    "npm",
];

const BUILD_PACKAGES: &[&str] = &["perl", "make", "gcc", "bzip2", "curl", "build-essential"];

/// Flags gating the optional blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    /// Remove artifacts of a previous run before starting.
    pub clean_up: bool,
    /// Remove the vim and virtualenv installs right after creating them.
    pub testing: bool,
    /// Run the guest-additions installer at the end.
    pub install_guest_edition: bool,
}

/// Paths below the provisioned user's home directory.
#[derive(Debug, Clone)]
struct HomeLayout {
    home: PathBuf,
    vimrc_install: PathBuf,
    vimrc: PathBuf,
    vim_dir: PathBuf,
    bundle_dir: PathBuf,
    ycm_dir: PathBuf,
    vundle_dir: PathBuf,
    opt_dir: PathBuf,
    venv_dir: PathBuf,
}

impl HomeLayout {
    fn new(user: &UserIdentity) -> Self {
        Self {
            home: user.home().to_path_buf(),
            vimrc_install: user.home_path(".vimrc_cl_install"),
            vimrc: user.home_path(".vimrc"),
            vim_dir: user.home_path(".vim"),
            bundle_dir: user.home_path(".vim/bundle"),
            ycm_dir: user.home_path(".vim/bundle/YouCompleteMe"),
            vundle_dir: user.home_path(".vim/bundle/Vundle.vim"),
            opt_dir: user.home_path("opt"),
            venv_dir: user.home_path("opt/venv"),
        }
    }
}

fn path_str(path: &Path) -> String {
    path.display().to_string()
}

/// Everything a run needs, resolved up front.
#[derive(Debug, Clone)]
pub struct Provisioning {
    user: UserIdentity,
    settings: Settings,
    versions: Vec<PythonVersion>,
    flags: Flags,
    layout: HomeLayout,
}

impl Provisioning {
    pub fn new(
        user: UserIdentity,
        settings: Settings,
        versions: Vec<PythonVersion>,
        flags: Flags,
    ) -> Self {
        let layout = HomeLayout::new(&user);
        Self {
            user,
            settings,
            versions,
            flags,
            layout,
        }
    }

    pub fn user(&self) -> &UserIdentity {
        &self.user
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Run every block in order.
    pub fn run<E: Executor>(&self, p: &mut Provisioner<E>) -> Result<()> {
        let _span = info_span!("provision", user = %self.user.name()).entered();

        if self.flags.clean_up {
            self.block("clean_up", p, Self::clean_up)?;
        }
        self.block("update_system", p, Self::update_system)?;
        self.block("configure_git", p, Self::configure_git)?;
        self.block("setup_vim", p, Self::setup_vim)?;
        self.block("install_build_essentials", p, Self::install_build_essentials)?;
        self.block("setup_virtualenv", p, Self::setup_virtualenv)?;
        self.block("install_python_versions", p, Self::install_python_versions)?;
        if self.flags.install_guest_edition {
            self.block("install_guest_additions", p, Self::install_guest_additions)?;
        }
        Ok(())
    }

    fn block<E: Executor>(
        &self,
        name: &'static str,
        p: &mut Provisioner<E>,
        body: fn(&Self, &mut Provisioner<E>) -> Result<()>,
    ) -> Result<()> {
        let _span = info_span!("block", block = name).entered();
        info!("starting");
        body(self, p)?;
        info!("finished");
        Ok(())
    }

    fn clean_up<E: Executor>(&self, p: &mut Provisioner<E>) -> Result<()> {
        let l = &self.layout;
        p.delete_file(&l.vimrc_install)?;
        p.delete_file(&l.vimrc)?;
        p.delete_directory(&l.opt_dir)?;
        p.delete_file(VIRTUALENV_PYZ)?;
        p.execute(&["sudo", "rm", SYSTEM_VIRTUALENV], None)?;
        p.execute(&["sudo", "rm", "-rf", path_str(&l.vim_dir).as_str()], None)
    }

    fn update_system<E: Executor>(&self, p: &mut Provisioner<E>) -> Result<()> {
        p.execute(&["sudo", "apt", "upgrade", "-y"], None)?;
        p.execute(&["sudo", "apt", "update", "-y"], None)
    }

    fn configure_git<E: Executor>(&self, p: &mut Provisioner<E>) -> Result<()> {
        let git = &self.settings.git;
        p.execute(&["git", "config", "--global", "user.name", git.name.as_str()], None)?;
        p.execute(&["git", "config", "--global", "user.email", git.email.as_str()], None)
    }

    fn setup_vim<E: Executor>(&self, p: &mut Provisioner<E>) -> Result<()> {
        let l = &self.layout;
        let dotfiles = &self.settings.dotfiles;
        let checkout = PathBuf::from(&dotfiles.repo);

        p.apt_install("vim")?;
        p.clone_repo(&Repo::new(&dotfiles.owner, &dotfiles.repo))?;
        p.move_file(checkout.join(".vimrc_cl_install"), &l.home)?;

        // YouCompleteMe
        p.execute(&["mkdir", "-p", APT_KEYRINGS_DIR], None)?;
        for package in YCM_PACKAGES {
            p.apt_install(package)?;
        }
        p.execute(&["sudo", "mkdir", "-p", path_str(&l.bundle_dir).as_str()], None)?;
        p.execute(&["sudo", "chmod", "777", path_str(&l.vim_dir).as_str()], None)?;
        p.execute(&["sudo", "chmod", "777", path_str(&l.bundle_dir).as_str()], None)?;
        p.clone_repo(&Repo::new("ycm-core", "YouCompleteMe").with_destination(&l.ycm_dir))?;
        p.execute(
            &["git", "submodule", "update", "--init", "--recursive"],
            Some(l.ycm_dir.as_path()),
        )?;
        p.apt_install("python3-dev")?;
        p.run_python(&["install.py", "--all"], Some(l.ycm_dir.as_path()))?;

        // Vundle, first with the minimal install vimrc, then the real one.
        p.clone_repo(&Repo::new("VundleVim", "Vundle.vim").with_destination(&l.vundle_dir))?;
        p.execute(
            &["vim", "-u", path_str(&l.vimrc_install).as_str(), "+PluginInstall", "+qall"],
            None,
        )?;
        p.move_file(checkout.join(".vimrc"), &l.home)?;
        p.execute(&["vim", path_str(&l.vimrc).as_str(), "+PluginInstall", "+qall"], None)?;
        p.delete_directory(&checkout)?;

        if self.flags.testing {
            p.execute(&["sudo", "rm", "-rf", path_str(&l.vim_dir).as_str()], None)?;
            p.delete_file(&l.vimrc)?;
        }
        Ok(())
    }

    fn install_build_essentials<E: Executor>(&self, p: &mut Provisioner<E>) -> Result<()> {
        for package in BUILD_PACKAGES {
            p.apt_install(package)?;
        }
        Ok(())
    }

    fn setup_virtualenv<E: Executor>(&self, p: &mut Provisioner<E>) -> Result<()> {
        let l = &self.layout;
        let venv = path_str(&l.venv_dir);

        p.execute(
            &["curl", "--location", "--output", VIRTUALENV_PYZ, VIRTUALENV_URL],
            None,
        )?;
        p.run_python(&[VIRTUALENV_PYZ, venv.as_str()], None)?;
        p.execute(&[path_str(&l.venv_dir.join("bin/pip")).as_str(), "install", "virtualenv"], None)?;
        p.execute(
            &[
                "sudo",
                "ln",
                "-s",
                path_str(&l.venv_dir.join("bin/virtualenv")).as_str(),
                SYSTEM_VIRTUALENV,
            ],
            None,
        )?;

        if self.flags.testing {
            p.delete_directory(&l.opt_dir)?;
            p.delete_file(VIRTUALENV_PYZ)?;
            p.execute(&["sudo", "rm", SYSTEM_VIRTUALENV], None)?;
        }
        Ok(())
    }

    fn install_python_versions<E: Executor>(&self, p: &mut Provisioner<E>) -> Result<()> {
        p.apt_install("software-properties-common")?;
        p.execute(&["sudo", "add-apt-repository", DEADSNAKES_PPA, "-y"], None)?;
        for version in &self.versions {
            p.apt_install(&version.package_name())?;
        }
        Ok(())
    }

    fn install_guest_additions<E: Executor>(&self, p: &mut Provisioner<E>) -> Result<()> {
        p.bash(&path_str(&self.guest_additions_script()))
    }

    /// `/media/<user>/<media_dir>/autorun.sh`
    pub fn guest_additions_script(&self) -> PathBuf {
        Path::new("/media")
            .join(self.user.name())
            .join(&self.settings.guest_additions.media_dir)
            .join("autorun.sh")
    }
}
