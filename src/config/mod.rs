//! Deploy parameters for one ojdeploy invocation.
//!
//! [`Configuration`] is populated by the front end (config file and command
//! line), validated with [`Configuration::check_mutual_exclusives`] and then
//! handed to [`Deployer`](crate::deploy::Deployer) read-only.

pub mod flags;
pub mod toml_loader;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Watchdog and `-timeout` value in seconds applied by the front end when
/// neither the config file nor the command line sets one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30_000;

/// Generate a getter returning `Option<&Path>` and a chaining setter for
/// each path-valued field.
macro_rules! path_accessors {
    ($($(#[$doc:meta])* $field:ident / $setter:ident;)+) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $field(&self) -> Option<&Path> {
                self.$field.as_deref()
            }

            #[doc = concat!("Set `", stringify!($field), "`.")]
            pub fn $setter(&mut self, value: impl Into<PathBuf>) -> &mut Self {
                self.$field = Some(value.into());
                self
            }
        )+
    };
}

/// Same as [`path_accessors`] for optional boolean switches.
///
/// The getter returns the raw `Option<bool>`: an explicit `false` is still
/// "set" for the purposes of mutual exclusion.
macro_rules! flag_accessors {
    ($($(#[$doc:meta])* $field:ident / $setter:ident;)+) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub const fn $field(&self) -> Option<bool> {
                self.$field
            }

            #[doc = concat!("Set `", stringify!($field), "`.")]
            pub const fn $setter(&mut self, value: bool) -> &mut Self {
                self.$field = Some(value);
                self
            }
        )+
    };
}

/// Replace each listed field of `$target` with the one from `$source` when
/// the latter is present.
macro_rules! overlay_fields {
    ($target:ident, $source:ident; $($field:ident),+ $(,)?) => {
        $(
            if $source.$field.is_some() {
                $target.$field = $source.$field;
            }
        )+
    };
}

/// All parameters ojdeploy understands, plus run control (`dryRun`,
/// `logFile`).
///
/// Every parameter is optional; unset parameters contribute nothing to the
/// command line. Keys in TOML files use the camelCase parameter names
/// (`buildFile`, `updateWebxmlEJBRefs`, ...); unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Configuration {
    jdev_bin_path: Option<PathBuf>,
    workspace_file: Option<PathBuf>,
    build_file: Option<PathBuf>,
    build_file_schema: Option<bool>,
    profile: Option<String>,
    output_file: Option<PathBuf>,
    project: Option<String>,
    base_dir: Option<PathBuf>,
    nocompile: Option<bool>,
    nodependents: Option<bool>,
    clean: Option<bool>,
    nodatasources: Option<bool>,
    force_rewrite: Option<bool>,
    #[serde(rename = "updateWebxmlEJBRefs")]
    update_webxml_ejb_refs: Option<bool>,
    verbose: Option<bool>,
    defines: Option<Vec<String>>,
    status_log_file: Option<PathBuf>,
    timeout: Option<u64>,
    #[serde(default)]
    dry_run: bool,
    log_file: Option<PathBuf>,
}

impl Configuration {
    path_accessors! {
        /// Directory containing the ojdeploy binary. When unset the binary is
        /// looked up on `PATH`.
        jdev_bin_path / set_jdev_bin_path;
        /// JDeveloper workspace file (`.jws`).
        workspace_file / set_workspace_file;
        /// Build file for batch deploy. Exclusive with `buildFileSchema` and `profile`.
        build_file / set_build_file;
        /// Report file written by ojdeploy.
        output_file / set_output_file;
        /// Base directory the workspace path is relative to.
        base_dir / set_base_dir;
        /// Status summary file written by ojdeploy.
        status_log_file / set_status_log_file;
        /// Override for the build log location from the flag table.
        log_file / set_log_file;
    }

    flag_accessors! {
        /// Print the build file XML schema. Exclusive with `buildFile` and `profile`.
        build_file_schema / set_build_file_schema;
        /// Skip compilation of project or workspace.
        nocompile / set_nocompile;
        /// Do not deploy dependent profiles.
        nodependents / set_nodependents;
        /// Clean output directories before compiling.
        clean / set_clean;
        /// Do not include datasources from the IDE.
        nodatasources / set_nodatasources;
        /// Rewrite the output file even if it is unchanged.
        force_rewrite / set_force_rewrite;
        /// Update EJB references in `web.xml`.
        update_webxml_ejb_refs / set_update_webxml_ejb_refs;
        /// Make ojdeploy print more information.
        verbose / set_verbose;
    }

    /// Deployment profile name. Exclusive with `buildFile` and `buildFileSchema`.
    #[must_use]
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Set `profile`.
    pub fn set_profile(&mut self, value: impl Into<String>) -> &mut Self {
        self.profile = Some(value.into());
        self
    }

    /// Project inside the workspace that holds the profile.
    #[must_use]
    pub fn project(&self) -> Option<&str> {
        self.project.as_deref()
    }

    /// Set `project`.
    pub fn set_project(&mut self, value: impl Into<String>) -> &mut Self {
        self.project = Some(value.into());
        self
    }

    /// `key=value` definitions forwarded as a single `-define` argument.
    #[must_use]
    pub fn defines(&self) -> Option<&[String]> {
        self.defines.as_deref()
    }

    /// Set `defines`, preserving order.
    pub fn set_defines<I, S>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defines = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Seconds allowed per deployment task; also the watchdog for the whole run.
    #[must_use]
    pub const fn timeout(&self) -> Option<u64> {
        self.timeout
    }

    /// Set `timeout` in seconds.
    pub const fn set_timeout(&mut self, secs: u64) -> &mut Self {
        self.timeout = Some(secs);
        self
    }

    /// Report the command instead of running it.
    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Set `dryRun`.
    pub const fn set_dry_run(&mut self, value: bool) -> &mut Self {
        self.dry_run = value;
        self
    }

    /// Ensure at most one of `buildFile`, `buildFileSchema` and `profile` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MutuallyExclusive`] listing the parameters that
    /// were given together.
    pub fn check_mutual_exclusives(&self) -> Result<(), ConfigError> {
        let given: Vec<&'static str> = [
            ("buildFile", self.build_file.is_some()),
            ("buildFileSchema", self.build_file_schema.is_some()),
            ("profile", self.profile.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect();

        if given.len() > 1 {
            return Err(ConfigError::MutuallyExclusive(given));
        }
        Ok(())
    }

    /// Layer `overrides` on top of this configuration.
    ///
    /// Every parameter present in `overrides` replaces the current value;
    /// `dryRun` is enabled if either side enables it. `buildFile`,
    /// `buildFileSchema` and `profile` are replaced as a group: setting any
    /// of them in `overrides` clears all three here first.
    pub fn merge(&mut self, overrides: Self) {
        if overrides.build_file.is_some()
            || overrides.build_file_schema.is_some()
            || overrides.profile.is_some()
        {
            self.build_file = None;
            self.build_file_schema = None;
            self.profile = None;
        }
        overlay_fields!(
            self, overrides;
            jdev_bin_path,
            workspace_file,
            build_file,
            build_file_schema,
            profile,
            output_file,
            project,
            base_dir,
            nocompile,
            nodependents,
            clean,
            nodatasources,
            force_rewrite,
            update_webxml_ejb_refs,
            verbose,
            defines,
            status_log_file,
            timeout,
            log_file,
        );
        self.dry_run |= overrides.dry_run;
    }

    /// Resolve every relative path parameter against `base`.
    pub fn absolutize(&mut self, base: &Path) {
        for path in [
            &mut self.jdev_bin_path,
            &mut self.workspace_file,
            &mut self.build_file,
            &mut self.output_file,
            &mut self.base_dir,
            &mut self.status_log_file,
            &mut self.log_file,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() && !path.as_os_str().is_empty() {
                *path = base.join(&*path);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn default_has_nothing_set() {
        let c = Configuration::default();
        assert!(c.build_file().is_none());
        assert!(c.nocompile().is_none());
        assert!(c.defines().is_none());
        assert!(c.timeout().is_none());
        assert!(!c.dry_run());
    }

    #[test]
    fn setters_chain_and_getters_return_values() {
        let mut c = Configuration::default();
        c.set_build_file("/some/build.file")
            .set_project("some.jpr")
            .set_clean(true)
            .set_nodependents(false)
            .set_defines(["a=1", "b=2"])
            .set_timeout(300)
            .set_dry_run(true);

        assert_eq!(c.build_file(), Some(Path::new("/some/build.file")));
        assert_eq!(c.project(), Some("some.jpr"));
        assert_eq!(c.clean(), Some(true));
        assert_eq!(c.nodependents(), Some(false));
        assert_eq!(c.defines().unwrap(), ["a=1", "b=2"]);
        assert_eq!(c.timeout(), Some(300));
        assert!(c.dry_run());
    }

    #[test]
    fn single_exclusive_parameter_is_accepted() {
        assert!(Configuration::default().check_mutual_exclusives().is_ok());

        let mut c = Configuration::default();
        c.set_build_file("build.xml");
        assert!(c.check_mutual_exclusives().is_ok());

        let mut c = Configuration::default();
        c.set_build_file_schema(true);
        assert!(c.check_mutual_exclusives().is_ok());

        let mut c = Configuration::default();
        c.set_profile("webapp");
        assert!(c.check_mutual_exclusives().is_ok());
    }

    #[test]
    fn any_two_exclusive_parameters_are_rejected() {
        let mut c = Configuration::default();
        c.set_build_file("build.xml").set_profile("webapp");
        let err = c.check_mutual_exclusives().unwrap_err();
        assert!(
            matches!(err, ConfigError::MutuallyExclusive(ref names) if names == &["buildFile", "profile"])
        );

        let mut c = Configuration::default();
        c.set_build_file("build.xml").set_build_file_schema(true);
        assert!(c.check_mutual_exclusives().is_err());

        let mut c = Configuration::default();
        c.set_profile("webapp").set_build_file_schema(true);
        assert!(c.check_mutual_exclusives().is_err());
    }

    #[test]
    fn explicit_false_schema_still_counts_as_set() {
        let mut c = Configuration::default();
        c.set_profile("webapp").set_build_file_schema(false);
        assert!(c.check_mutual_exclusives().is_err());
    }

    #[test]
    fn all_three_exclusive_parameters_are_listed() {
        let mut c = Configuration::default();
        c.set_build_file("b")
            .set_build_file_schema(true)
            .set_profile("p");
        let err = c.check_mutual_exclusives().unwrap_err();
        assert!(err.to_string().contains("buildFile, buildFileSchema, profile"));
    }

    #[test]
    fn merge_prefers_overrides_and_keeps_the_rest() {
        let mut base = Configuration::default();
        base.set_project("from-file.jpr")
            .set_workspace_file("/ws.jws")
            .set_clean(true);

        let mut cli = Configuration::default();
        cli.set_project("from-cli.jpr").set_dry_run(true);

        base.merge(cli);
        assert_eq!(base.project(), Some("from-cli.jpr"));
        assert_eq!(base.workspace_file(), Some(Path::new("/ws.jws")));
        assert_eq!(base.clean(), Some(true));
        assert!(base.dry_run());
    }

    #[test]
    fn merge_replaces_exclusive_group_as_a_whole() {
        let mut base = Configuration::default();
        base.set_profile("webapp").set_project("p.jpr");

        let mut cli = Configuration::default();
        cli.set_build_file("/x/build.xml");

        base.merge(cli);
        assert_eq!(base.build_file(), Some(Path::new("/x/build.xml")));
        assert_eq!(base.profile(), None);
        assert_eq!(base.project(), Some("p.jpr"));
        assert!(base.check_mutual_exclusives().is_ok());
    }

    #[test]
    fn merge_keeps_exclusive_group_when_overrides_leave_it_unset() {
        let mut base = Configuration::default();
        base.set_build_file_schema(true);

        let mut cli = Configuration::default();
        cli.set_clean(true);

        base.merge(cli);
        assert_eq!(base.build_file_schema(), Some(true));
    }

    #[test]
    fn merge_does_not_clear_dry_run() {
        let mut base = Configuration::default();
        base.set_dry_run(true);
        base.merge(Configuration::default());
        assert!(base.dry_run());
    }

    #[test]
    fn absolutize_only_touches_relative_paths() {
        let base = std::env::temp_dir();
        let absolute = base.join("abs.jws");

        let mut c = Configuration::default();
        c.set_workspace_file(&absolute)
            .set_output_file("out.txt")
            .set_base_dir(".")
            .set_project("relative.jpr");
        c.absolutize(&base);

        assert_eq!(c.workspace_file(), Some(absolute.as_path()));
        assert_eq!(c.output_file(), Some(base.join("out.txt").as_path()));
        assert_eq!(c.base_dir(), Some(base.join(".").as_path()));
        assert_eq!(c.project(), Some("relative.jpr"), "strings are not paths");
    }

    #[test]
    fn deserializes_camel_case_keys() {
        let c: Configuration = toml::from_str(
            r#"
            buildFile = "/x/build.file"
            updateWebxmlEJBRefs = true
            forceRewrite = false
            defines = ["k1=v1", "k2=v2"]
            timeout = 300
            dryRun = true
            "#,
        )
        .expect("valid config");
        assert_eq!(c.build_file(), Some(Path::new("/x/build.file")));
        assert_eq!(c.update_webxml_ejb_refs(), Some(true));
        assert_eq!(c.force_rewrite(), Some(false));
        assert_eq!(c.defines().unwrap(), ["k1=v1", "k2=v2"]);
        assert_eq!(c.timeout(), Some(300));
        assert!(c.dry_run());
    }

    #[test]
    fn rejects_unknown_keys() {
        let result: Result<Configuration, _> = toml::from_str("buildfile = \"x\"\n");
        assert!(result.is_err());
    }
}
