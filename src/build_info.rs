//! Package version plus the git revision and build time stamped by `build.rs`.

/// Help trailer appended to `sysglance --help`.
pub const HELP_BUILD_METADATA: &str = concat!(
    "Build metadata:\n  revision: ",
    env!("SYSGLANCE_BUILD_GIT_HASH"),
    "\n  built: ",
    env!("SYSGLANCE_BUILD_TIMESTAMP")
);

/// Metadata baked into this binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub revision: &'static str,
    pub built_at: &'static str,
}

impl BuildInfo {
    pub const CURRENT: BuildInfo = BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        revision: env!("SYSGLANCE_BUILD_GIT_HASH"),
        built_at: env!("SYSGLANCE_BUILD_TIMESTAMP"),
    };

    /// True when the revision has uncommitted changes on top of it.
    pub fn is_dirty(&self) -> bool {
        self.revision.ends_with("-dirty")
    }

    /// Multi-line block printed by `--version`.
    pub fn version_text(&self) -> String {
        let dirty = if self.is_dirty() { " (modified)" } else { "" };
        format!(
            "sysglance {}\nrevision: {}{dirty}\nbuilt: {}",
            self.version, self.revision, self.built_at
        )
    }
}

/// Version block for the running binary.
pub fn cli_version_text() -> String {
    BuildInfo::CURRENT.version_text()
}
