//! Component identity types and the persisted registry record.
//!
//! A *component* is an installable unit pulled from a remote catalog into a
//! pipeline project: either a [`ComponentKind::Module`] (leaf) or a
//! [`ComponentKind::Subworkflow`] (which may pull further components in as
//! transitive dependencies).

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Marker stored in `installed_by` for components the user installed
/// explicitly rather than as a transitive dependency.
pub const DIRECT_MARKER: &str = "direct";

// ── ComponentKind ─────────────────────────────────────────────────────────────

/// The two kinds of installable components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Leaf unit. Modules never cause other components to be installed.
    Module,
    /// Composite unit. Installing a subworkflow installs its dependencies,
    /// each recording the subworkflow's name as a parent link.
    Subworkflow,
}

impl ComponentKind {
    /// Key of this kind's section in the registry document, which doubles
    /// as the directory name the component tree lives under.
    pub fn section(&self) -> &'static str {
        match self {
            Self::Module => "modules",
            Self::Subworkflow => "subworkflows",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module => write!(f, "module"),
            Self::Subworkflow => write!(f, "subworkflow"),
        }
    }
}

// ── ParentLink ────────────────────────────────────────────────────────────────

/// One element of a record's `installed_by` set: the reason a component is
/// present. Serialized as the bare string `"direct"` or the subworkflow name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParentLink {
    /// Installed explicitly by the user.
    Direct,
    /// Installed as a dependency of the named subworkflow.
    Subworkflow(String),
}

impl ParentLink {
    /// Parse the persisted string form.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        if name == DIRECT_MARKER {
            Self::Direct
        } else {
            Self::Subworkflow(name)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Direct => DIRECT_MARKER,
            Self::Subworkflow(name) => name,
        }
    }

    /// `true` if this link names the given subworkflow.
    pub fn is_subworkflow(&self, name: &str) -> bool {
        matches!(self, Self::Subworkflow(n) if n == name)
    }
}

impl fmt::Display for ParentLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ParentLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ParentLink {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_name(String::deserialize(deserializer)?))
    }
}

// ── ComponentRecord ───────────────────────────────────────────────────────────

/// One persisted registry entry.
///
/// `branch` and `git_sha` pin the catalog revision the installed files
/// correspond to. Foreign keys written by newer tool versions are captured
/// in `extra` and round-trip through load/save unmodified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub branch: String,
    pub git_sha: String,
    #[serde(default)]
    pub installed_by: Vec<ParentLink>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ComponentRecord {
    pub fn new(branch: impl Into<String>, git_sha: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            git_sha: git_sha.into(),
            installed_by: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// A record is live exactly while something still justifies it.
    pub fn is_live(&self) -> bool {
        !self.installed_by.is_empty()
    }

    pub fn has_parent(&self, parent: &ParentLink) -> bool {
        self.installed_by.contains(parent)
    }

    /// Add a parent link unless already present. Returns `true` if added.
    pub fn add_parent(&mut self, parent: ParentLink) -> bool {
        if self.has_parent(&parent) {
            return false;
        }
        self.installed_by.push(parent);
        true
    }

    /// Remove a parent link if present. Returns `true` if the set changed.
    pub fn remove_parent(&mut self, parent: &ParentLink) -> bool {
        let before = self.installed_by.len();
        self.installed_by.retain(|p| p != parent);
        self.installed_by.len() != before
    }
}

// ── RepoIdentity ──────────────────────────────────────────────────────────────

/// Where components come from: the remote catalog URL plus the sub-path
/// (namespace) inside it. Supplied by the calling context, passed through
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoIdentity {
    pub remote_url: String,
    pub repo_path: String,
}

impl RepoIdentity {
    pub fn new(remote_url: impl Into<String>, repo_path: impl Into<String>) -> Self {
        Self {
            remote_url: remote_url.into(),
            repo_path: repo_path.into(),
        }
    }
}

impl fmt::Display for RepoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.remote_url, self.repo_path)
    }
}

// ── DirectoryState ────────────────────────────────────────────────────────────

/// Whether a component's expected directory exists on disk. Derived, never
/// persisted; used only to detect registry/filesystem divergence. The
/// domain never probes the filesystem itself — callers derive this through
/// the filesystem port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryState {
    Present,
    Missing,
}

impl DirectoryState {
    pub fn from_present(present: bool) -> Self {
        if present { Self::Present } else { Self::Missing }
    }
}

impl fmt::Display for DirectoryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => write!(f, "present"),
            Self::Missing => write!(f, "missing"),
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
