//! Module descriptor scanner
//!
//! Turns the module entries linked into the binary into container
//! registrations. Only entries whose source lies under a configured root
//! are considered, and only files whose stem ends in `_service` or
//! `_controller` become registrations:
//!
//! ```text
//! modules/application/roles/roles_service.rs     → rolesService
//! modules/application/roles/roles_controller.rs  → rolesController
//! modules/application/roles/roles_constants.rs   → (ignored)
//! ```
//!
//! [`scan_tree`] applies the same classification to a real directory tree;
//! [`lint_sources`] compares the two so a module file that forgot its
//! `register_module!` is caught.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Component, Path, PathBuf};

use charisma_application::registry::{MODULES, ModuleEntry};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::container::Registration;
use crate::constants::{CONTROLLER_SUFFIX, SERVICE_SUFFIX};

/// Role of a module, derived from its file stem suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleRole {
    /// `*_service` files
    Service,
    /// `*_controller` files
    Controller,
}

impl ModuleRole {
    /// Capitalized tag appended to the base name
    pub fn tag(self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::Controller => "Controller",
        }
    }
}

/// Classify a file stem, returning its base name and role
pub fn classify(stem: &str) -> Option<(&str, ModuleRole)> {
    if let Some(base) = stem.strip_suffix(SERVICE_SUFFIX) {
        Some((base, ModuleRole::Service))
    } else {
        stem.strip_suffix(CONTROLLER_SUFFIX)
            .map(|base| (base, ModuleRole::Controller))
    }
}

/// Registration key of a module source path, if it follows the convention
///
/// The base name keeps its casing: `roles_service.rs` → `rolesService`.
/// An empty base name (`_service.rs`) yields no key.
pub fn registration_key(source: &Path) -> Option<String> {
    if source.extension().and_then(|e| e.to_str()) != Some("rs") {
        return None;
    }
    let stem = source.file_stem()?.to_str()?;
    let (base, role) = classify(stem)?;
    if base.is_empty() {
        return None;
    }
    Some(format!("{base}{}", role.tag()))
}

fn normal_components(path: &Path) -> Vec<&str> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect()
}

/// Whether `source` lies under `root`, where `root` may match anywhere in
/// the path (`modules/domains` matches `crates/x/src/modules/domains/a.rs`)
fn is_under_root(source: &Path, root: &str) -> bool {
    let root = normal_components(Path::new(root));
    if root.is_empty() {
        return false;
    }
    let parents = source.parent().map(normal_components).unwrap_or_default();
    parents.windows(root.len()).any(|window| window == root.as_slice())
}

/// A module entry that could not be registered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanWarning {
    /// Source path of the entry
    pub source: String,
    /// Why it was skipped
    pub message: String,
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.message)
    }
}

/// Outcome of a scan
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Registrations ready for the container, in scan order
    pub registrations: Vec<Registration>,
    /// Entries skipped with a reason
    pub warnings: Vec<ScanWarning>,
}

impl ScanReport {
    /// Registered keys in scan order
    pub fn keys(&self) -> Vec<&str> {
        self.registrations.iter().map(|r| r.key()).collect()
    }
}

/// Scanner over linked module entries
#[derive(Debug, Clone)]
pub struct ModuleScanner {
    roots: Vec<String>,
}

impl ModuleScanner {
    /// Create a scanner restricted to the given roots
    pub fn new<I, S>(roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Configured roots
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Scan every module entry linked into the binary
    pub fn scan_linked(&self) -> ScanReport {
        self.scan(&MODULES)
    }

    /// Scan the given entries
    ///
    /// A failing loader or an unusable constructible is reported as a
    /// [`ScanWarning`] and the scan continues with the next entry.
    pub fn scan(&self, entries: &[ModuleEntry]) -> ScanReport {
        let mut report = ScanReport::default();

        for entry in entries {
            let source = Path::new(entry.source);
            if !self.roots.iter().any(|root| is_under_root(source, root)) {
                continue;
            }
            let Some(key) = registration_key(source) else {
                debug!(source = entry.source, "Ignoring non-module source");
                continue;
            };

            let warning = |message: String| ScanWarning {
                source: entry.source.to_string(),
                message,
            };
            match (entry.load)() {
                Ok(constructible) => {
                    if constructible.dependencies().iter().any(|d| d == &key) {
                        report
                            .warnings
                            .push(warning(format!("{key} declares itself as a dependency")));
                        continue;
                    }
                    if constructible.dependencies().iter().any(String::is_empty) {
                        report
                            .warnings
                            .push(warning(format!("{key} declares an empty dependency key")));
                        continue;
                    }
                    report
                        .registrations
                        .push(Registration::new(key, entry.source, constructible));
                }
                Err(e) => report.warnings.push(warning(e.to_string())),
            }
        }

        for w in &report.warnings {
            warn!(source = %w.source, reason = %w.message, "Skipped module");
        }
        if !report.registrations.is_empty() {
            info!(
                count = report.registrations.len(),
                keys = %report.keys().join(", "),
                "Registered modules"
            );
        }
        report
    }
}

impl Default for ModuleScanner {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_MODULE_ROOTS.iter().copied())
    }
}

/// Conventionally named module files found on disk
#[derive(Debug, Default)]
pub struct TreeScan {
    /// Registration key to file path
    pub keys: BTreeMap<String, PathBuf>,
    /// Unreadable entries and duplicate keys
    pub warnings: Vec<ScanWarning>,
}

/// Walk the module roots on disk and classify every `.rs` file
///
/// Unreadable directory entries are reported as warnings, never as errors.
pub fn scan_tree<P: AsRef<Path>>(roots: &[P]) -> TreeScan {
    let mut scan = TreeScan::default();
    for root in roots {
        for entry in WalkDir::new(root.as_ref()).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    scan.warnings.push(ScanWarning {
                        source: e.path().unwrap_or(root.as_ref()).display().to_string(),
                        message: e.to_string(),
                    });
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(key) = registration_key(entry.path()) else {
                continue;
            };
            if let Some(first) = scan.keys.get(&key) {
                scan.warnings.push(ScanWarning {
                    source: entry.path().display().to_string(),
                    message: format!("duplicate key {key}, also derived from {}", first.display()),
                });
                continue;
            }
            scan.keys.insert(key, entry.path().to_path_buf());
        }
    }
    scan
}

/// Difference between module files on disk and registered modules
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LintReport {
    /// Keys of files on disk that are not registered
    pub unregistered: Vec<String>,
    /// Registered keys with no file on disk
    pub stale: Vec<String>,
}

impl LintReport {
    /// Whether disk and registry agree
    pub fn is_clean(&self) -> bool {
        self.unregistered.is_empty() && self.stale.is_empty()
    }
}

/// Compare a tree scan against registered keys
pub fn lint_sources<'a, I>(tree: &TreeScan, registered: I) -> LintReport
where
    I: IntoIterator<Item = &'a str>,
{
    let registered: BTreeSet<&str> = registered.into_iter().collect();
    let on_disk: BTreeSet<&str> = tree.keys.keys().map(String::as_str).collect();
    LintReport {
        unregistered: on_disk
            .difference(&registered)
            .map(|k| (*k).to_string())
            .collect(),
        stale: registered
            .difference(&on_disk)
            .map(|k| (*k).to_string())
            .collect(),
    }
}

/// Scan the linked modules and lint them against the given source roots
pub fn check_modules<P: AsRef<Path>>(scanner: &ModuleScanner, roots: &[P]) -> LintReport {
    let report = scanner.scan_linked();
    let tree = scan_tree(roots);
    for w in &tree.warnings {
        warn!(source = %w.source, reason = %w.message, "Module tree warning");
    }
    lint_sources(&tree, report.keys())
}
