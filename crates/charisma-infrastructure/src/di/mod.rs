//! Convention-based dependency injection
//!
//! ```text
//! MODULES (linkme) → ModuleScanner → Vec<Registration>
//!                                        ↓
//!        settings values ────────→ Container::register
//!                                        ↓
//!                         validate → resolve(key) → Instance
//! ```

pub mod bootstrap;
pub mod container;
pub mod scanner;

pub use bootstrap::{build_container, build_container_from, settings_registrations};
pub use container::{Container, Registration};
pub use scanner::{
    LintReport, ModuleRole, ModuleScanner, ScanReport, ScanWarning, TreeScan, check_modules,
    lint_sources, registration_key, scan_tree,
};
