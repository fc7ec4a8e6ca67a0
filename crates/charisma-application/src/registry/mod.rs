//! Module Registry
//!
//! Link-time registration of service and controller modules.
//! Every module source file registers exactly one [`ModuleEntry`] into the
//! [`MODULES`] distributed slice with [`register_module!`]. The entry records
//! the source path (`file!()`), from which the scanner derives the
//! registration key, and a loader producing a [`Constructible`].
//!
//! ## Registration Flow
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  1. Module file:   register_module!(load);                       │
//! │                        ↓                                         │
//! │  2. Registry:      #[linkme::distributed_slice]                  │
//! │                    pub static MODULES: [ModuleEntry] = [..]      │
//! │                        ↓                                         │
//! │  3. Scanner:       classify source stem → "rolesService"         │
//! │                        ↓                                         │
//! │  4. Container:     register(batch) → resolve("rolesService")     │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Registering a Module
//!
//! ```ignore
//! // crates/charisma-providers/src/modules/domains/cache/cache_service.rs
//! fn load() -> Result<Constructible> {
//!     Ok(Constructible::new(|deps| { /* build */ }).depends_on(&["cacheSettings"]))
//! }
//!
//! charisma_application::register_module!(load);
//! ```

mod collaborators;
mod constructible;
mod instance;

pub use collaborators::Collaborators;
pub use constructible::{Constructible, FactoryFn};
pub use instance::{Instance, ReleaseHook};

use charisma_domain::error::Result;

/// Registry entry for a module source
///
/// Each module source file contributes one entry using [`register_module!`].
pub struct ModuleEntry {
    /// Source path of the module file, as reported by `file!()`
    pub source: &'static str,
    /// Loader producing the module's constructible
    pub load: fn() -> Result<Constructible>,
}

impl std::fmt::Debug for ModuleEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleEntry")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

// Auto-collection via linkme distributed slices - modules submit entries at link time
#[linkme::distributed_slice]
pub static MODULES: [ModuleEntry] = [..];

/// List the source paths of all linked module entries
pub fn list_modules() -> Vec<&'static str> {
    MODULES.iter().map(|e| e.source).collect()
}

/// Register the enclosing source file as a module
///
/// Takes a `fn() -> Result<Constructible>` loader. The crate using the macro
/// must depend on `linkme`.
#[macro_export]
macro_rules! register_module {
    ($load:expr) => {
        #[::linkme::distributed_slice($crate::registry::MODULES)]
        static MODULE_ENTRY: $crate::registry::ModuleEntry = $crate::registry::ModuleEntry {
            source: file!(),
            load: $load,
        };
    };
}
