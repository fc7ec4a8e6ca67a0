//! Cache provider implementations

pub mod moka;

pub use self::moka::MokaCacheProvider;
