//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Charisma API
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Resource already exists (unique constraint)
    #[error("Conflict: {message}")]
    Conflict {
        /// Description of the conflict
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Authentication-related error (credential missing, malformed, expired or forged)
    #[error("Authentication error: {message}")]
    Authentication {
        /// Description of the authentication error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Cache operation error
    #[error("Cache error: {message}")]
    Cache {
        /// Description of the cache error
        message: String,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },

    /// A module source could not be turned into a constructible
    #[error("Failed to load module {source_path}: {message}")]
    ModuleLoad {
        /// Source path of the module descriptor
        source_path: String,
        /// Why loading failed
        message: String,
    },

    /// Two modules derived the same registration key
    #[error("Duplicate registration key '{key}' ({first} and {second})")]
    DuplicateKey {
        /// The colliding key
        key: String,
        /// Origin of the first registration
        first: String,
        /// Origin of the second registration
        second: String,
    },

    /// The container registry was already populated
    #[error("Container registry is already populated; register may only be called once")]
    AlreadyRegistered,

    /// No registration exists for a key
    #[error("Unknown registration key '{key}'")]
    UnknownKey {
        /// The requested key
        key: String,
    },

    /// The declared dependency graph contains a cycle
    #[error("Circular dependency: {}", cycle.join(" -> "))]
    CircularDependency {
        /// Keys forming the cycle, first key repeated at the end
        cycle: Vec<String>,
    },

    /// The container has been torn down
    #[error("Container has been torn down")]
    ContainerClosed,

    /// A resolved collaborator does not have the requested type
    #[error("Collaborator '{key}' is not a {expected}")]
    TypeMismatch {
        /// The collaborator key
        key: String,
        /// Name of the expected type
        expected: &'static str,
    },

    /// A dispatched method does not exist on the resolved instance
    #[error("Method '{method}' not found on '{key}'")]
    MethodNotFound {
        /// The resolved key
        key: String,
        /// The requested method
        method: String,
    },
}

// Basic error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Authentication error creation methods
impl Error {
    /// Create an authentication error
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Self::Authentication {
            message: message.into(),
            source: None,
        }
    }

    /// Create an authentication error with source
    pub fn authentication_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Authentication {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Infrastructure error creation methods
impl Error {
    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error with source
    pub fn infrastructure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Container error creation methods
impl Error {
    /// Create a module load error
    pub fn module_load<P: Into<String>, S: Into<String>>(source_path: P, message: S) -> Self {
        Self::ModuleLoad {
            source_path: source_path.into(),
            message: message.into(),
        }
    }

    /// Create an unknown key error
    pub fn unknown_key<S: Into<String>>(key: S) -> Self {
        Self::UnknownKey { key: key.into() }
    }

    /// Create a method not found error
    pub fn method_not_found<K: Into<String>, M: Into<String>>(key: K, method: M) -> Self {
        Self::MethodNotFound {
            key: key.into(),
            method: method.into(),
        }
    }

    /// Whether this error must abort process startup
    pub fn is_startup_fatal(&self) -> bool {
        matches!(
            self,
            Self::DuplicateKey { .. }
                | Self::AlreadyRegistered
                | Self::UnknownKey { .. }
                | Self::CircularDependency { .. }
                | Self::Configuration { .. }
        )
    }
}
