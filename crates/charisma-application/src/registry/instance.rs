//! Resolved instances

use std::any::{Any, TypeId};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use charisma_domain::error::Result;
use futures::future::BoxFuture;

/// Hook run once when the container is torn down
pub type ReleaseHook = Arc<dyn Fn() -> BoxFuture<'static, Result<()>> + Send + Sync>;

struct View {
    type_id: TypeId,
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

/// A constructed singleton held by the container
///
/// An instance exposes one or more typed views of the same object, each an
/// `Arc<T>` where `T` is usually a port trait object. Cloning an instance is
/// cheap and yields the same object.
///
/// ```ignore
/// let service = Arc::new(JwtTokenService::new(settings)?);
/// let instance = Instance::of::<dyn TokenService>(service.clone())
///     .with_view::<dyn TokenVerifier>(service);
/// ```
#[derive(Clone)]
pub struct Instance {
    views: Arc<[View]>,
    release: Option<ReleaseHook>,
}

impl Instance {
    /// Wrap a value exposed as `Arc<T>`
    pub fn of<T>(value: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Self {
            views: Arc::from(vec![Self::view(value)]),
            release: None,
        }
    }

    /// Expose the same object under an additional type
    pub fn with_view<T>(self, value: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let mut views: Vec<View> = self
            .views
            .iter()
            .map(|v| View {
                type_id: v.type_id,
                type_name: v.type_name,
                value: Arc::clone(&v.value),
            })
            .collect();
        views.push(Self::view(value));
        Self {
            views: Arc::from(views),
            release: self.release,
        }
    }

    /// Attach a hook run at container teardown
    pub fn with_release<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let hook: ReleaseHook = Arc::new(move || -> BoxFuture<'static, Result<()>> { Box::pin(hook()) });
        self.release = Some(hook);
        self
    }

    fn view<T>(value: Arc<T>) -> View
    where
        T: ?Sized + Send + Sync + 'static,
    {
        View {
            type_id: TypeId::of::<Arc<T>>(),
            type_name: std::any::type_name::<T>(),
            value: Arc::new(value),
        }
    }

    /// Get the view of type `T`, if the instance exposes one
    pub fn get<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let wanted = TypeId::of::<Arc<T>>();
        self.views
            .iter()
            .find(|v| v.type_id == wanted)
            .and_then(|v| v.value.downcast_ref::<Arc<T>>())
            .cloned()
    }

    /// Names of the exposed types
    pub fn type_names(&self) -> Vec<&'static str> {
        self.views.iter().map(|v| v.type_name).collect()
    }

    /// Release hook, if any
    pub fn release_hook(&self) -> Option<ReleaseHook> {
        self.release.clone()
    }

    /// Whether two instances hold the same object
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.views, &other.views)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("views", &self.type_names())
            .field("has_release", &self.release.is_some())
            .finish()
    }
}
