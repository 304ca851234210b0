use super::core::RouterBuilder;
use super::error::RegistrationError;
use super::method::Method;

/// Handlers for the four verbs of a REST resource.
///
/// See [`RouteGroup::resource`] for the routes they are registered under.
#[derive(Debug, Clone)]
pub struct Resource<H> {
    pub create: H,
    pub retrieve: H,
    pub update: H,
    pub delete: H,
}

/// A set of routes sharing a path prefix.
///
/// ```rust
/// use cupcake::router::{Method, Router};
///
/// let mut builder = Router::builder();
/// let mut v1 = builder.group("/v1");
/// v1.get("/cupcake/{name:[a-z]+}", "by_name").unwrap();
/// let router = builder.build();
///
/// let matched = router.resolve("/v1/cupcake/lemon", Method::Get).unwrap();
/// assert_eq!(*matched.handler, "by_name");
/// ```
#[derive(Debug)]
pub struct RouteGroup<'b, H> {
    builder: &'b mut RouterBuilder<H>,
    prefix: String,
}

impl<'b, H> RouteGroup<'b, H> {
    pub(crate) fn new(builder: &'b mut RouterBuilder<H>, prefix: &str) -> Self {
        Self {
            builder,
            prefix: prefix.strip_suffix('/').unwrap_or(prefix).to_string(),
        }
    }

    /// The full prefix of this group.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Nested group; its prefix is appended to this group's.
    pub fn group(&mut self, prefix: &str) -> RouteGroup<'_, H> {
        let nested = format!("{}{}", self.prefix, with_leading_slash(prefix));
        RouteGroup::new(self.builder, &nested)
    }

    /// Register `handler` for `method` at this group's prefix plus `path`.
    pub fn handle(
        &mut self,
        method: Method,
        path: &str,
        handler: H,
    ) -> Result<(), RegistrationError> {
        let pattern = format!("{}{}", self.prefix, with_leading_slash(path));
        self.builder.insert(&pattern, method, handler)
    }

    pub fn get(&mut self, path: &str, handler: H) -> Result<(), RegistrationError> {
        self.handle(Method::Get, path, handler)
    }

    pub fn post(&mut self, path: &str, handler: H) -> Result<(), RegistrationError> {
        self.handle(Method::Post, path, handler)
    }

    pub fn put(&mut self, path: &str, handler: H) -> Result<(), RegistrationError> {
        self.handle(Method::Put, path, handler)
    }

    pub fn delete(&mut self, path: &str, handler: H) -> Result<(), RegistrationError> {
        self.handle(Method::Delete, path, handler)
    }

    /// Register CRUD routes for a resource:
    ///
    /// - `POST {path}/` → `create`
    /// - `GET {path}/{id}` → `retrieve`
    /// - `PUT {path}/{id}` → `update`
    /// - `DELETE {path}/{id}` → `delete`
    pub fn resource(&mut self, path: &str, resource: Resource<H>) -> Result<(), RegistrationError> {
        let collection = if path.ends_with('/') {
            path.to_string()
        } else {
            format!("{path}/")
        };
        let item = format!("{collection}{{id}}");

        self.post(&collection, resource.create)?;
        self.get(&item, resource.retrieve)?;
        self.put(&item, resource.update)?;
        self.delete(&item, resource.delete)
    }

    /// Register `handler` for `GET {path}/*`.
    ///
    /// Meant for file trees: the handler finds the requested file in the
    /// match's wildcard capture.
    pub fn mount(&mut self, path: &str, handler: H) -> Result<(), RegistrationError> {
        let base = path.trim_end_matches('/');
        self.get(&format!("{base}/*"), handler)
    }
}

fn with_leading_slash(path: &str) -> String {
    if path.is_empty() || path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
