use std::collections::HashMap;
use std::sync::Arc;

use super::method::Method;

/// A handler stored on a tree node, plus the names its captures bind to.
#[derive(Debug, Clone)]
pub(crate) struct Endpoint<H> {
    /// Placeholder names in the order their values are captured from the root.
    pub param_keys: Arc<[Arc<str>]>,
    pub handler: H,
}

/// Per-node mapping from method to endpoint.
#[derive(Debug, Clone)]
pub(crate) struct EndpointTable<H> {
    by_method: HashMap<Method, Endpoint<H>>,
}

impl<H> Default for EndpointTable<H> {
    fn default() -> Self {
        Self {
            by_method: HashMap::new(),
        }
    }
}

impl<H> EndpointTable<H> {
    /// Store the endpoint for `method`, returning the one it replaced.
    pub(crate) fn set(&mut self, method: Method, endpoint: Endpoint<H>) -> Option<Endpoint<H>> {
        self.by_method.insert(method, endpoint)
    }

    pub(crate) fn get(&self, method: Method) -> Option<&Endpoint<H>> {
        self.by_method.get(&method)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.by_method.is_empty()
    }

    /// Registered methods, sorted.
    pub(crate) fn methods(&self) -> Vec<Method> {
        let mut methods: Vec<Method> = self.by_method.keys().copied().collect();
        methods.sort();
        methods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(handler: &'static str) -> Endpoint<&'static str> {
        Endpoint {
            param_keys: Arc::from(Vec::<Arc<str>>::new()),
            handler,
        }
    }

    #[test]
    fn test_set_overwrites_same_method() {
        let mut table = EndpointTable::default();
        assert!(table.is_empty());
        assert!(table.set(Method::Get, endpoint("first")).is_none());
        let replaced = table.set(Method::Get, endpoint("second"));
        assert_eq!(replaced.map(|e| e.handler), Some("first"));
        assert_eq!(table.get(Method::Get).map(|e| e.handler), Some("second"));
        assert!(table.get(Method::Post).is_none());
    }

    #[test]
    fn test_methods_are_sorted() {
        let mut table = EndpointTable::default();
        table.set(Method::Delete, endpoint("d"));
        table.set(Method::Get, endpoint("g"));
        assert_eq!(table.methods(), vec![Method::Get, Method::Delete]);
    }
}
