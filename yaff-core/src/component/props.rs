//! Props
//!
//! The values a parent injects into a child at construction. Each prop is a
//! [`ReactiveValue`] of some type, stored type-erased under its name and
//! recovered with a checked downcast.

use std::any::{type_name, Any};

use indexmap::IndexMap;

use crate::error::ComponentError;
use crate::reactive::ReactiveValue;

/// Named props passed to a component constructor.
#[derive(Default)]
pub struct Props {
    values: IndexMap<String, Box<dyn Any + Send + Sync>>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Props::insert`].
    pub fn with<T>(mut self, name: impl Into<String>, value: ReactiveValue<T>) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.insert(name, value);
        self
    }

    /// Add or overwrite a prop.
    pub fn insert<T>(&mut self, name: impl Into<String>, value: ReactiveValue<T>)
    where
        T: Clone + Send + Sync + 'static,
    {
        self.values.insert(name.into(), Box::new(value));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Prop names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a required prop.
    ///
    /// Fails if the prop is missing or holds a different value type.
    pub fn require<T>(&self, component: &'static str, name: &str) -> Result<ReactiveValue<T>, ComponentError>
    where
        T: Clone + Send + Sync + 'static,
    {
        match self.values.get(name) {
            Some(value) => downcast(component, name, &**value),
            None => Err(ComponentError::MissingProp {
                component,
                prop: name.to_string(),
            }),
        }
    }

    /// Get an optional prop, or a placeholder if the parent did not supply it.
    ///
    /// A supplied prop of the wrong type is still an error.
    pub fn optional<T>(&self, component: &'static str, name: &str) -> Result<ReactiveValue<T>, ComponentError>
    where
        T: Clone + Send + Sync + 'static,
    {
        match self.values.get(name) {
            Some(value) => downcast(component, name, &**value),
            None => Ok(ReactiveValue::placeholder()),
        }
    }
}

fn downcast<T>(
    component: &'static str,
    name: &str,
    value: &(dyn Any + Send + Sync),
) -> Result<ReactiveValue<T>, ComponentError>
where
    T: Clone + Send + Sync + 'static,
{
    value
        .downcast_ref::<ReactiveValue<T>>()
        .cloned()
        .ok_or_else(|| ComponentError::PropType {
            component,
            prop: name.to_string(),
            expected: type_name::<T>(),
        })
}

impl std::fmt::Debug for Props {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.values.keys()).finish()
    }
}
