//! Element resolution.
//!
//! A [`Resolver`] maps an abstract element type to the concrete element a
//! target emits. Resolvers only answer for the types they know; the pipeline
//! wraps them in [`WithFallback`] so every type resolves to something.

use std::sync::Arc;

use indexmap::IndexMap;
use uidl_core::{Attrs, DependencyDescriptor};

/// A concrete target element.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedElement {
    /// Tag or component name emitted by the target.
    pub node_name: String,
    /// Attributes to emit, after merging.
    pub attrs: Attrs,
    /// Dependency the element needs, registered under `node_name`.
    pub dependency: Option<DependencyDescriptor>,
}

impl ResolvedElement {
    /// The element used when no mapping exists: the type itself, no dependency.
    pub fn fallback(element_type: &str, attrs: &Attrs) -> Self {
        Self {
            node_name: element_type.to_string(),
            attrs: attrs.clone(),
            dependency: None,
        }
    }
}

/// Maps abstract element types to target elements.
///
/// Implementations must be pure: the same input always gives the same
/// output. Returning `None` means the type is unknown.
pub trait Resolver: Send + Sync {
    fn resolve(
        &self,
        element_type: &str,
        attrs: &Attrs,
        dependency: Option<&DependencyDescriptor>,
    ) -> Option<ResolvedElement>;
}

impl<F> Resolver for F
where
    F: Fn(&str, &Attrs, Option<&DependencyDescriptor>) -> Option<ResolvedElement> + Send + Sync,
{
    fn resolve(
        &self,
        element_type: &str,
        attrs: &Attrs,
        dependency: Option<&DependencyDescriptor>,
    ) -> Option<ResolvedElement> {
        self(element_type, attrs, dependency)
    }
}

impl<R: Resolver + ?Sized> Resolver for Arc<R> {
    fn resolve(
        &self,
        element_type: &str,
        attrs: &Attrs,
        dependency: Option<&DependencyDescriptor>,
    ) -> Option<ResolvedElement> {
        (**self).resolve(element_type, attrs, dependency)
    }
}

/// Resolver that never fails: unknown types resolve to themselves.
#[derive(Debug, Clone)]
pub struct WithFallback<R> {
    inner: R,
}

impl<R: Resolver> WithFallback<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn resolve(
        &self,
        element_type: &str,
        attrs: &Attrs,
        dependency: Option<&DependencyDescriptor>,
    ) -> ResolvedElement {
        self.inner
            .resolve(element_type, attrs, dependency)
            .unwrap_or_else(|| ResolvedElement::fallback(element_type, attrs))
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

/// A mapping entry for [`MappingResolver`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementMapping {
    /// Target element name.
    pub name: String,
    /// Attributes added to every element of this type.
    #[cfg_attr(feature = "serde", serde(default))]
    pub attrs: Attrs,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dependency: Option<DependencyDescriptor>,
}

impl ElementMapping {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Attrs::new(),
            dependency: None,
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<uidl_core::AttrValue>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn with_dependency(mut self, dependency: DependencyDescriptor) -> Self {
        self.dependency = Some(dependency);
        self
    }
}

/// Table-driven resolver.
///
/// Mapping attributes come first and node attributes override them. The
/// mapping's dependency wins over one declared on the node.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct MappingResolver {
    mappings: IndexMap<String, ElementMapping>,
}

impl MappingResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the mapping for `element_type`.
    pub fn insert(&mut self, element_type: impl Into<String>, mapping: ElementMapping) {
        self.mappings.insert(element_type.into(), mapping);
    }

    pub fn with_mapping(mut self, element_type: impl Into<String>, mapping: ElementMapping) -> Self {
        self.insert(element_type, mapping);
        self
    }

    /// Layer `other` over this table; its entries replace existing ones.
    pub fn extend(&mut self, other: MappingResolver) {
        self.mappings.extend(other.mappings);
    }

    pub fn get(&self, element_type: &str) -> Option<&ElementMapping> {
        self.mappings.get(element_type)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl Resolver for MappingResolver {
    fn resolve(
        &self,
        element_type: &str,
        attrs: &Attrs,
        dependency: Option<&DependencyDescriptor>,
    ) -> Option<ResolvedElement> {
        let mapping = self.mappings.get(element_type)?;

        let mut merged = mapping.attrs.clone();
        merged.extend(attrs.iter().map(|(k, v)| (k.clone(), v.clone())));

        Some(ResolvedElement {
            node_name: mapping.name.clone(),
            attrs: merged,
            dependency: mapping.dependency.clone().or_else(|| dependency.cloned()),
        })
    }
}
