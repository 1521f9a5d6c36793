//! Yaff Core
//!
//! This crate provides the runtime that compiled Yaff components run on.
//! It implements:
//!
//! - A reactive value primitive with composable change reactions
//! - The component contract: construct, markup, mount, unmount
//! - Identifier-scoped patching of a live document, without a virtual DOM
//! - An in-memory rendering surface for hosts without a browser
//!
//! The crate is designed to be used both as a native Rust library and, with
//! the `python` feature, as a Python extension module via PyO3.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `reactive`: The `ReactiveValue` primitive and its reaction chains
//! - `surface`: The document contract components render into, plus `MemorySurface`
//! - `component`: The `Component` trait, lifecycle, props and patch bindings
//! - `sample`: Components in the shape the code generator emits
//! - `config`: Runtime configuration
//! - `error`: Error types
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use yaff_core::component::{mount_root, Component, Context, Props};
//! use yaff_core::config::RuntimeConfig;
//! use yaff_core::sample::GreetingPanel;
//! use yaff_core::surface::{MemorySurface, Surface};
//!
//! let surface = Arc::new(MemorySurface::new());
//! let cx = Context::new(surface.clone(), RuntimeConfig::default()).unwrap();
//!
//! // Build the component tree and attach it.
//! let mut panel = GreetingPanel::construct(&cx, Props::new()).unwrap();
//! mount_root(&mut panel, surface.root()).unwrap();
//!
//! // Updating the state patches exactly the nodes bound to it.
//! panel.name_state().update("Alice".to_string());
//! assert!(panel.markup().contains("Hello, Alice!"));
//! ```

pub mod component;
pub mod config;
pub mod error;
pub mod reactive;
pub mod sample;
pub mod surface;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition.
///
/// This function is called by Python when importing the module.
/// It registers all Python-exposed types.
#[cfg(feature = "python")]
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<reactive::PyReactiveValue>()?;

    // Add version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
