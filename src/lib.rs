//! # Custom Performance Profiler
//!
//! Performance profiler plugin for game engines.
//!
//! This crate bundles the profiler engine itself (named-scope timing, frame
//! sampling, aggregate statistics) together with the declarative build
//! metadata an engine consumes to link the plugin: a module manifest with
//! public/private dependencies and the Game/Editor target descriptors.
//!
//! ## Modules
//!
//! - [`profiler`] - Scope timing, frame sampling and the global function library
//! - [`build`] - Module manifest, target descriptors and the module graph
//! - [`module`] - Engine module trait, registry and the `App` host
//! - [`config`] - Profiler configuration (TOML/JSON, env overrides)
//! - [`editor`] - Editor overlay panel (enabled by the `editor` feature)
//!
//! ## Example
//!
//! ```rust
//! use custom_performance_profiler::CustomProfiler;
//!
//! let mut profiler = CustomProfiler::new();
//! profiler.start_profiling("game_update");
//! // ... do work ...
//! profiler.end_profiling("game_update");
//!
//! assert_eq!(profiler.metric_count(), 1);
//! let stats = profiler.stats("game_update").unwrap();
//! assert_eq!(stats.call_count, 1);
//! ```

// Macro for implementing Default trait
#[macro_export]
macro_rules! impl_default {
    ($type:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $type {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }
    };
}

pub mod build;
pub mod config;
pub mod error;
pub mod module;
pub mod profiler;
pub mod profiler_module;

#[cfg(feature = "editor")]
pub mod editor;

// Re-export public APIs
pub use build::*;
pub use config::*;
pub use error::*;
pub use module::*;
pub use profiler::*;
pub use profiler_module::*;

#[cfg(feature = "editor")]
pub use editor::*;
