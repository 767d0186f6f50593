// core/src/pipeline/mod.rs

//! A small async step runner used to express the checkout workflows.
//!
//! A pipeline is an ordered list of named steps over a shared context
//! `ContextData<TData>`. Each step has one or more `on` handlers and may carry
//! a skip condition. Handlers return `PipelineControl::Continue` to move on or
//! `PipelineControl::Stop` to halt the run early.
//!
//! Optional steps are tolerant: a missing handler skips the step and a handler
//! error is logged and swallowed. Everything else propagates to the caller.

pub mod context;
pub mod control;
pub mod definition;
pub mod error;
pub mod execution;
pub mod registry;
pub mod step;

pub use context::{ContextData, Handler};
pub use control::{PipelineControl, PipelineResult};
pub use definition::Pipeline;
pub use error::PipelineError;
pub use registry::PipelineRegistry;
pub use step::{SkipCondition, StepDef};
