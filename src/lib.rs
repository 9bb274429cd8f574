//! Core library for the manad-tools command line application.
//!
//! The library consolidates MANAD payroll-compliance files into per-rubric
//! summary reports. The modules are structured to keep responsibilities
//! narrow and composable: the record decoders and file loader live under
//! [`io::manad_read`], the report renderers under [`io::excel_write`] and
//! [`io::json_write`], data representations inside [`model`], the
//! consolidation logic in [`report`], and the per-file orchestration under
//! [`pipeline`].

pub mod error;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod report;

pub use error::{Result, ToolError};
