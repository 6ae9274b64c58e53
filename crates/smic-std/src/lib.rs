//! smic-std: filesystem collaborators and tools for smic
//!
//! `smic-core` compiles a single module and performs no I/O. This crate
//! supplies what surrounds it:
//!
//! - [`reader`]: locating module source by name.
//! - [`writer`]: persisting rendered output.
//! - [`cache`] and [`borrower`]: reusing compiled symbol tables across runs.
//! - [`compiler`]: compiling a module together with its imports, in
//!   dependency order.
//! - [`json`]: a JSON backend.
//!
//! ```no_run
//! use smic_std::{Compiler, CompilerConfig, FileWriter, JsonBackend};
//!
//! let config = CompilerConfig {
//!     search_dirs: vec!["/usr/share/snmp/mibs".into()],
//!     ..CompilerConfig::default()
//! };
//! let report = Compiler::from_config(&config)
//!     .compile_and_write(&["IF-MIB"], &JsonBackend::pretty(), &FileWriter::new("out"))?;
//! for (module, status) in &report.statuses {
//!     println!("{module}: {}", status.as_str());
//! }
//! # Ok::<(), smic_std::CompilerError>(())
//! ```

pub mod borrower;
pub mod cache;
pub mod compiler;
pub mod json;
pub mod reader;
pub mod writer;

pub use borrower::{Borrower, CacheBorrower};
pub use cache::CacheError;
pub use compiler::{CompileReport, Compiler, CompilerConfig, CompilerError, ModuleStatus};
pub use json::JsonBackend;
pub use reader::{FileReader, MemoryReader, Reader, ReaderError, Source};
pub use writer::{CallbackWriter, FileWriter, Writer};

pub use smic_core;
