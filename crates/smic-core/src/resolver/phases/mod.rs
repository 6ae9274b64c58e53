//! Resolution phases.
//!
//! Resolution proceeds in five ordered phases:
//!
//! 1. **Registration**: Inventory and mangle every declared label
//! 2. **Imports**: Validate IMPORTS against supplied tables and built-ins
//! 3. **Types**: Resolve type aliases and textual conventions
//! 4. **OIDs**: Evaluate value clauses
//! 5. **Descriptors**: Resolve object syntax and cross references, and
//!    assemble the symbols
//!
//! Registration is pass 1; the rest make up pass 2.

pub mod descriptors;
pub mod imports;
pub mod oids;
pub mod registration;
pub mod types;

pub use descriptors::build_descriptors;
pub use imports::resolve_imports;
pub use oids::resolve_oids;
pub use registration::register_definitions;
pub use types::resolve_types;
