//! Phase 2: Import validation.
//!
//! Every IMPORTS entry must resolve, either in a supplied table of an
//! already-compiled module or in the built-in base-module knowledge. Supplied
//! tables win over built-ins.

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::QualifiedName;
use crate::resolver::builtins;
use crate::resolver::context::{Import, ImportSource, ResolverContext};

/// Validate all imports of the module.
pub fn resolve_imports(ctx: &mut ResolverContext<'_>) -> Result<()> {
    let module = ctx.module;
    for (symbol, from) in module.imported_symbols() {
        let label = symbol.name.as_str();
        let from = from.name.as_str();
        ctx.import_list.push(QualifiedName::new(from, label));

        let Some(source) = find_source(ctx, from, label) else {
            return Err(Error::UnresolvedReference {
                module: ctx.name().to_owned(),
                label: label.to_owned(),
                reference_module: Some(from.to_owned()),
            });
        };
        match &source {
            ImportSource::Table(_) => debug!(label, from, source = "table", "resolved import"),
            ImportSource::Builtin(_) => debug!(label, from, source = "builtin", "resolved import"),
        }

        if let Some(previous) = ctx.imports.get(label) {
            if previous.module != from {
                debug!(label, kept = %previous.module, ignored = from, "label imported twice");
            }
            continue;
        }
        ctx.imports.insert(
            label,
            Import {
                module: from.to_owned(),
                source,
            },
        );
    }
    Ok(())
}

fn find_source(ctx: &ResolverContext<'_>, from: &str, label: &str) -> Option<ImportSource> {
    if let Some(table) = ctx.options.imported(from) {
        if table.get(label).is_some() || table.row_type(label).is_some() {
            return Some(ImportSource::Table(table.clone()));
        }
    }
    builtins::lookup(from, label).map(ImportSource::Builtin)
}
