//! Phase 1: Symbol registration.
//!
//! Inventory every declared name in parse order. Labels are mangled here and
//! checked for uniqueness; nothing is resolved yet.

use tracing::debug;

use crate::ast::{Definition, TypeSyntax};
use crate::error::Result;
use crate::model::SymbolKind;
use crate::resolver::context::{Entry, ResolverContext, Row, Slot};
use crate::text::mangle;

/// Register all definitions of the module.
pub fn register_definitions(ctx: &mut ResolverContext<'_>) -> Result<()> {
    let module = ctx.module;
    for definition in &module.body {
        let label = definition.name().name.as_str();
        let kind = match definition {
            Definition::MacroDefinition(_) => continue,
            Definition::TypeAssignment(def) => {
                if let TypeSyntax::Sequence { fields, .. } = &def.syntax {
                    let mangled = claim(ctx, label)?;
                    ctx.rows.insert(label, Row { label, mangled, fields });
                    continue;
                }
                SymbolKind::TypeAlias
            }
            Definition::TextualConvention(_) => SymbolKind::TextualConvention,
            Definition::ObjectType(_) => SymbolKind::ObjectType,
            Definition::NotificationType(_) | Definition::TrapType(_) => {
                SymbolKind::NotificationType
            }
            Definition::ValueAssignment(_)
            | Definition::ModuleIdentity(_)
            | Definition::ObjectIdentity(_)
            | Definition::ObjectGroup(_)
            | Definition::NotificationGroup(_)
            | Definition::ModuleCompliance(_)
            | Definition::AgentCapabilities(_) => SymbolKind::ObjectIdentifierValue,
        };

        let mangled = claim(ctx, label)?;
        ctx.entries.insert(
            label,
            Entry {
                label,
                mangled,
                kind,
                definition,
            },
        );
        ctx.types.push(Slot::Pending);
        ctx.oids.push(Slot::Pending);
    }

    debug!(
        module = ctx.name(),
        symbols = ctx.entries.len(),
        row_types = ctx.rows.len(),
        imports = ctx.module.imported_symbols().count(),
        "registered definitions"
    );
    Ok(())
}

/// Reserve a label and its mangled form.
///
/// Fails if the label, or a different label with the same mangled form, is
/// already registered.
fn claim<'a>(ctx: &mut ResolverContext<'a>, label: &'a str) -> Result<String> {
    if ctx.entries.contains_key(label) || ctx.rows.contains_key(label) {
        return Err(ctx.duplicate(label));
    }
    let mangled = mangle(label);
    if ctx.mangled.contains_key(&mangled) {
        return Err(ctx.duplicate(label));
    }
    ctx.mangled.insert(mangled.clone(), label);
    Ok(mangled)
}
