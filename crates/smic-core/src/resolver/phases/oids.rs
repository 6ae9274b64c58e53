//! Phase 4: OID resolution.
//!
//! Evaluate the value clause of every OID-valued symbol. Literal arcs are
//! taken as-is; a symbolic head is looked up in the module, its imports or
//! the ASN.1 roots and contributes its own resolved OID. A TRAP-TYPE maps to
//! `enterprise.0.n`.

use tracing::{debug, trace};

use crate::ast::{Definition, Ident, OidAssignment, OidComponent};
use crate::error::{Error, Result};
use crate::model::Oid;
use crate::resolver::builtins::{self, Builtin};
use crate::resolver::context::{ImportSource, ResolverContext, Scope, Slot};

/// Resolve every OID-valued symbol of the module.
pub fn resolve_oids(ctx: &mut ResolverContext<'_>) -> Result<()> {
    let mut resolved = 0usize;
    for index in 0..ctx.entries.len() {
        let has_oid = ctx.entry(index).is_some_and(|e| !e.kind.is_type());
        if has_oid {
            resolve_oid(ctx, index)?;
            resolved += 1;
        }
    }
    debug!(module = ctx.name(), oids = resolved, "resolved OIDs");
    Ok(())
}

/// Resolved OID of the symbol at `index`.
pub fn resolve_oid(ctx: &mut ResolverContext<'_>, index: usize) -> Result<Oid> {
    let Some((label, definition)) = ctx.entry(index).map(|e| (e.label, e.definition)) else {
        return Err(ctx.unresolved("<unknown>"));
    };
    match &ctx.oids[index] {
        Slot::Resolved(oid) => return Ok(oid.clone()),
        Slot::InProgress => return Err(ctx.cycle(label)),
        Slot::Pending => {}
    }

    ctx.oids[index] = Slot::InProgress;
    ctx.stack.push(label);

    let result = match definition {
        Definition::TrapType(trap) => {
            lookup_oid(ctx, &trap.enterprise).map(|oid| oid.extended(&[0, trap.trap_number]))
        }
        other => match other.oid_assignment() {
            Some(assignment) => evaluate(ctx, assignment),
            None => Err(ctx.unresolved(label)),
        },
    };

    ctx.stack.pop();
    let oid = result?;
    trace!(label, %oid, "resolved OID");
    ctx.oids[index] = Slot::Resolved(oid.clone());
    Ok(oid)
}

/// Evaluate an OID value clause.
///
/// A symbolic component denotes a whole OID, so it replaces the arcs
/// collected before it. In practice it is the head of the clause.
fn evaluate(ctx: &mut ResolverContext<'_>, assignment: &OidAssignment) -> Result<Oid> {
    let mut arcs: Vec<u32> = Vec::with_capacity(assignment.components.len() + 8);
    for component in &assignment.components {
        match component {
            OidComponent::Number { value, .. } | OidComponent::NamedNumber { number: value, .. } => {
                arcs.push(*value);
            }
            OidComponent::Name(ident) => {
                arcs = lookup_oid(ctx, ident)?.arcs().to_vec();
            }
            OidComponent::QualifiedName { module, name, .. } => {
                arcs = lookup_qualified(ctx, &module.name, &name.name)?.arcs().to_vec();
            }
        }
    }
    Ok(Oid::new(arcs))
}

/// OID of a symbol referenced by label.
pub fn lookup_oid(ctx: &mut ResolverContext<'_>, ident: &Ident) -> Result<Oid> {
    let label = ident.name.as_str();
    match ctx.lookup(label) {
        Some(Scope::Local(index)) => {
            let is_type = ctx.entry(index).is_some_and(|e| e.kind.is_type());
            if is_type {
                return Err(ctx.unresolved(label));
            }
            resolve_oid(ctx, index)
        }
        Some(Scope::Imported(index)) => {
            let found = ctx.import(index).and_then(|(_, import)| match &import.source {
                ImportSource::Table(table) => table.oid(label).cloned(),
                ImportSource::Builtin(Builtin::OidRoot(root)) => Some(Oid::from(root.arcs)),
                ImportSource::Builtin(_) => None,
            });
            found.ok_or_else(|| ctx.unresolved(label))
        }
        Some(Scope::Root(root)) => Ok(Oid::from(root.arcs)),
        None => Err(ctx.unresolved(label)),
    }
}

/// OID of `module.label`, written explicitly in a value clause.
fn lookup_qualified(ctx: &mut ResolverContext<'_>, module: &str, label: &str) -> Result<Oid> {
    if module == ctx.name() {
        if let Some(index) = ctx.entries.get_index_of(label) {
            return resolve_oid(ctx, index);
        }
    }
    if let Some(oid) = ctx.options.imported(module).and_then(|t| t.oid(label)) {
        return Ok(oid.clone());
    }
    match builtins::lookup(module, label) {
        Some(Builtin::OidRoot(root)) => Ok(Oid::from(root.arcs)),
        _ => Err(Error::UnresolvedReference {
            module: ctx.name().to_owned(),
            label: label.to_owned(),
            reference_module: Some(module.to_owned()),
        }),
    }
}
