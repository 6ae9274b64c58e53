//! Phase 3: Type resolution.
//!
//! Resolve the descriptor of every type alias and textual convention by
//! walking its SYNTAX chain down to a primitive. Each step inherits from the
//! level below it:
//!
//! - the base primitive passes through unchanged;
//! - a declared constraint replaces the inherited one, with no subset check;
//! - a TC's own DISPLAY-HINT wins, otherwise the inherited hint passes
//!   through, so hints skip over plain aliases but only TCs introduce them;
//! - declared named values replace the inherited ones.
//!
//! Results are memoized per symbol. A symbol met again while it is still
//! being resolved is a cycle.

use tracing::{debug, trace};

use crate::ast::{self, Definition, Ident, NamedNumber, RangeValue, TypeSyntax};
use crate::error::Result;
use crate::model::{
    BaseType, Constraint, NamedValues, QualifiedName, RangeBound, SizeConstraint, Symbol,
    TypeDescriptor, ValueConstraint,
};
use crate::resolver::builtins::Builtin;
use crate::resolver::context::{ImportSource, ResolverContext, Scope, Slot};

/// Resolve every type symbol of the module.
pub fn resolve_types(ctx: &mut ResolverContext<'_>) -> Result<()> {
    let mut resolved = 0usize;
    for index in 0..ctx.entries.len() {
        let is_type = ctx.entry(index).is_some_and(|e| e.kind.is_type());
        if is_type {
            resolve_type(ctx, index)?;
            resolved += 1;
        }
    }
    debug!(module = ctx.name(), types = resolved, "resolved types");
    Ok(())
}

/// Resolved descriptor of the type symbol at `index`.
pub fn resolve_type(ctx: &mut ResolverContext<'_>, index: usize) -> Result<TypeDescriptor> {
    let Some((label, definition)) = ctx.entry(index).map(|e| (e.label, e.definition)) else {
        return Err(ctx.unresolved("<unknown>"));
    };
    match &ctx.types[index] {
        Slot::Resolved(td) => return Ok(td.clone()),
        Slot::InProgress => return Err(ctx.cycle(label)),
        Slot::Pending => {}
    }

    ctx.types[index] = Slot::InProgress;
    ctx.stack.push(label);
    trace!(label, "resolving type");

    let result = match definition {
        Definition::TextualConvention(tc) => {
            resolve_syntax(ctx, &tc.syntax.syntax).map(|mut td| {
                td.textual_convention = true;
                if let Some(hint) = &tc.display_hint {
                    td.display_hint.clone_from(&hint.value);
                }
                td
            })
        }
        Definition::TypeAssignment(def) => resolve_syntax(ctx, &def.syntax),
        _ => Err(ctx.unresolved(label)),
    };

    ctx.stack.pop();
    let td = result?;
    trace!(label, base = %td.base, hint = td.display_hint.as_str(), "resolved type");
    ctx.types[index] = Slot::Resolved(td.clone());
    Ok(td)
}

/// Build the descriptor of a new level with the given syntax.
///
/// The result is never a TC; callers that resolve one set the flag.
pub fn resolve_syntax(ctx: &mut ResolverContext<'_>, syntax: &TypeSyntax) -> Result<TypeDescriptor> {
    let mut td = match syntax {
        TypeSyntax::Builtin(ident) | TypeSyntax::TypeRef(ident) => resolve_named(ctx, ident)?,
        TypeSyntax::OctetString { .. } => TypeDescriptor::primitive(BaseType::OctetString),
        TypeSyntax::ObjectIdentifier { .. } => TypeDescriptor::primitive(BaseType::ObjectIdentifier),
        TypeSyntax::IntegerEnum {
            base: None,
            named_numbers,
            ..
        } => {
            let mut td = TypeDescriptor::primitive(BaseType::Integer32);
            td.named_values = Some(enumeration(named_numbers));
            td
        }
        TypeSyntax::IntegerEnum {
            base: Some(base),
            named_numbers,
            ..
        } => {
            let mut td = resolve_named(ctx, base)?;
            td.named_values = Some(if td.base == BaseType::Bits {
                bit_positions(named_numbers)
            } else {
                enumeration(named_numbers)
            });
            td
        }
        TypeSyntax::Bits { named_bits, .. } => {
            let mut td = TypeDescriptor::primitive(BaseType::Bits);
            td.named_values = Some(bit_positions(named_bits));
            td
        }
        TypeSyntax::Constrained {
            base, constraint, ..
        } => {
            let mut td = resolve_syntax(ctx, base)?;
            td.constraint = Some(resolve_constraint(ctx, td.base, constraint)?);
            td
        }
        TypeSyntax::SequenceOf { entry_type, .. } => {
            return Err(ctx.unresolved(&entry_type.name));
        }
        TypeSyntax::Sequence { fields, .. } => {
            let label = fields.first().map_or("SEQUENCE", |f| f.name.name.as_str());
            return Err(ctx.unresolved(label));
        }
    };
    td.textual_convention = false;
    Ok(td)
}

/// Resolve a named type: a local declaration, an import or a type keyword.
///
/// The returned descriptor's parent is the named type itself, unless it is
/// a bare primitive.
fn resolve_named(ctx: &mut ResolverContext<'_>, ident: &Ident) -> Result<TypeDescriptor> {
    let label = ident.name.as_str();
    match ctx.lookup(label) {
        Some(Scope::Local(index)) => {
            let is_type = ctx.entry(index).is_some_and(|e| e.kind.is_type());
            if !is_type {
                return Err(ctx.unresolved(label));
            }
            let mut td = resolve_type(ctx, index)?;
            td.parent = Some(ctx.local_name(label));
            Ok(td)
        }
        Some(Scope::Imported(index)) => {
            let found = ctx.import(index).and_then(|(_, import)| {
                let parent = QualifiedName::new(&import.module, label);
                match &import.source {
                    ImportSource::Table(table) => table
                        .get(label)
                        .and_then(Symbol::type_descriptor)
                        .cloned()
                        .map(|mut td| {
                            td.parent = Some(parent);
                            td
                        }),
                    ImportSource::Builtin(Builtin::BaseType(base)) => {
                        Some(TypeDescriptor::primitive(*base))
                    }
                    ImportSource::Builtin(Builtin::TextualConvention(tc)) => {
                        let mut td = tc.descriptor();
                        td.parent = Some(parent);
                        Some(td)
                    }
                    ImportSource::Builtin(Builtin::OidRoot(_) | Builtin::Macro) => None,
                }
            });
            found.ok_or_else(|| ctx.unresolved(label))
        }
        Some(Scope::Root(_)) | None => BaseType::from_keyword(label)
            .map(TypeDescriptor::primitive)
            .ok_or_else(|| ctx.unresolved(label)),
    }
}

fn enumeration(named: &[NamedNumber]) -> NamedValues {
    NamedValues::Enumeration(
        named
            .iter()
            .map(|n| (n.name.name.clone(), n.value))
            .collect(),
    )
}

fn bit_positions(named: &[NamedNumber]) -> NamedValues {
    NamedValues::Bits(
        named
            .iter()
            .map(|n| (n.name.name.clone(), clamp_u32(n.value)))
            .collect(),
    )
}

fn clamp_u32(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(if value < 0 { 0 } else { u32::MAX })
}

/// Convert a declared constraint, resolving MIN and MAX against `base`.
fn resolve_constraint(
    ctx: &ResolverContext<'_>,
    base: BaseType,
    constraint: &ast::Constraint,
) -> Result<Constraint> {
    match constraint {
        ast::Constraint::Size { ranges, .. } => {
            let (lo, hi) = base.size_range().unwrap_or((0, u32::MAX));
            let bound = |value: &RangeValue| -> Result<u32> {
                match value {
                    RangeValue::Signed(v) => Ok(clamp_u32(*v)),
                    RangeValue::Unsigned(v) => Ok(u32::try_from(*v).unwrap_or(u32::MAX)),
                    RangeValue::Ident(id) => min_max(ctx, id, lo, hi),
                }
            };
            let ranges = ranges
                .iter()
                .map(|r| {
                    let min = bound(&r.min)?;
                    let max = r.max.as_ref().map_or(Ok(min), bound)?;
                    Ok((min, max))
                })
                .collect::<Result<_>>()?;
            Ok(Constraint::Size(SizeConstraint { ranges }))
        }
        ast::Constraint::Range { ranges, .. } => {
            let (lo, hi) = base
                .value_range()
                .unwrap_or((RangeBound::Signed(i64::MIN), RangeBound::Unsigned(u64::MAX)));
            let bound = |value: &RangeValue| -> Result<RangeBound> {
                match value {
                    RangeValue::Signed(v) => Ok(RangeBound::Signed(*v)),
                    RangeValue::Unsigned(v) => Ok(RangeBound::Unsigned(*v)),
                    RangeValue::Ident(id) => min_max(ctx, id, lo, hi),
                }
            };
            let ranges = ranges
                .iter()
                .map(|r| {
                    let min = bound(&r.min)?;
                    let max = r.max.as_ref().map_or(Ok(min), bound)?;
                    Ok((min, max))
                })
                .collect::<Result<_>>()?;
            Ok(Constraint::Value(ValueConstraint { ranges }))
        }
    }
}

fn min_max<T>(ctx: &ResolverContext<'_>, ident: &Ident, lo: T, hi: T) -> Result<T> {
    match ident.name.as_str() {
        "MIN" => Ok(lo),
        "MAX" => Ok(hi),
        other => Err(ctx.unresolved(other)),
    }
}
