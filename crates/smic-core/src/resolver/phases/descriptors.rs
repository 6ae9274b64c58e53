//! Phase 5: Descriptor assembly.
//!
//! Combine the resolved types and OIDs into one [`Symbol`] per declaration,
//! resolving object syntax and the remaining cross references (INDEX,
//! AUGMENTS, OBJECTS, VARIABLES, ENTERPRISE and group members) on the way.

use tracing::debug;

use super::oids::resolve_oid;
use super::types::{resolve_syntax, resolve_type};
use crate::ast::{
    AccessValue, Definition, Ident, QuotedString, StatusClause, StatusValue, TypeSyntax,
};
use crate::error::Result;
use crate::model::{
    Access, Descriptor, IndexEntry, NotificationDescriptor, ObjectDescriptor, ObjectSyntax,
    QualifiedName, RowType, Status, Symbol, Texts, TrapInfo, ValueDescriptor, ValueOrigin,
};
use crate::resolver::context::{ImportSource, ResolverContext, Scope};

/// Build the symbols and row types of the module, in declaration order.
pub fn build_descriptors(ctx: &mut ResolverContext<'_>) -> Result<(Vec<Symbol>, Vec<RowType>)> {
    let mut symbols = Vec::with_capacity(ctx.entries.len());
    for index in 0..ctx.entries.len() {
        let Some((label, mangled, kind, definition)) = ctx
            .entry(index)
            .map(|e| (e.label, e.mangled.clone(), e.kind, e.definition))
        else {
            continue;
        };
        let (descriptor, texts) = describe(ctx, index, label, definition)?;
        symbols.push(Symbol {
            label: label.to_owned(),
            mangled,
            module: ctx.name().to_owned(),
            kind,
            descriptor,
            texts,
        });
    }

    let rows: Vec<RowType> = ctx
        .rows
        .values()
        .map(|row| RowType {
            label: row.label.to_owned(),
            mangled: row.mangled.clone(),
            columns: row.fields.iter().map(|f| f.name.name.clone()).collect(),
        })
        .collect();

    debug!(
        module = ctx.name(),
        types = symbols.iter().filter(|s| s.kind.is_type()).count(),
        objects = symbols
            .iter()
            .filter(|s| matches!(s.descriptor, Descriptor::Object(_)))
            .count(),
        notifications = symbols
            .iter()
            .filter(|s| matches!(s.descriptor, Descriptor::Notification(_)))
            .count(),
        rows = rows.len(),
        "built descriptors"
    );
    Ok((symbols, rows))
}

fn describe(
    ctx: &mut ResolverContext<'_>,
    index: usize,
    label: &str,
    definition: &Definition,
) -> Result<(Descriptor, Option<Texts>)> {
    Ok(match definition {
        Definition::TypeAssignment(_) => (
            Descriptor::Type(resolve_type(ctx, index)?),
            texts(ctx, label, None, None, None),
        ),
        Definition::TextualConvention(def) => (
            Descriptor::Type(resolve_type(ctx, index)?),
            texts(
                ctx,
                label,
                Some(&def.status),
                Some(&def.description),
                def.reference.as_ref(),
            ),
        ),
        Definition::ObjectType(def) => {
            let oid = resolve_oid(ctx, index)?;
            let syntax = object_syntax(ctx, &def.syntax.syntax)?;
            let index_entries = match &def.index {
                Some(clause) => clause
                    .items
                    .iter()
                    .map(|item| {
                        Ok(IndexEntry {
                            object: qualify(ctx, &item.object)?,
                            implied: item.implied,
                        })
                    })
                    .collect::<Result<_>>()?,
                None => Vec::new(),
            };
            let augments = match &def.augments {
                Some(clause) => Some(qualify(ctx, &clause.target)?),
                None => None,
            };
            let descriptor = ObjectDescriptor {
                oid,
                syntax,
                access: def.access.as_ref().map(|a| access(a.value)),
                units: def.units.as_ref().map(|u| u.value.clone()),
                index: index_entries,
                augments,
                defval: def.defval.as_ref().map(|d| d.text.clone()),
            };
            (
                Descriptor::Object(descriptor),
                texts(
                    ctx,
                    label,
                    def.status.as_ref(),
                    def.description.as_ref(),
                    def.reference.as_ref(),
                ),
            )
        }
        Definition::NotificationType(def) => (
            Descriptor::Notification(NotificationDescriptor {
                oid: resolve_oid(ctx, index)?,
                objects: qualify_all(ctx, &def.objects)?,
                trap: None,
            }),
            texts(
                ctx,
                label,
                Some(&def.status),
                Some(&def.description),
                def.reference.as_ref(),
            ),
        ),
        Definition::TrapType(def) => (
            Descriptor::Notification(NotificationDescriptor {
                oid: resolve_oid(ctx, index)?,
                objects: qualify_all(ctx, &def.variables)?,
                trap: Some(TrapInfo {
                    enterprise: qualify(ctx, &def.enterprise)?,
                    number: def.trap_number,
                }),
            }),
            texts(
                ctx,
                label,
                None,
                def.description.as_ref(),
                def.reference.as_ref(),
            ),
        ),
        Definition::ValueAssignment(_) => (
            value(ctx, index, ValueOrigin::ValueAssignment, Vec::new())?,
            texts(ctx, label, None, None, None),
        ),
        Definition::ModuleIdentity(def) => (
            value(ctx, index, ValueOrigin::ModuleIdentity, Vec::new())?,
            texts(ctx, label, None, Some(&def.description), None),
        ),
        Definition::ObjectIdentity(def) => (
            value(ctx, index, ValueOrigin::ObjectIdentity, Vec::new())?,
            texts(
                ctx,
                label,
                Some(&def.status),
                Some(&def.description),
                def.reference.as_ref(),
            ),
        ),
        Definition::ObjectGroup(def) => {
            let members = qualify_all(ctx, &def.objects)?;
            (
                value(ctx, index, ValueOrigin::ObjectGroup, members)?,
                texts(
                    ctx,
                    label,
                    Some(&def.status),
                    Some(&def.description),
                    def.reference.as_ref(),
                ),
            )
        }
        Definition::NotificationGroup(def) => {
            let members = qualify_all(ctx, &def.notifications)?;
            (
                value(ctx, index, ValueOrigin::NotificationGroup, members)?,
                texts(
                    ctx,
                    label,
                    Some(&def.status),
                    Some(&def.description),
                    def.reference.as_ref(),
                ),
            )
        }
        Definition::ModuleCompliance(def) => (
            value(ctx, index, ValueOrigin::ModuleCompliance, Vec::new())?,
            texts(
                ctx,
                label,
                Some(&def.status),
                Some(&def.description),
                def.reference.as_ref(),
            ),
        ),
        Definition::AgentCapabilities(def) => (
            value(ctx, index, ValueOrigin::AgentCapabilities, Vec::new())?,
            texts(
                ctx,
                label,
                Some(&def.status),
                Some(&def.description),
                def.reference.as_ref(),
            ),
        ),
        Definition::MacroDefinition(_) => return Err(ctx.unresolved(label)),
    })
}

fn value(
    ctx: &mut ResolverContext<'_>,
    index: usize,
    origin: ValueOrigin,
    members: Vec<QualifiedName>,
) -> Result<Descriptor> {
    Ok(Descriptor::Value(ValueDescriptor {
        oid: resolve_oid(ctx, index)?,
        origin,
        members,
    }))
}

/// Resolve an OBJECT-TYPE SYNTAX.
fn object_syntax(ctx: &mut ResolverContext<'_>, syntax: &TypeSyntax) -> Result<ObjectSyntax> {
    match syntax {
        TypeSyntax::SequenceOf { entry_type, .. } => {
            let label = entry_type.name.as_str();
            if is_row(ctx, label) {
                Ok(ObjectSyntax::Table {
                    entry: label.to_owned(),
                })
            } else {
                Err(ctx.unresolved(label))
            }
        }
        TypeSyntax::TypeRef(ident) if is_row(ctx, &ident.name) => Ok(ObjectSyntax::Row {
            entry: ident.name.clone(),
        }),
        other => resolve_syntax(ctx, other).map(ObjectSyntax::Scalar),
    }
}

fn is_row(ctx: &ResolverContext<'_>, label: &str) -> bool {
    ctx.rows.contains_key(label)
        || ctx.imports.get(label).is_some_and(|import| {
            matches!(&import.source, ImportSource::Table(t) if t.row_type(label).is_some())
        })
}

/// Fully qualified name of a referenced symbol.
fn qualify(ctx: &ResolverContext<'_>, ident: &Ident) -> Result<QualifiedName> {
    let label = ident.name.as_str();
    match ctx.lookup(label) {
        Some(Scope::Local(_)) => Ok(ctx.local_name(label)),
        Some(Scope::Imported(index)) => ctx
            .import(index)
            .map(|(_, import)| QualifiedName::new(&import.module, label))
            .ok_or_else(|| ctx.unresolved(label)),
        Some(Scope::Root(_)) | None => Err(ctx.unresolved(label)),
    }
}

fn qualify_all(ctx: &ResolverContext<'_>, idents: &[Ident]) -> Result<Vec<QualifiedName>> {
    idents.iter().map(|ident| qualify(ctx, ident)).collect()
}

/// Retained texts of a declaration, or `None` when retention is disabled.
fn texts(
    ctx: &ResolverContext<'_>,
    label: &str,
    status: Option<&StatusClause>,
    description: Option<&QuotedString>,
    reference: Option<&QuotedString>,
) -> Option<Texts> {
    let options = ctx.options;
    if !options.retains_text() {
        return None;
    }
    Some(Texts {
        status: status.map(|s| self::status(s.value)),
        description: description.map(|d| options.filter_text(label, &d.value)),
        reference: reference.map(|r| options.filter_text(label, &r.value)),
    })
}

fn status(value: StatusValue) -> Status {
    match value {
        StatusValue::Current => Status::Current,
        StatusValue::Deprecated => Status::Deprecated,
        StatusValue::Obsolete => Status::Obsolete,
        StatusValue::Mandatory => Status::Mandatory,
        StatusValue::Optional => Status::Optional,
    }
}

fn access(value: AccessValue) -> Access {
    match value {
        AccessValue::ReadOnly => Access::ReadOnly,
        AccessValue::ReadWrite => Access::ReadWrite,
        AccessValue::ReadCreate => Access::ReadCreate,
        AccessValue::NotAccessible => Access::NotAccessible,
        AccessValue::AccessibleForNotify => Access::AccessibleForNotify,
        AccessValue::WriteOnly => Access::WriteOnly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::BaseType;
    use crate::options::CompileOptions;
    use crate::parser::parse;
    use crate::resolver::phases::{
        register_definitions, resolve_imports, resolve_oids, resolve_types,
    };

    fn build(source: &str, options: &CompileOptions) -> Result<(Vec<Symbol>, Vec<RowType>)> {
        let module = parse(source).unwrap();
        let mut ctx = ResolverContext::new(&module, options);
        register_definitions(&mut ctx)?;
        resolve_imports(&mut ctx)?;
        resolve_types(&mut ctx)?;
        resolve_oids(&mut ctx)?;
        build_descriptors(&mut ctx)
    }

    const TABLE: &str = "TEST-MIB DEFINITIONS ::= BEGIN
        IMPORTS OBJECT-TYPE, Integer32, enterprises FROM SNMPv2-SMI
                DisplayString FROM SNMPv2-TC;
        testTable OBJECT-TYPE
            SYNTAX SEQUENCE OF TestEntry
            MAX-ACCESS not-accessible
            STATUS current
            DESCRIPTION \"table\"
            ::= { enterprises 9999 1 }
        testEntry OBJECT-TYPE
            SYNTAX TestEntry
            MAX-ACCESS not-accessible
            STATUS current
            DESCRIPTION \"row\"
            INDEX { testIndex, IMPLIED testName }
            ::= { testTable 1 }
        TestEntry ::= SEQUENCE { testIndex Integer32, testName DisplayString }
        testIndex OBJECT-TYPE
            SYNTAX Integer32 (1..100)
            MAX-ACCESS not-accessible
            STATUS current
            DESCRIPTION \"index\"
            ::= { testEntry 1 }
        testName OBJECT-TYPE
            SYNTAX DisplayString (SIZE (0..32))
            UNITS \"chars\"
            MAX-ACCESS read-only
            STATUS current
            DESCRIPTION \"name\"
            DEFVAL { \"none\" }
            ::= { testEntry 2 }
        END";

    #[test]
    fn test_table_row_and_columns() {
        let (symbols, rows) = build(TABLE, &CompileOptions::new()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].columns, ["testIndex", "testName"]);

        let Descriptor::Object(table) = &symbols[0].descriptor else {
            panic!("expected object");
        };
        assert_eq!(table.syntax, ObjectSyntax::Table { entry: "TestEntry".into() });
        assert_eq!(table.oid.to_string(), "1.3.6.1.4.1.9999.1");

        let Descriptor::Object(entry) = &symbols[1].descriptor else {
            panic!("expected object");
        };
        assert_eq!(entry.syntax, ObjectSyntax::Row { entry: "TestEntry".into() });
        assert_eq!(entry.index.len(), 2);
        assert_eq!(entry.index[1].object, QualifiedName::new("TEST-MIB", "testName"));
        assert!(entry.index[1].implied);

        let Descriptor::Object(name) = &symbols[3].descriptor else {
            panic!("expected object");
        };
        let ObjectSyntax::Scalar(td) = &name.syntax else {
            panic!("expected scalar");
        };
        assert_eq!(td.base, BaseType::OctetString);
        assert_eq!(td.display_hint, "255a");
        assert_eq!(td.parent, Some(QualifiedName::new("SNMPv2-TC", "DisplayString")));
        assert_eq!(name.units.as_deref(), Some("chars"));
        assert_eq!(name.defval.as_deref(), Some("\"none\""));
        assert_eq!(name.access, Some(Access::ReadOnly));
        assert_eq!(symbols[3].description(), Ok(Some("name")));
    }

    #[test]
    fn test_unresolved_index() {
        let err = build(
            &TABLE.replace("INDEX { testIndex, IMPLIED testName }", "INDEX { missingIndex }"),
            &CompileOptions::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnresolvedReference { label, .. } if label == "missingIndex"));
    }

    #[test]
    fn test_texts_filtered_or_dropped() {
        let options = CompileOptions::new().text_filter(|label, text| format!("{label}: {text}"));
        let (symbols, _) = build(TABLE, &options).unwrap();
        assert_eq!(symbols[0].description(), Ok(Some("testTable: table")));
        assert_eq!(symbols[0].status(), Ok(Some(Status::Current)));

        let (symbols, _) = build(TABLE, &CompileOptions::new().retain_text(false)).unwrap();
        assert!(symbols.iter().all(|s| s.texts().is_err()));
    }

    #[test]
    fn test_groups_and_traps() {
        let (symbols, _) = build(
            "TEST-MIB DEFINITIONS ::= BEGIN
             IMPORTS enterprises FROM SNMPv2-SMI;
             testRoot OBJECT IDENTIFIER ::= { enterprises 1 }
             testTrap TRAP-TYPE
                 ENTERPRISE testRoot
                 VARIABLES { testRoot }
                 DESCRIPTION \"trap\"
                 ::= 2
             testGroup OBJECT-GROUP
                 OBJECTS { testRoot }
                 STATUS current
                 DESCRIPTION \"group\"
                 ::= { testRoot 3 }
             END",
            &CompileOptions::new(),
        )
        .unwrap();

        let Descriptor::Notification(trap) = &symbols[1].descriptor else {
            panic!("expected notification");
        };
        assert_eq!(trap.oid.to_string(), "1.3.6.1.4.1.1.0.2");
        assert_eq!(trap.objects, [QualifiedName::new("TEST-MIB", "testRoot")]);
        assert_eq!(trap.trap.as_ref().map(|t| t.number), Some(2));
        assert_eq!(symbols[1].status(), Ok(None));

        let Descriptor::Value(group) = &symbols[2].descriptor else {
            panic!("expected value");
        };
        assert_eq!(group.origin, ValueOrigin::ObjectGroup);
        assert_eq!(group.members.len(), 1);
    }
}
