//! Whole-module compilation: notifications, imports, text retention and
//! fatal errors.

use std::sync::Arc;

use smic_core::model::{Descriptor, ObjectSyntax, QualifiedName, SymbolKind};
use smic_core::{compile, CompileOptions, Error, TextNotRetained};
use test_log::test;

const NOTIFICATION_MIB: &str = r#"
    TEST-MIB DEFINITIONS ::= BEGIN
    IMPORTS
      NOTIFICATION-TYPE, OBJECT-TYPE, Integer32
        FROM SNMPv2-SMI;

    testChangeConfigType OBJECT-TYPE
        SYNTAX      Integer32
        MAX-ACCESS  accessible-for-notify
        STATUS      current
        DESCRIPTION "type"
        ::= { 1 3 1 }

    testChangeConfigValue OBJECT-TYPE
        SYNTAX      Integer32
        MAX-ACCESS  accessible-for-notify
        STATUS      current
        DESCRIPTION "value"
        ::= { 1 3 2 }

    testNotificationType NOTIFICATION-TYPE
       OBJECTS         {
                            testChangeConfigType,
                            testChangeConfigValue
                        }
        STATUS          current
        DESCRIPTION
            "A collection of test notification types."
     ::= { 1 3 }

    test-notification-type NOTIFICATION-TYPE
        STATUS          current
        DESCRIPTION     "hyphenated"
     ::= { 1 3 4 }

    END
"#;

#[test]
fn test_notification_type() {
    let module = compile(NOTIFICATION_MIB, &CompileOptions::new()).unwrap();
    let symbol = module.table.get("testNotificationType").unwrap();
    assert_eq!(symbol.kind, SymbolKind::NotificationType);
    assert_eq!(symbol.oid().unwrap().arcs(), [1, 3]);
    assert_eq!(
        symbol.description(),
        Ok(Some("A collection of test notification types."))
    );

    let Descriptor::Notification(notification) = &symbol.descriptor else {
        panic!("expected a notification descriptor");
    };
    assert_eq!(
        notification.objects,
        [
            QualifiedName::new("TEST-MIB", "testChangeConfigType"),
            QualifiedName::new("TEST-MIB", "testChangeConfigValue"),
        ]
    );
    assert!(notification.trap.is_none());
}

#[test]
fn test_notification_type_hyphenated_label() {
    let module = compile(NOTIFICATION_MIB, &CompileOptions::new()).unwrap();
    let symbol = module.table.get_mangled("test_notification_type").unwrap();
    assert_eq!(symbol.label, "test-notification-type");
    assert_eq!(
        module.table.label_of("test_notification_type"),
        Some("test-notification-type")
    );
    let exports = module.export_table();
    assert_eq!(
        exports.oid("test-notification-type").map(ToString::to_string),
        Some("1.3.4".to_owned())
    );
}

#[test]
fn test_notification_unresolved_object() {
    let source = NOTIFICATION_MIB.replacen("testChangeConfigValue\n", "testMissing\n", 1);
    let err = compile(&source, &CompileOptions::new()).unwrap_err();
    assert_eq!(
        err,
        Error::UnresolvedReference {
            module: "TEST-MIB".into(),
            label: "testMissing".into(),
            reference_module: None,
        }
    );
}

#[test]
fn test_texts_not_retained() {
    let options = CompileOptions::new().retain_text(false);
    let module = compile(NOTIFICATION_MIB, &options).unwrap();
    assert!(!module.table.texts_retained());
    let symbol = module.table.get("testNotificationType").unwrap();
    assert_eq!(symbol.description(), Err(TextNotRetained));
    assert_eq!(symbol.status(), Err(TextNotRetained));
    assert_eq!(symbol.reference(), Err(TextNotRetained));
}

#[test]
fn test_declared_absent_text_is_not_an_error() {
    let module = compile(NOTIFICATION_MIB, &CompileOptions::new()).unwrap();
    let symbol = module.table.get("testNotificationType").unwrap();
    assert_eq!(symbol.reference(), Ok(None));
}

#[test]
fn test_hint_survives_disabled_texts() {
    let module = compile(
        r#"TEST-MIB DEFINITIONS ::= BEGIN
        IMPORTS TEXTUAL-CONVENTION FROM SNMPv2-TC;
        TestTC ::= TEXTUAL-CONVENTION
            DISPLAY-HINT "d-2"
            STATUS current
            DESCRIPTION "hinted"
            SYNTAX INTEGER
        END"#,
        &CompileOptions::new().retain_text(false),
    )
    .unwrap();
    let tc = module.table.get("TestTC").unwrap();
    assert_eq!(tc.type_descriptor().unwrap().display_hint, "d-2");
    assert_eq!(tc.description(), Err(TextNotRetained));
}

#[test]
fn test_import_from_compiled_dependency() {
    let base = compile(
        r#"BASE-MIB DEFINITIONS ::= BEGIN
        IMPORTS OBJECT-TYPE, Integer32, enterprises FROM SNMPv2-SMI;
        baseRoot OBJECT IDENTIFIER ::= { enterprises 4242 }
        baseTable OBJECT-TYPE
            SYNTAX SEQUENCE OF BaseEntry
            MAX-ACCESS not-accessible
            STATUS current
            DESCRIPTION "table"
            ::= { baseRoot 1 }
        baseEntry OBJECT-TYPE
            SYNTAX BaseEntry
            MAX-ACCESS not-accessible
            STATUS current
            DESCRIPTION "entry"
            INDEX { baseIndex }
            ::= { baseTable 1 }
        BaseEntry ::= SEQUENCE { baseIndex Integer32 }
        baseIndex OBJECT-TYPE
            SYNTAX Integer32
            MAX-ACCESS read-only
            STATUS current
            DESCRIPTION "index"
            ::= { baseEntry 1 }
        END"#,
        &CompileOptions::new(),
    )
    .unwrap();

    let options = CompileOptions::new().imported_table(Arc::clone(&base.table));
    let module = compile(
        r#"EXT-MIB DEFINITIONS ::= BEGIN
        IMPORTS OBJECT-TYPE FROM SNMPv2-SMI
                baseEntry, baseIndex, baseRoot FROM BASE-MIB;
        extEntry OBJECT-TYPE
            SYNTAX ExtEntry
            MAX-ACCESS not-accessible
            STATUS current
            DESCRIPTION "augmenting row"
            AUGMENTS { baseEntry }
            ::= { baseRoot 2 1 }
        ExtEntry ::= SEQUENCE { extValue INTEGER }
        extValue OBJECT-TYPE
            SYNTAX INTEGER { on(1), off(2) }
            MAX-ACCESS read-write
            STATUS current
            DESCRIPTION "value"
            ::= { extEntry 1 }
        END"#,
        &options,
    )
    .unwrap();

    let Descriptor::Object(entry) = &module.table.get("extEntry").unwrap().descriptor else {
        panic!("expected an object");
    };
    assert_eq!(entry.oid.to_string(), "1.3.6.1.4.1.4242.2.1");
    assert_eq!(entry.syntax, ObjectSyntax::Row { entry: "ExtEntry".into() });
    assert_eq!(entry.augments, Some(QualifiedName::new("BASE-MIB", "baseEntry")));
    assert_eq!(module.table.row_type("ExtEntry").unwrap().columns, ["extValue"]);
    assert_eq!(
        module.table.oid("extValue").map(ToString::to_string),
        Some("1.3.6.1.4.1.4242.2.1.1".to_owned())
    );
}

#[test]
fn test_duplicate_label() {
    let err = compile(
        r#"TEST-MIB DEFINITIONS ::= BEGIN
        testRoot OBJECT IDENTIFIER ::= { 1 3 }
        testRoot OBJECT IDENTIFIER ::= { 1 4 }
        END"#,
        &CompileOptions::new(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        Error::DuplicateSymbol {
            module: "TEST-MIB".into(),
            label: "testRoot".into(),
        }
    );
}

#[test]
fn test_duplicate_mangled_identifier() {
    let err = compile(
        r#"TEST-MIB DEFINITIONS ::= BEGIN
        test-root OBJECT IDENTIFIER ::= { 1 3 }
        test_root OBJECT IDENTIFIER ::= { 1 4 }
        END"#,
        &CompileOptions::new(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::DuplicateSymbol { label, .. } if label == "test_root"));
}

#[test]
fn test_type_cycle() {
    let err = compile(
        r#"TEST-MIB DEFINITIONS ::= BEGIN
        TestSelf ::= TestSelf
        END"#,
        &CompileOptions::new(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        Error::CyclicDerivation {
            module: "TEST-MIB".into(),
            chain: vec!["TestSelf".into(), "TestSelf".into()],
        }
    );
    assert_eq!(
        err.to_string(),
        "cyclic derivation in module TEST-MIB: TestSelf -> TestSelf"
    );
}

#[test]
fn test_unresolved_import_contributes_nothing() {
    let err = compile(
        r#"TEST-MIB DEFINITIONS ::= BEGIN
        IMPORTS ifIndex FROM IF-MIB;
        testRoot OBJECT IDENTIFIER ::= { 1 3 }
        END"#,
        &CompileOptions::new(),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "unresolved reference `ifIndex` in module TEST-MIB (imported from IF-MIB)"
    );
}

#[test]
fn test_syntax_error_is_fatal() {
    let err = compile(
        "TEST-MIB DEFINITIONS ::= BEGIN\n  testRoot OBJECT IDENTIFIER ::= { 1 3\nEND",
        &CompileOptions::new(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Syntax(_)), "{err}");
}

#[test]
fn test_lex_error_is_fatal() {
    let err = compile(
        "TEST-MIB DEFINITIONS ::= BEGIN\n  x OBJECT-TYPE DESCRIPTION \"never closed\nEND",
        &CompileOptions::new(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Lex(_)), "{err}");
}

#[test]
fn test_dash_separator_lines_are_comments() {
    let module = compile(
        "TEST-MIB DEFINITIONS ::= BEGIN\n\
         -----\n\
         testRoot OBJECT IDENTIFIER ::= { 1 3 }\n\
         ---------\n\
         testLeaf OBJECT IDENTIFIER ::= { testRoot 6 } -- leaf -----\n\
         END",
        &CompileOptions::new(),
    )
    .unwrap();
    assert_eq!(module.table.oid("testLeaf").unwrap().to_string(), "1.3.6");
}
