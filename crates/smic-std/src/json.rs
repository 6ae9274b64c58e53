//! JSON rendering backend.
//!
//! Emits one document per module: module metadata, every symbol in
//! declaration order with its descriptor, row types and the export table.
//! OIDs in the export table are rendered in dotted notation.

use indexmap::IndexMap;
use serde::Serialize;
use smic_core::model::{Descriptor, QualifiedName, RowType, Texts};
use smic_core::{Backend, CompiledModule};

/// Renders compiled modules as JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonBackend {
    pretty: bool,
}

impl JsonBackend {
    /// Compact output.
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: false }
    }

    /// Indented output.
    #[must_use]
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }
}

/// Rendered module.
#[derive(Serialize)]
struct Document<'a> {
    module: &'a str,
    imports: &'a [QualifiedName],
    texts_retained: bool,
    symbols: Vec<SymbolEntry<'a>>,
    row_types: Vec<&'a RowType>,
    exports: IndexMap<&'a str, ExportEntry>,
}

#[derive(Serialize)]
struct SymbolEntry<'a> {
    label: &'a str,
    mangled: &'a str,
    kind: &'static str,
    descriptor: &'a Descriptor,
    #[serde(skip_serializing_if = "Option::is_none")]
    texts: Option<&'a Texts>,
}

#[derive(Serialize)]
struct ExportEntry {
    mangled: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    oid: Option<String>,
}

impl Backend for JsonBackend {
    type Error = serde_json::Error;

    fn suffix(&self) -> &str {
        ".json"
    }

    fn render(&self, module: &CompiledModule) -> Result<Vec<u8>, serde_json::Error> {
        let table = &module.table;
        let exports = module.export_table();
        let document = Document {
            module: module.name(),
            imports: table.imports(),
            texts_retained: table.texts_retained(),
            symbols: module
                .symbols()
                .map(|symbol| SymbolEntry {
                    label: &symbol.label,
                    mangled: &symbol.mangled,
                    kind: symbol.kind.as_str(),
                    descriptor: &symbol.descriptor,
                    texts: symbol.texts().ok(),
                })
                .collect(),
            row_types: table.row_types().collect(),
            exports: table
                .labels()
                .filter_map(|label| {
                    let mangled = exports.mangled(label)?.to_owned();
                    let oid = exports.oid(label).map(ToString::to_string);
                    Some((label, ExportEntry { mangled, oid }))
                })
                .collect(),
        };

        if self.pretty {
            serde_json::to_vec_pretty(&document)
        } else {
            serde_json::to_vec(&document)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use smic_core::{compile, CompileOptions};

    const SOURCE: &str = r#"TEST-MIB DEFINITIONS ::= BEGIN
        IMPORTS OBJECT-TYPE, enterprises FROM SNMPv2-SMI
                DisplayString FROM SNMPv2-TC;
        test-root OBJECT IDENTIFIER ::= { enterprises 9999 }
        testName OBJECT-TYPE
            SYNTAX DisplayString
            MAX-ACCESS read-only
            STATUS current
            DESCRIPTION "name"
            ::= { test-root 1 }
        END"#;

    fn render(options: &CompileOptions) -> Value {
        let module = compile(SOURCE, options).unwrap();
        let bytes = JsonBackend::new().render(&module).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_document_shape() {
        let doc = render(&CompileOptions::new());
        assert_eq!(doc["module"], "TEST-MIB");
        assert_eq!(doc["texts_retained"], true);
        assert_eq!(doc["symbols"][0]["label"], "test-root");
        assert_eq!(doc["symbols"][0]["mangled"], "test_root");
        assert_eq!(doc["symbols"][0]["kind"], "object-identifier-value");
        assert_eq!(doc["symbols"][1]["kind"], "object-type");
        assert_eq!(doc["symbols"][1]["texts"]["description"], "name");
        assert_eq!(doc["exports"]["test-root"]["oid"], "1.3.6.1.4.1.9999");
        assert_eq!(doc["exports"]["testName"]["oid"], "1.3.6.1.4.1.9999.1");
    }

    #[test]
    fn test_texts_omitted_when_not_retained() {
        let doc = render(&CompileOptions::new().retain_text(false));
        assert_eq!(doc["texts_retained"], false);
        assert!(doc["symbols"][1].get("texts").is_none());
    }

    #[test]
    fn test_pretty_output() {
        let module = compile(SOURCE, &CompileOptions::new()).unwrap();
        let compact = JsonBackend::new().render(&module).unwrap();
        let pretty = JsonBackend::pretty().render(&module).unwrap();
        assert!(!compact.contains(&b'\n'));
        assert!(pretty.contains(&b'\n'));
        assert_eq!(JsonBackend::pretty().suffix(), ".json");
    }
}
