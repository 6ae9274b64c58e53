//! Multi-module compilation.
//!
//! The [`Compiler`] discovers the import closure of the requested modules,
//! orders it topologically and compiles each module against the frozen
//! tables of its dependencies. Base modules never reach the reader; they are
//! satisfied by the built-in definitions of `smic-core`.
//!
//! Modules are keyed by the name their source declares. A module requested
//! under another name is recorded in [`CompileReport::renamed`].
//!
//! A module that fails contributes nothing. Modules importing it are skipped
//! with [`ModuleStatus::DependencyFailed`], while independent modules still
//! compile.

use std::collections::{HashMap, HashSet, VecDeque};
use std::error::Error as StdError;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use smic_core::ast;
use smic_core::lexer::{Lexer, TokenKind};
use smic_core::resolver::{has_legacy_exports, is_base_module, resolve};
use smic_core::{parse_module, Backend, CompileOptions, CompiledModule, SymbolTable};
use thiserror::Error;
use tracing::{debug, debug_span, info, warn};

use crate::borrower::{Borrower, CacheBorrower};
use crate::reader::{FileReader, Reader, ReaderError, Source, DEFAULT_EXTENSIONS};
use crate::writer::Writer;

/// Orchestration failure that aborts the whole run.
#[derive(Debug, Error)]
pub enum CompilerError {
    /// Modules import each other.
    #[error("import cycle: {}", .0.join(" -> "))]
    ImportCycle(Vec<String>),
    /// A module was found but could not be read.
    #[error(transparent)]
    Reader(#[from] ReaderError),
    /// A backend could not render a module.
    #[error("cannot render {module}: {source}")]
    Render {
        /// Module being rendered.
        module: String,
        /// Backend error.
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
    /// Rendered output could not be written.
    #[error("cannot write {module}: {source}")]
    Write {
        /// Module being written.
        module: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// Outcome for one module of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModuleStatus {
    /// Compiled from source in this run.
    Compiled,
    /// Reused from the borrower.
    Borrowed,
    /// A base module known to the compiler core, or a legacy module without
    /// source whose common exports are built in.
    BuiltIn,
    /// No reader knows the module.
    Missing,
    /// Compilation failed.
    Failed(smic_core::Error),
    /// Skipped because the named import did not succeed.
    DependencyFailed(String),
}

impl ModuleStatus {
    /// True when the module's symbols are available to importers.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Compiled | Self::Borrowed | Self::BuiltIn)
    }

    /// Short label for status lines.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Compiled => "compiled",
            Self::Borrowed => "borrowed",
            Self::BuiltIn => "built-in",
            Self::Missing => "missing",
            Self::Failed(_) => "failed",
            Self::DependencyFailed(_) => "dependency failed",
        }
    }
}

/// Result of [`Compiler::compile`].
#[derive(Debug, Default)]
pub struct CompileReport {
    /// Status of every module reached, requested or imported.
    pub statuses: IndexMap<String, ModuleStatus>,
    /// Tables of compiled and borrowed modules, in dependency order.
    pub tables: IndexMap<String, Arc<SymbolTable>>,
    /// Requested names whose source declares another module, mapped to the
    /// declared name.
    pub renamed: IndexMap<String, String>,
}

impl CompileReport {
    /// Status of `module`, if it was reached.
    #[must_use]
    pub fn status(&self, module: &str) -> Option<&ModuleStatus> {
        self.statuses.get(self.declared(module))
    }

    /// Table of `module`, if it compiled or was borrowed.
    #[must_use]
    pub fn table(&self, module: &str) -> Option<&Arc<SymbolTable>> {
        self.tables.get(self.declared(module))
    }

    /// Name the source requested as `module` declares.
    #[must_use]
    pub fn declared<'a>(&'a self, module: &'a str) -> &'a str {
        self.renamed.get(module).map_or(module, String::as_str)
    }

    /// Modules that did not succeed.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &ModuleStatus)> {
        self.statuses
            .iter()
            .filter(|(_, status)| !status.is_success())
            .map(|(name, status)| (name.as_str(), status))
    }
}

/// Settings for a filesystem-backed [`Compiler`].
#[derive(Clone, Debug)]
pub struct CompilerConfig {
    /// Directories searched for module sources, in order.
    pub search_dirs: Vec<PathBuf>,
    /// Candidate file extensions, tried in order after each directory.
    pub extensions: Vec<String>,
    /// Keep STATUS, DESCRIPTION and REFERENCE.
    pub retain_text: bool,
    /// Where compiled tables are cached, if anywhere.
    pub cache_dir: Option<PathBuf>,
    /// Ignore cached tables and compile everything from source.
    pub rebuild: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            search_dirs: Vec::new(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|&e| e.to_owned()).collect(),
            retain_text: true,
            cache_dir: None,
            rebuild: false,
        }
    }
}

/// Discovered module awaiting compilation. Exactly one of `ast` and
/// `borrowed` is set.
struct Pending {
    source: Source,
    imports: Vec<String>,
    ast: Option<ast::Module>,
    borrowed: Option<Arc<SymbolTable>>,
}

/// Compiles modules together with their imports.
pub struct Compiler {
    reader: Box<dyn Reader>,
    borrower: Option<Box<dyn Borrower>>,
    options: CompileOptions,
    rebuild: bool,
}

impl Compiler {
    /// Compiler reading from `reader`, with default options and no borrower.
    #[must_use]
    pub fn new(reader: impl Reader + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            borrower: None,
            options: CompileOptions::new(),
            rebuild: false,
        }
    }

    /// Filesystem compiler described by `config`.
    #[must_use]
    pub fn from_config(config: &CompilerConfig) -> Self {
        let reader = FileReader::new(config.search_dirs.iter().cloned())
            .with_extensions(config.extensions.iter().cloned());
        let mut compiler = Self::new(reader)
            .options(CompileOptions::new().retain_text(config.retain_text))
            .rebuild(config.rebuild);
        if let Some(dir) = &config.cache_dir {
            compiler = compiler.borrower(CacheBorrower::new(dir, config.retain_text));
        }
        compiler
    }

    /// Options applied to every module. Imported tables are added per module.
    #[must_use]
    pub fn options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Reuse and store compiled tables through `borrower`.
    #[must_use]
    pub fn borrower(mut self, borrower: impl Borrower + 'static) -> Self {
        self.borrower = Some(Box::new(borrower));
        self
    }

    /// Never borrow; still store freshly compiled tables.
    #[must_use]
    pub fn rebuild(mut self, rebuild: bool) -> Self {
        self.rebuild = rebuild;
        self
    }

    /// Compile `modules` and everything they import.
    ///
    /// # Errors
    ///
    /// Returns an error for an import cycle or an unreadable source. Failures
    /// of individual modules are reported in the [`CompileReport`] instead.
    pub fn compile<S: AsRef<str>>(&self, modules: &[S]) -> Result<CompileReport, CompilerError> {
        let mut report = CompileReport::default();
        let pending = self.discover(modules, &mut report)?;
        let order = order(&pending, &report)?;

        // Modules rebuilt in this run; borrowing on top of them could be stale.
        let mut rebuilt = HashSet::new();

        for name in order {
            let Some(module) = pending.get(name) else {
                continue;
            };
            let failed = module
                .imports
                .iter()
                .find(|dep| !report.status(dep).is_some_and(ModuleStatus::is_success));
            if let Some(dep) = failed {
                warn!(module = %name, dependency = %dep, "skipping module, dependency failed");
                report
                    .statuses
                    .insert(name.to_owned(), ModuleStatus::DependencyFailed(dep.clone()));
                continue;
            }

            if let Some(table) = &module.borrowed {
                if !module
                    .imports
                    .iter()
                    .any(|dep| rebuilt.contains(report.declared(dep)))
                {
                    info!(module = %name, "borrowed from cache");
                    report.statuses.insert(name.to_owned(), ModuleStatus::Borrowed);
                    report.tables.insert(name.to_owned(), Arc::clone(table));
                    continue;
                }
                debug!(module = %name, "dependency rebuilt, cached table dropped");
            }

            match self.compile_one(module, &report) {
                Ok(table) => {
                    info!(module = %name, symbols = table.len(), "compiled");
                    if let Some(borrower) = &self.borrower {
                        if let Err(e) = borrower.store(&table, &module.source) {
                            warn!(module = %name, error = %e, "cannot cache compiled table");
                        }
                    }
                    rebuilt.insert(name);
                    report.statuses.insert(name.to_owned(), ModuleStatus::Compiled);
                    report.tables.insert(name.to_owned(), Arc::new(table));
                }
                Err(e) => {
                    warn!(module = %name, error = %e, "compilation failed");
                    report.statuses.insert(name.to_owned(), ModuleStatus::Failed(e));
                }
            }
        }

        Ok(report)
    }

    /// Compile `modules`, then render every compiled or borrowed module
    /// through `backend` and hand the output to `writer`.
    ///
    /// # Errors
    ///
    /// As [`Compiler::compile`], plus rendering and writing failures.
    pub fn compile_and_write<S, B>(
        &self,
        modules: &[S],
        backend: &B,
        writer: &dyn Writer,
    ) -> Result<CompileReport, CompilerError>
    where
        S: AsRef<str>,
        B: Backend,
    {
        let report = self.compile(modules)?;
        for (name, table) in &report.tables {
            let compiled = CompiledModule::new(Arc::clone(table));
            let bytes = backend.render(&compiled).map_err(|e| CompilerError::Render {
                module: name.clone(),
                source: Box::new(e),
            })?;
            writer
                .write(name, backend.suffix(), &bytes)
                .map_err(|source| CompilerError::Write {
                    module: name.clone(),
                    source,
                })?;
            debug!(module = %name, bytes = bytes.len(), "wrote output");
        }
        Ok(report)
    }

    /// Breadth-first walk of the import closure.
    fn discover<S: AsRef<str>>(
        &self,
        modules: &[S],
        report: &mut CompileReport,
    ) -> Result<IndexMap<String, Pending>, CompilerError> {
        let mut pending = IndexMap::new();
        let mut queue: VecDeque<String> =
            modules.iter().map(|m| m.as_ref().to_owned()).collect();

        while let Some(name) = queue.pop_front() {
            if pending.contains_key(&name)
                || report.statuses.contains_key(&name)
                || report.renamed.contains_key(&name)
            {
                continue;
            }
            if is_base_module(&name) {
                debug!(module = %name, "base module");
                report.statuses.insert(name, ModuleStatus::BuiltIn);
                continue;
            }
            let Some(source) = self.reader.read(&name)? else {
                if has_legacy_exports(&name) {
                    debug!(module = %name, "no source, using built-in legacy exports");
                    report.statuses.insert(name, ModuleStatus::BuiltIn);
                } else {
                    warn!(module = %name, "module not found");
                    report.statuses.insert(name, ModuleStatus::Missing);
                }
                continue;
            };

            let borrowed = match (&self.borrower, declared_name(&source.text)) {
                (Some(borrower), Some(declared)) if !self.rebuild => {
                    borrower.borrow(declared, &source)
                }
                _ => None,
            };
            let (declared, imports, ast) = match borrowed.as_deref() {
                Some(table) => (
                    table.module().to_owned(),
                    unique(table.imports().iter().map(|q| q.module.as_str())),
                    None,
                ),
                None => match parse_module(&source.text) {
                    Ok(module) => (
                        module.name.name.clone(),
                        unique(module.imports.iter().map(|c| c.from_module.name.as_str())),
                        Some(module),
                    ),
                    Err(e) => {
                        warn!(module = %name, error = %e, "compilation failed");
                        report.statuses.insert(name, ModuleStatus::Failed(e));
                        continue;
                    }
                },
            };

            if declared != name {
                warn!(module = %name, %declared, "module name differs from requested name");
                report.renamed.insert(name, declared.clone());
                if pending.contains_key(&declared) || report.statuses.contains_key(&declared) {
                    debug!(module = %declared, "already discovered");
                    continue;
                }
            }

            debug!(module = %declared, imports = imports.len(), "discovered module");
            queue.extend(imports.iter().cloned());
            pending.insert(
                declared,
                Pending {
                    source,
                    imports,
                    ast,
                    borrowed,
                },
            );
        }

        Ok(pending)
    }

    fn compile_one(
        &self,
        module: &Pending,
        report: &CompileReport,
    ) -> Result<SymbolTable, smic_core::Error> {
        let _span = debug_span!("compile", module = %module.source.module).entered();
        let parsed;
        let ast = match &module.ast {
            Some(ast) => ast,
            // Borrowed in discovery, then dropped for a rebuilt dependency.
            None => {
                parsed = parse_module(&module.source.text)?;
                &parsed
            }
        };
        let options = self.options.clone().imported_tables(
            module
                .imports
                .iter()
                .filter_map(|dep| report.table(dep).cloned()),
        );
        resolve(ast, &options)
    }
}

/// Module name a source declares, read from its first token.
fn declared_name(text: &str) -> Option<&str> {
    match Lexer::new(text).next()? {
        Ok(token) if token.kind == TokenKind::UppercaseIdent => Some(token.text),
        _ => None,
    }
}

/// Distinct module names in first-seen order.
fn unique<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.iter().any(|n| n == name) {
            out.push(name.to_owned());
        }
    }
    out
}

/// Topological order of the discovered modules, dependencies first.
fn order<'a>(
    pending: &'a IndexMap<String, Pending>,
    report: &CompileReport,
) -> Result<Vec<&'a str>, CompilerError> {
    let mut graph = DiGraph::<&str, ()>::new();
    let nodes: HashMap<&str, NodeIndex> = pending
        .keys()
        .map(|name| (name.as_str(), graph.add_node(name.as_str())))
        .collect();

    for (name, module) in pending {
        let to = nodes[name.as_str()];
        for dep in &module.imports {
            if let Some(&from) = nodes.get(report.declared(dep)) {
                graph.add_edge(from, to, ());
            }
        }
    }

    match toposort(&graph, None) {
        Ok(sorted) => Ok(sorted.into_iter().map(|idx| graph[idx]).collect()),
        Err(cycle) => {
            let start = cycle.node_id();
            let mut members = tarjan_scc(&graph)
                .into_iter()
                .find(|scc| scc.contains(&start))
                .unwrap_or_else(|| vec![start])
                .into_iter()
                .map(|idx| graph[idx].to_owned())
                .collect::<Vec<_>>();
            members.sort();
            Err(CompilerError::ImportCycle(members))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::MemoryReader;
    use test_log::test;

    fn mib(name: &str, imports: &str, body: &str) -> String {
        format!("{name} DEFINITIONS ::= BEGIN\nIMPORTS {imports};\n{body}\nEND\n")
    }

    #[test]
    fn test_dependency_order() {
        let reader = MemoryReader::new()
            .with(
                "TOP-MIB",
                mib("TOP-MIB", "midRoot FROM MID-MIB", "topRoot OBJECT IDENTIFIER ::= { midRoot 1 }"),
            )
            .with(
                "MID-MIB",
                mib("MID-MIB", "enterprises FROM SNMPv2-SMI", "midRoot OBJECT IDENTIFIER ::= { enterprises 7 }"),
            );
        let report = Compiler::new(reader).compile(&["TOP-MIB"]).unwrap();

        assert_eq!(report.status("SNMPv2-SMI"), Some(&ModuleStatus::BuiltIn));
        assert_eq!(report.status("MID-MIB"), Some(&ModuleStatus::Compiled));
        assert_eq!(report.status("TOP-MIB"), Some(&ModuleStatus::Compiled));
        assert_eq!(report.tables.keys().collect::<Vec<_>>(), ["MID-MIB", "TOP-MIB"]);
        assert_eq!(
            report.table("TOP-MIB").unwrap().oid("topRoot").unwrap().to_string(),
            "1.3.6.1.4.1.7.1"
        );
    }

    #[test]
    fn test_import_cycle() {
        let reader = MemoryReader::new()
            .with("A-MIB", mib("A-MIB", "bRoot FROM B-MIB", "aRoot OBJECT IDENTIFIER ::= { bRoot 1 }"))
            .with("B-MIB", mib("B-MIB", "aRoot FROM A-MIB", "bRoot OBJECT IDENTIFIER ::= { aRoot 1 }"));
        let err = Compiler::new(reader).compile(&["A-MIB"]).unwrap_err();
        assert!(
            matches!(&err, CompilerError::ImportCycle(members) if members == &["A-MIB", "B-MIB"]),
            "{err}"
        );
    }

    #[test]
    fn test_failure_isolated() {
        let reader = MemoryReader::new()
            .with("BAD-MIB", "BAD-MIB DEFINITIONS ::= BEGIN\nbadRoot OBJECT IDENTIFIER ::= { 1 3\nEND")
            .with("USER-MIB", mib("USER-MIB", "badRoot FROM BAD-MIB", "u OBJECT IDENTIFIER ::= { badRoot 1 }"))
            .with("GOOD-MIB", mib("GOOD-MIB", "iso FROM SNMPv2-SMI", "g OBJECT IDENTIFIER ::= { iso 3 }"));
        let report = Compiler::new(reader)
            .compile(&["USER-MIB", "GOOD-MIB", "GONE-MIB"])
            .unwrap();

        assert!(matches!(report.status("BAD-MIB"), Some(ModuleStatus::Failed(_))));
        assert_eq!(
            report.status("USER-MIB"),
            Some(&ModuleStatus::DependencyFailed("BAD-MIB".into()))
        );
        assert_eq!(report.status("GOOD-MIB"), Some(&ModuleStatus::Compiled));
        assert_eq!(report.status("GONE-MIB"), Some(&ModuleStatus::Missing));
        assert_eq!(
            report.failures().map(|(name, _)| name).collect::<Vec<_>>(),
            ["GONE-MIB", "BAD-MIB", "USER-MIB"]
        );
    }

    #[test]
    fn test_keyed_by_declared_name() {
        let reader = MemoryReader::new()
            .with(
                "app",
                mib("APP-MIB", "libRoot FROM LIB-MIB", "appRoot OBJECT IDENTIFIER ::= { libRoot 2 }"),
            )
            .with(
                "LIB-MIB",
                mib("LIB-MIB", "enterprises FROM SNMPv2-SMI", "libRoot OBJECT IDENTIFIER ::= { enterprises 5 }"),
            );
        let report = Compiler::new(reader).compile(&["app", "APP-MIB"]).unwrap();

        assert_eq!(report.renamed.get("app").map(String::as_str), Some("APP-MIB"));
        assert!(!report.statuses.contains_key("app"));
        assert_eq!(report.status("APP-MIB"), Some(&ModuleStatus::Compiled));
        assert_eq!(report.status("app"), Some(&ModuleStatus::Compiled));
        assert_eq!(report.tables.keys().collect::<Vec<_>>(), ["LIB-MIB", "APP-MIB"]);
        assert_eq!(report.table("app").unwrap().module(), "APP-MIB");
    }

    #[test]
    fn test_renamed_dependency_ordered_first() {
        let reader = MemoryReader::new()
            .with("TOP-MIB", mib("TOP-MIB", "midRoot FROM MID-MIB", "topRoot OBJECT IDENTIFIER ::= { 1 3 }"))
            .with("MID-MIB", mib("MID-MIB-V2", "iso FROM SNMPv2-SMI", "midRoot OBJECT IDENTIFIER ::= { iso 3 }"));
        let report = Compiler::new(reader).compile(&["TOP-MIB"]).unwrap();

        assert_eq!(report.declared("MID-MIB"), "MID-MIB-V2");
        assert_eq!(report.status("MID-MIB-V2"), Some(&ModuleStatus::Compiled));
        // The table declares another module, so the import cannot resolve.
        let Some(ModuleStatus::Failed(e)) = report.status("TOP-MIB") else {
            panic!("expected a failure");
        };
        assert!(matches!(e, smic_core::Error::UnresolvedReference { label, .. } if label == "midRoot"));
    }

    #[test]
    fn test_legacy_module_without_source() {
        let reader = MemoryReader::new().with(
            "OLD-MIB",
            mib(
                "OLD-MIB",
                "mib-2, DisplayString FROM RFC1213-MIB OBJECT-TYPE FROM RFC-1212",
                "old OBJECT IDENTIFIER ::= { mib-2 99 }",
            ),
        );
        let report = Compiler::new(reader).compile(&["OLD-MIB"]).unwrap();
        assert_eq!(report.status("RFC1213-MIB"), Some(&ModuleStatus::BuiltIn));
        assert_eq!(report.status("OLD-MIB"), Some(&ModuleStatus::Compiled));
        assert_eq!(
            report.table("OLD-MIB").unwrap().oid("old").unwrap().to_string(),
            "1.3.6.1.2.1.99"
        );
    }

    #[test]
    fn test_resolution_failure_reported() {
        let reader = MemoryReader::new().with(
            "A-MIB",
            mib("A-MIB", "iso FROM SNMPv2-SMI", "a OBJECT IDENTIFIER ::= { nowhere 1 }"),
        );
        let report = Compiler::new(reader).compile(&["A-MIB"]).unwrap();
        let Some(ModuleStatus::Failed(e)) = report.status("A-MIB") else {
            panic!("expected a failure");
        };
        assert!(matches!(e, smic_core::Error::UnresolvedReference { label, .. } if label == "nowhere"));
        assert!(report.table("A-MIB").is_none());
    }
}
