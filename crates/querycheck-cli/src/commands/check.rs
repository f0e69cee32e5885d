use std::path::PathBuf;

use querycheck_lib::{CheckConfig, QueryChecker};

use super::analyzer::RootEntityAnalyzer;
use super::loader::{exit_with, load_call_sites, load_types, read_file};

pub struct CheckArgs {
    pub types: PathBuf,
    pub calls: PathBuf,
    pub source: Option<PathBuf>,
    pub check_bindings: bool,
    pub fallback_to_subtypes: bool,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let types = load_types(&args.types).unwrap_or_else(|e| exit_with(e));
    let sites = load_call_sites(&args.calls).unwrap_or_else(|e| exit_with(e));
    let source = args
        .source
        .as_deref()
        .map(|path| read_file(path).unwrap_or_else(|e| exit_with(e)));

    let config = CheckConfig::default()
        .with_check_bindings(args.check_bindings)
        .with_fallback_to_subtypes(args.fallback_to_subtypes);
    let mut checker = QueryChecker::new(&types, RootEntityAnalyzer, config);
    let diagnostics = checker.check_all(&sites);

    let is_valid = if args.strict {
        diagnostics.is_empty()
    } else {
        !diagnostics.has_errors()
    };

    if !diagnostics.is_empty() {
        let path = args.source.as_ref().map(|p| p.display().to_string());
        let mut printer = diagnostics.printer().colored(args.color);
        if let (Some(source), Some(path)) = (source.as_deref(), path.as_deref()) {
            printer = printer.source(source).path(path);
        }
        eprintln!("{}", printer.render());
    }

    if !is_valid {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
