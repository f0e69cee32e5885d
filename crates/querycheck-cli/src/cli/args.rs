//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Type declarations JSON (-t/--types).
pub fn types_arg() -> Arg {
    Arg::new("types")
        .short('t')
        .long("types")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Type declarations (JSON)")
}

/// Call sites JSON (-c/--calls).
pub fn calls_arg() -> Arg {
    Arg::new("calls")
        .short('c')
        .long("calls")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Call sites (JSON array)")
}

/// Enclosing source the call sites point into (--source).
pub fn source_arg() -> Arg {
    Arg::new("source")
        .long("source")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Source file the literal offsets refer to")
}

/// Skip the parameter binding check (--no-bindings).
pub fn no_bindings_arg() -> Arg {
    Arg::new("no_bindings")
        .long("no-bindings")
        .action(ArgAction::SetTrue)
        .help("Do not cross-check bound parameters")
}

/// Do not fall back to subtype properties (--no-subtype-fallback).
pub fn no_subtype_fallback_arg() -> Arg {
    Arg::new("no_subtype_fallback")
        .long("no-subtype-fallback")
        .action(ArgAction::SetTrue)
        .help("Resolve paths on the exact entity only")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Log verbosity (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .help("Log resolution steps (-v debug, -vv trace)")
}

/// Target entity (positional).
pub fn entity_arg() -> Arg {
    Arg::new("entity")
        .value_name("ENTITY")
        .required(true)
        .help("Target entity name")
}

/// Shorthand verb (positional).
pub fn verb_arg() -> Arg {
    Arg::new("verb")
        .value_name("VERB")
        .required(true)
        .help("Shorthand verb (find, list, stream, count, exists)")
}

/// Filter fragment (positional).
pub fn filter_arg() -> Arg {
    Arg::new("filter")
        .value_name("FILTER")
        .help("Filter fragment, as written in the literal")
}

/// Positional binding count (--params).
pub fn params_arg() -> Arg {
    Arg::new("params")
        .long("params")
        .value_name("N")
        .value_parser(value_parser!(u32))
        .conflicts_with("named")
        .help("Number of positional parameters bound")
}

/// Named bindings (--named).
pub fn named_arg() -> Arg {
    Arg::new("named")
        .long("named")
        .value_name("NAMES")
        .value_delimiter(',')
        .help("Named parameters bound (comma-separated)")
}

/// Sort columns (--sort).
pub fn sort_arg() -> Arg {
    Arg::new("sort")
        .long("sort")
        .value_name("COLUMNS")
        .value_delimiter(',')
        .allow_hyphen_values(true)
        .help("Sort columns (comma-separated, '-' prefix for descending)")
}
