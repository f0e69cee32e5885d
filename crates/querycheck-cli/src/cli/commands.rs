//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("querycheck")
        .about("Validate entity query strings against type declarations")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(check_command())
        .subcommand(expand_command())
        .subcommand(dump_command())
}

/// Check call sites against type declarations.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Check query call sites")
        .override_usage("  querycheck check --types <FILE> --calls <FILE> [--source <FILE>]")
        .after_help(
            r#"EXAMPLES:
  querycheck check -t types.json -c calls.json
  querycheck check -t types.json -c calls.json --source Repo.java
  querycheck check -t types.json -c calls.json --strict --no-bindings"#,
        )
        .arg(types_arg())
        .arg(calls_arg())
        .arg(source_arg())
        .arg(no_bindings_arg())
        .arg(no_subtype_fallback_arg())
        .arg(strict_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Expand a shorthand call and print the query text.
pub fn expand_command() -> Command {
    Command::new("expand")
        .about("Expand a shorthand query")
        .override_usage("  querycheck expand <ENTITY> <VERB> [FILTER] [--params <N> | --named <NAMES>]")
        .after_help(
            r#"EXAMPLES:
  querycheck expand Person find name --params 1
  querycheck expand Person count
  querycheck expand Person list 'age > :min' --named min --sort name,-age"#,
        )
        .arg(entity_arg())
        .arg(verb_arg())
        .arg(filter_arg())
        .arg(params_arg())
        .arg(named_arg())
        .arg(sort_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Print resolved entity metadata.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show resolved entity metadata")
        .after_help(
            r#"EXAMPLES:
  querycheck dump -t types.json"#,
        )
        .arg(types_arg())
        .arg(verbose_arg())
}
