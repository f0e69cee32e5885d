//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors pull the relevant fields
//! - `Into<*Args>` impls bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use querycheck_lib::shorthand::{Direction, SortChain};

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::expand::ExpandArgs;

pub struct CheckParams {
    pub types: PathBuf,
    pub calls: PathBuf,
    pub source: Option<PathBuf>,
    pub no_bindings: bool,
    pub no_subtype_fallback: bool,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            types: required_path(m, "types"),
            calls: required_path(m, "calls"),
            source: m.get_one::<PathBuf>("source").cloned(),
            no_bindings: m.get_flag("no_bindings"),
            no_subtype_fallback: m.get_flag("no_subtype_fallback"),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            types: p.types,
            calls: p.calls,
            source: p.source,
            check_bindings: !p.no_bindings,
            fallback_to_subtypes: !p.no_subtype_fallback,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct ExpandParams {
    pub entity: String,
    pub verb: String,
    pub filter: Option<String>,
    pub params: Option<u32>,
    pub named: Vec<String>,
    pub sort: Vec<String>,
    pub color: ColorChoice,
}

impl ExpandParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            entity: m.get_one::<String>("entity").cloned().unwrap_or_default(),
            verb: m.get_one::<String>("verb").cloned().unwrap_or_default(),
            filter: m.get_one::<String>("filter").cloned(),
            params: m.get_one::<u32>("params").copied(),
            named: strings(m, "named"),
            sort: strings(m, "sort"),
            color: parse_color(m),
        }
    }
}

impl From<ExpandParams> for ExpandArgs {
    fn from(p: ExpandParams) -> Self {
        Self {
            entity: p.entity,
            verb: p.verb,
            filter: p.filter,
            positional: p.params,
            named: p.named,
            sort: parse_sort(&p.sort),
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub types: PathBuf,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            types: required_path(m, "types"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self { types: p.types }
    }
}

fn required_path(m: &ArgMatches, id: &str) -> PathBuf {
    m.get_one::<PathBuf>(id).cloned().unwrap_or_default()
}

fn strings(m: &ArgMatches, id: &str) -> Vec<String> {
    m.get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// `name,-age` → `by(name).and(age, descending)`.
pub fn parse_sort(columns: &[String]) -> SortChain {
    columns
        .iter()
        .filter(|c| !c.is_empty())
        .fold(SortChain::new(), |chain, column| match column.strip_prefix('-') {
            Some(name) => chain.and_direction(name, Direction::Descending),
            None => chain.and(column.as_str()),
        })
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
