use querycheck_lib::shorthand::{ShorthandCall, SortChain, Verb, expand};
use querycheck_lib::{Diagnostics, ParameterBindings};

use super::loader::exit_with;

pub struct ExpandArgs {
    pub entity: String,
    pub verb: String,
    pub filter: Option<String>,
    pub positional: Option<u32>,
    pub named: Vec<String>,
    pub sort: SortChain,
    pub color: bool,
}

pub fn run(args: ExpandArgs) {
    match render(&args) {
        Ok(out) => println!("{out}"),
        Err(msg) => exit_with(msg),
    }
}

/// Expanded text followed by its offset, or a printable failure.
pub fn render(args: &ExpandArgs) -> Result<String, String> {
    let verb: Verb = args.verb.parse().map_err(|e| format!("{e}"))?;
    let bindings = if args.named.is_empty() {
        ParameterBindings::positional(args.positional.unwrap_or(0))
    } else {
        ParameterBindings::named(args.named.iter().cloned())
    };

    let mut call = ShorthandCall::new(verb, args.entity.as_str())
        .bindings(bindings)
        .sort(args.sort.clone());
    call.filter = args.filter.clone();

    let mut diagnostics = Diagnostics::new();
    match expand(&call, &mut diagnostics) {
        Some(expansion) => Ok(format!("{}\noffset: {}", expansion.text, expansion.offset)),
        None if diagnostics.is_empty() => Err(format!("`{verb}` calls are not expanded")),
        None => {
            let filter = args.filter.as_deref().unwrap_or_default();
            Err(diagnostics
                .printer()
                .source(filter)
                .path("<filter>")
                .colored(args.color)
                .render())
        }
    }
}
