use std::fmt::Write;
use std::path::PathBuf;

use querycheck_core::TypeIntrospection;
use querycheck_lib::MetadataGraph;

use super::loader::{exit_with, load_types};

pub struct DumpArgs {
    pub types: PathBuf,
}

pub fn run(args: DumpArgs) {
    let types = load_types(&args.types).unwrap_or_else(|e| exit_with(e));
    print!("{}", render(&types));
}

/// Every declared entity with its access strategy, property types and subtypes.
pub fn render<T: TypeIntrospection + ?Sized>(types: &T) -> String {
    let mut out = String::new();
    format(types, &mut out).expect("String write never fails");
    out
}

fn format<T: TypeIntrospection + ?Sized>(types: &T, w: &mut impl Write) -> std::fmt::Result {
    let mut graph = MetadataGraph::new(types).with_subtype_fallback(false);
    let ids = graph.resolve_all();

    for (i, &id) in ids.iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        let entity = graph.entity(id);
        let names: Vec<String> = entity.properties().iter().map(|p| p.name.clone()).collect();
        writeln!(
            w,
            "{} ({}, {} access)",
            entity.name(),
            entity.type_name(),
            entity.access()
        )?;

        for name in names {
            match graph.property_type(id, &name) {
                Some(ty) => writeln!(w, "  {name}: {ty}")?,
                None => writeln!(w, "  {name}: ?")?,
            }
        }

        let subtypes: Vec<&str> = graph
            .entity(id)
            .subtypes()
            .map(|sub| graph.entity(sub).name())
            .collect();
        if !subtypes.is_empty() {
            writeln!(w, "  subtypes: {}", subtypes.join(", "))?;
        }
    }
    Ok(())
}
