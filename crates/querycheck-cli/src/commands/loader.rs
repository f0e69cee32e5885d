//! Reading declaration and call-site files.

use std::path::{Path, PathBuf};

use querycheck_core::DynamicTypeModel;
use querycheck_lib::CallSite;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Types {
        path: PathBuf,
        source: querycheck_core::Error,
    },

    #[error("{}: {source}", path.display())]
    Calls {
        path: PathBuf,
        source: querycheck_lib::Error,
    },
}

pub fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })
}

pub fn load_types(path: &Path) -> Result<DynamicTypeModel, LoadError> {
    let json = read_file(path)?;
    let model = DynamicTypeModel::from_json(&json).map_err(|source| LoadError::Types {
        path: path.to_owned(),
        source,
    })?;
    tracing::debug!(path = %path.display(), types = model.len(), "loaded type declarations");
    Ok(model)
}

pub fn load_call_sites(path: &Path) -> Result<Vec<CallSite>, LoadError> {
    let json = read_file(path)?;
    let sites = CallSite::from_json_list(&json).map_err(|source| LoadError::Calls {
        path: path.to_owned(),
        source,
    })?;
    tracing::debug!(path = %path.display(), sites = sites.len(), "loaded call sites");
    Ok(sites)
}

/// Print the error and exit with status 1.
pub fn exit_with(err: impl std::fmt::Display) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}
