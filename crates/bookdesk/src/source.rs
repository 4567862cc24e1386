use crate::prelude::{eprintln, *};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Human-readable name of the record source
pub fn source_name(path: Option<&Path>) -> String {
    match path {
        Some(p) if p != Path::new("-") => p.display().to_string(),
        _ => "stdin".to_string(),
    }
}

/// Read the raw record document from a file, or stdin when `path` is
/// `None` or `-`.
pub fn read_document(path: Option<&Path>, verbose: bool) -> Result<Value> {
    let name = source_name(path);

    let contents = match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| f!("Failed to read records from {}", p.display()))?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read records from stdin")?;
            buffer
        }
    };

    if verbose {
        eprintln!("Read {} bytes from {}", contents.len(), name);
    }
    log::debug!("read {} bytes from {}", contents.len(), name);

    Ok(parse_document(&contents, &name)?)
}

/// Parse a record document, rejecting blank input.
pub fn parse_document(contents: &str, name: &str) -> Result<Value, Error> {
    if contents.trim().is_empty() {
        return Err(Error::EmptyInput(name.to_string()));
    }

    serde_json::from_str(contents).map_err(|e| Error::InvalidJson {
        source_name: name.to_string(),
        message: e.to_string(),
    })
}
