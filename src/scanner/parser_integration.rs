use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::{debug, info};
use parser_scanner::{Scanner, Value};

/// Read a resource file and parse it with `scanner`
pub fn parse_resource_file(path: &Path, scanner: &Scanner) -> Result<Value> {
    debug!("Starting to parse file: {}", path.display());

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value = scanner
        .parse(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    debug!("Successfully parsed {}", path.display());
    Ok(value)
}

/// Rewrite the content of a resource file so that it parses to `value`.
///
/// The file itself is left untouched, see [`write_resource_file`].
pub fn fix_resource_file(path: &Path, scanner: &Scanner, value: &Value) -> Result<String> {
    let original = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let fixed = match scanner.fix(&original, value) {
        Ok(fixed) => fixed,
        Err(e) if e.is_contract_violation() => {
            bail!("Value cannot be written to {}: {}", path.display(), e)
        }
        Err(e) => bail!("{} does not match the schema: {}", path.display(), e),
    };

    // Never hand out text that reads back as something else
    match scanner.parse(&fixed) {
        Ok(reparsed) if reparsed == *value => Ok(fixed),
        Ok(reparsed) => bail!(
            "Rewritten {} reads back as {} instead of {}",
            path.display(),
            reparsed,
            value
        ),
        Err(e) => bail!("Rewritten {} no longer parses: {}", path.display(), e),
    }
}

/// Fix a resource file in place. Returns whether its content changed.
pub fn write_resource_file(path: &Path, scanner: &Scanner, value: &Value) -> Result<bool> {
    let original = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let fixed = fix_resource_file(path, scanner, value)?;

    if fixed == original {
        debug!("{} is already up to date", path.display());
        return Ok(false);
    }

    fs::write(path, &fixed).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Rewrote {} ({} -> {} bytes)", path.display(), original.len(), fixed.len());
    Ok(true)
}
