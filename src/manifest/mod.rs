// src/manifest/mod.rs

//! Package manifest parsing
//!
//! Locates the machine-id file and the rpm package list inside an extracted
//! insights collection and turns them into one `SystemComponents` entry.
//!
//! The package list is the output of
//! `rpm -qa --qf '{"name":"%{NAME}","epoch":"%{EPOCH}",...}\n'`, so each
//! line is a self-contained JSON object.

use crate::archive::FileSet;
use crate::catalog::models::{Component, SystemComponents};
use crate::error::{Error, Result};
use tracing::debug;

/// Location of the machine identifier within a collection
pub const MACHINE_ID_PATH: &str = "etc/insights-client/machine-id";

/// Location of the rpm package list within a collection
pub const PACKAGE_LIST_PATH: &str = "insights_commands/rpm_-qa_--qf_name_NAME_epoch_EPOCH_version_VERSION_release_RELEASE_arch_ARCH_installtime_INSTALLTIME_date_buildtime_BUILDTIME_vendor_VENDOR_buildhost_BUILDHOST_sigpgp_SIGPGP_pgpsig_n";

/// Directory that core collections nest collected files under
const COLLECTION_DATA_DIR: &str = "data";

/// Build the catalog entry for one extracted archive
pub fn parse(files: &FileSet) -> Result<SystemComponents> {
    let machine_id = lookup(files, MACHINE_ID_PATH)
        .ok_or_else(|| Error::MissingIdentifier(MACHINE_ID_PATH.to_string()))?;

    let system_id = String::from_utf8_lossy(machine_id).into_owned();

    let package_list = lookup(files, PACKAGE_LIST_PATH)
        .ok_or_else(|| Error::MissingManifest(PACKAGE_LIST_PATH.to_string()))?;

    let components = parse_package_list(package_list)?;

    debug!(
        "Parsed manifest for system {}: {} packages",
        system_id.trim_end(),
        components.len()
    );

    Ok(SystemComponents {
        system_id,
        components,
    })
}

/// Decode each non-empty line of a package list into a `Component`
///
/// Decoding stops at the first bad line. Silently dropping it would hide a
/// corrupt collection behind a plausible-looking package count.
pub fn parse_package_list(content: &[u8]) -> Result<Vec<Component>> {
    let mut components = Vec::new();

    for (index, line) in content.split(|&b| b == b'\n').enumerate() {
        let line = line.strip_suffix(b"\r").unwrap_or(line);

        if line.is_empty() {
            continue;
        }

        let component: Component =
            serde_json::from_slice(line).map_err(|source| Error::RecordDecode {
                line: index + 1,
                content: String::from_utf8_lossy(line).into_owned(),
                source,
            })?;

        components.push(component);
    }

    Ok(components)
}

/// Find a collection file at its root-stripped path or under `data/`
fn lookup<'a>(files: &'a FileSet, path: &str) -> Option<&'a [u8]> {
    files
        .get(path)
        .or_else(|| files.get(&format!("{}/{}", COLLECTION_DATA_DIR, path)))
}
