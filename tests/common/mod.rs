// tests/common/mod.rs

//! Fixtures for building insights archives in memory

#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use insights_inventory::manifest::{MACHINE_ID_PATH, PACKAGE_LIST_PATH};
use std::io::Write;

pub const WRAPPER: &str = "insights-rhel9-box-20240101120000";

/// One manifest line for a package named `name`
pub fn package_line(name: &str) -> String {
    format!(
        r#"{{"name":"{}","epoch":"(none)","version":"1.0","release":"1.el9","arch":"x86_64","installtime":"1700000000","buildtime":"1690000000","vendor":"Red Hat, Inc.","buildhost":"builder.example.com","sigpgp":"RSA/SHA256, Key ID 199e2f91fd431d51"}}"#,
        name
    )
}

/// Manifest with one line per package name
pub fn package_list(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| package_line(name) + "\n")
        .collect()
}

/// Gzipped tarball with every entry placed under the wrapper directory
pub fn archive(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (path, data) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Regular);
        builder
            .append_data(&mut header, format!("{}/{}", WRAPPER, path), *data)
            .unwrap();
    }

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&builder.into_inner().unwrap()).unwrap();
    encoder.finish().unwrap()
}

/// Complete collection archive with a machine-id and package list
pub fn collection(machine_id: &str, manifest: &str) -> Vec<u8> {
    archive(&[
        (MACHINE_ID_PATH, machine_id.as_bytes()),
        ("etc/hostname", b"rhel9-box\n"),
        (PACKAGE_LIST_PATH, manifest.as_bytes()),
    ])
}
