// src/catalog/models.rs

//! Catalog data types
//!
//! Field names on the wire match the keys written by the rpm query that
//! insights-client runs, so a `Component` decodes straight from a manifest
//! line and serializes back under the same names in the catalog listing.

use serde::{Deserialize, Serialize};

/// One installed RPM package as reported by the collected system
///
/// Every field is text. rpm prints placeholders such as `(none)` for a
/// missing epoch, so numeric-looking fields are not parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Component {
    pub name: String,
    pub epoch: String,
    pub version: String,
    pub release: String,
    pub arch: String,
    #[serde(rename = "installtime")]
    pub install_time: String,
    #[serde(rename = "buildtime")]
    pub build_time: String,
    pub vendor: String,
    #[serde(rename = "buildhost")]
    pub build_host: String,
    #[serde(rename = "sigpgp")]
    pub sig_pgp: String,
}

impl Component {
    /// Full `name-[epoch:]version-release.arch` label, as rpm -q prints it
    pub fn nevra(&self) -> String {
        let epoch = match self.epoch.as_str() {
            "" | "(none)" | "0" => String::new(),
            epoch => format!("{}:", epoch),
        };
        format!(
            "{}-{}{}-{}.{}",
            self.name, epoch, self.version, self.release, self.arch
        )
    }
}

/// All packages collected from a single ingested archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemComponents {
    /// Contents of the machine-id file, stored verbatim
    #[serde(rename = "systemid")]
    pub system_id: String,

    /// Packages in the order they appear in the manifest
    pub components: Vec<Component>,
}

/// Serialized form of the whole catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemComponentList {
    pub systems: Vec<SystemComponents>,
}

impl SystemComponentList {
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bash() -> Component {
        Component {
            name: "bash".to_string(),
            epoch: "(none)".to_string(),
            version: "5.1.8".to_string(),
            release: "9.el9".to_string(),
            arch: "x86_64".to_string(),
            install_time: "1700000000".to_string(),
            build_time: "1690000000".to_string(),
            vendor: "Red Hat, Inc.".to_string(),
            build_host: "x86-vm-07.build.eng.bos.redhat.com".to_string(),
            sig_pgp: "RSA/SHA256, Mon 01 Jan 2024, Key ID 199e2f91fd431d51".to_string(),
        }
    }

    #[test]
    fn test_component_wire_names() {
        let value = serde_json::to_value(bash()).unwrap();
        assert_eq!(value["installtime"], "1700000000");
        assert_eq!(value["buildtime"], "1690000000");
        assert_eq!(value["buildhost"], "x86-vm-07.build.eng.bos.redhat.com");
        assert_eq!(value["sigpgp"], "RSA/SHA256, Mon 01 Jan 2024, Key ID 199e2f91fd431d51");
        assert_eq!(value.as_object().unwrap().len(), 10);
    }

    #[test]
    fn test_component_rejects_missing_field() {
        let value = json!({
            "name": "bash", "epoch": "", "version": "5.1.8", "release": "9.el9",
            "arch": "x86_64", "installtime": "", "buildtime": "", "vendor": "",
            "buildhost": ""
        });
        assert!(serde_json::from_value::<Component>(value).is_err());
    }

    #[test]
    fn test_component_rejects_unknown_field() {
        let mut value = serde_json::to_value(bash()).unwrap();
        value["license"] = json!("GPLv3+");
        assert!(serde_json::from_value::<Component>(value).is_err());
    }

    #[test]
    fn test_component_rejects_numeric_field() {
        let mut value = serde_json::to_value(bash()).unwrap();
        value["installtime"] = json!(1700000000);
        assert!(serde_json::from_value::<Component>(value).is_err());
    }

    #[test]
    fn test_nevra() {
        assert_eq!(bash().nevra(), "bash-5.1.8-9.el9.x86_64");

        let mut pkg = bash();
        pkg.epoch = "2".to_string();
        assert_eq!(pkg.nevra(), "bash-2:5.1.8-9.el9.x86_64");
    }

    #[test]
    fn test_catalog_serialization_shape() {
        let list = SystemComponentList {
            systems: vec![SystemComponents {
                system_id: "abc123\n".to_string(),
                components: vec![bash()],
            }],
        };

        let value = serde_json::to_value(&list).unwrap();
        assert_eq!(value["systems"][0]["systemid"], "abc123\n");
        assert_eq!(value["systems"][0]["components"][0]["name"], "bash");
    }
}
