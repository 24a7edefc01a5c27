// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("insights-inventory")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Insights Inventory Contributors")
        .about("Catalog installed packages from uploaded insights archives")
        .subcommand_required(false)
        .subcommand(
            Command::new("serve")
                .about("Run the upload and listing HTTP server")
                .arg(
                    Arg::new("listen")
                        .short('l')
                        .long("listen")
                        .value_name("ADDR")
                        .default_value("0.0.0.0:8080")
                        .help("Address to listen on"),
                )
                .arg(
                    Arg::new("max_upload_bytes")
                        .short('m')
                        .long("max-upload-bytes")
                        .value_name("BYTES")
                        .default_value("10485760")
                        .help("Largest accepted upload request body, in bytes"),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Parse a local archive and print its catalog entry")
                .arg(
                    Arg::new("archive_path")
                        .required(true)
                        .help("Path to the insights archive (.tar.gz, .tar.xz or .tar.zst)"),
                )
                .arg(
                    Arg::new("nevra")
                        .long("nevra")
                        .action(clap::ArgAction::SetTrue)
                        .help("Print one name-epoch:version-release.arch line per package instead of JSON"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Create man directory
    let out_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("Failed to create man directory");

    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();
    man.render(&mut buffer).expect("Failed to render man page");

    let man_path = man_dir.join("insights-inventory.1");
    fs::write(&man_path, buffer).expect("Failed to write man page");
}
