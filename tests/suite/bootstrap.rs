//! End-to-end host bootstrap

use std::sync::Arc;
use std::thread;

use satchel_config::{BuildOverrides, PACKAGED_HOST_TOML, PackagedConfig};
use satchel_core::loader::library_file_name;
use satchel_core::{BootstrapError, LibraryDirLoader, RuntimeBootstrap, StaticDiscovery};
use satchel_types::CapabilityModule;

use crate::common::module;

#[test]
fn packaged_configuration_bootstraps() {
    let config = PackagedConfig::parse(PACKAGED_HOST_TOML, BuildOverrides::default()).unwrap();
    let bootstrap = RuntimeBootstrap::builder(config)
        .discovery(StaticDiscovery::new(vec![module("Clipboard", &["getString"])]))
        .build()
        .unwrap();

    let host = bootstrap.run().unwrap();
    assert_eq!(host.bundle_entry_name(), "index");
    assert!(!host.is_new_architecture());
    assert!(host.is_bytecode_engine());
    assert_eq!(host.module_registry().base().len(), 1);
    assert_eq!(host.module_registry().manual()[0].name(), "MobileTools");
    assert!(bootstrap.transfer_tls().is_installed());
    assert!(bootstrap.transfer_tls().client_config().is_ok());
}

#[test]
fn declared_native_libraries_must_exist() {
    let doc = r#"
        [host]
        architecture = "new"

        [native]
        library_dir = "lib"
        libraries = ["bridge", "crypto"]
    "#;
    let base = tempfile::tempdir().unwrap();
    let lib_dir = base.path().join("lib");
    std::fs::create_dir(&lib_dir).unwrap();
    std::fs::write(lib_dir.join(library_file_name("bridge")), b"").unwrap();

    let config = PackagedConfig::parse(doc, BuildOverrides::default()).unwrap();
    let bootstrap = RuntimeBootstrap::builder(config.clone())
        .native_loader(LibraryDirLoader::new(base.path()))
        .build()
        .unwrap();
    let err = bootstrap.run().unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().contains("crypto"));
    assert!(bootstrap.host().is_none());
    assert!(!bootstrap.transfer_tls().is_installed());

    std::fs::write(lib_dir.join(library_file_name("crypto")), b"").unwrap();
    let bootstrap = RuntimeBootstrap::builder(config)
        .native_loader(LibraryDirLoader::new(base.path()))
        .build()
        .unwrap();
    let host = bootstrap.run().unwrap();
    assert!(host.is_new_architecture());
}

#[test]
fn unknown_declared_module_fails_assembly() {
    let doc = "[modules]\norder = [\"MobileTools\", \"Camera\"]\n";
    let config = PackagedConfig::parse(doc, BuildOverrides::default()).unwrap();
    let err = RuntimeBootstrap::builder(config).build().err().unwrap();
    assert!(matches!(err, BootstrapError::UnknownFeatureModule(ref name) if name == "Camera"));
}

#[test]
fn host_is_shared_read_only_across_threads() {
    let config = PackagedConfig::parse("", BuildOverrides::default()).unwrap();
    let bootstrap = RuntimeBootstrap::builder(config).build().unwrap();
    let host = bootstrap.run().unwrap();

    let expected: Vec<String> = host
        .module_registry()
        .names()
        .map(ToString::to_string)
        .collect();

    thread::scope(|scope| {
        for _ in 0..4 {
            let host = Arc::clone(&host);
            let expected = &expected;
            scope.spawn(move || {
                let seen: Vec<&str> = host.module_registry().names().collect();
                assert_eq!(&seen, expected);
                assert_eq!(host.bundle_entry_name(), "index");
            });
        }
    });
}
