//! Packaged host configuration for Satchel.
//!
//! The host configuration is a TOML document compiled into the binary
//! (`host.toml` next to this crate's manifest). It is parsed exactly once at
//! process start; build-time environment variables captured with
//! `option_env!` override individual values. Nothing here reads the
//! filesystem or the runtime environment.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use satchel_types::{
    ArchitectureMode, EmptyStringError, EngineMode, EnumParseError, HostConfig, NonEmptyString,
};

/// The packaged `host.toml`, as compiled into this build.
pub const PACKAGED_HOST_TOML: &str = include_str!("../host.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse host configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    InvalidValue(#[from] EnumParseError),
    #[error("bundle entry name must not be empty")]
    EmptyBundleEntry(#[from] EmptyStringError),
    #[error("invalid boolean for {name}: '{raw}'")]
    InvalidFlag { name: &'static str, raw: String },
}

// ============================================================================
// Raw TOML shape
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    host: Option<RawHost>,
    native: Option<RawNative>,
    modules: Option<RawModules>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHost {
    bundle_entry: Option<String>,
    architecture: Option<String>,
    engine: Option<String>,
    debug: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNative {
    library_dir: Option<PathBuf>,
    libraries: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawModules {
    order: Option<Vec<String>>,
}

// ============================================================================
// Build-time overrides
// ============================================================================

/// Values captured from the build environment.
///
/// Each field is the raw string as it appeared at compile time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOverrides {
    pub bundle_entry: Option<&'static str>,
    pub new_architecture: Option<&'static str>,
    pub engine: Option<&'static str>,
    pub debug: Option<&'static str>,
}

impl BuildOverrides {
    #[must_use]
    pub const fn from_build_env() -> Self {
        Self {
            bundle_entry: option_env!("SATCHEL_BUNDLE_ENTRY"),
            new_architecture: option_env!("SATCHEL_NEW_ARCH"),
            engine: option_env!("SATCHEL_ENGINE"),
            debug: option_env!("SATCHEL_DEBUG"),
        }
    }
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            raw: raw.to_string(),
        }),
    }
}

// ============================================================================
// Resolved configuration
// ============================================================================

/// Native support libraries the loader must resolve before anything else runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativeConfig {
    pub library_dir: Option<PathBuf>,
    pub libraries: Vec<String>,
}

/// Fully resolved packaged configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedConfig {
    host: HostConfig,
    native: NativeConfig,
    module_order: Vec<String>,
}

impl PackagedConfig {
    /// Parses the compiled-in `host.toml` with this build's overrides applied.
    pub fn packaged() -> Result<Self, ConfigError> {
        Self::parse(PACKAGED_HOST_TOML, BuildOverrides::from_build_env())
    }

    pub fn parse(content: &str, overrides: BuildOverrides) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        let host = raw.host.unwrap_or_default();

        let bundle_entry = overrides
            .bundle_entry
            .map(str::to_string)
            .or(host.bundle_entry)
            .unwrap_or_else(|| "index".to_string());
        let bundle_entry = NonEmptyString::new(bundle_entry)?;

        let architecture = match overrides.new_architecture {
            Some(raw) => {
                if parse_flag("SATCHEL_NEW_ARCH", raw)? {
                    ArchitectureMode::New
                } else {
                    ArchitectureMode::Legacy
                }
            }
            None => host
                .architecture
                .as_deref()
                .map(ArchitectureMode::parse)
                .transpose()?
                .unwrap_or_default(),
        };

        let engine = overrides
            .engine
            .or(host.engine.as_deref())
            .map(EngineMode::parse)
            .transpose()?
            .unwrap_or_default();

        let debug_mode = match overrides.debug {
            Some(raw) => parse_flag("SATCHEL_DEBUG", raw)?,
            None => host.debug.unwrap_or(cfg!(debug_assertions)),
        };

        let native = raw.native.unwrap_or_default();
        let native = NativeConfig {
            library_dir: native.library_dir,
            libraries: native.libraries.unwrap_or_default(),
        };

        let module_order = raw.modules.and_then(|m| m.order).unwrap_or_default();

        tracing::debug!(
            bundle_entry = %bundle_entry,
            architecture = architecture.as_str(),
            engine = engine.as_str(),
            debug_mode,
            native_libraries = native.libraries.len(),
            "Resolved packaged host configuration"
        );

        Ok(Self {
            host: HostConfig::new(debug_mode, bundle_entry, architecture, engine),
            native,
            module_order,
        })
    }

    #[must_use]
    pub fn host(&self) -> &HostConfig {
        &self.host
    }

    #[must_use]
    pub fn native(&self) -> &NativeConfig {
        &self.native
    }

    /// Declared order of the manually registered feature modules.
    ///
    /// Empty when the packaged document does not declare one.
    #[must_use]
    pub fn module_order(&self) -> &[String] {
        &self.module_order
    }

    #[must_use]
    pub fn into_parts(self) -> (HostConfig, NativeConfig, Vec<String>) {
        (self.host, self.native, self.module_order)
    }
}
