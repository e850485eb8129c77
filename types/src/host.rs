//! Packaged host configuration.
//!
//! A [`HostConfig`] is resolved once at process start and never changes
//! afterwards. There are no setters; the only way to obtain one is
//! [`HostConfig::new`], and the embedding runtime only ever sees `&HostConfig`.
//!
//! ```compile_fail
//! use satchel_types::{ArchitectureMode, EngineMode, HostConfig, NonEmptyString};
//!
//! let config = HostConfig::new(
//!     false,
//!     NonEmptyString::new("index").unwrap(),
//!     ArchitectureMode::Legacy,
//!     EngineMode::Bytecode,
//! );
//! config.debug_mode = true;
//! ```

use serde::{Deserialize, Serialize};

use crate::{EnumKind, EnumParseError, NonEmptyString};

const ARCHITECTURE_PARSE_VALUES: &[&str] = &["legacy", "new"];
const ENGINE_PARSE_VALUES: &[&str] = &["interpreter", "bytecode"];

/// Which runtime architecture the embedding runtime boots with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchitectureMode {
    #[default]
    Legacy,
    New,
}

impl ArchitectureMode {
    pub fn parse(raw: &str) -> Result<Self, EnumParseError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "legacy" | "old" => Ok(Self::Legacy),
            "new" | "fabric" => Ok(Self::New),
            _ => Err(EnumParseError::new(
                EnumKind::ArchitectureMode,
                raw,
                ARCHITECTURE_PARSE_VALUES,
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::New => "new",
        }
    }
}

/// Script engine the embedding runtime executes the bundle with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineMode {
    Interpreter,
    /// Ahead-of-time compiled bytecode engine.
    #[default]
    Bytecode,
}

impl EngineMode {
    pub fn parse(raw: &str) -> Result<Self, EnumParseError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "interpreter" | "jsc" => Ok(Self::Interpreter),
            "bytecode" | "hermes" => Ok(Self::Bytecode),
            _ => Err(EnumParseError::new(
                EnumKind::EngineMode,
                raw,
                ENGINE_PARSE_VALUES,
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Interpreter => "interpreter",
            Self::Bytecode => "bytecode",
        }
    }
}

/// Build-time host configuration surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    debug_mode: bool,
    bundle_entry_name: NonEmptyString,
    architecture_mode: ArchitectureMode,
    engine_mode: EngineMode,
}

impl HostConfig {
    #[must_use]
    pub fn new(
        debug_mode: bool,
        bundle_entry_name: NonEmptyString,
        architecture_mode: ArchitectureMode,
        engine_mode: EngineMode,
    ) -> Self {
        Self {
            debug_mode,
            bundle_entry_name,
            architecture_mode,
            engine_mode,
        }
    }

    /// Whether developer support (debug menus, live reload) is enabled.
    #[must_use]
    pub const fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Name of the bundle entry module the runtime starts from.
    #[must_use]
    pub fn bundle_entry_name(&self) -> &str {
        self.bundle_entry_name.as_str()
    }

    #[must_use]
    pub const fn architecture_mode(&self) -> ArchitectureMode {
        self.architecture_mode
    }

    #[must_use]
    pub const fn engine_mode(&self) -> EngineMode {
        self.engine_mode
    }
}
