//! Feature modules the wallet host registers by hand.
//!
//! These are the modules that discovery cannot find on its own. They are
//! appended after the discovered baseline in the order the packaged
//! configuration declares (or [`DEFAULT_ORDER`] when it declares none).

use std::sync::Arc;

use satchel_types::{CapabilityModule, ModuleDescriptor, NonEmptyStaticStr};

use crate::BootstrapError;

const MOBILE_TOOLS: NonEmptyStaticStr = NonEmptyStaticStr::new("MobileTools");
const LITD_MOBILE: NonEmptyStaticStr = NonEmptyStaticStr::new("LitdMobile");
const LITD_MOBILE_TOOLS: NonEmptyStaticStr = NonEmptyStaticStr::new("LitdMobileTools");
const LITD_MOBILE_SCHEDULED_SYNC: NonEmptyStaticStr =
    NonEmptyStaticStr::new("LitdMobileScheduledSync");
const LNC: NonEmptyStaticStr = NonEmptyStaticStr::new("LNC");

pub const DEFAULT_ORDER: &[&str] = &[
    MOBILE_TOOLS.as_str(),
    LITD_MOBILE.as_str(),
    LITD_MOBILE_TOOLS.as_str(),
    LITD_MOBILE_SCHEDULED_SYNC.as_str(),
    LNC.as_str(),
];

fn builtin(name: &str) -> Option<ModuleDescriptor> {
    let descriptor = match name {
        "MobileTools" => ModuleDescriptor::fixed(MOBILE_TOOLS, &["getIntentNfcData"]),
        "LitdMobile" => ModuleDescriptor::fixed(
            LITD_MOBILE,
            &[
                "checkStatus",
                "startLnd",
                "stopLnd",
                "initWallet",
                "unlockWallet",
                "sendCommand",
                "sendStreamCommand",
                "sendBidiStreamCommand",
                "writeToStream",
                "gossipSync",
            ],
        ),
        "LitdMobileTools" => ModuleDescriptor::fixed(
            LITD_MOBILE_TOOLS,
            &["killLnd", "restartApp"],
        ),
        "LitdMobileScheduledSync" => ModuleDescriptor::fixed(
            LITD_MOBILE_SCHEDULED_SYNC,
            &[
                "setupScheduledSyncWork",
                "removeScheduledSyncWork",
                "checkScheduledSyncWorkStatus",
            ],
        ),
        "LNC" => ModuleDescriptor::fixed(
            LNC,
            &[
                "registerLocalPrivCreateCallback",
                "registerRemoteKeyReceiveCallback",
                "registerAuthDataCallback",
                "initLNC",
                "isConnected",
                "status",
                "expiry",
                "isReadOnly",
                "hasPerms",
                "connectServer",
                "disconnect",
                "invokeRPC",
                "initListener",
            ],
        ),
        _ => return None,
    };
    Some(descriptor)
}

/// Resolves the declared order into module handles.
///
/// A name listed twice is registered twice. Built-in modules the order leaves
/// out are not registered.
pub fn declared_feature_modules(
    order: &[String],
) -> Result<Vec<Arc<dyn CapabilityModule>>, BootstrapError> {
    let declared: Vec<&str> = if order.is_empty() {
        DEFAULT_ORDER.to_vec()
    } else {
        order.iter().map(String::as_str).collect()
    };

    let mut modules: Vec<Arc<dyn CapabilityModule>> = Vec::with_capacity(declared.len());
    for name in &declared {
        let descriptor = builtin(name.trim())
            .ok_or_else(|| BootstrapError::UnknownFeatureModule((*name).to_string()))?;
        modules.push(Arc::new(descriptor));
    }

    let omitted: Vec<&str> = DEFAULT_ORDER
        .iter()
        .copied()
        .filter(|name| !declared.iter().any(|d| d.trim() == *name))
        .collect();
    if !omitted.is_empty() {
        tracing::info!(omitted = ?omitted, "Built-in feature modules not declared; skipping");
    }

    Ok(modules)
}
