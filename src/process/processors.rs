//! Command lines for the bridge, tea and gateway processors.

use std::path::{Path, PathBuf};

use super::Invocation;
use crate::config::Config;
use crate::models::{Extension, Mode, Operation};

/// Action token passed to the bridge processor after its config path.
pub const BRIDGE_ACTION: &str = "run";

/// Flag passed to the tea processor after the collection id.
pub const TEA_FLAG: &str = "--once";

/// `<sf1_home>/config/collection/bridge/<extension>/<collection_id>.yaml`
pub fn bridge_config_path(config: &Config, extension: Extension, collection_id: &str) -> PathBuf {
    config
        .sf1_home
        .join("config/collection/bridge")
        .join(extension.as_str())
        .join(format!("{collection_id}.yaml"))
}

/// `<sf1_home>/config/collection/<operation>/<collection_id>.yaml`
pub fn gateway_config_path(config: &Config, operation: Operation, collection_id: &str) -> PathBuf {
    config
        .sf1_home
        .join("config/collection")
        .join(operation.as_str())
        .join(format!("{collection_id}.yaml"))
}

pub fn bridge(config: &Config, extension: Extension, mode: Mode, collection_id: &str) -> Invocation {
    let config_path = bridge_config_path(config, extension, collection_id);
    script(
        config,
        &config.bridge_script,
        vec![
            config_path.to_string_lossy().into_owned(),
            BRIDGE_ACTION.to_string(),
            collection_id.to_string(),
            mode.as_str().to_string(),
        ],
    )
}

pub fn tea(config: &Config, collection_id: &str, listener_ip: &str, port: u16) -> Invocation {
    script(
        config,
        &config.tea_script,
        vec![
            listener_ip.to_string(),
            port.to_string(),
            collection_id.to_string(),
            TEA_FLAG.to_string(),
        ],
    )
}

pub fn gateway(config: &Config, operation: Operation, collection_id: &str) -> Invocation {
    let config_path = gateway_config_path(config, operation, collection_id);
    script(
        config,
        &config.gateway_script,
        vec![config_path.to_string_lossy().into_owned()],
    )
}

/// `<shell> <script> <args...>`. An absolute script runs from its own
/// directory; a relative one from the current directory.
fn script(config: &Config, script: &Path, args: Vec<String>) -> Invocation {
    let current_dir = script
        .parent()
        .filter(|_| script.is_absolute())
        .map(Path::to_path_buf);

    let mut full_args = Vec::with_capacity(args.len() + 1);
    full_args.push(script.to_string_lossy().into_owned());
    full_args.extend(args);

    Invocation {
        program: config.shell.clone(),
        args: full_args,
        current_dir,
    }
}
