use crate::core::config::{HostConfig, CONFIG_FILE};
use crate::core::error::HostError;
use std::ffi::CString;
use std::io::Read;
use winit::platform::android::activity::AndroidApp;

/// Read a text asset bundled in the APK. `Ok(None)` when there is no such asset.
pub fn read_asset(android_app: &AndroidApp, name: &str) -> Result<Option<String>, HostError> {
    let Ok(name) = CString::new(name) else {
        return Ok(None);
    };
    let Some(mut asset) = android_app.asset_manager().open(&name) else {
        return Ok(None);
    };
    let mut content = String::new();
    asset.read_to_string(&mut content)?;
    Ok(Some(content))
}

/// Config pushed to the data directory wins over the one bundled in the APK.
pub fn load_config(android_app: &AndroidApp) -> (HostConfig, Vec<HostError>) {
    let pushed = android_app
        .internal_data_path()
        .map(|dir| HostConfig::from_file(&dir.join(CONFIG_FILE)))
        .unwrap_or(Ok(None));
    let bundled = read_asset(android_app, CONFIG_FILE)
        .and_then(|content| content.as_deref().map(HostConfig::from_toml).transpose());
    HostConfig::resolve([pushed, bundled])
}
