//! Registry access for autorun and the system colour scheme.
//!
//! - `HKCU\Software\Microsoft\Windows\CurrentVersion\Run\Podium`
//! - `HKCU\...\Themes\Personalize\AppsUseLightTheme`

use std::ffi::c_void;

use tracing::{debug, info};
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{ERROR_FILE_NOT_FOUND, WIN32_ERROR};
use windows::Win32::System::Registry::{
    RegDeleteKeyValueW, RegGetValueW, RegSetKeyValueW, HKEY_CURRENT_USER, REG_SZ,
    RRF_RT_REG_DWORD, RRF_RT_REG_SZ,
};

use crate::error::ConfigError;
use crate::model::APP_NAME;
use crate::platform::windows::ffi::wide;

const RUN_KEY: PCWSTR = w!("Software\\Microsoft\\Windows\\CurrentVersion\\Run");
const PERSONALIZE_KEY: PCWSTR =
    w!("Software\\Microsoft\\Windows\\CurrentVersion\\Themes\\Personalize");

fn registry_error(op: &str, code: WIN32_ERROR) -> ConfigError {
    ConfigError::Registry(format!("{op}: {}", code.to_hresult().message()))
}

/// Whether the Run entry exists.
pub fn autorun_enabled() -> bool {
    let name = wide(APP_NAME);
    let mut size = 0u32;
    let status = unsafe {
        RegGetValueW(
            HKEY_CURRENT_USER,
            RUN_KEY,
            PCWSTR(name.as_ptr()),
            RRF_RT_REG_SZ,
            None,
            None,
            Some(&mut size as *mut u32),
        )
    };
    status.is_ok()
}

/// Add or remove the Run entry pointing at the current executable.
pub fn set_autorun(enabled: bool) -> Result<(), ConfigError> {
    let name = wide(APP_NAME);
    if enabled {
        let exe = std::env::current_exe()?;
        let command = wide(&format!("\"{}\"", exe.display()));
        let status = unsafe {
            RegSetKeyValueW(
                HKEY_CURRENT_USER,
                RUN_KEY,
                PCWSTR(name.as_ptr()),
                REG_SZ.0,
                Some(command.as_ptr() as *const c_void),
                (command.len() * 2) as u32,
            )
        };
        if status.is_err() {
            return Err(registry_error("RegSetKeyValueW", status));
        }
        info!(exe = %exe.display(), "autorun enabled");
    } else {
        let status =
            unsafe { RegDeleteKeyValueW(HKEY_CURRENT_USER, RUN_KEY, PCWSTR(name.as_ptr())) };
        if status.is_err() && status != ERROR_FILE_NOT_FOUND {
            return Err(registry_error("RegDeleteKeyValueW", status));
        }
        info!("autorun disabled");
    }
    Ok(())
}

/// `AppsUseLightTheme`; defaults to light when the value is missing.
pub fn system_uses_light_theme() -> bool {
    let mut value = 1u32;
    let mut size = std::mem::size_of::<u32>() as u32;
    let status = unsafe {
        RegGetValueW(
            HKEY_CURRENT_USER,
            PERSONALIZE_KEY,
            w!("AppsUseLightTheme"),
            RRF_RT_REG_DWORD,
            None,
            Some(&mut value as *mut u32 as *mut c_void),
            Some(&mut size as *mut u32),
        )
    };
    if status.is_err() {
        debug!(?status, "AppsUseLightTheme unreadable, assuming light");
        return true;
    }
    value != 0
}
