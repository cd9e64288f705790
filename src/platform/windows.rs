//! Native Windows capabilities.

use windows_sys::Win32::Foundation::FreeLibrary;
use windows_sys::Win32::System::LibraryLoader::{GetProcAddress, LoadLibraryW};
use windows_sys::Win32::UI::WindowsAndMessaging::MessageBoxW;
use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_QUERY_VALUE};
use winreg::RegKey;

use crate::dialog::{prepare, ButtonCode, MessageBox, StyleFlags};
use crate::error::{Result, RuntimeError};
use crate::runtime::{ConfigRecord, ConfigStore};
use crate::version::VersionComparator;
use crate::wide::encode_wide;

/// `HKEY_LOCAL_MACHINE` registry reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryStore;

struct RegistryRecord(RegKey);

impl ConfigRecord for RegistryRecord {
    fn get_string(&self, name: &str) -> Option<String> {
        self.0.get_value::<String, _>(name).ok()
    }
}

impl ConfigStore for RegistryStore {
    fn open_record(&self, path: &str) -> Option<Box<dyn ConfigRecord + '_>> {
        let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
        match hklm.open_subkey_with_flags(path, KEY_QUERY_VALUE) {
            Ok(key) => Some(Box::new(RegistryRecord(key))),
            Err(e) => {
                tracing::debug!(path, "cannot open registry key: {}", e);
                None
            }
        }
    }
}

type CompareBrowserVersionsFn =
    unsafe extern "system" fn(version1: *const u16, version2: *const u16, result: *mut i32) -> i32;

/// `CompareBrowserVersions` from `WebView2Loader.dll`, loaded per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoaderComparator;

impl LoaderComparator {
    const LIBRARY: &'static str = "WebView2Loader.dll";
    const SYMBOL: &'static [u8] = b"CompareBrowserVersions\0";
}

impl VersionComparator for LoaderComparator {
    fn compare(&self, a: &str, b: &str) -> Result<i32> {
        let fault = |detail: String| RuntimeError::ComparisonFault {
            installed: a.to_string(),
            required: b.to_string(),
            detail,
        };

        let v1 = encode_wide(a, "installed version")?;
        let v2 = encode_wide(b, "required version")?;
        let library = encode_wide(Self::LIBRARY, "library name")?;

        // SAFETY: `library` is a NUL-terminated UTF-16 buffer that outlives the call.
        let module = unsafe { LoadLibraryW(library.as_ptr()) };
        if module == 0 {
            return Err(fault(format!(
                "cannot load {}: {}",
                Self::LIBRARY,
                std::io::Error::last_os_error()
            )));
        }

        // SAFETY: `module` is a live module handle and SYMBOL is NUL-terminated.
        let proc = unsafe { GetProcAddress(module, Self::SYMBOL.as_ptr()) };
        let outcome = match proc {
            Some(proc) => {
                // SAFETY: the exported symbol has the CompareBrowserVersions signature.
                let compare: CompareBrowserVersionsFn = unsafe { std::mem::transmute(proc) };
                // Outside {-1, 0, 1}; survives if the call never writes it.
                let mut result: i32 = 9;
                // SAFETY: both inputs are NUL-terminated and `result` is a valid out pointer.
                let hr = unsafe { compare(v1.as_ptr(), v2.as_ptr(), &mut result) };
                if hr < 0 {
                    Err(fault(format!("CompareBrowserVersions failed: 0x{:08X}", hr)))
                } else {
                    Ok(result)
                }
            }
            None => Err(fault(
                "CompareBrowserVersions not exported by WebView2Loader.dll".to_string(),
            )),
        };

        // SAFETY: `module` came from LoadLibraryW above and is released once.
        unsafe { FreeLibrary(module) };
        outcome
    }
}

/// Win32 `MessageBoxW`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeDialog;

impl MessageBox for NativeDialog {
    fn show_message_box(
        &self,
        message: &str,
        title: &str,
        style: StyleFlags,
    ) -> Result<ButtonCode> {
        let (message, title) = prepare(message, title)?;
        // SAFETY: both buffers are NUL-terminated and outlive the call; no owner window.
        let button = unsafe { MessageBoxW(0, message.as_ptr(), title.as_ptr(), style.bits()) };
        Ok(button)
    }
}
