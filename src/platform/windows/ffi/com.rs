//! Late-bound COM automation (`IDispatch`) helpers.
//!
//! PowerPoint and WPS expose the same object model through `IDispatch`,
//! so every call is resolved by name at runtime.

use windows::core::{Interface, BSTR, GUID, HSTRING, IUnknown, PCWSTR, VARIANT};
use windows::Win32::System::Com::{
    CLSIDFromProgID, CoInitializeEx, CoUninitialize, IDispatch, COINIT_APARTMENTTHREADED,
    DISPATCH_FLAGS, DISPATCH_METHOD, DISPATCH_PROPERTYGET, DISPATCH_PROPERTYPUT, DISPPARAMS,
};
use windows::Win32::System::Ole::{GetActiveObject, DISPID_PROPERTYPUT};
use windows::Win32::System::Variant::{VariantChangeType, VAR_CHANGE_FLAGS, VT_UNKNOWN};

use crate::error::{DriverError, DriverResult};

/// `LOCALE_USER_DEFAULT`
const LOCALE_USER_DEFAULT: u32 = 0x0400;

/// Keeps COM initialised on the current thread until dropped.
pub struct ComApartment {
    owned: bool,
}

impl ComApartment {
    pub fn init() -> Self {
        let owned = unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED).is_ok() };
        Self { owned }
    }
}

impl Drop for ComApartment {
    fn drop(&mut self) {
        if self.owned {
            unsafe { CoUninitialize() };
        }
    }
}

/// An automation object.
#[derive(Clone)]
pub struct Dispatch(IDispatch);

impl Dispatch {
    /// Attach to the running instance registered under `prog_id`.
    pub fn active(prog_id: &str) -> DriverResult<Self> {
        unsafe {
            let clsid = CLSIDFromProgID(&HSTRING::from(prog_id))
                .map_err(|e| DriverError::call("CLSIDFromProgID", e))?;
            let mut unknown: Option<IUnknown> = None;
            GetActiveObject(&clsid, None, &mut unknown).map_err(|_| DriverError::NotRunning)?;
            let unknown = unknown.ok_or(DriverError::NotRunning)?;
            let dispatch = unknown
                .cast::<IDispatch>()
                .map_err(|e| DriverError::call("QueryInterface", e))?;
            Ok(Self(dispatch))
        }
    }

    fn dispid(&self, name: &'static str) -> DriverResult<i32> {
        let wide = HSTRING::from(name);
        let names = [PCWSTR(wide.as_ptr())];
        let mut id = 0i32;
        unsafe {
            self.0
                .GetIDsOfNames(&GUID::zeroed(), names.as_ptr(), 1, LOCALE_USER_DEFAULT, &mut id)
                .map_err(|e| DriverError::call(name, e))?;
        }
        Ok(id)
    }

    fn invoke(
        &self,
        name: &'static str,
        flags: DISPATCH_FLAGS,
        args: &[VARIANT],
    ) -> DriverResult<VARIANT> {
        let id = self.dispid(name)?;

        // DISPPARAMS wants positional arguments last-to-first.
        let mut args: Vec<VARIANT> = args.iter().rev().cloned().collect();
        let mut named = DISPID_PROPERTYPUT;
        let is_put = flags == DISPATCH_PROPERTYPUT;
        let params = DISPPARAMS {
            rgvarg: args.as_mut_ptr(),
            rgdispidNamedArgs: if is_put { &mut named } else { std::ptr::null_mut() },
            cArgs: args.len() as u32,
            cNamedArgs: u32::from(is_put),
        };

        let mut result = VARIANT::default();
        unsafe {
            self.0
                .Invoke(
                    id,
                    &GUID::zeroed(),
                    LOCALE_USER_DEFAULT,
                    flags,
                    &params,
                    Some(&mut result as *mut _),
                    None,
                    None,
                )
                .map_err(|e| DriverError::call(name, e))?;
        }
        Ok(result)
    }

    /// Read a property, or call a method that returns a value.
    pub fn get(&self, name: &'static str, args: &[VARIANT]) -> DriverResult<VARIANT> {
        self.invoke(name, DISPATCH_METHOD | DISPATCH_PROPERTYGET, args)
    }

    pub fn put(&self, name: &'static str, value: VARIANT) -> DriverResult<()> {
        self.invoke(name, DISPATCH_PROPERTYPUT, &[value]).map(drop)
    }

    pub fn call(&self, name: &'static str, args: &[VARIANT]) -> DriverResult<()> {
        self.invoke(name, DISPATCH_METHOD, args).map(drop)
    }

    /// A property holding another automation object.
    pub fn object(&self, name: &'static str) -> DriverResult<Dispatch> {
        to_dispatch(name, &self.get(name, &[])?)
    }

    /// `collection.Item(index)`
    pub fn item(&self, index: i32) -> DriverResult<Dispatch> {
        to_dispatch("Item", &self.get("Item", &[VARIANT::from(index)])?)
    }

    pub fn int(&self, name: &'static str) -> DriverResult<i32> {
        let value = self.get(name, &[])?;
        i32::try_from(&value).map_err(|e| DriverError::call(name, e))
    }

    pub fn string(&self, name: &'static str) -> DriverResult<String> {
        let value = self.get(name, &[])?;
        BSTR::try_from(&value)
            .map(|s| s.to_string())
            .map_err(|e| DriverError::call(name, e))
    }
}

fn to_dispatch(name: &'static str, value: &VARIANT) -> DriverResult<Dispatch> {
    let mut unknown = VARIANT::default();
    unsafe {
        VariantChangeType(&mut unknown, value, VAR_CHANGE_FLAGS(0), VT_UNKNOWN)
            .map_err(|e| DriverError::call(name, e))?;
    }
    let unknown = IUnknown::try_from(&unknown).map_err(|e| DriverError::call(name, e))?;
    let dispatch = unknown
        .cast::<IDispatch>()
        .map_err(|e| DriverError::call(name, e))?;
    Ok(Dispatch(dispatch))
}

/// An `i32` automation argument.
pub fn int_arg(value: i32) -> VARIANT {
    VARIANT::from(value)
}

/// A string automation argument.
pub fn str_arg(value: &str) -> VARIANT {
    VARIANT::from(BSTR::from(value))
}
