//! Moving `RgbaImage` pixels onto the screen with GDI.
//!
//! Everything is drawn on the CPU into an `image::RgbaImage`; these
//! helpers only convert to the BGRA layout GDI expects.

use std::ffi::c_void;

use image::RgbaImage;
use windows::Win32::Foundation::{COLORREF, HWND, POINT, SIZE};
use windows::Win32::Graphics::Gdi::{
    CreateCompatibleDC, CreateDIBSection, DeleteDC, DeleteObject, GetDC, ReleaseDC,
    SelectObject, SetDIBitsToDevice, AC_SRC_ALPHA, AC_SRC_OVER, BITMAPINFO, BITMAPINFOHEADER,
    BI_RGB, BLENDFUNCTION, DIB_RGB_COLORS, HBITMAP, HDC,
};
use windows::Win32::UI::WindowsAndMessaging::{UpdateLayeredWindow, ULW_ALPHA};

fn bitmap_info(width: u32, height: u32) -> BITMAPINFO {
    BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: width as i32,
            biHeight: -(height as i32), // Top-down
            biPlanes: 1,
            biBitCount: 32,
            biCompression: BI_RGB.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Premultiplied BGRA, raising alpha to at least `min_alpha`.
///
/// Fully transparent pixels of a layered window do not receive mouse
/// input, so surfaces that must stay clickable pass `min_alpha = 1`.
fn to_bgra_premultiplied(image: &RgbaImage, min_alpha: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(image.as_raw().len());
    for px in image.pixels() {
        let [r, g, b, a] = px.0;
        let a = a.max(min_alpha);
        let pm = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
        out.extend_from_slice(&[pm(b), pm(g), pm(r), a]);
    }
    out
}

fn to_bgra_opaque(image: &RgbaImage) -> Vec<u8> {
    let mut out = Vec::with_capacity(image.as_raw().len());
    for px in image.pixels() {
        let [r, g, b, _] = px.0;
        out.extend_from_slice(&[b, g, r, 255]);
    }
    out
}

unsafe fn dib_from_bytes(dc: HDC, width: u32, height: u32, bytes: &[u8]) -> Option<HBITMAP> {
    let bmi = bitmap_info(width, height);
    let mut bits: *mut c_void = std::ptr::null_mut();
    let bitmap = CreateDIBSection(Some(dc), &bmi, DIB_RGB_COLORS, &mut bits, None, 0).ok()?;
    if bits.is_null() {
        let _ = DeleteObject(bitmap.into());
        return None;
    }
    std::ptr::copy_nonoverlapping(bytes.as_ptr(), bits as *mut u8, bytes.len());
    Some(bitmap)
}

/// Replace the contents of a `WS_EX_LAYERED` window with `image`, placed
/// with its top-left corner at `origin` in screen coordinates.
pub fn present_layered(hwnd: HWND, origin: (i32, i32), image: &RgbaImage, min_alpha: u8) {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let bytes = to_bgra_premultiplied(image, min_alpha);

    unsafe {
        let screen_dc = GetDC(None);
        let mem_dc = CreateCompatibleDC(Some(screen_dc));
        let Some(bitmap) = dib_from_bytes(mem_dc, width, height, &bytes) else {
            ReleaseDC(None, screen_dc);
            let _ = DeleteDC(mem_dc);
            return;
        };
        let old = SelectObject(mem_dc, bitmap.into());

        let pt_src = POINT { x: 0, y: 0 };
        let pt_dst = POINT {
            x: origin.0,
            y: origin.1,
        };
        let size = SIZE {
            cx: width as i32,
            cy: height as i32,
        };
        let blend = BLENDFUNCTION {
            BlendOp: AC_SRC_OVER as u8,
            BlendFlags: 0,
            SourceConstantAlpha: 255,
            AlphaFormat: AC_SRC_ALPHA as u8,
        };
        let _ = UpdateLayeredWindow(
            hwnd,
            Some(screen_dc),
            Some(&pt_dst),
            Some(&size),
            Some(mem_dc),
            Some(&pt_src),
            COLORREF(0),
            Some(&blend),
            ULW_ALPHA,
        );

        SelectObject(mem_dc, old);
        let _ = DeleteObject(bitmap.into());
        let _ = DeleteDC(mem_dc);
        ReleaseDC(None, screen_dc);
    }
}

/// Paint an opaque image into a device context, e.g. during `WM_PAINT`.
pub fn blit(hdc: HDC, x: i32, y: i32, image: &RgbaImage) {
    let (width, height) = image.dimensions();
    let bytes = to_bgra_opaque(image);
    let bmi = bitmap_info(width, height);
    unsafe {
        SetDIBitsToDevice(
            hdc,
            x,
            y,
            width,
            height,
            0,
            0,
            0,
            height,
            bytes.as_ptr() as *const c_void,
            &bmi,
            DIB_RGB_COLORS,
        );
    }
}

/// An opaque bitmap for menu items. The caller owns the handle.
pub fn bitmap_from_image(image: &RgbaImage) -> Option<HBITMAP> {
    let (width, height) = image.dimensions();
    let bytes = to_bgra_opaque(image);
    unsafe {
        let screen_dc = GetDC(None);
        let bitmap = dib_from_bytes(screen_dc, width, height, &bytes);
        ReleaseDC(None, screen_dc);
        bitmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn premultiplies_and_swaps_channels() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 128]));
        assert_eq!(to_bgra_premultiplied(&img, 0), vec![0, 0, 128, 128]);
    }

    #[test]
    fn min_alpha_keeps_transparent_pixels_clickable() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]));
        assert_eq!(to_bgra_premultiplied(&img, 1)[3], 1);
    }
}
