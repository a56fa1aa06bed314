//! Popup menus opened from the overlay widgets: the pen colour flyout
//! and the slide picker.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use tracing::debug;
use windows::core::PCWSTR;
use windows::Win32::Foundation::{HWND, POINT};
use windows::Win32::Graphics::Gdi::{DeleteObject, HBITMAP};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, DestroyMenu, GetCursorPos, GetSystemMetrics,
    SetMenuItemBitmaps, SetMenuItemInfoW, TrackPopupMenu, HMENU, MENUITEMINFOW, MENU_ITEM_FLAGS,
    MF_BYCOMMAND, MF_CHECKED, MF_GRAYED, MF_MENUBARBREAK, MF_MENUBREAK, MF_STRING, MIIM_BITMAP,
    SM_CXMENUCHECK, TPM_BOTTOMALIGN, TPM_LEFTALIGN, TPM_NONOTIFY, TPM_RETURNCMD,
};

use super::layered::bitmap_from_image;
use crate::model::{PenColor, PALETTE, PALETTE_NAMES};
use crate::platform::windows::ffi::wide;

const COLOR_BASE: u32 = 100;
const SLIDE_BASE: u32 = 1000;

/// Slides per picker column.
const PICKER_ROWS: u32 = 8;

/// Thumbnail size inside the picker.
const PICKER_THUMB: (u32, u32) = (96, 54);

/// Menu handle plus the bitmaps it references, freed together.
struct PopupMenu {
    menu: HMENU,
    bitmaps: Vec<HBITMAP>,
}

impl PopupMenu {
    fn new() -> Option<Self> {
        let menu = unsafe { CreatePopupMenu() }.ok()?;
        Some(Self {
            menu,
            bitmaps: Vec::new(),
        })
    }

    fn append(&self, flags: MENU_ITEM_FLAGS, id: u32, label: &str) {
        let label = wide(label);
        unsafe {
            let _ = AppendMenuW(self.menu, flags, id as usize, PCWSTR(label.as_ptr()));
        }
    }

    /// Small check-mark-sized bitmap next to the label.
    fn set_check_bitmap(&mut self, id: u32, bitmap: HBITMAP) {
        unsafe {
            let _ = SetMenuItemBitmaps(self.menu, id, MF_BYCOMMAND, Some(bitmap), Some(bitmap));
        }
        self.bitmaps.push(bitmap);
    }

    /// Full-size item bitmap.
    fn set_item_bitmap(&mut self, id: u32, bitmap: HBITMAP) {
        let info = MENUITEMINFOW {
            cbSize: std::mem::size_of::<MENUITEMINFOW>() as u32,
            fMask: MIIM_BITMAP,
            hbmpItem: bitmap,
            ..Default::default()
        };
        unsafe {
            let _ = SetMenuItemInfoW(self.menu, id, false, &info);
        }
        self.bitmaps.push(bitmap);
    }

    /// Show at the cursor and return the chosen command id, if any.
    fn track(&self, owner: HWND) -> Option<u32> {
        unsafe {
            let mut pt = POINT::default();
            let _ = GetCursorPos(&mut pt);
            let cmd = TrackPopupMenu(
                self.menu,
                TPM_RETURNCMD | TPM_NONOTIFY | TPM_BOTTOMALIGN | TPM_LEFTALIGN,
                pt.x,
                pt.y,
                None,
                owner,
                None,
            );
            (cmd.0 > 0).then_some(cmd.0 as u32)
        }
    }
}

impl Drop for PopupMenu {
    fn drop(&mut self) {
        unsafe {
            let _ = DestroyMenu(self.menu);
            for bitmap in self.bitmaps.drain(..) {
                let _ = DeleteObject(bitmap.into());
            }
        }
    }
}

fn swatch(color: PenColor) -> Option<HBITMAP> {
    let side = unsafe { GetSystemMetrics(SM_CXMENUCHECK) }.max(8) as u32;
    let mut img = RgbaImage::from_pixel(side, side, color.to_rgba());
    // 1px grey frame so white stays visible
    let frame = Rgba([128, 128, 128, 255]);
    for i in 0..side {
        img.put_pixel(i, 0, frame);
        img.put_pixel(i, side - 1, frame);
        img.put_pixel(0, i, frame);
        img.put_pixel(side - 1, i, frame);
    }
    bitmap_from_image(&img)
}

/// Two columns of five colours.
pub fn pick_pen_color(owner: HWND, current: Option<PenColor>) -> Option<PenColor> {
    let mut menu = PopupMenu::new()?;
    for (i, (color, name)) in PALETTE.iter().zip(PALETTE_NAMES).enumerate() {
        let id = COLOR_BASE + i as u32;
        let mut flags = MF_STRING;
        if i == 5 {
            flags |= MF_MENUBREAK;
        }
        if current == Some(*color) {
            flags |= MF_CHECKED;
        }
        menu.append(flags, id, name);
        if let Some(bitmap) = swatch(*color) {
            menu.set_check_bitmap(id, bitmap);
        }
    }
    let id = menu.track(owner)?;
    PALETTE.get(id.checked_sub(COLOR_BASE)? as usize).copied()
}

fn load_thumbnail(path: &Path) -> Option<HBITMAP> {
    match image::open(path) {
        Ok(img) => {
            let (w, h) = PICKER_THUMB;
            bitmap_from_image(&img.thumbnail(w, h).to_rgba8())
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "unreadable thumbnail");
            None
        }
    }
}

/// Grid of "Slide n" entries, with thumbnails where cached. Returns the
/// chosen 1-based slide index.
pub fn pick_slide(
    owner: HWND,
    total: Option<u32>,
    current: Option<u32>,
    thumbnails: &[(u32, PathBuf)],
) -> Option<u32> {
    let mut menu = PopupMenu::new()?;
    let Some(total) = total.filter(|n| *n > 0) else {
        menu.append(MF_STRING | MF_GRAYED, SLIDE_BASE, "Slide list unavailable");
        menu.track(owner);
        return None;
    };

    let thumbs: HashMap<u32, &PathBuf> = thumbnails.iter().map(|(i, p)| (*i, p)).collect();
    for index in 1..=total {
        let id = SLIDE_BASE + index;
        let mut flags = MF_STRING;
        if index > 1 && (index - 1) % PICKER_ROWS == 0 {
            flags |= MF_MENUBARBREAK;
        }
        if current == Some(index) {
            flags |= MF_CHECKED;
        }
        menu.append(flags, id, &format!("Slide {index}"));
        if let Some(bitmap) = thumbs.get(&index).and_then(|p| load_thumbnail(p)) {
            menu.set_item_bitmap(id, bitmap);
        }
    }

    let id = menu.track(owner)?;
    id.checked_sub(SLIDE_BASE).filter(|i| (1..=total).contains(i))
}
