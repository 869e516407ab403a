use anyhow::{anyhow, Result};
use tracing::{debug, error, instrument};
use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::{COLORREF, HWND, LPARAM, LRESULT, RECT, WPARAM},
        Graphics::Gdi::{CreateSolidBrush, DeleteObject, FillRect, GetDC, ReleaseDC},
        System::LibraryLoader::GetModuleHandleW,
        UI::WindowsAndMessaging::{
            CreateWindowExW, DefWindowProcW, DispatchMessageW, GetSystemMetrics, PeekMessageW,
            PostQuitMessage, RegisterClassW, SetLayeredWindowAttributes, SetWindowPos,
            ShowWindow, TranslateMessage, HWND_TOPMOST, LWA_COLORKEY, MSG, PM_REMOVE,
            SM_CXSCREEN, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SW_SHOWNOACTIVATE, WM_DESTROY,
            WM_PAINT, WM_QUIT, WNDCLASSW, WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW,
            WS_EX_TOPMOST, WS_POPUP,
        },
    },
};

use crate::{config::color::Color, render::Segment};

use super::{ScreenMetrics, Surface, SurfaceEvent};

const CLASS_NAME: PCWSTR = w!("WorkbarWindow");

/// GDI expects `0x00BBGGRR`.
fn color_ref(color: Color) -> COLORREF {
    COLORREF(
        u32::from(color.red) | (u32::from(color.green) << 8) | (u32::from(color.blue) << 16),
    )
}

unsafe extern "system" fn window_proc(
    window: HWND,
    message: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if message == WM_DESTROY {
        unsafe { PostQuitMessage(0) };
        return LRESULT(0);
    }
    unsafe { DefWindowProcW(window, message, wparam, lparam) }
}

pub struct WindowsSurface {
    window: HWND,
    width: u32,
}

impl WindowsSurface {
    /// Creates a layered popup window along the top of the primary screen. Pixels painted with
    /// `transparent` are keyed out.
    #[instrument]
    pub fn new(height: u16, transparent: Color) -> Result<Self> {
        let instance = unsafe { GetModuleHandleW(None) }?;

        let class = WNDCLASSW {
            lpfnWndProc: Some(window_proc),
            hInstance: instance.into(),
            lpszClassName: CLASS_NAME,
            hbrBackground: unsafe { CreateSolidBrush(color_ref(transparent)) },
            ..Default::default()
        };
        if unsafe { RegisterClassW(&class) } == 0 {
            return Err(anyhow!("Failed to register the bar window class"));
        }

        let width = unsafe { GetSystemMetrics(SM_CXSCREEN) };
        let window = unsafe {
            CreateWindowExW(
                WS_EX_TOPMOST | WS_EX_LAYERED | WS_EX_TOOLWINDOW | WS_EX_NOACTIVATE,
                CLASS_NAME,
                w!("workbar"),
                WS_POPUP,
                0,
                0,
                width,
                i32::from(height),
                None,
                None,
                instance,
                None,
            )
        }
        .inspect_err(|e| error!("Failed to create the bar window {e:?}"))?;

        unsafe { SetLayeredWindowAttributes(window, color_ref(transparent), 255, LWA_COLORKEY) }?;
        let _ = unsafe { ShowWindow(window, SW_SHOWNOACTIVATE) };
        debug!("Created bar window {width}x{height}");

        Ok(Self {
            window,
            width: width.max(0) as u32,
        })
    }
}

impl Surface for WindowsSurface {
    fn screen_metrics(&self) -> ScreenMetrics {
        ScreenMetrics { width: self.width }
    }

    #[instrument(skip(self))]
    fn draw(&mut self, segments: &[Segment]) -> Result<()> {
        self.raise()?;

        let dc = unsafe { GetDC(self.window) };
        if dc.is_invalid() {
            return Err(anyhow!("Failed to get the bar device context"));
        }
        for segment in segments {
            let rect = RECT {
                left: segment.x as i32,
                top: 0,
                right: segment.end() as i32,
                bottom: i32::from(segment.height),
            };
            unsafe {
                let brush = CreateSolidBrush(color_ref(segment.color));
                FillRect(dc, &rect, brush);
                let _ = DeleteObject(brush);
            }
        }
        unsafe { ReleaseDC(self.window, dc) };
        Ok(())
    }

    fn raise(&mut self) -> Result<()> {
        unsafe {
            SetWindowPos(
                self.window,
                HWND_TOPMOST,
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            )
        }?;
        Ok(())
    }

    fn poll_events(&mut self) -> Result<Vec<SurfaceEvent>> {
        let mut events = Vec::new();
        let mut message = MSG::default();
        while unsafe { PeekMessageW(&mut message, None, 0, 0, PM_REMOVE) }.as_bool() {
            match message.message {
                WM_QUIT => events.push(SurfaceEvent::Closed),
                WM_PAINT => events.push(SurfaceEvent::Exposed),
                _ => {}
            }
            unsafe {
                let _ = TranslateMessage(&message);
                DispatchMessageW(&message);
            }
        }
        Ok(events)
    }
}
