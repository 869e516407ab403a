use std::collections::HashMap;

use anyhow::{anyhow, Result};
use tracing::{debug, error, instrument};
use xcb::{
    x::{self, Colormap, Drawable, Gcontext, Window},
    Connection,
};

use crate::{config::color::Color, render::Segment};

use super::{ScreenMetrics, Surface, SurfaceEvent};

const WINDOW_NAME: &[u8] = b"workbar";

fn allocate_pixel(conn: &Connection, colormap: Colormap, color: Color) -> Result<u32> {
    let (red, green, blue) = color.to_rgb_u16();
    let reply = conn.wait_for_reply(conn.send_request(&x::AllocColor {
        cmap: colormap,
        red,
        green,
        blue,
    }))?;
    Ok(reply.pixel())
}

pub struct LinuxSurface {
    connection: Connection,
    window: Window,
    gc: Gcontext,
    colormap: Colormap,
    width: u32,
    pixels: HashMap<Color, u32>,
}

impl LinuxSurface {
    /// Creates an override-redirect window along the top of the preferred screen. Window managers
    /// leave such windows alone, so there are no decorations and no reparenting.
    #[instrument]
    pub fn new(height: u16, background: Color) -> Result<Self> {
        let (connection, preferred_screen) = Connection::connect(None)?;

        // Currently the application only supports 1 x11 screen.
        let (root, visual, colormap, width) = {
            let setup = connection.get_setup();
            let screen = setup
                .roots()
                .nth(preferred_screen.max(0) as usize)
                .ok_or_else(|| anyhow!("X server has no screen {preferred_screen}"))?;
            (
                screen.root(),
                screen.root_visual(),
                screen.default_colormap(),
                screen.width_in_pixels(),
            )
        };

        let background_pixel = allocate_pixel(&connection, colormap, background)?;

        let window: Window = connection.generate_id();
        connection.send_and_check_request(&x::CreateWindow {
            depth: x::COPY_FROM_PARENT as u8,
            wid: window,
            parent: root,
            x: 0,
            y: 0,
            width,
            height,
            border_width: 0,
            class: x::WindowClass::InputOutput,
            visual,
            value_list: &[
                x::Cw::BackPixel(background_pixel),
                x::Cw::OverrideRedirect(true),
                x::Cw::EventMask(
                    x::EventMask::EXPOSURE
                        | x::EventMask::VISIBILITY_CHANGE
                        | x::EventMask::STRUCTURE_NOTIFY,
                ),
            ],
        })?;

        connection.send_and_check_request(&x::ChangeProperty {
            mode: x::PropMode::Replace,
            window,
            property: x::ATOM_WM_NAME,
            r#type: x::ATOM_STRING,
            data: WINDOW_NAME,
        })?;

        let gc: Gcontext = connection.generate_id();
        connection.send_and_check_request(&x::CreateGc {
            cid: gc,
            drawable: Drawable::Window(window),
            value_list: &[
                x::Gc::Foreground(background_pixel),
                x::Gc::GraphicsExposures(false),
            ],
        })?;

        connection.send_and_check_request(&x::MapWindow { window })?;
        connection.flush()?;
        debug!("Created bar window {width}x{height}");

        let mut pixels = HashMap::new();
        pixels.insert(background, background_pixel);

        Ok(Self {
            connection,
            window,
            gc,
            colormap,
            width: u32::from(width),
            pixels,
        })
    }

    fn send_raise(&self) {
        self.connection.send_request(&x::ConfigureWindow {
            window: self.window,
            value_list: &[x::ConfigWindow::StackMode(x::StackMode::Above)],
        });
    }

    fn pixel(&mut self, color: Color) -> Result<u32> {
        if let Some(pixel) = self.pixels.get(&color) {
            return Ok(*pixel);
        }
        let pixel = allocate_pixel(&self.connection, self.colormap, color)?;
        self.pixels.insert(color, pixel);
        Ok(pixel)
    }
}

impl Surface for LinuxSurface {
    fn screen_metrics(&self) -> ScreenMetrics {
        ScreenMetrics { width: self.width }
    }

    #[instrument(skip(self))]
    fn draw(&mut self, segments: &[Segment]) -> Result<()> {
        // Nothing keeps an override-redirect window on top, so it is raised on every paint.
        self.send_raise();

        for segment in segments {
            let pixel = self.pixel(segment.color)?;
            self.connection.send_request(&x::ChangeGc {
                gc: self.gc,
                value_list: &[x::Gc::Foreground(pixel)],
            });
            self.connection.send_request(&x::PolyFillRectangle {
                drawable: Drawable::Window(self.window),
                gc: self.gc,
                rectangles: &[x::Rectangle {
                    x: i16::try_from(segment.x).unwrap_or(i16::MAX),
                    y: 0,
                    width: u16::try_from(segment.width).unwrap_or(u16::MAX),
                    height: segment.height,
                }],
            });
        }

        self.connection.flush()?;
        Ok(())
    }

    fn raise(&mut self) -> Result<()> {
        self.send_raise();
        self.connection.flush()?;
        Ok(())
    }

    fn poll_events(&mut self) -> Result<Vec<SurfaceEvent>> {
        let mut events = Vec::new();
        loop {
            match self.connection.poll_for_event() {
                Ok(Some(xcb::Event::X(x::Event::Expose(expose)))) if expose.count() == 0 => {
                    events.push(SurfaceEvent::Exposed)
                }
                Ok(Some(xcb::Event::X(x::Event::VisibilityNotify(visibility))))
                    if visibility.state() != x::Visibility::Unobscured =>
                {
                    events.push(SurfaceEvent::Obscured)
                }
                Ok(Some(xcb::Event::X(x::Event::DestroyNotify(_)))) => {
                    events.push(SurfaceEvent::Closed)
                }
                Ok(Some(_)) => {}
                Ok(None) => return Ok(events),
                Err(xcb::Error::Connection(e)) => {
                    error!("Lost connection to the X server {e:?}");
                    events.push(SurfaceEvent::Closed);
                    return Ok(events);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
