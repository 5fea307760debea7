// Drawable overlay surface seam

use std::sync::{Arc, Mutex};

/// A 2D pixel canvas sized to the video feed, onto which the overlay
/// renderer draws skeleton lines and joint markers. Implemented by the host
/// (an HTML canvas on web, a platform drawing layer elsewhere).
pub trait OverlaySurface: Send {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Match the surface to the video frame's pixel dimensions. Projection is
    /// only valid when the two agree exactly.
    fn resize(&mut self, width: u32, height: u32);

    /// Erase all prior drawing
    fn clear(&mut self);

    /// Draw a line segment in surface pixel coordinates
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: u32, width: f32);

    /// Draw a small filled marker centered at a surface pixel position
    fn draw_marker(&mut self, at: (f32, f32), color: u32, radius: f32);
}

/// The surface is written by the frame loop and owned by the hosting screen.
pub type SharedSurface = Arc<Mutex<Box<dyn OverlaySurface>>>;

/// Wrap a host surface for use by a session
pub fn shared_surface(surface: Box<dyn OverlaySurface>) -> SharedSurface {
    Arc::new(Mutex::new(surface))
}
