// Landmark overlay rendering
// Stateless projection from normalized landmark coordinates onto the surface

use crate::core::skeleton::OverlayStyle;
use crate::models::pose::Landmark;
use crate::platform::surface::OverlaySurface;

fn project(landmark: &Landmark, width: u32, height: u32) -> (f32, f32) {
    (landmark.x * width as f32, landmark.y * height as f32)
}

/// Draw skeleton edges, then a marker per landmark, for one subject.
///
/// Dimensions are read from the surface at call time, so a resize performed
/// earlier in the same iteration is already reflected in the projection.
/// Edges whose indices fall outside the landmark sequence are skipped.
pub fn render(
    surface: &mut dyn OverlaySurface,
    edges: &[(usize, usize)],
    landmarks: &[Landmark],
    style: &OverlayStyle,
) {
    let width = surface.width();
    let height = surface.height();

    for &(a, b) in edges {
        let (Some(from), Some(to)) = (landmarks.get(a), landmarks.get(b)) else {
            continue;
        };
        surface.draw_line(
            project(from, width, height),
            project(to, width, height),
            style.line_color,
            style.line_width,
        );
    }

    for landmark in landmarks {
        surface.draw_marker(
            project(landmark, width, height),
            style.marker_color,
            style.marker_radius,
        );
    }
}
