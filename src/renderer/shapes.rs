//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in screen pixels.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::vertex::Vertex;

fn push_quad(vertices: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) {
    vertices.push(Vertex::new(a.x, a.y, color));
    vertices.push(Vertex::new(b.x, b.y, color));
    vertices.push(Vertex::new(c.x, c.y, color));

    vertices.push(Vertex::new(c.x, c.y, color));
    vertices.push(Vertex::new(b.x, b.y, color));
    vertices.push(Vertex::new(d.x, d.y, color));
}

/// Pie-slice fan from `start` over `sweep` radians
fn fan(vertices: &mut Vec<Vertex>, center: Vec2, radius: f32, start: f32, sweep: f32, color: [f32; 4], segments: u32) {
    for i in 0..segments {
        let theta1 = start + (i as f32 / segments as f32) * sweep;
        let theta2 = start + ((i + 1) as f32 / segments as f32) * sweep;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    fan(&mut vertices, center, radius, 0.0, 2.0 * PI, color, segments);
    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    let inner_radius = inner_radius.max(0.0);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        // Two triangles per segment
        push_quad(
            &mut vertices,
            center + dir1 * inner_radius,
            center + dir1 * outer_radius,
            center + dir2 * inner_radius,
            center + dir2 * outer_radius,
            color,
        );
    }

    vertices
}

/// Generate vertices for an axis-aligned rectangle (top-left origin)
pub fn rect(origin: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        origin,
        origin + Vec2::new(size.x, 0.0),
        origin + Vec2::new(0.0, size.y),
        origin + size,
        color,
    );
    vertices
}

/// Generate vertices for a rectangle with rounded corners.
///
/// The corner radius is capped at half the shorter side.
pub fn rounded_rect(origin: Vec2, size: Vec2, radius: f32, color: [f32; 4], corner_segments: u32) -> Vec<Vertex> {
    let r = radius.min(size.x / 2.0).min(size.y / 2.0).max(0.0);
    if r <= 0.0 {
        return rect(origin, size, color);
    }

    let mut vertices = Vec::with_capacity((18 + 12 * corner_segments) as usize);
    // Full-height middle band, then the two side bands between the corners
    vertices.extend(rect(origin + Vec2::new(r, 0.0), Vec2::new(size.x - 2.0 * r, size.y), color));
    vertices.extend(rect(origin + Vec2::new(0.0, r), Vec2::new(r, size.y - 2.0 * r), color));
    vertices.extend(rect(
        origin + Vec2::new(size.x - r, r),
        Vec2::new(r, size.y - 2.0 * r),
        color,
    ));

    // Corners: (center, start angle) with y down
    let corners = [
        (origin + Vec2::new(size.x - r, size.y - r), 0.0),
        (origin + Vec2::new(r, size.y - r), FRAC_PI_2),
        (origin + Vec2::new(r, r), PI),
        (origin + Vec2::new(size.x - r, r), PI + FRAC_PI_2),
    ];
    for (center, start) in corners {
        fan(&mut vertices, center, r, start, FRAC_PI_2, color, corner_segments);
    }

    vertices
}

/// Generate vertices for a straight line of the given width
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let mut vertices = Vec::with_capacity(6);
    push_quad(&mut vertices, from + perp, from - perp, to + perp, to - perp, color);
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_circle_vertices_on_radius() {
        let verts = circle(Vec2::new(10.0, 10.0), 5.0, RED, 16);
        assert_eq!(verts.len(), 48);
        for chunk in verts.chunks(3) {
            assert_eq!(chunk[0].position, [10.0, 10.0]);
            for v in &chunk[1..] {
                let d = Vec2::from(v.position) - Vec2::new(10.0, 10.0);
                assert!((d.length() - 5.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_ring_stays_in_band() {
        let verts = ring(Vec2::ZERO, 9.0, 11.0, RED, 24);
        assert_eq!(verts.len(), 24 * 6);
        for v in &verts {
            let r = Vec2::from(v.position).length();
            assert!(r > 9.0 - 1e-3 && r < 11.0 + 1e-3);
        }
    }

    #[test]
    fn test_ring_with_negative_inner_radius() {
        let verts = ring(Vec2::ZERO, -1.0, 1.0, RED, 8);
        assert!(verts.iter().all(|v| Vec2::from(v.position).length() <= 1.0 + 1e-4));
    }

    #[test]
    fn test_rounded_rect_bounds() {
        let origin = Vec2::new(100.0, 50.0);
        let size = Vec2::new(120.0, 10.0);
        let verts = rounded_rect(origin, size, 20.0, RED, 6);
        assert_eq!(verts.len(), 18 + 4 * 6 * 3);
        for v in &verts {
            assert!(v.position[0] >= origin.x - 1e-3 && v.position[0] <= origin.x + size.x + 1e-3);
            assert!(v.position[1] >= origin.y - 1e-3 && v.position[1] <= origin.y + size.y + 1e-3);
        }
    }

    #[test]
    fn test_rounded_rect_zero_radius_is_rect() {
        let verts = rounded_rect(Vec2::ZERO, Vec2::new(4.0, 2.0), 0.0, RED, 6);
        assert_eq!(verts, rect(Vec2::ZERO, Vec2::new(4.0, 2.0), RED));
    }

    #[test]
    fn test_line_width() {
        let verts = line(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), 2.0, RED);
        assert_eq!(verts.len(), 6);
        for v in &verts {
            assert!((v.position[1].abs() - 1.0).abs() < 1e-5);
        }
    }
}
