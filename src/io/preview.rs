// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.
//
//! PNG previews of parts
//! Orthographic, depth-buffered, flat-shaded rendering for a quick visual check
//
use super::import_stl;
use crate::geometry::Mesh;
use anyhow::{bail, Context, Result};
use image::{Rgb, RgbImage};
use nalgebra::{Rotation3, Vector2, Vector3};
use std::path::Path;

pub const PREVIEW_WIDTH: u32 = 1024;
pub const PREVIEW_HEIGHT: u32 = 768;

const BACKGROUND: Rgb<u8> = Rgb([15, 18, 26]);

/// Render a mesh and save it as PNG
pub fn render_mesh_to_png(mesh: &Mesh, output_png: &Path) -> Result<()> {
    let image = render_mesh(mesh, PREVIEW_WIDTH, PREVIEW_HEIGHT)?;
    image
        .save(output_png)
        .with_context(|| format!("Failed to save PNG to {}", output_png.display()))?;
    Ok(())
}

/// Render an STL file and save it as PNG
pub fn render_stl_to_png(stl_path: &Path, output_png: &Path) -> Result<()> {
    if !stl_path.exists() {
        bail!("STL file not found: {}", stl_path.display());
    }
    let mesh = import_stl(stl_path)?;
    render_mesh_to_png(&mesh, output_png)
        .with_context(|| format!("Failed to render preview of {}", stl_path.display()))
}

/// Rasterize a mesh into an image of the given size
pub fn render_mesh(mesh: &Mesh, width: u32, height: u32) -> Result<RgbImage> {
    if mesh.is_empty() {
        bail!("mesh does not contain any triangles to render");
    }

    let rotation = Rotation3::from_euler_angles(-0.9_f32, 0.8, 0.3);
    let transformed: Vec<Vector3<f32>> = mesh
        .vertices
        .iter()
        .map(|v| {
            let p = v.position;
            rotation * Vector3::new(p.x as f32, p.y as f32, p.z as f32)
        })
        .collect();

    let view = View::fit(&transformed, width, height);
    let projected: Vec<Vector2<f32>> = transformed.iter().map(|p| view.project(p)).collect();
    let depths: Vec<f32> = transformed.iter().map(|p| -p.z).collect();

    let mut image = RgbImage::from_pixel(width, height, BACKGROUND);
    let mut depth_buffer = vec![f32::NEG_INFINITY; (width * height) as usize];
    let light_dir = Vector3::new(0.35, 0.55, 1.0).normalize();

    for triangle in &mesh.triangles {
        let [i0, i1, i2] = triangle.indices;
        let (v0, v1, v2) = (transformed[i0], transformed[i1], transformed[i2]);

        let normal = (v1 - v0).cross(&(v2 - v0));
        if normal.norm_squared() < 1e-12 {
            continue;
        }

        let intensity = normal.normalize().dot(&light_dir).abs().clamp(0.05, 1.0);

        rasterize_triangle(
            &mut image,
            &mut depth_buffer,
            [projected[i0], projected[i1], projected[i2]],
            [depths[i0], depths[i1], depths[i2]],
            intensity,
        );
    }

    Ok(image)
}

/// Scale and offset that fit the rotated mesh into the frame with a margin
struct View {
    min_x: f32,
    max_y: f32,
    scale: f32,
    x_offset: f32,
    y_offset: f32,
}

impl View {
    fn fit(points: &[Vector3<f32>], width: u32, height: u32) -> Self {
        let (mut min_x, mut max_x) = (f32::INFINITY, f32::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f32::INFINITY, f32::NEG_INFINITY);
        for p in points {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        let span_x = (max_x - min_x).max(1e-3);
        let span_y = (max_y - min_y).max(1e-3);
        let scale = 0.9
            * (width as f32 / span_x)
                .min(height as f32 / span_y)
                .max(1e-3);

        Self {
            min_x,
            max_y,
            scale,
            x_offset: (width as f32 - span_x * scale) * 0.5,
            y_offset: (height as f32 - span_y * scale) * 0.5,
        }
    }

    fn project(&self, p: &Vector3<f32>) -> Vector2<f32> {
        Vector2::new(
            (p.x - self.min_x) * self.scale + self.x_offset,
            (self.max_y - p.y) * self.scale + self.y_offset,
        )
    }
}

fn rasterize_triangle(
    image: &mut RgbImage,
    depth_buffer: &mut [f32],
    points: [Vector2<f32>; 3],
    depths: [f32; 3],
    intensity: f32,
) {
    let width = image.width() as i32;
    let height = image.height() as i32;

    let min_x = points.iter().fold(f32::INFINITY, |acc, p| acc.min(p.x)).floor().max(0.0) as i32;
    let max_x = points
        .iter()
        .fold(f32::NEG_INFINITY, |acc, p| acc.max(p.x))
        .ceil()
        .min((width - 1) as f32) as i32;
    let min_y = points.iter().fold(f32::INFINITY, |acc, p| acc.min(p.y)).floor().max(0.0) as i32;
    let max_y = points
        .iter()
        .fold(f32::NEG_INFINITY, |acc, p| acc.max(p.y))
        .ceil()
        .min((height - 1) as f32) as i32;

    if min_x > max_x || min_y > max_y {
        return;
    }

    let area = edge(points[0], points[1], points[2]);
    if area.abs() < 1e-6 {
        return;
    }
    let inv_area = 1.0 / area;

    // Icing-and-gingerbread tint
    let shade = (intensity * 205.0 + 40.0).clamp(0.0, 255.0);
    let color = Rgb([
        shade as u8,
        (shade * 0.72) as u8,
        (shade * 0.45 + 10.0).min(255.0) as u8,
    ]);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = Vector2::new(x as f32 + 0.5, y as f32 + 0.5);
            let w0 = edge(points[1], points[2], p);
            let w1 = edge(points[2], points[0], p);
            let w2 = edge(points[0], points[1], p);

            let inside = (w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0)
                || (w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0);
            if !inside {
                continue;
            }

            let depth = (w0 * depths[0] + w1 * depths[1] + w2 * depths[2]) * inv_area;
            let idx = (y as u32 * image.width() + x as u32) as usize;
            if depth > depth_buffer[idx] {
                depth_buffer[idx] = depth;
                image.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

fn edge(a: Vector2<f32>, b: Vector2<f32>, p: Vector2<f32>) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{extrude, Profile};
    use crate::io::{export_stl, StlFormat};
    use tempfile::TempDir;

    fn plate() -> Mesh {
        extrude(&Profile::centered_rect(0.0, 0.0, 40.0, 30.0), 5.0).unwrap()
    }

    #[test]
    fn test_render_covers_centre() {
        let image = render_mesh(&plate(), 200, 150).unwrap();
        assert_ne!(*image.get_pixel(100, 75), BACKGROUND);
        assert_eq!(*image.get_pixel(0, 0), BACKGROUND);
    }

    #[test]
    fn test_empty_mesh_is_rejected() {
        assert!(render_mesh(&Mesh::new(), 10, 10).is_err());
    }

    #[test]
    fn test_render_stl_to_png() {
        let temp_dir = TempDir::new().unwrap();
        let stl_path = temp_dir.path().join("plate.stl");
        let png_path = temp_dir.path().join("plate.png");
        export_stl(&plate(), &stl_path, StlFormat::Binary).unwrap();

        render_stl_to_png(&stl_path, &png_path).unwrap();

        let image = image::open(&png_path).unwrap();
        assert_eq!(image.width(), PREVIEW_WIDTH);
        assert_eq!(image.height(), PREVIEW_HEIGHT);
    }
}
