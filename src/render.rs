//! Render composition: the public entry point of the crate.
//!
//! [`Renderer`] wires the pipeline stages into one linear pass:
//! resolve, build geometry, transform, cull, fit, rasterize. Each call
//! allocates its own canvas and depth buffer; the only state shared across
//! calls is the resolver's instance cache and the texture source, both of
//! which are concurrency-safe, so renders may run in parallel.

use crate::data_structures::instance::ModelInstance;
use crate::data_structures::model::ModelDefinition;
use crate::error::ResolveError;
use crate::pipelines::{cull, fit, geometry, raster, transform};
use crate::resolver::Resolver;
use crate::resources::texture::TextureSource;
use cgmath::{InnerSpace, Point3, Transform as _, Vector3};
use image::RgbaImage;
use std::collections::HashMap;
use std::sync::Arc;

/// Options controlling a single render call.
///
/// Every toggle lives here rather than in process-wide state, keeping
/// renders referentially transparent and safe under parallel execution.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Output canvas edge length in pixels.
    pub size: u32,
    pub yaw_deg: f32,
    pub pitch_deg: f32,
    pub roll_deg: f32,
    /// 0 renders orthographic, 1 full pinhole perspective.
    pub perspective_amount: f32,
    /// Frame the model with its `gui` display transform (or the built-in
    /// default when the model defines none).
    pub gui_transform: bool,
    /// Fraction of the canvas left empty on each side, clamped to [0, 0.4].
    pub padding: f32,
    pub additional_scale: f32,
    /// Extra translation in sixteenths of a block.
    pub additional_translation: Vector3<f32>,
    /// Debug escape hatch: keep redundant back-side thin faces.
    pub disable_culling: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: 64,
            yaw_deg: 0.0,
            pitch_deg: 0.0,
            roll_deg: 0.0,
            perspective_amount: 0.0,
            gui_transform: true,
            padding: 0.1,
            additional_scale: 1.0,
            additional_translation: Vector3::new(0.0, 0.0, 0.0),
            disable_culling: false,
        }
    }
}

impl RenderOptions {
    fn view_inputs(&self) -> transform::ViewInputs {
        transform::ViewInputs {
            yaw_deg: self.yaw_deg,
            pitch_deg: self.pitch_deg,
            roll_deg: self.roll_deg,
            gui_transform: self.gui_transform,
            additional_scale: self.additional_scale,
            additional_translation: self.additional_translation,
        }
    }
}

/// Renders resolved block models into flat RGBA images.
pub struct Renderer {
    resolver: Resolver,
    textures: Arc<dyn TextureSource>,
}

impl Renderer {
    /// Build a renderer over a definition table and a texture source.
    pub fn new(
        definitions: HashMap<String, ModelDefinition>,
        textures: Arc<dyn TextureSource>,
    ) -> Self {
        Self {
            resolver: Resolver::new(definitions),
            textures,
        }
    }

    /// Resolve a model by name and render it.
    pub fn render(&self, name: &str, options: &RenderOptions) -> Result<RgbaImage, ResolveError> {
        let instance = self.resolver.resolve(name)?;
        Ok(self.render_model(&instance, options))
    }

    /// Render an already-resolved model instance.
    ///
    /// Infallible by design: missing textures fall back to the placeholder
    /// and degenerate geometry is skipped, so the worst case is an empty
    /// (fully transparent) canvas.
    pub fn render_model(&self, instance: &ModelInstance, options: &RenderOptions) -> RgbaImage {
        let view = transform::view_matrix(instance, &options.view_inputs());

        // Geometry: per-element quads with thin-pair candidates marked.
        let mut faces = Vec::new();
        for element in &instance.elements {
            let cullable = cull::cullable_directions(element, instance);
            faces.extend(geometry::build_element(element, instance, &cullable));
        }

        // Transform into view space and project onto the image plane.
        let mut projected = Vec::with_capacity(faces.len());
        for face in faces {
            let corners = face.corners.map(|corner| {
                let viewed = view.transform_point(Point3::new(corner.x, corner.y, corner.z));
                transform::project(
                    Vector3::new(viewed.x, viewed.y, viewed.z),
                    options.perspective_amount,
                )
            });
            let normal = view.transform_vector(face.normal).normalize();
            if face.cullable && !options.disable_culling && cull::facing_away(normal) {
                continue;
            }
            projected.push((corners, face));
        }

        let Some(content) = fit::Bounds2::of_points(
            projected.iter().flat_map(|(corners, _)| corners.iter().copied()),
        ) else {
            log::debug!("model '{}' produced no visible geometry", instance.name);
            return RgbaImage::new(options.size, options.size);
        };
        let reference = fit::reference_bounds(&view, options.perspective_amount);
        let placement = fit::Placement::compute(options.size, options.padding, &reference, &content);

        let mut triangles = Vec::with_capacity(projected.len() * 2);
        for (corners, face) in &projected {
            let screen = corners.map(|corner| placement.to_screen(corner));
            let texture = self.textures.get_texture(&face.texture);
            let rect = texture.first_frame_rect();
            // Quad split matching the winding in pipelines::geometry.
            for [i, j, k] in [[0usize, 2, 1], [0, 3, 2]] {
                triangles.push(raster::Triangle {
                    positions: [screen[i], screen[j], screen[k]],
                    uvs: [face.uvs[i], face.uvs[j], face.uvs[k]],
                    texture: Arc::clone(&texture),
                    rect,
                });
            }
        }
        log::debug!(
            "rendering '{}': {} triangles onto {}px canvas",
            instance.name,
            triangles.len(),
            options.size
        );
        raster::rasterize(triangles, options.size)
    }
}
