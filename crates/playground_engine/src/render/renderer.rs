//! three-d scene renderer
//!
//! Mirrors [`Scene`] into GPU meshes. A `Gm` is created the first frame an
//! object shows up and only its transformation changes afterwards; the scene
//! never removes objects, so neither does the renderer.

use crate::assets::{EnvironmentMap, ImageData};
use crate::core::{LightingConfig, WindowConfig};
use crate::foundation::math::{mat4_to_cols_array, vec3_from_array, Mat4 as NaMat4, Vec3 as NaVec3};
use crate::render::camera::OrbitControls;
use crate::scene::{MeshId, MeshShape, Scene, SceneObject};
use slotmap::SecondaryMap;
use three_d::{
    degrees, vec3, AmbientLight, Camera, ClearState, Context, CpuMaterial, CpuMesh, CpuTexture,
    DirectionalLight, Gm, Light, Mat4, Mesh, PhysicalMaterial, RenderTarget, Skybox, Srgba,
    TextureData, Viewport,
};

type ObjectModel = Gm<Mesh, PhysicalMaterial>;

/// Draws a [`Scene`] with ambient and shadowed directional light
pub struct SceneRenderer {
    context: Context,
    models: SecondaryMap<MeshId, ObjectModel>,
    ambient: AmbientLight,
    environment_ambient: Option<AmbientLight>,
    directional: DirectionalLight,
    skybox: Option<Skybox>,
    shadow_map_size: u32,
    clear_color: [u8; 3],
}

impl SceneRenderer {
    /// Set up lights, and the skybox when an environment map is available
    pub fn new(
        context: &Context,
        lighting: &LightingConfig,
        window: &WindowConfig,
        environment: Option<&EnvironmentMap>,
    ) -> Self {
        let skybox = environment.map(|map| {
            let [px, nx, py, ny, pz, nz] = &map.faces;
            Skybox::new(
                context,
                &cube_face(px),
                &cube_face(nx),
                &cube_face(py),
                &cube_face(ny),
                &cube_face(pz),
                &cube_face(nz),
            )
        });

        // Objects that opt out of the environment map still get flat ambient light
        let ambient = AmbientLight::new(context, lighting.ambient_intensity, Srgba::WHITE);
        let environment_ambient = skybox.as_ref().map(|skybox| {
            AmbientLight::new_with_environment(context, lighting.ambient_intensity, Srgba::WHITE, skybox.texture())
        });

        // The light sits at `directional_position` and shines at the origin
        let toward_origin = -vec3_from_array(lighting.directional_position);
        let directional = DirectionalLight::new(
            context,
            lighting.directional_intensity,
            Srgba::WHITE,
            &vec3(toward_origin.x, toward_origin.y, toward_origin.z),
        );

        log::info!(
            "Scene renderer created (environment lighting: {})",
            if skybox.is_some() { "on" } else { "off" }
        );

        Self {
            context: context.clone(),
            models: SecondaryMap::new(),
            ambient,
            environment_ambient,
            directional,
            skybox,
            shadow_map_size: lighting.shadow_map_size,
            clear_color: window.clear_color,
        }
    }

    /// Create models for new objects and push every transform to the GPU
    pub fn sync(&mut self, scene: &Scene) {
        for (id, object) in scene.iter() {
            if !self.models.contains_key(id) {
                log::debug!("Creating GPU model for {:?} ({:?})", id, object.shape);
                let model = build_model(&self.context, object);
                self.models.insert(id, model);
            }
            if let Some(model) = self.models.get_mut(id) {
                model.set_transformation(model_matrix(object));
            }
        }
    }

    /// Render the scene into `target`
    pub fn render(&mut self, target: &RenderTarget<'_>, camera: &Camera, scene: &Scene) {
        self.sync(scene);

        let casters: Vec<&Mesh> = scene
            .iter()
            .filter(|(_, object)| object.cast_shadow)
            .filter_map(|(id, _)| self.models.get(id).map(|model| &model.geometry))
            .collect();
        self.directional.generate_shadow_map(self.shadow_map_size, casters);

        let [r, g, b] = self.clear_color.map(|channel| f32::from(channel) / 255.0);
        target.clear(ClearState::color_and_depth(r, g, b, 1.0, 1.0));
        if let Some(skybox) = &self.skybox {
            target.render(camera, skybox, &[]);
        }

        let (mapped, plain) = split_by_environment(scene, self.environment_ambient.is_some());
        let plain_lights: [&dyn Light; 2] = [&self.ambient, &self.directional];
        target.render(camera, plain.iter().filter_map(|id| self.models.get(*id)), &plain_lights);
        if let Some(environment_ambient) = &self.environment_ambient {
            let mapped_lights: [&dyn Light; 2] = [environment_ambient, &self.directional];
            target.render(camera, mapped.iter().filter_map(|id| self.models.get(*id)), &mapped_lights);
        }
    }
}

/// Perspective camera matching the orbit controls
pub fn perspective_camera(viewport: Viewport, controls: &OrbitControls, fov_degrees: f32, near: f32, far: f32) -> Camera {
    let (position, target) = (to_three_d_vec(controls.position()), to_three_d_vec(controls.target()));
    Camera::new_perspective(viewport, position, target, vec3(0.0, 1.0, 0.0), degrees(fov_degrees), near, far)
}

/// Move an existing camera to where the orbit controls are
pub fn apply_controls(camera: &mut Camera, controls: &OrbitControls) {
    camera.set_view(
        to_three_d_vec(controls.position()),
        to_three_d_vec(controls.target()),
        vec3(0.0, 1.0, 0.0),
    );
}

/// Split object ids into (environment lit, flat lit).
///
/// Without an environment map every object is flat lit.
fn split_by_environment(scene: &Scene, has_environment: bool) -> (Vec<MeshId>, Vec<MeshId>) {
    let (mapped, plain): (Vec<_>, Vec<_>) = scene
        .iter()
        .partition(|(_, object)| has_environment && object.material.environment_mapped);
    (
        mapped.into_iter().map(|(id, _)| id).collect(),
        plain.into_iter().map(|(id, _)| id).collect(),
    )
}

fn to_three_d_vec(v: NaVec3) -> three_d::Vec3 {
    vec3(v.x, v.y, v.z)
}

fn model_matrix(object: &SceneObject) -> Mat4 {
    let matrix = object.transform.to_matrix() * NaMat4::new_nonuniform_scaling(&object.shape.unit_scale());
    Mat4::from(mat4_to_cols_array(&matrix))
}

fn build_model(context: &Context, object: &SceneObject) -> ObjectModel {
    let cpu_mesh = match object.shape {
        MeshShape::Sphere { segments, .. } => CpuMesh::sphere(segments),
        MeshShape::Cuboid { .. } => CpuMesh::cube(),
        MeshShape::Plane { .. } => CpuMesh::square(),
    };
    let [r, g, b] = object.material.color;
    let material = PhysicalMaterial::new_opaque(
        context,
        &CpuMaterial {
            albedo: Srgba::new(r, g, b, 255),
            metallic: object.material.metalness,
            roughness: object.material.roughness,
            ..Default::default()
        },
    );
    Gm::new(Mesh::new(context, &cpu_mesh), material)
}

fn cube_face(image: &ImageData) -> CpuTexture {
    CpuTexture {
        data: TextureData::RgbaU8(image.pixels()),
        width: image.width,
        height: image.height,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Transform;
    use crate::scene::SurfaceMaterial;

    fn object(environment_mapped: bool) -> SceneObject {
        SceneObject::new(
            MeshShape::Sphere { radius: 0.5, segments: 8 },
            SurfaceMaterial { environment_mapped, ..SurfaceMaterial::default() },
            Transform::identity(),
        )
    }

    #[test]
    fn test_environment_flag_picks_the_light_set() {
        let mut scene = Scene::new();
        let shiny = scene.add(object(true));
        let matte = scene.add(object(false));

        let (mapped, plain) = split_by_environment(&scene, true);
        assert_eq!(mapped, vec![shiny]);
        assert_eq!(plain, vec![matte]);
    }

    #[test]
    fn test_without_environment_map_everything_is_flat_lit() {
        let mut scene = Scene::new();
        let shiny = scene.add(object(true));
        let matte = scene.add(object(false));

        let (mapped, plain) = split_by_environment(&scene, false);
        assert!(mapped.is_empty());
        assert_eq!(plain, vec![shiny, matte]);
    }
}
