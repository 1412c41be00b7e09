//! JSON scene descriptions.
//!
//! A scene file names its materials once and lets spheres refer to them,
//! so every sphere using the same name shares one material instance.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::{
    Camera, Dielectric, HittableList, Lambertian, Material, Metal, RenderError, RenderResult,
    Sphere,
};
use glint_math::Vec3;

/// A loaded scene ready for rendering.
pub struct Scene {
    pub world: HittableList,
    /// Initialized camera
    pub camera: Camera,
}

/// Top-level layout of a scene file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    pub camera: CameraDescription,
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDescription>,
    #[serde(default)]
    pub spheres: Vec<SphereDescription>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraDescription {
    pub look_from: [f32; 3],
    pub look_at: [f32; 3],
    #[serde(default = "default_vup")]
    pub vup: [f32; 3],
    #[serde(default = "default_vfov")]
    pub vfov: f32,
    #[serde(default)]
    pub aperture: f32,
    /// Defaults to the distance between `look_from` and `look_at`.
    #[serde(default)]
    pub focus_dist: Option<f32>,
    #[serde(default)]
    pub aspect_ratio: Option<f32>,
}

fn default_vup() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_vfov() -> f32 {
    90.0
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDescription {
    Lambertian {
        albedo: [f32; 3],
    },
    Metal {
        albedo: [f32; 3],
        #[serde(default)]
        fuzz: f32,
    },
    Dielectric {
        ior: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SphereDescription {
    pub center: [f32; 3],
    pub radius: f32,
    pub material: String,
}

impl MaterialDescription {
    fn build(&self) -> RenderResult<Material> {
        let material = match self {
            MaterialDescription::Lambertian { albedo } => {
                Lambertian::try_new(Vec3::from_array(*albedo))?.into()
            }
            MaterialDescription::Metal { albedo, fuzz } => {
                Metal::try_new(Vec3::from_array(*albedo), *fuzz)?.into()
            }
            MaterialDescription::Dielectric { ior } => Dielectric::new(*ior)?.into(),
        };
        Ok(material)
    }
}

impl CameraDescription {
    fn build(&self) -> RenderResult<Camera> {
        let look_from = Vec3::from_array(self.look_from);
        let look_at = Vec3::from_array(self.look_at);
        let focus_dist = self
            .focus_dist
            .unwrap_or_else(|| (look_from - look_at).length());

        let mut camera = Camera::new()
            .with_position(look_from, look_at, Vec3::from_array(self.vup))
            .with_lens(self.vfov, self.aperture, focus_dist);
        if let Some(aspect_ratio) = self.aspect_ratio {
            camera = camera.with_aspect_ratio(aspect_ratio);
        }
        camera.initialize()?;
        Ok(camera)
    }
}

impl SceneDescription {
    /// Parse a scene from JSON text.
    pub fn from_json(content: &str) -> RenderResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Read and parse a scene file.
    pub fn load<P: AsRef<Path>>(path: P) -> RenderResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Read scene file {}", path.as_ref().display());
        Self::from_json(&content)
    }

    /// Validate the description and build the world and camera.
    pub fn build(&self) -> RenderResult<Scene> {
        let camera = self.camera.build()?;

        let mut materials: BTreeMap<&str, Arc<Material>> = BTreeMap::new();
        for (name, desc) in &self.materials {
            materials.insert(name.as_str(), Arc::new(desc.build()?));
        }

        let mut used = HashSet::new();
        let mut world = HittableList::new();
        for (index, sphere) in self.spheres.iter().enumerate() {
            let material = materials.get(sphere.material.as_str()).ok_or_else(|| {
                RenderError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                }
            })?;
            used.insert(sphere.material.as_str());
            world.add(Sphere::new(
                Vec3::from_array(sphere.center),
                sphere.radius,
                Arc::clone(material),
            )?);
        }

        for name in materials.keys().filter(|name| !used.contains(*name)) {
            log::warn!("Material '{}' is not used by any sphere", name);
        }
        log::info!(
            "Built scene with {} spheres and {} materials",
            world.len(),
            materials.len()
        );

        Ok(Scene { world, camera })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;

    const SCENE: &str = r#"{
        "camera": { "look_from": [0, 0, 0], "look_at": [0, 0, -1], "aspect_ratio": 2.0 },
        "materials": {
            "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] },
            "chrome": { "type": "metal", "albedo": [0.8, 0.8, 0.8] },
            "glass":  { "type": "dielectric", "ior": 1.5 }
        },
        "spheres": [
            { "center": [0, -100.5, -1], "radius": 100, "material": "ground" },
            { "center": [-1, 0, -1], "radius": 0.5, "material": "glass" },
            { "center": [-1, 0, -1], "radius": 0.4, "material": "glass" },
            { "center": [1, 0, -1], "radius": 0.5, "material": "chrome" }
        ]
    }"#;

    #[test]
    fn test_parse_scene() {
        let desc = SceneDescription::from_json(SCENE).unwrap();
        assert_eq!(desc.spheres.len(), 4);
        assert_eq!(desc.camera.vup, [0.0, 1.0, 0.0]);
        assert_eq!(desc.camera.vfov, 90.0);
        assert_eq!(
            desc.materials["chrome"],
            MaterialDescription::Metal {
                albedo: [0.8, 0.8, 0.8],
                fuzz: 0.0
            }
        );
    }

    #[test]
    fn test_build_shares_materials() {
        let scene = SceneDescription::from_json(SCENE).unwrap().build().unwrap();
        assert_eq!(scene.world.len(), 4);
        assert_eq!(scene.camera.aspect_ratio(), 2.0);

        let spheres: Vec<&Sphere> = scene.world.iter().collect();
        assert!(Arc::ptr_eq(spheres[1].material(), spheres[2].material()));
        assert!(!Arc::ptr_eq(spheres[0].material(), spheres[3].material()));
    }

    #[test]
    fn test_unknown_material() {
        let json = r#"{
            "camera": { "look_from": [0, 0, 0], "look_at": [0, 0, -1] },
            "spheres": [ { "center": [0, 0, -1], "radius": 0.5, "material": "missing" } ]
        }"#;
        let err = SceneDescription::from_json(json).unwrap().build().err().unwrap();
        assert!(matches!(
            err,
            RenderError::UnknownMaterial { index: 0, ref name } if name == "missing"
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let json = r#"{
            "camera": { "look_from": [0, 0, 0], "look_at": [0, 0, -1] },
            "materials": { "m": { "type": "lambertian", "albedo": [1, 1, 1] } },
            "spheres": [ { "center": [0, 0, -1], "radius": -2, "material": "m" } ]
        }"#;
        let err = SceneDescription::from_json(json).unwrap().build().err().unwrap();
        assert!(matches!(
            err,
            RenderError::Config(ConfigError::InvalidRadius(r)) if r == -2.0
        ));

        let json = r#"{
            "camera": { "look_from": [0, 0, 0], "look_at": [0, 0, -1] },
            "materials": { "g": { "type": "dielectric", "ior": 0 } }
        }"#;
        let err = SceneDescription::from_json(json).unwrap().build().err().unwrap();
        assert!(matches!(err, RenderError::Config(ConfigError::InvalidIor(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SceneDescription::from_json("{ \"camera\": 3 }"),
            Err(RenderError::SceneParse(_))
        ));
        let unknown_type = r#"{
            "camera": { "look_from": [0, 0, 0], "look_at": [0, 0, -1] },
            "materials": { "m": { "type": "plastic" } }
        }"#;
        assert!(SceneDescription::from_json(unknown_type).is_err());
    }

    #[test]
    fn test_focus_distance_defaults_to_target_distance() {
        let desc = SceneDescription::from_json(
            r#"{ "camera": { "look_from": [0, 0, 3], "look_at": [0, 0, -1], "aperture": 0.5 } }"#,
        )
        .unwrap();
        assert_eq!(desc.camera.focus_dist, None);
        assert!(desc.build().is_ok());
    }
}
