//! Reader for JSON scene documents.
//!
//! ```json
//! {
//!   "settings": { "resolution": [320, 240], "fps": 24, "samples": 4 },
//!   "keyframes": [
//!     {
//!       "offset": 1.0,
//!       "background": [0.0, 0.0, 0.0],
//!       "camera": { "name": "main", "position": [0, 0, 5], "lookat": [0, 0, 0] },
//!       "lights": [ { "name": "key", "position": [5, 5, 5], "diffuse": [1, 1, 1] } ],
//!       "objects": [ { "type": "sphere", "name": "ball", "radius": 1.0 } ]
//!     }
//!   ]
//! }
//! ```
//!
//! Keyframes carry forward exactly like the text format: each one only
//! needs to list what changed.

use std::collections::BTreeMap;

use log::warn;

use crate::{
    geometry::ShapeKind,
    scene::{Animation, AnimationBuilder, Properties, SceneError},
    vec3::Vec3,
};

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    settings: Settings,
    #[serde(default)]
    keyframes: Vec<Keyframe>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Settings {
    resolution: Option<(u32, u32)>,
    fps: Option<u32>,
    max_depth: Option<u32>,
    samples: Option<f64>,
    #[serde(rename = "loop")]
    looping: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct Keyframe {
    #[serde(default)]
    offset: f64,
    background: Option<[f64; 3]>,
    camera: Option<Entity>,
    #[serde(default)]
    lights: Vec<Entity>,
    #[serde(default)]
    objects: Vec<Entity>,
}

#[derive(Debug, Deserialize)]
struct Entity {
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(flatten)]
    properties: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Value {
    Scalar(f64),
    Vector(Vec<f64>),
}

impl Value {
    fn as_slice(&self) -> &[f64] {
        match self {
            Value::Scalar(v) => std::slice::from_ref(v),
            Value::Vector(v) => v,
        }
    }
}

fn apply<T: Properties + ?Sized>(target: &mut T, entity: &Entity) -> Result<(), SceneError> {
    for (key, value) in &entity.properties {
        let key = key.to_ascii_lowercase();
        let known = target
            .apply(&key, value.as_slice())
            .map_err(|source| SceneError::EntityProperty {
                name: entity.name.clone(),
                source,
            })?;

        if !known {
            warn!("`{}`: unknown property `{}`", entity.name, key);
        }
    }

    Ok(())
}

/// Parses a JSON scene into an [`Animation`].
pub fn parse(content: &str) -> Result<Animation, SceneError> {
    let document: Document = serde_json::from_str(content)?;
    let mut builder = AnimationBuilder::new();

    let settings = document.settings;
    if let Some((width, height)) = settings.resolution {
        builder.resolution(width, height);
    }
    if let Some(fps) = settings.fps {
        builder.fps(fps);
    }
    if let Some(depth) = settings.max_depth {
        builder.max_depth(depth);
    }
    if let Some(samples) = settings.samples {
        builder.samples(samples);
    }
    if let Some(looping) = settings.looping {
        builder.looping(looping);
    }

    for keyframe in &document.keyframes {
        builder.keyframe(keyframe.offset);

        if let Some(background) = keyframe.background {
            builder.background(Vec3::from(background));
        }
        if let Some(camera) = &keyframe.camera {
            apply(builder.camera(&camera.name), camera)?;
        }
        for light in &keyframe.lights {
            apply(builder.light(&light.name), light)?;
        }
        for object in &keyframe.objects {
            let keyword = object.kind.as_deref().unwrap_or_default().to_ascii_lowercase();
            let kind = ShapeKind::from_keyword(&keyword).ok_or_else(|| SceneError::UnknownShape {
                name: object.name.clone(),
                kind: keyword.clone(),
            })?;

            apply(builder.object(kind, &object.name), object)?;
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Shape;

    #[test]
    fn parses_document() {
        let animation = parse(
            r#"{
                "settings": { "resolution": [32, 16], "fps": 12, "samples": 9, "loop": true },
                "keyframes": [
                    {
                        "offset": 2.0,
                        "background": [0.5, 0.5, 0.5],
                        "camera": { "name": "main", "position": [0, 0, 4], "fov": 45 },
                        "lights": [ { "name": "key", "position": [1, 2, 3] } ],
                        "objects": [
                            { "type": "triangle", "name": "tri", "v3": [0, 2, 0], "shininess": 8 },
                            { "type": "Sphere", "name": "ball", "radius": 0.5 }
                        ]
                    },
                    { "offset": 1.0, "objects": [ { "type": "sphere", "name": "ball", "radius": 2 } ] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!((32, 16), (animation.width, animation.height));
        assert_eq!(12, animation.fps);
        assert_eq!(3, animation.samples);
        assert!(animation.looping);
        assert_eq!(2, animation.keyframes.len());

        let first = &animation.keyframes[0];
        assert_eq!(45.0, first.camera.fov);
        assert_eq!(Some(&Vec3::new(1.0, 2.0, 3.0)), first.lights.get("key").map(|l| &l.position));
        assert_eq!(&["tri", "ball"], first.objects.names());
        assert_eq!(8.0, first.objects.values()[0].material.shininess);

        let second = &animation.keyframes[1];
        assert_eq!(Vec3::new(0.5, 0.5, 0.5), second.background);
        match second.objects.values()[1].shape {
            Shape::Sphere(s) => assert_eq!(2.0, s.radius),
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn unknown_shape_is_rejected() {
        let err = parse(r#"{ "keyframes": [ { "objects": [ { "type": "cube", "name": "c" } ] } ] }"#)
            .unwrap_err();

        match err {
            SceneError::UnknownShape { name, kind } => {
                assert_eq!("c", name);
                assert_eq!("cube", kind);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(parse("{ \"keyframes\": ["), Err(SceneError::Json(..))));
    }

    #[test]
    fn zero_height_is_rejected() {
        let err = parse(r#"{ "settings": { "resolution": [8, 0] }, "keyframes": [ {} ] }"#).unwrap_err();

        assert!(matches!(err, SceneError::InvalidResolution { width: 8, height: 0 }));
    }
}
