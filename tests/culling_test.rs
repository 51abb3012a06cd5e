//! Thin double-sided faces through the full geometry, transform and cull
//! stages: exactly one side of a coincident pair survives.

mod common;

use block_ngin::data_structures::instance::ModelInstance;
use block_ngin::data_structures::model::{Direction, Element};
use block_ngin::pipelines::{cull, geometry, transform};
use block_ngin::{InnerSpace, RenderOptions, Transform as _};
use common::test_utils as fixtures;
use std::collections::HashMap;

fn cross_element(rotation: &str) -> Element {
    serde_json::from_str(&format!(
        r##"{{
            "from": [0, 0, 8],
            "to": [16, 16, 8],
            {rotation}
            "faces": {{
                "north": {{ "texture": "#cross" }},
                "south": {{ "texture": "#cross" }}
            }}
        }}"##
    ))
    .expect("element fixture must parse")
}

fn cross_instance() -> ModelInstance {
    ModelInstance {
        name: "cross".into(),
        parent_chain: Vec::new(),
        textures: HashMap::from([("cross".to_string(), "block/face_north".to_string())]),
        display: HashMap::new(),
        elements: Vec::new(),
    }
}

fn view_inputs(yaw_deg: f32) -> transform::ViewInputs {
    transform::ViewInputs {
        yaw_deg,
        pitch_deg: 0.0,
        roll_deg: 0.0,
        gui_transform: false,
        additional_scale: 1.0,
        additional_translation: block_ngin::Vector3::new(0.0, 0.0, 0.0),
    }
}

fn surviving_directions(element: &Element, yaw_deg: f32) -> Vec<Direction> {
    let instance = cross_instance();
    let cullable = cull::cullable_directions(element, &instance);
    let view = transform::view_matrix(&instance, &view_inputs(yaw_deg));
    geometry::build_element(element, &instance, &cullable)
        .into_iter()
        .filter(|face| {
            let normal = view.transform_vector(face.normal).normalize();
            !(face.cullable && cull::facing_away(normal))
        })
        .map(|face| face.direction)
        .collect()
}

#[test]
fn exactly_one_side_of_a_thin_pair_survives() {
    let element = cross_element("");
    assert_eq!(surviving_directions(&element, 0.0), vec![Direction::North]);
    assert_eq!(surviving_directions(&element, 180.0), vec![Direction::South]);
}

#[test]
fn rotated_thin_pair_still_drops_one_side() {
    let element = cross_element(r##""rotation": { "angle": 45, "axis": "y" },"##);
    let survivors = surviving_directions(&element, 0.0);
    assert_eq!(survivors.len(), 1, "survivors: {survivors:?}");
}

#[test]
fn disable_culling_keeps_renders_stable() {
    fixtures::init_logs();
    let definition = block_ngin::resources::model::parse_model(
        r##"{
            "textures": { "cross": "block/face_north" },
            "elements": [{
                "from": [0, 0, 8],
                "to": [16, 16, 8],
                "faces": {
                    "north": { "texture": "#cross" },
                    "south": { "texture": "#cross" }
                }
            }]
        }"##,
    )
    .unwrap();
    let renderer = block_ngin::Renderer::new(
        HashMap::from([("cross".to_string(), definition)]),
        fixtures::cube_textures(),
    );
    let options = RenderOptions {
        size: 64,
        gui_transform: false,
        ..RenderOptions::default()
    };
    let culled = renderer.render("cross", &options).unwrap();
    let unculled = renderer
        .render(
            "cross",
            &RenderOptions {
                disable_culling: true,
                ..options
            },
        )
        .unwrap();

    // Both sides carry the same texture, so keeping the redundant back face
    // must not change a single pixel.
    assert_eq!(culled.as_raw(), unculled.as_raw());
    assert!(culled.pixels().any(|p| p[3] > 0));
}
