// Browser-side checks for the JS boundary. JsValue errors only exist on wasm32.
// Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use scroll_motion::{Frame, WasmAnimator};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const FAQ_CONFIG: &str = r#"{
    "name": "faq",
    "tracks": [{
        "element": "faqs-section",
        "spring": "FAQ",
        "offset": ["start end", "start center"],
        "bindings": [
            { "target": "faqs-section", "property": "opacity",
              "stages": [{ "input": [0, 0.5], "output": [0.3, 1] }] }
        ]
    }]
}"#;

#[wasm_bindgen_test]
fn invalid_json_is_rejected() {
    let err = WasmAnimator::new("{not json").err().expect("should fail");
    let message = err.as_string().unwrap_or_default();
    assert!(message.contains("Invalid animator config"));
}

#[wasm_bindgen_test]
fn unknown_preset_is_rejected() {
    let config = FAQ_CONFIG.replace("\"FAQ\"", "\"NOPE\"");
    let err = WasmAnimator::new(&config).err().expect("should fail");
    assert!(err.as_string().unwrap_or_default().contains("NOPE"));
}

#[wasm_bindgen_test]
fn unknown_scene_is_rejected() {
    assert!(WasmAnimator::scene("hero").is_err());
}

#[wasm_bindgen_test]
fn bad_geometry_is_rejected() {
    let mut animator = WasmAnimator::new(FAQ_CONFIG).expect("valid config");
    assert!(animator.frame(16.0, "42").is_err());
}

#[wasm_bindgen_test]
fn frame_json_round_trip() {
    let mut animator = WasmAnimator::new(FAQ_CONFIG).expect("valid config");
    assert!(animator.request_frame(0.0));

    let geometry = r#"{"viewport":{"width":1280,"height":800},
        "rects":{"faqs-section":{"top":0,"height":600}}}"#;
    let output = animator.frame(16.0, geometry).expect("valid geometry");
    let frame: Frame = serde_json::from_str(&output).expect("frame json");
    assert!(frame.keep_running);
    assert_eq!(frame.writes.len(), 1);
    assert_eq!(frame.writes[0].property, "opacity");
}

#[wasm_bindgen_test]
fn detached_subject_stops() {
    let mut animator = WasmAnimator::new(FAQ_CONFIG).expect("valid config");
    animator.request_frame(0.0);
    let output = animator
        .frame(16.0, r#"{"viewport":{"width":1280,"height":800}}"#)
        .expect("valid geometry");
    let frame: Frame = serde_json::from_str(&output).expect("frame json");
    assert!(!frame.keep_running);
    assert_eq!(animator.track_count(), 0);
}
