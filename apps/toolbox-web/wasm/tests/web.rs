//! Browser-side checks for values handed to JavaScript
//!
//! Run with `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn get(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn prime_result_is_plain_object() {
    let result = toolbox_wasm::calculators::check_prime(97.0).unwrap();
    assert!(result.is_object());
    assert!(!result.is_instance_of::<js_sys::Map>());
    assert_eq!(get(&result, "is_prime").as_bool(), Some(true));
    assert_eq!(get(&result, "number").as_f64(), Some(97.0));
    assert_eq!(get(&result, "factorization").as_string().as_deref(), Some("97"));
}

#[wasm_bindgen_test]
fn workday_shift_is_plain_object() {
    let shift = toolbox_wasm::calculators::add_workdays("2024-01-05", 1, None).unwrap();
    assert!(!shift.is_instance_of::<js_sys::Map>());
    assert_eq!(get(&shift, "end").as_string().as_deref(), Some("2024-01-08"));
}

#[wasm_bindgen_test]
fn format_list_entries_are_plain_objects() {
    let formats = toolbox_wasm::barcode::list_barcode_formats().unwrap();
    let first = js_sys::Array::from(&formats).get(0);
    assert!(!first.is_instance_of::<js_sys::Map>());
    assert!(get(&first, "label").is_string());
}
