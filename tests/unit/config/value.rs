use super::*;

#[test]
fn untagged_values_deserialize_by_shape() {
    let v: Vec<PropertyValue> =
        serde_json::from_str(r#"[true, 3, 0.5, {"x": 1, "y": 2}, "0xFF0000"]"#).unwrap();
    assert_eq!(v[0], PropertyValue::Bool(true));
    assert_eq!(v[1], PropertyValue::Number(3.0));
    assert_eq!(v[2], PropertyValue::Number(0.5));
    assert_eq!(v[3], PropertyValue::point(1.0, 2.0));
    assert_eq!(v[4], PropertyValue::Text("0xFF0000".to_owned()));
}

#[test]
fn colours_accept_int_and_hex() {
    assert_eq!(
        PropertyValue::Number(16711680.0).as_color().unwrap(),
        Rgb(0xFF0000)
    );
    assert_eq!(PropertyValue::from("#00FF00").as_color().unwrap(), Rgb(0x00FF00));
    assert!(PropertyValue::Bool(true).as_color().is_err());
}

#[test]
fn scale_accepts_uniform_number() {
    assert_eq!(
        PropertyValue::Number(2.0).as_scale().unwrap(),
        Vec2::new(2.0, 2.0)
    );
    assert_eq!(
        PropertyValue::point(1.0, 3.0).as_scale().unwrap(),
        Vec2::new(1.0, 3.0)
    );
}

#[test]
fn numbers_parse_from_numeric_strings_only() {
    assert_eq!(PropertyValue::from("0.25").as_number().unwrap(), 0.25);
    assert!(PropertyValue::from("abc").as_number().is_err());
    assert!(PropertyValue::Number(f64::NAN).as_number().is_err());
}

#[test]
fn booleans_accept_visibility_words() {
    assert!(PropertyValue::from("visible").as_bool().unwrap());
    assert!(!PropertyValue::Number(0.0).as_bool().unwrap());
    assert!(PropertyValue::from("maybe").as_bool().is_err());
}
