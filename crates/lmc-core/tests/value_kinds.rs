use lmc_core::Value;

#[test]
fn typed_accessors_respect_kind() {
    assert_eq!(Value::Bool(true).as_bool(), Some(true));
    assert_eq!(Value::Bool(true).as_int(), None);
    assert_eq!(Value::Int(3).as_int(), Some(3));
    assert_eq!(Value::Int(3).as_real(), Some(3.0));
    assert_eq!(Value::Real(0.25).as_real(), Some(0.25));
    assert_eq!(Value::Real(0.25).as_int(), None);
    assert_eq!(Value::Bool(false).as_real(), None);
}

#[test]
fn values_round_trip_json() {
    for value in [Value::Bool(false), Value::Int(-4), Value::Real(1.5)] {
        let json = serde_json::to_string(&value).expect("serialize");
        let decoded: Value = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, value);
    }
    assert_eq!(Value::from(2_i64).kind(), "int");
    assert_eq!(Value::from(true).to_string(), "true");
}
