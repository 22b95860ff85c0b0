//!
//! Serialization of floating point values that JSON cannot represent.
//!
//! Finite values are written as JSON numbers. `NaN` and infinities are written as their
//! string form, and both forms are accepted when reading.
//!

///
/// Serializes a float as a number if it is finite, and as a string otherwise.
///
pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_str(value.to_string().as_str())
    }
}

///
/// Deserializes a float from either a number or its string form.
///
pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Representation {
        Number(f64),
        String(String),
    }

    match <Representation as serde::Deserialize>::deserialize(deserializer)? {
        Representation::Number(value) => Ok(value),
        Representation::String(string) => string
            .parse::<f64>()
            .map_err(|error| serde::de::Error::custom(format!("float `{string}`: {error}"))),
    }
}
