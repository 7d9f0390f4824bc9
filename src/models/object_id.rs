use mongodb::bson::{oid::ObjectId, serde_helpers::serialize_object_id_as_hex_string, Bson};
use serde::{de, Deserialize, Deserializer, Serializer};

// `_id` goes out as a plain hex string, as the front end has always read it
pub fn serialize_optional_object_id_as_hex<S>(
    value: &Option<ObjectId>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(oid) => serialize_object_id_as_hex_string(oid, serializer),
        None => serializer.serialize_none(),
    }
}

/// Accepts a BSON ObjectId, extended JSON `{"$oid": ...}` or a hex string.
pub fn deserialize_optional_object_id<'de, D>(deserializer: D) -> Result<Option<ObjectId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Bson>::deserialize(deserializer)? {
        None | Some(Bson::Null) => Ok(None),
        Some(Bson::ObjectId(oid)) => Ok(Some(oid)),
        Some(Bson::String(hex)) if hex.trim().is_empty() => Ok(None),
        Some(Bson::String(hex)) => ObjectId::parse_str(hex.trim())
            .map(Some)
            .map_err(de::Error::custom),
        Some(other) => Err(de::Error::custom(format!(
            "expected an ObjectId, found {}",
            other
        ))),
    }
}
