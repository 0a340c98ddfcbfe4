use serde::{Deserialize, Deserializer};

// clients send category ids as either a JSON number or a string, so accept
// both and normalize to the text form the questions table stores
pub fn deserialize_loose_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LooseId {
        Number(i64),
        Text(String),
    }

    let value = Option::<LooseId>::deserialize(deserializer)?;
    Ok(value.map(|value| match value {
        LooseId::Number(n) => n.to_string(),
        LooseId::Text(s) => s,
    }))
}
