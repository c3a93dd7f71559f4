use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::de;

/// Job listing shown on the overseas jobs board.
///
/// `id` is a millisecond timestamp chosen by the client at creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "camelCase"))]
#[serde(rename_all = "camelCase", default)]
pub struct Job {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_i64")]
    pub id: Option<i64>,
    pub title: String,
    pub company: String,
    pub location: String,
    pub country: String,
    pub city: String,
    pub domain: String,
    pub experience: String,
    #[serde(deserialize_with = "de::i64_lenient")]
    pub min_experience: i64,
    pub time: String,
    #[cfg_attr(feature = "sqlx", sqlx(try_from = "String"))]
    pub tags: Tags,
    pub salary: String,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "type"))]
    pub job_type: String,
    pub level: String,
}

/// Tag list. Stored as comma-joined text, exchanged as a JSON array.
///
/// Decoding also accepts the joined form (`"a, b"`) since that is what the
/// admin form field holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<String>);

impl Tags {
    /// Split comma-joined text, trimming each piece and dropping blanks.
    pub fn parse(joined: &str) -> Self {
        Self::from_pieces(joined.split(','))
    }

    fn from_pieces<I, S>(pieces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            pieces
                .into_iter()
                .map(|p| p.as_ref().trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        )
    }

    /// Storage form
    pub fn joined(&self) -> String {
        self.0.join(",")
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Tags {
    fn from(joined: String) -> Self {
        Self::parse(&joined)
    }
}

impl From<Vec<String>> for Tags {
    fn from(list: Vec<String>) -> Self {
        Self::from_pieces(list)
    }
}

impl Serialize for Tags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Tags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Joined(String),
            List(Vec<String>),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            None => Tags::default(),
            Some(Raw::Joined(s)) => Tags::parse(&s),
            Some(Raw::List(list)) => Tags::from(list),
        })
    }
}
