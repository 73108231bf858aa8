use serde::Deserialize;

use crate::money::RawAmount;

/// One row of the overdue-bills view, as the store returns it.
///
/// Only `id` is required. The amount is stored redundantly in `valot_num`,
/// `valor_num` and `valor`, with varying quality.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct RawOverdueRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub codigo: Option<String>,
    #[serde(default)]
    pub vencimento: Option<String>,
    #[serde(default)]
    pub data_vencimento: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub valor: Option<RawAmount>,
    #[serde(default)]
    pub valor_num: Option<RawAmount>,
    #[serde(default)]
    pub valot_num: Option<RawAmount>,
    #[serde(default)]
    pub pago: Option<bool>,
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub cliente_id: Option<String>,
    #[serde(default)]
    pub empresa: Option<String>,
    #[serde(
        default,
        rename = "nossoNumero",
        deserialize_with = "optional_string_or_number"
    )]
    pub nosso_numero: Option<String>,
    #[serde(
        default,
        rename = "linhaDigital",
        deserialize_with = "optional_string_or_number"
    )]
    pub linha_digital: Option<String>,
    #[serde(
        default,
        rename = "codigoBarras",
        deserialize_with = "optional_string_or_number"
    )]
    pub codigo_barras: Option<String>,
}

impl RawOverdueRecord {
    /// Due date string, preferring `data_vencimento` over `vencimento`.
    pub fn due_date_str(&self) -> Option<&str> {
        let present = |s: &&str| !s.trim().is_empty();
        self.data_vencimento
            .as_deref()
            .filter(present)
            .or_else(|| self.vencimento.as_deref().filter(present))
    }
}

/// Identifier columns may come back as JSON strings or numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl From<TextOrNumber> for String {
    fn from(value: TextOrNumber) -> Self {
        match value {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Int(n) => n.to_string(),
            TextOrNumber::Uint(n) => n.to_string(),
            TextOrNumber::Float(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    TextOrNumber::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<TextOrNumber>::deserialize(deserializer)?.map(String::from))
}
