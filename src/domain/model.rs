use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const HERO_COLLECTION: &str = "hero";
pub const HERO_DOCUMENT_ID: &str = "main";
pub const SERVICES_COLLECTION: &str = "services";
pub const MATERIALS_COLLECTION: &str = "materials";

/// Raw document as the store sees it: an id plus a JSON field map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub data: HashMap<String, serde_json::Value>,
}

/// A typed record together with its store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    pub id: String,
    pub value: T,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroContent {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub subtitle: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub description: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ServiceIcon {
    Zap,
    Shield,
    #[default]
    CheckCircle,
}

impl ServiceIcon {
    pub const ALL: [ServiceIcon; 3] = [ServiceIcon::Zap, ServiceIcon::Shield, ServiceIcon::CheckCircle];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceIcon::Zap => "Zap",
            ServiceIcon::Shield => "Shield",
            ServiceIcon::CheckCircle => "CheckCircle",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceIcon::Zap => "Zap",
            ServiceIcon::Shield => "Shield",
            ServiceIcon::CheckCircle => "Check Circle",
        }
    }
}

impl fmt::Display for ServiceIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ServiceIcon {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Zap" => ServiceIcon::Zap,
            "Shield" => ServiceIcon::Shield,
            "CheckCircle" => ServiceIcon::CheckCircle,
            other => {
                tracing::warn!("Unknown service icon '{}', using CheckCircle", other);
                ServiceIcon::CheckCircle
            }
        }
    }
}

impl From<Option<String>> for ServiceIcon {
    fn from(value: Option<String>) -> Self {
        value.map(ServiceIcon::from).unwrap_or_default()
    }
}

impl From<ServiceIcon> for String {
    fn from(icon: ServiceIcon) -> Self {
        icon.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub image_url: String,
    #[serde(default)]
    pub icon: ServiceIcon,
    // 空字串代表沒有自訂圖示，更新時才能清除舊值
    #[serde(default, deserialize_with = "deserialize_text")]
    pub icon_photo_url: String,
    #[serde(default, deserialize_with = "deserialize_order_index")]
    pub order_index: i64,
}

impl Service {
    pub fn blank(order_index: i64) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            image_url: String::new(),
            icon: ServiceIcon::CheckCircle,
            icon_photo_url: String::new(),
            order_index,
        }
    }

    pub fn icon_photo(&self) -> Option<&str> {
        if self.icon_photo_url.is_empty() {
            None
        } else {
            Some(&self.icon_photo_url)
        }
    }

    pub fn image_preview(&self) -> Option<&str> {
        if self.image_url.is_empty() {
            None
        } else {
            Some(&self.image_url)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_order_index")]
    pub order_index: i64,
}

impl Material {
    pub fn blank(order_index: i64) -> Self {
        Self {
            name: String::new(),
            order_index,
        }
    }
}

pub trait Ordered {
    fn order_index(&self) -> i64;
}

impl Ordered for Service {
    fn order_index(&self) -> i64 {
        self.order_index
    }
}

impl Ordered for Material {
    fn order_index(&self) -> i64 {
        self.order_index
    }
}

/// Stable sort by order index; equal indexes keep store order.
pub fn sort_by_order<T: Ordered>(entries: &mut [Entry<T>]) {
    entries.sort_by_key(|entry| entry.value.order_index());
}

/// Stored `null` reads as an empty string.
fn deserialize_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_order_index<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(n) => Ok(n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0)),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid orderIndex '{}': {}", s, e))),
        serde_json::Value::Null => Ok(0),
        other => Err(serde::de::Error::custom(format!(
            "invalid orderIndex: {}",
            other
        ))),
    }
}
