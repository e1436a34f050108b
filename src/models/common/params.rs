//! 请求参数反序列化辅助

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// 查询参数：空值视为未提供，其余按 `FromStr` 解析
pub fn deserialize_optional_param<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    use serde::de::Error;

    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|e| Error::custom(format!("invalid value '{value}': {e}"))),
    }
}

/// 区分“字段缺失”与“显式置空”
///
/// 缺失时由 `#[serde(default)]` 给出 `None`，`null` 得到 `Some(None)`。
pub fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
