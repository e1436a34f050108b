use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::utils::validate::{FieldErrors, Validate};

/// 嵌套的上级对象：引用已有记录，或随请求一并创建
///
/// `{"id": 3}` 引用已有记录，不含 `id` 的对象按创建请求解析。
/// 引用中出现 `id` 以外的字段会被拒绝。
#[derive(Debug, Clone)]
pub enum Nested<T> {
    Existing { id: i64 },
    New(T),
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Nested<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Value::Object(fields) = Value::deserialize(deserializer)? else {
            return Err(D::Error::custom(
                "expected {\"id\": <pk>} or the fields of a new record",
            ));
        };

        match fields.get("id") {
            Some(id) if fields.len() == 1 => id
                .as_i64()
                .map(|id| Nested::Existing { id })
                .ok_or_else(|| D::Error::custom("Incorrect type. Expected pk value.")),
            Some(_) => Err(D::Error::custom(
                "a reference accepts only \"id\"; omit \"id\" to create a new record",
            )),
            None => T::deserialize(Value::Object(fields))
                .map(Nested::New)
                .map_err(D::Error::custom),
        }
    }
}

impl<T> Nested<T> {
    pub fn existing_id(&self) -> Option<i64> {
        match self {
            Nested::Existing { id } => Some(*id),
            Nested::New(_) => None,
        }
    }
}

impl<T: Validate> Nested<T> {
    /// 仅校验随请求创建的部分
    pub fn collect_nested_errors(&self, prefix: &str, errors: &mut FieldErrors) {
        if let Nested::New(inner) = self {
            errors.nested(prefix, inner);
        }
    }
}

impl<T> From<i64> for Nested<T> {
    fn from(id: i64) -> Self {
        Nested::Existing { id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Child {
        title: String,
    }

    #[test]
    fn test_reference_and_embedded_forms() {
        let by_id: Nested<Child> = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(by_id.existing_id(), Some(7));

        let embedded: Nested<Child> = serde_json::from_str(r#"{"title": "Math"}"#).unwrap();
        match embedded {
            Nested::New(child) => assert_eq!(child.title, "Math"),
            Nested::Existing { .. } => panic!("expected embedded payload"),
        }
    }

    #[test]
    fn test_reference_with_extra_fields_is_rejected() {
        let err = serde_json::from_str::<Nested<Child>>(r#"{"id": 5, "title": "X"}"#).unwrap_err();
        assert!(err.to_string().contains("only \"id\""), "{err}");

        let err = serde_json::from_str::<Nested<Child>>(r#"{"id": "five"}"#).unwrap_err();
        assert!(err.to_string().contains("pk value"), "{err}");
    }

    #[test]
    fn test_embedded_payload_reports_missing_field() {
        let err = serde_json::from_str::<Nested<Child>>("{}").unwrap_err();
        assert!(err.to_string().contains("missing field `title`"), "{err}");

        assert!(serde_json::from_str::<Nested<Child>>("[1]").is_err());
    }
}
