//! 字段校验规则
//!
//! 所有有长度限制的字符串字段共享同一个上限 [`CHARS_DEFAULT`]，
//! 成绩只能取 1-5，出勤代码只能取 [`PRESENCE_CODES`] 中的值。

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// 字符串字段的统一长度上限（按字符计）
pub const CHARS_DEFAULT: usize = 40;

/// 成绩取值范围
pub const MARK_MIN: i32 = 1;
pub const MARK_MAX: i32 = 5;

/// 出勤代码（Н = 缺席）
pub const PRESENCE_CODES: &[&str] = &["Н"];

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_INVALID_DATE: &str = "Enter a valid date.";
pub const MSG_INVALID_TIME: &str = "Enter a valid time.";
pub const MSG_INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";
pub const MSG_MARK_AND_PRESENCE_EMPTY: &str = "Mark and presence cannot be both empty";

/// 字段级与非字段级错误集合
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldErrors {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub non_field_errors: Vec<String>,
}

impl FieldErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field_errors.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    /// 校验嵌套对象，错误字段名加上 `prefix.` 前缀
    pub fn nested<V: Validate + ?Sized>(&mut self, prefix: &str, value: &V) {
        let mut inner = FieldErrors::default();
        value.collect_errors(&mut inner);

        for (field, messages) in inner.fields {
            self.fields
                .entry(format!("{prefix}.{field}"))
                .or_default()
                .extend(messages);
        }
        if !inner.non_field_errors.is_empty() {
            self.fields
                .entry(prefix.to_string())
                .or_default()
                .extend(inner.non_field_errors);
        }
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self
            .non_field_errors
            .iter()
            .map(|msg| msg.to_string())
            .collect();
        for (field, messages) in &self.fields {
            parts.push(format!("{field}: {}", messages.join(" ")));
        }
        write!(f, "{}", parts.join("; "))
    }
}

/// 写入前的校验入口
pub trait Validate {
    fn collect_errors(&self, errors: &mut FieldErrors);

    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        self.collect_errors(&mut errors);
        errors.into_result()
    }
}

fn too_long_message() -> String {
    format!("Ensure this field has no more than {CHARS_DEFAULT} characters.")
}

/// 必填且有长度上限的字符串
pub fn check_required_text(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, MSG_REQUIRED);
    } else {
        check_text_length(errors, field, value);
    }
}

/// 仅检查长度上限（允许空串）
pub fn check_text_length(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.chars().count() > CHARS_DEFAULT {
        errors.add(field, too_long_message());
    }
}

pub fn parse_day(value: &str) -> Result<NaiveDate, &'static str> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| MSG_INVALID_DATE)
}

/// 支持 `HH:MM`、`HH:MM:SS` 以及带小数秒的写法
pub fn parse_time(value: &str) -> Result<NaiveTime, &'static str> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| MSG_INVALID_TIME)
}

pub fn check_day(errors: &mut FieldErrors, field: &str, value: &str) {
    if let Err(msg) = parse_day(value) {
        errors.add(field, msg);
    }
}

pub fn check_time(errors: &mut FieldErrors, field: &str, value: &str) {
    if let Err(msg) = parse_time(value) {
        errors.add(field, msg);
    }
}

pub fn check_mark_value(errors: &mut FieldErrors, field: &str, value: Option<i32>) {
    if let Some(mark) = value
        && !(MARK_MIN..=MARK_MAX).contains(&mark)
    {
        errors.add(
            field,
            format!("Select a valid choice. {mark} is not one of the available choices."),
        );
    }
}

pub fn check_presence(errors: &mut FieldErrors, field: &str, value: Option<&str>) {
    if let Some(code) = value
        && !code.is_empty()
        && !PRESENCE_CODES.contains(&code)
    {
        errors.add(
            field,
            format!("Select a valid choice. {code} is not one of the available choices."),
        );
    }
}

/// 空串视为未填写
pub fn normalize_presence(value: Option<String>) -> Option<String> {
    value.filter(|code| !code.is_empty())
}

/// 成绩与出勤不能同时为空
pub fn check_mark_or_presence(errors: &mut FieldErrors, mark: Option<i32>, presence: Option<&str>) {
    let presence_empty = presence.is_none_or(str::is_empty);
    if mark.is_none() && presence_empty {
        errors.add_non_field(MSG_MARK_AND_PRESENCE_EMPTY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(len: usize) -> String {
        "a".repeat(len)
    }

    #[test]
    fn test_text_at_limit_passes() {
        let mut errors = FieldErrors::default();
        check_required_text(&mut errors, "title", &text_of(CHARS_DEFAULT));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_text_over_limit_fails() {
        let mut errors = FieldErrors::default();
        check_required_text(&mut errors, "title", &text_of(CHARS_DEFAULT + 1));
        assert_eq!(errors.field("title").map(|m| m.len()), Some(1));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut errors = FieldErrors::default();
        check_text_length(&mut errors, "full_name", &"Ж".repeat(CHARS_DEFAULT));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_blank_required_text_fails() {
        let mut errors = FieldErrors::default();
        check_required_text(&mut errors, "task", "   ");
        assert_eq!(errors.field("task"), Some(&[MSG_REQUIRED.to_string()][..]));
    }

    #[test]
    fn test_calendar_validation() {
        assert!(parse_day("2023-12-31").is_ok());
        assert!(parse_day("2024-02-29").is_ok());
        assert!(parse_day("2023-02-29").is_err());
        assert!(parse_day("2023-13-40").is_err());

        assert!(parse_time("00:00:00").is_ok());
        assert!(parse_time("23:59:59").is_ok());
        assert!(parse_time("09:45").is_ok());
        assert!(parse_time("24:70:61").is_err());
    }

    #[test]
    fn test_mark_range() {
        let mut errors = FieldErrors::default();
        check_mark_value(&mut errors, "mark", Some(1));
        check_mark_value(&mut errors, "mark", Some(5));
        check_mark_value(&mut errors, "mark", None);
        assert!(errors.is_empty());

        check_mark_value(&mut errors, "mark", Some(6));
        check_mark_value(&mut errors, "mark", Some(0));
        assert_eq!(errors.field("mark").map(|m| m.len()), Some(2));
    }

    #[test]
    fn test_presence_codes() {
        let mut errors = FieldErrors::default();
        check_presence(&mut errors, "presence", Some("Н"));
        check_presence(&mut errors, "presence", Some(""));
        check_presence(&mut errors, "presence", None);
        assert!(errors.is_empty());

        check_presence(&mut errors, "presence", Some("x"));
        assert!(errors.field("presence").is_some());
    }

    #[test]
    fn test_mark_and_presence_cross_field() {
        let mut errors = FieldErrors::default();
        check_mark_or_presence(&mut errors, None, None);
        assert_eq!(
            errors.non_field_errors,
            vec![MSG_MARK_AND_PRESENCE_EMPTY.to_string()]
        );

        let mut errors = FieldErrors::default();
        check_mark_or_presence(&mut errors, None, Some(""));
        assert_eq!(errors.non_field_errors.len(), 1);

        let mut errors = FieldErrors::default();
        check_mark_or_presence(&mut errors, Some(4), None);
        check_mark_or_presence(&mut errors, None, Some("Н"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_display_lists_fields() {
        let mut errors = FieldErrors::default();
        errors.add("title", "bad");
        errors.add_non_field("broken");
        let text = errors.to_string();
        assert!(text.contains("broken"));
        assert!(text.contains("title: bad"));
    }
}
