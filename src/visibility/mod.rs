//! 角色可见性
//!
//! `EntityKind` 标识门户中的八类实体，`resolver` 根据请求者身份
//! 决定每类实体的可见范围。

pub mod resolver;

use serde::{Deserialize, Serialize};

pub use resolver::{Rule, Scope, resolve, rules_for};

/// 门户实体类别，序列化为目录页路径中的名称
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    #[serde(rename = "faculties")]
    Faculty,
    #[serde(rename = "groups")]
    Group,
    #[serde(rename = "subjects")]
    Subject,
    #[serde(rename = "teachers")]
    Teacher,
    #[serde(rename = "students")]
    Student,
    #[serde(rename = "lessons")]
    Lesson,
    #[serde(rename = "marks")]
    Mark,
    #[serde(rename = "hometasks")]
    Hometask,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Faculty,
        EntityKind::Group,
        EntityKind::Subject,
        EntityKind::Teacher,
        EntityKind::Student,
        EntityKind::Lesson,
        EntityKind::Mark,
        EntityKind::Hometask,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            EntityKind::Faculty => "faculties",
            EntityKind::Group => "groups",
            EntityKind::Subject => "subjects",
            EntityKind::Teacher => "teachers",
            EntityKind::Student => "students",
            EntityKind::Lesson => "lessons",
            EntityKind::Mark => "marks",
            EntityKind::Hometask => "hometasks",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    /// 目录页排序字段
    pub fn sort_field(&self) -> &'static str {
        rules_for(*self).sort_field
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(EntityKind::from_slug("users"), None);
    }

    #[test]
    fn test_serialized_name_matches_slug() {
        let json = serde_json::to_value(EntityKind::Hometask).unwrap();
        assert_eq!(json, "hometasks");
    }
}
