use serde::{Deserialize, Serialize};

// 账号
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub is_superuser: bool,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 门户角色（不带关联 ID）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViewerRole {
    Superuser,
    Student,
    Teacher,
    Member,
}

impl ViewerRole {
    pub const SUPERUSER: &'static str = "superuser";
    pub const STUDENT: &'static str = "student";
    pub const TEACHER: &'static str = "teacher";
    pub const MEMBER: &'static str = "member";

    /// 可以进行写操作的角色
    pub fn staff_roles() -> &'static [&'static ViewerRole] {
        &[&Self::Superuser, &Self::Teacher]
    }
}

impl std::fmt::Display for ViewerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewerRole::Superuser => write!(f, "{}", ViewerRole::SUPERUSER),
            ViewerRole::Student => write!(f, "{}", ViewerRole::STUDENT),
            ViewerRole::Teacher => write!(f, "{}", ViewerRole::TEACHER),
            ViewerRole::Member => write!(f, "{}", ViewerRole::MEMBER),
        }
    }
}

/// 请求者在门户中的身份
///
/// 解析顺序：超级用户 → 学生 → 教师 → 普通成员。
/// 同时关联学生与教师记录的账号按学生计算可见范围，`teacher_id` 保留其教师权限。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Viewer {
    Superuser,
    Student {
        student_id: i64,
        group_id: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        teacher_id: Option<i64>,
    },
    Teacher {
        teacher_id: i64,
    },
    Member,
}

impl Viewer {
    pub fn role(&self) -> ViewerRole {
        match self {
            Viewer::Superuser => ViewerRole::Superuser,
            Viewer::Student { .. } => ViewerRole::Student,
            Viewer::Teacher { .. } => ViewerRole::Teacher,
            Viewer::Member => ViewerRole::Member,
        }
    }

    /// 关联的教师记录
    pub fn teacher_id(&self) -> Option<i64> {
        match *self {
            Viewer::Teacher { teacher_id } => Some(teacher_id),
            Viewer::Student { teacher_id, .. } => teacher_id,
            _ => None,
        }
    }

    /// 是否具备某个角色，教师角色按是否存在教师记录判断
    pub fn holds(&self, role: ViewerRole) -> bool {
        match role {
            ViewerRole::Teacher => self.teacher_id().is_some(),
            _ => self.role() == role,
        }
    }

    pub fn is_staff(&self) -> bool {
        ViewerRole::staff_roles().iter().any(|role| self.holds(**role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_roles() {
        assert!(Viewer::Superuser.is_staff());
        assert!(Viewer::Teacher { teacher_id: 1 }.is_staff());
        assert!(
            !Viewer::Student {
                student_id: 1,
                group_id: 2,
                teacher_id: None
            }
            .is_staff()
        );
        assert!(!Viewer::Member.is_staff());
    }

    #[test]
    fn test_student_with_teacher_record_is_staff() {
        let viewer = Viewer::Student {
            student_id: 1,
            group_id: 2,
            teacher_id: Some(9),
        };

        assert_eq!(viewer.role(), ViewerRole::Student);
        assert!(viewer.holds(ViewerRole::Teacher));
        assert!(viewer.holds(ViewerRole::Student));
        assert!(!viewer.holds(ViewerRole::Superuser));
        assert!(viewer.is_staff());
        assert_eq!(viewer.teacher_id(), Some(9));
    }

    #[test]
    fn test_viewer_serializes_with_role_tag() {
        let json = serde_json::to_value(Viewer::Teacher { teacher_id: 4 }).unwrap();
        assert_eq!(json["role"], "teacher");
        assert_eq!(json["teacher_id"], 4);
    }
}
