use super::EntityKind;
use crate::models::users::entities::Viewer;

/// 某一角色对某类实体的可见规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    All,
    Nothing,
    // 学生规则
    OwnGroup,
    GroupLessons,
    OwnMarks,
    GroupHometasks,
    // 教师规则
    SubjectGroups,
    TaughtLessons,
    TaughtMarks,
    TaughtHometasks,
}

/// 规则绑定到具体请求者后的查询范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    Nothing,
    /// 指定学生组本身
    Group(i64),
    /// 包含该学生组的课程
    LessonsOfGroup(i64),
    /// 该学生的成绩
    MarksOfStudent(i64),
    /// 该学生组课程的作业
    HometasksOfGroup(i64),
    /// 与该教师所授科目有交集的学生组
    GroupsSharingSubjects(i64),
    LessonsOfTeacher(i64),
    MarksOfTeacher(i64),
    HometasksOfTeacher(i64),
}

#[derive(Debug, Clone, Copy)]
pub struct KindRules {
    pub kind: EntityKind,
    pub sort_field: &'static str,
    pub student: Rule,
    pub teacher: Rule,
    pub member: Rule,
}

static RULES: [KindRules; 8] = [
    KindRules {
        kind: EntityKind::Faculty,
        sort_field: "title",
        student: Rule::All,
        teacher: Rule::All,
        member: Rule::All,
    },
    KindRules {
        kind: EntityKind::Group,
        sort_field: "faculty",
        student: Rule::OwnGroup,
        teacher: Rule::SubjectGroups,
        member: Rule::Nothing,
    },
    KindRules {
        kind: EntityKind::Subject,
        sort_field: "title",
        student: Rule::All,
        teacher: Rule::All,
        member: Rule::Nothing,
    },
    KindRules {
        kind: EntityKind::Teacher,
        sort_field: "full_name",
        student: Rule::All,
        teacher: Rule::All,
        member: Rule::All,
    },
    KindRules {
        kind: EntityKind::Student,
        sort_field: "full_name",
        student: Rule::All,
        teacher: Rule::All,
        member: Rule::Nothing,
    },
    KindRules {
        kind: EntityKind::Lesson,
        sort_field: "day",
        student: Rule::GroupLessons,
        teacher: Rule::TaughtLessons,
        member: Rule::Nothing,
    },
    KindRules {
        kind: EntityKind::Mark,
        sort_field: "lesson",
        student: Rule::OwnMarks,
        teacher: Rule::TaughtMarks,
        member: Rule::Nothing,
    },
    KindRules {
        kind: EntityKind::Hometask,
        sort_field: "lesson",
        student: Rule::GroupHometasks,
        teacher: Rule::TaughtHometasks,
        member: Rule::Nothing,
    },
];

pub fn rules_for(kind: EntityKind) -> &'static KindRules {
    // RULES 按 EntityKind::ALL 的顺序排列
    &RULES[kind as usize]
}

/// 计算请求者对某类实体的可见范围
pub fn resolve(viewer: &Viewer, kind: EntityKind) -> Scope {
    let rules = rules_for(kind);
    match *viewer {
        Viewer::Superuser => Scope::All,
        Viewer::Student {
            student_id,
            group_id,
            ..
        } => match rules.student {
            Rule::OwnGroup => Scope::Group(group_id),
            Rule::GroupLessons => Scope::LessonsOfGroup(group_id),
            Rule::OwnMarks => Scope::MarksOfStudent(student_id),
            Rule::GroupHometasks => Scope::HometasksOfGroup(group_id),
            other => unbound(other),
        },
        Viewer::Teacher { teacher_id } => match rules.teacher {
            Rule::SubjectGroups => Scope::GroupsSharingSubjects(teacher_id),
            Rule::TaughtLessons => Scope::LessonsOfTeacher(teacher_id),
            Rule::TaughtMarks => Scope::MarksOfTeacher(teacher_id),
            Rule::TaughtHometasks => Scope::HometasksOfTeacher(teacher_id),
            other => unbound(other),
        },
        Viewer::Member => unbound(rules.member),
    }
}

// 不需要请求者 ID 的规则
fn unbound(rule: Rule) -> Scope {
    match rule {
        Rule::All => Scope::All,
        _ => Scope::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STUDENT: Viewer = Viewer::Student {
        student_id: 7,
        group_id: 3,
        teacher_id: None,
    };
    const TEACHER: Viewer = Viewer::Teacher { teacher_id: 5 };

    #[test]
    fn test_rules_table_is_indexed_by_kind() {
        for kind in EntityKind::ALL {
            assert_eq!(rules_for(kind).kind, kind);
        }
    }

    #[test]
    fn test_catalog_sort_fields() {
        let fields: Vec<_> = EntityKind::ALL.iter().map(|k| k.sort_field()).collect();
        assert_eq!(
            fields,
            vec![
                "title",
                "faculty",
                "title",
                "full_name",
                "full_name",
                "day",
                "lesson",
                "lesson"
            ]
        );
    }

    #[test]
    fn test_superuser_sees_everything() {
        for kind in EntityKind::ALL {
            assert_eq!(resolve(&Viewer::Superuser, kind), Scope::All);
        }
    }

    #[test]
    fn test_student_scopes() {
        assert_eq!(resolve(&STUDENT, EntityKind::Group), Scope::Group(3));
        assert_eq!(resolve(&STUDENT, EntityKind::Lesson), Scope::LessonsOfGroup(3));
        assert_eq!(resolve(&STUDENT, EntityKind::Mark), Scope::MarksOfStudent(7));
        assert_eq!(
            resolve(&STUDENT, EntityKind::Hometask),
            Scope::HometasksOfGroup(3)
        );
        // 其余类别不做限制
        assert_eq!(resolve(&STUDENT, EntityKind::Teacher), Scope::All);
        assert_eq!(resolve(&STUDENT, EntityKind::Subject), Scope::All);
    }

    #[test]
    fn test_teacher_scopes() {
        assert_eq!(
            resolve(&TEACHER, EntityKind::Group),
            Scope::GroupsSharingSubjects(5)
        );
        assert_eq!(resolve(&TEACHER, EntityKind::Lesson), Scope::LessonsOfTeacher(5));
        assert_eq!(resolve(&TEACHER, EntityKind::Mark), Scope::MarksOfTeacher(5));
        assert_eq!(
            resolve(&TEACHER, EntityKind::Hometask),
            Scope::HometasksOfTeacher(5)
        );
        assert_eq!(resolve(&TEACHER, EntityKind::Faculty), Scope::All);
    }

    #[test]
    fn test_member_sees_only_faculties_and_teachers() {
        for kind in EntityKind::ALL {
            let expected = match kind {
                EntityKind::Faculty | EntityKind::Teacher => Scope::All,
                _ => Scope::Nothing,
            };
            assert_eq!(resolve(&Viewer::Member, kind), expected, "{kind}");
        }
    }
}
