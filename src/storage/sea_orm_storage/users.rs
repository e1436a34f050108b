use super::SeaOrmStorage;
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::teachers::{Column as TeacherColumn, Entity as Teachers};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{PortalError, Result};
use crate::models::users::{
    entities::{User, Viewer},
    requests::CreateUserRequest,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

impl SeaOrmStorage {
    /// 创建账号
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            password_hash: Set(req.password),
            is_superuser: Set(req.is_superuser),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PortalError::from_write_error("创建账号失败", e))?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取账号
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名或邮箱获取账号
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 统计账号数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("统计账号数量失败: {e}")))
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 解析门户身份：超级用户 → 学生 → 教师 → 普通成员
    pub async fn resolve_viewer_impl(&self, user: &User) -> Result<Viewer> {
        if user.is_superuser {
            return Ok(Viewer::Superuser);
        }

        let student = Students::find()
            .filter(StudentColumn::UserId.eq(user.id))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询学生身份失败: {e}")))?;

        // 教师记录独立查询，学生身份不影响写权限
        let teacher_id = Teachers::find()
            .filter(TeacherColumn::UserId.eq(user.id))
            .one(&self.db)
            .await
            .map_err(|e| PortalError::database_operation(format!("查询教师身份失败: {e}")))?
            .map(|teacher| teacher.id);

        if let Some(student) = student {
            return Ok(Viewer::Student {
                student_id: student.id,
                group_id: student.group_id,
                teacher_id,
            });
        }

        if let Some(teacher_id) = teacher_id {
            return Ok(Viewer::Teacher { teacher_id });
        }

        Ok(Viewer::Member)
    }
}
