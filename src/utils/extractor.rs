//! 路径参数提取器
//!
//! 非法 ID 直接返回统一格式的 400 响应，不进入处理程序。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// 路径中的 `{id}`，必须是正整数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeIDI64(pub i64);

fn parse_id(raw: Option<&str>) -> Result<i64, String> {
    let raw = raw.ok_or_else(|| "Missing id in path".to_string())?;
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(format!("Invalid id: {raw}")),
    }
}

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = parse_id(req.match_info().get("id")).map(SafeIDI64).map_err(|msg| {
            let response = HttpResponse::BadRequest()
                .json(ApiResponse::<()>::error_empty(ErrorCode::BadRequest, &msg));
            InternalError::from_response(msg, response).into()
        });
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(Some("12")), Ok(12));
        assert!(parse_id(Some("0")).is_err());
        assert!(parse_id(Some("-3")).is_err());
        assert!(parse_id(Some("abc")).is_err());
        assert!(parse_id(None).is_err());
    }
}
