use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

// 分页响应信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

// 分页列表响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

/// 列表接口的页码与每页条数
pub fn normalize_page_params(page: Option<i64>, size: Option<i64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1) as u64;
    let size = size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE) as u64;
    (page, size)
}

/// 总页数，空集合也算一页
pub fn page_count(total: u64, page_size: u64) -> u64 {
    if total == 0 {
        1
    } else {
        total.div_ceil(page_size.max(1))
    }
}

/// 目录页的页码解析
///
/// 非数字页码取第一页；小于 1 或超出范围的页码取最后一页。
pub fn resolve_page_number(raw: Option<&str>, num_pages: u64) -> u64 {
    let Some(raw) = raw else {
        return 1;
    };

    match raw.trim().parse::<i64>() {
        Ok(number) if number >= 1 && (number as u64) <= num_pages => number as u64,
        Ok(_) => num_pages.max(1),
        Err(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_page_params() {
        assert_eq!(normalize_page_params(None, None), (1, 10));
        assert_eq!(normalize_page_params(Some(0), Some(1000)), (1, 100));
        assert_eq!(normalize_page_params(Some(3), Some(0)), (3, 1));
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
    }

    #[test]
    fn test_resolve_page_number() {
        assert_eq!(resolve_page_number(None, 3), 1);
        assert_eq!(resolve_page_number(Some("2"), 3), 2);
        assert_eq!(resolve_page_number(Some("abc"), 3), 1);
        assert_eq!(resolve_page_number(Some("99"), 3), 3);
        assert_eq!(resolve_page_number(Some("0"), 3), 3);
        assert_eq!(resolve_page_number(Some("-1"), 1), 1);
    }
}
