//! 商品列表的查询与分页逻辑
//!
//! 纯逻辑层，不依赖 DOM：
//! - 根据当前 offset 与防抖后的搜索词决定请求哪个接口
//! - 基于"本页是否满页"推断是否还有下一页（没有总数，只是近似）
//! - 列表视图的加载状态机 `idle -> loading -> {loaded | failed}`

use crate::PAGE_SIZE;
use crate::protocol::{ListProducts, SearchProducts};

/// 列表视图要发起的查询
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListQuery {
    /// 分页列表
    Page(ListProducts),
    /// 搜索（不分页）
    Search(SearchProducts),
}

/// 分页游标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(limit: usize) -> Self {
        Self { offset: 0, limit }
    }

    pub fn next(self) -> Self {
        Self {
            offset: self.offset + self.limit,
            ..self
        }
    }

    /// 上一页，最小为 0
    pub fn previous(self) -> Self {
        Self {
            offset: self.offset.saturating_sub(self.limit),
            ..self
        }
    }

    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    /// 从 1 开始的页码
    pub fn page_number(&self) -> usize {
        if self.limit == 0 {
            1
        } else {
            self.offset / self.limit + 1
        }
    }

    /// 本页刚好满页时认为还有下一页
    pub fn has_more(&self, fetched: usize) -> bool {
        fetched == self.limit
    }
}

/// 列表视图的查询参数：分页游标 + 防抖后的搜索词
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub pagination: Pagination,
    /// 已去除首尾空白的搜索词
    search: String,
}

impl ListView {
    pub fn new(limit: usize) -> Self {
        Self {
            pagination: Pagination::new(limit),
            search: String::new(),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.trim().to_string();
    }

    pub fn is_searching(&self) -> bool {
        !self.search.is_empty()
    }

    /// 决定要请求的接口：搜索词非空时走搜索接口，忽略 offset
    pub fn query(&self) -> ListQuery {
        if self.is_searching() {
            ListQuery::Search(SearchProducts {
                searched_text: self.search.clone(),
            })
        } else {
            ListQuery::Page(ListProducts {
                offset: self.pagination.offset,
                limit: self.pagination.limit,
            })
        }
    }

    /// 搜索中或本页为空时不显示分页控件
    pub fn shows_pagination(&self, item_count: usize) -> bool {
        !self.is_searching() && item_count > 0
    }

    /// "下一页"按钮是否可用
    pub fn next_enabled(&self, fetched: usize) -> bool {
        !self.is_searching() && self.pagination.has_more(fetched)
    }

    pub fn previous_enabled(&self) -> bool {
        self.pagination.has_previous()
    }

    pub fn go_next(&mut self) {
        self.pagination = self.pagination.next();
    }

    pub fn go_previous(&mut self) {
        self.pagination = self.pagination.previous();
    }
}

/// 远程数据的加载状态
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_requests_first_page() {
        let view = ListView::new(PAGE_SIZE);
        assert_eq!(
            view.query(),
            ListQuery::Page(ListProducts {
                offset: 0,
                limit: 8
            })
        );
        assert!(!view.previous_enabled());
    }

    #[test]
    fn test_full_page_enables_next() {
        let view = ListView::new(8);
        assert!(view.next_enabled(8));
        assert!(!view.next_enabled(7));
        assert!(!view.next_enabled(0));
    }

    #[test]
    fn test_search_switches_endpoint_and_hides_pagination() {
        let mut view = ListView::new(8);
        view.go_next();
        view.set_search("  lamp ");

        assert_eq!(view.search(), "lamp");
        assert_eq!(
            view.query(),
            ListQuery::Search(SearchProducts {
                searched_text: "lamp".into()
            })
        );
        assert!(!view.shows_pagination(8));
        assert!(!view.next_enabled(8));
    }

    #[test]
    fn test_clearing_search_restores_offset() {
        let mut view = ListView::new(8);
        view.go_next();
        view.go_next();
        view.set_search("desk");
        view.set_search("   ");

        assert!(!view.is_searching());
        assert_eq!(
            view.query(),
            ListQuery::Page(ListProducts {
                offset: 16,
                limit: 8
            })
        );
    }

    #[test]
    fn test_pagination_hidden_for_empty_page() {
        let view = ListView::new(8);
        assert!(!view.shows_pagination(0));
        assert!(view.shows_pagination(3));
    }

    #[test]
    fn test_previous_saturates_at_zero() {
        let mut view = ListView::new(8);
        view.go_previous();
        assert_eq!(view.pagination.offset, 0);

        view.go_next();
        assert_eq!(view.pagination.page_number(), 2);
        assert!(view.previous_enabled());
        view.go_previous();
        assert_eq!(view.pagination.page_number(), 1);
    }

    #[test]
    fn test_load_state_accessors() {
        let state: LoadState<Vec<u8>> = LoadState::Failed("Error: 500".into());
        assert_eq!(state.error(), Some("Error: 500"));
        assert!(state.loaded().is_none());
        assert!(LoadState::<()>::Loading.is_loading());
    }
}
