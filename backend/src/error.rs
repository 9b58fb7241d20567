use std::fmt;

// =========================================================
// 错误状态枚举
// =========================================================

/// 错误状态枚举
/// 包含错误对应的语义（状态码）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyErrorStatus {
    /// 400: 请求参数缺失或非法（如缺少 `url`）
    InvalidInput,
    /// 502: 无法连接上游图片服务器
    Upstream,
    /// 500: Worker 内部错误（如构建响应失败）
    Internal,
}

impl ProxyErrorStatus {
    pub fn status_code(&self) -> u16 {
        match self {
            ProxyErrorStatus::InvalidInput => 400,
            ProxyErrorStatus::Upstream => 502,
            ProxyErrorStatus::Internal => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ProxyErrorStatus::InvalidInput => "INVALID_INPUT",
            ProxyErrorStatus::Upstream => "UPSTREAM_ERROR",
            ProxyErrorStatus::Internal => "INTERNAL_ERROR",
        }
    }

    /// 5xx 对外只暴露通用描述
    pub fn public_message(&self) -> Option<&'static str> {
        match self {
            ProxyErrorStatus::InvalidInput => None,
            ProxyErrorStatus::Upstream => Some("Bad Gateway"),
            ProxyErrorStatus::Internal => Some("Internal Server Error"),
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone)]
pub struct ErrorSpan {
    /// 操作名称，如 "proxy.fetch"
    pub operation: String,
    /// 额外的细节信息，如上游 URL
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

#[derive(Debug)]
pub struct ProxyError {
    pub status: ProxyErrorStatus,
    pub message: String,
    spans: Vec<ErrorSpan>,
}

impl ProxyError {
    pub fn new(status: ProxyErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            spans: Vec::new(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ProxyErrorStatus::InvalidInput, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ProxyErrorStatus::Upstream, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ProxyErrorStatus::Internal, message)
    }

    /// 添加操作追踪（无额外细节）
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    /// 添加操作追踪（带额外细节）
    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    pub fn status_code(&self) -> u16 {
        self.status.status_code()
    }

    pub fn error_code(&self) -> &'static str {
        self.status.error_code()
    }

    /// 返回给客户端的响应体
    pub fn public_message(&self) -> &str {
        self.status.public_message().unwrap_or(&self.message)
    }
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ProxyError {}

pub type ProxyResult<T> = std::result::Result<T, ProxyError>;

impl From<worker::Error> for ProxyError {
    fn from(e: worker::Error) -> Self {
        ProxyError::internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_trace() {
        let err = ProxyError::upstream("connection reset")
            .in_op_with("proxy.fetch", "https://img.example/a.jpg")
            .in_op("image_proxy");

        assert_eq!(
            err.to_string(),
            "[UPSTREAM_ERROR] connection reset | trace: proxy.fetch(https://img.example/a.jpg) -> image_proxy"
        );
    }

    #[test]
    fn test_worker_errors_become_internal() {
        let err: ProxyError = worker::Error::RustError("bad header value".into()).into();

        assert_eq!(err.status, ProxyErrorStatus::Internal);
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), "Internal Server Error");
        assert!(err.to_string().starts_with("[INTERNAL_ERROR] "));
        assert!(err.message.contains("bad header value"));
    }

    #[test]
    fn test_server_errors_are_masked() {
        assert_eq!(ProxyError::invalid_input("Missing URL").public_message(), "Missing URL");
        assert_eq!(ProxyError::upstream("dns failure").public_message(), "Bad Gateway");
        assert_eq!(ProxyError::internal("oops").public_message(), "Internal Server Error");
        assert_eq!(ProxyError::internal("oops").status_code(), 500);
    }
}
