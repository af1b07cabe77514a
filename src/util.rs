use anyhow::Context;

pub fn e400<T>(e: T) -> actix_web::Error
where
    T: std::fmt::Debug + std::fmt::Display + 'static,
{
    actix_web::error::ErrorBadRequest(e)
}

/// tracing error log
/// 递归调用底层错误信息，显示完整错误链
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    write!(f, "{e}")?;
    let mut current = e.source();
    while let Some(cause) = current {
        write!(f, " Caused by: {cause}")?;
        current = cause.source();
    }
    Ok(())
}

/// 解析基础地址，统一补上末尾的`/`，以便`Url::join`保留已有路径
pub fn parse_base_url(base_url: &str) -> anyhow::Result<reqwest::Url> {
    let normalized = format!("{}/", base_url.trim().trim_end_matches('/'));
    reqwest::Url::parse(&normalized).with_context(|| format!("failed to parse base url `{base_url}`."))
}
