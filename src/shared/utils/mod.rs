/// 공유 유틸리티 모듈
/// Shared Utilities Module
///
/// 역할:
/// - tracing 로깅 초기화
pub mod logging;
