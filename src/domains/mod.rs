// Domain modules
// 도메인별 모듈 (models / services / handlers / routes)
pub mod auth;
pub mod posts;
