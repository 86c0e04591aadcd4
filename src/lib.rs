// post_api 라이브러리 루트 (바이너리와 통합 테스트가 공유)
pub mod domains;
pub mod routes;
pub mod shared;
