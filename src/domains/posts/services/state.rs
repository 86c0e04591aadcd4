// Posts domain state
// 게시글 도메인 상태
use crate::shared::database::Storage;
use crate::domains::posts::services::PostService;

#[derive(Clone)]
pub struct PostState {
    pub post_service: PostService,
}

impl PostState {
    pub fn new(storage: &Storage) -> Self {
        Self {
            post_service: PostService::new(storage.posts.clone()),
        }
    }
}
