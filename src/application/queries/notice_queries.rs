//! Notice Queries

use uuid::Uuid;

use crate::application::ports::Paging;

#[derive(Debug, Clone)]
pub struct GetNotice {
    pub notice_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct ListNotices {
    pub paging: Paging,
}
