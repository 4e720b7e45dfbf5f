pub mod models;
pub mod text;
pub mod timeline;

pub use models::{
    Attachment, Body, Chat, ChatSummary, Export, Member, Message, SearchResult, Sender,
    SystemEvent, User,
};
pub use timeline::{group_by_day, DayGroup};
