//! Data model shared by the session controller, the chat client and the
//! resource aggregator.

pub mod chat_message;
pub mod chat_reply;
pub mod chat_request;
pub mod mood;
pub mod resource;
pub mod resource_group;
pub mod sender;

pub use chat_message::ChatMessage;
pub use chat_reply::ChatReply;
pub use chat_request::ChatRequest;
pub use mood::Mood;
pub use resource::Resource;
pub use resource_group::{ResourceGroup, ResourceLink};
pub use sender::Sender;
