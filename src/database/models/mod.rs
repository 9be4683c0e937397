pub mod answer;
pub mod question;
pub mod tag;
pub mod user_auth;

pub use answer::{Answer, AnswerRow};
pub use question::{Question, QuestionRow};
pub use tag::Tag;
pub use user_auth::UserAuth;
