pub mod bank;
pub mod flow;
pub mod question;
pub mod session;

pub use bank::{QuestionBank, QuestionBankError};
pub use flow::select_visible_questions;
pub use question::{
    Answer, AssessmentQuestion, PathwayTier, ProfileType, QuestionResponse, QuestionType,
};
pub use session::{AssessmentSession, ProfileClassifier, ResponseError, SelectionCatalog};
