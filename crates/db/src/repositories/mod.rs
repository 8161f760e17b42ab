pub mod api_key_repo;
pub mod assessment_repo;
pub mod career_repo;
pub mod personality_type_repo;
pub mod question_repo;
pub mod role_repo;
pub mod session_repo;
pub mod user_repo;

pub use api_key_repo::ApiKeyRepo;
pub use assessment_repo::AssessmentRepo;
pub use career_repo::CareerRepo;
pub use personality_type_repo::PersonalityTypeRepo;
pub use question_repo::QuestionRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
