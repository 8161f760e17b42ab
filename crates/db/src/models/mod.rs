pub mod api_key;
pub mod assessment;
pub mod career;
pub mod personality_type;
pub mod question;
pub mod role;
pub mod session;
pub mod user;
