mod admin;
mod applications;
mod resumes;

pub use admin::health;
pub use applications::{preflight, submit_application};
pub use resumes::download_resume;
