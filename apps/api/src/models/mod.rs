pub mod cover_letter;
pub mod profile;
pub mod resume;

pub use cover_letter::{ContactInfo, CoverLetterContent};
pub use profile::Profile;
pub use resume::{ResumeContent, TailoredContent};
