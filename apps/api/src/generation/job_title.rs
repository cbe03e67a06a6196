//! Derives role, company and archive folder names from the submitted job title.

/// Company used when the job title has no " at " separator.
pub const DEFAULT_COMPANY_NAME: &str = "Hiring Team";
const FALLBACK_FOLDER_NAME: &str = "job";
const SEPARATOR: &str = " at ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobTitleParts {
    pub role_title: String,
    pub company_name: String,
}

/// Splits "Role at Company": the first segment is the role, the last the company.
pub fn split_job_title(job_title: &str) -> JobTitleParts {
    let segments: Vec<&str> = job_title.split(SEPARATOR).collect();

    match segments.as_slice() {
        [first, .., last] => JobTitleParts {
            role_title: first.trim().to_string(),
            company_name: last.trim().to_string(),
        },
        _ => JobTitleParts {
            role_title: job_title.trim().to_string(),
            company_name: DEFAULT_COMPANY_NAME.to_string(),
        },
    }
}

/// Folder and archive name: spaces become underscores, then anything outside
/// `[A-Za-z0-9_.-]` is dropped and leading dots are removed so the name cannot
/// leave the working directory.
pub fn archive_folder_name(job_title: &str) -> String {
    let name: String = job_title
        .trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();
    let name = name.trim_start_matches('.');

    if name.is_empty() {
        FALLBACK_FOLDER_NAME.to_string()
    } else {
        name.to_string()
    }
}
